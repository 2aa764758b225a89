//! Contract review and research tools backed by a chat-completion model.

mod agent;
pub mod client;
mod contract_review;
pub mod router;
mod tools;
pub mod web_scraper;

pub use agent::AdvisorAgent;
pub use client::{
    ChatMessage, ChatRole, Completion, CompletionClient, CompletionRequest,
    OpenAiCompletionClient, ToolCall,
};
pub use contract_review::{
    contract_review_system_prompt, contract_review_user_prompt, contract_reviewer_tool,
    parse_contract_review, ContractReview, CONTRACT_REVIEWER_TOOL,
};
pub use router::{advisor_router, ContractReviewRequest, ContractReviewResponse};
pub use tools::ToolDefinition;
pub use web_scraper::{extract_page_text, web_scraper_tool, ScrapeError, WebScraper};

#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("OPENAI_API_KEY is not configured")]
    MissingApiKey,
    #[error("tool '{0}' is not registered")]
    UnknownTool(String),
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion endpoint returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("completion response contained no message content")]
    EmptyResponse,
}
