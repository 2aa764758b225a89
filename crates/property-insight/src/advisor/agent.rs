use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, warn};

use super::client::{ChatMessage, Completion, CompletionClient, CompletionRequest};
use super::contract_review::{
    contract_review_system_prompt, contract_review_user_prompt, contract_reviewer_tool,
    parse_contract_review, ContractReview,
};
use super::tools::ToolDefinition;
use super::web_scraper::web_scraper_tool;
use super::AdvisorError;

const REVIEW_TEMPERATURE: f32 = 0.1;
const REVIEW_MAX_TOKENS: u32 = 2000;

/// LLM-backed advisor holding the tool registry offered to the model.
pub struct AdvisorAgent<C> {
    client: Arc<C>,
    tools: BTreeMap<String, ToolDefinition>,
}

impl<C> AdvisorAgent<C>
where
    C: CompletionClient + 'static,
{
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            tools: BTreeMap::new(),
        }
    }

    /// Agent with the contract reviewer and web scraper tools registered.
    pub fn with_default_tools(client: Arc<C>) -> Self {
        let mut agent = Self::new(client);
        agent.register_tool(contract_reviewer_tool());
        agent.register_tool(web_scraper_tool());
        agent
    }

    /// Register a tool, replacing any tool with the same name.
    pub fn register_tool(&mut self, tool: ToolDefinition) {
        self.tools.insert(tool.name.clone(), tool);
    }

    pub fn tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    pub fn tool_names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    /// Send a single user prompt, offering the named tools to the model.
    pub async fn infer(&self, prompt: &str, tools: &[&str]) -> Result<Completion, AdvisorError> {
        let tools = tools
            .iter()
            .map(|name| {
                self.tools
                    .get(*name)
                    .cloned()
                    .ok_or_else(|| AdvisorError::UnknownTool(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.client
            .complete(CompletionRequest {
                messages: vec![ChatMessage::user(prompt)],
                tools,
                ..CompletionRequest::default()
            })
            .await
    }

    /// Review a contract. Failures are reported inside the returned review.
    pub async fn analyze_contract(&self, file_content: &str) -> ContractReview {
        match self.request_review(file_content).await {
            Ok(raw) => {
                let review = parse_contract_review(&raw);
                info!(
                    warnings = review.warnings.len(),
                    parsed = review.raw_response.is_none(),
                    "contract review completed"
                );
                review
            }
            Err(err) => {
                warn!(error = %err, "contract review failed");
                ContractReview::failed(err)
            }
        }
    }

    async fn request_review(&self, file_content: &str) -> Result<String, AdvisorError> {
        let request = CompletionRequest {
            messages: vec![
                ChatMessage::system(contract_review_system_prompt()),
                ChatMessage::user(contract_review_user_prompt(file_content)),
            ],
            tools: Vec::new(),
            temperature: Some(REVIEW_TEMPERATURE),
            max_tokens: Some(REVIEW_MAX_TOKENS),
        };

        self.client
            .complete(request)
            .await?
            .content
            .ok_or(AdvisorError::EmptyResponse)
    }
}
