use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use property_insight::advisor::{
    AdvisorAgent, AdvisorError, ChatRole, Completion, CompletionClient, CompletionRequest,
};

struct RecordingClient {
    reply: String,
    prompts: Mutex<Vec<CompletionRequest>>,
}

impl RecordingClient {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CompletionClient for RecordingClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, AdvisorError> {
        self.prompts.lock().expect("prompt mutex").push(request);
        Ok(Completion {
            content: Some(self.reply.clone()),
            tool_calls: Vec::new(),
        })
    }
}

const LEASE: &str = "Tenant shall pay rent of $2,500 on the first of each month. \
Landlord may enter the premises at any time without notice.";

#[tokio::test]
async fn fenced_model_answer_is_parsed() {
    let client = Arc::new(RecordingClient::new(
        "```json\n{\n  \"summary\": \"Twelve month residential lease\",\n  \"highlights\": [\"Rent of $2,500 due monthly\"],\n  \"warnings\": [\"Entry without notice may violate tenant rights\"],\n  \"suggestions\": [\"Require 24 hours notice before entry\"]\n}\n```",
    ));
    let agent = AdvisorAgent::with_default_tools(client.clone());

    let review = agent.analyze_contract(LEASE).await;

    assert_eq!(review.summary, "Twelve month residential lease");
    assert_eq!(review.highlights, vec!["Rent of $2,500 due monthly"]);
    assert_eq!(review.warnings.len(), 1);
    assert_eq!(review.suggestions.len(), 1);
    assert!(review.raw_response.is_none());

    let prompts = client.prompts.lock().expect("prompt mutex");
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].messages[0].role, ChatRole::System);
    assert_eq!(prompts[0].messages[1].role, ChatRole::User);
    assert!(prompts[0].messages[1].content.contains("without notice"));
    assert!(prompts[0].tools.is_empty());
}

#[tokio::test]
async fn prose_answer_is_kept_as_raw_response() {
    let reply = "This lease looks standard overall.";
    let agent = AdvisorAgent::new(Arc::new(RecordingClient::new(reply)));

    let review = agent.analyze_contract(LEASE).await;

    assert_eq!(review.summary, "Failed to parse AI response properly");
    assert_eq!(review.raw_response.as_deref(), Some(reply));
}
