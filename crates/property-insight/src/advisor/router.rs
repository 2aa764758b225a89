use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use super::agent::AdvisorAgent;
use super::client::CompletionClient;
use super::contract_review::ContractReview;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractReviewRequest {
    pub file_content: String,
}

/// Public shape of a review; the unparsed model output is not exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractReviewResponse {
    pub summary: String,
    pub highlights: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

impl From<ContractReview> for ContractReviewResponse {
    fn from(review: ContractReview) -> Self {
        Self {
            summary: review.summary,
            highlights: review.highlights,
            warnings: review.warnings,
            suggestions: review.suggestions,
        }
    }
}

pub fn advisor_router<C>(agent: Arc<AdvisorAgent<C>>) -> Router
where
    C: CompletionClient + 'static,
{
    Router::new()
        .route("/api/ai_contract_review", post(contract_review_handler::<C>))
        .with_state(agent)
}

pub(crate) async fn contract_review_handler<C>(
    State(agent): State<Arc<AdvisorAgent<C>>>,
    Json(request): Json<ContractReviewRequest>,
) -> Json<ContractReviewResponse>
where
    C: CompletionClient + 'static,
{
    let review = agent.analyze_contract(&request.file_content).await;
    Json(review.into())
}
