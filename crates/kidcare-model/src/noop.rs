use crate::provider::{RecommendationError, RecommendationRequest, RecommendationService};
use async_trait::async_trait;

/// NoOp recommendation service for offline use and testing
pub struct NoOpRecommendationService;

#[async_trait]
impl RecommendationService for NoOpRecommendationService {
    async fn request_health_recommendations(
        &self,
        _request: &RecommendationRequest,
    ) -> Result<String, RecommendationError> {
        Ok(String::new())
    }
}

impl NoOpRecommendationService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpRecommendationService {
    fn default() -> Self {
        Self::new()
    }
}
