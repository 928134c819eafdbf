//! Health recommendation adapter
//!
//! Builds the prompts sent to the text-generation gateway and maps gateway
//! failures onto [`RecommendationError`]. Transport belongs to the
//! [`RecommendationService`] implementation.

use crate::children::describe_age;
use crate::context::EvaluationContext;
use crate::error::EngineResult;
use kidcare_model::{Child, RecommendationError, RecommendationRequest, RecommendationService};
use log::debug;

/// Guidance given to the model before any child details
pub const SYSTEM_PROMPT: &str = "You are a pediatric health advisor providing evidence-based recommendations for children with birth health complications. \n\n\
Your role is to:
- Provide general health management guidance for common newborn health issues
- Suggest monitoring practices and preventive care
- Recommend when to seek professional medical attention
- Be supportive and reassuring while being medically accurate

Important guidelines:
- Always recommend consulting with a pediatrician for diagnosis and treatment
- Focus on general care, nutrition, and monitoring
- Avoid prescribing specific medications (note that medication tracking will be integrated with doctors in the future)
- Be clear about warning signs that require immediate medical attention
- Keep recommendations practical and actionable for parents

Format your response with clear sections for each health issue mentioned.";

/// Child-specific prompt
pub fn user_prompt(request: &RecommendationRequest) -> String {
    format!(
        "Child: {} ({})
Birth Health Issues: {}

Please provide:
1. Brief explanation of each health issue
2. General care recommendations and monitoring tips
3. Nutritional advice if applicable
4. Warning signs that require immediate medical attention
5. Long-term considerations and follow-up care

Keep the tone supportive and informative for concerned parents.",
        request.child_name,
        request.age,
        request.health_issues.join(", ")
    )
}

/// Map a non-success gateway HTTP status to an error
pub fn classify_gateway_status(status: u16, body: &str) -> RecommendationError {
    match status {
        429 => RecommendationError::RateLimited,
        402 => RecommendationError::PaymentRequired,
        _ if body.trim().is_empty() => RecommendationError::Upstream(format!("status {}", status)),
        _ => RecommendationError::Upstream(format!("status {}: {}", status, body.trim())),
    }
}

/// Build the request for a child, rejecting an empty issue list
pub fn recommendation_request(
    child: &Child,
    ctx: &EvaluationContext,
) -> Result<RecommendationRequest, RecommendationError> {
    let health_issues: Vec<String> = child
        .birth_health_issues
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty() && *i != "None")
        .map(str::to_string)
        .collect();
    if health_issues.is_empty() {
        return Err(RecommendationError::InvalidRequest(
            "Health issues are required".to_string(),
        ));
    }
    Ok(RecommendationRequest {
        health_issues,
        child_name: child.name.clone(),
        age: describe_age(child.date_of_birth, ctx),
    })
}

/// Ask the service for recommendations about a child's birth health issues
pub async fn request_recommendations(
    service: &dyn RecommendationService,
    child: &Child,
    ctx: &EvaluationContext,
) -> EngineResult<String> {
    let request = recommendation_request(child, ctx)?;
    debug!(
        "requesting recommendations for child {} ({} issues)",
        child.id,
        request.health_issues.len()
    );
    Ok(service.request_health_recommendations(&request).await?)
}
