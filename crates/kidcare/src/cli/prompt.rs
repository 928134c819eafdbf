//! Recommendation prompt command

use super::Session;
use anyhow::{Context, Result};
use colored::Colorize;
use kidcare_engine::{SYSTEM_PROMPT, recommendation_request, user_prompt};
use kidcare_model::{ChildId, ChildStore};
use serde_json::json;

/// Configuration for the prompt command
pub struct PromptConfig {
    pub child: ChildId,
}

/// Print the prompts that would be sent to the recommendation service
pub async fn prompt(session: &Session, config: PromptConfig) -> Result<()> {
    let store = session.load_store()?;
    let child = store
        .fetch_child(config.child)
        .await
        .with_context(|| format!("Failed to load child {}", config.child))?;

    let request = recommendation_request(&child, &session.ctx)
        .map_err(kidcare_engine::EngineError::from)
        .with_context(|| format!("Cannot request recommendations for {}", child.name))?;
    let user = user_prompt(&request);

    let value = json!({
        "messages": [
            { "role": "system", "content": SYSTEM_PROMPT },
            { "role": "user", "content": user },
        ]
    });
    session.print(&value, || {
        format!(
            "{}\n{}\n\n{}\n{}",
            "System:".bold(),
            SYSTEM_PROMPT,
            "User:".bold(),
            user
        )
    })
}
