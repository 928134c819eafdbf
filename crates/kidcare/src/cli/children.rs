//! Child registration and listing commands

use super::Session;
use super::output::{cell, format_success, format_table, format_warning};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use kidcare_engine::{NewChild, describe_age_short, register_child};
use kidcare_model::{ChildStore, Gender, SUGGESTED_HEALTH_ISSUES, UserId};
use serde_json::json;
use tabled::Tabled;

/// Configuration for the register command
pub struct RegisterConfig {
    pub parent: UserId,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub place_of_birth: Option<String>,
    pub health_issues: Vec<String>,
}

/// Configuration for the children command
pub struct ChildrenConfig {
    pub parent: UserId,
}

#[derive(Tabled)]
struct ChildRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Age")]
    age: String,
    #[tabled(rename = "Gender")]
    gender: String,
    #[tabled(rename = "Born in")]
    place: String,
    #[tabled(rename = "Health issues")]
    issues: String,
    #[tabled(rename = "Id")]
    id: String,
}

/// Issue labels that are not on the suggested list
pub fn unlisted_issues(issues: &[String]) -> Vec<&str> {
    issues
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .filter(|i| !SUGGESTED_HEALTH_ISSUES.iter().any(|s| s.eq_ignore_ascii_case(i)))
        .collect()
}

/// Register a child and create its vaccination records
pub async fn register(session: &Session, config: RegisterConfig) -> Result<()> {
    let store = session.load_store()?;

    for issue in unlisted_issues(&config.health_issues) {
        eprintln!(
            "{}",
            format_warning(&format!(
                "'{}' is not a suggested health issue (suggested: {})",
                issue,
                SUGGESTED_HEALTH_ISSUES.join(", ")
            ))
        );
    }

    let new = NewChild {
        parent: config.parent,
        name: config.name,
        date_of_birth: config.date_of_birth,
        gender: config.gender,
        place_of_birth: config.place_of_birth,
        birth_health_issues: config.health_issues,
    };
    let child = register_child(&store, &session.ctx, new)
        .await
        .context("Failed to register child")?;
    session.save_store(&store)?;

    let records = store.snapshot().vaccination_records.iter().filter(|r| r.child_id == child.id).count();
    let value = json!({
        "child": child,
        "vaccination_records": records,
    });
    session.print(&value, || {
        format_success(&format!(
            "Registered {} ({}) with {} vaccination records",
            child.name, child.id, records
        ))
    })
}

/// List the children of a parent account
pub async fn children(session: &Session, config: ChildrenConfig) -> Result<()> {
    let store = session.load_store()?;
    let children = store
        .list_children(config.parent)
        .await
        .with_context(|| format!("Failed to list children of {}", config.parent))?;

    session.print(&children, || {
        format_table(
            children
                .iter()
                .map(|c| ChildRow {
                    name: c.name.clone(),
                    age: describe_age_short(c.date_of_birth, &session.ctx),
                    gender: c.gender.to_string(),
                    place: cell(c.place_of_birth.as_deref()),
                    issues: if c.birth_health_issues.is_empty() {
                        "-".to_string()
                    } else {
                        c.birth_health_issues.join(", ")
                    },
                    id: c.id.to_string(),
                })
                .collect(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlisted_issues() {
        let issues = vec![
            "jaundice".to_string(),
            " Low birth weight ".to_string(),
            "Colic".to_string(),
            "".to_string(),
        ];
        assert_eq!(unlisted_issues(&issues), vec!["Colic"]);
    }
}
