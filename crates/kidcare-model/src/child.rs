//! Child profiles

use crate::ids::{ChildId, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Birth health issue labels offered as suggestions; any other label is accepted
pub const SUGGESTED_HEALTH_ISSUES: &[&str] = &[
    "Low birth weight",
    "Premature birth",
    "Jaundice",
    "Respiratory issues",
    "Heart conditions",
    "Infections at birth",
    "Other complications",
    "None",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" | "o" => Ok(Gender::Other),
            other => Err(format!("Unknown gender '{}'. Expected Male, Female or Other", other)),
        }
    }
}

/// A child owned by a parent account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    pub id: ChildId,
    pub parent_id: UserId,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    #[serde(default)]
    pub place_of_birth: Option<String>,
    #[serde(default)]
    pub birth_health_issues: Vec<String>,
}

impl Child {
    /// Whether any birth health issue other than "None" was recorded
    pub fn has_health_issues(&self) -> bool {
        self.birth_health_issues
            .iter()
            .any(|issue| !issue.eq_ignore_ascii_case("none"))
    }
}
