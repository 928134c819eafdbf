//! Doctor directory entries

use crate::ids::{DoctorId, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub user_id: UserId,
    pub name: String,
    pub specialization: String,
    pub qualification: String,
    pub experience_years: u32,
    pub location: String,
    #[serde(default)]
    pub consultation_fee: Option<u32>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}
