// src/types/snapshot.rs
//! Job listing snapshots returned by `GET /snapshots/{user_id}`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub snapshot_id: String,
    pub platform: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub data: Vec<JobListing>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    // Platform-specific fields (salary, posted date, ...) vary per source
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobListing {
    pub fn matches_query(&self, query_lower: &str) -> bool {
        self.job_title.to_lowercase().contains(query_lower)
            || self.company_name.to_lowercase().contains(query_lower)
    }
}
