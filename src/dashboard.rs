// src/dashboard.rs
//! Job listings dashboard: snapshot filtering and the flattened card list

use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

use crate::core::api_client::ApiClient;
use crate::types::auth::AuthUser;
use crate::types::snapshot::{JobListing, JobSnapshot};

pub const PLATFORMS: [&str; 3] = ["Glassdoor", "LinkedIn", "Indeed"];
pub const JOBS_LOAD_FAILURE_MESSAGE: &str = "Failed to load jobs. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlatformFilter {
    #[default]
    All,
    Only(String),
}

impl PlatformFilter {
    pub fn matches(&self, platform: &str) -> bool {
        match self {
            PlatformFilter::All => true,
            PlatformFilter::Only(selected) => selected == platform,
        }
    }
}

impl FromStr for PlatformFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(PlatformFilter::All);
        }
        PLATFORMS
            .iter()
            .find(|platform| platform.eq_ignore_ascii_case(trimmed))
            .map(|platform| PlatformFilter::Only(platform.to_string()))
            .ok_or_else(|| {
                format!(
                    "Unknown platform: {}. Use All, {}",
                    trimmed,
                    PLATFORMS.join(", ")
                )
            })
    }
}

impl fmt::Display for PlatformFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformFilter::All => f.write_str("All"),
            PlatformFilter::Only(platform) => f.write_str(platform),
        }
    }
}

/// Keep snapshots on the selected platform that have at least one listing
/// whose title or company contains `query` (case-insensitive).
pub fn filter_snapshots<'a>(
    snapshots: &'a [JobSnapshot],
    query: &str,
    platform: &PlatformFilter,
) -> Vec<&'a JobSnapshot> {
    let query = query.to_lowercase();
    snapshots
        .iter()
        .filter(|snapshot| platform.matches(&snapshot.platform))
        .filter(|snapshot| {
            query.is_empty() || snapshot.data.iter().any(|listing| listing.matches_query(&query))
        })
        .collect()
}

/// One entry per job card, tagged with the platform it came from
pub fn flatten_listings<'a>(snapshots: &[&'a JobSnapshot]) -> Vec<(&'a str, &'a JobListing)> {
    snapshots
        .iter()
        .copied()
        .flat_map(|snapshot| {
            snapshot
                .data
                .iter()
                .map(move |listing| (snapshot.platform.as_str(), listing))
        })
        .collect()
}

/// Fetch the user's snapshots; failures collapse into one user-facing message
pub async fn load_jobs(client: &ApiClient, user: &AuthUser) -> Result<Vec<JobSnapshot>, String> {
    match client.fetch_snapshots(&user.id, Some(user.token())).await {
        Ok(snapshots) => {
            info!("Loaded {} job snapshots for {}", snapshots.len(), user.email);
            Ok(snapshots)
        }
        Err(e) => {
            warn!("Failed to fetch job snapshots: {}", e);
            Err(JOBS_LOAD_FAILURE_MESSAGE.to_string())
        }
    }
}
