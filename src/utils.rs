// src/utils.rs
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

use crate::types::profile::ProfileRecord;

/// Read file content as string with proper error context
pub async fn read_file_content(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Parse a profile record (a JSON object) from text
pub fn parse_profile_record(content: &str) -> Result<ProfileRecord> {
    let value: Value = serde_json::from_str(content).context("Failed to parse profile JSON")?;
    ProfileRecord::from_value(value)
        .ok_or_else(|| anyhow::anyhow!("Profile JSON must be an object"))
}

/// Read a profile record from a JSON file
pub async fn read_profile_record(path: &Path) -> Result<ProfileRecord> {
    let content = read_file_content(path).await?;
    parse_profile_record(&content)
        .with_context(|| format!("Invalid profile file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile_record() {
        let record = parse_profile_record(r#"{"name": "Jo", "skills": "a, b"}"#).unwrap();
        assert_eq!(record.len(), 2);
        assert!(parse_profile_record("[1, 2]").is_err());
        assert!(parse_profile_record("{not json").is_err());
    }

    #[tokio::test]
    async fn test_read_missing_file_reports_path() {
        let err = read_profile_record(Path::new("/nonexistent/profile.json"))
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/profile.json"));
    }
}
