// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::core::ApiClient;
use crate::dashboard::{filter_snapshots, flatten_listings, load_jobs, PlatformFilter};
use crate::profile::{
    decode_for_display, encode_for_submission, validate, ProfileSession, SubmitOutcome,
    ValidationErrors,
};
use crate::types::auth::AuthUser;
use crate::types::profile::{ProfileField, ProfileRecord};
use crate::utils::read_profile_record;

#[derive(Parser)]
#[command(name = "jobsearch")]
#[command(about = "Validate, fetch and submit job-search profiles")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Backend base URL (overrides config.yaml and JOBSEARCH_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decode a wire profile file and validate it
    Validate {
        file: PathBuf,
        /// Email used when the file has none
        #[arg(long, default_value = "")]
        email: String,
    },
    /// Print the wire form of a profile file
    Encode { file: PathBuf },
    /// Fetch and print the signed-in user's profile
    Profile {
        #[arg(long)]
        session: PathBuf,
    },
    /// Load the profile, apply the values from a file, and submit it
    Submit {
        #[arg(long)]
        session: PathBuf,
        file: PathBuf,
    },
    /// List job postings from the user's snapshots
    Jobs {
        #[arg(long)]
        session: PathBuf,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "All")]
        platform: PlatformFilter,
    },
}

pub async fn handle_command(cli: Cli, mut config: AppConfig) -> Result<()> {
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }

    match cli.command {
        Command::Validate { file, email } => {
            let wire = read_profile_record(&file).await?;
            let seed = decode_for_display(&wire, &email);

            match validate(&seed) {
                Ok(profile) => {
                    println!("✓ Profile is valid");
                    println!("{}", serde_json::to_string_pretty(&profile)?);
                }
                Err(errors) => {
                    print_field_errors(&errors);
                    anyhow::bail!("Profile has {} invalid field(s)", errors.len());
                }
            }
        }

        Command::Encode { file } => {
            let domain = read_profile_record(&file).await?;
            let wire = encode_for_submission(&domain);
            println!("{}", serde_json::to_string_pretty(&wire)?);
        }

        Command::Profile { session } => {
            let user = AuthUser::load_from_file(&session).await?;
            let client = ApiClient::new(&config.api_url, config.timeout_seconds)?;

            let wire = client
                .fetch_profile(&user.id, user.token())
                .await
                .context("Failed to fetch profile")?;
            let seed = decode_for_display(&wire, &user.email);
            println!("{}", serde_json::to_string_pretty(&seed)?);
        }

        Command::Submit { session, file } => {
            let user = AuthUser::load_from_file(&session).await?;
            let form_values = read_profile_record(&file).await?;
            let client = ApiClient::new(&config.api_url, config.timeout_seconds)?;

            let mut session = ProfileSession::new(client, user, config.timeout());
            session.load().await?;
            if let Some(notice) = session.editor_mut().take_notice() {
                warn!("{}", notice.message);
            }

            apply_form_values(&mut session, &form_values)?;

            match session.submit().await? {
                SubmitOutcome::Saved => {
                    println!("✓ Profile updated successfully");
                }
                SubmitOutcome::Invalid(errors) => {
                    print_field_errors(&errors);
                    anyhow::bail!("Profile has {} invalid field(s)", errors.len());
                }
                SubmitOutcome::Failed(e) => {
                    return Err(e).context("Something went wrong. Please try again.");
                }
            }
        }

        Command::Jobs {
            session,
            search,
            platform,
        } => {
            let user = AuthUser::load_from_file(&session).await?;
            let client = ApiClient::new(&config.api_url, config.timeout_seconds)?;

            let snapshots = load_jobs(&client, &user)
                .await
                .map_err(|message| anyhow::anyhow!(message))?;
            let matching = filter_snapshots(&snapshots, &search, &platform);
            let cards = flatten_listings(&matching);

            if cards.is_empty() {
                println!("No jobs found matching your criteria.");
            } else {
                println!("{:<10} {:<40} {:<25}", "Platform", "Title", "Company");
                println!("{}", "-".repeat(77));
                for (platform, listing) in &cards {
                    println!(
                        "{:<10} {:<40} {:<25}",
                        platform, listing.job_title, listing.company_name
                    );
                }
                info!("Listed {} jobs (platform: {})", cards.len(), platform);
            }
        }
    }

    Ok(())
}

fn apply_form_values(
    session: &mut ProfileSession<ApiClient>,
    form_values: &ProfileRecord,
) -> Result<()> {
    let editor = session.editor_mut();
    for (key, value) in form_values.iter() {
        let field = match key.parse::<ProfileField>() {
            Ok(field) if field.is_read_only() => {
                warn!("Ignoring read-only field: {}", key);
                continue;
            }
            Ok(field) => field,
            Err(_) => {
                warn!("Ignoring unknown field: {}", key);
                continue;
            }
        };
        editor.set_field(field, value.clone())?;
    }
    Ok(())
}

fn print_field_errors(errors: &ValidationErrors) {
    println!("✗ Profile validation failed:");
    for error in errors {
        println!("  {:<24} {}", error.field.as_str(), error.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_jobs_command() {
        let cli = Cli::try_parse_from([
            "jobsearch",
            "jobs",
            "--session",
            "auth.json",
            "--platform",
            "linkedin",
            "--search",
            "rust",
        ])
        .unwrap();

        match cli.command {
            Command::Jobs {
                platform, search, ..
            } => {
                assert_eq!(platform, PlatformFilter::Only("LinkedIn".to_string()));
                assert_eq!(search, "rust");
            }
            _ => panic!("expected jobs command"),
        }
    }

    #[test]
    fn test_rejects_unknown_platform() {
        assert!(Cli::try_parse_from([
            "jobsearch",
            "jobs",
            "--session",
            "auth.json",
            "--platform",
            "Monster"
        ])
        .is_err());
    }

    #[test]
    fn test_global_api_url() {
        let cli = Cli::try_parse_from([
            "jobsearch",
            "validate",
            "wire.json",
            "--api-url",
            "http://backend:8000",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://backend:8000"));
    }
}
