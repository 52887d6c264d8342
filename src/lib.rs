//! Job-search profile pipeline: validation, wire transcoding, and the
//! profile editor state machine, plus the job listings dashboard.

pub mod cli;
pub mod config;
pub mod core;
pub mod dashboard;
pub mod profile;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use crate::config::AppConfig;
pub use crate::core::{ApiClient, ApiError};
pub use profile::{
    decode_for_display, encode_for_submission, validate, EditorState, ProfileEditor,
    ProfileSession, ValidationErrors,
};
pub use types::{AuthUser, DomainProfile, EmploymentType, ProfileField, ProfileRecord};
