// src/types/mod.rs
pub mod auth;
pub mod profile;
pub mod snapshot;

pub use auth::AuthUser;
pub use profile::{DomainProfile, EmploymentType, FieldKind, ProfileField, ProfileRecord, WireProfile};
pub use snapshot::{JobListing, JobSnapshot};
