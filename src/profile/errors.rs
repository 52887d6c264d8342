// src/profile/errors.rs
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::types::profile::ProfileField;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: ProfileField,
    pub message: String,
}

/// Every field that failed validation, one entry per field, in
/// declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("Profile validation failed{}", render_field_errors(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first message reported for a field
    pub fn add(&mut self, field: ProfileField, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.errors.push(FieldError {
                field,
                message: message.into(),
            });
        }
    }

    pub fn get(&self, field: ProfileField) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    pub fn contains(&self, field: ProfileField) -> bool {
        self.get(field).is_some()
    }

    pub fn remove(&mut self, field: ProfileField) {
        self.errors.retain(|error| error.field != field);
    }

    pub fn fields(&self) -> Vec<ProfileField> {
        self.errors.iter().map(|error| error.field).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Field name -> message, the shape a form renders next to its inputs
    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        self.errors
            .iter()
            .map(|error| (error.field.as_str(), error.message.clone()))
            .collect()
    }
}

fn render_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| format!("; {}: {}", error.field, error.message))
        .collect()
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Misuse of the editor session by the control layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("Profile form is not editable while {0}")]
    NotEditing(&'static str),

    #[error("A profile submission is already in progress")]
    SubmitInFlight,

    #[error("Field {0} is read-only")]
    ReadOnlyField(ProfileField),

    #[error("Profile editor has been disposed")]
    Disposed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message_per_field_wins() {
        let mut errors = ValidationErrors::new();
        errors.add(ProfileField::Email, "Email is required");
        errors.add(ProfileField::Email, "Invalid email address");
        errors.add(ProfileField::Name, "Name must be at least 2 characters");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(ProfileField::Email), Some("Email is required"));
        assert_eq!(errors.fields(), vec![ProfileField::Email, ProfileField::Name]);
    }

    #[test]
    fn test_display_lists_every_field() {
        let mut errors = ValidationErrors::new();
        errors.add(ProfileField::Phone, "Phone number must be at least 10 digits");
        errors.add(ProfileField::Linkedin, "Invalid LinkedIn URL");

        assert_eq!(
            errors.to_string(),
            "Profile validation failed; phone: Phone number must be at least 10 digits; \
             linkedin: Invalid LinkedIn URL"
        );
        assert_eq!(ValidationErrors::new().to_string(), "Profile validation failed");
    }

    #[test]
    fn test_usable_as_error_source() {
        let mut errors = ValidationErrors::new();
        errors.add(ProfileField::Name, "Required");

        let err = anyhow::Error::new(errors).context("Cannot submit profile");
        assert_eq!(
            format!("{:#}", err),
            "Cannot submit profile: Profile validation failed; name: Required"
        );
    }

    #[test]
    fn test_serializes_as_list_keyed_by_field_name() {
        let mut errors = ValidationErrors::new();
        errors.add(ProfileField::ResumeLink, "Invalid resume URL");

        let value = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{ "field": "resume_link", "message": "Invalid resume URL" }])
        );
        assert_eq!(errors.to_map()["resume_link"], "Invalid resume URL");
    }
}
