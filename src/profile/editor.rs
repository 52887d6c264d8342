// src/profile/editor.rs
//! Profile editor session: owns the form state for one editing session and
//! walks it through Loading -> Editing -> Submitting -> Submitted.
//!
//! The editor never performs I/O. Callers start an operation with
//! `begin_load` / `begin_submit`, run the request, and hand the outcome back
//! with the ticket they were given. Outcomes carrying a stale ticket, or
//! arriving after `dispose`, are discarded.

use serde_json::Value;
use std::fmt::Display;
use tracing::{debug, info, warn};

use crate::profile::errors::{EditorError, ValidationErrors};
use crate::profile::transcoder::{decode_for_display, encode_for_submission};
use crate::profile::validation::validate;
use crate::types::auth::AuthUser;
use crate::types::profile::{ProfileField, ProfileRecord};

pub const SUBMIT_SUCCESS_MESSAGE: &str = "Profile updated successfully";
pub const SUBMIT_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load profile";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Loading,
    Editing,
    Submitting,
    Submitted,
}

impl EditorState {
    pub fn label(&self) -> &'static str {
        match self {
            EditorState::Loading => "loading",
            EditorState::Editing => "editing",
            EditorState::Submitting => "submitting",
            EditorState::Submitted => "submitted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Purpose {
    Load,
    Submit,
}

/// Handle for one outstanding load or submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    id: u64,
    purpose: Purpose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Non-blocking, form-wide message (toast)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn success(message: &str) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.to_string(),
        }
    }

    fn error(message: &str) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStart {
    /// Validation passed; send `payload` and report back with `ticket`
    Ready {
        ticket: Ticket,
        payload: ProfileRecord,
    },
    /// Validation failed; the editor is back in Editing with these errors
    Invalid(ValidationErrors),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Discarded,
}

#[derive(Debug)]
pub struct ProfileEditor {
    user_id: String,
    user_email: String,
    state: EditorState,
    form: ProfileRecord,
    field_errors: ValidationErrors,
    valid: Option<bool>,
    notice: Option<Notice>,
    next_ticket: u64,
    pending: Option<Ticket>,
    disposed: bool,
}

impl ProfileEditor {
    pub fn new(user: &AuthUser) -> Self {
        Self {
            user_id: user.id.clone(),
            user_email: user.email.clone(),
            state: EditorState::Loading,
            form: ProfileRecord::new(),
            field_errors: ValidationErrors::new(),
            valid: None,
            notice: None,
            next_ticket: 0,
            pending: None,
            disposed: false,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn form(&self) -> &ProfileRecord {
        &self.form
    }

    pub fn value(&self, field: ProfileField) -> Option<&Value> {
        self.form.field(field)
    }

    pub fn field_errors(&self) -> &ValidationErrors {
        &self.field_errors
    }

    pub fn field_error(&self, field: ProfileField) -> Option<&str> {
        self.field_errors.get(field)
    }

    /// `None` until the form has been validated since the last edit
    pub fn is_valid(&self) -> Option<bool> {
        self.valid
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// The submit control is disabled while loading, submitting, or after disposal
    pub fn can_submit(&self) -> bool {
        !self.disposed && self.state == EditorState::Editing
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // ===== Loading =====

    /// Start loading (on mount, or when the user reopens the editor)
    pub fn begin_load(&mut self) -> Result<Ticket, EditorError> {
        self.ensure_live()?;
        if self.state == EditorState::Submitting {
            return Err(EditorError::SubmitInFlight);
        }

        let ticket = self.issue(Purpose::Load);
        self.state = EditorState::Loading;
        debug!("Loading profile for user {}", self.user_id);
        Ok(ticket)
    }

    pub fn finish_load<E: Display>(
        &mut self,
        ticket: Ticket,
        result: Result<ProfileRecord, E>,
    ) -> Completion {
        if !self.accepts(ticket, Purpose::Load) {
            debug!("Discarding stale profile load for user {}", self.user_id);
            return Completion::Discarded;
        }
        self.pending = None;

        match result {
            Ok(wire) => {
                self.form = decode_for_display(&wire, &self.user_email);
                self.notice = None;
                info!("Profile loaded for user {}", self.user_id);
            }
            Err(e) => {
                warn!("Failed to load profile for user {}: {}", self.user_id, e);
                self.form = decode_for_display(&ProfileRecord::new(), &self.user_email);
                self.notice = Some(Notice::error(LOAD_FAILURE_MESSAGE));
            }
        }

        self.field_errors = ValidationErrors::new();
        self.valid = None;
        self.state = EditorState::Editing;
        Completion::Applied
    }

    // ===== Editing =====

    pub fn set_field(&mut self, field: ProfileField, value: Value) -> Result<(), EditorError> {
        self.ensure_editing()?;
        if field.is_read_only() {
            return Err(EditorError::ReadOnlyField(field));
        }

        self.form.set(field, value);
        self.field_errors.remove(field);
        self.valid = None;
        Ok(())
    }

    pub fn set_text(&mut self, field: ProfileField, text: &str) -> Result<(), EditorError> {
        self.set_field(field, Value::String(text.to_string()))
    }

    /// Re-run the validator without submitting (blur)
    pub fn check(&mut self) -> Result<bool, EditorError> {
        self.ensure_editing()?;
        let valid = match validate(&self.form) {
            Ok(_) => {
                self.field_errors = ValidationErrors::new();
                true
            }
            Err(errors) => {
                self.field_errors = errors;
                false
            }
        };
        self.valid = Some(valid);
        Ok(valid)
    }

    // ===== Submitting =====

    pub fn begin_submit(&mut self) -> Result<SubmitStart, EditorError> {
        self.ensure_live()?;
        match self.state {
            EditorState::Editing => {}
            EditorState::Submitting => {
                warn!("Ignoring duplicate submit for user {}", self.user_id);
                return Err(EditorError::SubmitInFlight);
            }
            other => return Err(EditorError::NotEditing(other.label())),
        }

        self.notice = None;
        match validate(&self.form) {
            Err(errors) => {
                debug!(
                    "Submit blocked by {} invalid field(s) for user {}",
                    errors.len(),
                    self.user_id
                );
                self.field_errors = errors.clone();
                self.valid = Some(false);
                Ok(SubmitStart::Invalid(errors))
            }
            Ok(profile) => {
                self.field_errors = ValidationErrors::new();
                self.valid = Some(true);

                let payload = encode_for_submission(&profile.to_record());
                let ticket = self.issue(Purpose::Submit);
                self.state = EditorState::Submitting;
                info!("Submitting profile for user {}", self.user_id);

                Ok(SubmitStart::Ready { ticket, payload })
            }
        }
    }

    pub fn finish_submit<E: Display>(&mut self, ticket: Ticket, result: Result<(), E>) -> Completion {
        if !self.accepts(ticket, Purpose::Submit) {
            debug!("Discarding stale profile submit for user {}", self.user_id);
            return Completion::Discarded;
        }
        self.pending = None;

        match result {
            Ok(()) => {
                self.state = EditorState::Submitted;
                self.notice = Some(Notice::success(SUBMIT_SUCCESS_MESSAGE));
                info!("Profile updated for user {}", self.user_id);
            }
            Err(e) => {
                // Form values are kept so the user can retry
                self.state = EditorState::Editing;
                self.notice = Some(Notice::error(SUBMIT_FAILURE_MESSAGE));
                warn!("Profile update failed for user {}: {}", self.user_id, e);
            }
        }
        Completion::Applied
    }

    /// The request behind `ticket` was cancelled before it produced an outcome.
    /// A pending submit counts as failed; a pending load can simply be restarted.
    pub fn abandon(&mut self, ticket: Ticket) -> Completion {
        if !self.accepts(ticket, ticket.purpose) {
            return Completion::Discarded;
        }
        self.pending = None;

        if ticket.purpose == Purpose::Submit {
            self.state = EditorState::Editing;
            self.notice = Some(Notice::error(SUBMIT_FAILURE_MESSAGE));
            warn!("Profile update for user {} was cancelled", self.user_id);
        } else {
            debug!("Profile load for user {} was cancelled", self.user_id);
        }
        Completion::Applied
    }

    /// The view went away: later outcomes must not touch this editor
    pub fn dispose(&mut self) {
        if !self.disposed {
            debug!(
                "Disposing profile editor for user {} in state {}",
                self.user_id,
                self.state.label()
            );
        }
        self.disposed = true;
        self.pending = None;
    }

    fn issue(&mut self, purpose: Purpose) -> Ticket {
        self.next_ticket += 1;
        let ticket = Ticket {
            id: self.next_ticket,
            purpose,
        };
        self.pending = Some(ticket);
        ticket
    }

    fn accepts(&self, ticket: Ticket, purpose: Purpose) -> bool {
        !self.disposed && ticket.purpose == purpose && self.pending == Some(ticket)
    }

    fn ensure_live(&self) -> Result<(), EditorError> {
        if self.disposed {
            Err(EditorError::Disposed)
        } else {
            Ok(())
        }
    }

    fn ensure_editing(&self) -> Result<(), EditorError> {
        self.ensure_live()?;
        if self.state != EditorState::Editing {
            return Err(EditorError::NotEditing(self.state.label()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_user, sample_wire};
    use serde_json::json;

    fn loaded_editor() -> ProfileEditor {
        let mut editor = ProfileEditor::new(&sample_user());
        let ticket = editor.begin_load().unwrap();
        assert_eq!(
            editor.finish_load(ticket, Ok::<_, String>(sample_wire())),
            Completion::Applied
        );
        editor
    }

    fn ready(start: SubmitStart) -> (Ticket, ProfileRecord) {
        match start {
            SubmitStart::Ready { ticket, payload } => (ticket, payload),
            SubmitStart::Invalid(errors) => panic!("unexpected validation errors: {}", errors),
        }
    }

    #[test]
    fn test_starts_loading_and_blocks_edits() {
        let mut editor = ProfileEditor::new(&sample_user());
        assert_eq!(editor.state(), EditorState::Loading);
        assert!(!editor.can_submit());
        assert_eq!(
            editor.set_text(ProfileField::Name, "Jo"),
            Err(EditorError::NotEditing("loading"))
        );
    }

    #[test]
    fn test_load_decodes_wire_profile() {
        let editor = loaded_editor();
        assert_eq!(editor.state(), EditorState::Editing);
        assert_eq!(
            editor.value(ProfileField::Skills),
            Some(&json!(["Rust", "TypeScript"]))
        );
        assert!(editor.can_submit());
    }

    #[test]
    fn test_failed_load_seeds_defaults_with_user_email() {
        let mut editor = ProfileEditor::new(&sample_user());
        let ticket = editor.begin_load().unwrap();
        editor.finish_load(ticket, Err::<ProfileRecord, _>("connection refused"));

        assert_eq!(editor.state(), EditorState::Editing);
        assert_eq!(editor.value(ProfileField::Email), Some(&json!("jane@example.com")));
        assert_eq!(editor.notice().unwrap().message, LOAD_FAILURE_MESSAGE);
    }

    #[test]
    fn test_email_is_read_only() {
        let mut editor = loaded_editor();
        assert_eq!(
            editor.set_text(ProfileField::Email, "other@example.com"),
            Err(EditorError::ReadOnlyField(ProfileField::Email))
        );
        assert_eq!(editor.value(ProfileField::Email), Some(&json!("jane@example.com")));
    }

    #[test]
    fn test_invalid_submit_returns_to_editing_with_errors() {
        let mut editor = loaded_editor();
        editor.set_text(ProfileField::Name, "A").unwrap();

        match editor.begin_submit().unwrap() {
            SubmitStart::Invalid(errors) => assert_eq!(errors.fields(), vec![ProfileField::Name]),
            other => panic!("expected validation failure, got {:?}", other),
        }
        assert_eq!(editor.state(), EditorState::Editing);
        assert_eq!(editor.is_valid(), Some(false));
        assert!(editor.field_error(ProfileField::Name).is_some());

        editor.set_text(ProfileField::Name, "Al").unwrap();
        assert!(editor.field_error(ProfileField::Name).is_none());
        assert_eq!(editor.is_valid(), None);
    }

    #[test]
    fn test_submit_payload_is_wire_encoded() {
        let mut editor = loaded_editor();
        editor
            .set_text(ProfileField::Skills, "Rust,  Tokio , Serde")
            .unwrap();

        let (_, payload) = ready(editor.begin_submit().unwrap());
        assert_eq!(payload.field(ProfileField::Skills), Some(&json!("Rust, Tokio, Serde")));
        assert_eq!(
            payload.field(ProfileField::PreferredJobTitles),
            Some(&json!("Tech Lead, Staff Engineer"))
        );
        assert_eq!(editor.state(), EditorState::Submitting);
    }

    #[test]
    fn test_second_submit_while_outstanding_is_rejected() {
        let mut editor = loaded_editor();
        let (ticket, _) = ready(editor.begin_submit().unwrap());

        assert!(!editor.can_submit());
        assert_eq!(editor.begin_submit(), Err(EditorError::SubmitInFlight));
        assert_eq!(editor.begin_load(), Err(EditorError::SubmitInFlight));

        assert_eq!(editor.finish_submit(ticket, Ok::<_, String>(())), Completion::Applied);
        assert_eq!(editor.state(), EditorState::Submitted);
        assert_eq!(editor.notice().unwrap().level, NoticeLevel::Success);
    }

    #[test]
    fn test_backend_failure_keeps_values_for_retry() {
        let mut editor = loaded_editor();
        editor.set_text(ProfileField::Location, "Lisbon").unwrap();
        let (ticket, _) = ready(editor.begin_submit().unwrap());

        editor.finish_submit(ticket, Err("HTTP 500"));
        assert_eq!(editor.state(), EditorState::Editing);
        assert_eq!(editor.value(ProfileField::Location), Some(&json!("Lisbon")));
        let notice = editor.take_notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, SUBMIT_FAILURE_MESSAGE);

        // retry is allowed and issues a fresh ticket
        let (retry, _) = ready(editor.begin_submit().unwrap());
        assert_ne!(retry, ticket);
        assert_eq!(editor.finish_submit(ticket, Ok::<_, String>(())), Completion::Discarded);
        assert_eq!(editor.finish_submit(retry, Ok::<_, String>(())), Completion::Applied);
    }

    #[test]
    fn test_results_after_dispose_are_discarded() {
        let mut editor = loaded_editor();
        let (ticket, _) = ready(editor.begin_submit().unwrap());
        editor.dispose();

        assert_eq!(editor.finish_submit(ticket, Ok::<_, String>(())), Completion::Discarded);
        assert_eq!(editor.state(), EditorState::Submitting);
        assert!(editor.notice().is_none());
        assert_eq!(editor.begin_load(), Err(EditorError::Disposed));
    }

    #[test]
    fn test_reopen_supersedes_pending_load() {
        let mut editor = ProfileEditor::new(&sample_user());
        let first = editor.begin_load().unwrap();
        let second = editor.begin_load().unwrap();

        assert_eq!(
            editor.finish_load(first, Ok::<_, String>(sample_wire())),
            Completion::Discarded
        );
        assert_eq!(editor.state(), EditorState::Loading);
        assert_eq!(
            editor.finish_load(second, Ok::<_, String>(sample_wire())),
            Completion::Applied
        );
    }

    #[test]
    fn test_abandoned_submit_can_be_retried() {
        let mut editor = loaded_editor();
        let (ticket, _) = ready(editor.begin_submit().unwrap());

        assert_eq!(editor.abandon(ticket), Completion::Applied);
        assert_eq!(editor.state(), EditorState::Editing);
        assert!(editor.can_submit());
        assert_eq!(editor.notice().unwrap().message, SUBMIT_FAILURE_MESSAGE);

        // a late outcome for the cancelled request is ignored
        assert_eq!(editor.finish_submit(ticket, Ok::<_, String>(())), Completion::Discarded);
        assert_eq!(editor.abandon(ticket), Completion::Discarded);
        assert!(editor.begin_submit().is_ok());
    }

    #[test]
    fn test_abandoned_load_can_be_restarted() {
        let mut editor = ProfileEditor::new(&sample_user());
        let ticket = editor.begin_load().unwrap();
        assert_eq!(editor.abandon(ticket), Completion::Applied);
        assert_eq!(editor.state(), EditorState::Loading);
        assert!(editor.notice().is_none());

        let retry = editor.begin_load().unwrap();
        assert_eq!(
            editor.finish_load(retry, Ok::<_, String>(sample_wire())),
            Completion::Applied
        );
    }

    #[test]
    fn test_load_ticket_cannot_finish_submit() {
        let mut editor = ProfileEditor::new(&sample_user());
        let ticket = editor.begin_load().unwrap();
        assert_eq!(editor.finish_submit(ticket, Ok::<_, String>(())), Completion::Discarded);
        assert_eq!(editor.state(), EditorState::Loading);
    }

    #[test]
    fn test_check_recomputes_validity() {
        let mut editor = loaded_editor();
        assert_eq!(editor.check(), Ok(true));

        editor.set_field(ProfileField::ExperienceYears, json!(-1)).unwrap();
        assert_eq!(editor.check(), Ok(false));
        assert_eq!(
            editor.field_error(ProfileField::ExperienceYears),
            Some("Years of experience must be positive")
        );
    }
}
