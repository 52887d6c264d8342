// src/profile/session.rs
//! Drives a `ProfileEditor` against the backend.

use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

use crate::core::api_client::ApiError;
use crate::profile::editor::{Completion, EditorState, ProfileEditor, SubmitStart, Ticket};
use crate::profile::errors::{EditorError, ValidationErrors};
use crate::types::auth::AuthUser;
use crate::types::profile::ProfileRecord;

/// Backend operations the profile editor depends on
#[async_trait]
pub trait ProfileGateway: Send + Sync {
    async fn fetch_profile(&self, user_id: &str, token: &str) -> Result<ProfileRecord, ApiError>;

    async fn update_profile(
        &self,
        user_id: &str,
        token: &str,
        body: &ProfileRecord,
    ) -> Result<(), ApiError>;
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Saved,
    Invalid(ValidationErrors),
    Failed(ApiError),
}

pub struct ProfileSession<G: ProfileGateway> {
    gateway: G,
    user: AuthUser,
    editor: ProfileEditor,
    timeout: Duration,
}

impl<G: ProfileGateway> ProfileSession<G> {
    pub fn new(gateway: G, user: AuthUser, timeout: Duration) -> Self {
        let editor = ProfileEditor::new(&user);
        Self {
            gateway,
            user,
            editor,
            timeout,
        }
    }

    pub fn editor(&self) -> &ProfileEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut ProfileEditor {
        &mut self.editor
    }

    pub fn user(&self) -> &AuthUser {
        &self.user
    }

    /// Fetch the profile and seed the form (mount or reopen)
    pub async fn load(&mut self) -> Result<EditorState, EditorError> {
        let ticket = self.editor.begin_load()?;
        let in_flight = InFlight::new(&mut self.editor, ticket);

        let result = with_timeout(
            self.timeout,
            self.gateway.fetch_profile(&self.user.id, self.user.token()),
        )
        .await;

        in_flight.complete(|editor, ticket| editor.finish_load(ticket, result));
        Ok(self.editor.state())
    }

    /// Validate, encode and send the form
    pub async fn submit(&mut self) -> Result<SubmitOutcome, EditorError> {
        let (ticket, payload) = match self.editor.begin_submit()? {
            SubmitStart::Invalid(errors) => return Ok(SubmitOutcome::Invalid(errors)),
            SubmitStart::Ready { ticket, payload } => (ticket, payload),
        };

        let in_flight = InFlight::new(&mut self.editor, ticket);

        let result = with_timeout(
            self.timeout,
            self.gateway
                .update_profile(&self.user.id, self.user.token(), &payload),
        )
        .await;

        let outcome = match &result {
            Ok(()) => Ok(()),
            Err(e) => Err(e.to_string()),
        };
        let completion =
            in_flight.complete(|editor, ticket| editor.finish_submit(ticket, outcome));
        if completion == Completion::Discarded {
            return Err(EditorError::Disposed);
        }

        match result {
            Ok(()) => {
                info!("Profile session for {} submitted", self.user.email);
                Ok(SubmitOutcome::Saved)
            }
            Err(e) => Ok(SubmitOutcome::Failed(e)),
        }
    }

    pub fn dispose(&mut self) {
        self.editor.dispose();
    }
}

/// Outstanding request on the editor. Dropping it before `complete`, as
/// happens when the caller cancels the future, abandons the ticket.
struct InFlight<'a> {
    editor: &'a mut ProfileEditor,
    ticket: Option<Ticket>,
}

impl<'a> InFlight<'a> {
    fn new(editor: &'a mut ProfileEditor, ticket: Ticket) -> Self {
        Self {
            editor,
            ticket: Some(ticket),
        }
    }

    fn complete<F>(mut self, finish: F) -> Completion
    where
        F: FnOnce(&mut ProfileEditor, Ticket) -> Completion,
    {
        match self.ticket.take() {
            Some(ticket) => finish(&mut *self.editor, ticket),
            None => Completion::Discarded,
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            self.editor.abandon(ticket);
        }
    }
}

async fn with_timeout<T, F>(timeout: Duration, request: F) -> Result<T, ApiError>
where
    F: std::future::Future<Output = Result<T, ApiError>>,
{
    tokio::time::timeout(timeout, request)
        .await
        .map_err(|_| ApiError::Timeout(timeout))?
}
