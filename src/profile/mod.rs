// src/profile/mod.rs
//! Profile form pipeline: wire record -> form seed -> validated profile -> wire record

pub mod editor;
pub mod errors;
pub mod session;
pub mod transcoder;
pub mod validation;

pub use editor::{Completion, EditorState, Notice, NoticeLevel, ProfileEditor, SubmitStart, Ticket};
pub use errors::{EditorError, FieldError, ValidationErrors};
pub use session::{ProfileGateway, ProfileSession, SubmitOutcome};
pub use transcoder::{decode_for_display, encode_for_submission};
pub use validation::validate;
