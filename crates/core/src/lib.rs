//! Request/render controller for the multilingual learning assistant.
//!
//! The crate collects form inputs, posts them to one of the backend's three
//! routes, and turns the JSON reply into one of a few fixed HTML layouts held
//! in a shared output area.

pub mod action;
pub mod client;
pub mod dispatcher;
pub mod error;
pub mod input;
pub mod models;
pub mod output;
pub mod render;

pub use action::Action;
pub use client::{AssistantClient, DEFAULT_BASE_URL, HttpAssistantClient};
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use error::{AssistantError, ErrorKind};
pub use input::FormInputs;
pub use output::{OutputArea, SharedOutput, UiState};
