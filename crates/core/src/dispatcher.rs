//! Request Dispatcher
//!
//! Runs one user action end to end: collect, validate, show loading, call the
//! backend once, render, and release the loading layout on every exit path.
//! Failures never leave this module; they are turned into the error layout.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    action::Action,
    client::AssistantClient,
    error::AssistantError,
    input::{self, FormInputs},
    models::ActionResponse,
    output::{OutputArea, SharedOutput},
    render,
};

/// How a single dispatch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The response was rendered into the output area.
    Rendered { generation: u64 },
    /// The request failed and the error layout was shown.
    Failed {
        generation: u64,
        error: AssistantError,
    },
    /// The request was never sent.
    Invalid(AssistantError),
    /// A newer dispatch was issued while this one was in flight; its result
    /// was dropped.
    Superseded { generation: u64 },
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DispatchOutcome::Rendered { .. })
    }

    pub fn error(&self) -> Option<&AssistantError> {
        match self {
            DispatchOutcome::Failed { error, .. } | DispatchOutcome::Invalid(error) => Some(error),
            _ => None,
        }
    }
}

pub struct Dispatcher<C: ?Sized> {
    client: Arc<C>,
    output: SharedOutput,
}

impl<C: ?Sized> Clone for Dispatcher<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            output: self.output.clone(),
        }
    }
}

impl<C: AssistantClient + ?Sized> Dispatcher<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self::with_output(client, OutputArea::shared())
    }

    pub fn with_output(client: Arc<C>, output: SharedOutput) -> Self {
        Self { client, output }
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    pub fn output(&self) -> &SharedOutput {
        &self.output
    }

    /// Dispatches an action given by name, showing an error for unknown names.
    pub async fn dispatch_named(&self, name: &str, inputs: &FormInputs) -> DispatchOutcome {
        match name.parse::<Action>() {
            Ok(action) => self.dispatch(action, inputs).await,
            Err(err) => {
                warn!(action = %name, "Rejected unknown action");
                self.output.lock().show_immediate_error(&err.to_string());
                DispatchOutcome::Invalid(err)
            }
        }
    }

    #[instrument(name = "dispatch", skip(self, inputs), fields(generation))]
    pub async fn dispatch(&self, action: Action, inputs: &FormInputs) -> DispatchOutcome {
        let visible_text = match action {
            Action::Summary => Some(self.output.lock().visible_text()),
            _ => None,
        };

        let payload = match input::collect(action, inputs, visible_text.as_deref()) {
            Ok(payload) => payload,
            Err(err) => {
                info!(error = %err, "Validation failed; request not sent");
                self.output.lock().show_immediate_error(&err.to_string());
                return DispatchOutcome::Invalid(err);
            }
        };

        let generation = self.output.lock().begin_loading(action);
        tracing::Span::current().record("generation", generation);
        info!(language = %payload.language, "Dispatching request");

        // Released on every exit path, including a dropped future.
        let output = self.output.clone();
        let _loading = scopeguard::guard(generation, move |generation| {
            if output.lock().release_loading(generation) {
                debug!(generation, "Loading released without a result");
            }
        });

        let result = match self.client.send(action, payload).await {
            Ok(body) => ActionResponse::decode(action, body).and_then(|r| render::render(&r)),
            Err(err) => Err(err),
        };

        let mut area = self.output.lock();
        let outcome = match result {
            Ok(rendered) => {
                if area.apply(generation, action, Ok(rendered)) {
                    info!(layout = render::layout_name(action), "Response rendered");
                    DispatchOutcome::Rendered { generation }
                } else {
                    DispatchOutcome::Superseded { generation }
                }
            }
            Err(error) => {
                warn!(kind = ?error.kind(), error = %error, "Request failed");
                if area.apply(generation, action, Err(error.to_string())) {
                    DispatchOutcome::Failed { generation, error }
                } else {
                    DispatchOutcome::Superseded { generation }
                }
            }
        };
        if matches!(outcome, DispatchOutcome::Superseded { .. }) {
            warn!(
                latest = area.latest_generation(),
                "Discarding stale result from superseded request"
            );
        }
        drop(area);
        outcome
    }
}
