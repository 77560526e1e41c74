use std::{io::Write, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use tokio::io::BufReader;
use tracing::{error, info};
use tutor_core::{
    Action, AssistantClient, DispatchOutcome, Dispatcher, FormInputs, HttpAssistantClient,
};

use crate::{
    cli::{Cli, Commands},
    config::Config,
    session,
};

/// Runs the parsed command line against the configured backend.
pub async fn run(cli: Cli, config: Config) -> Result<ExitCode> {
    let base_url = cli.base_url(&config).to_string();
    let client = Arc::new(
        HttpAssistantClient::new(&base_url).context("Failed to create backend client")?,
    );
    info!(%base_url, "Backend client ready");

    let dispatcher = Dispatcher::new(client);
    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Commands::Health => {
            let status = dispatcher
                .client()
                .health()
                .await
                .context("Health check failed")?;
            writeln!(stdout, "{} ({})", status.status, status.service)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Session => {
            let form = cli.command.form_inputs(&config);
            let input = BufReader::new(tokio::io::stdin());
            session::run(&dispatcher, form, input, &mut stdout).await?;
            Ok(ExitCode::SUCCESS)
        }
        command => {
            let action = command
                .action()
                .context("Command does not map to a backend action")?;
            let inputs = command.form_inputs(&config);
            let outcome =
                run_once(&dispatcher, action, &inputs, command.seed_text(), &mut stdout).await?;
            Ok(if outcome.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

/// Dispatches one action and prints whatever the output area ends up showing.
pub async fn run_once<C, W>(
    dispatcher: &Dispatcher<C>,
    action: Action,
    inputs: &FormInputs,
    seed_text: Option<&str>,
    out: &mut W,
) -> Result<DispatchOutcome>
where
    C: AssistantClient + ?Sized,
    W: Write,
{
    if let Some(text) = seed_text {
        dispatcher.output().lock().show_text(text);
    }

    let outcome = dispatcher.dispatch(action, inputs).await;
    if let Some(err) = outcome.error() {
        error!(kind = ?err.kind(), "{}", err);
    }

    let html = dispatcher.output().lock().html();
    writeln!(out, "{html}")?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use tutor_core::{
        AssistantError,
        models::{HealthStatus, RequestPayload},
    };

    struct QuizOnly;

    #[async_trait]
    impl AssistantClient for QuizOnly {
        async fn send(&self, action: Action, payload: RequestPayload) -> Result<Value, AssistantError> {
            match action {
                Action::Quiz => Ok(json!({"quiz": [
                    {"question": format!("About {}?", payload.topic.unwrap_or_default()),
                     "options": ["a", "b", "c", "d"], "correct_answer": "a"}
                ]})),
                _ => Err(AssistantError::Remote {
                    status: 400,
                    message: "Missing required fields: topic".to_string(),
                }),
            }
        }

        async fn health(&self) -> Result<HealthStatus, AssistantError> {
            Err(AssistantError::Transport("offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_run_once_prints_rendered_quiz() {
        let dispatcher = Dispatcher::new(Arc::new(QuizOnly));
        let mut out = Vec::new();

        let outcome = run_once(
            &dispatcher,
            Action::Quiz,
            &FormInputs::new("Rivers", "English", "Grade 5"),
            None,
            &mut out,
        )
        .await
        .unwrap();

        assert!(outcome.is_success());
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Q1: About Rivers?"));
    }

    #[tokio::test]
    async fn test_run_once_prints_error_layout() {
        let dispatcher = Dispatcher::new(Arc::new(QuizOnly));
        let mut out = Vec::new();

        let outcome = run_once(
            &dispatcher,
            Action::Summary,
            &FormInputs::new("", "English", "Grade 5"),
            Some("Rivers carry water to the sea."),
            &mut out,
        )
        .await
        .unwrap();

        assert!(!outcome.is_success());
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains(r#"<div class="error">"#));
        assert!(printed.contains("Missing required fields: topic"));
    }
}
