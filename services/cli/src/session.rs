//! Interactive session.
//!
//! Plays the part of the web page: the form fields and the output area live
//! for the whole session, so `summary` works on whatever the previous command
//! left on screen.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::info;
use tutor_core::{Action, AssistantClient, Dispatcher, FormInputs};

const HELP: &str = "\
Commands:
  topic <text>      set the topic
  language <name>   set the target language
  grade <level>     set the grade level
  text <text>       put text in the output area
  explain           explain the topic
  summary           summarize the output area
  quiz              generate a quiz about the topic
  run <action>      run an action by name
  show              print the output area
  help              show this help
  quit              leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Topic(String),
    Language(String),
    Grade(String),
    Text(String),
    Run(String),
    Show,
    Help,
    Quit,
    Empty,
}

impl SessionCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let command = match word.to_lowercase().as_str() {
            "" => SessionCommand::Empty,
            "topic" => SessionCommand::Topic(rest.to_string()),
            "language" | "lang" => SessionCommand::Language(rest.to_string()),
            "grade" => SessionCommand::Grade(rest.to_string()),
            "text" => SessionCommand::Text(rest.to_string()),
            "run" => SessionCommand::Run(rest.to_string()),
            "show" => SessionCommand::Show,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" => SessionCommand::Quit,
            action if action.parse::<Action>().is_ok() => SessionCommand::Run(action.to_string()),
            other => return Err(format!("Unknown command '{other}'. Type 'help' for a list.")),
        };
        Ok(command)
    }
}

/// Runs the session until `quit` or end of input.
pub async fn run<C, R, W>(
    dispatcher: &Dispatcher<C>,
    mut form: FormInputs,
    input: R,
    out: &mut W,
) -> Result<()>
where
    C: AssistantClient + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    info!(language = %form.language, grade = %form.grade, "Interactive session started");
    writeln!(out, "Type 'help' for commands.")?;
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let command = match SessionCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };

        match command {
            SessionCommand::Empty => {}
            SessionCommand::Topic(topic) => form.topic = topic,
            SessionCommand::Language(language) => form.language = language,
            SessionCommand::Grade(grade) => form.grade = grade,
            SessionCommand::Text(text) => {
                dispatcher.output().lock().show_text(&text);
            }
            SessionCommand::Run(name) => {
                let outcome = dispatcher.dispatch_named(&name, &form).await;
                info!(?outcome, "Action finished");
                let html = dispatcher.output().lock().html();
                writeln!(out, "{html}")?;
            }
            SessionCommand::Show => {
                let html = dispatcher.output().lock().html();
                writeln!(out, "{html}")?;
            }
            SessionCommand::Help => writeln!(out, "{HELP}")?,
            SessionCommand::Quit => break,
        }
    }

    info!("Interactive session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tutor_core::{
        AssistantError,
        models::{HealthStatus, RequestPayload},
    };

    /// Answers every action with a fixed body and remembers what it was sent.
    #[derive(Default)]
    struct RecordingClient {
        sent: Mutex<Vec<(Action, RequestPayload)>>,
    }

    #[async_trait]
    impl AssistantClient for RecordingClient {
        async fn send(&self, action: Action, payload: RequestPayload) -> Result<Value, AssistantError> {
            self.sent.lock().push((action, payload));
            Ok(match action {
                Action::Explain => json!({"title": "Tides", "explanation": "The moon pulls the sea."}),
                Action::Summary => json!({"summary": "Moon moves water."}),
                Action::Quiz => json!({"quiz": [
                    {"question": "What pulls the sea?", "options": ["Moon", "Wind"], "correct_answer": "Moon"}
                ]}),
            })
        }

        async fn health(&self) -> Result<HealthStatus, AssistantError> {
            Ok(HealthStatus {
                status: "online".to_string(),
                service: "test".to_string(),
            })
        }
    }

    async fn run_script(script: &str) -> (Arc<RecordingClient>, String) {
        let client = Arc::new(RecordingClient::default());
        let dispatcher = Dispatcher::new(client.clone());
        let mut out = Vec::new();
        run(
            &dispatcher,
            FormInputs::new("", "English", "Grade 5"),
            script.as_bytes(),
            &mut out,
        )
        .await
        .unwrap();
        (client, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            SessionCommand::parse("topic  Ocean tides "),
            Ok(SessionCommand::Topic("Ocean tides".to_string()))
        );
        assert_eq!(
            SessionCommand::parse("EXPLAIN"),
            Ok(SessionCommand::Run("explain".to_string()))
        );
        assert_eq!(
            SessionCommand::parse("run translate"),
            Ok(SessionCommand::Run("translate".to_string()))
        );
        assert_eq!(SessionCommand::parse("   "), Ok(SessionCommand::Empty));
        assert_eq!(SessionCommand::parse("exit"), Ok(SessionCommand::Quit));
        assert!(SessionCommand::parse("dance").is_err());
    }

    #[tokio::test]
    async fn test_summary_uses_previous_result() {
        let (client, out) = run_script("topic Tides\nlanguage French\nexplain\nsummary\nquit\n").await;

        let sent = client.sent.lock();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].0, Action::Explain);
        assert_eq!(sent[0].1.language, "French");
        assert_eq!(sent[1].0, Action::Summary);
        let summarized = sent[1].1.text.as_deref().unwrap();
        assert!(summarized.contains("The moon pulls the sea."));
        assert!(out.contains("Moon moves water."));
    }

    #[tokio::test]
    async fn test_missing_topic_is_reported() {
        let (client, out) = run_script("quiz\n").await;
        assert!(client.sent.lock().is_empty());
        assert!(out.contains("Please enter a topic first."));
    }

    #[tokio::test]
    async fn test_summary_before_anything_is_rendered() {
        let (client, out) = run_script("summary\n").await;
        assert!(client.sent.lock().is_empty());
        assert!(out.contains("No text found in output to summarize."));
    }

    #[tokio::test]
    async fn test_pasted_text_and_unknown_action() {
        let (client, out) = run_script("text Hello world\nsummary\nrun translate\nshow\n").await;
        let sent = client.sent.lock();
        assert_eq!(sent[0].1.text.as_deref(), Some("Hello world"));
        assert_eq!(sent.len(), 1);
        assert!(out.contains("Unknown action"));
    }

    #[tokio::test]
    async fn test_quit_stops_reading() {
        let (client, _) = run_script("quit\ntopic Tides\nquiz\n").await;
        assert!(client.sent.lock().is_empty());
    }
}
