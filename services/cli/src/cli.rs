use clap::{Parser, Subcommand};
use tutor_core::{Action, FormInputs};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "tutor",
    version,
    about = "Explanations, summaries and quizzes from the learning assistant backend"
)]
pub struct Cli {
    /// Backend base URL (overrides TUTOR_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Explain a topic at a given grade level
    Explain {
        #[arg(long, default_value = "")]
        topic: String,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        grade: Option<String>,
    },
    /// Summarize a piece of text
    Summary {
        /// Text placed in the output area before summarizing it
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        language: Option<String>,
    },
    /// Generate a multiple choice quiz about a topic
    Quiz {
        #[arg(long, default_value = "")]
        topic: String,
        #[arg(long)]
        language: Option<String>,
    },
    /// Check that the backend is reachable
    Health,
    /// Interactive session sharing one output area between commands
    Session,
}

impl Cli {
    pub fn base_url<'a>(&'a self, config: &'a Config) -> &'a str {
        self.base_url.as_deref().unwrap_or(&config.base_url)
    }
}

impl Commands {
    /// The backend action this command runs, if any.
    pub fn action(&self) -> Option<Action> {
        match self {
            Commands::Explain { .. } => Some(Action::Explain),
            Commands::Summary { .. } => Some(Action::Summary),
            Commands::Quiz { .. } => Some(Action::Quiz),
            Commands::Health | Commands::Session => None,
        }
    }

    /// Form values for this command, falling back to configured defaults.
    pub fn form_inputs(&self, config: &Config) -> FormInputs {
        let pick = |value: &Option<String>, default: &str| {
            value.clone().unwrap_or_else(|| default.to_string())
        };
        match self {
            Commands::Explain {
                topic,
                language,
                grade,
            } => FormInputs::new(
                topic.clone(),
                pick(language, &config.default_language),
                pick(grade, &config.default_grade),
            ),
            Commands::Summary { language, .. } => FormInputs::new(
                "",
                pick(language, &config.default_language),
                config.default_grade.clone(),
            ),
            Commands::Quiz { topic, language } => FormInputs::new(
                topic.clone(),
                pick(language, &config.default_language),
                config.default_grade.clone(),
            ),
            Commands::Health | Commands::Session => FormInputs::new(
                "",
                config.default_language.clone(),
                config.default_grade.clone(),
            ),
        }
    }

    /// Text to put in the output area before the action runs.
    pub fn seed_text(&self) -> Option<&str> {
        match self {
            Commands::Summary { text, .. } => text.as_deref(),
            _ => None,
        }
    }
}
