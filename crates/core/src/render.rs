//! Output Renderer
//!
//! Maps decoded responses into the fixed HTML layouts of the output area.
//! Everything that comes from the backend goes through askama's HTML
//! escaper; nothing the user typed is ever echoed back.

use askama::{Html, MarkupDisplay, Template};

use crate::{
    action::Action,
    error::AssistantError,
    models::{ActionResponse, ExplainResponse, QuizItem, QuizResponse, SummaryResponse},
};

pub const DEFAULT_EXPLAIN_TITLE: &str = "Explanation";
pub const MISSING_KEY_TERMS: &str = "N/A";
pub const LOADING_TEXT: &str = "Generating AI response...";
pub const PLACEHOLDER_TEXT: &str = "Results will appear here...";
pub const SHOW_ANSWER_LABEL: &str = "Show Correct Answer";

/// A rendered layout: the HTML fragment and the text a reader sees in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    pub html: String,
    pub text: String,
}

#[derive(Template)]
#[template(
    source = r#"<div class="result-card">
  <h2 class="result-title">{{ title }}</h2>
  <div class="content">{{ explanation }}</div>
  <hr>
  <p><strong>Key Vocabulary:</strong> {{ key_terms }}</p>
</div>"#,
    ext = "html"
)]
struct ExplainCard<'a> {
    title: &'a str,
    explanation: &'a str,
    key_terms: String,
}

#[derive(Template)]
#[template(
    source = r#"<div class="result-card">
  <h2>Summary</h2>
  <p><em>{{ summary }}</em></p>
  <ul>{% for point in bullet_points %}<li>{{ point }}</li>{% endfor %}</ul>
</div>"#,
    ext = "html"
)]
struct SummaryCard<'a> {
    summary: &'a str,
    bullet_points: Vec<&'a str>,
}

#[derive(Template)]
#[template(
    source = r#"<h2>Quiz</h2>
{% for item in items %}<div class="quiz-question">
  <p><strong>Q{{ loop.index }}: {{ item.question }}</strong></p>
  {% for option in item.options %}<label class="quiz-option"><input type="radio" disabled> {{ option }}</label>
  {% endfor %}<details class="quiz-answer">
    <summary>{{ show_answer }}</summary>
    <p class="correct-answer">✅ {{ item.correct_answer }}</p>
  </details>
</div>
{% endfor %}"#,
    ext = "html"
)]
struct QuizCard<'a> {
    items: Vec<&'a QuizItem>,
    show_answer: &'a str,
}

/// Renders a successful response with the layout of its action.
pub fn render(response: &ActionResponse) -> Result<RenderedOutput, AssistantError> {
    match response {
        ActionResponse::Explain(explain) => render_explain(explain),
        ActionResponse::Summary(summary) => render_summary(summary),
        ActionResponse::Quiz(quiz) => render_quiz(quiz),
    }
}

fn render_explain(response: &ExplainResponse) -> Result<RenderedOutput, AssistantError> {
    let title = response
        .title
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_EXPLAIN_TITLE);
    let key_terms = match response.key_terms.as_deref() {
        Some(terms) if !terms.is_empty() => terms.join(", "),
        _ => MISSING_KEY_TERMS.to_string(),
    };
    let text = format!(
        "{title}\n{}\nKey Vocabulary: {key_terms}",
        response.explanation
    );
    let html = ExplainCard {
        title,
        explanation: &response.explanation,
        key_terms,
    }
    .render()?;
    Ok(RenderedOutput { html, text })
}

fn render_summary(response: &SummaryResponse) -> Result<RenderedOutput, AssistantError> {
    let bullet_points: Vec<&str> = response
        .bullet_points
        .iter()
        .flatten()
        .map(String::as_str)
        .collect();

    let mut lines = vec!["Summary", response.summary.as_str()];
    lines.extend(bullet_points.iter().copied());
    let text = lines.join("\n");

    let html = SummaryCard {
        summary: &response.summary,
        bullet_points,
    }
    .render()?;
    Ok(RenderedOutput { html, text })
}

fn render_quiz(response: &QuizResponse) -> Result<RenderedOutput, AssistantError> {
    let mut lines = vec!["Quiz".to_string()];
    for (i, item) in response.quiz.iter().enumerate() {
        lines.push(format!("Q{}: {}", i + 1, item.question));
        lines.extend(item.options.iter().cloned());
        // The answer sits inside a collapsed disclosure, so only its label is visible.
        lines.push(SHOW_ANSWER_LABEL.to_string());
    }

    let html = QuizCard {
        items: response.quiz.iter().collect(),
        show_answer: SHOW_ANSWER_LABEL,
    }
    .render()?;
    Ok(RenderedOutput {
        html,
        text: lines.join("\n"),
    })
}

/// The error layout that replaces the whole output area.
pub fn render_error(message: &str) -> RenderedOutput {
    RenderedOutput {
        html: format!(
            r#"<div class="error"><strong>Error:</strong> {}</div>"#,
            MarkupDisplay::new_unsafe(message, Html)
        ),
        text: format!("Error: {message}"),
    }
}

pub fn render_loading() -> RenderedOutput {
    RenderedOutput {
        html: format!(r#"<p class="loading">{LOADING_TEXT}</p>"#),
        text: LOADING_TEXT.to_string(),
    }
}

pub fn render_placeholder() -> RenderedOutput {
    RenderedOutput {
        html: format!(r#"<p class="placeholder">{PLACEHOLDER_TEXT}</p>"#),
        text: PLACEHOLDER_TEXT.to_string(),
    }
}

/// Plain text placed in the output area by hand rather than by an action.
pub fn render_text(text: &str) -> RenderedOutput {
    RenderedOutput {
        html: format!(
            r#"<div class="result-card"><p>{}</p></div>"#,
            MarkupDisplay::new_unsafe(text, Html)
        ),
        text: text.to_string(),
    }
}

/// The heading a layout starts with, used in logs.
pub fn layout_name(action: Action) -> &'static str {
    match action {
        Action::Explain => "explanation card",
        Action::Summary => "summary card",
        Action::Quiz => "quiz card",
    }
}
