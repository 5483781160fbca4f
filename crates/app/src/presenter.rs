//! Line-oriented rendering of session snapshots and parsing of user intents.

use std::fmt::Write as _;

use quiz_core::model::{Category, FailureKind, Screen, Session};

/// What the user asked for on the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SelectCategory(Category),
    SelectAnswer(String),
    Retry,
    Quit,
    Invalid(String),
}

impl Intent {
    /// Interpret a line of input against the screen it was typed on.
    #[must_use]
    pub fn parse(session: &Session, input: &str) -> Self {
        let input = input.trim();
        if matches!(input, "q" | "quit") {
            return Intent::Quit;
        }
        if session.is_loading() {
            return Intent::Invalid("still loading, please wait".into());
        }

        match session.screen() {
            Screen::CategorySelection => {
                if let Some(category) = pick(input, &Category::ALL) {
                    return Intent::SelectCategory(*category);
                }
                input
                    .parse::<Category>()
                    .map_or_else(|err| Intent::Invalid(err.to_string()), Intent::SelectCategory)
            }
            Screen::Quiz => session
                .current_question()
                .and_then(|question| pick(input, question.answers()))
                .map_or_else(
                    || Intent::Invalid(format!("choose an answer by number, got {input:?}")),
                    |answer| Intent::SelectAnswer(answer.clone()),
                ),
            Screen::Results => match input {
                "" | "r" | "retry" => Intent::Retry,
                other => Intent::Invalid(format!("unknown command {other:?}")),
            },
        }
    }
}

fn pick<'a, T>(input: &str, items: &'a [T]) -> Option<&'a T> {
    let number: usize = input.parse().ok()?;
    items.get(number.checked_sub(1)?)
}

/// Render a snapshot as the text shown for its screen.
#[must_use]
pub fn render(session: &Session) -> String {
    let mut out = String::new();
    match session.screen() {
        Screen::CategorySelection => render_categories(session, &mut out),
        Screen::Quiz => render_question(session, &mut out),
        Screen::Results => render_results(session, &mut out),
    }
    out
}

fn render_categories(session: &Session, out: &mut String) {
    if let Some(kind) = session.last_failure() {
        let _ = writeln!(
            out,
            "Couldn't load questions ({}). Pick a category to try again.",
            describe(kind)
        );
    }
    let _ = writeln!(out, "Choose a category:");
    for (idx, category) in Category::ALL.iter().enumerate() {
        let _ = writeln!(out, "  {}. {} {}", idx + 1, category.icon(), category.label());
    }
    let _ = write!(out, "> ");
}

fn render_question(session: &Session, out: &mut String) {
    let Some(question) = session.current_question() else {
        let _ = writeln!(out, "Scoring…");
        return;
    };
    let _ = writeln!(
        out,
        "Question {}/{}  (score {})",
        session.current_question_index() + 1,
        session.total_questions(),
        session.score()
    );
    let _ = writeln!(out, "{}", question.prompt());
    for (idx, answer) in question.answers().iter().enumerate() {
        let _ = writeln!(out, "  {}. {answer}", idx + 1);
    }
    let _ = write!(out, "> ");
}

fn render_results(session: &Session, out: &mut String) {
    let score = session.final_score();
    let headline = if score.earns_celebration() {
        "Congratulations!"
    } else {
        "Keep Studying!"
    };
    let _ = writeln!(out, "{headline}");
    let _ = writeln!(
        out,
        "You scored {}/{} ({}%)",
        score.correct(),
        score.total(),
        score.percentage()
    );
    if let Some(image) = session.celebration() {
        let _ = writeln!(out, "🎉 {image}");
    }
    let _ = write!(out, "Press r to play again or q to quit.\n> ");
}

fn describe(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::Transport => "network unavailable",
        FailureKind::Protocol => "service error",
        FailureKind::Parse => "unexpected response",
        FailureKind::NoQuestions => "no questions available",
    }
}
