mod presenter;

use std::fmt;
use std::io::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use presenter::{Intent, render};
use quiz_core::RandomSource;
use services::{AppServices, QuizConfig};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidCount { raw: String },
    InvalidSeed { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidCount { raw } => write!(f, "invalid --count value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    question_count: Option<u32>,
    seed: Option<u64>,
    help: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--count" => {
                    let value = require_value(args, "--count")?;
                    let count = value
                        .parse::<u32>()
                        .ok()
                        .filter(|count| *count > 0)
                        .ok_or(ArgsError::InvalidCount { raw: value })?;
                    parsed.question_count = Some(count);
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let seed = value
                        .parse::<u64>()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    parsed.seed = Some(seed);
                }
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(parsed)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--count <n>] [--seed <u64>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --count 10");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_GIPHY_API_KEY, QUIZ_TRIVIA_BASE_URL, QUIZ_GIPHY_BASE_URL,");
    eprintln!("  QUIZ_QUESTION_COUNT, QUIZ_HTTP_TIMEOUT_SECS, RUST_LOG");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).inspect_err(|e| {
        eprintln!("{e}");
        print_usage();
    })?;
    if args.help {
        print_usage();
        return Ok(());
    }

    init_tracing();

    let mut config = QuizConfig::from_env();
    if let Some(count) = args.question_count {
        config.question_count = count;
    }
    let random = args
        .seed
        .map_or_else(RandomSource::default_source, RandomSource::seeded);
    let services = AppServices::from_config(config, random)?;
    if !services.celebrations_enabled() {
        info!("QUIZ_GIPHY_API_KEY not set; celebration images disabled");
    }
    let quiz = services.quiz();

    // Loading indicator driven purely by published snapshots.
    let mut loading_updates = quiz.subscribe();
    tokio::spawn(async move {
        while loading_updates.changed().await.is_ok() {
            if loading_updates.borrow_and_update().is_loading() {
                eprintln!("Loading…");
            }
        }
    });

    let mut updates = quiz.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let session = updates.borrow_and_update().clone();
        print!("{}", render(&session));
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match Intent::parse(&session, &line) {
            Intent::Quit => break,
            Intent::SelectCategory(category) => {
                if let Err(err) = quiz.start_quiz(category).await {
                    debug!(error = %err, "category selection ignored");
                }
            }
            Intent::SelectAnswer(answer) => {
                if let Err(err) = quiz.submit_answer(&answer).await {
                    debug!(error = %err, "answer ignored");
                }
            }
            Intent::Retry => {
                quiz.reset_quiz();
            }
            Intent::Invalid(message) => println!("{message}"),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
