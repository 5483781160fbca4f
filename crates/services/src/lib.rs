#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod error;
pub mod providers;
pub mod quiz;

pub use quiz_core::RandomSource;

pub use app_services::AppServices;
pub use config::QuizConfig;
pub use error::{AppServicesError, ProviderError};
pub use providers::{GiphyService, ImageProvider, QuestionProvider, TriviaService};
pub use quiz::{QuizLoopService, SessionStore, TransitionError};
