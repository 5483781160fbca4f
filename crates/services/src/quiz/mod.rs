mod store;
mod workflow;

// Public API of the quiz subsystem.
pub use quiz_core::model::TransitionError;
pub use store::SessionStore;
pub use workflow::QuizLoopService;
