mod category;
mod image;
mod question;
mod score;
mod session;

pub use category::{Category, CategoryError};
pub use image::{ImageRef, ImageRefError};
pub use question::{Question, QuestionError};
pub use score::{CELEBRATION_THRESHOLD_PERCENT, Score};
pub use session::{Answered, FailureKind, Screen, Session, TransitionError};
