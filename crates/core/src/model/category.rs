use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CategoryError {
    #[error("unknown category: {0}")]
    Unknown(String),
}

/// Trivia topics offered on the category selection screen.
///
/// Each category carries a display label, an icon token for the presenter, and the
/// identifier the question bank uses for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    General,
    Science,
    Computers,
    Mathematics,
    Sports,
    Geography,
    History,
    Animals,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 8] = [
        Category::General,
        Category::Science,
        Category::Computers,
        Category::Mathematics,
        Category::Sports,
        Category::Geography,
        Category::History,
        Category::Animals,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::General => "General Knowledge",
            Category::Science => "Science & Nature",
            Category::Computers => "Computers",
            Category::Mathematics => "Mathematics",
            Category::Sports => "Sports",
            Category::Geography => "Geography",
            Category::History => "History",
            Category::Animals => "Animals",
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Category::General => "🧠",
            Category::Science => "🔬",
            Category::Computers => "💻",
            Category::Mathematics => "🔢",
            Category::Sports => "⚽",
            Category::Geography => "🌍",
            Category::History => "📜",
            Category::Animals => "🐾",
        }
    }

    /// Identifier of this category in the trivia question bank.
    #[must_use]
    pub fn provider_id(self) -> u32 {
        match self {
            Category::General => 9,
            Category::Science => 17,
            Category::Computers => 18,
            Category::Mathematics => 19,
            Category::Sports => 21,
            Category::Geography => 22,
            Category::History => 23,
            Category::Animals => 27,
        }
    }

    /// Lowercase name accepted by `FromStr`.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Science => "science",
            Category::Computers => "computers",
            Category::Mathematics => "mathematics",
            Category::Sports => "sports",
            Category::Geography => "geography",
            Category::History => "history",
            Category::Animals => "animals",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.slug() == wanted)
            .ok_or_else(|| CategoryError::Unknown(s.to_string()))
    }
}
