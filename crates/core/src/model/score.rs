/// Minimum percentage that earns a celebration image.
pub const CELEBRATION_THRESHOLD_PERCENT: u32 = 70;

/// Correct answers out of the questions in a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    correct: u32,
    total: u32,
}

impl Score {
    #[must_use]
    pub fn new(correct: u32, total: u32) -> Self {
        Self { correct, total }
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Whole percentage, rounded down. Zero for an empty quiz.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let pct = u64::from(self.correct) * 100 / u64::from(self.total);
        u32::try_from(pct).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn earns_celebration(&self) -> bool {
        self.percentage() >= CELEBRATION_THRESHOLD_PERCENT
    }
}
