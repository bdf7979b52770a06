//! Result display: reads the stored score and classifies it.

use crate::error::MissingResultError;
use crate::models::TestResult;
use crate::storage::ResultSlot;

/// Qualitative tier of a percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Excellent,
    Great,
    Good,
    Fair,
    BelowAverage,
    Poor,
}

/// Colour band a score is displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreColor {
    Green,
    Yellow,
    Red,
}

impl ScoreTier {
    pub fn classify(percentage: u32) -> Self {
        match percentage {
            90.. => ScoreTier::Excellent,
            80..=89 => ScoreTier::Great,
            70..=79 => ScoreTier::Good,
            60..=69 => ScoreTier::Fair,
            50..=59 => ScoreTier::BelowAverage,
            _ => ScoreTier::Poor,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "excellent",
            ScoreTier::Great => "great",
            ScoreTier::Good => "good",
            ScoreTier::Fair => "fair",
            ScoreTier::BelowAverage => "below average",
            ScoreTier::Poor => "poor",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "Excellent! Outstanding performance!",
            ScoreTier::Great => "Great job! Very good score!",
            ScoreTier::Good => "Good work! Above average performance!",
            ScoreTier::Fair => "Fair performance. Keep practicing!",
            ScoreTier::BelowAverage => "Below average. More practice needed.",
            ScoreTier::Poor => "Poor performance. Significant improvement required.",
        }
    }

    pub fn color(self) -> ScoreColor {
        match self {
            ScoreTier::Excellent | ScoreTier::Great => ScoreColor::Green,
            ScoreTier::Good | ScoreTier::Fair => ScoreColor::Yellow,
            ScoreTier::BelowAverage | ScoreTier::Poor => ScoreColor::Red,
        }
    }
}

impl ScoreColor {
    pub fn for_percentage(percentage: u32) -> Self {
        ScoreTier::classify(percentage).color()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    result: TestResult,
}

impl ResultView {
    pub fn new(result: TestResult) -> Self {
        Self { result }
    }

    /// Reads the stored result. An unreadable slot counts as empty.
    pub fn open(slot: &dyn ResultSlot) -> Result<Self, MissingResultError> {
        match slot.load() {
            Ok(Some(result)) => Ok(Self::new(result)),
            Ok(None) => Err(MissingResultError),
            Err(e) => {
                tracing::warn!("stored result could not be read: {}", e);
                Err(MissingResultError)
            }
        }
    }

    pub fn result(&self) -> &TestResult {
        &self.result
    }

    pub fn tier(&self) -> ScoreTier {
        ScoreTier::classify(self.result.percentage)
    }

    pub fn color(&self) -> ScoreColor {
        ScoreColor::for_percentage(self.result.percentage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySlot;

    fn result(score: u32, total: u32, percentage: u32) -> TestResult {
        TestResult {
            score,
            total,
            percentage,
        }
    }

    #[test]
    fn test_tier_boundaries() {
        let cases = [
            (100, ScoreTier::Excellent),
            (90, ScoreTier::Excellent),
            (89, ScoreTier::Great),
            (80, ScoreTier::Great),
            (79, ScoreTier::Good),
            (70, ScoreTier::Good),
            (69, ScoreTier::Fair),
            (60, ScoreTier::Fair),
            (59, ScoreTier::BelowAverage),
            (50, ScoreTier::BelowAverage),
            (49, ScoreTier::Poor),
            (0, ScoreTier::Poor),
        ];
        for (percentage, tier) in cases {
            assert_eq!(ScoreTier::classify(percentage), tier, "{}%", percentage);
        }
    }

    #[test]
    fn test_color_boundaries() {
        assert_eq!(ScoreColor::for_percentage(80), ScoreColor::Green);
        assert_eq!(ScoreColor::for_percentage(79), ScoreColor::Yellow);
        assert_eq!(ScoreColor::for_percentage(60), ScoreColor::Yellow);
        assert_eq!(ScoreColor::for_percentage(59), ScoreColor::Red);
    }

    #[test]
    fn test_view_classification() {
        let view = ResultView::new(result(7, 10, 70));
        assert_eq!(view.tier(), ScoreTier::Good);
        assert_eq!(view.color(), ScoreColor::Yellow);

        let view = ResultView::new(result(9, 10, 90));
        assert_eq!(view.tier().label(), "excellent");

        let view = ResultView::new(result(10, 10, 100));
        assert_eq!(view.tier(), ScoreTier::Excellent);
        assert_eq!(view.color(), ScoreColor::Green);

        let view = ResultView::new(result(13, 20, 65));
        assert_eq!(view.tier().label(), "fair");
        assert_eq!(view.color(), ScoreColor::Yellow);
    }

    #[test]
    fn test_open_requires_stored_result() {
        let mut slot = MemorySlot::new();
        assert_eq!(ResultView::open(&slot), Err(MissingResultError));

        slot.store(&result(4, 5, 80)).unwrap();
        let view = ResultView::open(&slot).unwrap();
        assert_eq!(view.result().score, 4);
        assert_eq!(view.tier(), ScoreTier::Great);
    }
}
