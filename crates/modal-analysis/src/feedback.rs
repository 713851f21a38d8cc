//! Analysis feedback (warnings and notes).
//!
//! Only a failed detection stops an analysis. Everything else that goes
//! wrong along the way is collected here and reported next to the result.

use serde::{Deserialize, Serialize};

/// Feedback from analysis - warnings and informational notes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub level: FeedbackLevel,
    pub message: String,
    /// Position in the progression this refers to, when there is one
    pub chord_index: Option<usize>,
    pub suggestion: Option<String>,
}

impl Feedback {
    pub fn warning(message: impl Into<String>) -> Self {
        Feedback {
            level: FeedbackLevel::Warning,
            message: message.into(),
            chord_index: None,
            suggestion: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Feedback {
            level: FeedbackLevel::Info,
            message: message.into(),
            chord_index: None,
            suggestion: None,
        }
    }

    pub fn at_chord(mut self, index: usize) -> Self {
        self.chord_index = Some(index);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackLevel {
    /// Result was produced with assumptions, may not be what the user intended
    Warning,
    /// Minor note about how the input was read
    Info,
}

/// Collector for feedback during analysis
#[derive(Debug, Default)]
pub struct FeedbackCollector {
    feedback: Vec<Feedback>,
}

impl FeedbackCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, feedback: Feedback) {
        self.feedback.push(feedback);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Feedback::warning(message));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Feedback::info(message));
    }

    pub fn extend(&mut self, feedback: impl IntoIterator<Item = Feedback>) {
        self.feedback.extend(feedback);
    }

    /// Get all feedback
    pub fn into_feedback(self) -> Vec<Feedback> {
        self.feedback
    }
}

/// A value plus the feedback gathered while producing it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithFeedback<T> {
    pub value: T,
    pub feedback: Vec<Feedback>,
}

impl<T> WithFeedback<T> {
    pub fn new(value: T, feedback: Vec<Feedback>) -> Self {
        WithFeedback { value, feedback }
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Feedback> {
        self.feedback
            .iter()
            .filter(|f| f.level == FeedbackLevel::Warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_builder() {
        let fb = Feedback::warning("Chord 'X' has no clear degree")
            .at_chord(2)
            .with_suggestion("Check the detected mode");

        assert_eq!(fb.level, FeedbackLevel::Warning);
        assert_eq!(fb.chord_index, Some(2));
        assert_eq!(fb.suggestion, Some("Check the detected mode".to_string()));
    }

    #[test]
    fn test_feedback_collector() {
        let mut collector = FeedbackCollector::new();
        collector.info("Every chord is on the tonic");
        collector.push(Feedback::warning("Unresolvable degree").at_chord(1));
        collector.extend([Feedback::warning("Tonic not found")]);

        let feedback = collector.into_feedback();
        assert_eq!(feedback.len(), 3);
        assert_eq!(feedback[0].level, FeedbackLevel::Info);
        assert_eq!(feedback[0].chord_index, None);
        assert_eq!(feedback[1].chord_index, Some(1));
        assert_eq!(feedback[2].level, FeedbackLevel::Warning);
    }

    #[test]
    fn test_with_feedback() {
        let result = WithFeedback::new(
            42,
            vec![Feedback::warning("a"), Feedback::info("b"), Feedback::warning("c")],
        );
        assert_eq!(result.warnings().count(), 2);
        assert_eq!(result.value, 42);
    }
}
