//! Modal interchange analysis for chord progressions.
//!
//! Finds the most probable (tonic, mode) for a progression, then builds a
//! table of chords borrowed from the other six modes at each position that
//! is not the tonic. Each mode lends the chords of its relative major.

pub mod analyzer;
pub mod chords;
pub mod detect;
pub mod error;
pub mod feedback;
pub mod modes;
pub mod notes;
pub mod numerals;
pub mod substitution;
pub mod types;

pub use analyzer::{HeuristicAnalyzer, ModeAnalyzer};
pub use chords::parse_chord;
pub use error::{AnalysisError, ChordError};
pub use feedback::{Feedback, FeedbackCollector, FeedbackLevel, WithFeedback};
pub use modes::{Mode, ModeSpec};
pub use substitution::{build_substitution_table, SubstitutionRow, SubstitutionTable};
pub use types::{
    CandidateMatch, Chord, ChordQuality, ModalAnalysis, ModeDetection, PitchClass, Progression,
    ProgressionChord,
};

use std::sync::Arc;

use tracing::{info, warn};

/// Shortest progression that says anything about a mode.
pub const MIN_PROGRESSION_LEN: usize = 2;

/// Analysis pipeline: parse, detect, substitute.
///
/// Detection goes through a `ModeAnalyzer` so the scoring backend can be
/// swapped without touching parsing or table building.
pub struct ModalEngine {
    analyzer: Arc<dyn ModeAnalyzer>,
}

impl Default for ModalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalEngine {
    /// Create with the default heuristic analyzer.
    pub fn new() -> Self {
        Self {
            analyzer: Arc::new(HeuristicAnalyzer),
        }
    }

    /// Create with a custom analyzer.
    pub fn with_analyzer(analyzer: Arc<dyn ModeAnalyzer>) -> Self {
        Self { analyzer }
    }

    /// Analyze chord names, optionally anchored on a tonic.
    pub fn analyze<S: AsRef<str>>(
        &self,
        names: &[S],
        tonic_hint: Option<&str>,
    ) -> Result<ModalAnalysis, AnalysisError> {
        let progression = Progression::parse(names)?;
        let mut feedback = FeedbackCollector::new();

        let hint = tonic_hint.and_then(|h| validate_hint(h, &progression, &mut feedback));

        if progression.len() < MIN_PROGRESSION_LEN {
            return Err(AnalysisError::ProgressionTooShort {
                len: progression.len(),
            });
        }

        info!(progression = ?progression.names(), "analyzing progression");

        let detection = self
            .analyzer
            .detect(&progression, hint.as_ref().map(|(pc, _)| *pc))?;
        let table = build_substitution_table(&progression, detection.tonic, detection.mode);
        feedback.extend(table.feedback);

        let tonic_label = match hint {
            Some((_, label)) => label,
            None => progression.name_at(0).to_string(),
        };

        Ok(ModalAnalysis {
            progression: progression.names(),
            tonic_label,
            detection,
            table: table.value,
            feedback: feedback.into_feedback(),
        })
    }

    /// Every (tonic, mode) that covers the progression, best first.
    pub fn rank<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<CandidateMatch>, AnalysisError> {
        let progression = Progression::parse(names)?;
        Ok(self.analyzer.rank(&progression))
    }
}

/// Keep the hint only when it names a note that roots some chord.
fn validate_hint(
    hint: &str,
    progression: &Progression,
    feedback: &mut FeedbackCollector,
) -> Option<(PitchClass, String)> {
    let first = progression.name_at(0);

    let pitch = match notes::parse_note(hint.trim()) {
        Ok(pc) => pc,
        Err(e) => {
            warn!(hint, error = %e, "ignoring tonic hint");
            feedback.warning(format!(
                "Tonic '{}' is not a note name ({}). Using default tonic '{}'.",
                hint, e, first
            ));
            return None;
        }
    };

    if progression.iter().any(|entry| entry.chord.root == pitch) {
        Some((pitch, hint.trim().to_string()))
    } else {
        warn!(hint, "tonic hint not in progression");
        feedback.warning(format!(
            "Tonic '{}' not found in the progression. Using default tonic '{}'.",
            hint, first
        ));
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedAnalyzer;

    impl ModeAnalyzer for FixedAnalyzer {
        fn detect(
            &self,
            _progression: &Progression,
            _tonic_hint: Option<PitchClass>,
        ) -> Result<ModeDetection, AnalysisError> {
            Ok(ModeDetection {
                tonic: PitchClass::new(2),
                mode: Mode::Dorian,
                score: 0.0,
                from_hint: false,
            })
        }

        fn rank(&self, _progression: &Progression) -> Vec<CandidateMatch> {
            Vec::new()
        }
    }

    #[test]
    fn custom_analyzer_drives_the_table() {
        let engine = ModalEngine::with_analyzer(Arc::new(FixedAnalyzer));
        let analysis = engine.analyze(&["Dm7", "G7"], None).unwrap();
        assert_eq!(analysis.detection.mode, Mode::Dorian);
        assert_eq!(analysis.table.mode, Mode::Dorian);
        assert_eq!(analysis.table.numerals, vec!["IV7"]);
        assert!(engine.rank(&["Dm7", "G7"]).unwrap().is_empty());
    }

    #[test]
    fn short_progression_is_rejected() {
        let engine = ModalEngine::new();
        let err = engine.analyze(&["C"], None).unwrap_err();
        assert!(matches!(err, AnalysisError::ProgressionTooShort { len: 1 }));
        let err = engine.analyze::<&str>(&[], None).unwrap_err();
        assert!(matches!(err, AnalysisError::ProgressionTooShort { len: 0 }));
    }

    #[test]
    fn bad_chord_is_an_error() {
        let err = ModalEngine::new().analyze(&["C", "H7"], None).unwrap_err();
        assert!(matches!(err, AnalysisError::Chord(ChordError::UnknownRoot { .. })));
    }

    #[test]
    fn hint_outside_progression_warns_and_is_ignored() {
        let analysis = ModalEngine::new()
            .analyze(&["Am", "G", "F", "C"], Some("E"))
            .unwrap();
        assert_eq!(analysis.tonic_label, "Am");
        assert!(!analysis.detection.from_hint);
        assert_eq!(
            analysis.feedback[0].message,
            "Tonic 'E' not found in the progression. Using default tonic 'Am'."
        );
    }

    #[test]
    fn unreadable_hint_warns_and_is_ignored() {
        let analysis = ModalEngine::new()
            .analyze(&["Am", "G", "F", "C"], Some("Xyz"))
            .unwrap();
        assert_eq!(analysis.feedback.len(), 1);
        assert_eq!(analysis.feedback[0].level, FeedbackLevel::Warning);
        assert_eq!(analysis.detection.tonic, PitchClass::new(9));
    }

    #[test]
    fn hint_matches_by_pitch_class() {
        let analysis = ModalEngine::new()
            .analyze(&["Cm", "D#", "G#", "A#"], Some("Bb"))
            .unwrap();
        assert_eq!(analysis.tonic_label, "Bb");
        assert_eq!(analysis.detection.tonic, PitchClass::new(10));
        assert_eq!(analysis.detection.mode, Mode::Mixolydian);
        assert!(analysis.detection.from_hint);
        assert!(analysis.feedback.is_empty());
    }
}
