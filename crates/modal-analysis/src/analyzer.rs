use crate::detect::{detect_mode, rank_candidates};
use crate::error::AnalysisError;
use crate::types::{CandidateMatch, ModeDetection, PitchClass, Progression};

/// Trait for mode detection backends.
///
/// `HeuristicAnalyzer` is the cadence-scoring detector. The engine only
/// talks to this trait, so tests and alternative scorers can swap in.
pub trait ModeAnalyzer: Send + Sync {
    fn detect(
        &self,
        progression: &Progression,
        tonic_hint: Option<PitchClass>,
    ) -> Result<ModeDetection, AnalysisError>;

    /// All surviving candidates, best first.
    fn rank(&self, progression: &Progression) -> Vec<CandidateMatch>;
}

/// Diatonic-membership filter plus weighted cadence scoring.
pub struct HeuristicAnalyzer;

impl ModeAnalyzer for HeuristicAnalyzer {
    fn detect(
        &self,
        progression: &Progression,
        tonic_hint: Option<PitchClass>,
    ) -> Result<ModeDetection, AnalysisError> {
        detect_mode(progression, tonic_hint)
    }

    fn rank(&self, progression: &Progression) -> Vec<CandidateMatch> {
        rank_candidates(progression)
    }
}
