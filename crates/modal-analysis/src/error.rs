use thiserror::Error;

/// Chord or note name that cannot be read at all.
///
/// An unrecognized quality suffix is not an error; it reads as major.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChordError {
    #[error("empty chord name")]
    Empty,

    #[error("unknown root note in '{name}'")]
    UnknownRoot { name: String },

    #[error("'{name}' is not a plain note name")]
    NotANote { name: String },
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No (tonic, mode) pair covers every chord. Nothing to substitute against.
    #[error("No mode found, can't give any substitution.")]
    NoModeFound,

    #[error("The progression is empty or too short ({len} chord(s), need at least 2).")]
    ProgressionTooShort { len: usize },

    #[error(transparent)]
    Chord(#[from] ChordError),
}
