use serde::{Deserialize, Serialize};

use crate::chords::parse_chord;
use crate::error::ChordError;
use crate::feedback::Feedback;
use crate::modes::Mode;
use crate::notes;
use crate::substitution::SubstitutionTable;

/// One of the 12 equal-tempered pitch classes (C=0, C#=1, ...).
///
/// Serializes as its canonical sharp spelling ("C", "C#", ...) and accepts
/// any supported enharmonic spelling when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);

    /// Wraps any value into 0–11.
    pub fn new(value: u8) -> Self {
        Self(value % 12)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// All 12 pitch classes in ascending order.
    pub fn all() -> impl Iterator<Item = PitchClass> {
        (0..12).map(PitchClass)
    }

    /// Semitones from `self` up to `other`, in 0–11.
    pub fn interval_to(self, other: PitchClass) -> u8 {
        (other.0 + 12 - self.0) % 12
    }

    pub fn transpose(self, semitones: i8) -> Self {
        Self((i16::from(self.0) + i16::from(semitones)).rem_euclid(12) as u8)
    }

    /// Canonical display name from the sharp table.
    pub fn name(self) -> &'static str {
        notes::note_name(self)
    }
}

impl std::fmt::Display for PitchClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for PitchClass {
    type Err = ChordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        notes::parse_note(s)
    }
}

impl TryFrom<String> for PitchClass {
    type Error = ChordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        notes::parse_note(&value)
    }
}

impl From<PitchClass> for String {
    fn from(pc: PitchClass) -> Self {
        pc.name().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordQuality {
    Major,
    Minor,
    Dominant7,
    Major7,
    Minor7,
    HalfDiminished7,
    Diminished7,
    Diminished,
}

impl ChordQuality {
    /// Suffix for chord symbol display
    pub fn suffix(&self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::HalfDiminished7 => "m7b5",
            ChordQuality::Diminished7 => "dim7",
            ChordQuality::Diminished => "dim",
        }
    }

    /// Suffix appended to a roman numeral. Triads carry none.
    pub fn roman_suffix(&self) -> &'static str {
        match self {
            ChordQuality::Major7 => "maj7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::Dominant7 => "7",
            ChordQuality::HalfDiminished7 => "ø7",
            ChordQuality::Diminished7 => "°7",
            ChordQuality::Major | ChordQuality::Minor | ChordQuality::Diminished => "",
        }
    }

    /// True for qualities written with a lower-case numeral.
    pub fn is_minor_or_diminished(&self) -> bool {
        !matches!(
            self,
            ChordQuality::Major | ChordQuality::Major7 | ChordQuality::Dominant7
        )
    }
}

/// A parsed chord: root pitch class plus quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chord {
    pub root: PitchClass,
    pub quality: ChordQuality,
}

impl Chord {
    pub fn new(root: PitchClass, quality: ChordQuality) -> Self {
        Self { root, quality }
    }
}

impl std::fmt::Display for Chord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.root, self.quality.suffix())
    }
}

impl std::str::FromStr for Chord {
    type Err = ChordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_chord(s)
    }
}

/// A chord as the caller wrote it, next to its parsed form.
///
/// Scoring reads the raw text, so both are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionChord {
    pub name: String,
    pub chord: Chord,
}

/// Ordered chord sequence. Order is musical time and is never changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progression {
    entries: Vec<ProgressionChord>,
}

impl Progression {
    /// Parse every chord name up front, failing on the first bad root.
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self, ChordError> {
        let entries = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                parse_chord(name).map(|chord| ProgressionChord {
                    name: name.to_string(),
                    chord,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ProgressionChord> {
        self.entries.get(index)
    }

    pub fn first(&self) -> Option<&ProgressionChord> {
        self.entries.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProgressionChord> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    /// Raw chord name at `index`, or "" when out of range.
    pub fn name_at(&self, index: usize) -> &str {
        self.entries.get(index).map(|e| e.name.as_str()).unwrap_or("")
    }
}

impl<'a> IntoIterator for &'a Progression {
    type Item = &'a ProgressionChord;
    type IntoIter = std::slice::Iter<'a, ProgressionChord>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A (tonic, mode) pair whose diatonic chords cover the whole progression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMatch {
    pub tonic: PitchClass,
    pub mode: Mode,
    pub score: f64,
    /// 0-based scale degree of each chord, in progression order
    pub degrees: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeDetection {
    pub tonic: PitchClass,
    pub mode: Mode,
    pub score: f64,
    /// Chosen because its tonic matched the caller's hint, not by score
    pub from_hint: bool,
}

impl ModeDetection {
    /// Returned for an empty progression, which says nothing about the mode.
    pub fn fallback() -> Self {
        Self {
            tonic: PitchClass::C,
            mode: Mode::Ionian,
            score: 0.0,
            from_hint: false,
        }
    }
}

/// Complete result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalAnalysis {
    pub progression: Vec<String>,
    /// The kept tonic hint, or the first chord of the progression
    pub tonic_label: String,
    pub detection: ModeDetection,
    pub table: SubstitutionTable,
    pub feedback: Vec<Feedback>,
}

impl ModalAnalysis {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
