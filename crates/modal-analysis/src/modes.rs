use serde::{Deserialize, Serialize};

use crate::types::{ChordQuality, PitchClass};

/// The seven diatonic modes, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
}

/// Fixed interval and quality data for one mode.
pub struct ModeSpec {
    pub mode: Mode,
    /// Semitones from the tonic for degrees 1–7, ascending
    pub intervals: [u8; 7],
    /// Diatonic seventh-chord quality on each degree
    pub qualities: [ChordQuality; 7],
    /// Semitones from this mode's tonic to the tonic of the Ionian scale
    /// sharing its notes
    pub relative_major_offset: i8,
}

use ChordQuality::{Dominant7 as DOM7, HalfDiminished7 as HDIM7, Major7 as MAJ7, Minor7 as MIN7};

/// The mode table, indexed by `Mode as usize`.
pub static MODE_TABLE: [ModeSpec; 7] = [
    ModeSpec {
        mode: Mode::Ionian,
        intervals: [0, 2, 4, 5, 7, 9, 11],
        qualities: [MAJ7, MIN7, MIN7, MAJ7, DOM7, MIN7, HDIM7],
        relative_major_offset: 0,
    },
    ModeSpec {
        mode: Mode::Dorian,
        intervals: [0, 2, 3, 5, 7, 9, 10],
        qualities: [MIN7, MIN7, MAJ7, DOM7, MIN7, HDIM7, MAJ7],
        relative_major_offset: -2,
    },
    ModeSpec {
        mode: Mode::Phrygian,
        intervals: [0, 1, 3, 5, 7, 8, 10],
        qualities: [MIN7, MAJ7, DOM7, MIN7, HDIM7, MAJ7, MIN7],
        relative_major_offset: -4,
    },
    ModeSpec {
        mode: Mode::Lydian,
        intervals: [0, 2, 4, 6, 7, 9, 11],
        qualities: [MAJ7, DOM7, MIN7, HDIM7, MAJ7, MIN7, MIN7],
        relative_major_offset: -5,
    },
    ModeSpec {
        mode: Mode::Mixolydian,
        intervals: [0, 2, 4, 5, 7, 9, 10],
        qualities: [DOM7, MIN7, HDIM7, MAJ7, MIN7, MIN7, MAJ7],
        relative_major_offset: -7,
    },
    ModeSpec {
        mode: Mode::Aeolian,
        intervals: [0, 2, 3, 5, 7, 8, 10],
        qualities: [MIN7, HDIM7, MAJ7, MIN7, MIN7, MAJ7, DOM7],
        relative_major_offset: -9,
    },
    ModeSpec {
        mode: Mode::Locrian,
        intervals: [0, 1, 3, 5, 6, 8, 10],
        qualities: [HDIM7, MAJ7, MIN7, MIN7, MAJ7, DOM7, MIN7],
        relative_major_offset: -11,
    },
];

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Ionian,
        Mode::Dorian,
        Mode::Phrygian,
        Mode::Lydian,
        Mode::Mixolydian,
        Mode::Aeolian,
        Mode::Locrian,
    ];

    pub fn spec(self) -> &'static ModeSpec {
        &MODE_TABLE[self as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Ionian => "Ionian",
            Mode::Dorian => "Dorian",
            Mode::Phrygian => "Phrygian",
            Mode::Lydian => "Lydian",
            Mode::Mixolydian => "Mixolydian",
            Mode::Aeolian => "Aeolian",
            Mode::Locrian => "Locrian",
        }
    }

    /// 0-based degree whose interval from the tonic is `interval`.
    pub fn degree_of(self, interval: u8) -> Option<usize> {
        self.spec().intervals.iter().position(|&i| i == interval)
    }

    /// Tonic of the Ionian scale that shares this mode's notes at `tonic`.
    pub fn relative_major(self, tonic: PitchClass) -> PitchClass {
        tonic.transpose(self.spec().relative_major_offset)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
