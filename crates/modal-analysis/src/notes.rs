//! Note-name tables and root parsing.

use crate::error::ChordError;
use crate::types::PitchClass;

const NOTE_NAMES_SHARP: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Every accepted spelling, with accidentals normalized to `#` and `b`.
const SPELLINGS: [(&str, u8); 21] = [
    ("C", 0),
    ("B#", 0),
    ("C#", 1),
    ("Db", 1),
    ("D", 2),
    ("D#", 3),
    ("Eb", 3),
    ("E", 4),
    ("Fb", 4),
    ("E#", 5),
    ("F", 5),
    ("F#", 6),
    ("Gb", 6),
    ("G", 7),
    ("G#", 8),
    ("Ab", 8),
    ("A", 9),
    ("A#", 10),
    ("Bb", 10),
    ("B", 11),
    ("Cb", 11),
];

pub fn note_name(pitch_class: PitchClass) -> &'static str {
    NOTE_NAMES_SHARP[pitch_class.value() as usize]
}

/// Split the leading note name off `text`.
///
/// The letter is case-insensitive and may be followed by one of
/// `#`, `♯`, `b`, `♭`. Returns the pitch class and the rest of the text.
pub fn split_root(text: &str) -> Result<(PitchClass, &str), ChordError> {
    let letter = match text.chars().next() {
        None => return Err(ChordError::Empty),
        Some(c) if matches!(c.to_ascii_uppercase(), 'A'..='G') => c.to_ascii_uppercase(),
        Some(_) => {
            return Err(ChordError::UnknownRoot {
                name: text.to_string(),
            })
        }
    };

    // The letter is ASCII, so the accidental starts at byte 1
    let rest = &text[1..];
    let (accidental, consumed) = match rest.chars().next() {
        Some(c @ ('#' | '♯')) => (Some('#'), c.len_utf8()),
        Some(c @ ('b' | '♭')) => (Some('b'), c.len_utf8()),
        _ => (None, 0),
    };

    let mut spelling = String::with_capacity(2);
    spelling.push(letter);
    if let Some(acc) = accidental {
        spelling.push(acc);
    }

    let pc = SPELLINGS
        .iter()
        .find(|(name, _)| *name == spelling)
        .map(|(_, pc)| PitchClass::new(*pc))
        .ok_or_else(|| ChordError::UnknownRoot {
            name: text.to_string(),
        })?;

    Ok((pc, &rest[consumed..]))
}

/// Parse a bare note name such as "Bb" or "f#".
pub fn parse_note(name: &str) -> Result<PitchClass, ChordError> {
    let trimmed = name.trim();
    let (pc, rest) = split_root(trimmed)?;
    if !rest.is_empty() {
        return Err(ChordError::NotANote {
            name: trimmed.to_string(),
        });
    }
    Ok(pc)
}
