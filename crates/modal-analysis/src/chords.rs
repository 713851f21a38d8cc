use crate::error::ChordError;
use crate::notes::split_root;
use crate::types::{Chord, ChordQuality};

/// Quality markers, most specific first.
///
/// Each marker is tested as a substring of the text after the root, so
/// "m7b5" must come before "m7", and "m7" before "7" and "m".
const QUALITY_MARKERS: [(&str, ChordQuality); 11] = [
    ("maj7", ChordQuality::Major7),
    ("M7", ChordQuality::Major7),
    ("m7b5", ChordQuality::HalfDiminished7),
    ("ø", ChordQuality::HalfDiminished7),
    ("dim7", ChordQuality::Diminished7),
    ("°7", ChordQuality::Diminished7),
    ("m7", ChordQuality::Minor7),
    ("7", ChordQuality::Dominant7),
    ("dim", ChordQuality::Diminished),
    ("°", ChordQuality::Diminished),
    ("m", ChordQuality::Minor),
];

/// Parse a chord name like "Ebmaj7", "F#m7b5" or "D°".
///
/// Unknown suffixes fall back to a major triad.
pub fn parse_chord(name: &str) -> Result<Chord, ChordError> {
    let (root, suffix) = split_root(name.trim())?;

    let quality = QUALITY_MARKERS
        .iter()
        .find(|(marker, _)| suffix.contains(marker))
        .map(|(_, quality)| *quality)
        .unwrap_or(ChordQuality::Major);

    Ok(Chord { root, quality })
}

/// Does a written chord fit the diatonic quality expected at its degree?
///
/// Lead sheets often leave out the seventh, so a plain triad is accepted
/// wherever its seventh-chord extension is expected.
pub fn is_compatible(actual: ChordQuality, expected: ChordQuality) -> bool {
    use ChordQuality::*;

    actual == expected
        || matches!(
            (actual, expected),
            (Major, Dominant7) | (Major, Major7) | (Minor, Minor7) | (Diminished, HalfDiminished7)
        )
}
