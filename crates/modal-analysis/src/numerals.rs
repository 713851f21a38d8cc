//! Roman-numeral analysis and diatonic chord construction.

use crate::modes::Mode;
use crate::types::{Chord, PitchClass};

pub const ROMAN_NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

/// Quality suffixes a numeral may carry, longest first.
const NUMERAL_SUFFIXES: [&str; 5] = ["maj7", "m7", "ø7", "°7", "7"];

/// Roman numeral of `chord` within `mode` at `tonic`.
///
/// The numeral's case follows the mode's expected quality at that degree;
/// the suffix follows the chord's own quality. Chords outside the mode
/// come back as the literal name in parentheses.
pub fn roman_numeral(chord: &Chord, name: &str, tonic: PitchClass, mode: Mode) -> String {
    let interval = tonic.interval_to(chord.root);
    let Some(degree) = mode.degree_of(interval) else {
        return format!("({})", name);
    };

    let base = ROMAN_NUMERALS[degree];
    let base = if mode.spec().qualities[degree].is_minor_or_diminished() {
        base.to_lowercase()
    } else {
        base.to_string()
    };

    format!("{}{}", base, chord.quality.roman_suffix())
}

/// 1-based scale degree of a numeral such as "iim7" or "IVmaj7".
pub fn numeral_degree(numeral: &str) -> Option<u8> {
    let bare = NUMERAL_SUFFIXES
        .iter()
        .find_map(|suffix| numeral.strip_suffix(*suffix))
        .unwrap_or(numeral);

    let upper = bare.to_uppercase();
    ROMAN_NUMERALS
        .iter()
        .position(|&n| n == upper)
        .map(|i| i as u8 + 1)
}

/// Diatonic seventh chord on 1-based `degree` of `mode` at `tonic`.
pub fn diatonic_seventh(degree: u8, tonic: PitchClass, mode: Mode) -> Option<Chord> {
    if !(1..=7).contains(&degree) {
        return None;
    }
    let index = (degree - 1) as usize;
    let spec = mode.spec();
    Some(Chord::new(
        tonic.transpose(spec.intervals[index] as i8),
        spec.qualities[index],
    ))
}

/// Left-justify each chord to `width` characters and join with spaces.
pub fn format_chord_column<S: AsRef<str>>(chords: &[S], width: usize) -> String {
    chords
        .iter()
        .map(|chord| format!("{:<width$}", chord.as_ref(), width = width))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chords::parse_chord;
    use crate::types::ChordQuality;

    fn pc(name: &str) -> PitchClass {
        name.parse().unwrap()
    }

    fn numeral(name: &str, tonic: &str, mode: Mode) -> String {
        let chord = parse_chord(name).unwrap();
        roman_numeral(&chord, name, pc(tonic), mode)
    }

    #[test]
    fn numerals_in_c_ionian() {
        assert_eq!(numeral("Cmaj7", "C", Mode::Ionian), "Imaj7");
        assert_eq!(numeral("Dm7", "C", Mode::Ionian), "iim7");
        assert_eq!(numeral("G7", "C", Mode::Ionian), "V7");
        assert_eq!(numeral("Bm7b5", "C", Mode::Ionian), "viiø7");
        assert_eq!(numeral("Am", "C", Mode::Ionian), "vi");
        assert_eq!(numeral("F", "C", Mode::Ionian), "IV");
    }

    #[test]
    fn suffix_follows_actual_quality_not_expected() {
        // Dominant on the Ionian I is still written I7
        assert_eq!(numeral("C7", "C", Mode::Ionian), "I7");
        assert_eq!(numeral("Ddim7", "C", Mode::Ionian), "ii°7");
    }

    #[test]
    fn diminished_triad_in_aeolian() {
        assert_eq!(numeral("D°", "C", Mode::Aeolian), "ii");
        assert_eq!(numeral("Eb", "C", Mode::Aeolian), "III");
    }

    #[test]
    fn out_of_mode_chord_is_parenthesized() {
        assert_eq!(numeral("Ab", "C", Mode::Ionian), "(Ab)");
        assert_eq!(numeral("F#m7", "C", Mode::Dorian), "(F#m7)");
    }

    #[test]
    fn numeral_degrees() {
        assert_eq!(numeral_degree("I"), Some(1));
        assert_eq!(numeral_degree("iim7"), Some(2));
        assert_eq!(numeral_degree("III"), Some(3));
        assert_eq!(numeral_degree("IVmaj7"), Some(4));
        assert_eq!(numeral_degree("V7"), Some(5));
        assert_eq!(numeral_degree("vi"), Some(6));
        assert_eq!(numeral_degree("viiø7"), Some(7));
        assert_eq!(numeral_degree("ii°7"), Some(2));
        assert_eq!(numeral_degree("(Ab)"), None);
        assert_eq!(numeral_degree("VIII"), None);
    }

    #[test]
    fn diatonic_chords_match_known_keys() {
        let chords = |tonic: &str, mode: Mode, degrees: &[u8]| -> Vec<String> {
            degrees
                .iter()
                .map(|&d| diatonic_seventh(d, pc(tonic), mode).unwrap().to_string())
                .collect()
        };

        assert_eq!(
            chords("C", Mode::Ionian, &[1, 4, 5, 1]),
            ["Cmaj7", "Fmaj7", "G7", "Cmaj7"]
        );
        assert_eq!(
            chords("D", Mode::Dorian, &[1, 4, 7, 1]),
            ["Dm7", "G7", "Cmaj7", "Dm7"]
        );
        assert_eq!(
            chords("G", Mode::Mixolydian, &[2, 5, 6, 1]),
            ["Am7", "Dm7", "Em7", "G7"]
        );
        assert_eq!(
            chords("A", Mode::Aeolian, &[1, 2, 3, 7]),
            ["Am7", "Bm7b5", "Cmaj7", "G7"]
        );
    }

    #[test]
    fn diatonic_seventh_rejects_bad_degree() {
        assert!(diatonic_seventh(0, PitchClass::C, Mode::Ionian).is_none());
        assert!(diatonic_seventh(8, PitchClass::C, Mode::Ionian).is_none());
    }

    #[test]
    fn every_diatonic_chord_parses_back() {
        for tonic in PitchClass::all() {
            for mode in Mode::ALL {
                for degree in 1..=7u8 {
                    let chord = diatonic_seventh(degree, tonic, mode).unwrap();
                    let parsed = parse_chord(&chord.to_string()).unwrap();
                    let index = (degree - 1) as usize;
                    assert_eq!(
                        parsed.root,
                        tonic.transpose(mode.spec().intervals[index] as i8)
                    );
                    assert_eq!(parsed.quality, mode.spec().qualities[index]);
                }
            }
        }
    }

    #[test]
    fn diatonic_chords_use_seventh_qualities_only() {
        for mode in Mode::ALL {
            for q in mode.spec().qualities {
                assert!(matches!(
                    q,
                    ChordQuality::Major7
                        | ChordQuality::Minor7
                        | ChordQuality::Dominant7
                        | ChordQuality::HalfDiminished7
                ));
            }
        }
    }

    #[test]
    fn column_formatting_pads_to_width() {
        assert_eq!(format_chord_column(&["Cm", "D°", "Eb"], 7), "Cm      D°      Eb     ");
        assert_eq!(format_chord_column(&["Cmaj7", "Am7b5"], 4), "Cmaj7 Am7b5");
        assert_eq!(format_chord_column::<&str>(&[], 7), "");
    }
}
