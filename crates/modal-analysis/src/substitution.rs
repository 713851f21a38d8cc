use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::feedback::{Feedback, FeedbackCollector, WithFeedback};
use crate::modes::Mode;
use crate::numerals::{diatonic_seventh, format_chord_column, numeral_degree, roman_numeral};
use crate::types::{PitchClass, Progression};

/// One mode's reharmonization of the progression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionRow {
    pub mode: Mode,
    /// True for the detected mode, which keeps the chords as written
    pub original: bool,
    pub relative_major: PitchClass,
    /// Chords at the substitutable positions
    pub borrowed: Vec<String>,
    /// The whole progression with borrowed chords in place
    pub progression: Vec<String>,
}

impl SubstitutionRow {
    pub fn mode_label(&self) -> String {
        if self.original {
            format!("{} (Original)", self.mode)
        } else {
            self.mode.to_string()
        }
    }

    pub fn relative_label(&self) -> String {
        format!("{} Major", self.relative_major)
    }

    pub fn borrowed_column(&self, width: usize) -> String {
        format_chord_column(&self.borrowed, width)
    }

    pub fn progression_column(&self, width: usize) -> String {
        format_chord_column(&self.progression, width)
    }
}

/// Modal-interchange table for a detected (tonic, mode).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionTable {
    pub tonic: PitchClass,
    pub mode: Mode,
    /// Roman numerals of the substitutable chords in the detected mode
    pub numerals: Vec<String>,
    /// Detected mode first, then the other six in table order
    pub rows: Vec<SubstitutionRow>,
}

impl SubstitutionTable {
    pub fn headers(&self) -> [String; 4] {
        [
            "Mode".to_string(),
            "Borrowed (Relative)".to_string(),
            format!("Degrees ({})", self.numerals.join(" ")),
            "Substitution".to_string(),
        ]
    }
}

/// Positions to reharmonize: every chord not rooted on the tonic.
///
/// A progression made only of tonic chords keeps its first chord and
/// offers the rest. The flag is set in that case.
fn substitutable_positions(progression: &Progression, tonic: PitchClass) -> (Vec<usize>, bool) {
    let positions: Vec<usize> = progression
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.chord.root != tonic)
        .map(|(i, _)| i)
        .collect();

    if positions.is_empty() {
        ((1..progression.len()).collect(), true)
    } else {
        (positions, false)
    }
}

/// Build the substitution table for `progression` in `mode` at `tonic`.
///
/// Each other mode borrows the Ionian chords of its relative major, so
/// degree `n` becomes the n-th diatonic seventh on `tonic + offset(mode)`.
/// Chords rooted on the tonic are never rewritten. Chords whose numeral
/// has no clear degree are reported and left as written in every row.
pub fn build_substitution_table(
    progression: &Progression,
    tonic: PitchClass,
    mode: Mode,
) -> WithFeedback<SubstitutionTable> {
    let mut feedback = FeedbackCollector::new();
    let (positions, all_tonic) = substitutable_positions(progression, tonic);
    if all_tonic {
        feedback.info(format!(
            "Every chord is on the tonic {}; borrowed chords are listed for the chords after the first.",
            tonic
        ));
    }

    let mut numerals = Vec::with_capacity(positions.len());
    let mut borrowable: Vec<(usize, u8)> = Vec::with_capacity(positions.len());

    for &pos in &positions {
        let Some(entry) = progression.get(pos) else {
            continue;
        };
        let numeral = roman_numeral(&entry.chord, &entry.name, tonic, mode);
        match numeral_degree(&numeral) {
            Some(degree) => borrowable.push((pos, degree)),
            None => feedback.push(
                Feedback::warning(format!(
                    "Chord '{}' could not be analyzed as a clear degree of {} {}; it is kept as written.",
                    entry.name, tonic, mode
                ))
                .at_chord(pos)
                .with_suggestion("The detected mode may be incorrect."),
            ),
        }
        numerals.push(numeral);
    }

    let original_names = progression.names();
    let mut rows = Vec::with_capacity(Mode::ALL.len());

    rows.push(SubstitutionRow {
        mode,
        original: true,
        relative_major: mode.relative_major(tonic),
        borrowed: positions
            .iter()
            .map(|&pos| progression.name_at(pos).to_string())
            .collect(),
        progression: original_names.clone(),
    });

    for other in Mode::ALL.into_iter().filter(|m| *m != mode) {
        let relative = other.relative_major(tonic);
        let mut reharmonized = original_names.clone();
        let mut borrowed = Vec::with_capacity(borrowable.len());

        for &(pos, degree) in &borrowable {
            if let Some(chord) = diatonic_seventh(degree, relative, Mode::Ionian) {
                let name = chord.to_string();
                if !all_tonic {
                    reharmonized[pos] = name.clone();
                }
                borrowed.push(name);
            }
        }

        debug!(mode = %other, %relative, ?borrowed, "borrowed chords");
        rows.push(SubstitutionRow {
            mode: other,
            original: false,
            relative_major: relative,
            borrowed,
            progression: reharmonized,
        });
    }

    WithFeedback::new(
        SubstitutionTable {
            tonic,
            mode,
            numerals,
            rows,
        },
        feedback.into_feedback(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::FeedbackLevel;
    use pretty_assertions::assert_eq;

    fn prog(names: &[&str]) -> Progression {
        Progression::parse(names).unwrap()
    }

    fn pc(name: &str) -> PitchClass {
        name.parse().unwrap()
    }

    fn row(table: &SubstitutionTable, mode: Mode) -> &SubstitutionRow {
        table.rows.iter().find(|r| r.mode == mode).unwrap()
    }

    #[test]
    fn c_aeolian_table() {
        let table = build_substitution_table(&prog(&["Cm", "D°", "Eb"]), pc("C"), Mode::Aeolian);
        assert!(table.feedback.is_empty());
        let table = table.value;

        assert_eq!(table.numerals, vec!["ii", "III"]);
        assert_eq!(table.headers()[2], "Degrees (ii III)");
        assert_eq!(table.rows.len(), 7);

        let original = &table.rows[0];
        assert!(original.original);
        assert_eq!(original.mode_label(), "Aeolian (Original)");
        assert_eq!(original.relative_label(), "D# Major");
        assert_eq!(original.borrowed, vec!["D°", "Eb"]);
        assert_eq!(original.progression, vec!["Cm", "D°", "Eb"]);

        let dorian = row(&table, Mode::Dorian);
        assert_eq!(dorian.relative_label(), "A# Major");
        assert_eq!(dorian.borrowed, vec!["Cm7", "Dm7"]);
        assert_eq!(dorian.progression, vec!["Cm", "Cm7", "Dm7"]);

        let mixolydian = row(&table, Mode::Mixolydian);
        assert_eq!(mixolydian.relative_label(), "F Major");
        assert_eq!(mixolydian.borrowed, vec!["Gm7", "Am7"]);
    }

    #[test]
    fn borrowed_chords_come_from_the_relative_major() {
        let table =
            build_substitution_table(&prog(&["Dm7", "G7", "Cmaj7"]), pc("C"), Mode::Ionian).value;
        assert_eq!(table.numerals, vec!["iim7", "V7"]);

        // ii and V of A# major, not of C Dorian
        let dorian = row(&table, Mode::Dorian);
        assert_eq!(dorian.relative_major, pc("A#"));
        assert_eq!(dorian.borrowed, vec!["Cm7", "F7"]);
        assert_eq!(dorian.progression, vec!["Cm7", "F7", "Cmaj7"]);

        let lydian = row(&table, Mode::Lydian);
        assert_eq!(lydian.borrowed, vec!["Am7", "D7"]);
        assert_eq!(lydian.progression, vec!["Am7", "D7", "Cmaj7"]);
    }

    #[test]
    fn rows_follow_table_order_after_original() {
        let table = build_substitution_table(&prog(&["D", "C", "G", "Am"]), pc("C"), Mode::Lydian).value;
        let order: Vec<Mode> = table.rows.iter().map(|r| r.mode).collect();
        assert_eq!(
            order,
            vec![
                Mode::Lydian,
                Mode::Ionian,
                Mode::Dorian,
                Mode::Phrygian,
                Mode::Mixolydian,
                Mode::Aeolian,
                Mode::Locrian,
            ]
        );
        assert_eq!(table.rows.iter().filter(|r| r.original).count(), 1);
    }

    #[test]
    fn tonic_chords_stay_in_place() {
        let table = build_substitution_table(&prog(&["D", "C", "G", "Am"]), pc("C"), Mode::Lydian).value;
        assert_eq!(table.numerals, vec!["II", "V", "vi"]);

        let ionian = row(&table, Mode::Ionian);
        assert_eq!(ionian.borrowed, vec!["Dm7", "G7", "Am7"]);
        assert_eq!(ionian.progression, vec!["Dm7", "C", "G7", "Am7"]);

        let locrian = row(&table, Mode::Locrian);
        assert_eq!(locrian.relative_label(), "C# Major");
        assert_eq!(locrian.progression, vec!["D#m7", "C", "G#7", "A#m7"]);
    }

    #[test]
    fn all_tonic_progression_offers_all_but_first() {
        let result = build_substitution_table(&prog(&["C", "C7"]), pc("C"), Mode::Mixolydian);
        assert_eq!(result.warnings().count(), 0);
        assert_eq!(result.feedback.len(), 1);
        assert_eq!(result.feedback[0].level, FeedbackLevel::Info);

        let table = result.value;
        assert_eq!(table.numerals, vec!["I7"]);
        assert_eq!(table.rows[0].borrowed, vec!["C7"]);

        // Tonic chords are listed as borrowed but never rewritten
        let ionian = row(&table, Mode::Ionian);
        assert_eq!(ionian.borrowed, vec!["Cmaj7"]);
        assert_eq!(ionian.progression, vec!["C", "C7"]);

        let dorian = row(&table, Mode::Dorian);
        assert_eq!(dorian.borrowed, vec!["A#maj7"]);
        assert_eq!(dorian.progression, vec!["C", "C7"]);
    }

    #[test]
    fn unresolvable_chord_warns_and_is_kept() {
        // Ab is outside C Ionian, so its numeral is "(Ab)"
        let result = build_substitution_table(&prog(&["C", "Dm", "Ab"]), pc("C"), Mode::Ionian);
        assert_eq!(result.warnings().count(), 1);
        assert_eq!(result.feedback[0].chord_index, Some(2));

        let table = result.value;
        assert_eq!(table.numerals, vec!["ii", "(Ab)"]);
        assert_eq!(table.rows[0].borrowed, vec!["Dm", "Ab"]);

        let aeolian = row(&table, Mode::Aeolian);
        assert_eq!(aeolian.borrowed, vec!["Fm7"]);
        assert_eq!(aeolian.progression, vec!["C", "Fm7", "Ab"]);
    }

    #[test]
    fn building_twice_gives_identical_rows() {
        let p = prog(&["Cm", "D#", "G#", "A#"]);
        let first = build_substitution_table(&p, pc("A#"), Mode::Mixolydian);
        let second = build_substitution_table(&p, pc("A#"), Mode::Mixolydian);
        assert_eq!(first, second);
    }

    #[test]
    fn columns_use_requested_width() {
        let table = build_substitution_table(&prog(&["Cm", "D°", "Eb"]), pc("C"), Mode::Aeolian).value;
        let original = &table.rows[0];
        assert_eq!(original.borrowed_column(7), "D°      Eb     ");
        assert_eq!(original.progression_column(3), "Cm  D°  Eb ");
    }
}
