use tracing::{debug, info};

use crate::chords::is_compatible;
use crate::error::AnalysisError;
use crate::modes::Mode;
use crate::types::{CandidateMatch, ModeDetection, PitchClass, Progression};

/// What a scoring rule gets to look at for one surviving candidate.
pub struct CandidateView<'a> {
    pub tonic: PitchClass,
    /// 0-based scale degree of each chord, in order
    pub degrees: &'a [usize],
    pub progression: &'a Progression,
}

/// A named, weighted cadence heuristic.
///
/// `count` returns how many times the rule fires; most rules fire at most once.
pub struct ScoringRule {
    pub name: &'static str,
    pub weight: f64,
    pub count: fn(&CandidateView<'_>) -> u32,
}

/// The scorer's rule set. Bonuses are independent and all of them add up.
pub static SCORING_RULES: [ScoringRule; 9] = [
    ScoringRule {
        name: "tonic_start",
        weight: 3.0,
        count: tonic_start,
    },
    ScoringRule {
        name: "authentic_cadence",
        weight: 2.0,
        count: authentic_cadences,
    },
    ScoringRule {
        name: "tonic_end",
        weight: 1.0,
        count: tonic_end,
    },
    ScoringRule {
        name: "dominant_present",
        weight: 0.5,
        count: dominant_present,
    },
    ScoringRule {
        name: "root_is_tonic",
        weight: 2.0,
        count: root_is_tonic,
    },
    ScoringRule {
        name: "ii_v_i_tail",
        weight: 5.0,
        count: ii_v_i_tail,
    },
    ScoringRule {
        name: "mixolydian_signature",
        weight: 5.0,
        count: mixolydian_signature,
    },
    ScoringRule {
        name: "tonic_dominant_seventh",
        weight: 2.0,
        count: tonic_dominant_seventh,
    },
    ScoringRule {
        name: "anatole_turnaround",
        weight: 4.0,
        count: anatole_turnaround,
    },
];

const TONIC: usize = 0;
const SUPERTONIC: usize = 1;
const SUBDOMINANT: usize = 3;
const DOMINANT: usize = 4;
const SUBMEDIANT: usize = 5;
const SUBTONIC: usize = 6;

fn tonic_start(c: &CandidateView<'_>) -> u32 {
    u32::from(c.degrees.first() == Some(&TONIC))
}

fn authentic_cadences(c: &CandidateView<'_>) -> u32 {
    c.degrees
        .windows(2)
        .filter(|pair| **pair == [DOMINANT, TONIC])
        .count() as u32
}

fn tonic_end(c: &CandidateView<'_>) -> u32 {
    u32::from(c.degrees.last() == Some(&TONIC))
}

fn dominant_present(c: &CandidateView<'_>) -> u32 {
    u32::from(c.degrees.contains(&DOMINANT))
}

fn root_is_tonic(c: &CandidateView<'_>) -> u32 {
    u32::from(c.progression.first().map(|e| e.chord.root) == Some(c.tonic))
}

fn ii_v_i_tail(c: &CandidateView<'_>) -> u32 {
    u32::from(c.degrees.ends_with(&[SUPERTONIC, DOMINANT, TONIC]))
}

// Reads the chord text as written: "Cmaj7" and "CM7" are not equivalent here.
fn mixolydian_signature(c: &CandidateView<'_>) -> u32 {
    let names = c.progression;
    u32::from(
        c.degrees.starts_with(&[TONIC, SUBDOMINANT, SUBTONIC])
            && names.name_at(0).ends_with('7')
            && names.name_at(1).ends_with("maj7")
            && names.name_at(2).ends_with("maj7"),
    )
}

// Also textual; any name ending in "7" counts, "Cmaj7" included.
fn tonic_dominant_seventh(c: &CandidateView<'_>) -> u32 {
    u32::from(c.degrees.first() == Some(&TONIC) && c.progression.name_at(0).ends_with('7'))
}

fn anatole_turnaround(c: &CandidateView<'_>) -> u32 {
    u32::from(c.degrees.starts_with(&[TONIC, SUBMEDIANT, SUPERTONIC, DOMINANT]))
}

/// Sum every rule's weight times its count.
pub fn score(candidate: &CandidateView<'_>) -> f64 {
    SCORING_RULES
        .iter()
        .map(|rule| rule.weight * f64::from((rule.count)(candidate)))
        .sum()
}

/// Degrees of every chord in `mode` at `tonic`, or `None` as soon as one
/// chord falls outside the mode or has the wrong quality for its degree.
pub fn degree_path(progression: &Progression, tonic: PitchClass, mode: Mode) -> Option<Vec<usize>> {
    let qualities = &mode.spec().qualities;
    let mut degrees = Vec::with_capacity(progression.len());

    for entry in progression {
        let degree = mode.degree_of(tonic.interval_to(entry.chord.root))?;
        if !is_compatible(entry.chord.quality, qualities[degree]) {
            return None;
        }
        degrees.push(degree);
    }

    Some(degrees)
}

/// Every full match, scored, in enumeration order: tonic ascending from C,
/// modes in table order.
pub fn candidates(progression: &Progression) -> Vec<CandidateMatch> {
    let mut matches = Vec::new();

    for tonic in PitchClass::all() {
        for mode in Mode::ALL {
            let Some(degrees) = degree_path(progression, tonic, mode) else {
                continue;
            };
            let score = score(&CandidateView {
                tonic,
                degrees: &degrees,
                progression,
            });
            debug!(%tonic, %mode, score, ?degrees, "candidate survived");
            matches.push(CandidateMatch {
                tonic,
                mode,
                score,
                degrees,
            });
        }
    }

    matches
}

/// Every full match, best score first. Equal scores keep enumeration order.
pub fn rank_candidates(progression: &Progression) -> Vec<CandidateMatch> {
    let mut ranked = candidates(progression);
    // sort_by is stable
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Detect the most probable (tonic, mode) for a progression.
///
/// With a `tonic_hint`, the first full match on that tonic wins regardless
/// of score. Otherwise the highest score wins, and ties go to the first
/// candidate enumerated. An empty progression gives C Ionian.
pub fn detect_mode(
    progression: &Progression,
    tonic_hint: Option<PitchClass>,
) -> Result<ModeDetection, AnalysisError> {
    if progression.is_empty() {
        return Ok(ModeDetection::fallback());
    }

    let matches = candidates(progression);

    if let Some(hint) = tonic_hint {
        if let Some(m) = matches.iter().find(|m| m.tonic == hint) {
            info!(tonic = %m.tonic, mode = %m.mode, score = m.score, "mode chosen by tonic hint");
            return Ok(ModeDetection {
                tonic: m.tonic,
                mode: m.mode,
                score: m.score,
                from_hint: true,
            });
        }
        debug!(%hint, "no full match on hinted tonic, falling back to score");
    }

    let mut best: Option<&CandidateMatch> = None;
    for m in &matches {
        if best.map_or(true, |b| m.score > b.score) {
            best = Some(m);
        }
    }

    let best = best.ok_or(AnalysisError::NoModeFound)?;
    info!(
        tonic = %best.tonic,
        mode = %best.mode,
        score = best.score,
        survivors = matches.len(),
        "mode detected"
    );

    Ok(ModeDetection {
        tonic: best.tonic,
        mode: best.mode,
        score: best.score,
        from_hint: false,
    })
}
