//! Text rendering for analysis reports.

use anyhow::{Context, Result};
use modal_analysis::numerals::{diatonic_seventh, ROMAN_NUMERALS};
use modal_analysis::{
    CandidateMatch, Feedback, FeedbackLevel, ModalAnalysis, Mode, PitchClass, SubstitutionTable,
};
use owo_colors::OwoColorize;
use prettytable::{format, Cell, Row, Table};

pub struct Renderer {
    width: usize,
    color: bool,
}

impl Renderer {
    pub fn new(width: usize, color: bool) -> Self {
        Self { width, color }
    }

    /// Heading lines followed by the substitution grid.
    pub fn report(&self, analysis: &ModalAnalysis) -> Result<String> {
        let detection = &analysis.detection;
        let mut output = String::new();

        output.push_str(&format!("{} {}\n", self.label("Tonic:"), analysis.tonic_label));
        output.push_str(&format!(
            "Analyzing progression '{}'\n",
            analysis.progression.join(" -> ")
        ));
        output.push_str(&format!(
            "{} {}\n",
            self.label("Most probable mode :"),
            self.value(&format!("{} {}", detection.tonic, detection.mode))
        ));
        output.push_str(&self.substitution_table(&analysis.table)?);

        Ok(output)
    }

    pub fn substitution_table(&self, table: &SubstitutionTable) -> Result<String> {
        let mut grid = Table::new();
        grid.set_format(*format::consts::FORMAT_DEFAULT);
        grid.set_titles(Row::new(
            table.headers().iter().map(|h| Cell::new(h)).collect(),
        ));

        for row in &table.rows {
            grid.add_row(Row::new(vec![
                Cell::new(&row.mode_label()),
                Cell::new(&row.relative_label()),
                Cell::new(&row.borrowed_column(self.width)),
                Cell::new(&row.progression_column(self.width)),
            ]));
        }

        to_string(&grid)
    }

    /// Top `limit` ranked candidates.
    pub fn candidates(&self, ranked: &[CandidateMatch], limit: usize) -> Result<String> {
        let mut grid = Table::new();
        grid.set_format(*format::consts::FORMAT_CLEAN);
        grid.set_titles(Row::new(vec![
            Cell::new("#"),
            Cell::new("Tonic"),
            Cell::new("Mode"),
            Cell::new("Score"),
            Cell::new("Degrees"),
        ]));

        for (rank, candidate) in ranked.iter().take(limit).enumerate() {
            let degrees = candidate
                .degrees
                .iter()
                .map(|&d| ROMAN_NUMERALS[d])
                .collect::<Vec<_>>()
                .join(" ");
            grid.add_row(Row::new(vec![
                Cell::new(&(rank + 1).to_string()).style_spec("r"),
                Cell::new(candidate.tonic.name()),
                Cell::new(candidate.mode.name()),
                Cell::new(&format!("{:.1}", candidate.score)).style_spec("r"),
                Cell::new(&degrees),
            ]));
        }

        let mut output = format!(
            "{} ({} of {})\n",
            self.label("Candidates"),
            limit.min(ranked.len()),
            ranked.len()
        );
        output.push_str(&to_string(&grid)?);
        Ok(output)
    }

    /// The seven modes with their intervals and diatonic sevenths on C.
    pub fn modes(&self) -> Result<String> {
        let mut grid = Table::new();
        grid.set_format(*format::consts::FORMAT_DEFAULT);
        grid.set_titles(Row::new(vec![
            Cell::new("Mode"),
            Cell::new("Intervals"),
            Cell::new("Sevenths on C"),
            Cell::new("Relative major"),
        ]));

        for mode in Mode::ALL {
            let spec = mode.spec();
            let intervals = spec
                .intervals
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            let chords: Vec<String> = (1..=7u8)
                .filter_map(|d| diatonic_seventh(d, PitchClass::C, mode))
                .map(|c| c.to_string())
                .collect();

            grid.add_row(Row::new(vec![
                Cell::new(mode.name()),
                Cell::new(&intervals),
                Cell::new(&modal_analysis::numerals::format_chord_column(&chords, self.width)),
                Cell::new(&format!("{} Major", mode.relative_major(PitchClass::C))),
            ]));
        }

        to_string(&grid)
    }

    pub fn feedback(&self, feedback: &[Feedback]) -> String {
        let mut output = String::new();
        for fb in feedback {
            let tag = match fb.level {
                FeedbackLevel::Warning => self.warning("Warning:"),
                FeedbackLevel::Info => self.label("Note:"),
            };
            output.push_str(&format!("{} {}", tag, fb.message));
            if let Some(suggestion) = &fb.suggestion {
                output.push_str(&format!(" {}", suggestion));
            }
            output.push('\n');
        }
        output
    }

    pub fn warning(&self, text: &str) -> String {
        if self.color {
            text.bright_yellow().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn label(&self, text: &str) -> String {
        if self.color {
            text.bright_cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn value(&self, text: &str) -> String {
        if self.color {
            text.bright_green().bold().to_string()
        } else {
            text.to_string()
        }
    }
}

fn to_string(table: &Table) -> Result<String> {
    let mut output = Vec::new();
    table.print(&mut output)?;
    String::from_utf8(output).context("Failed to convert table to string")
}
