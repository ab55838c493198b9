//! The expected column layout of the ownership worksheet, as data.
//!
//! Headings are written and rewritten by humans, so fields are identified by
//! tolerant case-insensitive patterns rather than exact text. The built-in
//! table in [`game_fields`] matches the live worksheet; tests substitute
//! their own tables to exercise the locator and parser in isolation.

use std::sync::LazyLock;

use regex::Regex;

/// Row holding the field headings.
pub const HEADING_ROW: usize = 0;

/// First row of game data. Rows 1–2 hold notes and the owner sub-headings.
pub const DATA_BEGIN_ROW: usize = 3;

/// How a field's cell text converts to a typed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    /// The trimmed cell text itself.
    Text,
    /// The largest integer appearing anywhere in the text, or absent.
    MaxNumber,
    /// A free-text player-count range ("2-4", "3+", "4 even"), or absent.
    PlayerRange,
    /// True iff the cell is non-empty.
    Presence,
}

/// One expected logical column of the worksheet.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Stable field name, used to assemble [`crate::catalog::Game`] records.
    pub name: &'static str,
    /// Pattern the heading cell must match (searched, not anchored).
    pub heading: Regex,
    /// How each cell in the field's span converts.
    pub converter: Converter,
    /// For fan-out fields, the row whose cells name the sub-columns.
    pub sub_heading_row: Option<usize>,
    /// Required fields gate the whole row: an empty cell skips it.
    pub required: bool,
}

impl FieldSpec {
    pub fn new(name: &'static str, heading: Regex, converter: Converter) -> Self {
        Self {
            name,
            heading,
            converter,
            sub_heading_row: None,
            required: false,
        }
    }

    /// Mark the field as required (rows missing it are skipped).
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Make the field fan out over a run of sub-columns named by
    /// `sub_heading_row`.
    pub fn fan_out(mut self, sub_heading_row: usize) -> Self {
        self.sub_heading_row = Some(sub_heading_row);
        self
    }
}

fn heading_pattern(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){pattern}")).expect("hardcoded heading pattern")
}

static GAME_FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
    vec![
        FieldSpec::new("title", heading_pattern("title"), Converter::Text).required(),
        FieldSpec::new("platform", heading_pattern("platform"), Converter::Text),
        FieldSpec::new("max_players", heading_pattern("max.+player"), Converter::MaxNumber),
        FieldSpec::new(
            "good_players",
            heading_pattern("good.+player"),
            Converter::PlayerRange,
        ),
        FieldSpec::new("owns", heading_pattern("who.+owns"), Converter::Presence).fan_out(2),
    ]
});

/// The built-in field table for the game-ownership worksheet.
pub fn game_fields() -> &'static [FieldSpec] {
    &GAME_FIELDS
}
