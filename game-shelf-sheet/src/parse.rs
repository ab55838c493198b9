//! Converts located cell spans into typed field values.
//!
//! Cell text is human-entered, so conversion over-matches rather than
//! enforcing a grammar: any digits in a cell count as numbers, and text with
//! no usable numbers converts to "absent" rather than an error. Strictness
//! lives one layer down, in the worksheet's shape ([`crate::locate`]).

use std::collections::BTreeMap;
use std::sync::LazyLock;

use game_shelf_core::{Bound, Range};
use regex::Regex;

use crate::grid::Grid;
use crate::locate::ColumnSpan;
use crate::schema::{Converter, FieldSpec};

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[0-9]+").expect("hardcoded pattern"));
static NUMBER_PLUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\+").expect("hardcoded pattern"));

/// A single converted cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Number(Option<u32>),
    Players(Option<Range>),
    Present(bool),
}

/// A converted field: one cell for ordinary fields, a sub-heading → cell
/// mapping for fan-out fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Single(CellValue),
    FannedOut(BTreeMap<String, CellValue>),
}

impl Converter {
    /// Convert one cell's trimmed text.
    pub fn convert(&self, text: &str) -> CellValue {
        match self {
            Self::Text => CellValue::Text(text.to_string()),
            Self::MaxNumber => CellValue::Number(max_number(text)),
            Self::PlayerRange => CellValue::Players(player_range(text)),
            Self::Presence => CellValue::Present(!text.is_empty()),
        }
    }
}

fn numbers(text: &str) -> impl Iterator<Item = u32> + '_ {
    NUMBER
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
}

/// The largest integer appearing anywhere in `text`, if any.
pub fn max_number(text: &str) -> Option<u32> {
    numbers(text).max()
}

/// Parse a free-text player-count range.
///
/// An "even" token anywhere sets the multiple-of-2 constraint. `"N+"`
/// produces an open-ended range from N; otherwise the range spans the
/// smallest to the largest integer found. Text with no integers asserts no
/// range at all.
///
/// # Examples
///
/// ```
/// use game_shelf_core::{Bound, Range};
/// use game_shelf_sheet::parse::player_range;
///
/// assert_eq!(player_range("2-4 players"), Some(Range::new(2, 4)));
/// assert_eq!(player_range("3+ players"), Some(Range::new(3, Bound::Greatest)));
/// assert_eq!(player_range("4 even"), Some(Range::with_multiple_of(4, 4, 2)));
/// assert_eq!(player_range("no limit"), None);
/// ```
pub fn player_range(text: &str) -> Option<Range> {
    let multiple_of = if text.to_lowercase().contains("even") {
        2
    } else {
        1
    };

    if let Some(caps) = NUMBER_PLUS.captures(text) {
        if let Ok(low) = caps[1].parse::<u32>() {
            return Some(Range::with_multiple_of(low, Bound::Greatest, multiple_of));
        }
    }

    let mut rest = numbers(text);
    let first = rest.next()?;
    let (min, max) = rest.fold((first, first), |(min, max), n| (min.min(n), max.max(n)));
    Some(Range::with_multiple_of(min, max, multiple_of))
}

/// Convert one data row into field values, in field-table order.
///
/// Returns `None` when a required field has an empty cell anywhere in its
/// span; such rows are blank/separator content, skipped without comment.
pub fn parse_row(
    grid: &Grid,
    row: usize,
    fields: &[FieldSpec],
    spans: &[ColumnSpan],
) -> Option<Vec<FieldValue>> {
    let mut values = Vec::with_capacity(fields.len());

    for (field, span) in fields.iter().zip(spans) {
        if field.required && (span.begin..span.end).any(|col| grid.cell(row, col).is_empty()) {
            return None;
        }

        let value = match &span.sub_headings {
            None => FieldValue::Single(field.converter.convert(grid.cell(row, span.begin))),
            Some(names) => FieldValue::FannedOut(
                names
                    .iter()
                    .cloned()
                    .zip(
                        (span.begin..span.end)
                            .map(|col| field.converter.convert(grid.cell(row, col))),
                    )
                    .collect(),
            ),
        };
        values.push(value);
    }

    Some(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::game_fields;

    #[test]
    fn max_number_over_matches() {
        assert_eq!(max_number("4"), Some(4));
        assert_eq!(max_number("up to 6 players (8 with expansion)"), Some(8));
        assert_eq!(max_number("lots"), None);
        assert_eq!(max_number(""), None);
    }

    #[test]
    fn player_range_dash_form() {
        assert_eq!(player_range("2-4 players"), Some(Range::new(2, 4)));
        assert_eq!(player_range("2 to 4"), Some(Range::new(2, 4)));
    }

    #[test]
    fn player_range_open_ended() {
        assert_eq!(player_range("3+ players"), Some(Range::new(3, Bound::Greatest)));
        // The "+" form wins even when other numbers appear
        assert_eq!(player_range("3+ (best with 5)"), Some(Range::new(3, Bound::Greatest)));
    }

    #[test]
    fn player_range_even_constraint() {
        assert_eq!(player_range("4 even"), Some(Range::with_multiple_of(4, 4, 2)));
        assert_eq!(
            player_range("2-8 EVEN teams"),
            Some(Range::with_multiple_of(2, 8, 2))
        );
    }

    #[test]
    fn player_range_absent_when_no_numbers() {
        assert_eq!(player_range("no limit"), None);
        assert_eq!(player_range(""), None);
    }

    #[test]
    fn single_number_is_a_point_range() {
        assert_eq!(player_range("4"), Some(Range::new(4, 4)));
    }

    #[test]
    fn huge_literal_with_even_token_degrades_to_an_empty_range() {
        // u32::MAX has no even multiple above it; the cell must come back as
        // an empty range (which the fixup later drops), never a panic.
        let range = player_range("4294967295 even").unwrap();
        assert!(range.is_empty());

        let open = player_range("4294967295+ even").unwrap();
        assert!(!open.contains(u32::MAX));
    }

    #[test]
    fn converter_dispatch() {
        assert_eq!(
            Converter::Text.convert("Catan"),
            CellValue::Text("Catan".to_string())
        );
        assert_eq!(Converter::MaxNumber.convert("4-ish"), CellValue::Number(Some(4)));
        assert_eq!(Converter::Presence.convert("x"), CellValue::Present(true));
        assert_eq!(Converter::Presence.convert(""), CellValue::Present(false));
    }

    fn grid(rows: &[&[&str]]) -> Grid {
        Grid::new(
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        )
    }

    fn located() -> (Grid, Vec<ColumnSpan>) {
        let g = grid(&[
            &["Title", "Platform", "Max Players", "Good # Players", "Who Owns", ""],
            &[],
            &["", "", "", "", "Alice", "Bob"],
            &["Catan", "tabletop", "4", "3-4", "x", ""],
            &["", "", "", "", "", ""],
        ]);
        let spans = crate::locate::locate_columns(&g, game_fields()).unwrap();
        (g, spans)
    }

    #[test]
    fn parses_a_full_row() {
        let (g, spans) = located();
        let values = parse_row(&g, 3, game_fields(), &spans).unwrap();

        assert_eq!(values[0], FieldValue::Single(CellValue::Text("Catan".to_string())));
        assert_eq!(values[2], FieldValue::Single(CellValue::Number(Some(4))));
        assert_eq!(
            values[3],
            FieldValue::Single(CellValue::Players(Some(Range::new(3, 4))))
        );

        let FieldValue::FannedOut(owns) = &values[4] else {
            panic!("owns should fan out");
        };
        assert_eq!(owns.get("Alice"), Some(&CellValue::Present(true)));
        assert_eq!(owns.get("Bob"), Some(&CellValue::Present(false)));
    }

    #[test]
    fn blank_required_cell_skips_the_row() {
        let (g, spans) = located();
        assert_eq!(parse_row(&g, 4, game_fields(), &spans), None);
    }
}
