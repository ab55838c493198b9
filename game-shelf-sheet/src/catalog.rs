//! Assembles parsed rows into the game catalog.
//!
//! One locate pass resolves the column layout, then every data row runs
//! through the field parser and the good-players fixup. Rows without a
//! title are separator content and drop out silently.

use std::collections::{BTreeMap, BTreeSet};

use game_shelf_core::{Bound, Range};
use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::locate::{SchemaError, locate_columns};
use crate::parse::{CellValue, FieldValue, parse_row};
use crate::schema::{DATA_BEGIN_ROW, FieldSpec, game_fields};

/// One game row from the worksheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub title: String,
    /// Free text; empty when the cell was blank.
    pub platform: String,
    pub max_players: Option<u32>,
    pub good_players: Option<Range>,
    /// Ownership flag per owner column.
    pub owns: BTreeMap<String, bool>,
}

/// The parsed worksheet: every owner column's name plus the games in row
/// order. Duplicate titles are kept; deduplication is not this layer's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub owner_names: BTreeSet<String>,
    pub games: Vec<Game>,
}

/// Reconcile a game's good-players range against its max-players count.
///
/// The parsed range is narrowed against the implicit bounds (1, max
/// players). If that comes out empty, the cell text was almost certainly
/// not a player-count range (stray numbers), so the field degrades to
/// absent instead of carrying a nonsensical empty range.
pub fn fixup(mut game: Game) -> Game {
    let Some(good_players) = game.good_players else {
        return game;
    };

    let max = game.max_players.map_or(Bound::Greatest, Bound::Finite);
    let narrowed = good_players.narrow(1, max);
    game.good_players = (!narrowed.is_empty()).then_some(narrowed);
    game
}

fn game_from_values(fields: &[FieldSpec], values: Vec<FieldValue>) -> Game {
    let mut game = Game::default();
    for (field, value) in fields.iter().zip(values) {
        match (field.name, value) {
            ("title", FieldValue::Single(CellValue::Text(text))) => game.title = text,
            ("platform", FieldValue::Single(CellValue::Text(text))) => game.platform = text,
            ("max_players", FieldValue::Single(CellValue::Number(n))) => game.max_players = n,
            ("good_players", FieldValue::Single(CellValue::Players(range))) => {
                game.good_players = range;
            }
            ("owns", FieldValue::FannedOut(cells)) => {
                game.owns = cells
                    .into_iter()
                    .map(|(name, cell)| (name, matches!(cell, CellValue::Present(true))))
                    .collect();
            }
            _ => {}
        }
    }
    game
}

/// Parse raw worksheet rows into a [`Catalog`] using the built-in schema.
pub fn parse_catalog(rows: Vec<Vec<String>>) -> Result<Catalog, SchemaError> {
    parse_catalog_with(&Grid::new(rows), game_fields(), DATA_BEGIN_ROW)
}

/// Parse an already-wrapped grid with an explicit schema and data-start row.
pub fn parse_catalog_with(
    grid: &Grid,
    fields: &[FieldSpec],
    data_begin_row: usize,
) -> Result<Catalog, SchemaError> {
    let spans = locate_columns(grid, fields)?;

    let owner_names: BTreeSet<String> = spans
        .iter()
        .filter_map(|span| span.sub_headings.as_ref())
        .flatten()
        .cloned()
        .collect();

    let mut games = Vec::new();
    for row in data_begin_row..grid.row_count() {
        match parse_row(grid, row, fields, &spans) {
            Some(values) => games.push(fixup(game_from_values(fields, values))),
            None => log::debug!("row {row} has no required fields, skipping"),
        }
    }

    Ok(Catalog { owner_names, games })
}
