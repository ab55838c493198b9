//! Parses the game-ownership worksheet into a typed catalog.
//!
//! This crate owns all worksheet-to-catalog logic: locating logical fields
//! in the heading row via tolerant pattern matching, expanding the "who
//! owns" fan-out columns from their sub-heading row, converting free-text
//! cells to typed values, and reconciling the good-players range against
//! the max-players count. It consumes an already-fetched grid of cell text
//! and performs no I/O; fetching and credentials belong to the caller.

pub mod catalog;
pub mod grid;
pub mod locate;
pub mod parse;
pub mod schema;

pub use catalog::{Catalog, Game, fixup, parse_catalog, parse_catalog_with};
pub use grid::Grid;
pub use locate::{ColumnSpan, SchemaError, locate_columns};
pub use parse::{CellValue, FieldValue, max_number, parse_row, player_range};
pub use schema::{Converter, DATA_BEGIN_ROW, FieldSpec, HEADING_ROW, game_fields};
