//! Core value types for the game-shelf catalog.
//!
//! This crate defines the `Range` player-count interval and its `Bound`
//! sentinel type without any parsing or I/O dependencies. Consumers use
//! these types directly for display, serialization, or passing to
//! `game-shelf-sheet` which produces them from spreadsheet text.

pub mod bound;
pub mod range;

pub use bound::Bound;
pub use range::Range;
