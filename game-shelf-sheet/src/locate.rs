//! Resolves each schema field to the physical columns that hold it.
//!
//! A single left-to-right scan of the heading row drives everything. Most
//! fields own exactly one column; a fan-out field owns a contiguous run of
//! columns whose heading cells are empty but whose sub-heading cells are
//! not. The scan is tolerant about heading wording (patterns, not exact
//! text) and strict about shape: a pattern matching zero or two headings,
//! or duplicate sub-headings within one run, is fatal.

use std::collections::HashSet;

use thiserror::Error;

use crate::grid::Grid;
use crate::schema::{FieldSpec, HEADING_ROW};

/// Fatal worksheet-shape failures. No partial result is produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("no heading matches \"{pattern}\" in the worksheet")]
    MissingHeading { pattern: String },

    #[error("multiple headings match \"{pattern}\" in the worksheet")]
    MultipleMatches { pattern: String },

    #[error("multiple columns under \"{heading}\" have the same sub-heading \"{sub_heading}\"")]
    DuplicateSubHeading { heading: String, sub_heading: String },
}

/// The physical columns resolved for one field: the half-open span
/// `[begin, end)` plus, for fan-out fields, the sub-column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpan {
    pub begin: usize,
    pub end: usize,
    pub sub_headings: Option<Vec<String>>,
}

/// Scanner state for the fan-out run currently being extended, if any.
///
/// A non-empty heading cell always closes the open run; an empty heading
/// cell extends it while the sub-heading row keeps supplying names, and a
/// gap in the sub-heading row closes it for good.
#[derive(Clone, Copy)]
enum SpanState {
    Closed,
    Open { field: usize, sub_row: usize },
}

/// Resolve every field to a [`ColumnSpan`], in field-table order.
pub fn locate_columns(grid: &Grid, fields: &[FieldSpec]) -> Result<Vec<ColumnSpan>, SchemaError> {
    // Sub-heading rows may run wider than the heading row; scan far enough
    // to see them (missing heading cells read as empty).
    let width = fields
        .iter()
        .filter_map(|field| field.sub_heading_row)
        .map(|row| grid.row_len(row))
        .chain([grid.row_len(HEADING_ROW)])
        .max()
        .unwrap_or(0);

    let mut spans: Vec<Option<(usize, usize)>> = vec![None; fields.len()];
    let mut state = SpanState::Closed;

    for col in 0..width {
        let heading = grid.cell(HEADING_ROW, col);
        if !heading.is_empty() {
            state = SpanState::Closed;
            for (index, field) in fields.iter().enumerate() {
                if !field.heading.is_match(heading) {
                    continue;
                }
                if spans[index].is_some() {
                    return Err(SchemaError::MultipleMatches {
                        pattern: field.heading.as_str().to_string(),
                    });
                }
                spans[index] = Some((col, col + 1));
                if let Some(sub_row) = field.sub_heading_row {
                    state = SpanState::Open {
                        field: index,
                        sub_row,
                    };
                }
                break;
            }
        } else if let SpanState::Open { field, sub_row } = state {
            if grid.cell(sub_row, col).is_empty() {
                state = SpanState::Closed;
            } else if let Some((_, end)) = spans[field].as_mut() {
                *end = col + 1;
            }
        }
    }

    fields
        .iter()
        .zip(&spans)
        .map(|(field, span)| {
            let (begin, end) = span.ok_or_else(|| SchemaError::MissingHeading {
                pattern: field.heading.as_str().to_string(),
            })?;

            let sub_headings = match field.sub_heading_row {
                None => None,
                Some(sub_row) => {
                    let names: Vec<String> = (begin..end)
                        .map(|col| grid.cell(sub_row, col).to_string())
                        .collect();

                    let mut seen = HashSet::new();
                    for name in &names {
                        if !seen.insert(name.as_str()) {
                            return Err(SchemaError::DuplicateSubHeading {
                                heading: grid.cell(HEADING_ROW, begin).to_string(),
                                sub_heading: name.clone(),
                            });
                        }
                    }
                    Some(names)
                }
            };

            log::trace!(
                "field {} resolved to columns {}..{}",
                field.name,
                begin,
                end
            );

            Ok(ColumnSpan {
                begin,
                end,
                sub_headings,
            })
        })
        .collect()
}
