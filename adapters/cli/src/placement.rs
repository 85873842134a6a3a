//! Parsing of `--tower kind:column,row` placement orders.

use std::str::FromStr;

use lane_defence_core::CellCoord;
use thiserror::Error;

const KIND_DELIMITER: char = ':';
const COORDINATE_DELIMITER: char = ',';

/// Tower the runner builds before the first wave starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TowerOrder {
    /// Textual tower type, resolved by the simulation when the order is placed.
    pub(crate) kind: String,
    /// Grid cell the tower should occupy.
    pub(crate) cell: CellCoord,
}

/// Errors that can occur while parsing a placement order.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub(crate) enum TowerOrderError {
    /// The order was empty or contained only whitespace.
    #[error("tower order was empty")]
    Empty,
    /// The order did not separate the type from the cell with `:`.
    #[error("tower order `{0}` is missing `:` between type and cell")]
    MissingKind(String),
    /// The cell could not be parsed as `column,row`.
    #[error("could not parse cell `{0}`, expected `column,row`")]
    InvalidCell(String),
}

impl FromStr for TowerOrder {
    type Err = TowerOrderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TowerOrderError::Empty);
        }

        let (kind, cell) = trimmed
            .split_once(KIND_DELIMITER)
            .ok_or_else(|| TowerOrderError::MissingKind(trimmed.to_owned()))?;
        let kind = kind.trim();
        if kind.is_empty() {
            return Err(TowerOrderError::MissingKind(trimmed.to_owned()));
        }

        Ok(Self {
            kind: kind.to_ascii_lowercase(),
            cell: parse_cell(cell)?,
        })
    }
}

fn parse_cell(cell: &str) -> Result<CellCoord, TowerOrderError> {
    let invalid = || TowerOrderError::InvalidCell(cell.trim().to_owned());
    let (column, row) = cell.split_once(COORDINATE_DELIMITER).ok_or_else(invalid)?;
    let column = column.trim().parse::<i32>().map_err(|_| invalid())?;
    let row = row.trim().parse::<i32>().map_err(|_| invalid())?;
    Ok(CellCoord::new(column, row))
}
