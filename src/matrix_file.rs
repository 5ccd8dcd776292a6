//! Plain-text generator matrix files
//!
//! The file starts with `cols rows` followed by `rows` strings of `cols`
//! characters from `{0, 1}`. Tokens are separated by any whitespace.

use crate::linear_algebra::{BinaryMatrix, BinaryVector, LinalgError};
use std::path::Path;
use thiserror::Error;

/// Upper bound on rows reserved up front; the header count is untrusted
const MAX_PREALLOCATED_ROWS: usize = 1024;

#[derive(Error, Debug)]
pub enum MatrixFileError {
    #[error("Could not read matrix file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid matrix row: {0}")]
    InvalidInput(#[from] LinalgError),
    #[error("Malformed header: {0}")]
    MalformedHeader(String),
    #[error("Expected {expected} rows, found {found}")]
    MissingRows { expected: usize, found: usize },
    #[error("Row {row} has {found} columns, expected {expected}")]
    RowLength { row: usize, expected: usize, found: usize },
}

/// Parse a generator matrix from the text of a matrix file
pub fn parse_matrix(text: &str) -> Result<BinaryMatrix, MatrixFileError> {
    let mut tokens = text.split_whitespace();
    let cols = parse_dimension(tokens.next(), "column count")?;
    let rows = parse_dimension(tokens.next(), "row count")?;

    let mut data = Vec::with_capacity(rows.min(MAX_PREALLOCATED_ROWS));
    for row in 0..rows {
        let token = tokens.next().ok_or(MatrixFileError::MissingRows {
            expected: rows,
            found: row,
        })?;
        let vector: BinaryVector = token.parse()?;
        if vector.len() != cols {
            return Err(MatrixFileError::RowLength {
                row,
                expected: cols,
                found: vector.len(),
            });
        }
        data.push(vector);
    }

    let mut matrix = BinaryMatrix::from_rows(data)?;
    if matrix.is_empty() {
        matrix = BinaryMatrix::new(0, cols);
    }
    Ok(matrix)
}

fn parse_dimension(token: Option<&str>, what: &str) -> Result<usize, MatrixFileError> {
    let token = token.ok_or_else(|| MatrixFileError::MalformedHeader(format!("missing {what}")))?;
    token
        .parse()
        .map_err(|_| MatrixFileError::MalformedHeader(format!("{what} {token:?} is not a number")))
}

/// Read and parse a generator matrix file
pub fn read_matrix_file<P: AsRef<Path>>(path: P) -> Result<BinaryMatrix, MatrixFileError> {
    let text = std::fs::read_to_string(path)?;
    parse_matrix(&text)
}
