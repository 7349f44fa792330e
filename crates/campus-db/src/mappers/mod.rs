//! Model to entity mappers
//!
//! Text columns holding enum values are parsed here; a value the domain does
//! not know is reported as a storage error instead of being defaulted.

mod event;
mod rso;
mod user;

use std::str::FromStr;

use campus_core::DomainError;

fn parse_column<T: FromStr>(column: &str, value: &str) -> Result<T, DomainError> {
    value
        .parse()
        .map_err(|_| DomainError::Storage(format!("unexpected value '{value}' in column {column}")))
}
