//! Value objects - immutable types that represent domain concepts

mod snowflake;
mod user_role;

pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
pub use user_role::{UnknownRole, UserRole};
