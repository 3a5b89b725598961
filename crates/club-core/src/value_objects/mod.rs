//! Value objects - immutable domain primitives

mod identity;
mod permissions;
mod snowflake;

pub use identity::Identity;
pub use permissions::{Permissions, PERMISSION_KEYS};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
