//! Model to entity mappers
//!
//! Conversions from database rows (`models`) to domain entities
//! (`club-core`). Inserts bind entity fields directly in the repositories,
//! so only the read direction lives here.

mod chat_room;
mod club;
mod creation_request;
mod join_request;
mod member;
mod role;
mod user;

pub use role::role_from_parts;
