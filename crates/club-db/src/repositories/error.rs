//! Error handling utilities for repositories

use club_core::error::DomainError;
use club_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "user not found" error
pub fn user_not_found(id: Snowflake) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Create a "club not found" error
pub fn club_not_found(id: Snowflake) -> DomainError {
    DomainError::ClubNotFound(id)
}

/// Create a "role not found" error
pub fn role_not_found(id: Snowflake) -> DomainError {
    DomainError::RoleNotFound(id)
}

/// Create a "membership not found" error
pub fn membership_not_found() -> DomainError {
    DomainError::MembershipNotFound
}
