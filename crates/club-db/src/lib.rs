//! # club-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `club-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Model to entity mappers
//! - Repository implementations
//!
//! Role permissions live in a per-key boolean table; repositories assemble
//! them into a `Permissions` set when loading roles.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use club_db::pool::{create_pool, DatabaseConfig};
//! use club_db::repositories::PgClubRepository;
//! use club_core::traits::ClubRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let club_repo = PgClubRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgChatRoomRepository, PgClubRepository, PgCreationRequestRepository, PgJoinRequestRepository,
    PgMemberRepository, PgRoleRepository, PgUserRepository,
};
