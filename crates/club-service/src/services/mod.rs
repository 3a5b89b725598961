//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod club;
pub mod context;
pub mod error;
pub mod member;
pub mod permission;
pub mod role;

// Re-export all services for convenience
pub use auth::AuthService;
pub use club::ClubService;
pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
pub use member::MemberService;
pub use permission::PermissionService;
pub use role::RoleService;
