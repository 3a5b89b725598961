//! Data transfer objects for workflow requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for workflow inputs
//! - Response DTOs for serializing workflow outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    CreateRoleRequest, JoinClubRequest, LoginRequest, RegisterRequest, SubmitClubRequest,
    UpdateRoleRequest,
};

// Re-export commonly used response types
pub use responses::{
    ClubResponse, ClubSummaryResponse, CreationRequestResponse, Envelope, JoinRequestResponse,
    MemberResponse, ProvisionedClubResponse, RolePreviewResponse, RoleResponse, UserResponse,
};

// Re-export mapper helpers
pub use mappers::{member_response, role_response};
