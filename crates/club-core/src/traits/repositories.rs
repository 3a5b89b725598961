//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Multi-row operations (join approval, club
//! provisioning, president transfer) are single trait methods so that
//! implementations can run them inside one transaction.

use async_trait::async_trait;

use crate::entities::{
    ChatRoom, Club, ClubCreationRequest, JoinRequest, Membership, MembershipStatus, Role, User,
};
use crate::value_objects::{Permissions, Snowflake};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Stamp the last successful login
    async fn touch_last_login(&self, id: Snowflake) -> RepoResult<()>;

    /// Activate or deactivate an account
    async fn set_active(&self, id: Snowflake, active: bool) -> RepoResult<()>;
}

// ============================================================================
// Club Repository
// ============================================================================

#[async_trait]
pub trait ClubRepository: Send + Sync {
    /// Find club by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Club>>;

    /// Resolve an access code (already canonicalized to uppercase) to an
    /// active club
    async fn find_by_access_code(&self, code: &str) -> RepoResult<Option<Club>>;

    /// Check whether any club (active or not) already uses this code
    async fn access_code_exists(&self, code: &str) -> RepoResult<bool>;

    /// List every club, newest first
    async fn find_all(&self) -> RepoResult<Vec<Club>>;

    /// Count active memberships in a club
    async fn member_count(&self, club_id: Snowflake) -> RepoResult<i64>;

    /// Soft delete a club
    async fn deactivate(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Role Repository (role rows + the per-key permission store)
// ============================================================================

#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Find role by ID with its permission set loaded
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Role>>;

    /// List all roles in a club (system roles first, then by name)
    async fn find_by_club(&self, club_id: Snowflake) -> RepoResult<Vec<Role>>;

    /// Find a role by name within a club, case-insensitively
    async fn find_by_name(&self, club_id: Snowflake, name: &str) -> RepoResult<Option<Role>>;

    /// Create a role together with one explicit permission row per key
    async fn create(&self, role: &Role) -> RepoResult<()>;

    /// Update role name and description
    async fn update_details(&self, role: &Role) -> RepoResult<()>;

    /// Overwrite only the supplied permission keys, leaving the rest intact
    async fn update_permissions(
        &self,
        role_id: Snowflake,
        changes: &[(Permissions, bool)],
    ) -> RepoResult<()>;

    /// Delete a role; fails with `SystemRoleProtected` for system roles
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Count active memberships currently holding this role
    async fn active_member_count(&self, role_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find a membership regardless of status
    async fn find(&self, club_id: Snowflake, user_id: Snowflake)
        -> RepoResult<Option<Membership>>;

    /// List active memberships in a club, president first
    async fn find_by_club(&self, club_id: Snowflake) -> RepoResult<Vec<Membership>>;

    /// Add a membership
    async fn create(&self, membership: &Membership) -> RepoResult<()>;

    /// Point an active membership at a different role (single-row update)
    async fn update_role(
        &self,
        club_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> RepoResult<()>;

    /// Flip a membership's status (removal/reinstatement)
    async fn set_status(
        &self,
        club_id: Snowflake,
        user_id: Snowflake,
        status: MembershipStatus,
    ) -> RepoResult<()>;

    /// Transfer the presidency in one transaction: clear every
    /// `is_president` flag in the club, set the target's, and update the
    /// club's president pointer
    async fn set_president(&self, club_id: Snowflake, user_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Join Request Repository
// ============================================================================

#[async_trait]
pub trait JoinRequestRepository: Send + Sync {
    /// Find join request by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<JoinRequest>>;

    /// Pending requests for a club, oldest first (FIFO review order)
    async fn find_pending_by_club(&self, club_id: Snowflake) -> RepoResult<Vec<JoinRequest>>;

    /// Check for an existing pending request from this user
    async fn has_pending(&self, club_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Create a pending join request
    async fn create(&self, request: &JoinRequest) -> RepoResult<()>;

    /// Approve a pending request in one transaction: flip the request
    /// (guarded on `status = 'pending'`), insert the membership, and enroll
    /// the new member in the general chat room when one exists. A lost race
    /// fails with `RequestAlreadyProcessed` and writes nothing.
    async fn approve(
        &self,
        request_id: Snowflake,
        reviewer_id: Snowflake,
        membership: &Membership,
        general_room_id: Option<Snowflake>,
    ) -> RepoResult<()>;

    /// Reject a pending request (guarded single-field transition)
    async fn reject(
        &self,
        request_id: Snowflake,
        reviewer_id: Snowflake,
        reason: Option<&str>,
    ) -> RepoResult<()>;
}

// ============================================================================
// Club Creation Request Repository
// ============================================================================

#[async_trait]
pub trait CreationRequestRepository: Send + Sync {
    /// Find creation request by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ClubCreationRequest>>;

    /// All pending creation requests, oldest first
    async fn find_pending(&self) -> RepoResult<Vec<ClubCreationRequest>>;

    /// A user's own requests, newest first
    async fn find_by_requester(&self, user_id: Snowflake) -> RepoResult<Vec<ClubCreationRequest>>;

    /// Check for an existing pending request from this user
    async fn has_pending(&self, user_id: Snowflake) -> RepoResult<bool>;

    /// Create a pending creation request
    async fn create(&self, request: &ClubCreationRequest) -> RepoResult<()>;

    /// Approve a pending request in one transaction: flip the request
    /// (guarded on `status = 'pending'`), then insert the club, its three
    /// system roles with their full permission sets, the founding president
    /// membership, and the general chat room with the president enrolled.
    /// Any failure rolls the whole write-set back, leaving the request
    /// pending; a lost race fails with `RequestAlreadyProcessed`.
    async fn approve(
        &self,
        request_id: Snowflake,
        club: &Club,
        roles: &[Role],
        president: &Membership,
        general_room: &ChatRoom,
    ) -> RepoResult<()>;

    /// Reject a pending request (guarded single-field transition)
    async fn reject(&self, request_id: Snowflake, reason: Option<&str>) -> RepoResult<()>;
}

// ============================================================================
// Chat Room Repository
// ============================================================================

#[async_trait]
pub trait ChatRoomRepository: Send + Sync {
    /// Find a club's general room
    async fn find_general(&self, club_id: Snowflake) -> RepoResult<Option<ChatRoom>>;
}
