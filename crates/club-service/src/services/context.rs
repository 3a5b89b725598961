//! Service context - dependency container for services
//!
//! Holds all repositories and shared services needed by the service layer.
//! Repositories are trait objects so tests can swap in in-memory fakes.

use std::sync::Arc;

use club_common::auth::PasswordService;
use club_core::traits::{
    ChatRoomRepository, ClubRepository, CreationRequestRepository, JoinRequestRepository,
    MemberRepository, RoleRepository, UserRepository,
};
use club_core::SnowflakeGenerator;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories (trait objects)
/// - Password hashing service
/// - Snowflake generator for ID generation
#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    club_repo: Arc<dyn ClubRepository>,
    role_repo: Arc<dyn RoleRepository>,
    member_repo: Arc<dyn MemberRepository>,
    join_request_repo: Arc<dyn JoinRequestRepository>,
    creation_request_repo: Arc<dyn CreationRequestRepository>,
    chat_room_repo: Arc<dyn ChatRoomRepository>,

    password_service: PasswordService,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        club_repo: Arc<dyn ClubRepository>,
        role_repo: Arc<dyn RoleRepository>,
        member_repo: Arc<dyn MemberRepository>,
        join_request_repo: Arc<dyn JoinRequestRepository>,
        creation_request_repo: Arc<dyn CreationRequestRepository>,
        chat_room_repo: Arc<dyn ChatRoomRepository>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            user_repo,
            club_repo,
            role_repo,
            member_repo,
            join_request_repo,
            creation_request_repo,
            chat_room_repo,
            password_service: PasswordService::new(),
            snowflake_generator,
        }
    }

    /// Wire a context over the PostgreSQL repositories
    pub fn from_pool(pool: club_db::PgPool, worker_id: u16) -> Self {
        Self::new(
            Arc::new(club_db::PgUserRepository::new(pool.clone())),
            Arc::new(club_db::PgClubRepository::new(pool.clone())),
            Arc::new(club_db::PgRoleRepository::new(pool.clone())),
            Arc::new(club_db::PgMemberRepository::new(pool.clone())),
            Arc::new(club_db::PgJoinRequestRepository::new(pool.clone())),
            Arc::new(club_db::PgCreationRequestRepository::new(pool.clone())),
            Arc::new(club_db::PgChatRoomRepository::new(pool)),
            Arc::new(SnowflakeGenerator::new(worker_id)),
        )
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the club repository
    pub fn club_repo(&self) -> &dyn ClubRepository {
        self.club_repo.as_ref()
    }

    /// Get the role repository
    pub fn role_repo(&self) -> &dyn RoleRepository {
        self.role_repo.as_ref()
    }

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the join request repository
    pub fn join_request_repo(&self) -> &dyn JoinRequestRepository {
        self.join_request_repo.as_ref()
    }

    /// Get the creation request repository
    pub fn creation_request_repo(&self) -> &dyn CreationRequestRepository {
        self.creation_request_repo.as_ref()
    }

    /// Get the chat room repository
    pub fn chat_room_repo(&self) -> &dyn ChatRoomRepository {
        self.chat_room_repo.as_ref()
    }

    // === Services ===

    /// Get the password hashing service
    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> club_core::Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("snowflake_generator", &"SnowflakeGenerator")
            .finish()
    }
}
