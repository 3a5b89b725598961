//! Test environment and workflow helpers
//!
//! Wires a `ServiceContext` over the in-memory store and provides
//! shortcuts for the setup every scenario needs: seeded accounts and a
//! fully provisioned club.

use std::sync::Arc;

use club_core::entities::{Role, User};
use club_core::value_objects::{Identity, Snowflake};
use club_core::SnowflakeGenerator;
use club_core::traits::UserRepository;
use club_service::dto::SubmitClubRequest;
use club_service::{ClubService, ServiceContext};

use crate::fixtures::{unique_suffix, InMemoryRepos};

/// Test environment: one store, one service context
pub struct TestEnv {
    pub repos: Arc<InMemoryRepos>,
    pub ctx: ServiceContext,
}

impl TestEnv {
    pub fn new() -> Self {
        let repos = Arc::new(InMemoryRepos::new());
        let ctx = ServiceContext::new(
            repos.clone(),
            repos.clone(),
            repos.clone(),
            repos.clone(),
            repos.clone(),
            repos.clone(),
            repos.clone(),
            Arc::new(SnowflakeGenerator::new(1)),
        );
        Self { repos, ctx }
    }

    /// Insert an active account directly into the store
    pub async fn seed_user(&self, first_name: &str) -> User {
        let suffix = unique_suffix();
        let user = User::new(
            self.ctx.generate_id(),
            format!("{}{suffix}@example.com", first_name.to_lowercase()),
            first_name.to_string(),
            "Tester".to_string(),
        );
        self.repos
            .create(&user, "$argon2id$fake$hash")
            .await
            .expect("seed user");
        user
    }

    /// Insert a system owner account
    pub async fn seed_superuser(&self) -> Identity {
        let user = self.seed_user("Admin").await;
        self.repos.make_superuser(user.id);
        Identity::superuser(user.id)
    }

    /// Submit and approve a creation request, returning the provisioned
    /// club's ID, access code, and its three system roles
    pub async fn provision_club(
        &self,
        president: &User,
        club_name: &str,
    ) -> ProvisionedClub {
        let service = ClubService::new(&self.ctx);
        let request = service
            .submit_request(
                Identity::user(president.id),
                SubmitClubRequest {
                    club_name: club_name.to_string(),
                    description: Some("A club for testing".to_string()),
                    staff_advisor: None,
                    president_name: president.display_name(),
                    requester_comment: None,
                },
            )
            .await
            .expect("submit creation request");

        let admin = self.seed_superuser().await;
        let provisioned = service
            .approve_request(admin, request.id.parse().expect("request id"))
            .await
            .expect("approve creation request");

        let club_id: Snowflake = provisioned.club_id.parse().expect("club id");
        let club = self
            .repos
            .club_by_name(club_name)
            .expect("provisioned club in store");

        ProvisionedClub {
            club_id,
            access_code: club.access_code,
            president_role: self.role_named(club_id, "President").await,
            vice_president_role: self.role_named(club_id, "Vice President").await,
            member_role: self.role_named(club_id, "Member").await,
        }
    }

    /// Look up a club role by name, panicking if absent
    pub async fn role_named(&self, club_id: Snowflake, name: &str) -> Role {
        self.ctx
            .role_repo()
            .find_by_name(club_id, name)
            .await
            .expect("find role")
            .unwrap_or_else(|| panic!("role {name} not found"))
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// A provisioned club and its system roles
pub struct ProvisionedClub {
    pub club_id: Snowflake,
    pub access_code: String,
    pub president_role: Role,
    pub vice_president_role: Role,
    pub member_role: Role,
}

