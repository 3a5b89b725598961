//! Club service
//!
//! Club creation requests and club provisioning. Clubs come into existence
//! only by a superuser approving a creation request; the approval writes
//! the club, its three seeded system roles, the founding president
//! membership, and the general chat room in one atomic step.

use club_core::entities::{generate_access_code, ChatRoom, Club, ClubCreationRequest, Membership, Role};
use club_core::error::DomainError;
use club_core::value_objects::Identity;
use club_core::Snowflake;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{
    ClubResponse, ClubSummaryResponse, CreationRequestResponse, ProvisionedClubResponse,
    SubmitClubRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// How many access code candidates to try before giving up
const MAX_ACCESS_CODE_ATTEMPTS: u32 = 16;

/// Club service
pub struct ClubService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ClubService<'a> {
    /// Create a new ClubService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Submit a club creation request
    ///
    /// One pending request per user at a time.
    #[instrument(skip(self, request))]
    pub async fn submit_request(
        &self,
        actor: Identity,
        request: SubmitClubRequest,
    ) -> ServiceResult<CreationRequestResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        if self
            .ctx
            .creation_request_repo()
            .has_pending(actor.user_id)
            .await?
        {
            return Err(DomainError::DuplicatePendingRequest.into());
        }

        let creation_request = ClubCreationRequest::new(
            self.ctx.generate_id(),
            actor.user_id,
            request.club_name,
            request.description,
            request.staff_advisor,
            request.president_name,
            request.requester_comment,
        );

        self.ctx
            .creation_request_repo()
            .create(&creation_request)
            .await?;

        info!(
            request_id = %creation_request.id,
            club_name = %creation_request.club_name,
            "Club creation request submitted"
        );

        Ok(CreationRequestResponse::from(&creation_request))
    }

    /// The caller's own creation requests, newest first
    #[instrument(skip(self))]
    pub async fn my_requests(&self, actor: Identity) -> ServiceResult<Vec<CreationRequestResponse>> {
        let requests = self
            .ctx
            .creation_request_repo()
            .find_by_requester(actor.user_id)
            .await?;

        Ok(requests.iter().map(CreationRequestResponse::from).collect())
    }

    /// All pending creation requests, oldest first (superuser only)
    #[instrument(skip(self))]
    pub async fn pending_requests(
        &self,
        actor: Identity,
    ) -> ServiceResult<Vec<CreationRequestResponse>> {
        require_superuser(actor)?;

        let requests = self.ctx.creation_request_repo().find_pending().await?;
        Ok(requests.iter().map(CreationRequestResponse::from).collect())
    }

    /// Approve a creation request and provision the club (superuser only)
    ///
    /// Generates a collision-free access code, then writes the entire
    /// club in one transaction. A request that was already reviewed fails
    /// with `RequestAlreadyProcessed` and nothing is written.
    #[instrument(skip(self))]
    pub async fn approve_request(
        &self,
        actor: Identity,
        request_id: Snowflake,
    ) -> ServiceResult<ProvisionedClubResponse> {
        require_superuser(actor)?;

        let request = self
            .ctx
            .creation_request_repo()
            .find_by_id(request_id)
            .await?
            .ok_or(DomainError::CreationRequestNotFound(request_id))?;

        if !request.status.is_pending() {
            return Err(DomainError::RequestAlreadyProcessed.into());
        }

        let access_code = self.unique_access_code(&request.club_name).await?;

        let club_id = self.ctx.generate_id();
        let club = Club::from_request(
            club_id,
            request.id,
            request.requested_by,
            request.club_name.clone(),
            request.description.clone(),
            request.staff_advisor.clone(),
            access_code.clone(),
        );

        let president_role = Role::president(self.ctx.generate_id(), club_id);
        let roles = vec![
            president_role.clone(),
            Role::vice_president(self.ctx.generate_id(), club_id),
            Role::member(self.ctx.generate_id(), club_id),
        ];

        let president =
            Membership::founding_president(club_id, request.requested_by, president_role.id);
        let general_room = ChatRoom::general(self.ctx.generate_id(), club_id, request.requested_by);

        self.ctx
            .creation_request_repo()
            .approve(request.id, &club, &roles, &president, &general_room)
            .await?;

        info!(
            club_id = %club_id,
            request_id = %request.id,
            access_code = %access_code,
            "Club provisioned"
        );

        Ok(ProvisionedClubResponse {
            club_id: club_id.to_string(),
            access_code,
        })
    }

    /// Reject a creation request (superuser only)
    #[instrument(skip(self))]
    pub async fn reject_request(
        &self,
        actor: Identity,
        request_id: Snowflake,
        reason: Option<&str>,
    ) -> ServiceResult<()> {
        require_superuser(actor)?;

        self.ctx
            .creation_request_repo()
            .reject(request_id, reason)
            .await?;

        info!(request_id = %request_id, "Club creation request rejected");

        Ok(())
    }

    /// Get a club by id
    ///
    /// No gate; club info is visible to any authenticated user.
    #[instrument(skip(self))]
    pub async fn get_club(&self, club_id: Snowflake) -> ServiceResult<ClubResponse> {
        let club = self
            .ctx
            .club_repo()
            .find_by_id(club_id)
            .await?
            .ok_or(DomainError::ClubNotFound(club_id))?;

        Ok(ClubResponse::from(&club))
    }

    /// Every club with its active member count (superuser only)
    #[instrument(skip(self))]
    pub async fn list_clubs(&self, actor: Identity) -> ServiceResult<Vec<ClubSummaryResponse>> {
        require_superuser(actor)?;

        let clubs = self.ctx.club_repo().find_all().await?;

        let mut summaries = Vec::with_capacity(clubs.len());
        for club in &clubs {
            let member_count = self.ctx.club_repo().member_count(club.id).await?;
            summaries.push(ClubSummaryResponse {
                club: ClubResponse::from(club),
                member_count,
            });
        }

        Ok(summaries)
    }

    /// Soft-delete a club (superuser only)
    #[instrument(skip(self))]
    pub async fn deactivate_club(&self, actor: Identity, club_id: Snowflake) -> ServiceResult<()> {
        require_superuser(actor)?;

        self.ctx.club_repo().deactivate(club_id).await?;

        info!(club_id = %club_id, "Club deactivated");

        Ok(())
    }

    /// Generate an access code that no club, active or retired, uses
    async fn unique_access_code(&self, club_name: &str) -> ServiceResult<String> {
        for attempt in 0..MAX_ACCESS_CODE_ATTEMPTS {
            let candidate = generate_access_code(club_name);
            if !self.ctx.club_repo().access_code_exists(&candidate).await? {
                return Ok(candidate);
            }
            warn!(attempt, candidate = %candidate, "Access code collision, retrying");
        }

        // The clubs table's unique constraint still backstops the race
        // between this check and the insert
        Err(DomainError::AccessCodeExists.into())
    }
}

fn require_superuser(actor: Identity) -> ServiceResult<()> {
    if actor.superuser {
        Ok(())
    } else {
        Err(DomainError::NotSuperuser.into())
    }
}
