//! In-memory repository fakes
//!
//! A single store backs every repository trait so multi-row operations
//! (join approval, club provisioning, president transfer) can mirror the
//! transactional all-or-nothing behavior of the real implementations.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use club_core::entities::{
    ChatRoom, Club, ClubCreationRequest, JoinRequest, Membership, MembershipStatus, RequestStatus,
    Role, User,
};
use club_core::error::DomainError;
use club_core::traits::{
    ChatRoomRepository, ClubRepository, CreationRequestRepository, JoinRequestRepository,
    MemberRepository, RepoResult, RoleRepository, UserRepository,
};
use club_core::value_objects::{Permissions, Snowflake};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

#[derive(Default)]
struct Store {
    users: HashMap<Snowflake, User>,
    password_hashes: HashMap<Snowflake, String>,
    clubs: HashMap<Snowflake, Club>,
    roles: HashMap<Snowflake, Role>,
    memberships: HashMap<(Snowflake, Snowflake), Membership>,
    join_requests: HashMap<Snowflake, JoinRequest>,
    creation_requests: HashMap<Snowflake, ClubCreationRequest>,
    chat_rooms: HashMap<Snowflake, ChatRoom>,
    room_members: HashSet<(Snowflake, Snowflake)>,
}

/// One in-memory store implementing every repository trait
///
/// `fail_next_creation_approve` injects a storage failure into the next
/// provisioning attempt so tests can assert that nothing is written when
/// the transaction dies partway.
#[derive(Default)]
pub struct InMemoryRepos {
    store: Mutex<Store>,
    fail_next_creation_approve: AtomicBool,
}

impl InMemoryRepos {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next creation-request approval fail with a storage error
    pub fn fail_next_creation_approve(&self) {
        self.fail_next_creation_approve.store(true, Ordering::SeqCst);
    }

    // === Direct inspection for assertions ===

    pub fn club_count(&self) -> usize {
        self.store.lock().unwrap().clubs.len()
    }

    pub fn club_by_name(&self, name: &str) -> Option<Club> {
        self.store
            .lock()
            .unwrap()
            .clubs
            .values()
            .find(|c| c.name == name)
            .cloned()
    }

    pub fn membership(&self, club_id: Snowflake, user_id: Snowflake) -> Option<Membership> {
        self.store
            .lock()
            .unwrap()
            .memberships
            .get(&(club_id, user_id))
            .cloned()
    }

    pub fn president_flags(&self, club_id: Snowflake) -> Vec<Snowflake> {
        self.store
            .lock()
            .unwrap()
            .memberships
            .values()
            .filter(|m| m.club_id == club_id && m.is_president)
            .map(|m| m.user_id)
            .collect()
    }

    pub fn room_member_count(&self, room_id: Snowflake) -> usize {
        self.store
            .lock()
            .unwrap()
            .room_members
            .iter()
            .filter(|(r, _)| *r == room_id)
            .count()
    }

    pub fn creation_request(&self, id: Snowflake) -> Option<ClubCreationRequest> {
        self.store.lock().unwrap().creation_requests.get(&id).cloned()
    }

    pub fn join_request(&self, id: Snowflake) -> Option<JoinRequest> {
        self.store.lock().unwrap().join_requests.get(&id).cloned()
    }

    /// Promote an account to system owner
    pub fn make_superuser(&self, user_id: Snowflake) {
        if let Some(user) = self.store.lock().unwrap().users.get_mut(&user_id) {
            user.is_superuser = true;
        }
    }
}

// ============================================================================
// UserRepository
// ============================================================================

#[async_trait]
impl UserRepository for InMemoryRepos {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.store.lock().unwrap().users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let store = self.store.lock().unwrap();
        Ok(store
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(email)))
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        if store
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(DomainError::EmailAlreadyExists);
        }
        store.users.insert(user.id, user.clone());
        store.password_hashes.insert(user.id, password_hash.to_string());
        Ok(())
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        Ok(self.store.lock().unwrap().password_hashes.get(&id).cloned())
    }

    async fn touch_last_login(&self, id: Snowflake) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        let user = store.users.get_mut(&id).ok_or(DomainError::UserNotFound(id))?;
        user.last_login = Some(Utc::now());
        Ok(())
    }

    async fn set_active(&self, id: Snowflake, active: bool) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        let user = store.users.get_mut(&id).ok_or(DomainError::UserNotFound(id))?;
        user.is_active = active;
        Ok(())
    }
}

// ============================================================================
// ClubRepository
// ============================================================================

#[async_trait]
impl ClubRepository for InMemoryRepos {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Club>> {
        Ok(self.store.lock().unwrap().clubs.get(&id).cloned())
    }

    async fn find_by_access_code(&self, code: &str) -> RepoResult<Option<Club>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .clubs
            .values()
            .find(|c| c.is_active && c.access_code == code)
            .cloned())
    }

    async fn access_code_exists(&self, code: &str) -> RepoResult<bool> {
        // Retired codes stay reserved, so inactive clubs count too
        let store = self.store.lock().unwrap();
        Ok(store.clubs.values().any(|c| c.access_code == code))
    }

    async fn find_all(&self) -> RepoResult<Vec<Club>> {
        let store = self.store.lock().unwrap();
        let mut clubs: Vec<Club> = store.clubs.values().cloned().collect();
        clubs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(clubs)
    }

    async fn member_count(&self, club_id: Snowflake) -> RepoResult<i64> {
        let store = self.store.lock().unwrap();
        Ok(store
            .memberships
            .values()
            .filter(|m| m.club_id == club_id && m.is_active())
            .count() as i64)
    }

    async fn deactivate(&self, id: Snowflake) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        let club = store.clubs.get_mut(&id).ok_or(DomainError::ClubNotFound(id))?;
        club.is_active = false;
        club.updated_at = Utc::now();
        Ok(())
    }
}

// ============================================================================
// RoleRepository
// ============================================================================

#[async_trait]
impl RoleRepository for InMemoryRepos {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Role>> {
        Ok(self.store.lock().unwrap().roles.get(&id).cloned())
    }

    async fn find_by_club(&self, club_id: Snowflake) -> RepoResult<Vec<Role>> {
        let store = self.store.lock().unwrap();
        let mut roles: Vec<Role> = store
            .roles
            .values()
            .filter(|r| r.club_id == club_id)
            .cloned()
            .collect();
        roles.sort_by(|a, b| {
            b.is_system_role
                .cmp(&a.is_system_role)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(roles)
    }

    async fn find_by_name(&self, club_id: Snowflake, name: &str) -> RepoResult<Option<Role>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .roles
            .values()
            .find(|r| r.club_id == club_id && r.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn create(&self, role: &Role) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        if store
            .roles
            .values()
            .any(|r| r.club_id == role.club_id && r.name.eq_ignore_ascii_case(&role.name))
        {
            return Err(DomainError::DuplicateRoleName);
        }
        store.roles.insert(role.id, role.clone());
        Ok(())
    }

    async fn update_details(&self, role: &Role) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        if store.roles.values().any(|r| {
            r.club_id == role.club_id && r.id != role.id && r.name.eq_ignore_ascii_case(&role.name)
        }) {
            return Err(DomainError::DuplicateRoleName);
        }
        let existing = store
            .roles
            .get_mut(&role.id)
            .ok_or(DomainError::RoleNotFound(role.id))?;
        existing.name = role.name.clone();
        existing.description = role.description.clone();
        existing.updated_at = Utc::now();
        Ok(())
    }

    async fn update_permissions(
        &self,
        role_id: Snowflake,
        changes: &[(Permissions, bool)],
    ) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        let role = store
            .roles
            .get_mut(&role_id)
            .ok_or(DomainError::RoleNotFound(role_id))?;
        for (flag, granted) in changes {
            role.permissions.set(*flag, *granted);
        }
        role.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        let role = store.roles.get(&id).ok_or(DomainError::RoleNotFound(id))?;
        if role.is_system_role {
            return Err(DomainError::SystemRoleProtected);
        }
        store.roles.remove(&id);
        Ok(())
    }

    async fn active_member_count(&self, role_id: Snowflake) -> RepoResult<i64> {
        let store = self.store.lock().unwrap();
        Ok(store
            .memberships
            .values()
            .filter(|m| m.role_id == role_id && m.is_active())
            .count() as i64)
    }
}

// ============================================================================
// MemberRepository
// ============================================================================

#[async_trait]
impl MemberRepository for InMemoryRepos {
    async fn find(
        &self,
        club_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<Membership>> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .memberships
            .get(&(club_id, user_id))
            .cloned())
    }

    async fn find_by_club(&self, club_id: Snowflake) -> RepoResult<Vec<Membership>> {
        let store = self.store.lock().unwrap();
        let mut members: Vec<Membership> = store
            .memberships
            .values()
            .filter(|m| m.club_id == club_id && m.is_active())
            .cloned()
            .collect();
        members.sort_by(|a, b| {
            b.is_president
                .cmp(&a.is_president)
                .then_with(|| a.joined_at.cmp(&b.joined_at))
        });
        Ok(members)
    }

    async fn create(&self, membership: &Membership) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        store
            .memberships
            .insert((membership.club_id, membership.user_id), membership.clone());
        Ok(())
    }

    async fn update_role(
        &self,
        club_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        let membership = store
            .memberships
            .get_mut(&(club_id, user_id))
            .filter(|m| m.is_active())
            .ok_or(DomainError::MembershipNotFound)?;
        membership.role_id = role_id;
        membership.updated_at = Utc::now();
        Ok(())
    }

    async fn set_status(
        &self,
        club_id: Snowflake,
        user_id: Snowflake,
        status: MembershipStatus,
    ) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        let membership = store
            .memberships
            .get_mut(&(club_id, user_id))
            .ok_or(DomainError::MembershipNotFound)?;
        membership.status = status;
        membership.updated_at = Utc::now();
        Ok(())
    }

    async fn set_president(&self, club_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        if !store
            .memberships
            .get(&(club_id, user_id))
            .is_some_and(|m| m.is_active())
        {
            return Err(DomainError::MembershipNotFound);
        }
        for membership in store.memberships.values_mut() {
            if membership.club_id == club_id && membership.is_president {
                membership.is_president = false;
                membership.updated_at = Utc::now();
            }
        }
        let target = store
            .memberships
            .get_mut(&(club_id, user_id))
            .ok_or(DomainError::MembershipNotFound)?;
        target.is_president = true;
        target.updated_at = Utc::now();
        let club = store
            .clubs
            .get_mut(&club_id)
            .ok_or(DomainError::ClubNotFound(club_id))?;
        club.current_president_id = user_id;
        club.updated_at = Utc::now();
        Ok(())
    }
}

// ============================================================================
// JoinRequestRepository
// ============================================================================

#[async_trait]
impl JoinRequestRepository for InMemoryRepos {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<JoinRequest>> {
        Ok(self.store.lock().unwrap().join_requests.get(&id).cloned())
    }

    async fn find_pending_by_club(&self, club_id: Snowflake) -> RepoResult<Vec<JoinRequest>> {
        let store = self.store.lock().unwrap();
        let mut requests: Vec<JoinRequest> = store
            .join_requests
            .values()
            .filter(|r| r.club_id == club_id && r.status.is_pending())
            .cloned()
            .collect();
        requests.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(requests)
    }

    async fn has_pending(&self, club_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let store = self.store.lock().unwrap();
        Ok(store
            .join_requests
            .values()
            .any(|r| r.club_id == club_id && r.user_id == user_id && r.status.is_pending()))
    }

    async fn create(&self, request: &JoinRequest) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        store.join_requests.insert(request.id, request.clone());
        Ok(())
    }

    async fn approve(
        &self,
        request_id: Snowflake,
        reviewer_id: Snowflake,
        membership: &Membership,
        general_room_id: Option<Snowflake>,
    ) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        let request = store
            .join_requests
            .get_mut(&request_id)
            .filter(|r| r.status.is_pending())
            .ok_or(DomainError::RequestAlreadyProcessed)?;
        request.status = RequestStatus::Approved;
        request.reviewed_by = Some(reviewer_id);
        request.reviewed_at = Some(Utc::now());
        request.assigned_role_id = Some(membership.role_id);
        store
            .memberships
            .insert((membership.club_id, membership.user_id), membership.clone());
        if let Some(room_id) = general_room_id {
            store.room_members.insert((room_id, membership.user_id));
        }
        Ok(())
    }

    async fn reject(
        &self,
        request_id: Snowflake,
        reviewer_id: Snowflake,
        reason: Option<&str>,
    ) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        let request = store
            .join_requests
            .get_mut(&request_id)
            .filter(|r| r.status.is_pending())
            .ok_or(DomainError::RequestAlreadyProcessed)?;
        request.status = RequestStatus::Rejected;
        request.reviewed_by = Some(reviewer_id);
        request.reviewed_at = Some(Utc::now());
        request.rejection_reason = reason.map(str::to_string);
        Ok(())
    }
}

// ============================================================================
// CreationRequestRepository
// ============================================================================

#[async_trait]
impl CreationRequestRepository for InMemoryRepos {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ClubCreationRequest>> {
        Ok(self.store.lock().unwrap().creation_requests.get(&id).cloned())
    }

    async fn find_pending(&self) -> RepoResult<Vec<ClubCreationRequest>> {
        let store = self.store.lock().unwrap();
        let mut requests: Vec<ClubCreationRequest> = store
            .creation_requests
            .values()
            .filter(|r| r.status.is_pending())
            .cloned()
            .collect();
        requests.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(requests)
    }

    async fn find_by_requester(&self, user_id: Snowflake) -> RepoResult<Vec<ClubCreationRequest>> {
        let store = self.store.lock().unwrap();
        let mut requests: Vec<ClubCreationRequest> = store
            .creation_requests
            .values()
            .filter(|r| r.requested_by == user_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }

    async fn has_pending(&self, user_id: Snowflake) -> RepoResult<bool> {
        let store = self.store.lock().unwrap();
        Ok(store
            .creation_requests
            .values()
            .any(|r| r.requested_by == user_id && r.status.is_pending()))
    }

    async fn create(&self, request: &ClubCreationRequest) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        store.creation_requests.insert(request.id, request.clone());
        Ok(())
    }

    async fn approve(
        &self,
        request_id: Snowflake,
        club: &Club,
        roles: &[Role],
        president: &Membership,
        general_room: &ChatRoom,
    ) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        if !store
            .creation_requests
            .get(&request_id)
            .is_some_and(|r| r.status.is_pending())
        {
            return Err(DomainError::RequestAlreadyProcessed);
        }
        if self.fail_next_creation_approve.swap(false, Ordering::SeqCst) {
            return Err(DomainError::DatabaseError(
                "injected storage failure".to_string(),
            ));
        }
        if store.clubs.values().any(|c| c.access_code == club.access_code) {
            return Err(DomainError::AccessCodeExists);
        }
        let request = store
            .creation_requests
            .get_mut(&request_id)
            .ok_or(DomainError::RequestAlreadyProcessed)?;
        request.status = RequestStatus::Approved;
        request.reviewed_at = Some(Utc::now());
        store.clubs.insert(club.id, club.clone());
        for role in roles {
            store.roles.insert(role.id, role.clone());
        }
        store
            .memberships
            .insert((president.club_id, president.user_id), president.clone());
        store.chat_rooms.insert(general_room.id, general_room.clone());
        store
            .room_members
            .insert((general_room.id, president.user_id));
        Ok(())
    }

    async fn reject(&self, request_id: Snowflake, reason: Option<&str>) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        let request = store
            .creation_requests
            .get_mut(&request_id)
            .filter(|r| r.status.is_pending())
            .ok_or(DomainError::RequestAlreadyProcessed)?;
        request.status = RequestStatus::Rejected;
        request.reviewed_at = Some(Utc::now());
        request.rejection_reason = reason.map(str::to_string);
        Ok(())
    }
}

// ============================================================================
// ChatRoomRepository
// ============================================================================

#[async_trait]
impl ChatRoomRepository for InMemoryRepos {
    async fn find_general(&self, club_id: Snowflake) -> RepoResult<Option<ChatRoom>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .chat_rooms
            .values()
            .find(|r| r.club_id == club_id && r.is_general)
            .cloned())
    }
}
