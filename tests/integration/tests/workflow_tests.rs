//! End-to-end workflow tests over the in-memory store
//!
//! Each test drives the real services through a full scenario: club
//! provisioning, joining, role management, presidency transfer, and the
//! permission gate.

use std::collections::BTreeMap;

use club_core::entities::{Membership, MembershipStatus, RequestStatus};
use club_core::error::DomainError;
use club_core::traits::JoinRequestRepository;
use club_core::value_objects::{Identity, Permissions, Snowflake};
use club_service::dto::{
    CreateRoleRequest, Envelope, JoinClubRequest, LoginRequest, RegisterRequest,
    SubmitClubRequest, UpdateRoleRequest,
};
use club_service::{
    AuthService, ClubService, MemberService, PermissionService, RoleService, ServiceError,
};
use integration_tests::TestEnv;

fn join_request(access_code: &str) -> JoinClubRequest {
    JoinClubRequest {
        access_code: access_code.to_string(),
        message: Some("Please let me in".to_string()),
    }
}

// ============================================================================
// Provisioning
// ============================================================================

#[tokio::test]
async fn test_approving_creation_request_provisions_full_club() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;

    let club = env.provision_club(&founder, "Chess Masters Club").await;

    assert!(club.access_code.starts_with("CHESS"));
    assert_eq!(club.access_code.len(), "CHESS".len() + 4);

    assert!(club.president_role.is_system_role);
    assert_eq!(club.president_role.permissions, Permissions::PRESIDENT);
    assert!(club.vice_president_role.is_system_role);
    assert!(club.member_role.is_system_role);
    assert_eq!(club.member_role.permissions, Permissions::MEMBER);

    let membership = env
        .repos
        .membership(club.club_id, founder.id)
        .expect("founding membership");
    assert!(membership.is_president);
    assert!(membership.is_active());
    assert_eq!(membership.role_id, club.president_role.id);

    // The founder holds every capability through the President role
    let gate = PermissionService::new(&env.ctx);
    assert!(gate
        .check_permission(club.club_id, founder.id, Permissions::MANAGE_ROLES)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_creation_request_is_consumed_exactly_once() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;
    let admin = env.seed_superuser().await;

    let service = ClubService::new(&env.ctx);
    let request = service
        .submit_request(
            Identity::user(founder.id),
            SubmitClubRequest {
                club_name: "Robotics Club".to_string(),
                description: None,
                staff_advisor: None,
                president_name: founder.display_name(),
                requester_comment: None,
            },
        )
        .await
        .unwrap();
    let request_id = request.id.parse().unwrap();

    service.approve_request(admin, request_id).await.unwrap();

    let err = service.approve_request(admin, request_id).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::RequestAlreadyProcessed)
    ));
    assert_eq!(env.repos.club_count(), 1);
}

#[tokio::test]
async fn test_failed_provisioning_leaves_request_pending() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;
    let admin = env.seed_superuser().await;

    let service = ClubService::new(&env.ctx);
    let request = service
        .submit_request(
            Identity::user(founder.id),
            SubmitClubRequest {
                club_name: "Debate Society".to_string(),
                description: None,
                staff_advisor: None,
                president_name: founder.display_name(),
                requester_comment: None,
            },
        )
        .await
        .unwrap();
    let request_id = request.id.parse().unwrap();

    env.repos.fail_next_creation_approve();
    service.approve_request(admin, request_id).await.unwrap_err();

    // Nothing provisioned, and the request survives for a retry
    assert_eq!(env.repos.club_count(), 0);
    let stored = env.repos.creation_request(request_id).unwrap();
    assert_eq!(stored.status, RequestStatus::Pending);

    service.approve_request(admin, request_id).await.unwrap();
    assert_eq!(env.repos.club_count(), 1);
}

#[tokio::test]
async fn test_only_superuser_reviews_creation_requests() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;
    let bystander = env.seed_user("Blair").await;

    let service = ClubService::new(&env.ctx);
    let request = service
        .submit_request(
            Identity::user(founder.id),
            SubmitClubRequest {
                club_name: "Film Club".to_string(),
                description: None,
                staff_advisor: None,
                president_name: founder.display_name(),
                requester_comment: None,
            },
        )
        .await
        .unwrap();

    let err = service
        .approve_request(Identity::user(bystander.id), request.id.parse().unwrap())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::NotSuperuser)
    ));
}

#[tokio::test]
async fn test_one_pending_creation_request_per_user() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;

    let service = ClubService::new(&env.ctx);
    let submit = |name: &str| SubmitClubRequest {
        club_name: name.to_string(),
        description: None,
        staff_advisor: None,
        president_name: founder.display_name(),
        requester_comment: None,
    };

    service
        .submit_request(Identity::user(founder.id), submit("First Club"))
        .await
        .unwrap();
    let err = service
        .submit_request(Identity::user(founder.id), submit("Second Club"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::DuplicatePendingRequest)
    ));
}

#[tokio::test]
async fn test_get_club_is_open_to_any_user() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;
    let club = env.provision_club(&founder, "Chess Masters Club").await;

    let clubs = ClubService::new(&env.ctx);
    let found = clubs.get_club(club.club_id).await.unwrap();
    assert_eq!(found.name, "Chess Masters Club");
    assert_eq!(found.access_code, club.access_code);

    let missing = clubs.get_club(Snowflake::new(424242)).await;
    assert!(matches!(
        missing,
        Err(ServiceError::Domain(DomainError::ClubNotFound(_)))
    ));
}

// ============================================================================
// Permission gate
// ============================================================================

#[tokio::test]
async fn test_gate_answers_false_for_outsiders() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;
    let outsider = env.seed_user("Blair").await;
    let club = env.provision_club(&founder, "Chess Masters Club").await;

    let gate = PermissionService::new(&env.ctx);
    assert!(!gate
        .check_permission(club.club_id, outsider.id, Permissions::VIEW_ANNOUNCEMENTS)
        .await
        .unwrap());
    assert!(!gate
        .check_permission_key(club.club_id, outsider.id, "access_chat")
        .await
        .unwrap());
}

#[tokio::test]
async fn test_gate_rejects_unknown_permission_keys() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;
    let club = env.provision_club(&founder, "Chess Masters Club").await;

    let gate = PermissionService::new(&env.ctx);
    let err = gate
        .check_permission_key(club.club_id, founder.id, "launch_missiles")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::UnknownPermissionKey(_))
    ));
}

#[tokio::test]
async fn test_gate_answers_false_after_removal() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;
    let joiner = env.seed_user("Blair").await;
    let club = env.provision_club(&founder, "Chess Masters Club").await;
    let president = Identity::user(founder.id);

    enroll(&env, president, &club.access_code, &joiner, club.member_role.id).await;

    let gate = PermissionService::new(&env.ctx);
    assert!(gate
        .check_permission(club.club_id, joiner.id, Permissions::ACCESS_CHAT)
        .await
        .unwrap());

    MemberService::new(&env.ctx)
        .remove_member(president, club.club_id, joiner.id)
        .await
        .unwrap();

    assert!(!gate
        .check_permission(club.club_id, joiner.id, Permissions::ACCESS_CHAT)
        .await
        .unwrap());
}

// ============================================================================
// Join workflow
// ============================================================================

/// Walk a user through request + approval with the given role
async fn enroll(
    env: &TestEnv,
    reviewer: Identity,
    access_code: &str,
    user: &club_core::entities::User,
    role_id: club_core::Snowflake,
) -> club_core::Snowflake {
    let members = MemberService::new(&env.ctx);
    let request = members
        .request_join(Identity::user(user.id), join_request(access_code))
        .await
        .expect("submit join request");
    let request_id = request.id.parse().expect("request id");
    members
        .approve_join(reviewer, request_id, role_id)
        .await
        .expect("approve join request");
    request_id
}

#[tokio::test]
async fn test_join_flow_accepts_lowercase_access_codes() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;
    let joiner = env.seed_user("Blair").await;
    let club = env.provision_club(&founder, "Chess Masters Club").await;

    let members = MemberService::new(&env.ctx);
    let request = members
        .request_join(
            Identity::user(joiner.id),
            join_request(&club.access_code.to_lowercase()),
        )
        .await
        .unwrap();
    assert_eq!(request.status, "pending");

    // Visible to the president in FIFO order
    let pending = members
        .pending_requests(Identity::user(founder.id), club.club_id)
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, request.id);
}

#[tokio::test]
async fn test_approved_joiner_gets_role_permissions() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;
    let joiner = env.seed_user("Blair").await;
    let club = env.provision_club(&founder, "Chess Masters Club").await;

    enroll(
        &env,
        Identity::user(founder.id),
        &club.access_code,
        &joiner,
        club.member_role.id,
    )
    .await;

    let membership = env.repos.membership(club.club_id, joiner.id).unwrap();
    assert!(membership.is_active());
    assert!(!membership.is_president);
    assert_eq!(membership.role_id, club.member_role.id);

    let gate = PermissionService::new(&env.ctx);
    assert!(gate
        .check_permission(club.club_id, joiner.id, Permissions::VIEW_ANNOUNCEMENTS)
        .await
        .unwrap());
    assert!(!gate
        .check_permission(club.club_id, joiner.id, Permissions::MANAGE_ROLES)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_join_request_double_approve_conflicts() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;
    let joiner = env.seed_user("Blair").await;
    let club = env.provision_club(&founder, "Chess Masters Club").await;
    let president = Identity::user(founder.id);

    let request_id = enroll(&env, president, &club.access_code, &joiner, club.member_role.id).await;

    let err = MemberService::new(&env.ctx)
        .approve_join(president, request_id, club.member_role.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::AlreadyMember)
    ));
}

#[tokio::test]
async fn test_concurrent_join_approvals_pick_one_winner() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;
    let joiner = env.seed_user("Blair").await;
    let club = env.provision_club(&founder, "Chess Masters Club").await;
    let president = Identity::user(founder.id);

    let members = MemberService::new(&env.ctx);
    let request = members
        .request_join(Identity::user(joiner.id), join_request(&club.access_code))
        .await
        .unwrap();
    let request_id = request.id.parse().unwrap();

    let (first, second) = tokio::join!(
        members.approve_join(president, request_id, club.member_role.id),
        members.approve_join(president, request_id, club.member_role.id),
    );

    assert_eq!(u8::from(first.is_ok()) + u8::from(second.is_ok()), 1);
    let loser = if first.is_ok() {
        second.unwrap_err()
    } else {
        first.unwrap_err()
    };
    // Which guard the loser hits depends on interleaving; both are final
    assert!(matches!(
        loser,
        ServiceError::Domain(
            DomainError::RequestAlreadyProcessed | DomainError::AlreadyMember
        )
    ));

    let membership = env.repos.membership(club.club_id, joiner.id).unwrap();
    assert!(membership.is_active());
    let stored = env.repos.join_request(request_id).unwrap();
    assert_eq!(stored.status, RequestStatus::Approved);
}

#[tokio::test]
async fn test_concurrent_approvals_decided_by_the_pending_guard() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;
    let joiner = env.seed_user("Blair").await;
    let club = env.provision_club(&founder, "Chess Masters Club").await;

    let members = MemberService::new(&env.ctx);
    let request = members
        .request_join(Identity::user(joiner.id), join_request(&club.access_code))
        .await
        .unwrap();
    let request_id = request.id.parse().unwrap();

    // Drive the store directly so both racers reach the guarded status
    // flip itself, past every earlier membership check
    let membership = Membership::new(club.club_id, joiner.id, club.member_role.id);
    let repo = env.ctx.join_request_repo();
    let (first, second) = tokio::join!(
        repo.approve(request_id, founder.id, &membership, None),
        repo.approve(request_id, founder.id, &membership, None),
    );

    assert_eq!(u8::from(first.is_ok()) + u8::from(second.is_ok()), 1);
    let loser = if first.is_ok() { second } else { first };
    assert!(matches!(
        loser,
        Err(DomainError::RequestAlreadyProcessed)
    ));
}

#[tokio::test]
async fn test_rejected_join_request_records_reason() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;
    let joiner = env.seed_user("Blair").await;
    let club = env.provision_club(&founder, "Chess Masters Club").await;

    let members = MemberService::new(&env.ctx);
    let request = members
        .request_join(Identity::user(joiner.id), join_request(&club.access_code))
        .await
        .unwrap();
    let request_id = request.id.parse().unwrap();

    members
        .reject_join(Identity::user(founder.id), request_id, Some("Club is full"))
        .await
        .unwrap();

    let stored = env.repos.join_request(request_id).unwrap();
    assert_eq!(stored.status, RequestStatus::Rejected);
    assert_eq!(stored.rejection_reason.as_deref(), Some("Club is full"));
    assert!(env.repos.membership(club.club_id, joiner.id).is_none());

    // A rejected requester may try again
    members
        .request_join(Identity::user(joiner.id), join_request(&club.access_code))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_join_request_conflicts() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;
    let joiner = env.seed_user("Blair").await;
    let club = env.provision_club(&founder, "Chess Masters Club").await;

    let members = MemberService::new(&env.ctx);

    let err = members
        .request_join(Identity::user(joiner.id), join_request("NOSUCH9999"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::InvalidAccessCode)
    ));

    members
        .request_join(Identity::user(joiner.id), join_request(&club.access_code))
        .await
        .unwrap();
    let err = members
        .request_join(Identity::user(joiner.id), join_request(&club.access_code))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::DuplicatePendingRequest)
    ));

    let err = members
        .request_join(Identity::user(founder.id), join_request(&club.access_code))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::AlreadyMember)
    ));
}

#[tokio::test]
async fn test_removed_member_cannot_rejoin_directly() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;
    let joiner = env.seed_user("Blair").await;
    let club = env.provision_club(&founder, "Chess Masters Club").await;
    let president = Identity::user(founder.id);

    enroll(&env, president, &club.access_code, &joiner, club.member_role.id).await;
    MemberService::new(&env.ctx)
        .remove_member(president, club.club_id, joiner.id)
        .await
        .unwrap();

    let err = MemberService::new(&env.ctx)
        .request_join(Identity::user(joiner.id), join_request(&club.access_code))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::MembershipRemoved)
    ));
}

// ============================================================================
// Role management
// ============================================================================

#[tokio::test]
async fn test_custom_role_lifecycle() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;
    let club = env.provision_club(&founder, "Chess Masters Club").await;
    let president = Identity::user(founder.id);

    let roles = RoleService::new(&env.ctx);
    let mut grants = BTreeMap::new();
    grants.insert("view_announcements".to_string(), true);
    grants.insert("create_events".to_string(), true);

    let officer = roles
        .create_role(
            president,
            club.club_id,
            CreateRoleRequest {
                name: "Event Officer".to_string(),
                description: "Runs tournaments".to_string(),
                permissions: grants,
            },
        )
        .await
        .unwrap();
    assert!(!officer.is_system_role);
    assert_eq!(officer.permissions["create_events"], true);
    // Keys absent from the request stay denied
    assert_eq!(officer.permissions["manage_roles"], false);

    // Sparse patch flips only the named keys
    let mut patch = BTreeMap::new();
    patch.insert("edit_events".to_string(), true);
    patch.insert("create_events".to_string(), false);
    let updated = roles
        .update_role(
            president,
            officer.id.parse().unwrap(),
            UpdateRoleRequest {
                permissions: patch,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.permissions["edit_events"], true);
    assert_eq!(updated.permissions["create_events"], false);
    assert_eq!(updated.permissions["view_announcements"], true);

    roles
        .delete_role(president, officer.id.parse().unwrap())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_role_names_unique_case_insensitively() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;
    let club = env.provision_club(&founder, "Chess Masters Club").await;
    let president = Identity::user(founder.id);

    let roles = RoleService::new(&env.ctx);
    let err = roles
        .create_role(
            president,
            club.club_id,
            CreateRoleRequest {
                name: "PRESIDENT".to_string(),
                description: String::new(),
                permissions: BTreeMap::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::DuplicateRoleName)
    ));
}

#[tokio::test]
async fn test_member_cannot_create_roles() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;
    let joiner = env.seed_user("Blair").await;
    let club = env.provision_club(&founder, "Chess Masters Club").await;

    enroll(
        &env,
        Identity::user(founder.id),
        &club.access_code,
        &joiner,
        club.member_role.id,
    )
    .await;

    let err = RoleService::new(&env.ctx)
        .create_role(
            Identity::user(joiner.id),
            club.club_id,
            CreateRoleRequest {
                name: "Shadow Council".to_string(),
                description: String::new(),
                permissions: BTreeMap::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::PermissionDenied { .. }));
}

#[tokio::test]
async fn test_system_roles_cannot_be_deleted() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;
    let club = env.provision_club(&founder, "Chess Masters Club").await;

    let err = RoleService::new(&env.ctx)
        .delete_role(Identity::user(founder.id), club.member_role.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::SystemRoleProtected)
    ));
}

#[tokio::test]
async fn test_role_with_active_holders_cannot_be_deleted() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;
    let joiner = env.seed_user("Blair").await;
    let club = env.provision_club(&founder, "Chess Masters Club").await;
    let president = Identity::user(founder.id);

    let roles = RoleService::new(&env.ctx);
    let officer = roles
        .create_role(
            president,
            club.club_id,
            CreateRoleRequest {
                name: "Event Officer".to_string(),
                description: String::new(),
                permissions: BTreeMap::new(),
            },
        )
        .await
        .unwrap();
    let officer_id = officer.id.parse().unwrap();

    enroll(&env, president, &club.access_code, &joiner, officer_id).await;

    let err = roles.delete_role(president, officer_id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::RoleInUse)));

    // After reassignment the role is free to go
    MemberService::new(&env.ctx)
        .assign_role(president, club.club_id, joiner.id, club.member_role.id)
        .await
        .unwrap();
    roles.delete_role(president, officer_id).await.unwrap();
}

#[tokio::test]
async fn test_assigned_role_must_belong_to_club() {
    let env = TestEnv::new();
    let founder_a = env.seed_user("Alex").await;
    let founder_b = env.seed_user("Blair").await;
    let joiner = env.seed_user("Casey").await;
    let club_a = env.provision_club(&founder_a, "Chess Masters Club").await;
    let club_b = env.provision_club(&founder_b, "Robotics Club").await;

    let members = MemberService::new(&env.ctx);
    let request = members
        .request_join(Identity::user(joiner.id), join_request(&club_a.access_code))
        .await
        .unwrap();

    let err = members
        .approve_join(
            Identity::user(founder_a.id),
            request.id.parse().unwrap(),
            club_b.member_role.id,
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::RoleClubMismatch)
    ));
}

// ============================================================================
// Presidency
// ============================================================================

#[tokio::test]
async fn test_president_transfer_keeps_exactly_one_flag() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;
    let successor = env.seed_user("Blair").await;
    let club = env.provision_club(&founder, "Chess Masters Club").await;
    let president = Identity::user(founder.id);

    enroll(&env, president, &club.access_code, &successor, club.member_role.id).await;

    MemberService::new(&env.ctx)
        .set_president(president, club.club_id, successor.id)
        .await
        .unwrap();

    assert_eq!(env.repos.president_flags(club.club_id), vec![successor.id]);
    let stored = env.repos.club_by_name("Chess Masters Club").unwrap();
    assert_eq!(stored.current_president_id, successor.id);

    // The old president no longer passes the president check
    let err = MemberService::new(&env.ctx)
        .set_president(president, club.club_id, founder.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::NotPresident)
    ));
}

#[tokio::test]
async fn test_concurrent_president_transfers_leave_one_president() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;
    let first_choice = env.seed_user("Blair").await;
    let second_choice = env.seed_user("Casey").await;
    let club = env.provision_club(&founder, "Chess Masters Club").await;
    let president = Identity::user(founder.id);

    enroll(&env, president, &club.access_code, &first_choice, club.member_role.id).await;
    enroll(&env, president, &club.access_code, &second_choice, club.member_role.id).await;

    let members = MemberService::new(&env.ctx);
    let (first, second) = tokio::join!(
        members.set_president(president, club.club_id, first_choice.id),
        members.set_president(president, club.club_id, second_choice.id),
    );

    // The winner moves the president pointer, so the loser fails the
    // president check
    assert_eq!(u8::from(first.is_ok()) + u8::from(second.is_ok()), 1);
    let first_ok = first.is_ok();
    let loser = if first_ok {
        second.unwrap_err()
    } else {
        first.unwrap_err()
    };
    assert!(matches!(
        loser,
        ServiceError::Domain(DomainError::NotPresident)
    ));

    let winner_id = if first_ok {
        first_choice.id
    } else {
        second_choice.id
    };
    assert_eq!(env.repos.president_flags(club.club_id), vec![winner_id]);
    let stored = env.repos.club_by_name("Chess Masters Club").unwrap();
    assert_eq!(stored.current_president_id, winner_id);
}

#[tokio::test]
async fn test_superuser_may_transfer_presidency() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;
    let successor = env.seed_user("Blair").await;
    let club = env.provision_club(&founder, "Chess Masters Club").await;

    enroll(
        &env,
        Identity::user(founder.id),
        &club.access_code,
        &successor,
        club.member_role.id,
    )
    .await;

    let admin = env.seed_superuser().await;
    MemberService::new(&env.ctx)
        .set_president(admin, club.club_id, successor.id)
        .await
        .unwrap();
    assert_eq!(env.repos.president_flags(club.club_id), vec![successor.id]);
}

#[tokio::test]
async fn test_president_cannot_be_removed() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;
    let club = env.provision_club(&founder, "Chess Masters Club").await;
    let admin = env.seed_superuser().await;

    // Not even a superuser gets past this without a transfer first
    for actor in [Identity::user(founder.id), admin] {
        let result = MemberService::new(&env.ctx)
            .remove_member(actor, club.club_id, founder.id)
            .await;
        match result {
            Err(ServiceError::Domain(DomainError::CannotRemovePresident)) => {}
            Err(ServiceError::PermissionDenied { .. }) => {}
            other => panic!("expected removal to fail, got {other:?}"),
        }
    }

    let membership = env.repos.membership(club.club_id, founder.id).unwrap();
    assert_eq!(membership.status, MembershipStatus::Active);
}

// ============================================================================
// Roster
// ============================================================================

#[tokio::test]
async fn test_roster_lists_president_first() {
    let env = TestEnv::new();
    let founder = env.seed_user("Alex").await;
    let joiner = env.seed_user("Blair").await;
    let club = env.provision_club(&founder, "Chess Masters Club").await;
    let president = Identity::user(founder.id);

    enroll(&env, president, &club.access_code, &joiner, club.member_role.id).await;

    let roster = MemberService::new(&env.ctx)
        .list_members(president, club.club_id)
        .await
        .unwrap();
    assert_eq!(roster.len(), 2);
    assert!(roster[0].is_president);
    assert_eq!(roster[0].display_name, founder.display_name());
    assert_eq!(roster[1].role_name, "Member");

    // Members hold view_members, so the roster is visible to them too
    let roster = MemberService::new(&env.ctx)
        .list_members(Identity::user(joiner.id), club.club_id)
        .await
        .unwrap();
    assert_eq!(roster.len(), 2);
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_register_and_login_round_trip() {
    let env = TestEnv::new();
    let auth = AuthService::new(&env.ctx);

    let registered = auth
        .register(RegisterRequest {
            email: "Casey@Example.com".to_string(),
            password: "Sturdy-Pass1".to_string(),
            first_name: "Casey".to_string(),
            last_name: "Jones".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(registered.email, "casey@example.com");

    let logged_in = auth
        .login(LoginRequest {
            email: "casey@example.com".to_string(),
            password: "Sturdy-Pass1".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(logged_in.id, registered.id);

    let err = auth
        .login(LoginRequest {
            email: "casey@example.com".to_string(),
            password: "wrong-password".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::App(_)));
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let env = TestEnv::new();
    let auth = AuthService::new(&env.ctx);

    let request = RegisterRequest {
        email: "dup@example.com".to_string(),
        password: "Sturdy-Pass1".to_string(),
        first_name: "Casey".to_string(),
        last_name: "Jones".to_string(),
    };
    auth.register(request.clone()).await.unwrap();
    let err = auth.register(request).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::EmailAlreadyExists)
    ));
}

// ============================================================================
// Envelope boundary
// ============================================================================

#[tokio::test]
async fn test_errors_surface_as_envelopes() {
    let env = TestEnv::new();
    let outsider = env.seed_user("Blair").await;

    let result = ClubService::new(&env.ctx)
        .pending_requests(Identity::user(outsider.id))
        .await;
    let envelope = Envelope::from(result);
    assert!(!envelope.ok);
    assert!(envelope.data.is_none());
    assert!(envelope.message.is_some());
}
