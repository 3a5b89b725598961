//! Repository traits (ports)

mod repositories;

pub use repositories::{
    ChatRoomRepository, ClubRepository, CreationRequestRepository, JoinRequestRepository,
    MemberRepository, RepoResult, RoleRepository, UserRepository,
};
