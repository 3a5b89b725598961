//! PostgreSQL implementation of ChatRoomRepository
//!
//! Rooms are provisioned alongside clubs; this repository only resolves
//! a club's general room for member enrollment.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use club_core::entities::ChatRoom;
use club_core::traits::{ChatRoomRepository, RepoResult};
use club_core::value_objects::Snowflake;

use crate::models::ChatRoomModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ChatRoomRepository
#[derive(Clone)]
pub struct PgChatRoomRepository {
    pool: PgPool,
}

impl PgChatRoomRepository {
    /// Create a new PgChatRoomRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatRoomRepository for PgChatRoomRepository {
    #[instrument(skip(self))]
    async fn find_general(&self, club_id: Snowflake) -> RepoResult<Option<ChatRoom>> {
        let result = sqlx::query_as::<_, ChatRoomModel>(
            r#"
            SELECT id, club_id, name, description, created_by, is_general, created_at
            FROM chat_rooms
            WHERE club_id = $1 AND is_general = TRUE
            "#,
        )
        .bind(club_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ChatRoom::from))
    }
}
