use sqlx::SqlitePool;
use tracing::info;

use storefront_core::{NewPlayerScore, PlayerScoreId, Result, TopScore, scoring_model};

use crate::sqlite::{ensure_schema, insert_player_score, top_scores};
use crate::unit::UnitOfWork;

/// Scoreboard backed by the `player_score` table.
///
/// Every submission is a new row; nothing is ever updated in place.
#[derive(Debug, Clone)]
pub struct ScoreService {
    pool: SqlitePool,
}

impl ScoreService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the scoreboard table if missing.
    pub async fn ensure_schema(&self) -> Result<()> {
        ensure_schema(&self.pool, &scoring_model()).await
    }

    pub async fn submit(&self, score: &NewPlayerScore) -> Result<PlayerScoreId> {
        let mut unit = UnitOfWork::begin(&self.pool).await?;
        let id = insert_player_score(unit.conn(), score).await?;
        unit.commit().await?;
        info!(
            event = "score_submitted",
            id = %id,
            player = %score.player,
            score = score.score
        );
        Ok(id)
    }

    /// Highest score per player, ordered by that score ascending.
    pub async fn top_scores(&self) -> Result<Vec<TopScore>> {
        top_scores(&self.pool).await
    }
}
