use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::{info, warn};

use storefront_core::{NewPlayerScore, TopScore};
use storefront_store::ScoreService;

use crate::error::ApiError;
use crate::text::render_scores_html;

/// Raw submission; both fields are validated by [`NewPlayerScore::from_form`].
#[derive(Debug, Deserialize)]
struct ScoreForm {
    player: Option<String>,
    score: Option<String>,
}

/// Build the scoring router.
pub fn router(scores: ScoreService) -> Router {
    Router::new()
        .route("/", get(scoreboard))
        .route("/score", post(submit_score))
        .route("/scores", get(list_scores))
        .route("/health", get(health))
        .with_state(scores)
}

/// Serve `router` on `listener` until ctrl-c.
pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(event = "http_listening", addr = %addr);
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(event = "http_shutdown"),
        Err(err) => warn!(event = "shutdown_signal_failed", error = %err),
    }
}

async fn submit_score(
    State(scores): State<ScoreService>,
    form: Result<Form<ScoreForm>, FormRejection>,
) -> Result<&'static str, ApiError> {
    let Form(form) = form?;
    let submission = NewPlayerScore::from_form(form.player.as_deref(), form.score.as_deref())
        .inspect_err(|err| info!(event = "score_rejected", reason = %err))?;
    scores.submit(&submission).await?;
    Ok("ok")
}

async fn list_scores(State(scores): State<ScoreService>) -> Result<Json<Vec<TopScore>>, ApiError> {
    let top = scores.top_scores().await?;
    info!(event = "scores_listed", players = top.len());
    Ok(Json(top))
}

async fn scoreboard(State(scores): State<ScoreService>) -> Result<Html<String>, ApiError> {
    let top = scores.top_scores().await?;
    Ok(Html(render_scores_html(&top)))
}

async fn health() -> &'static str {
    "ok"
}
