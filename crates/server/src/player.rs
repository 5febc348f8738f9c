//! HTTP surface over the shared player session.

use axum::extract::State;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use cinedeck_core::error::ApiError;
use cinedeck_core::types::MediaKind;
use cinedeck_metadata::Episode;
use cinedeck_player::PlayerError;
use cinedeck_player::episodes::EpisodeListRequest;
use cinedeck_player::session::{PlayerKey, SessionSnapshot};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::AppError;
use crate::extract::ApiJson;
use crate::state::AppState;

pub fn player_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_session))
        .route("/movie", post(open_movie))
        .route("/tv", post(open_tv_show))
        .route("/close", post(close))
        .route("/server", put(set_server))
        .route("/season", put(set_season))
        .route("/episode", put(set_episode))
        .route("/next", post(next_episode))
        .route("/previous", post(previous_episode))
        .route("/key", post(press_key))
        .route("/episodes/sync", post(sync_episodes))
}

#[derive(Deserialize)]
pub struct OpenMovieRequest {
    pub catalog_id: u64,
    pub title: String,
}

#[derive(Deserialize)]
pub struct OpenTvRequest {
    pub catalog_id: u64,
    pub title: String,
    #[serde(default = "first")]
    pub season: u32,
    #[serde(default = "first")]
    pub episode: u32,
    pub episode_count: Option<u32>,
    pub season_count: Option<u32>,
}

fn first() -> u32 {
    1
}

#[derive(Deserialize)]
pub struct ServerRequest {
    pub server: String,
}

#[derive(Deserialize)]
pub struct SeasonRequest {
    pub season: u32,
}

#[derive(Deserialize)]
pub struct EpisodeRequest {
    pub season: u32,
    pub episode: u32,
}

#[derive(Deserialize)]
pub struct KeyRequest {
    pub key: PlayerKey,
}

#[derive(Serialize)]
pub struct StepResponse {
    pub moved: bool,
    pub session: SessionSnapshot,
}

#[derive(Serialize)]
pub struct EpisodeSyncResponse {
    pub applied: bool,
    pub season: u32,
    pub episodes: Vec<Episode>,
    pub session: SessionSnapshot,
}

fn require_catalog_id(id: u64) -> Result<(), AppError> {
    if id == 0 {
        return Err(ApiError::bad_request("catalog_id must be positive").into());
    }
    Ok(())
}

async fn get_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.player.lock().await.snapshot())
}

async fn open_movie(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<OpenMovieRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    require_catalog_id(body.catalog_id)?;
    let mut player = state.player.lock().await;
    player.open_movie(body.catalog_id, body.title);
    info!(catalog_id = body.catalog_id, "player opened movie");
    Ok(Json(player.snapshot()))
}

async fn open_tv_show(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<OpenTvRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    require_catalog_id(body.catalog_id)?;
    let mut player = state.player.lock().await;
    player.open_tv_show(
        body.catalog_id,
        body.title,
        body.season,
        body.episode,
        body.episode_count,
        body.season_count,
    );
    info!(
        catalog_id = body.catalog_id,
        season = player.season(),
        episode = player.episode(),
        "player opened series"
    );
    Ok(Json(player.snapshot()))
}

async fn close(State(state): State<AppState>) -> Json<SessionSnapshot> {
    let mut player = state.player.lock().await;
    player.close();
    Json(player.snapshot())
}

async fn set_server(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ServerRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let mut player = state.player.lock().await;
    player.set_provider(&body.server)?;
    Ok(Json(player.snapshot()))
}

async fn set_season(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SeasonRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let mut player = state.player.lock().await;
    player.set_season(body.season)?;
    Ok(Json(player.snapshot()))
}

async fn set_episode(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<EpisodeRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let mut player = state.player.lock().await;
    player.set_episode(body.season, body.episode)?;
    Ok(Json(player.snapshot()))
}

async fn next_episode(State(state): State<AppState>) -> Result<Json<StepResponse>, AppError> {
    let mut player = state.player.lock().await;
    let moved = player.next_episode()?;
    Ok(Json(StepResponse {
        moved,
        session: player.snapshot(),
    }))
}

async fn previous_episode(
    State(state): State<AppState>,
) -> Result<Json<StepResponse>, AppError> {
    let mut player = state.player.lock().await;
    let moved = player.previous_episode()?;
    Ok(Json(StepResponse {
        moved,
        session: player.snapshot(),
    }))
}

async fn press_key(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<KeyRequest>,
) -> Json<StepResponse> {
    let mut player = state.player.lock().await;
    let moved = player.handle_key(body.key);
    Json(StepResponse {
        moved,
        session: player.snapshot(),
    })
}

/// Fetch the episode list for the session's current season and feed its
/// length back into the session. The lock is not held across the fetch, so
/// the session may have moved on by the time the list arrives; in that case
/// the count is discarded and `applied` is false.
async fn sync_episodes(
    State(state): State<AppState>,
) -> Result<Json<EpisodeSyncResponse>, AppError> {
    let request = {
        let player = state.player.lock().await;
        let catalog_id = player
            .catalog_id()
            .filter(|_| player.media_kind() == Some(MediaKind::Tv))
            .ok_or(PlayerError::NotSeries)?;
        player.episode_request().unwrap_or(EpisodeListRequest {
            catalog_id,
            season: player.season(),
        })
    };

    let season = state
        .catalog
        .season_details(request.catalog_id, request.season)
        .await?;

    let mut player = state.player.lock().await;
    let applied = match player.apply_episode_count(request, season.episodes.len()) {
        Ok(_) => true,
        Err(PlayerError::StaleEpisodeData { .. }) => {
            debug!(season = request.season, "episode list arrived for abandoned season");
            false
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Json(EpisodeSyncResponse {
        applied,
        season: request.season,
        episodes: season.episodes,
        session: player.snapshot(),
    }))
}
