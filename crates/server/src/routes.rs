use std::collections::HashMap;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use cinedeck_core::error::ApiError;
use cinedeck_core::types::{MediaKind, TimeWindow, TrendingScope};
use cinedeck_metadata::genres::genre_names;
use cinedeck_metadata::helpers::{self, ImageSize};
use cinedeck_metadata::provider::{MovieList, SearchScope, TvList};
use cinedeck_metadata::{MediaSummary, MovieDetails, Page, SeasonDetails, TvDetails};
use cinedeck_player::embed::{ProviderInfo, list_providers};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::AppError;
use crate::extract::{ApiPath, ApiQuery};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/servers", get(list_servers))
        .route("/seasons", get(get_season))
        .nest("/player", crate::player::player_router())
        .nest("/catalog", catalog_router())
}

fn catalog_router() -> Router<AppState> {
    Router::new()
        .route("/trending/{scope}/{window}", get(trending))
        .route("/lists/movie/{list}", get(movie_list))
        .route("/lists/tv/{list}", get(tv_list))
        .route("/movie/{slug}", get(movie_details))
        .route("/tv/{slug}", get(tv_details))
        .route("/tv/{id}/season/{season}", get(season_details))
        .route("/search", get(search))
        .route("/discover/{kind}", get(discover))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    catalog: String,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        catalog: state.catalog.name().to_string(),
    })
}

// ---------------------------------------------------------------------------
// Embed servers
// ---------------------------------------------------------------------------

async fn list_servers() -> Json<Vec<ProviderInfo>> {
    Json(list_providers().iter().map(ProviderInfo::from).collect())
}

// ---------------------------------------------------------------------------
// Season episode lists (episode panel)
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeasonQuery {
    tv_id: Option<String>,
    season_number: Option<String>,
}

async fn get_season(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<SeasonQuery>,
) -> Result<Json<SeasonDetails>, AppError> {
    let (Some(tv_id), Some(season)) = (q.tv_id, q.season_number) else {
        return Err(ApiError::bad_request("Missing tvId or seasonNumber").into());
    };
    let (Ok(tv_id), Ok(season)) = (tv_id.parse::<u64>(), season.parse::<u32>()) else {
        return Err(ApiError::bad_request("tvId and seasonNumber must be integers").into());
    };

    match state.catalog.season_details(tv_id, season).await {
        Ok(details) => Ok(Json(details)),
        Err(e) => {
            error!(tv_id, season, error = %e, "failed to fetch season details");
            Err(ApiError::internal("Failed to fetch season details").into())
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog passthrough
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PageQuery {
    page: Option<u32>,
}

async fn trending(
    State(state): State<AppState>,
    ApiPath((scope, window)): ApiPath<(String, String)>,
) -> Result<Json<Page<ListingItem>>, AppError> {
    let scope = TrendingScope::from_str(&scope)
        .ok_or_else(|| ApiError::bad_request(format!("unknown trending scope: {scope}")))?;
    let window = TimeWindow::from_str(&window)
        .ok_or_else(|| ApiError::bad_request(format!("unknown time window: {window}")))?;
    let kind = match scope {
        TrendingScope::All => None,
        TrendingScope::Movie => Some(MediaKind::Movie),
        TrendingScope::Tv => Some(MediaKind::Tv),
    };
    let page = state.catalog.trending(scope, window).await?;
    Ok(Json(listing(page, kind, &state.image_base_url)))
}

async fn movie_list(
    State(state): State<AppState>,
    ApiPath(list): ApiPath<String>,
    ApiQuery(q): ApiQuery<PageQuery>,
) -> Result<Json<Page<ListingItem>>, AppError> {
    let list = MovieList::from_str(&list)
        .ok_or_else(|| ApiError::not_found(format!("no movie list named {list}")))?;
    let page = state.catalog.movie_list(list, q.page.unwrap_or(1)).await?;
    Ok(Json(listing(page, Some(MediaKind::Movie), &state.image_base_url)))
}

async fn tv_list(
    State(state): State<AppState>,
    ApiPath(list): ApiPath<String>,
    ApiQuery(q): ApiQuery<PageQuery>,
) -> Result<Json<Page<ListingItem>>, AppError> {
    let list = TvList::from_str(&list)
        .ok_or_else(|| ApiError::not_found(format!("no tv list named {list}")))?;
    let page = state.catalog.tv_list(list, q.page.unwrap_or(1)).await?;
    Ok(Json(listing(page, Some(MediaKind::Tv), &state.image_base_url)))
}

/// A listing entry with the display fields a card needs.
#[derive(Serialize)]
struct ListingItem {
    #[serde(flatten)]
    summary: MediaSummary,
    display_title: String,
    slug: String,
    year: Option<i32>,
    genre_names: Vec<&'static str>,
    poster_url: String,
}

/// Decorate a page of summaries. `kind` is the kind of every entry on the
/// page when known; mixed pages fall back to each entry's `media_type`.
fn listing(
    page: Page<MediaSummary>,
    kind: Option<MediaKind>,
    image_base: &str,
) -> Page<ListingItem> {
    let results = page
        .results
        .into_iter()
        .map(|summary| {
            let kind = kind
                .or_else(|| summary.media_type.as_deref().and_then(MediaKind::from_str))
                .unwrap_or(MediaKind::Movie);
            let display_title = helpers::display_title(&summary).to_string();
            ListingItem {
                slug: helpers::create_slug(&display_title, summary.id),
                display_title,
                year: helpers::release_year(&summary),
                genre_names: genre_names(&summary.genre_ids, kind),
                poster_url: helpers::image_url(
                    image_base,
                    summary.poster_path.as_deref(),
                    ImageSize::W342,
                ),
                summary,
            }
        })
        .collect();

    Page {
        page: page.page,
        results,
        total_pages: page.total_pages,
        total_results: page.total_results,
    }
}

/// Catalog id from either a bare id (`603`) or a slug (`the-matrix-603`).
fn catalog_id(slug: &str) -> Result<u64, AppError> {
    helpers::id_from_slug(slug)
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::bad_request(format!("no catalog id in {slug:?}")).into())
}

/// Derived display fields shared by movie and series detail responses.
#[derive(Serialize)]
struct TitleView {
    display_title: String,
    year: Option<i32>,
    slug: String,
    certification: Option<String>,
    runtime_minutes: Option<u32>,
    genre_names: Vec<String>,
    poster_url: String,
    backdrop_url: String,
}

impl TitleView {
    fn new(
        base: &MediaSummary,
        image_base: &str,
        certification: Option<&str>,
        runtime_minutes: Option<u32>,
        genre_names: Vec<String>,
    ) -> Self {
        let display_title = helpers::display_title(base).to_string();
        Self {
            year: helpers::release_year(base),
            slug: helpers::create_slug(&display_title, base.id),
            display_title,
            certification: certification.map(str::to_string),
            runtime_minutes,
            genre_names,
            poster_url: helpers::image_url(
                image_base,
                base.poster_path.as_deref(),
                ImageSize::W500,
            ),
            backdrop_url: helpers::backdrop_url(
                image_base,
                base.backdrop_path.as_deref(),
                ImageSize::W1280,
            ),
        }
    }
}

#[derive(Serialize)]
struct MovieResponse {
    #[serde(flatten)]
    details: MovieDetails,
    view: TitleView,
}

#[derive(Serialize)]
struct TvResponse {
    #[serde(flatten)]
    details: TvDetails,
    view: TitleView,
}

async fn movie_details(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
) -> Result<Json<MovieResponse>, AppError> {
    let details = state.catalog.movie_details(catalog_id(&slug)?).await?;
    let view = TitleView::new(
        &details.base,
        &state.image_base_url,
        helpers::movie_certification(&details),
        helpers::movie_runtime(&details),
        details.genres.iter().map(|g| g.name.clone()).collect(),
    );
    Ok(Json(MovieResponse { details, view }))
}

async fn tv_details(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
) -> Result<Json<TvResponse>, AppError> {
    let details = state.catalog.tv_details(catalog_id(&slug)?).await?;
    let view = TitleView::new(
        &details.base,
        &state.image_base_url,
        helpers::tv_certification(&details),
        helpers::tv_runtime(&details),
        details.genres.iter().map(|g| g.name.clone()).collect(),
    );
    Ok(Json(TvResponse { details, view }))
}

async fn season_details(
    State(state): State<AppState>,
    ApiPath((id, season)): ApiPath<(u64, u32)>,
) -> Result<Json<SeasonDetails>, AppError> {
    Ok(Json(state.catalog.season_details(id, season).await?))
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    query: String,
    page: Option<u32>,
    scope: Option<String>,
}

async fn search(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<SearchQuery>,
) -> Result<Json<Page<ListingItem>>, AppError> {
    let scope = match q.scope.as_deref() {
        None => SearchScope::default(),
        Some(s) => SearchScope::from_str(s)
            .ok_or_else(|| ApiError::bad_request(format!("unknown search scope: {s}")))?,
    };

    let query = q.query.trim();
    if query.is_empty() {
        return Ok(Json(Page {
            page: 1,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }));
    }

    let kind = match scope {
        SearchScope::Multi => None,
        SearchScope::Movie => Some(MediaKind::Movie),
        SearchScope::Tv => Some(MediaKind::Tv),
    };
    let page = state.catalog.search(scope, query, q.page.unwrap_or(1)).await?;
    Ok(Json(listing(page, kind, &state.image_base_url)))
}

async fn discover(
    State(state): State<AppState>,
    ApiPath(kind): ApiPath<String>,
    ApiQuery(mut params): ApiQuery<HashMap<String, String>>,
) -> Result<Json<Page<ListingItem>>, AppError> {
    let kind = MediaKind::from_str(&kind)
        .ok_or_else(|| ApiError::bad_request(format!("unknown media kind: {kind}")))?;
    let page = match params.remove("page") {
        Some(p) => p
            .parse()
            .map_err(|_| ApiError::bad_request(format!("invalid page: {p}")))?,
        None => 1,
    };
    let mut filters: Vec<(String, String)> = params.into_iter().collect();
    filters.sort();
    let results = state.catalog.discover(kind, &filters, page).await?;
    Ok(Json(listing(results, Some(kind), &state.image_base_url)))
}
