use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cinedeck_core::error::{ApiError, ErrorEnvelope};
use cinedeck_metadata::CatalogError;
use cinedeck_player::PlayerError;
use cinedeck_player::embed::list_providers;

/// Newtype wrapper so we can implement `IntoResponse` in this crate.
#[derive(Debug)]
pub struct AppError(pub ApiError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let envelope = ErrorEnvelope::from(&self.0);
        (status, Json(envelope)).into_response()
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        Self(e)
    }
}

impl From<PlayerError> for AppError {
    fn from(e: PlayerError) -> Self {
        let msg = e.to_string();
        Self(match e {
            PlayerError::UnknownProvider(provider) => {
                let known: Vec<&str> = list_providers().iter().map(|p| p.id.as_id()).collect();
                ApiError::bad_request(msg)
                    .with_detail("provider", provider)
                    .with_detail("known", known)
            }
            PlayerError::OutOfRangeSeason {
                season,
                season_count,
            } => ApiError::bad_request(msg)
                .with_detail("season", season)
                .with_detail("season_count", season_count),
            PlayerError::OutOfRangeEpisode { season, episode } => ApiError::bad_request(msg)
                .with_detail("season", season)
                .with_detail("episode", episode),
            PlayerError::StaleEpisodeData { catalog_id, season } => ApiError::conflict(msg)
                .with_detail("catalog_id", catalog_id)
                .with_detail("season", season),
            PlayerError::NotSeries => ApiError::conflict(msg),
        })
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        let msg = e.to_string();
        Self(match e {
            CatalogError::NotFound => ApiError::not_found("title not found in catalog"),
            CatalogError::Provider(_) | CatalogError::Network(_) => ApiError::upstream(msg),
            CatalogError::Config(_) => ApiError::internal(msg),
        })
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self(ApiError::bad_request(rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self(ApiError::bad_request(rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self(ApiError::bad_request(rejection.body_text()))
    }
}
