use cinedeck_core::types::{MediaKind, TimeWindow, TrendingScope};

use crate::{CatalogError, MediaSummary, MovieDetails, Page, SeasonDetails, TvDetails};

/// Curated movie listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieList {
    Popular,
    TopRated,
    Upcoming,
    NowPlaying,
}

impl MovieList {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::TopRated => "top_rated",
            Self::Upcoming => "upcoming",
            Self::NowPlaying => "now_playing",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "popular" => Some(Self::Popular),
            "top_rated" => Some(Self::TopRated),
            "upcoming" => Some(Self::Upcoming),
            "now_playing" => Some(Self::NowPlaying),
            _ => None,
        }
    }
}

/// Curated TV listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TvList {
    Popular,
    TopRated,
    OnTheAir,
    AiringToday,
}

impl TvList {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::TopRated => "top_rated",
            Self::OnTheAir => "on_the_air",
            Self::AiringToday => "airing_today",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "popular" => Some(Self::Popular),
            "top_rated" => Some(Self::TopRated),
            "on_the_air" => Some(Self::OnTheAir),
            "airing_today" => Some(Self::AiringToday),
            _ => None,
        }
    }
}

/// What a search covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    #[default]
    Multi,
    Movie,
    Tv,
}

impl SearchScope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Multi => "multi",
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "multi" => Some(Self::Multi),
            "movie" => Some(Self::Movie),
            "tv" => Some(Self::Tv),
            _ => None,
        }
    }
}

/// Read-only access to a movie/TV catalog.
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn trending(
        &self,
        scope: TrendingScope,
        window: TimeWindow,
    ) -> Result<Page<MediaSummary>, CatalogError>;

    async fn movie_list(&self, list: MovieList, page: u32)
    -> Result<Page<MediaSummary>, CatalogError>;

    async fn tv_list(&self, list: TvList, page: u32) -> Result<Page<MediaSummary>, CatalogError>;

    /// Full movie record with credits, videos, recommendations and release dates.
    async fn movie_details(&self, id: u64) -> Result<MovieDetails, CatalogError>;

    /// Full series record with credits, videos, recommendations and content ratings.
    async fn tv_details(&self, id: u64) -> Result<TvDetails, CatalogError>;

    /// Episode list for one season of a series.
    async fn season_details(&self, tv_id: u64, season: u32)
    -> Result<SeasonDetails, CatalogError>;

    async fn search(
        &self,
        scope: SearchScope,
        query: &str,
        page: u32,
    ) -> Result<Page<MediaSummary>, CatalogError>;

    /// Filtered listing; `filters` are passed through as query parameters.
    async fn discover(
        &self,
        kind: MediaKind,
        filters: &[(String, String)],
        page: u32,
    ) -> Result<Page<MediaSummary>, CatalogError>;
}
