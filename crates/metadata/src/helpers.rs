//! Presentation helpers over catalog records.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::{MediaSummary, MovieDetails, TvDetails};

pub const POSTER_PLACEHOLDER: &str = "/placeholder-poster.svg";
pub const BACKDROP_PLACEHOLDER: &str = "/placeholder-backdrop.svg";

/// Image widths served by the catalog's image CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    W92,
    W154,
    W185,
    W300,
    W342,
    W500,
    W780,
    W1280,
    Original,
}

impl ImageSize {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::W92 => "w92",
            Self::W154 => "w154",
            Self::W185 => "w185",
            Self::W300 => "w300",
            Self::W342 => "w342",
            Self::W500 => "w500",
            Self::W780 => "w780",
            Self::W1280 => "w1280",
            Self::Original => "original",
        }
    }
}

pub fn image_url(image_base: &str, path: Option<&str>, size: ImageSize) -> String {
    match path {
        Some(p) if !p.is_empty() => format!("{image_base}/{}{p}", size.as_str()),
        _ => POSTER_PLACEHOLDER.to_string(),
    }
}

pub fn backdrop_url(image_base: &str, path: Option<&str>, size: ImageSize) -> String {
    match path {
        Some(p) if !p.is_empty() => format!("{image_base}/{}{p}", size.as_str()),
        _ => BACKDROP_PLACEHOLDER.to_string(),
    }
}

/// Best available title: title, name, original title, original name.
pub fn display_title(item: &MediaSummary) -> &str {
    [
        &item.title,
        &item.name,
        &item.original_title,
        &item.original_name,
    ]
    .into_iter()
    .flatten()
    .map(String::as_str)
    .find(|s| !s.is_empty())
    .unwrap_or("Unknown")
}

pub fn release_year(item: &MediaSummary) -> Option<i32> {
    let date = item
        .release_date
        .as_deref()
        .filter(|d| !d.is_empty())
        .or(item.first_air_date.as_deref())?;
    NaiveDate::parse_from_str(date.get(..10)?, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

static RE_SLUG_STRIP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").unwrap());
static RE_SLUG_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static RE_SLUG_DASH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());

/// URL slug of the form `title-words-{id}`.
pub fn create_slug(title: &str, id: u64) -> String {
    let lower = title.to_lowercase();
    let stripped = RE_SLUG_STRIP.replace_all(&lower, "");
    let dashed = RE_SLUG_SPACE.replace_all(&stripped, "-");
    let collapsed = RE_SLUG_DASH.replace_all(&dashed, "-");
    format!("{}-{id}", collapsed.trim())
}

/// Catalog id from the trailing segment of a slug.
pub fn id_from_slug(slug: &str) -> Option<u64> {
    slug.rsplit('-').next()?.parse().ok()
}

/// US certification (e.g. `PG-13`) from the release-date records.
pub fn movie_certification(movie: &MovieDetails) -> Option<&str> {
    movie
        .release_dates
        .results
        .iter()
        .find(|r| r.iso_3166_1 == "US")?
        .release_dates
        .iter()
        .map(|rd| rd.certification.as_str())
        .find(|c| !c.is_empty())
}

/// US content rating (e.g. `TV-MA`).
pub fn tv_certification(tv: &TvDetails) -> Option<&str> {
    tv.content_ratings
        .results
        .iter()
        .find(|r| r.iso_3166_1 == "US")
        .map(|r| r.rating.as_str())
        .filter(|r| !r.is_empty())
}

pub fn movie_runtime(movie: &MovieDetails) -> Option<u32> {
    movie.runtime.filter(|r| *r > 0)
}

pub fn tv_runtime(tv: &TvDetails) -> Option<u32> {
    tv.episode_run_time.first().copied().filter(|r| *r > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ContentRating, ReleaseDate, ReleaseDatesResult};

    fn summary() -> MediaSummary {
        MediaSummary {
            id: 1,
            ..Default::default()
        }
    }

    #[test]
    fn image_urls_fall_back_to_placeholders() {
        let base = "https://image.tmdb.org/t/p";
        assert_eq!(
            image_url(base, Some("/a.jpg"), ImageSize::W500),
            "https://image.tmdb.org/t/p/w500/a.jpg"
        );
        assert_eq!(image_url(base, None, ImageSize::W500), POSTER_PLACEHOLDER);
        assert_eq!(
            backdrop_url(base, Some(""), ImageSize::W1280),
            BACKDROP_PLACEHOLDER
        );
    }

    #[test]
    fn title_prefers_title_then_name() {
        let mut item = summary();
        assert_eq!(display_title(&item), "Unknown");
        item.original_name = Some("Dark".into());
        assert_eq!(display_title(&item), "Dark");
        item.name = Some("Dark (2017)".into());
        assert_eq!(display_title(&item), "Dark (2017)");
        item.title = Some("".into());
        assert_eq!(display_title(&item), "Dark (2017)");
    }

    #[test]
    fn release_year_from_either_date() {
        let mut item = summary();
        assert_eq!(release_year(&item), None);
        item.first_air_date = Some("2008-01-20".into());
        assert_eq!(release_year(&item), Some(2008));
        item.release_date = Some("2010-07-16".into());
        assert_eq!(release_year(&item), Some(2010));
        item.release_date = Some("soon".into());
        assert_eq!(release_year(&item), None);
    }

    #[test]
    fn slugs() {
        assert_eq!(create_slug("The Matrix", 603), "the-matrix-603");
        assert_eq!(
            create_slug("Spider-Man: Across the Spider-Verse", 569094),
            "spider-man-across-the-spider-verse-569094"
        );
        assert_eq!(create_slug("  Amélie  ", 194), "-amlie--194");
        assert_eq!(id_from_slug("the-matrix-603"), Some(603));
        assert_eq!(id_from_slug("no-id-here"), None);
    }

    #[test]
    fn certifications() {
        let json = serde_json::json!({ "id": 1, "title": "x" });
        let mut movie: MovieDetails = serde_json::from_value(json).unwrap();
        assert_eq!(movie_certification(&movie), None);
        movie.release_dates.results = vec![ReleaseDatesResult {
            iso_3166_1: "US".into(),
            release_dates: vec![
                ReleaseDate {
                    certification: "".into(),
                    release_date: "".into(),
                    kind: 1,
                },
                ReleaseDate {
                    certification: "PG-13".into(),
                    release_date: "".into(),
                    kind: 3,
                },
            ],
        }];
        assert_eq!(movie_certification(&movie), Some("PG-13"));

        let json = serde_json::json!({ "id": 2, "name": "y", "episode_run_time": [0] });
        let mut tv: TvDetails = serde_json::from_value(json).unwrap();
        assert_eq!(tv_runtime(&tv), None);
        tv.content_ratings.results = vec![ContentRating {
            iso_3166_1: "US".into(),
            rating: "TV-MA".into(),
        }];
        assert_eq!(tv_certification(&tv), Some("TV-MA"));
    }
}
