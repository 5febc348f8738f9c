//! Static TMDB genre tables.

use cinedeck_core::types::MediaKind;

pub static MOVIE_GENRES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

pub static TV_GENRES: &[(u32, &str)] = &[
    (10759, "Action & Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (10762, "Kids"),
    (9648, "Mystery"),
    (10763, "News"),
    (10764, "Reality"),
    (10765, "Sci-Fi & Fantasy"),
    (10766, "Soap"),
    (10767, "Talk"),
    (10768, "War & Politics"),
    (37, "Western"),
];

pub fn genre_name(id: u32, kind: MediaKind) -> Option<&'static str> {
    let table = match kind {
        MediaKind::Movie => MOVIE_GENRES,
        MediaKind::Tv => TV_GENRES,
    };
    table.iter().find(|(g, _)| *g == id).map(|(_, name)| *name)
}

/// Names for the given genre ids; unknown ids are skipped.
pub fn genre_names(ids: &[u32], kind: MediaKind) -> Vec<&'static str> {
    ids.iter().filter_map(|id| genre_name(*id, kind)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_ids_and_skips_unknown() {
        assert_eq!(
            genre_names(&[28, 878, 1], MediaKind::Movie),
            vec!["Action", "Science Fiction"]
        );
        assert_eq!(
            genre_names(&[10765, 28], MediaKind::Tv),
            vec!["Sci-Fi & Fantasy"]
        );
    }
}
