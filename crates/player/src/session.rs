//! Player session state machine.
//!
//! One `PlayerSession` lives for the whole application session. It tracks
//! what is open, where we are inside a series and which server is selected.
//! All mutation goes through the transition methods below.

use cinedeck_core::types::MediaKind;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::PlayerError;
use crate::embed::ServerName;
use crate::episodes::{EpisodeCount, EpisodeListRequest};

/// Coarse state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Closed,
    OpenMovie,
    OpenSeries,
}

/// Keys the player modal reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKey {
    ArrowRight,
    ArrowLeft,
    Escape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OpenMedia {
    pub(crate) kind: MediaKind,
    pub(crate) catalog_id: u64,
    pub(crate) title: String,
}

#[derive(Debug, Clone)]
pub struct PlayerSession {
    pub(crate) media: Option<OpenMedia>,
    pub(crate) season: u32,
    pub(crate) episode: u32,
    pub(crate) episode_count: EpisodeCount,
    pub(crate) season_count: u32,
    pub(crate) server: ServerName,
}

impl Default for PlayerSession {
    fn default() -> Self {
        Self {
            media: None,
            season: 1,
            episode: 1,
            episode_count: EpisodeCount::Known(1),
            season_count: 1,
            server: ServerName::DEFAULT,
        }
    }
}

/// Serializable view of the whole session, including the resolved embed URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub is_open: bool,
    pub state: SessionState,
    pub media_type: Option<MediaKind>,
    pub catalog_id: Option<u64>,
    pub title: Option<String>,
    pub season: u32,
    pub episode: u32,
    /// `None` while the episode list for the current season is pending.
    pub episode_count: Option<u32>,
    pub season_count: u32,
    pub selected_server: ServerName,
    pub server_display_name: &'static str,
    pub embed_url: Option<String>,
    pub can_go_next: bool,
    pub can_go_previous: bool,
    pub episode_request: Option<EpisodeListRequest>,
}

impl PlayerSession {
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn state(&self) -> SessionState {
        match &self.media {
            None => SessionState::Closed,
            Some(m) if m.kind == MediaKind::Movie => SessionState::OpenMovie,
            Some(_) => SessionState::OpenSeries,
        }
    }

    pub fn is_open(&self) -> bool {
        self.media.is_some()
    }

    pub fn media_kind(&self) -> Option<MediaKind> {
        self.media.as_ref().map(|m| m.kind)
    }

    pub fn catalog_id(&self) -> Option<u64> {
        self.media.as_ref().map(|m| m.catalog_id)
    }

    pub fn title(&self) -> Option<&str> {
        self.media.as_ref().map(|m| m.title.as_str())
    }

    pub fn season(&self) -> u32 {
        self.season
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn episode_count(&self) -> EpisodeCount {
        self.episode_count
    }

    pub fn season_count(&self) -> u32 {
        self.season_count
    }

    pub fn selected_server(&self) -> ServerName {
        self.server
    }

    fn is_series(&self) -> bool {
        self.state() == SessionState::OpenSeries
    }

    /// URL the playback surface should load, if anything is open.
    pub fn embed_url(&self) -> Option<String> {
        let media = self.media.as_ref()?;
        Some(match media.kind {
            MediaKind::Movie => self.server.movie_url(media.catalog_id),
            MediaKind::Tv => self
                .server
                .series_url(media.catalog_id, self.season, self.episode),
        })
    }

    /// Whether `next_episode` would move anywhere.
    pub fn can_go_next(&self) -> bool {
        if !self.is_series() {
            return false;
        }
        match self.episode_count {
            EpisodeCount::Pending => false,
            EpisodeCount::Known(n) => self.episode < n || self.season < self.season_count,
        }
    }

    /// Whether `previous_episode` would move anywhere.
    pub fn can_go_previous(&self) -> bool {
        self.is_series() && (self.episode > 1 || self.season > 1)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            is_open: self.is_open(),
            state: self.state(),
            media_type: self.media_kind(),
            catalog_id: self.catalog_id(),
            title: self.title().map(str::to_string),
            season: self.season,
            episode: self.episode,
            episode_count: self.episode_count.known(),
            season_count: self.season_count,
            selected_server: self.server,
            server_display_name: self.server.display_name(),
            embed_url: self.embed_url(),
            can_go_next: self.can_go_next(),
            can_go_previous: self.can_go_previous(),
            episode_request: self.episode_request(),
        }
    }

    // ---------------------------------------------------------------------
    // Transitions
    // ---------------------------------------------------------------------

    pub fn open_movie(&mut self, catalog_id: u64, title: impl Into<String>) {
        let before = self.embed_url();
        self.media = Some(OpenMedia {
            kind: MediaKind::Movie,
            catalog_id,
            title: title.into(),
        });
        self.season = 1;
        self.episode = 1;
        self.episode_count = EpisodeCount::Known(1);
        self.season_count = 1;
        self.settle(before);
    }

    /// Open a series at the given position. Bounds default to one season and
    /// an unknown episode count; the position is clamped into the bounds.
    pub fn open_tv_show(
        &mut self,
        catalog_id: u64,
        title: impl Into<String>,
        season: u32,
        episode: u32,
        episode_count: Option<u32>,
        season_count: Option<u32>,
    ) {
        let before = self.embed_url();
        let season_count = season_count.unwrap_or(1).max(1);
        let episode_count = match episode_count {
            Some(n) => EpisodeCount::Known(n.max(1)),
            None => EpisodeCount::Pending,
        };

        self.media = Some(OpenMedia {
            kind: MediaKind::Tv,
            catalog_id,
            title: title.into(),
        });
        self.season = season.clamp(1, season_count);
        self.episode = episode_count.clamp_episode(episode);
        self.episode_count = episode_count;
        self.season_count = season_count;
        self.settle(before);
    }

    /// Close the player. Season, episode and server survive for the next open.
    pub fn close(&mut self) {
        let before = self.embed_url();
        self.media = None;
        self.settle(before);
    }

    pub fn set_provider(&mut self, provider_id: &str) -> Result<(), PlayerError> {
        let server: ServerName = provider_id.parse()?;
        self.select_server(server);
        Ok(())
    }

    pub fn select_server(&mut self, server: ServerName) {
        let before = self.embed_url();
        self.server = server;
        self.settle(before);
    }

    /// Jump to the first episode of `season`. Out-of-range seasons are
    /// rejected without touching state.
    pub fn set_season(&mut self, season: u32) -> Result<(), PlayerError> {
        if !self.is_series() {
            return Err(PlayerError::NotSeries);
        }
        if season == 0 || season > self.season_count {
            return Err(PlayerError::OutOfRangeSeason {
                season,
                season_count: self.season_count,
            });
        }

        let before = self.embed_url();
        if season != self.season {
            self.season = season;
            self.episode_count = EpisodeCount::Pending;
        }
        self.episode = 1;
        self.settle(before);
        Ok(())
    }

    /// Jump to a specific episode, typically picked from a loaded list.
    pub fn set_episode(&mut self, season: u32, episode: u32) -> Result<(), PlayerError> {
        if !self.is_series() {
            return Err(PlayerError::NotSeries);
        }
        if season == 0 || season > self.season_count {
            return Err(PlayerError::OutOfRangeSeason {
                season,
                season_count: self.season_count,
            });
        }
        let exceeds_known = season == self.season
            && matches!(self.episode_count, EpisodeCount::Known(n) if episode > n);
        if episode == 0 || exceeds_known {
            return Err(PlayerError::OutOfRangeEpisode { season, episode });
        }

        let before = self.embed_url();
        if season != self.season {
            self.season = season;
            self.episode_count = EpisodeCount::Pending;
        }
        self.episode = episode;
        self.settle(before);
        Ok(())
    }

    /// Advance one episode, rolling into the next season after the last one.
    /// Returns `false` when there is nowhere to go, including while the
    /// current season's episode count is still unknown.
    pub fn next_episode(&mut self) -> Result<bool, PlayerError> {
        if !self.is_series() {
            return Err(PlayerError::NotSeries);
        }
        let EpisodeCount::Known(count) = self.episode_count else {
            debug!(season = self.season, "episode count pending, not advancing");
            return Ok(false);
        };

        let before = self.embed_url();
        if self.episode < count {
            self.episode += 1;
        } else if self.season < self.season_count {
            self.season += 1;
            self.episode = 1;
            self.episode_count = EpisodeCount::Pending;
        } else {
            return Ok(false);
        }
        self.settle(before);
        Ok(true)
    }

    /// Step back one episode. Crossing a season boundary lands on episode 1 of
    /// the previous season, not its last episode.
    pub fn previous_episode(&mut self) -> Result<bool, PlayerError> {
        if !self.is_series() {
            return Err(PlayerError::NotSeries);
        }

        let before = self.embed_url();
        if self.episode > 1 {
            self.episode -= 1;
        } else if self.season > 1 {
            self.season -= 1;
            self.episode = 1;
            self.episode_count = EpisodeCount::Pending;
        } else {
            return Ok(false);
        }
        self.settle(before);
        Ok(true)
    }

    /// Apply a key press. Arrows navigate episodes of an open series, Escape
    /// closes; anything while closed is ignored. Returns whether state moved.
    pub fn handle_key(&mut self, key: PlayerKey) -> bool {
        if !self.is_open() {
            return false;
        }
        match key {
            PlayerKey::Escape => {
                self.close();
                true
            }
            PlayerKey::ArrowRight if self.is_series() => self.next_episode().unwrap_or(false),
            PlayerKey::ArrowLeft if self.is_series() => {
                self.previous_episode().unwrap_or(false)
            }
            PlayerKey::ArrowRight | PlayerKey::ArrowLeft => false,
        }
    }

    pub(crate) fn settle(&self, before: Option<String>) {
        let after = self.embed_url();
        if after != before {
            debug!(
                server = %self.server,
                embed_url = after.as_deref().unwrap_or("<closed>"),
                "embed url changed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(episode_count: Option<u32>, season_count: u32) -> PlayerSession {
        let mut s = PlayerSession::new();
        s.open_tv_show(5, "Show", 1, 1, episode_count, Some(season_count));
        s
    }

    #[test]
    fn fresh_session_is_closed() {
        let s = PlayerSession::new();
        assert_eq!(s.state(), SessionState::Closed);
        assert_eq!(s.selected_server(), ServerName::VidsrcCC);
        assert_eq!((s.season(), s.episode()), (1, 1));
        assert!(s.embed_url().is_none());
    }

    #[test]
    fn open_movie_resets_position() {
        let mut s = series(Some(10), 3);
        s.set_episode(2, 4).unwrap();
        s.open_movie(603, "The Matrix");

        assert_eq!(s.state(), SessionState::OpenMovie);
        assert_eq!((s.season(), s.episode()), (1, 1));
        assert_eq!(
            s.embed_url().as_deref(),
            Some("https://vidsrc.cc/v2/embed/movie/603")
        );
    }

    #[test]
    fn open_tv_show_clamps_into_bounds() {
        let mut s = PlayerSession::new();
        s.open_tv_show(5, "Show", 9, 40, Some(12), Some(4));
        assert_eq!((s.season(), s.episode()), (4, 12));

        s.open_tv_show(5, "Show", 0, 0, Some(12), Some(4));
        assert_eq!((s.season(), s.episode()), (1, 1));
    }

    #[test]
    fn open_tv_show_without_count_is_pending() {
        let mut s = PlayerSession::new();
        s.open_tv_show(5, "Show", 1, 7, None, None);
        assert_eq!(s.episode_count(), EpisodeCount::Pending);
        assert_eq!(s.episode(), 7);
        assert_eq!(s.season_count(), 1);
    }

    #[test]
    fn close_keeps_position_and_server() {
        let mut s = series(Some(10), 2);
        s.select_server(ServerName::VidLink);
        s.set_episode(1, 6).unwrap();
        s.close();

        assert!(!s.is_open());
        assert_eq!(s.title(), None);
        assert_eq!(s.catalog_id(), None);
        assert_eq!(s.media_kind(), None);
        assert_eq!((s.season(), s.episode()), (1, 6));
        assert_eq!(s.selected_server(), ServerName::VidLink);
    }

    #[test]
    fn set_provider_switches_url() {
        let mut s = series(Some(10), 1);
        s.set_provider("VidsrcXYZ").unwrap();
        assert_eq!(
            s.embed_url().as_deref(),
            Some("https://vidsrc.xyz/embed/tv/5/1-1")
        );
    }

    #[test]
    fn set_season_resets_episode_and_invalidates_count() {
        let mut s = series(Some(10), 3);
        s.set_episode(1, 5).unwrap();
        s.set_season(3).unwrap();

        assert_eq!((s.season(), s.episode()), (3, 1));
        assert_eq!(s.episode_count(), EpisodeCount::Pending);
    }

    #[test]
    fn set_season_same_season_keeps_count() {
        let mut s = series(Some(10), 3);
        s.set_episode(1, 5).unwrap();
        s.set_season(1).unwrap();
        assert_eq!(s.episode(), 1);
        assert_eq!(s.episode_count(), EpisodeCount::Known(10));
    }

    #[test]
    fn set_season_out_of_range_is_rejected() {
        let mut s = series(Some(10), 2);
        s.set_episode(1, 3).unwrap();

        assert_eq!(
            s.set_season(3),
            Err(PlayerError::OutOfRangeSeason {
                season: 3,
                season_count: 2
            })
        );
        assert!(s.set_season(0).is_err());
        assert_eq!((s.season(), s.episode()), (1, 3));
        assert_eq!(s.episode_count(), EpisodeCount::Known(10));
    }

    #[test]
    fn series_operations_need_open_series() {
        let mut s = PlayerSession::new();
        assert_eq!(s.set_season(1), Err(PlayerError::NotSeries));
        assert_eq!(s.next_episode(), Err(PlayerError::NotSeries));

        s.open_movie(1, "Movie");
        assert_eq!(s.previous_episode(), Err(PlayerError::NotSeries));
        assert_eq!(s.set_episode(1, 2), Err(PlayerError::NotSeries));
    }

    #[test]
    fn set_episode_validates_against_known_count() {
        let mut s = series(Some(8), 2);
        assert_eq!(
            s.set_episode(1, 9),
            Err(PlayerError::OutOfRangeEpisode {
                season: 1,
                episode: 9
            })
        );
        assert!(s.set_episode(1, 0).is_err());

        // A different season has no known count yet.
        s.set_episode(2, 14).unwrap();
        assert_eq!((s.season(), s.episode()), (2, 14));
        assert_eq!(s.episode_count(), EpisodeCount::Pending);
    }

    #[test]
    fn previous_at_first_episode_is_noop() {
        let mut s = series(Some(3), 1);
        assert!(!s.can_go_previous());
        assert_eq!(s.previous_episode(), Ok(false));
        assert_eq!((s.season(), s.episode()), (1, 1));
    }

    #[test]
    fn next_at_last_episode_of_last_season_is_noop() {
        let mut s = PlayerSession::new();
        s.open_tv_show(5, "Show", 2, 6, Some(6), Some(2));
        assert!(!s.can_go_next());
        assert_eq!(s.next_episode(), Ok(false));
        assert_eq!((s.season(), s.episode()), (2, 6));
    }

    #[test]
    fn keys_drive_navigation() {
        let mut s = series(Some(3), 1);
        assert!(s.handle_key(PlayerKey::ArrowRight));
        assert_eq!(s.episode(), 2);
        assert!(s.handle_key(PlayerKey::ArrowLeft));
        assert_eq!(s.episode(), 1);
        assert!(s.handle_key(PlayerKey::Escape));
        assert!(!s.is_open());
        assert!(!s.handle_key(PlayerKey::Escape));
    }

    #[test]
    fn arrows_ignored_for_movies() {
        let mut s = PlayerSession::new();
        s.open_movie(603, "The Matrix");
        assert!(!s.handle_key(PlayerKey::ArrowRight));
        assert!(!s.handle_key(PlayerKey::ArrowLeft));
        assert!(s.is_open());
    }

    #[test]
    fn snapshot_serializes() {
        let mut s = series(Some(10), 2);
        s.next_episode().unwrap();
        let json = serde_json::to_value(s.snapshot()).unwrap();

        assert_eq!(json["is_open"], true);
        assert_eq!(json["state"], "OpenSeries");
        assert_eq!(json["media_type"], "tv");
        assert_eq!(json["episode"], 2);
        assert_eq!(json["episode_count"], 10);
        assert_eq!(json["selected_server"], "VidsrcCC");
        assert_eq!(json["server_display_name"], "Vanilla");
        assert_eq!(json["embed_url"], "https://vidsrc.cc/v2/embed/tv/5/1/2");
        assert!(json["episode_request"].is_null());
    }
}
