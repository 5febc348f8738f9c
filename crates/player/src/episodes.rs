//! Keeping the episode bound in step with lazily fetched season data.
//!
//! Whenever the session moves to a season whose episode list has not been
//! seen, its count becomes [`EpisodeCount::Pending`] and
//! [`PlayerSession::episode_request`] names the list to fetch. Responses are
//! only accepted while the session still points at the season they were
//! requested for; anything else is discarded as stale.

use cinedeck_core::types::MediaKind;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::PlayerError;
use crate::session::PlayerSession;

/// Number of episodes in the current season, if known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeCount {
    Known(u32),
    Pending,
}

impl EpisodeCount {
    pub fn known(self) -> Option<u32> {
        match self {
            Self::Known(n) => Some(n),
            Self::Pending => None,
        }
    }

    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    pub(crate) fn clamp_episode(self, episode: u32) -> u32 {
        match self {
            Self::Known(n) => episode.clamp(1, n.max(1)),
            Self::Pending => episode.max(1),
        }
    }
}

/// The episode list a caller must fetch for the session to learn its bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EpisodeListRequest {
    pub catalog_id: u64,
    pub season: u32,
}

impl PlayerSession {
    /// The season whose episode list is outstanding, if any.
    pub fn episode_request(&self) -> Option<EpisodeListRequest> {
        let media = self.media.as_ref()?;
        if media.kind != MediaKind::Tv || !self.episode_count.is_pending() {
            return None;
        }
        Some(EpisodeListRequest {
            catalog_id: media.catalog_id,
            season: self.season,
        })
    }

    /// Feed back the length of a fetched episode list.
    ///
    /// The response is dropped with [`PlayerError::StaleEpisodeData`] unless
    /// the session is still on the series and season named by `request`. An
    /// empty list pins the bound at the current episode.
    pub fn apply_episode_count(
        &mut self,
        request: EpisodeListRequest,
        count: usize,
    ) -> Result<u32, PlayerError> {
        let current = self
            .media
            .as_ref()
            .filter(|m| m.kind == MediaKind::Tv)
            .map(|m| (m.catalog_id, self.season));
        if current != Some((request.catalog_id, request.season)) {
            debug!(
                catalog_id = request.catalog_id,
                season = request.season,
                "discarding stale episode data"
            );
            return Err(PlayerError::StaleEpisodeData {
                catalog_id: request.catalog_id,
                season: request.season,
            });
        }

        let before = self.embed_url();
        let count = match u32::try_from(count) {
            Ok(0) => self.episode,
            Ok(n) => n,
            Err(_) => u32::MAX,
        };
        self.episode_count = EpisodeCount::Known(count);
        self.episode = self.episode.min(count);
        debug!(
            catalog_id = request.catalog_id,
            season = request.season,
            episode_count = count,
            "episode count updated"
        );
        self.settle(before);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_only_while_pending() {
        let mut s = PlayerSession::new();
        assert_eq!(s.episode_request(), None);

        s.open_tv_show(42, "Show", 2, 1, None, Some(3));
        assert_eq!(
            s.episode_request(),
            Some(EpisodeListRequest {
                catalog_id: 42,
                season: 2
            })
        );

        let req = s.episode_request().unwrap();
        assert_eq!(s.apply_episode_count(req, 8), Ok(8));
        assert_eq!(s.episode_request(), None);
        assert_eq!(s.episode_count(), EpisodeCount::Known(8));
    }

    #[test]
    fn late_response_for_abandoned_season_is_discarded() {
        let mut s = PlayerSession::new();
        s.open_tv_show(42, "Show", 1, 1, Some(10), Some(3));

        s.set_season(2).unwrap();
        let first = s.episode_request().unwrap();
        s.set_season(3).unwrap();
        let second = s.episode_request().unwrap();

        assert_eq!(
            s.apply_episode_count(first, 13),
            Err(PlayerError::StaleEpisodeData {
                catalog_id: 42,
                season: 2
            })
        );
        assert_eq!(s.episode_count(), EpisodeCount::Pending);

        s.apply_episode_count(second, 6).unwrap();
        assert_eq!(s.episode_count(), EpisodeCount::Known(6));
    }

    #[test]
    fn response_for_other_title_is_discarded() {
        let mut s = PlayerSession::new();
        s.open_tv_show(42, "Show", 1, 1, None, Some(2));
        let req = s.episode_request().unwrap();
        s.open_tv_show(77, "Other", 1, 1, None, Some(2));

        assert!(s.apply_episode_count(req, 10).is_err());
        s.close();
        assert!(
            s.apply_episode_count(
                EpisodeListRequest {
                    catalog_id: 77,
                    season: 1
                },
                10
            )
            .is_err()
        );
    }

    #[test]
    fn shrinking_count_clamps_episode() {
        let mut s = PlayerSession::new();
        s.open_tv_show(42, "Show", 1, 9, None, None);
        let req = s.episode_request().unwrap();
        s.apply_episode_count(req, 4).unwrap();
        assert_eq!(s.episode(), 4);
    }

    #[test]
    fn empty_list_pins_current_episode() {
        let mut s = PlayerSession::new();
        s.open_tv_show(42, "Show", 1, 3, None, Some(2));
        let req = s.episode_request().unwrap();
        assert_eq!(s.apply_episode_count(req, 0), Ok(3));
        assert_eq!(s.episode(), 3);
        assert!(s.can_go_next());
        assert!(s.next_episode().unwrap());
        assert_eq!((s.season(), s.episode()), (2, 1));
    }
}
