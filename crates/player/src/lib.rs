//! Embed provider registry and the player session state machine.
//!
//! Nothing in this crate performs I/O. The session tells its caller which
//! season's episode list it needs (see [`episodes`]) and the caller feeds the
//! result back in.

pub mod embed;
pub mod episodes;
pub mod frame;
pub mod session;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("season {season} out of range (1..={season_count})")]
    OutOfRangeSeason { season: u32, season_count: u32 },
    #[error("episode {episode} out of range for season {season}")]
    OutOfRangeEpisode { season: u32, episode: u32 },
    #[error("episode data for season {season} of {catalog_id} is stale")]
    StaleEpisodeData { catalog_id: u64, season: u32 },
    #[error("no series is open")]
    NotSeries,
}
