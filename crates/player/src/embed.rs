//! Embed provider registry.
//!
//! Each provider is a display label, two capability flags and a pair of URL
//! templates (movie by catalog id, series by catalog id/season/episode). The
//! table order is the server menu order; the first entry is the default
//! selection.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PlayerError;

/// Origin used by providers served from the site itself.
const SITE_ORIGIN: &str = "https://tmovie.tv";

/// A third-party embed endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServerName {
    VidsrcCC,
    VidUp,
    #[serde(rename = "NHDAPI")]
    Nhdapi,
    TurboVid,
    Videasy,
    VidPlus,
    RiveStream,
    AutoEmbed,
    #[serde(rename = "111Movies")]
    Movies111,
    Vidify,
    #[serde(rename = "VidAPI")]
    VidApi,
    #[serde(rename = "2Embed")]
    TwoEmbed,
    Vidrock,
    VidFast,
    #[serde(rename = "VidsrcXYZ")]
    VidsrcXyz,
    VidLink,
    #[serde(rename = "VidsrcSU")]
    VidsrcSu,
    #[serde(rename = "EmbedSU")]
    EmbedSu,
    Resident,
    Vidzee,
    Bludclart,
    Main,
    #[serde(rename = "tmovie")]
    Tmovie,
}

/// Static description of one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderEntry {
    pub id: ServerName,
    pub display_name: &'static str,
    pub has_ads: bool,
    pub supports_4k: bool,
}

/// Capability flags advertised by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub has_ads: bool,
    pub supports_4k: bool,
}

/// Serializable view of a provider for server menus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderInfo {
    pub id: ServerName,
    pub display_name: &'static str,
    pub has_ads: bool,
    pub supports_4k: bool,
}

const fn entry(
    id: ServerName,
    display_name: &'static str,
    has_ads: bool,
    supports_4k: bool,
) -> ProviderEntry {
    ProviderEntry {
        id,
        display_name,
        has_ads,
        supports_4k,
    }
}

/// Every provider, in menu order.
pub static PROVIDERS: [ProviderEntry; 23] = [
    entry(ServerName::VidsrcCC, "Vanilla", false, false),
    entry(ServerName::VidUp, "Lora", true, false),
    entry(ServerName::Nhdapi, "Mend", false, false),
    entry(ServerName::TurboVid, "Felix", false, false),
    entry(ServerName::Videasy, "Vars", false, true),
    entry(ServerName::VidPlus, "Swift", true, false),
    entry(ServerName::RiveStream, "Quazar", false, false),
    entry(ServerName::AutoEmbed, "Starlight", true, false),
    entry(ServerName::Movies111, "Gaze", true, false),
    entry(ServerName::Vidify, "Florence", true, false),
    entry(ServerName::VidApi, "Deez", true, false),
    entry(ServerName::TwoEmbed, "Titan", true, false),
    entry(ServerName::Vidrock, "Zix", true, false),
    entry(ServerName::VidFast, "Delta", true, true),
    entry(ServerName::VidsrcXyz, "Bravo", true, false),
    entry(ServerName::VidLink, "Myth", true, false),
    entry(ServerName::VidsrcSu, "Asuka", true, false),
    entry(ServerName::EmbedSu, "Susanoo", true, false),
    entry(ServerName::Resident, "Glose", false, false),
    entry(ServerName::Vidzee, "Bob Johns", false, false),
    entry(ServerName::Bludclart, "Rox", false, false),
    entry(ServerName::Main, "Icey", false, false),
    entry(ServerName::Tmovie, "Boxed", false, false),
];

impl ServerName {
    /// Initial selection for a fresh session.
    pub const DEFAULT: ServerName = ServerName::VidsrcCC;

    /// Stable symbolic identifier, as used on the wire.
    pub fn as_id(self) -> &'static str {
        match self {
            Self::VidsrcCC => "VidsrcCC",
            Self::VidUp => "VidUp",
            Self::Nhdapi => "NHDAPI",
            Self::TurboVid => "TurboVid",
            Self::Videasy => "Videasy",
            Self::VidPlus => "VidPlus",
            Self::RiveStream => "RiveStream",
            Self::AutoEmbed => "AutoEmbed",
            Self::Movies111 => "111Movies",
            Self::Vidify => "Vidify",
            Self::VidApi => "VidAPI",
            Self::TwoEmbed => "2Embed",
            Self::Vidrock => "Vidrock",
            Self::VidFast => "VidFast",
            Self::VidsrcXyz => "VidsrcXYZ",
            Self::VidLink => "VidLink",
            Self::VidsrcSu => "VidsrcSU",
            Self::EmbedSu => "EmbedSU",
            Self::Resident => "Resident",
            Self::Vidzee => "Vidzee",
            Self::Bludclart => "Bludclart",
            Self::Main => "Main",
            Self::Tmovie => "tmovie",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        PROVIDERS.iter().map(|p| p.id).find(|s| s.as_id() == id)
    }

    /// Registry entry for this provider.
    pub fn entry(self) -> &'static ProviderEntry {
        // The table holds every variant exactly once, in declaration order.
        &PROVIDERS[self as usize]
    }

    pub fn display_name(self) -> &'static str {
        self.entry().display_name
    }

    pub fn capabilities(self) -> Capabilities {
        let e = self.entry();
        Capabilities {
            has_ads: e.has_ads,
            supports_4k: e.supports_4k,
        }
    }

    pub fn movie_url(self, id: u64) -> String {
        match self {
            Self::VidsrcCC => format!("https://vidsrc.cc/v2/embed/movie/{id}"),
            Self::VidUp => format!("https://vidup.to/movie/{id}?autoPlay=true&theme=000000"),
            Self::Nhdapi => format!("https://nhdapi.xyz/movie/{id}"),
            Self::TurboVid => format!("https://uembed.xyz/?id={id}&autoplay=true"),
            Self::Videasy => format!(
                "https://player.videasy.net/movie/{id}?nextEpisode=true&autoplayNextEpisode=true&episodeSelector=true&overlay=true&color=8B5CF6"
            ),
            Self::VidPlus => format!("https://player.vidplus.to/embed/movie/{id}?autoplay=true"),
            Self::RiveStream => format!("https://rivestream.net/embed?type=movie&id={id}"),
            Self::AutoEmbed => format!("https://player.autoembed.cc/embed/movie/{id}"),
            Self::Movies111 => format!("https://111movies.com/movie/{id}"),
            Self::Vidify => format!("https://player.vidify.top/embed/movie/{id}?server=meta"),
            Self::VidApi => format!("https://vidapi.xyz/embed/movie/{id}"),
            Self::TwoEmbed => format!("https://www.2embed.cc/embed/{id}"),
            Self::Vidrock => format!("https://vidrock.net/movie/{id}"),
            Self::VidFast => {
                format!("https://vidfast.pro/movie/{id}?autoPlay=true&theme=2392EE&poster=false")
            }
            Self::VidsrcXyz => format!("https://vidsrc.xyz/embed/movie?tmdb={id}"),
            Self::VidLink => format!(
                "https://vidlink.pro/movie/{id}?primaryColor=FFFFFF&secondaryColor=2392EE&title=true&poster=false&autoplay=false"
            ),
            Self::VidsrcSu => format!("https://vidsrc.su/movie/{id}?autoplay=true"),
            Self::EmbedSu => format!("https://embed.su/embed/movie/{id}"),
            Self::Resident => format!("{SITE_ORIGIN}/e/fox/{id}"),
            Self::Vidzee => format!("https://player.vidzee.wtf/embed/movie/{id}"),
            Self::Bludclart => format!("https://watch.bludclart.com/movie/{id}/watch"),
            Self::Main => format!("{SITE_ORIGIN}/api/streams/movie/{id}"),
            Self::Tmovie => format!("https://hls.tanime.tv/api/movie/{id}"),
        }
    }

    pub fn series_url(self, id: u64, s: u32, e: u32) -> String {
        match self {
            Self::VidsrcCC => format!("https://vidsrc.cc/v2/embed/tv/{id}/{s}/{e}"),
            Self::VidUp => {
                format!("https://vidup.to/tv/{id}/{s}/{e}?autoPlay=true&theme=000000")
            }
            Self::Nhdapi => format!("https://nhdapi.xyz/tv/{id}/{s}/{e}"),
            Self::TurboVid => {
                format!("https://uembed.xyz/?id={id}&season={s}&episode={e}&autoplay=true")
            }
            Self::Videasy => format!(
                "https://player.videasy.net/tv/{id}/{s}/{e}?nextEpisode=true&autoplayNextEpisode=true&episodeSelector=true&overlay=true&color=8B5CF6"
            ),
            Self::VidPlus => {
                format!("https://player.vidplus.to/embed/tv/{id}/{s}/{e}?autoplay=true")
            }
            Self::RiveStream => {
                format!("https://rivestream.net/embed?type=tv&id={id}&season={s}&episode={e}")
            }
            Self::AutoEmbed => format!("https://player.autoembed.cc/embed/tv/{id}/{s}/{e}"),
            Self::Movies111 => format!("https://111movies.com/tv/{id}/{s}/{e}"),
            Self::Vidify => {
                format!("https://player.vidify.top/embed/tv/{id}/{s}/{e}?server=meta")
            }
            Self::VidApi => format!("https://vidapi.xyz/embed/tv/{id}&s={s}&e={e}"),
            Self::TwoEmbed => format!("https://www.2embed.cc/embedtv/{id}&s={s}&e={e}"),
            Self::Vidrock => format!("https://vidrock.net/tv/{id}/{s}/{e}"),
            Self::VidFast => format!(
                "https://vidfast.pro/tv/{id}/{s}/{e}?autoPlay=true&theme=2392EE&poster=false"
            ),
            Self::VidsrcXyz => format!("https://vidsrc.xyz/embed/tv/{id}/{s}-{e}"),
            Self::VidLink => format!(
                "https://vidlink.pro/tv/{id}/{s}/{e}?primaryColor=2392EE&secondaryColor=FFFFFF&title=true&poster=false&autoplay=false&nextbutton=true"
            ),
            Self::VidsrcSu => format!("https://vidsrc.su/tv/{id}/{s}/{e}?autoplay=true"),
            Self::EmbedSu => format!("https://embed.su/embed/tv/{id}/{s}/{e}"),
            Self::Resident => format!("{SITE_ORIGIN}/e/fox/{id}/{s}/{e}"),
            Self::Vidzee => format!("https://player.vidzee.wtf/embed/tv/{id}/{s}/{e}"),
            Self::Bludclart => {
                format!("https://watch.bludclart.com/tv/{id}/watch?season={s}&episode={e}")
            }
            Self::Main => {
                format!("{SITE_ORIGIN}/api/streams/series/{id}?season={s}&episode={e}")
            }
            Self::Tmovie => format!("https://hls.tanime.tv/api/tv/{id}/{s}/{e}"),
        }
    }
}

impl Default for ServerName {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for ServerName {
    type Err = PlayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| PlayerError::UnknownProvider(s.to_string()))
    }
}

impl std::fmt::Display for ServerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_id())
    }
}

impl From<&ProviderEntry> for ProviderInfo {
    fn from(e: &ProviderEntry) -> Self {
        Self {
            id: e.id,
            display_name: e.display_name,
            has_ads: e.has_ads,
            supports_4k: e.supports_4k,
        }
    }
}

/// All providers in menu order.
pub fn list_providers() -> &'static [ProviderEntry] {
    &PROVIDERS
}

pub fn resolve_movie_url(provider_id: &str, catalog_id: u64) -> Result<String, PlayerError> {
    let server: ServerName = provider_id.parse()?;
    Ok(server.movie_url(catalog_id))
}

/// Build a series embed URL. Season and episode are not checked against the
/// catalog; the provider decides what an out-of-range episode means.
pub fn resolve_series_url(
    provider_id: &str,
    catalog_id: u64,
    season: u32,
    episode: u32,
) -> Result<String, PlayerError> {
    let server: ServerName = provider_id.parse()?;
    Ok(server.series_url(catalog_id, season, episode))
}

pub fn capabilities_of(provider_id: &str) -> Result<Capabilities, PlayerError> {
    let server: ServerName = provider_id.parse()?;
    Ok(server.capabilities())
}

/// Movie URL for every provider, in menu order.
pub fn all_movie_urls(catalog_id: u64) -> Vec<(ServerName, String)> {
    PROVIDERS
        .iter()
        .map(|p| (p.id, p.id.movie_url(catalog_id)))
        .collect()
}

/// Series URL for every provider, in menu order.
pub fn all_series_urls(catalog_id: u64, season: u32, episode: u32) -> Vec<(ServerName, String)> {
    PROVIDERS
        .iter()
        .map(|p| (p.id, p.id.series_url(catalog_id, season, episode)))
        .collect()
}

/// Providers that serve anime by AniList id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimeServer {
    #[default]
    VidsrcCC,
    VidPlus,
}

pub fn resolve_anime_url(server: AnimeServer, anilist_id: u64, episode: u32, dub: bool) -> String {
    match server {
        AnimeServer::VidsrcCC => {
            let track = if dub { "dub" } else { "sub" };
            format!(
                "https://vidsrc.cc/v2/embed/anime/{anilist_id}/{episode}/{track}?autoPlay=true&autoSkipIntro=true"
            )
        }
        AnimeServer::VidPlus => {
            format!("https://player.vidplus.to/embed/anime/{anilist_id}/{episode}?dub={dub}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_matches_variant_order() {
        for (i, p) in PROVIDERS.iter().enumerate() {
            assert_eq!(p.id as usize, i, "{} is out of place", p.id);
            assert_eq!(p.id.entry().id, p.id);
        }
    }

    #[test]
    fn ids_round_trip() {
        for p in list_providers() {
            assert_eq!(ServerName::from_id(p.id.as_id()), Some(p.id));
            let json = serde_json::to_string(&p.id).unwrap();
            assert_eq!(json, format!("\"{}\"", p.id.as_id()));
        }
        assert_eq!(ServerName::from_id("vidsrccc"), None);
    }

    #[test]
    fn default_is_first_in_menu() {
        assert_eq!(ServerName::default(), PROVIDERS[0].id);
        assert_eq!(ServerName::DEFAULT.display_name(), "Vanilla");
    }

    #[test]
    fn capability_counts() {
        let no_ads = PROVIDERS.iter().filter(|p| !p.has_ads).count();
        let uhd: Vec<_> = PROVIDERS
            .iter()
            .filter(|p| p.supports_4k)
            .map(|p| p.id)
            .collect();
        assert_eq!(no_ads, 10);
        assert_eq!(uhd, vec![ServerName::Videasy, ServerName::VidFast]);
    }

    #[test]
    fn movie_templates() {
        assert_eq!(
            ServerName::VidsrcCC.movie_url(603),
            "https://vidsrc.cc/v2/embed/movie/603"
        );
        assert_eq!(
            ServerName::VidsrcXyz.movie_url(603),
            "https://vidsrc.xyz/embed/movie?tmdb=603"
        );
        assert_eq!(
            ServerName::TurboVid.movie_url(603),
            "https://uembed.xyz/?id=603&autoplay=true"
        );
        assert_eq!(
            ServerName::Resident.movie_url(603),
            "https://tmovie.tv/e/fox/603"
        );
    }

    #[test]
    fn series_templates() {
        assert_eq!(
            ServerName::VidsrcCC.series_url(106379, 1, 2),
            "https://vidsrc.cc/v2/embed/tv/106379/1/2"
        );
        assert_eq!(
            ServerName::VidsrcXyz.series_url(106379, 1, 2),
            "https://vidsrc.xyz/embed/tv/106379/1-2"
        );
        assert_eq!(
            ServerName::TwoEmbed.series_url(106379, 3, 4),
            "https://www.2embed.cc/embedtv/106379&s=3&e=4"
        );
        assert_eq!(
            ServerName::Main.series_url(106379, 2, 5),
            "https://tmovie.tv/api/streams/series/106379?season=2&episode=5"
        );
    }

    #[test]
    fn every_provider_url_in_menu_order() {
        let movies = all_movie_urls(603);
        assert_eq!(movies.len(), 23);
        for ((id, url), entry) in movies.iter().zip(PROVIDERS.iter()) {
            assert_eq!(*id, entry.id);
            assert_eq!(*url, entry.id.movie_url(603));
        }

        let series = all_series_urls(1399, 2, 5);
        assert_eq!(series.len(), 23);
        for ((id, url), entry) in series.iter().zip(PROVIDERS.iter()) {
            assert_eq!(*id, entry.id);
            assert_eq!(*url, entry.id.series_url(1399, 2, 5));
        }
        assert_eq!(series[0].1, "https://vidsrc.cc/v2/embed/tv/1399/2/5");
    }

    #[test]
    fn unknown_provider_is_rejected() {
        assert_eq!(
            resolve_movie_url("Nope", 1),
            Err(PlayerError::UnknownProvider("Nope".into()))
        );
        assert!(resolve_series_url("", 1, 1, 1).is_err());
        assert!(capabilities_of("vidfast").is_err());
        assert!(capabilities_of("VidFast").unwrap().supports_4k);
    }

    #[test]
    fn anime_urls() {
        assert_eq!(
            resolve_anime_url(AnimeServer::VidsrcCC, 21, 1, false),
            "https://vidsrc.cc/v2/embed/anime/21/1/sub?autoPlay=true&autoSkipIntro=true"
        );
        assert_eq!(
            resolve_anime_url(AnimeServer::VidPlus, 21, 1, true),
            "https://player.vidplus.to/embed/anime/21/1?dub=true"
        );
    }
}
