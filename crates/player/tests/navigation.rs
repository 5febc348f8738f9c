use cinedeck_player::PlayerError;
use cinedeck_player::embed::{ServerName, list_providers, resolve_movie_url, resolve_series_url};
use cinedeck_player::episodes::EpisodeCount;
use cinedeck_player::session::{PlayerSession, SessionState};

#[test]
fn movie_urls_are_absolute_and_carry_the_id() {
    for id in [1u64, 603, 106_379, 4_294_967_296] {
        for p in list_providers() {
            let url = resolve_movie_url(p.id.as_id(), id).unwrap();
            assert!(url.starts_with("https://"), "{url} is not absolute");
            assert!(url.contains(&id.to_string()), "{url} lacks {id}");
        }
    }
}

#[test]
fn series_urls_are_deterministic() {
    for p in list_providers() {
        let a = resolve_series_url(p.id.as_id(), 1399, 3, 7).unwrap();
        let b = resolve_series_url(p.id.as_id(), 1399, 3, 7).unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with("https://"));
        assert!(a.contains("1399"));
    }
}

#[test]
fn open_then_close_keeps_server() {
    let mut s = PlayerSession::new();
    s.select_server(ServerName::Vidrock);
    s.open_movie(603, "T");
    s.close();

    assert!(!s.is_open());
    assert_eq!(s.state(), SessionState::Closed);
    assert_eq!(s.catalog_id(), None);
    assert_eq!(s.selected_server(), ServerName::Vidrock);
}

#[test]
fn next_walks_the_season_then_rolls_over() {
    let mut s = PlayerSession::new();
    s.open_tv_show(5, "T", 1, 3, Some(10), Some(2));

    s.next_episode().unwrap();
    assert_eq!((s.season(), s.episode()), (1, 4));

    for _ in 0..6 {
        s.next_episode().unwrap();
    }
    assert_eq!((s.season(), s.episode()), (1, 10));

    assert!(s.next_episode().unwrap());
    assert_eq!((s.season(), s.episode()), (2, 1));
}

#[test]
fn previous_across_season_lands_on_first_episode() {
    let mut s = PlayerSession::new();
    s.open_tv_show(5, "T", 2, 1, Some(10), Some(2));

    assert!(s.previous_episode().unwrap());
    assert_eq!((s.season(), s.episode()), (1, 1));
}

#[test]
fn next_does_not_move_before_episode_data_arrives() {
    let mut s = PlayerSession::new();
    s.open_tv_show(5, "T", 1, 4, Some(10), Some(2));
    s.set_season(2).unwrap();

    assert_eq!(s.episode(), 1);
    assert_eq!(s.episode_count(), EpisodeCount::Pending);
    assert!(!s.can_go_next());

    assert_eq!(s.next_episode(), Ok(false));
    assert_eq!((s.season(), s.episode()), (2, 1));

    let req = s.episode_request().unwrap();
    s.apply_episode_count(req, 9).unwrap();
    assert!(s.next_episode().unwrap());
    assert_eq!((s.season(), s.episode()), (2, 2));
}

#[test]
fn rollover_marks_new_season_pending() {
    let mut s = PlayerSession::new();
    s.open_tv_show(5, "T", 1, 2, Some(2), Some(3));
    s.next_episode().unwrap();

    assert_eq!((s.season(), s.episode()), (2, 1));
    assert_eq!(s.episode_request().map(|r| r.season), Some(2));
    assert_eq!(s.next_episode(), Ok(false));
}

#[test]
fn unknown_provider_leaves_selection() {
    let mut s = PlayerSession::new();
    s.select_server(ServerName::VidFast);
    assert_eq!(
        s.set_provider("unknown-id"),
        Err(PlayerError::UnknownProvider("unknown-id".into()))
    );
    assert_eq!(s.selected_server(), ServerName::VidFast);
}
