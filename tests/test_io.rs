use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use glam::Vec2;
use videogame::assets::AssetRegistry;
use videogame::audio::{Audio, SilentAudio, TerminalAudio, MUSIC_VOLUME};
use videogame::colors;
use videogame::display::{draw_text_centered, Screen, TerminalScreen};
use videogame::error::GameError;
use videogame::geometry::Rect;
use videogame::input::{EventSource, InputEvent, Key, TerminalEvents, HOLD_WINDOW};
use videogame::log_init;

// ── Assets ────────────────────────────────────────────────────────────────────

#[test]
fn asset_keys_resolve_under_the_data_dir() {
    let assets = AssetRegistry::new("data");
    assert_eq!(assets.get("soundfx").unwrap(), std::path::Path::new("data/meow.mp3"));
    assert_eq!(
        assets.get("music-grid").unwrap(),
        std::path::Path::new("data/music-grid.wav")
    );
}

#[test]
fn unknown_asset_key_is_reported() {
    let assets = AssetRegistry::new("data");
    let err = assets.get("bagpipes").unwrap_err();
    assert!(matches!(err, GameError::MissingAsset(ref key) if key == "bagpipes"));
}

#[test]
fn empty_registry_takes_inserts() {
    let mut assets = AssetRegistry::empty("/srv/game");
    assert!(assets.get("soundtrack").is_err());
    assets.insert("soundtrack", "theme.ogg");
    assert_eq!(assets.get("soundtrack").unwrap(), std::path::Path::new("/srv/game/theme.ogg"));
}

// ── Audio ─────────────────────────────────────────────────────────────────────

#[test]
fn terminal_audio_plays_existing_tracks() {
    let track = tempfile::NamedTempFile::new().unwrap();
    let mut audio = TerminalAudio::new();
    assert!(!audio.music_busy());

    audio.play_music(track.path(), MUSIC_VOLUME).unwrap();
    assert!(audio.music_busy());

    audio.fade_out(500);
    audio.stop_music();
    assert!(!audio.music_busy());
}

#[test]
fn terminal_audio_rejects_missing_tracks() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.mp3");
    let mut audio = TerminalAudio::new();

    let err = audio.play_music(&missing, MUSIC_VOLUME).unwrap_err();

    assert!(matches!(err, GameError::Audio { ref path, .. } if *path == missing));
    assert!(std::error::Error::source(&err).is_some());
    assert!(!audio.music_busy());
}

#[test]
fn silent_audio_is_never_busy() {
    let mut audio = SilentAudio;
    audio.play_music(std::path::Path::new("anything"), 1.0).unwrap();
    assert!(!audio.music_busy());
}

// ── Terminal screen ───────────────────────────────────────────────────────────

fn screen() -> TerminalScreen<Vec<u8>> {
    // 80×40 cells over an 800×800 world: one cell is 10×20 units.
    TerminalScreen::new(Vec::new(), Vec2::new(800.0, 800.0), 80, 40)
}

#[test]
fn rects_fill_the_cells_they_cover() {
    let mut s = screen();
    s.clear(colors::BLACK);
    s.fill_rect(Rect::new(0.0, 0.0, 100.0, 40.0), colors::RED);

    assert_eq!(s.background_at(0, 0), Some(colors::RED));
    assert_eq!(s.background_at(9, 1), Some(colors::RED));
    assert_eq!(s.background_at(10, 0), Some(colors::BLACK));
    assert_eq!(s.background_at(0, 2), Some(colors::BLACK));
}

#[test]
fn tiny_shapes_still_show_up() {
    let mut s = screen();
    s.clear(colors::BLACK);
    s.fill_circle(Vec2::new(405.0, 405.0), 1.0, colors::YELLOW);
    assert_eq!(s.background_at(40, 20), Some(colors::YELLOW));
}

#[test]
fn offscreen_shapes_are_clipped() {
    let mut s = screen();
    s.clear(colors::BLACK);
    s.fill_circle(Vec2::new(-500.0, -500.0), 5.0, colors::YELLOW);
    assert!((0..80).all(|col| s.background_at(col, 0) == Some(colors::BLACK)));
    assert_eq!(s.background_at(80, 0), None);
}

#[test]
fn text_lands_in_cells_and_reaches_the_writer() {
    let mut s = screen();
    s.clear(colors::BLACK);
    s.draw_text(Vec2::new(0.0, 780.0), "HI", 18, colors::WHITE, colors::BLACK);
    assert_eq!(s.char_at(0, 39), Some('H'));
    assert_eq!(s.char_at(1, 39), Some('I'));

    s.present().unwrap();
    let written = String::from_utf8_lossy(&s.into_inner()).into_owned();
    assert!(written.contains("HI"));
}

#[test]
fn centred_text_straddles_the_middle() {
    let mut s = screen();
    s.clear(colors::BLACK);
    draw_text_centered(&mut s, 400.0, 0.0, "abcd", 18, colors::WHITE, colors::BLACK);
    assert_eq!(s.char_at(38, 0), Some('a'));
    assert_eq!(s.char_at(41, 0), Some('d'));
}

// ── Input ─────────────────────────────────────────────────────────────────────

fn key_event(code: KeyCode, kind: KeyEventKind) -> Event {
    Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
}

#[test]
fn press_and_release_are_forwarded() {
    let (tx, rx) = mpsc::channel();
    let mut events = TerminalEvents::from_channel(rx, true);

    tx.send(key_event(KeyCode::Left, KeyEventKind::Press)).unwrap();
    tx.send(key_event(KeyCode::Char('A'), KeyEventKind::Press)).unwrap();
    assert_eq!(
        events.poll_events(),
        vec![InputEvent::KeyDown(Key::Left), InputEvent::KeyDown(Key::Char('a'))]
    );

    tx.send(key_event(KeyCode::Left, KeyEventKind::Release)).unwrap();
    assert_eq!(events.poll_events(), vec![InputEvent::KeyUp(Key::Left)]);
    assert!(events.poll_events().is_empty());
}

#[test]
fn held_keys_expire_without_release_reports() {
    let (tx, rx) = mpsc::channel();
    let mut events = TerminalEvents::from_channel(rx, false);

    tx.send(key_event(KeyCode::Right, KeyEventKind::Press)).unwrap();
    assert_eq!(events.poll_events(), vec![InputEvent::KeyDown(Key::Right)]);

    thread::sleep(HOLD_WINDOW + Duration::from_millis(50));
    assert_eq!(events.poll_events(), vec![InputEvent::KeyUp(Key::Right)]);
    assert!(events.poll_events().is_empty());
}

#[test]
fn ctrl_c_quits() {
    let (tx, rx) = mpsc::channel();
    let mut events = TerminalEvents::from_channel(rx, true);

    tx.send(Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))).unwrap();
    assert_eq!(events.poll_events(), vec![InputEvent::Quit]);
}

#[test]
fn special_keys_map_to_named_variants() {
    let (tx, rx) = mpsc::channel();
    let mut events = TerminalEvents::from_channel(rx, true);

    for code in [KeyCode::Esc, KeyCode::Char(' '), KeyCode::Tab, KeyCode::F(5)] {
        tx.send(key_event(code, KeyEventKind::Press)).unwrap();
    }
    assert_eq!(
        events.poll_events(),
        vec![
            InputEvent::KeyDown(Key::Escape),
            InputEvent::KeyDown(Key::Space),
            InputEvent::KeyDown(Key::Tab),
            InputEvent::KeyDown(Key::Other),
        ]
    );
}

// ── Logging ───────────────────────────────────────────────────────────────────

#[test]
fn log_file_is_created_with_its_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("videogame.log");

    log_init::init(&path).unwrap();
    tracing::info!("hello from the test");

    assert!(path.exists());
}
