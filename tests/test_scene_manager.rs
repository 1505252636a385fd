mod common;

use common::Probe;
use videogame::error::GameError;
use videogame::scene::{Advance, SceneManager};

fn three_scenes() -> SceneManager {
    let mut manager = SceneManager::new();
    manager.add(vec![Probe::boxed("title"), Probe::boxed("level"), Probe::boxed("end")]);
    manager
}

fn name_of(manager: &SceneManager, advance: Advance) -> Option<String> {
    match advance {
        Advance::Scene(id) => manager.scene(id).map(|s| s.name().to_string()),
        Advance::EndOfSequence => None,
    }
}

#[test]
fn keys_follow_registration_order() {
    let manager = three_scenes();
    assert_eq!(manager.len(), 3);
    for (key, name) in [("0", "title"), ("1", "level"), ("2", "end")] {
        let id = manager.lookup(key).expect("registered");
        assert_eq!(id.key(), key);
        assert_eq!(manager.scene(id).map(|s| s.name()), Some(name));
    }
    assert!(manager.lookup("3").is_none());
}

#[test]
fn first_registration_arms_scene_zero() {
    let mut manager = three_scenes();
    assert!(manager.router().is_armed());
    assert_eq!(manager.current().map(|id| id.index()), Some(0));
    let first = manager.advance();
    assert_eq!(name_of(&manager, first).as_deref(), Some("title"));
}

#[test]
fn advance_is_single_shot() {
    let mut manager = three_scenes();
    manager.set_next_scene("0").unwrap();
    assert!(matches!(manager.advance(), Advance::Scene(_)));
    assert_eq!(manager.advance(), Advance::EndOfSequence);
    assert!(!manager.router().is_armed());
}

#[test]
fn set_next_scene_selects_the_keyed_scene() {
    let mut manager = three_scenes();
    manager.advance();
    manager.set_next_scene("2").unwrap();
    let next = manager.advance();
    assert_eq!(name_of(&manager, next).as_deref(), Some("end"));
    assert_eq!(manager.current().map(|id| id.key()), Some("2".to_string()));
}

#[test]
fn last_arming_wins() {
    let mut manager = three_scenes();
    manager.set_next_scene("2").unwrap();
    manager.set_next_scene("1").unwrap();
    let next = manager.advance();
    assert_eq!(name_of(&manager, next).as_deref(), Some("level"));
}

#[test]
fn unknown_key_is_an_error_and_leaves_state_alone() {
    let mut manager = three_scenes();
    manager.advance();
    let err = manager.set_next_scene("9").unwrap_err();
    assert!(matches!(err, GameError::UnknownScene(ref key) if key == "9"));
    assert_eq!(manager.advance(), Advance::EndOfSequence);
}

#[test]
fn empty_manager_has_nothing_to_play() {
    let mut manager = SceneManager::new();
    assert!(manager.is_empty());
    assert_eq!(manager.advance(), Advance::EndOfSequence);
    assert!(matches!(manager.set_next_scene("0"), Err(GameError::UnknownScene(_))));
}

#[test]
fn later_batches_continue_the_numbering() {
    let mut manager = three_scenes();
    manager.advance();
    manager.add(vec![Probe::boxed("bonus")]);
    // A later batch does not re-arm anything.
    assert_eq!(manager.advance(), Advance::EndOfSequence);
    let id = manager.lookup("3").expect("registered");
    assert_eq!(manager.scene(id).map(|s| s.name()), Some("bonus"));
}

#[test]
fn scenes_arm_successors_through_the_router() {
    let mut manager = three_scenes();
    let Advance::Scene(id) = manager.advance() else {
        panic!("scene zero should be armed");
    };
    {
        let (scene, router) = manager.scene_mut(id).expect("registered");
        assert_eq!(scene.name(), "title");
        router.set_next_scene("1").unwrap();
        scene.base_mut().invalidate();
    }
    let next = manager.advance();
    assert_eq!(name_of(&manager, next).as_deref(), Some("level"));
}

#[test]
fn unknown_error_names_the_key() {
    let err = GameError::UnknownScene("7".into());
    assert!(err.to_string().contains("\"7\""));
}
