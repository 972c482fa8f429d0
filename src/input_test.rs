use super::*;

// =============================================================
// Key state machine
// =============================================================

#[test]
fn key_default_is_released() {
    let key = Key::new();
    assert!(!key.pressed);
    assert!(!key.just_pressed);
    assert!(!key.just_released);
}

#[test]
fn key_down_sets_pressed_and_edge() {
    let mut key = Key::new();
    key.update(KeyAction::Down);
    assert!(key.pressed);
    assert!(key.just_pressed);
    assert!(!key.just_released);
}

#[test]
fn key_down_then_reset_clears_edge_keeps_pressed() {
    let mut key = Key::new();
    key.update(KeyAction::Down);
    key.update(KeyAction::Reset);
    assert!(key.pressed);
    assert!(!key.just_pressed);
}

#[test]
fn key_repeat_down_has_no_new_edge() {
    let mut key = Key::new();
    key.update(KeyAction::Down);
    key.update(KeyAction::Down);
    assert!(key.pressed);
    assert!(!key.just_pressed);
}

#[test]
fn key_up_sets_released_edge_once() {
    let mut key = Key::new();
    key.update(KeyAction::Down);
    key.update(KeyAction::Up);
    assert!(!key.pressed);
    assert!(key.just_released);
    key.update(KeyAction::Reset);
    assert!(!key.just_released);
}

#[test]
fn key_up_without_down_has_no_edge() {
    let mut key = Key::new();
    key.update(KeyAction::Up);
    assert!(!key.just_released);
}

#[test]
fn key_pressed_persists_until_up() {
    let mut key = Key::new();
    key.update(KeyAction::Down);
    for _ in 0..5 {
        key.update(KeyAction::Reset);
        assert!(key.pressed);
    }
    key.update(KeyAction::Up);
    assert!(!key.pressed);
}

#[test]
fn key_set_overwrites_all_flags() {
    let mut key = Key::new();
    key.set(true, true, false);
    assert_eq!(key, Key { pressed: true, just_pressed: true, just_released: false });
}

// =============================================================
// Button
// =============================================================

#[test]
fn button_from_dom_known_numbers() {
    assert_eq!(Button::from_dom(0), Some(Button::Left));
    assert_eq!(Button::from_dom(1), Some(Button::Middle));
    assert_eq!(Button::from_dom(2), Some(Button::Right));
    assert_eq!(Button::from_dom(3), Some(Button::Back));
    assert_eq!(Button::from_dom(4), Some(Button::Forward));
}

#[test]
fn button_from_dom_unknown_is_none() {
    assert_eq!(Button::from_dom(-1), None);
    assert_eq!(Button::from_dom(5), None);
}

#[test]
fn button_index_matches_all_order() {
    for (i, b) in Button::ALL.iter().enumerate() {
        assert_eq!(b.index(), i);
    }
}
