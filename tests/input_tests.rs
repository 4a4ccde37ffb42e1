// Host-side tests for pointer gesture tracking.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}

use constants::*;
use glam::Vec2;
use input::*;

#[test]
fn buttons_map_to_drag_modes() {
    assert_eq!(drag_mode_for(MOUSE_BUTTON_PRIMARY, false), Some(DragMode::Rotate));
    assert_eq!(drag_mode_for(MOUSE_BUTTON_PRIMARY, true), Some(DragMode::Pan));
    assert_eq!(drag_mode_for(MOUSE_BUTTON_SECONDARY, false), Some(DragMode::Pan));
    assert_eq!(drag_mode_for(1, false), None);
}

#[test]
fn press_and_release_in_place_is_a_click() {
    let mut t = PointerTracker::default();
    t.press(1, Vec2::new(100.0, 50.0), Some(DragMode::Rotate));
    assert!(t.is_pressed());
    let r = t.release(1, Vec2::new(101.0, 51.0));
    assert_eq!(r, Release::Click(Vec2::new(101.0, 51.0)));
    assert!(!t.is_pressed());
}

#[test]
fn movement_past_threshold_is_a_drag_even_if_it_returns() {
    let mut t = PointerTracker::default();
    t.press(1, Vec2::ZERO, Some(DragMode::Rotate));
    let m = t.motion(1, Vec2::new(CLICK_DRAG_THRESHOLD_PX + 10.0, 0.0));
    assert!(matches!(m, Some((DragMode::Rotate, _))));
    _ = t.motion(1, Vec2::ZERO);
    assert_eq!(t.release(1, Vec2::ZERO), Release::DragEnd);
}

#[test]
fn motion_reports_delta_since_last_event() {
    let mut t = PointerTracker::default();
    t.press(7, Vec2::new(10.0, 10.0), Some(DragMode::Pan));
    let (_, d1) = t.motion(7, Vec2::new(13.0, 8.0)).unwrap();
    assert_eq!(d1, Vec2::new(3.0, -2.0));
    let (mode, d2) = t.motion(7, Vec2::new(20.0, 8.0)).unwrap();
    assert_eq!(mode, DragMode::Pan);
    assert_eq!(d2, Vec2::new(7.0, 0.0));
}

#[test]
fn other_pointers_are_ignored() {
    let mut t = PointerTracker::default();
    t.press(1, Vec2::ZERO, Some(DragMode::Rotate));
    assert!(t.motion(2, Vec2::new(50.0, 0.0)).is_none());
    assert_eq!(t.release(2, Vec2::ZERO), Release::Ignored);
    assert!(t.is_pressed());
}

#[test]
fn motion_without_press_or_mode_does_nothing() {
    let mut t = PointerTracker::default();
    assert!(t.motion(1, Vec2::new(5.0, 5.0)).is_none());
    assert_eq!(t.release(1, Vec2::ZERO), Release::Ignored);

    t.press(1, Vec2::ZERO, None);
    assert!(t.motion(1, Vec2::new(50.0, 0.0)).is_none());
    assert_eq!(t.release(1, Vec2::new(50.0, 0.0)), Release::DragEnd);
}

#[test]
fn cancel_forgets_the_press() {
    let mut t = PointerTracker::default();
    t.press(3, Vec2::ZERO, Some(DragMode::Rotate));
    t.cancel();
    assert!(!t.is_pressed());
    assert_eq!(t.release(3, Vec2::ZERO), Release::Ignored);
}
