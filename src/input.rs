use crate::constants::{CLICK_DRAG_THRESHOLD_PX, MOUSE_BUTTON_PRIMARY, MOUSE_BUTTON_SECONDARY};
use glam::Vec2;

/// What a pointer drag does to the view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Pan,
}

/// Left drag orbits, shift+left or right drag pans, other buttons do nothing.
#[inline]
pub fn drag_mode_for(button: i16, shift: bool) -> Option<DragMode> {
    match button {
        MOUSE_BUTTON_PRIMARY if shift => Some(DragMode::Pan),
        MOUSE_BUTTON_PRIMARY => Some(DragMode::Rotate),
        MOUSE_BUTTON_SECONDARY => Some(DragMode::Pan),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Release {
    /// Press and release without moving past the drag threshold.
    Click(Vec2),
    DragEnd,
    /// Not the pointer we were tracking.
    Ignored,
}

#[derive(Clone, Copy, Debug)]
struct Press {
    pointer_id: i32,
    start: Vec2,
    last: Vec2,
    mode: Option<DragMode>,
    dragged: bool,
}

/// Tells clicks from drags for a single pointer, in client (CSS px) coordinates.
#[derive(Default, Debug)]
pub struct PointerTracker {
    press: Option<Press>,
}

impl PointerTracker {
    pub fn press(&mut self, pointer_id: i32, pos: Vec2, mode: Option<DragMode>) {
        self.press = Some(Press {
            pointer_id,
            start: pos,
            last: pos,
            mode,
            dragged: false,
        });
    }

    /// Movement since the last event while the pointer is held.
    pub fn motion(&mut self, pointer_id: i32, pos: Vec2) -> Option<(DragMode, Vec2)> {
        let press = self.press.as_mut().filter(|p| p.pointer_id == pointer_id)?;
        if pos.distance(press.start) > CLICK_DRAG_THRESHOLD_PX {
            press.dragged = true;
        }
        let delta = pos - press.last;
        press.last = pos;
        press.mode.map(|m| (m, delta))
    }

    pub fn release(&mut self, pointer_id: i32, pos: Vec2) -> Release {
        match self.press {
            Some(p) if p.pointer_id == pointer_id => {
                self.press = None;
                if p.dragged || pos.distance(p.start) > CLICK_DRAG_THRESHOLD_PX {
                    Release::DragEnd
                } else {
                    Release::Click(pos)
                }
            }
            _ => Release::Ignored,
        }
    }

    pub fn cancel(&mut self) {
        self.press = None;
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }
}
