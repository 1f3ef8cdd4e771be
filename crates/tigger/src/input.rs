//! Keyboard state and the game's key bindings.
//!
//! [`Input`] tracks which keys are held, just pressed, or just released. It is
//! fed by the window event handler. Once per frame, [`Controls::from_input`]
//! polls it through the [`Bindings`] table into a plain struct of booleans,
//! which is all the simulation ever sees.

use std::collections::HashSet;
use std::hash::Hash;

pub use winit::keyboard::KeyCode;

/// Tracks the state of a set of inputs.
///
/// - `pressed`: currently held down
/// - `just_pressed`: pressed this frame (not held last frame)
/// - `just_released`: released this frame
pub struct Input<T: Eq + Hash + Copy> {
    pressed: HashSet<T>,
    just_pressed: HashSet<T>,
    just_released: HashSet<T>,
}

impl<T: Eq + Hash + Copy> Input<T> {
    pub fn new() -> Self {
        Self {
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
        }
    }

    /// Returns `true` if the input is currently held down.
    pub fn pressed(&self, input: T) -> bool {
        self.pressed.contains(&input)
    }

    /// Returns `true` if the input was pressed this frame.
    pub fn just_pressed(&self, input: T) -> bool {
        self.just_pressed.contains(&input)
    }

    /// Returns `true` if the input was released this frame.
    pub fn just_released(&self, input: T) -> bool {
        self.just_released.contains(&input)
    }

    /// Call when an input is pressed. Key repeat does not re-trigger
    /// `just_pressed`.
    pub fn press(&mut self, input: T) {
        if self.pressed.insert(input) {
            self.just_pressed.insert(input);
        }
    }

    /// Call when an input is released.
    pub fn release(&mut self, input: T) {
        if self.pressed.remove(&input) {
            self.just_released.insert(input);
        }
    }

    /// Clear per-frame state. Called once the frame's update has run.
    pub fn clear_just(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

impl<T: Eq + Hash + Copy> Default for Input<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ── Bindings ────────────────────────────────────────────────────────────

/// Which physical key drives which game action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bindings {
    pub camera_forward: KeyCode,
    pub camera_back: KeyCode,
    pub camera_right: KeyCode,
    pub camera_left: KeyCode,
    pub turn_right: KeyCode,
    pub turn_left: KeyCode,
    pub fire: KeyCode,
    pub launch: KeyCode,
    pub gravity_boost: KeyCode,
    pub quit: KeyCode,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            camera_forward: KeyCode::KeyI,
            camera_back: KeyCode::KeyK,
            camera_right: KeyCode::KeyL,
            camera_left: KeyCode::KeyJ,
            turn_right: KeyCode::KeyD,
            turn_left: KeyCode::KeyA,
            fire: KeyCode::KeyC,
            launch: KeyCode::KeyF,
            gravity_boost: KeyCode::KeyG,
            quit: KeyCode::Escape,
        }
    }
}

// ── Controls ────────────────────────────────────────────────────────────

/// One frame's worth of polled input, already mapped to game actions.
///
/// Held actions are level-triggered; `fire` and `gravity_boost` are edge
/// triggered so holding the key does not spawn a stream of projectiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub camera_forward: bool,
    pub camera_back: bool,
    pub camera_right: bool,
    pub camera_left: bool,
    pub turn_right: bool,
    pub turn_left: bool,
    pub fire: bool,
    pub launch: bool,
    pub gravity_boost: bool,
    pub quit: bool,
}

impl Controls {
    pub fn from_input(input: &Input<KeyCode>, bindings: &Bindings) -> Self {
        Self {
            camera_forward: input.pressed(bindings.camera_forward),
            camera_back: input.pressed(bindings.camera_back),
            camera_right: input.pressed(bindings.camera_right),
            camera_left: input.pressed(bindings.camera_left),
            turn_right: input.pressed(bindings.turn_right),
            turn_left: input.pressed(bindings.turn_left),
            fire: input.just_pressed(bindings.fire),
            launch: input.pressed(bindings.launch),
            gravity_boost: input.just_pressed(bindings.gravity_boost),
            quit: input.just_pressed(bindings.quit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_sets_pressed_and_just_pressed() {
        let mut input = Input::new();
        input.press(KeyCode::KeyC);
        assert!(input.pressed(KeyCode::KeyC));
        assert!(input.just_pressed(KeyCode::KeyC));
        input.clear_just();
        assert!(input.pressed(KeyCode::KeyC));
        assert!(!input.just_pressed(KeyCode::KeyC));
    }

    #[test]
    fn repeat_press_does_not_retrigger() {
        let mut input = Input::new();
        input.press(KeyCode::KeyC);
        input.clear_just();
        input.press(KeyCode::KeyC);
        assert!(!input.just_pressed(KeyCode::KeyC));
    }

    #[test]
    fn release_sets_just_released() {
        let mut input = Input::new();
        input.press(KeyCode::KeyI);
        input.release(KeyCode::KeyI);
        assert!(!input.pressed(KeyCode::KeyI));
        assert!(input.just_released(KeyCode::KeyI));
    }

    #[test]
    fn controls_fire_is_edge_triggered() {
        let bindings = Bindings::default();
        let mut input = Input::new();
        input.press(KeyCode::KeyC);
        input.press(KeyCode::KeyD);
        let first = Controls::from_input(&input, &bindings);
        assert!(first.fire);
        assert!(first.turn_right);

        input.clear_just();
        let held = Controls::from_input(&input, &bindings);
        assert!(!held.fire, "holding fire must not refire");
        assert!(held.turn_right, "turning is level-triggered");
    }

    #[test]
    fn nothing_held_maps_to_default_controls() {
        let controls = Controls::from_input(&Input::new(), &Bindings::default());
        assert_eq!(controls, Controls::default());
    }
}
