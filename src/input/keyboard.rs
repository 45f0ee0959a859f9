use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Viewport actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// fly_forward = "KeyW"
/// toggle_ortho = "Numpad5"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Fly toward the view direction.
    FlyForward,
    /// Fly away from the view direction.
    FlyBackward,
    /// Strafe left.
    FlyLeft,
    /// Strafe right.
    FlyRight,
    /// Fit the whole scene in view.
    FrameScene,
    /// Switch between perspective and orthographic.
    ToggleOrtho,
    /// Look along -Z.
    ViewFront,
    /// Look along +Z.
    ViewBack,
    /// Look along +X.
    ViewLeft,
    /// Look along -X.
    ViewRight,
    /// Look down -Y.
    ViewTop,
    /// Look up +Y.
    ViewBottom,
}

impl KeyAction {
    /// Whether the action is held for continuous fly motion rather than
    /// fired once per press.
    #[must_use]
    pub fn is_fly(self) -> bool {
        matches!(
            self,
            Self::FlyForward | Self::FlyBackward | Self::FlyLeft | Self::FlyRight
        )
    }
}

/// Tracks which bound actions are currently held.
#[derive(Debug, Default)]
pub(crate) struct KeyState {
    held: FxHashSet<KeyAction>,
}

impl KeyState {
    /// Record a press. Returns `true` only on the transition from
    /// released, so key auto-repeat does not re-fire discrete actions.
    pub fn press(&mut self, action: KeyAction) -> bool {
        self.held.insert(action)
    }

    /// Record a release. Releasing an unheld key is ignored.
    pub fn release(&mut self, action: KeyAction) {
        let _ = self.held.remove(&action);
    }

    /// Drop every held key (focus loss).
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Net fly direction as (`right`, `forward`), each in `-1..=1`.
    #[must_use]
    pub fn fly_axes(&self) -> (f32, f32) {
        let axis = |pos: KeyAction, neg: KeyAction| {
            f32::from(u8::from(self.held.contains(&pos)))
                - f32::from(u8::from(self.held.contains(&neg)))
        };
        (
            axis(KeyAction::FlyRight, KeyAction::FlyLeft),
            axis(KeyAction::FlyForward, KeyAction::FlyBackward),
        )
    }
}
