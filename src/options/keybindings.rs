use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::input::KeyAction;

/// Keyboard bindings, one key per action. Keys use the
/// `winit::keyboard::KeyCode` debug names (`"KeyF"`, `"ArrowUp"`).
///
/// A `[keybindings.bindings]` table overrides the defaults entry by entry:
/// actions it does not mention keep their default key, and a key taken
/// over by another action is removed from its previous one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeybindingOptions {
    /// Action → key string.
    #[serde(deserialize_with = "merge_over_defaults")]
    pub bindings: FxHashMap<KeyAction, String>,
    /// Key string → action. Rebuilt on load.
    #[serde(skip)]
    key_to_action: FxHashMap<String, KeyAction>,
}

fn default_bindings() -> FxHashMap<KeyAction, String> {
    [
        (KeyAction::FlyForward, "ArrowUp"),
        (KeyAction::FlyBackward, "ArrowDown"),
        (KeyAction::FlyLeft, "ArrowLeft"),
        (KeyAction::FlyRight, "ArrowRight"),
        (KeyAction::FrameScene, "KeyF"),
        (KeyAction::ToggleOrtho, "KeyO"),
        (KeyAction::ViewFront, "Digit1"),
        (KeyAction::ViewBack, "Digit2"),
        (KeyAction::ViewRight, "Digit3"),
        (KeyAction::ViewLeft, "Digit4"),
        (KeyAction::ViewTop, "Digit7"),
        (KeyAction::ViewBottom, "Digit8"),
    ]
    .into_iter()
    .map(|(action, key)| (action, key.to_owned()))
    .collect()
}

fn merge_over_defaults<'de, D>(de: D) -> Result<FxHashMap<KeyAction, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = FxHashMap::<KeyAction, String>::deserialize(de)?;
    let mut bindings = default_bindings();
    for (action, key) in overrides {
        let _ = bind_into(&mut bindings, action, key);
    }
    Ok(bindings)
}

/// Bind `key` to `action`, unbinding whichever other action held it.
fn bind_into(
    bindings: &mut FxHashMap<KeyAction, String>,
    action: KeyAction,
    key: String,
) -> Option<KeyAction> {
    let displaced = bindings
        .iter()
        .find(|(a, k)| **a != action && **k == key)
        .map(|(a, _)| *a);
    if let Some(other) = displaced {
        log::warn!("key {key} rebound from {other:?} to {action:?}");
        let _ = bindings.remove(&other);
    }
    let _ = bindings.insert(action, key);
    displaced
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let mut opts = Self {
            bindings: default_bindings(),
            key_to_action: FxHashMap::default(),
        };
        opts.rebuild_reverse_map();
        opts
    }
}

impl KeybindingOptions {
    /// Rebuild the reverse lookup map (key string → action).
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_action = self
            .bindings
            .iter()
            .map(|(action, key)| (key.clone(), *action))
            .collect();
    }

    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.key_to_action.get(key).copied()
    }

    /// Key currently bound to `action`.
    #[must_use]
    pub fn key_for(&self, action: KeyAction) -> Option<&str> {
        self.bindings.get(&action).map(String::as_str)
    }

    /// Bind `key` to `action`. Returns the action that previously held
    /// the key, which is left unbound.
    pub fn bind(&mut self, action: KeyAction, key: impl Into<String>) -> Option<KeyAction> {
        let displaced = bind_into(&mut self.bindings, action, key.into());
        self.rebuild_reverse_map();
        displaced
    }

    /// Remove the binding of `action`.
    pub fn unbind(&mut self, action: KeyAction) {
        if self.bindings.remove(&action).is_some() {
            self.rebuild_reverse_map();
        }
    }
}
