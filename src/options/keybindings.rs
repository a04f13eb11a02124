use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "RawKeybindings")]
/// Configurable keyboard bindings mapping actions to key codes.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format: `"KeyF"`,
/// `"F12"`, `"Escape"`.
pub struct KeybindingOptions {
    /// Maps action → key string (e.g. `Screenshot` → `"F12"`).
    pub bindings: HashMap<KeyAction, String>,
    /// Reverse lookup cache (key string → action). Rebuilt on load.
    #[serde(skip)]
    key_to_action: HashMap<String, KeyAction>,
}

/// Serialized shape of [`KeybindingOptions`]. Entries from a file override
/// the defaults one action at a time; converting rebuilds the reverse map.
#[derive(Deserialize, Default)]
#[serde(default)]
struct RawKeybindings {
    bindings: HashMap<KeyAction, String>,
}

impl From<RawKeybindings> for KeybindingOptions {
    fn from(raw: RawKeybindings) -> Self {
        let mut opts = Self::default();
        let mut entries: Vec<_> = raw.bindings.into_iter().collect();
        entries.sort_unstable_by_key(|(action, _)| *action);
        for (action, key) in entries {
            opts.claim(action, key);
        }
        opts.rebuild_reverse_map();
        opts
    }
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (KeyAction::ToggleWireframe, "KeyF".into()),
            (KeyAction::ToggleGrid, "KeyG".into()),
            (KeyAction::ToggleAxis, "KeyX".into()),
            (KeyAction::Screenshot, "F12".into()),
            (KeyAction::ResetCamera, "KeyR".into()),
            (KeyAction::Quit, "Escape".into()),
        ]);

        let mut opts = Self {
            bindings,
            key_to_action: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }
}

impl KeybindingOptions {
    /// Rebuild the reverse lookup map (key string → action).
    ///
    /// Actions are visited in declaration order; if two share a key the
    /// first one keeps it.
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_action.clear();
        let mut entries: Vec<_> = self.bindings.iter().collect();
        entries.sort_unstable_by_key(|(action, _)| **action);
        for (action, key) in entries {
            match self.key_to_action.get(key) {
                Some(owner) => log::warn!("{key} already bound to {owner:?}; {action:?} ignored"),
                None => {
                    let _ = self.key_to_action.insert(key.clone(), *action);
                }
            }
        }
    }

    /// Bind `action` to `key`, replacing any previous key for it. Another
    /// action holding `key` loses its binding.
    pub fn bind(&mut self, action: KeyAction, key: impl Into<String>) {
        self.claim(action, key.into());
        self.rebuild_reverse_map();
    }

    fn claim(&mut self, action: KeyAction, key: String) {
        self.bindings.retain(|other, bound| {
            let taken = *other != action && *bound == key;
            if taken {
                log::warn!("{key} rebound from {other:?} to {action:?}");
            }
            !taken
        });
        let _ = self.bindings.insert(action, key);
    }

    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.key_to_action.get(key).copied()
    }
}
