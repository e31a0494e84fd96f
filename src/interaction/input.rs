use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::tools::{ToolId, ToolRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Escape,
    Delete,
    Backspace,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyModifiers {
    /// Ctrl/Alt/Meta chords belong to the host, not to tool shortcuts.
    #[must_use]
    pub fn has_command_modifier(self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: KeyModifiers,
    /// Focus is inside a text input element.
    pub text_input_focused: bool,
}

impl KeyEvent {
    #[must_use]
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::default(),
            text_input_focused: false,
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn in_text_input(mut self) -> Self {
        self.text_input_focused = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputCommand {
    SelectTool(ToolId),
    Escape,
    DeleteLast,
}

/// Event streams the controller listens to while attached to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputChannel {
    Click,
    CrosshairMove,
    Resize,
    Keyboard,
}

impl InputChannel {
    pub const ALL: [InputChannel; 4] = [
        InputChannel::Click,
        InputChannel::CrosshairMove,
        InputChannel::Resize,
        InputChannel::Keyboard,
    ];
}

/// Binds surface events and keyboard shortcuts to engine commands.
///
/// Channels are bound when a surface is attached and unbound on teardown;
/// events on unbound channels are dropped.
#[derive(Debug, Clone, Default)]
pub struct InputController {
    bound: IndexSet<InputChannel>,
    shortcuts_enabled: bool,
}

impl InputController {
    #[must_use]
    pub fn new(shortcuts_enabled: bool) -> Self {
        Self {
            bound: IndexSet::new(),
            shortcuts_enabled,
        }
    }

    pub fn bind_all(&mut self) {
        self.bound.extend(InputChannel::ALL);
        trace!("input channels bound");
    }

    pub fn unbind_all(&mut self) {
        self.bound.clear();
        trace!("input channels unbound");
    }

    #[must_use]
    pub fn is_bound(&self, channel: InputChannel) -> bool {
        self.bound.contains(&channel)
    }

    #[must_use]
    pub fn shortcuts_enabled(&self) -> bool {
        self.shortcuts_enabled
    }

    pub fn set_shortcuts_enabled(&mut self, enabled: bool) {
        self.shortcuts_enabled = enabled;
    }

    /// Resolves a key event to a command.
    ///
    /// Keys typed into text inputs and command-modifier chords are ignored.
    #[must_use]
    pub fn resolve_key(&self, registry: &ToolRegistry, event: KeyEvent) -> Option<InputCommand> {
        if !self.is_bound(InputChannel::Keyboard)
            || event.text_input_focused
            || event.modifiers.has_command_modifier()
        {
            return None;
        }
        match event.key {
            Key::Escape => Some(InputCommand::Escape),
            Key::Delete | Key::Backspace => Some(InputCommand::DeleteLast),
            Key::Char(key) if self.shortcuts_enabled => {
                registry.by_shortcut(key).map(InputCommand::SelectTool)
            }
            Key::Char(_) | Key::Other => None,
        }
    }
}
