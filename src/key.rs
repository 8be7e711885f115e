//! Key bindings for the timer page.

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// Something a key press asks the timer page to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Press the focused widget's start button.
    Start,
    /// Press the focused widget's stop button.
    Stop,
    /// Press the focused widget's reset button.
    Reset,
    /// Flip the focused widget's countdown checkbox.
    ToggleCountdown,
    /// Add one second to the countdown input.
    MoreCountdown,
    /// Remove one second from the countdown input.
    LessCountdown,
    /// Move focus to the next widget.
    FocusNext,
    /// Move focus to the previous widget.
    FocusPrev,
    /// Leave the program.
    Quit,
}

/// Keys that trigger an [`Action`].
#[derive(Debug, Clone)]
pub struct Binding {
    /// What the keys do.
    pub action: Action,
    /// Key codes that trigger the action.
    pub keys: Vec<KeyCode>,
    /// Key label shown in the help line.
    pub help: String,
    /// Description shown in the help line.
    pub description: String,
}

impl Binding {
    /// Binds `keys` to `action`.
    pub fn new(action: Action, keys: Vec<KeyCode>) -> Self {
        Self {
            action,
            keys,
            help: String::new(),
            description: String::new(),
        }
    }

    /// Sets the help key label and description.
    pub fn with_help(mut self, help: impl Into<String>, description: impl Into<String>) -> Self {
        self.help = help.into();
        self.description = description.into();
        self
    }

    /// Whether the key press triggers this binding.
    pub fn matches(&self, key_msg: &KeyMsg) -> bool {
        if key_msg.modifiers.contains(KeyModifiers::CONTROL) {
            return self.action == Action::Quit && key_msg.key == KeyCode::Char('c');
        }
        self.keys.contains(&key_msg.key)
    }
}

/// Ordered set of bindings; the first match wins.
#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    bindings: Vec<Binding>,
}

impl KeyMap {
    /// An empty key map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a binding.
    pub fn add_binding(mut self, binding: Binding) -> Self {
        self.bindings.push(binding);
        self
    }

    /// All bindings in match order.
    pub fn get_bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// First binding matching the key press.
    pub fn find_binding(&self, key_msg: &KeyMsg) -> Option<&Binding> {
        self.bindings.iter().find(|binding| binding.matches(key_msg))
    }

    /// One-line help, e.g. `s start • x stop`.
    pub fn short_help(&self) -> String {
        self.bindings
            .iter()
            .filter(|b| !b.help.is_empty())
            .map(|b| format!("{} {}", b.help, b.description))
            .collect::<Vec<_>>()
            .join(" • ")
    }
}

/// Bindings used by the page model.
pub fn default_key_map() -> KeyMap {
    KeyMap::new()
        .add_binding(Binding::new(Action::Start, vec![KeyCode::Char('s')]).with_help("s", "start"))
        .add_binding(Binding::new(Action::Stop, vec![KeyCode::Char('x')]).with_help("x", "stop"))
        .add_binding(Binding::new(Action::Reset, vec![KeyCode::Char('r')]).with_help("r", "reset"))
        .add_binding(
            Binding::new(Action::ToggleCountdown, vec![KeyCode::Char('c')])
                .with_help("c", "countdown"),
        )
        .add_binding(
            Binding::new(Action::MoreCountdown, vec![KeyCode::Char('+'), KeyCode::Char('=')])
                .with_help("+/-", "countdown secs"),
        )
        .add_binding(Binding::new(Action::LessCountdown, vec![KeyCode::Char('-')]))
        .add_binding(
            Binding::new(Action::FocusNext, vec![KeyCode::Tab, KeyCode::Down, KeyCode::Char('j')])
                .with_help("tab", "next"),
        )
        .add_binding(Binding::new(
            Action::FocusPrev,
            vec![KeyCode::BackTab, KeyCode::Up, KeyCode::Char('k')],
        ))
        .add_binding(
            Binding::new(Action::Quit, vec![KeyCode::Char('q'), KeyCode::Esc]).with_help("q", "quit"),
        )
}
