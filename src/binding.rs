//! UI binding between timer widgets and the elements they drive.
//!
//! A widget never talks to a concrete toolkit. It is handed a [`Container`]
//! that answers element lookups by [`Role`] and exposes the handful of
//! accessors the timer needs: text for the display, a checked flag for the
//! countdown toggle, and string values for the seconds input and the hidden
//! form field. Button clicks arrive separately, as messages routed by the
//! host (see [`crate::widget::ControlMsg`]).
//!
//! [`MemoryContainer`] is an in-memory implementation used by the terminal
//! page model and by tests.
//!
//! ```rust
//! use bubbletea_voicetimer::binding::{Container, MemoryContainer, Role};
//!
//! let mut c = MemoryContainer::standard("plank");
//! c.set_text(Role::Display, "00:00:01");
//! assert_eq!(c.text(Role::Display).as_deref(), Some("00:00:01"));
//! assert!(c.has(Role::Start));
//! ```

use std::collections::BTreeMap;

/// The part an element plays inside a timer container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    /// Shows the formatted clock.
    Display,
    /// Checkbox enabling the voice countdown before counting up.
    CountdownToggle,
    /// Numeric input holding the countdown length in seconds.
    CountdownSeconds,
    /// Start button.
    Start,
    /// Stop button.
    Stop,
    /// Reset button.
    Reset,
    /// Hidden numeric field mirroring elapsed seconds for form submission.
    SecondsField,
}

impl Role {
    /// Roles a container must provide for a widget to attach.
    pub const REQUIRED: [Role; 4] = [Role::Display, Role::Start, Role::Stop, Role::Reset];

    /// Every role, in display order.
    pub const ALL: [Role; 7] = [
        Role::Display,
        Role::CountdownToggle,
        Role::CountdownSeconds,
        Role::Start,
        Role::Stop,
        Role::Reset,
        Role::SecondsField,
    ];
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Role::Display => "display",
                Role::CountdownToggle => "countdown toggle",
                Role::CountdownSeconds => "countdown seconds",
                Role::Start => "start",
                Role::Stop => "stop",
                Role::Reset => "reset",
                Role::SecondsField => "seconds field",
            }
        )
    }
}

/// Element lookup and mutation capability injected into a widget.
///
/// Accessors return `None` when the container has no element for the role.
/// Setters on a missing element do nothing.
pub trait Container {
    /// Name used for logging and rendering. Defaults to an empty string.
    fn name(&self) -> &str {
        ""
    }

    /// Whether an element with this role exists.
    fn has(&self, role: Role) -> bool;

    /// Visible text of the element.
    fn text(&self, role: Role) -> Option<String>;

    /// Replaces the visible text of the element.
    fn set_text(&mut self, role: Role, text: &str);

    /// Form value of an input element.
    fn value(&self, role: Role) -> Option<String>;

    /// Replaces the form value of an input element.
    fn set_value(&mut self, role: Role, value: &str);

    /// Checked state of a checkbox element.
    fn checked(&self, role: Role) -> Option<bool>;

    /// Sets the checked state of a checkbox element.
    fn set_checked(&mut self, role: Role, checked: bool);
}

/// A single element of a [`MemoryContainer`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Visible text.
    pub text: String,
    /// Form value.
    pub value: String,
    /// Checkbox state.
    pub checked: bool,
}

impl Element {
    /// An element with the given visible text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// An input element holding `value`.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }
}

/// Number of display writes a [`MemoryContainer`] remembers by default.
pub const DISPLAY_HISTORY_LIMIT: usize = 32;

/// In-memory element tree keyed by role.
///
/// Display writes are also appended to a bounded history, which lets callers
/// observe intermediate frames written during a single update. Only the
/// most recent writes are kept.
#[derive(Debug, Clone)]
pub struct MemoryContainer {
    name: String,
    elements: BTreeMap<Role, Element>,
    display_history: Vec<String>,
    history_limit: usize,
}

impl Default for MemoryContainer {
    fn default() -> Self {
        Self::new("")
    }
}

impl MemoryContainer {
    /// Creates an empty container.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            elements: BTreeMap::new(),
            display_history: Vec::new(),
            history_limit: DISPLAY_HISTORY_LIMIT,
        }
    }

    /// Keeps at most `limit` display writes. Zero disables the history.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self.trim_history();
        self
    }

    /// A container with every role present: countdown unchecked with a
    /// ten second input, hidden field at `0`.
    pub fn standard(name: impl Into<String>) -> Self {
        Self::new(name)
            .with_element(Role::Display, Element::with_text("00:00:00"))
            .with_element(Role::CountdownToggle, Element::default())
            .with_element(Role::CountdownSeconds, Element::with_value("10"))
            .with_element(Role::Start, Element::with_text("Start"))
            .with_element(Role::Stop, Element::with_text("Stop"))
            .with_element(Role::Reset, Element::with_text("Reset"))
            .with_element(Role::SecondsField, Element::with_value("0"))
    }

    /// Adds or replaces the element for `role`.
    pub fn with_element(mut self, role: Role, element: Element) -> Self {
        self.elements.insert(role, element);
        self
    }

    /// Removes the element for `role`.
    pub fn without(mut self, role: Role) -> Self {
        self.elements.remove(&role);
        self
    }

    /// Direct access to an element.
    pub fn element(&self, role: Role) -> Option<&Element> {
        self.elements.get(&role)
    }

    /// The most recent display writes, oldest first.
    pub fn display_history(&self) -> &[String] {
        &self.display_history
    }

    /// Forgets recorded display writes.
    pub fn clear_display_history(&mut self) {
        self.display_history.clear();
    }

    fn trim_history(&mut self) {
        let len = self.display_history.len();
        if len > self.history_limit {
            self.display_history.drain(..len - self.history_limit);
        }
    }
}

impl Container for MemoryContainer {
    fn name(&self) -> &str {
        &self.name
    }

    fn has(&self, role: Role) -> bool {
        self.elements.contains_key(&role)
    }

    fn text(&self, role: Role) -> Option<String> {
        self.elements.get(&role).map(|e| e.text.clone())
    }

    fn set_text(&mut self, role: Role, text: &str) {
        if let Some(element) = self.elements.get_mut(&role) {
            element.text = text.to_string();
            if role == Role::Display && self.history_limit > 0 {
                self.display_history.push(text.to_string());
                self.trim_history();
            }
        }
    }

    fn value(&self, role: Role) -> Option<String> {
        self.elements.get(&role).map(|e| e.value.clone())
    }

    fn set_value(&mut self, role: Role, value: &str) {
        if let Some(element) = self.elements.get_mut(&role) {
            element.value = value.to_string();
        }
    }

    fn checked(&self, role: Role) -> Option<bool> {
        self.elements.get(&role).map(|e| e.checked)
    }

    fn set_checked(&mut self, role: Role, checked: bool) {
        if let Some(element) = self.elements.get_mut(&role) {
            element.checked = checked;
        }
    }
}
