#![warn(missing_docs)]

//! # bubbletea-voicetimer
//!
//! Workout timer widgets for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications: one independent timer per container, with start/stop/reset
//! controls, an optional voice-counted countdown (10 → 0) before counting
//! elapsed time, and a hidden seconds field that an enclosing form can
//! submit.
//!
//! ## Overview
//!
//! Every component follows the Elm Architecture pattern used by bubbletea-rs:
//! `update()` consumes messages and may return a command, `view()` renders a
//! string. Widgets never touch a concrete UI toolkit directly; they drive a
//! [`binding::Container`] that answers element lookups by role.
//!
//! ## Components
//!
//! - **`widget`**: the timer state machine (`Idle → Countdown → CountUp`)
//! - **`page`**: page-ready mounting and a multi-widget bubbletea model
//! - **`voice`**: preloaded countdown announcements with a process-wide bank
//! - **`clock`**: `HH:MM:SS` formatting
//! - **`binding`**: element roles, the `Container` trait and an in-memory tree
//! - **`key`**: key bindings for the page model
//!
//! ## Quick Start
//!
//! ```rust
//! use bubbletea_voicetimer::prelude::*;
//!
//! let mut drill = MemoryContainer::standard("plank");
//! drill.set_checked(Role::CountdownToggle, true);
//! drill.set_value(Role::CountdownSeconds, "5");
//!
//! let widgets = mount([drill], &TimerConfig::default());
//! let mut page = page_new(widgets);
//! let _tick = page.apply(Action::Start);
//! assert!(page.focused().map(|w| w.in_countdown()).unwrap_or(false));
//! ```
//!
//! ## Running a page
//!
//! ```rust,ignore
//! use bubbletea_rs::Program;
//! use bubbletea_voicetimer::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let program = Program::<TimerPage>::builder().build()?;
//!     program.run().await?;
//!     Ok(())
//! }
//! ```

pub mod binding;
pub mod clock;
pub mod error;
pub mod key;
pub mod page;
pub mod voice;
pub mod widget;

pub use binding::{Container, Element, MemoryContainer, Role};
pub use error::{Error, Result};
pub use page::{mount, new as page_new, Model as TimerPage, Styles as PageStyles};
pub use voice::{AudioSink, BellSink, Clip, SilentSink, VoiceBank, VoiceConfig};
pub use widget::{
    attach, attach_with_config, Config as TimerConfig, Control, ControlMsg, Model as Timer, Phase,
    TickMsg as TimerTickMsg,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_voicetimer::prelude::*;
///
/// let timer = attach(MemoryContainer::standard("plank"));
/// assert!(timer.is_ok());
/// ```
pub mod prelude {
    pub use crate::binding::{Container, Element, MemoryContainer, Role};
    pub use crate::clock::format as format_clock;
    pub use crate::key::{default_key_map, Action, Binding, KeyMap};
    pub use crate::page::{mount, new as page_new, Model as TimerPage, Styles as PageStyles};
    pub use crate::voice::{AudioSink, BellSink, SilentSink, VoiceBank, VoiceConfig};
    pub use crate::widget::{
        attach, attach_with_config, Config as TimerConfig, Control, Model as Timer, Phase,
    };
}
