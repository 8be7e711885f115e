//! A page of independent timer widgets.
//!
//! [`mount`] is the page-ready scan: it attaches one widget to every
//! container that carries the required elements and skips the rest. The
//! resulting widgets can be driven individually, or composed into the page
//! [`Model`], a bubbletea model that routes ticks to their owners, maps key
//! presses to the focused widget's buttons, and renders one row per widget.
//!
//! ```rust
//! use bubbletea_voicetimer::binding::{MemoryContainer, Role};
//! use bubbletea_voicetimer::page;
//! use bubbletea_voicetimer::widget::Config;
//!
//! let containers = vec![
//!     MemoryContainer::standard("plank"),
//!     MemoryContainer::standard("broken").without(Role::Reset),
//!     MemoryContainer::standard("squats"),
//! ];
//! let widgets = page::mount(containers, &Config::default());
//! assert_eq!(widgets.len(), 2);
//!
//! let page = page::new(widgets);
//! assert!(page.view().contains("squats"));
//! ```

use crate::binding::{Container, MemoryContainer, Role};
use crate::clock;
use crate::key::{self, Action, KeyMap};
use crate::voice::{self, BellSink, VoiceBank, VoiceConfig};
use crate::widget::{self, Config, Phase};
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use tracing::debug;
use unicode_width::UnicodeWidthStr;

/// Attaches a widget to every usable container, in order.
///
/// This is the page-ready scan. Containers missing the display or one of
/// the start/stop/reset buttons are skipped and logged at debug level; no
/// error reaches the caller. Every mounted widget gets its own copy of
/// `config`.
///
/// # Examples
///
/// ```rust
/// use bubbletea_voicetimer::binding::{Container, MemoryContainer, Role};
/// use bubbletea_voicetimer::page;
/// use bubbletea_voicetimer::widget::Config;
/// use std::time::Duration;
///
/// let config = Config {
///     interval: Duration::from_millis(500),
///     ..Config::default()
/// };
/// let widgets = page::mount(
///     [
///         MemoryContainer::standard("plank"),
///         MemoryContainer::standard("no display").without(Role::Display),
///     ],
///     &config,
/// );
///
/// assert_eq!(widgets.len(), 1);
/// assert_eq!(widgets[0].container().name(), "plank");
/// assert_eq!(widgets[0].config().interval, Duration::from_millis(500));
/// ```
pub fn mount<C, I>(containers: I, config: &Config) -> Vec<widget::Model<C>>
where
    C: Container,
    I: IntoIterator<Item = C>,
{
    containers
        .into_iter()
        .filter_map(|container| {
            let name = container.name().to_string();
            match widget::attach_with_config(container, config.clone()) {
                Ok(model) => Some(model),
                Err(err) => {
                    debug!(container = %name, error = %err, "timer not attached");
                    None
                }
            }
        })
        .collect()
}

/// Styles used when rendering a page.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Widget name column.
    pub name: Style,
    /// Clock of a stopped widget.
    pub idle: Style,
    /// Clock during the countdown.
    pub countdown: Style,
    /// Clock while counting up.
    pub count_up: Style,
    /// Marker in front of the focused row.
    pub focus_marker: Style,
    /// Countdown settings and help line.
    pub faint: Style,
}

impl Default for Styles {
    fn default() -> Self {
        use lipgloss::AdaptiveColor;

        Self {
            name: Style::new().bold(true),
            idle: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            countdown: Style::new().bold(true).foreground(Color::from("#FF6B6B")),
            count_up: Style::new().bold(true).foreground(Color::from("#4ECDC4")),
            focus_marker: Style::new().foreground(Color::from("#45B7D1")),
            faint: Style::new().faint(true),
        }
    }
}

/// Page of timer widgets with keyboard focus.
#[derive(Debug, Clone)]
pub struct Model<C: Container = MemoryContainer> {
    /// Key bindings.
    pub keymap: KeyMap,
    /// Rendering styles.
    pub styles: Styles,
    /// Whether the help line is rendered below the rows.
    pub show_help: bool,
    widgets: Vec<widget::Model<C>>,
    focus: usize,
}

/// Creates a page over already mounted widgets.
pub fn new<C: Container>(widgets: Vec<widget::Model<C>>) -> Model<C> {
    Model {
        keymap: key::default_key_map(),
        styles: Styles::default(),
        show_help: true,
        widgets,
        focus: 0,
    }
}

impl<C: Container> Model<C> {
    /// The mounted widgets.
    pub fn widgets(&self) -> &[widget::Model<C>] {
        &self.widgets
    }

    /// Mutable access to the mounted widgets.
    pub fn widgets_mut(&mut self) -> &mut [widget::Model<C>] {
        &mut self.widgets
    }

    /// Index of the focused widget.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// The focused widget, if the page has any.
    pub fn focused(&self) -> Option<&widget::Model<C>> {
        self.widgets.get(self.focus)
    }

    /// Handles key presses, ticks and control messages.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            let action = self.keymap.find_binding(key_msg)?.action;
            return self.apply(action);
        }

        self.widgets.iter_mut().find_map(|w| w.update(msg))
    }

    /// Performs `action` on the page or its focused widget.
    pub fn apply(&mut self, action: Action) -> Option<Cmd> {
        match action {
            Action::Quit => return Some(bubbletea_rs::quit()),
            Action::FocusNext => {
                if !self.widgets.is_empty() {
                    self.focus = (self.focus + 1) % self.widgets.len();
                }
                return None;
            }
            Action::FocusPrev => {
                if !self.widgets.is_empty() {
                    self.focus = (self.focus + self.widgets.len() - 1) % self.widgets.len();
                }
                return None;
            }
            _ => {}
        }

        let widget = self.widgets.get_mut(self.focus)?;
        match action {
            Action::Start => widget.start(),
            Action::Stop => {
                widget.stop();
                None
            }
            Action::Reset => {
                widget.reset();
                None
            }
            Action::ToggleCountdown => {
                let container = widget.container_mut();
                if let Some(checked) = container.checked(Role::CountdownToggle) {
                    container.set_checked(Role::CountdownToggle, !checked);
                }
                None
            }
            Action::MoreCountdown => {
                adjust_countdown(widget, 1);
                None
            }
            Action::LessCountdown => {
                adjust_countdown(widget, -1);
                None
            }
            Action::Quit | Action::FocusNext | Action::FocusPrev => None,
        }
    }

    /// Renders one row per widget, plus the help line.
    pub fn view(&self) -> String {
        let name_width = self
            .widgets
            .iter()
            .map(|w| UnicodeWidthStr::width(w.container().name()))
            .max()
            .unwrap_or(0);

        let mut lines: Vec<String> = self
            .widgets
            .iter()
            .enumerate()
            .map(|(i, w)| self.render_row(w, i == self.focus, name_width))
            .collect();

        if lines.is_empty() {
            lines.push(self.styles.faint.render("no timers on this page"));
        }
        if self.show_help {
            lines.push(String::new());
            lines.push(self.styles.faint.render(&self.keymap.short_help()));
        }
        lines.join("\n")
    }

    fn render_row(&self, w: &widget::Model<C>, focused: bool, name_width: usize) -> String {
        let marker = if focused {
            self.styles.focus_marker.render(">")
        } else {
            " ".to_string()
        };

        let name = w.container().name();
        let padding = " ".repeat(name_width.saturating_sub(UnicodeWidthStr::width(name)));
        let name = format!("{}{}", self.styles.name.render(name), padding);

        let clock_style = match w.phase() {
            Phase::Idle => &self.styles.idle,
            Phase::Countdown => &self.styles.countdown,
            Phase::CountUp => &self.styles.count_up,
        };
        let clock = clock_style.render(&w.view());

        let mut row = format!("{} {}  {}", marker, name, clock);
        if let Some(setting) = countdown_setting(w.container()) {
            row.push_str("  ");
            row.push_str(&self.styles.faint.render(&setting));
        }
        row
    }
}

fn adjust_countdown<C: Container>(widget: &mut widget::Model<C>, delta: i64) {
    let max = widget.config().max_countdown.max(0);
    let container = widget.container_mut();
    let Some(raw) = container.value(Role::CountdownSeconds) else {
        return;
    };
    let current = clock::parse_seconds_input(&raw).unwrap_or(0);
    let next = current.saturating_add(delta).clamp(0, max);
    container.set_value(Role::CountdownSeconds, &next.to_string());
}

fn countdown_setting<C: Container>(container: &C) -> Option<String> {
    let checked = container.checked(Role::CountdownToggle)?;
    let seconds = container.value(Role::CountdownSeconds).unwrap_or_default();
    let state = if checked { "on" } else { "off" };
    Some(format!("countdown {} ({}s)", state, seconds.trim()))
}

impl BubbleTeaModel for Model<MemoryContainer> {
    fn init() -> (Self, Option<Cmd>) {
        if voice::install(VoiceBank::load(&VoiceConfig::default(), BellSink)).is_err() {
            debug!("voice bank already installed");
        }
        let mut timer = MemoryContainer::standard("timer");
        timer.set_checked(Role::CountdownToggle, true);
        let widgets = mount([timer], &Config::default());
        (new(widgets), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        Model::update(self, &msg)
    }

    fn view(&self) -> String {
        Model::view(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn press(key: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn page_of(names: &[&str]) -> Model {
        let containers = names.iter().map(|n| MemoryContainer::standard(*n));
        new(mount(containers, &Config::default()))
    }

    fn plain(s: &str) -> String {
        lipgloss::strip_ansi(s)
    }

    #[test]
    fn test_mount_skips_incomplete_containers() {
        let containers = vec![
            MemoryContainer::standard("a"),
            MemoryContainer::standard("b").without(Role::Display),
            MemoryContainer::standard("c").without(Role::Start),
            MemoryContainer::standard("d").without(Role::SecondsField),
        ];
        let widgets = mount(containers, &Config::default());
        let names: Vec<&str> = widgets.iter().map(|w| w.container().name()).collect();
        assert_eq!(names, vec!["a", "d"]);
    }

    #[test]
    fn test_mount_passes_config() {
        let config = Config {
            max_countdown: 4,
            ..Config::default()
        };
        let widgets = mount([MemoryContainer::standard("a")], &config);
        assert_eq!(widgets[0].config().max_countdown, 4);
    }

    #[test]
    fn test_keys_drive_focused_widget() {
        let mut page = page_of(&["plank", "squats"]);
        assert!(page.update(&press(KeyCode::Tab)).is_none());
        assert_eq!(page.focus(), 1);

        assert!(page.update(&press(KeyCode::Char('s'))).is_some());
        assert!(!page.widgets()[0].running());
        assert!(page.widgets()[1].running());

        page.update(&press(KeyCode::Char('x')));
        assert!(!page.widgets()[1].running());

        page.update(&press(KeyCode::BackTab));
        assert_eq!(page.focus(), 0);
        page.update(&press(KeyCode::BackTab));
        assert_eq!(page.focus(), 1);
    }

    #[test]
    fn test_countdown_keys_edit_inputs() {
        let mut page = page_of(&["plank"]);
        page.update(&press(KeyCode::Char('c')));
        let container = page.widgets()[0].container();
        assert_eq!(container.checked(Role::CountdownToggle), Some(true));

        page.update(&press(KeyCode::Char('+')));
        assert_eq!(
            page.widgets()[0].container().value(Role::CountdownSeconds).as_deref(),
            Some("10")
        );
        for _ in 0..3 {
            page.update(&press(KeyCode::Char('-')));
        }
        assert_eq!(
            page.widgets()[0].container().value(Role::CountdownSeconds).as_deref(),
            Some("7")
        );

        page.update(&press(KeyCode::Char('s')));
        assert_eq!(page.widgets()[0].phase(), Phase::Countdown);
        assert_eq!(page.widgets()[0].countdown_remaining(), 7);
    }

    #[test]
    fn test_countdown_input_floor_is_zero() {
        let mut page = page_of(&["plank"]);
        page.widgets_mut()[0]
            .container_mut()
            .set_value(Role::CountdownSeconds, "1");
        page.update(&press(KeyCode::Char('-')));
        page.update(&press(KeyCode::Char('-')));
        assert_eq!(
            page.widgets()[0].container().value(Role::CountdownSeconds).as_deref(),
            Some("0")
        );
    }

    #[test]
    fn test_countdown_input_edits_saturate() {
        let mut page = page_of(&["plank"]);
        page.widgets_mut()[0]
            .container_mut()
            .set_value(Role::CountdownSeconds, &i64::MAX.to_string());
        assert!(page.apply(Action::MoreCountdown).is_none());
        assert_eq!(
            page.widgets()[0].container().value(Role::CountdownSeconds).as_deref(),
            Some("10")
        );

        page.widgets_mut()[0]
            .container_mut()
            .set_value(Role::CountdownSeconds, &i64::MIN.to_string());
        page.apply(Action::LessCountdown);
        assert_eq!(
            page.widgets()[0].container().value(Role::CountdownSeconds).as_deref(),
            Some("0")
        );
    }

    #[test]
    fn test_negative_max_countdown_does_not_panic() {
        let config = Config {
            max_countdown: -1,
            ..Config::default()
        };
        let mut page = new(mount([MemoryContainer::standard("plank")], &config));
        page.apply(Action::MoreCountdown);
        page.apply(Action::LessCountdown);
        assert_eq!(
            page.widgets()[0].container().value(Role::CountdownSeconds).as_deref(),
            Some("0")
        );

        page.apply(Action::ToggleCountdown);
        page.widgets_mut()[0]
            .container_mut()
            .set_value(Role::CountdownSeconds, "5");
        page.apply(Action::Start);
        assert_eq!(page.widgets()[0].phase(), Phase::CountUp);
    }

    #[test]
    fn test_reset_key() {
        let mut page = page_of(&["plank"]);
        page.update(&press(KeyCode::Char('s')));
        page.update(&press(KeyCode::Char('r')));
        assert_eq!(page.widgets()[0].phase(), Phase::Idle);
        assert_eq!(page.widgets()[0].view(), "00:00:00");
    }

    #[test]
    fn test_quit_and_unbound_keys() {
        let mut page = page_of(&["plank"]);
        assert!(page.update(&press(KeyCode::Char('q'))).is_some());
        assert!(page.update(&press(KeyCode::Char('z'))).is_none());
    }

    #[test]
    fn test_empty_page() {
        let mut page: Model = new(Vec::new());
        assert!(page.update(&press(KeyCode::Char('s'))).is_none());
        assert!(page.update(&press(KeyCode::Tab)).is_none());
        assert!(page.focused().is_none());
        assert!(plain(&page.view()).contains("no timers on this page"));
    }

    #[test]
    fn test_view_lists_each_widget() {
        let mut page = page_of(&["plank", "jumping jacks"]);
        page.show_help = false;
        let view = plain(&page.view());
        let lines: Vec<&str> = view.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("> plank"));
        assert!(lines[0].contains("00:00:00"));
        assert!(lines[0].contains("countdown off (10s)"));
        assert!(lines[1].contains("jumping jacks"));
        assert_eq!(lines[0].find("00:00:00"), lines[1].find("00:00:00"));
    }

    #[test]
    fn test_view_shows_help() {
        let page = page_of(&["plank"]);
        let view = plain(&page.view());
        assert!(view.contains("s start"));
        assert!(view.contains("q quit"));
    }
}
