//! Countdown / count-up timer widget.
//!
//! One widget drives one [`Container`]. Pressing start either counts up
//! immediately, or first runs a voice-counted countdown (`-00:00:10` down to
//! `-00:00:00`, one clip per second) and then counts up from `00:00:00`.
//! While counting up, the elapsed seconds are mirrored into the container's
//! hidden seconds field so an enclosing form can submit them.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_voicetimer::binding::{Container, MemoryContainer, Role};
//! use bubbletea_voicetimer::widget::{self, Phase};
//!
//! let mut plank = widget::attach(MemoryContainer::standard("plank")).unwrap();
//! let _tick = plank.start();
//! assert_eq!(plank.phase(), Phase::CountUp);
//! assert_eq!(plank.container().text(Role::Display).as_deref(), Some("00:00:00"));
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//! use bubbletea_voicetimer::binding::MemoryContainer;
//! use bubbletea_voicetimer::widget::{self, Control, Model};
//!
//! struct App {
//!     timer: Model<MemoryContainer>,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let timer = widget::attach(MemoryContainer::standard("drill")).unwrap();
//!         let cmd = timer.press(Control::Start);
//!         (Self { timer }, Some(cmd))
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.timer.update(&msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.timer.view()
//!     }
//! }
//! ```
//!
//! # Timers
//!
//! Each phase is a chain of `tick` commands. Only the chain whose tag
//! matches the widget's current tag is honoured, so every phase change bumps
//! the tag and any tick still in flight from the previous chain is dropped.
//!
//! The last countdown tick writes `-00:00:00`, announces zero, and switches
//! straight to `00:00:00` within the same update. A host that renders once
//! per update therefore shows `-00:00:01` followed by `00:00:00`; the
//! `-00:00:00` frame is only observable through the container (for
//! example [`MemoryContainer::display_history`]).

use crate::binding::{Container, MemoryContainer, Role};
use crate::clock;
use crate::error::{Error, Result};
use crate::voice::{self, VoiceBank};
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Longest countdown a widget will run, in seconds.
pub const MAX_COUNTDOWN: i64 = 10;

/// Widget tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Time between ticks of either phase.
    pub interval: Duration,
    /// Countdown inputs above this value are clamped to it. Zero or less
    /// disables the countdown.
    pub max_countdown: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_countdown: MAX_COUNTDOWN,
        }
    }
}

/// Which timer, if any, is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No timer active. Counters keep whatever values they last had.
    Idle,
    /// Counting down towards the start of the session.
    Countdown,
    /// Counting elapsed seconds.
    CountUp,
}

/// A control button of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Start button.
    Start,
    /// Stop button.
    Stop,
    /// Reset button.
    Reset,
}

/// A click on one of a widget's control buttons.
#[derive(Debug, Clone)]
pub struct ControlMsg {
    /// Identifier of the target widget.
    pub id: i64,
    /// The button pressed.
    pub control: Control,
}

/// One tick of a widget's active timer.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// Identifier of the widget that scheduled this tick.
    pub id: i64,
    tag: i64,
}

/// Timer widget bound to a container.
#[derive(Debug, Clone)]
pub struct Model<C: Container = MemoryContainer> {
    config: Config,
    container: C,
    voice: Option<Arc<VoiceBank>>,
    id: i64,
    tag: i64,
    phase: Phase,
    elapsed_seconds: u64,
    countdown_remaining: i64,
}

/// Attaches a widget to `container` with the default configuration.
///
/// Fails with [`Error::MissingElement`] when the display or one of the
/// start/stop/reset buttons is absent.
pub fn attach<C: Container>(container: C) -> Result<Model<C>> {
    attach_with_config(container, Config::default())
}

/// Attaches a widget to `container` using `config`.
pub fn attach_with_config<C: Container>(container: C, config: Config) -> Result<Model<C>> {
    if let Some(role) = Role::REQUIRED.into_iter().find(|role| !container.has(*role)) {
        return Err(Error::MissingElement(role));
    }
    Ok(bind(container, config))
}

fn bind<C: Container>(container: C, config: Config) -> Model<C> {
    Model {
        config,
        container,
        voice: None,
        id: next_id(),
        tag: 0,
        phase: Phase::Idle,
        elapsed_seconds: 0,
        countdown_remaining: 0,
    }
}

impl<C: Container> Model<C> {
    /// Uses `bank` for countdown announcements instead of the global bank.
    pub fn with_voice(mut self, bank: Arc<VoiceBank>) -> Self {
        self.voice = Some(bank);
        self
    }

    /// Unique identifier carried by this widget's messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether either timer is active.
    pub fn running(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Whether the countdown is in progress.
    pub fn in_countdown(&self) -> bool {
        self.phase == Phase::Countdown
    }

    /// Seconds counted since the count-up phase began.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Seconds left in the countdown.
    pub fn countdown_remaining(&self) -> i64 {
        self.countdown_remaining
    }

    /// The configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The bound container.
    pub fn container(&self) -> &C {
        &self.container
    }

    /// Mutable access to the bound container, e.g. to edit its inputs.
    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    /// Detaches the widget, handing back its container.
    pub fn into_container(self) -> C {
        self.container
    }

    /// Command delivering a click on `control` to this widget.
    pub fn press(&self, control: Control) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(ControlMsg { id, control }) as Msg
        })
    }

    /// Starts the widget.
    ///
    /// Does nothing while a timer is already active. A fresh session runs
    /// the countdown first when it is enabled and its input is positive; a
    /// stopped session resumes counting up.
    ///
    /// # Returns
    ///
    /// The first tick command of the phase that was entered, or `None` when
    /// the call was ignored.
    ///
    /// # Examples
    ///
    /// Countdown inputs above the configured maximum are clamped:
    /// ```rust
    /// use bubbletea_voicetimer::binding::{Container, MemoryContainer, Role};
    /// use bubbletea_voicetimer::widget::{self, Phase};
    ///
    /// let mut container = MemoryContainer::standard("burpees");
    /// container.set_checked(Role::CountdownToggle, true);
    /// container.set_value(Role::CountdownSeconds, "15");
    ///
    /// let mut timer = widget::attach(container).unwrap();
    /// assert!(timer.start().is_some());
    /// assert_eq!(timer.phase(), Phase::Countdown);
    /// assert_eq!(timer.countdown_remaining(), 10);
    /// assert_eq!(timer.view(), "-00:00:10");
    ///
    /// // Already running: nothing happens.
    /// assert!(timer.start().is_none());
    /// ```
    ///
    /// Stopping keeps the elapsed seconds, so the next start resumes:
    /// ```rust
    /// use bubbletea_voicetimer::binding::MemoryContainer;
    /// use bubbletea_voicetimer::widget::{self, Phase};
    ///
    /// let mut timer = widget::attach(MemoryContainer::standard("plank")).unwrap();
    /// timer.start();
    /// timer.stop();
    /// assert_eq!(timer.phase(), Phase::Idle);
    /// timer.start();
    /// assert_eq!(timer.phase(), Phase::CountUp);
    /// ```
    pub fn start(&mut self) -> Option<Cmd> {
        if self.running() {
            return None;
        }
        if self.elapsed_seconds == 0 {
            if let Some(seconds) = self.countdown_length() {
                return Some(self.begin_countdown(seconds));
            }
        }
        Some(self.begin_count_up())
    }

    /// Stops the active timer, keeping both counters.
    pub fn stop(&mut self) {
        if !self.running() {
            return;
        }
        self.cancel();
    }

    /// Stops any timer and returns to the initial zero state.
    pub fn reset(&mut self) {
        self.cancel();
        self.elapsed_seconds = 0;
        self.countdown_remaining = 0;
        self.container.set_value(Role::SecondsField, "0");
        self.container.set_text(Role::Display, &clock::format(0, false));
    }

    /// Handles tick and control messages addressed to this widget.
    ///
    /// Messages carrying another widget's id are ignored, as are ticks from
    /// a timer chain that has since been stopped, reset or replaced. Every
    /// other message type is ignored too, so a host can offer each message
    /// to all of its widgets.
    ///
    /// # Returns
    ///
    /// The next tick command while a timer keeps running, `None` otherwise.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_rs::Msg;
    /// use bubbletea_voicetimer::binding::MemoryContainer;
    /// use bubbletea_voicetimer::widget::{self, Control, ControlMsg};
    ///
    /// let mut timer = widget::attach(MemoryContainer::standard("plank")).unwrap();
    ///
    /// let start: Msg = Box::new(ControlMsg { id: timer.id(), control: Control::Start });
    /// assert!(timer.update(&start).is_some());
    /// assert!(timer.running());
    ///
    /// let elsewhere: Msg = Box::new(ControlMsg { id: timer.id() + 1, control: Control::Stop });
    /// assert!(timer.update(&elsewhere).is_none());
    /// assert!(timer.running());
    /// ```
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(control_msg) = msg.downcast_ref::<ControlMsg>() {
            if control_msg.id != self.id {
                return None;
            }
            return match control_msg.control {
                Control::Start => self.start(),
                Control::Stop => {
                    self.stop();
                    None
                }
                Control::Reset => {
                    self.reset();
                    None
                }
            };
        }

        if let Some(tick_msg) = msg.downcast_ref::<TickMsg>() {
            if tick_msg.id != self.id || tick_msg.tag != self.tag {
                return None;
            }
            return match self.phase {
                Phase::Idle => None,
                Phase::Countdown => self.countdown_tick(),
                Phase::CountUp => self.count_up_tick(),
            };
        }

        None
    }

    /// The text currently on the display.
    pub fn view(&self) -> String {
        self.container
            .text(Role::Display)
            .unwrap_or_else(|| clock::format(self.elapsed_seconds, false))
    }

    // Countdown length requested by the container, or `None` to count up
    // straight away.
    fn countdown_length(&self) -> Option<i64> {
        if self.container.checked(Role::CountdownToggle) != Some(true) {
            return None;
        }
        let raw = self.container.value(Role::CountdownSeconds)?;
        let seconds = clock::parse_seconds_input(&raw)?;
        let seconds = seconds.min(self.config.max_countdown);
        if seconds <= 0 {
            return None;
        }
        Some(seconds)
    }

    fn begin_countdown(&mut self, seconds: i64) -> Cmd {
        self.tag += 1;
        self.phase = Phase::Countdown;
        self.countdown_remaining = seconds;
        self.container.set_value(Role::SecondsField, "0");
        self.show_countdown();
        self.tick()
    }

    fn begin_count_up(&mut self) -> Cmd {
        self.tag += 1;
        self.phase = Phase::CountUp;
        self.show_elapsed();
        self.tick()
    }

    fn countdown_tick(&mut self) -> Option<Cmd> {
        self.countdown_remaining -= 1;
        self.show_countdown();
        if self.countdown_remaining > 0 {
            return Some(self.tick());
        }
        self.cancel();
        self.elapsed_seconds = 0;
        Some(self.begin_count_up())
    }

    fn count_up_tick(&mut self) -> Option<Cmd> {
        self.elapsed_seconds += 1;
        self.show_elapsed();
        Some(self.tick())
    }

    fn show_countdown(&mut self) {
        let remaining = self.countdown_remaining.max(0) as u64;
        self.container
            .set_text(Role::Display, &clock::format(remaining, true));
        if let Ok(second) = u32::try_from(self.countdown_remaining) {
            self.announce(second);
        }
    }

    fn show_elapsed(&mut self) {
        self.container
            .set_text(Role::Display, &clock::format(self.elapsed_seconds, false));
        self.container
            .set_value(Role::SecondsField, &self.elapsed_seconds.to_string());
    }

    fn announce(&self, second: u32) {
        if let Some(bank) = self.voice.clone().or_else(voice::global) {
            bank.play_for(second);
        }
    }

    fn cancel(&mut self) {
        self.tag += 1;
        self.phase = Phase::Idle;
    }

    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.config.interval, move |_| {
            Box::new(TickMsg { id, tag }) as Msg
        })
    }
}

impl BubbleTeaModel for Model<MemoryContainer> {
    fn init() -> (Self, Option<Cmd>) {
        (bind(MemoryContainer::standard("timer"), Config::default()), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        Model::update(self, &msg)
    }

    fn view(&self) -> String {
        Model::view(self)
    }
}
