//! Core of the fireside countdown timer.
//!
//! [`TimerController`] owns the countdown and turns user actions and
//! scheduler callbacks into [`Command`]s. It never touches the page itself,
//! so the whole state machine runs (and is tested) without a browser.

use log::{debug, error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

pub mod config;
pub mod preferences;
pub mod scene;
pub mod visuals;

use config::{MAX_MINUTES, MAX_SECONDS, SET_A_TIME_MESSAGE, TIME_IS_UP_MESSAGE};
use visuals::{reference_duration, CreatureAnimation, VisualPresenter, VisualUpdate};

// Leading integer, the way a lenient numeric field reads "12abc" as 12.
static LEADING_INT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").unwrap());

/// Format a number of seconds as `HH:MM:SS`. Hours grow past 99 freely.
pub fn format_time(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Read the leading integer of a field. Blank or non-numeric text reads as 0;
/// a digit run that does not fit an `i64` is rejected.
pub fn parse_time_field(field: TimeField, text: &str) -> Result<i64, TimeInputError> {
    let Some(captures) = LEADING_INT_REGEX.captures(text) else {
        return Ok(0);
    };
    let digits = &captures[1];
    digits
        .parse::<i64>()
        .map_err(|_| TimeInputError::TooLarge(field, digits.to_string()))
}

/// One of the three numeric input fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeField {
    Hours,
    Minutes,
    Seconds,
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeField::Hours => write!(f, "hours"),
            TimeField::Minutes => write!(f, "minutes"),
            TimeField::Seconds => write!(f, "seconds"),
        }
    }
}

/// Reasons a set of time inputs cannot be turned into a duration.
#[derive(Debug, PartialEq, Eq)]
pub enum TimeInputError {
    Negative(TimeField, i64),
    OutOfRange(TimeField, i64),
    TooLarge(TimeField, String),
}

impl fmt::Display for TimeInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeInputError::Negative(field, v) => {
                write!(f, "Invalid time: {} cannot be negative ({})", field, v)
            }
            TimeInputError::OutOfRange(field, v) => {
                write!(f, "Invalid time: {} must be between 0-59 ({})", field, v)
            }
            TimeInputError::TooLarge(field, v) => {
                write!(f, "Invalid time: {} value {} is too large", field, v)
            }
        }
    }
}

impl std::error::Error for TimeInputError {}

/// Check the numeric parts of a duration and combine them into seconds.
pub fn validate_time(hours: i64, minutes: i64, seconds: i64) -> Result<u64, TimeInputError> {
    let parts = [
        (TimeField::Hours, hours, None),
        (TimeField::Minutes, minutes, Some(MAX_MINUTES)),
        (TimeField::Seconds, seconds, Some(MAX_SECONDS)),
    ];
    for (field, value, max) in parts {
        if value < 0 {
            return Err(TimeInputError::Negative(field, value));
        }
        if let Some(max) = max {
            if value > max {
                return Err(TimeInputError::OutOfRange(field, value));
            }
        }
    }
    (hours as u64)
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minutes as u64 * 60 + seconds as u64))
        .ok_or_else(|| TimeInputError::TooLarge(TimeField::Hours, hours.to_string()))
}

/// Raw text of the three numeric fields plus their enabled flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeInputs {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    pub enabled: bool,
}

impl Default for TimeInputs {
    fn default() -> Self {
        Self {
            hours: "0".to_string(),
            minutes: "0".to_string(),
            seconds: "0".to_string(),
            enabled: true,
        }
    }
}

impl TimeInputs {
    pub fn get(&self, field: TimeField) -> &str {
        match field {
            TimeField::Hours => &self.hours,
            TimeField::Minutes => &self.minutes,
            TimeField::Seconds => &self.seconds,
        }
    }

    pub fn set(&mut self, field: TimeField, text: String) {
        match field {
            TimeField::Hours => self.hours = text,
            TimeField::Minutes => self.minutes = text,
            TimeField::Seconds => self.seconds = text,
        }
    }

    /// Total duration in seconds. Invalid input is logged and reads as 0.
    pub fn total_seconds(&self) -> u64 {
        self.try_total_seconds().unwrap_or_else(|e| {
            error!("{}", e);
            0
        })
    }

    fn try_total_seconds(&self) -> Result<u64, TimeInputError> {
        let hours = parse_time_field(TimeField::Hours, &self.hours)?;
        let minutes = parse_time_field(TimeField::Minutes, &self.minutes)?;
        let seconds = parse_time_field(TimeField::Seconds, &self.seconds)?;
        validate_time(hours, minutes, seconds)
    }
}

/// Which of the three buttons are disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlStates {
    pub start_disabled: bool,
    pub pause_disabled: bool,
    pub reset_disabled: bool,
}

/// Everything the controller knows about the countdown.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimerState {
    pub remaining_seconds: u64,
    /// Duration captured at the last fresh start; 0 after a reset.
    pub initial_duration_seconds: u64,
    pub running: bool,
    pub paused: bool,
    /// A "Set a Time!" revert is scheduled and has not fired yet.
    pub revert_pending: bool,
}

impl TimerState {
    pub fn controls(&self) -> ControlStates {
        ControlStates {
            start_disabled: self.running,
            pause_disabled: !self.running || self.paused,
            reset_disabled: self.running && self.remaining_seconds > 0,
        }
    }
}

/// Inputs to the controller: user actions and scheduler callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    Start,
    Pause,
    Reset,
    Tick,
    RevertInvalidInput,
    InputChanged(TimeField, String),
}

/// Side effects the host must carry out, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetDisplay(String),
    SetInputs {
        hours: String,
        minutes: String,
        seconds: String,
    },
    SetInputsEnabled(bool),
    SetControls(ControlStates),
    SetFireOpacity(f64),
    SetCreature(CreatureAnimation),
    /// Cancel any installed ticker and install a fresh one-second ticker.
    StartTicker,
    StopTicker,
    ScheduleRevert,
    CancelRevert,
    PlayChime,
    /// Pause the chime and rewind it to the start.
    StopChime,
}

/// Drives the countdown. Every transition returns the commands the host
/// needs to run to bring the page in line with the new state.
#[derive(Debug, Clone, Default)]
pub struct TimerController {
    state: TimerState,
    inputs: TimeInputs,
    presenter: VisualPresenter,
}

impl TimerController {
    /// Build a controller in its reset state, along with the commands that
    /// draw that state.
    pub fn new() -> (Self, Vec<Command>) {
        let mut controller = Self::default();
        let commands = controller.handle(TimerEvent::Reset);
        (controller, commands)
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn inputs(&self) -> &TimeInputs {
        &self.inputs
    }

    pub fn creature(&self) -> CreatureAnimation {
        self.presenter.creature()
    }

    pub fn handle(&mut self, event: TimerEvent) -> Vec<Command> {
        debug!("event: {:?}", event);
        let mut commands = match event {
            TimerEvent::Start => self.start(),
            TimerEvent::Pause => self.pause(),
            TimerEvent::Reset => self.reset(),
            TimerEvent::Tick => self.tick(),
            TimerEvent::RevertInvalidInput => self.revert_invalid_input(),
            TimerEvent::InputChanged(field, text) => {
                self.inputs.set(field, text);
                Vec::new()
            }
        };
        if !commands.is_empty() {
            commands.push(Command::SetControls(self.state.controls()));
        }
        commands
    }

    fn start(&mut self) -> Vec<Command> {
        if self.state.running && !self.state.paused {
            return Vec::new();
        }

        let mut commands = self.cancel_pending_revert();

        if !self.state.paused {
            let total = self.inputs.total_seconds();
            if total == 0 {
                info!("Start requested without a duration");
                self.state.revert_pending = true;
                commands.push(Command::SetDisplay(SET_A_TIME_MESSAGE.to_string()));
                commands.push(Command::ScheduleRevert);
                return commands;
            }
            self.state.remaining_seconds = total;
            self.state.initial_duration_seconds = total;
            info!("Starting countdown of {}", format_time(total));
        } else {
            info!(
                "Resuming countdown at {}",
                format_time(self.state.remaining_seconds)
            );
        }

        self.state.running = true;
        self.state.paused = false;
        commands.push(self.set_inputs_enabled(false));
        if let Some(animation) = self.presenter.set_creature(CreatureAnimation::Walking) {
            commands.push(Command::SetCreature(animation));
        }
        commands.push(Command::StartTicker);
        commands
    }

    fn tick(&mut self) -> Vec<Command> {
        if !self.state.running {
            debug!("Ignoring tick while stopped");
            return Vec::new();
        }

        if self.state.remaining_seconds == 0 {
            info!("Countdown complete");
            self.state.running = false;
            let mut commands = vec![
                Command::StopTicker,
                Command::PlayChime,
                Command::SetDisplay(TIME_IS_UP_MESSAGE.to_string()),
                self.set_inputs_enabled(true),
            ];
            let update = self.presenter.completion();
            push_visuals(&mut commands, update);
            return commands;
        }

        self.state.remaining_seconds -= 1;
        let reference = reference_duration(
            self.state.initial_duration_seconds,
            self.inputs.total_seconds(),
        );
        let update = self.presenter.progress(self.state.remaining_seconds, reference);

        let mut commands = vec![Command::SetDisplay(format_time(self.state.remaining_seconds))];
        push_visuals(&mut commands, update);
        commands
    }

    fn pause(&mut self) -> Vec<Command> {
        if !self.state.running {
            return Vec::new();
        }
        info!("Paused at {}", format_time(self.state.remaining_seconds));

        let mut commands = self.cancel_pending_revert();
        self.state.paused = true;
        self.state.running = false;
        commands.push(Command::StopTicker);
        commands.push(self.set_inputs_enabled(true));
        if let Some(animation) = self.presenter.set_creature(CreatureAnimation::Idle) {
            commands.push(Command::SetCreature(animation));
        }
        commands
    }

    fn reset(&mut self) -> Vec<Command> {
        info!("Resetting timer");
        let mut commands = self.cancel_pending_revert();
        commands.push(Command::StopTicker);
        self.state.running = false;
        self.state.paused = false;

        for field in [TimeField::Hours, TimeField::Minutes, TimeField::Seconds] {
            self.inputs.set(field, "0".to_string());
        }
        commands.push(Command::SetInputs {
            hours: self.inputs.hours.clone(),
            minutes: self.inputs.minutes.clone(),
            seconds: self.inputs.seconds.clone(),
        });

        self.state.remaining_seconds = self.inputs.total_seconds();
        commands.push(Command::SetDisplay(format_time(self.state.remaining_seconds)));
        commands.push(self.set_inputs_enabled(true));
        let update = self.presenter.reset();
        push_visuals(&mut commands, update);
        self.state.initial_duration_seconds = 0;
        commands.push(Command::StopChime);
        commands
    }

    /// The delayed revert after "Set a Time!": restore the clock, then reset.
    fn revert_invalid_input(&mut self) -> Vec<Command> {
        if !self.state.revert_pending {
            debug!("Ignoring stale input revert");
            return Vec::new();
        }
        self.state.revert_pending = false;
        let mut commands = vec![Command::SetDisplay(format_time(self.state.remaining_seconds))];
        commands.extend(self.reset());
        commands
    }

    fn cancel_pending_revert(&mut self) -> Vec<Command> {
        if self.state.revert_pending {
            self.state.revert_pending = false;
            vec![Command::CancelRevert]
        } else {
            Vec::new()
        }
    }

    fn set_inputs_enabled(&mut self, enabled: bool) -> Command {
        self.inputs.enabled = enabled;
        Command::SetInputsEnabled(enabled)
    }
}

fn push_visuals(commands: &mut Vec<Command>, update: VisualUpdate) {
    if let Some(opacity) = update.fire_opacity {
        commands.push(Command::SetFireOpacity(opacity));
    }
    if let Some(animation) = update.creature {
        commands.push(Command::SetCreature(animation));
    }
}
