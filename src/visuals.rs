//! Ambient visuals driven by timer progress.
//!
//! The fireplace dims as the countdown runs out and the creature walks,
//! sits, then walks again across the three segments of the run. Everything
//! here is pure; the presenter only decides *what* to show and hands the
//! result back to the controller as values.

use crate::config::{
    FIRE_BASE_OPACITY, FIRE_EMBER_OPACITY, FIRE_EMBER_THRESHOLD, FIRE_FULL_OPACITY,
    FIRE_OPACITY_RANGE,
};
use std::fmt;

/// Animation state of the creature sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CreatureAnimation {
    #[default]
    Walking,
    Sitting,
    Idle,
}

impl CreatureAnimation {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreatureAnimation::Walking => "walking",
            CreatureAnimation::Sitting => "sitting",
            CreatureAnimation::Idle => "idle",
        }
    }

    /// CSS class applied to the creature element, e.g. `creature-sitting`.
    pub fn class_name(&self) -> String {
        format!("creature-{}", self.as_str())
    }
}

impl fmt::Display for CreatureAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the denominator for progress calculations.
///
/// Prefers the duration captured at start, then the live input total, and
/// finally 1 so that callers never divide by zero.
pub fn reference_duration(initial_duration: u64, live_input_total: u64) -> u64 {
    if initial_duration > 0 {
        initial_duration
    } else if live_input_total > 0 {
        live_input_total
    } else {
        1
    }
}

/// Fire opacity for the given remaining time.
pub fn fire_opacity(remaining: u64, reference: u64) -> f64 {
    let fraction = remaining as f64 / reference.max(1) as f64;
    if fraction > FIRE_EMBER_THRESHOLD {
        FIRE_BASE_OPACITY + FIRE_OPACITY_RANGE * fraction
    } else {
        FIRE_EMBER_OPACITY
    }
}

/// Walk-sit-walk cycle over three equal (real-valued) segments.
pub fn creature_for_progress(remaining: u64, reference: u64) -> CreatureAnimation {
    let segment = reference as f64 / 3.0;
    let elapsed = reference.saturating_sub(remaining) as f64;

    if elapsed < segment {
        CreatureAnimation::Walking
    } else if elapsed < segment * 2.0 {
        CreatureAnimation::Sitting
    } else {
        CreatureAnimation::Walking
    }
}

/// Result of a presenter update: only the parts that actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VisualUpdate {
    pub fire_opacity: Option<f64>,
    pub creature: Option<CreatureAnimation>,
}

/// Tracks the last applied creature animation so that repeated requests
/// for the same animation produce no visual change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisualPresenter {
    creature: CreatureAnimation,
}

impl VisualPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn creature(&self) -> CreatureAnimation {
        self.creature
    }

    /// Swap the creature animation. Returns the new animation only when it
    /// differs from the one currently shown.
    pub fn set_creature(&mut self, animation: CreatureAnimation) -> Option<CreatureAnimation> {
        if self.creature == animation {
            return None;
        }
        log::debug!("creature: {} -> {}", self.creature, animation);
        self.creature = animation;
        Some(animation)
    }

    /// Per-tick update while a countdown is running. Paused and finished
    /// timers never tick; the controller idles the creature for those.
    pub fn progress(&mut self, remaining: u64, reference: u64) -> VisualUpdate {
        VisualUpdate {
            fire_opacity: Some(fire_opacity(remaining, reference)),
            creature: self.set_creature(creature_for_progress(remaining, reference)),
        }
    }

    /// Dying embers and a resting creature.
    pub fn completion(&mut self) -> VisualUpdate {
        VisualUpdate {
            fire_opacity: Some(FIRE_EMBER_OPACITY),
            creature: self.set_creature(CreatureAnimation::Idle),
        }
    }

    /// Full fire and a walking creature.
    pub fn reset(&mut self) -> VisualUpdate {
        VisualUpdate {
            fire_opacity: Some(FIRE_FULL_OPACITY),
            creature: self.set_creature(CreatureAnimation::Walking),
        }
    }
}
