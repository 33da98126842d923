//! Application-level configuration constants.

// Timing
pub const TICK_INTERVAL_MS: u32 = 1_000;
pub const INVALID_INPUT_REVERT_MS: u32 = 1_500;

// Display messages
pub const SET_A_TIME_MESSAGE: &str = "Set a Time!";
pub const TIME_IS_UP_MESSAGE: &str = "Time is Up!";

// Input limits
pub const MAX_MINUTES: i64 = 59;
pub const MAX_SECONDS: i64 = 59;

// Fire opacity
pub const FIRE_FULL_OPACITY: f64 = 1.0;
pub const FIRE_BASE_OPACITY: f64 = 0.3;
pub const FIRE_OPACITY_RANGE: f64 = 0.7;
pub const FIRE_EMBER_OPACITY: f64 = 0.1;
pub const FIRE_EMBER_THRESHOLD: f64 = 0.1;

// Chime preference
pub const CHIME_STORAGE_KEY: &str = "selectedChime";
pub const DEFAULT_CHIME: &str = "assets/chime.mp3";

/// Chimes offered by the selector as (asset path, label).
pub const CHIME_OPTIONS: &[(&str, &str)] = &[
    ("assets/chime.mp3", "Classic Chime"),
    ("assets/bell.mp3", "Soft Bell"),
    ("assets/crackle.mp3", "Fire Crackle"),
    ("assets/meow.mp3", "Sleepy Meow"),
];
