//! # Configuration
//!
//! The fixed constants the editor core needs. There is no persistent,
//! user-editable configuration file: every value below is a constant.

use std::time::Duration;

/// The number of columns a TAB advances to the next multiple of.
pub(crate) const TAB_STOP: usize = 8;

/// The global tersed configuration.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// The size of a tab. Must be > 0.
    pub(crate) tab_stop: usize,
    /// The number of consecutive `Ctrl+Q` presses required to quit with
    /// unsaved changes: the first `quit_times - 1` presses are warnings, the
    /// last one exits.
    pub(crate) quit_times: usize,
    /// The duration for which status messages are shown in the message bar.
    pub(crate) message_duration: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self { tab_stop: TAB_STOP, quit_times: 4, message_duration: Duration::from_secs(5) }
    }
}

impl Config {
    /// Return the fixed editor configuration.
    #[must_use]
    pub fn load() -> Self { Self::default() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_spec_constants() {
        let config = Config::default();
        assert_eq!(config.tab_stop, 8, "TAB_STOP is fixed at 8 columns");
        assert_eq!(config.quit_times, 4, "fourth consecutive Ctrl+Q exits");
        assert_eq!(config.message_duration, Duration::from_secs(5));
    }
}
