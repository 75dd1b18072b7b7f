use log::LevelFilter;

/// Logging settings for the whole session, passed by value into each round.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Settings {
    base_level: LevelFilter,
    debug: bool,
}

impl Settings {
    pub(crate) fn new(base_level: LevelFilter, debug: bool) -> Self {
        Self { base_level, debug }
    }

    pub(crate) fn is_debug(&self) -> bool {
        self.debug
    }

    /// Never quieter than the level picked on the command line.
    pub(crate) fn level(&self) -> LevelFilter {
        if self.debug {
            self.base_level.max(LevelFilter::Debug)
        } else {
            self.base_level
        }
    }

    pub(crate) fn toggled_debug(self) -> Self {
        Self {
            debug: !self.debug,
            ..self
        }
    }

    pub(crate) fn apply(&self) {
        log::set_max_level(self.level());
        log::debug!("Log level set to {}", self.level());
    }

    pub(crate) fn toggle_message(&self) -> &'static str {
        if self.is_debug() {
            "DEBUG logging turned on."
        } else {
            "DEBUG logging turned off."
        }
    }
}
