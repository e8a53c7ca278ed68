//! Checking configuration.

/// Options threaded through every check.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CheckConfig {
    /// Treat null as an instance of every type.
    pub none_always_valid: bool,
    /// How much context a failure diagnostic carries.
    ///
    /// - 0: entity and slot
    /// - 1: plus the expected expression
    /// - 2 and above: plus the offending value and its type
    pub diagnostic_verbosity: u8,
    /// Report callables without docs and parameters without a declared type.
    pub complain_for_missing_doc: bool,
}

impl CheckConfig {
    pub const DEFAULT_VERBOSITY: u8 = 2;

    #[must_use]
    pub fn with_none_always_valid(mut self, enabled: bool) -> Self {
        self.none_always_valid = enabled;
        self
    }

    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.diagnostic_verbosity = verbosity;
        self
    }

    #[must_use]
    pub fn with_complain_for_missing_doc(mut self, enabled: bool) -> Self {
        self.complain_for_missing_doc = enabled;
        self
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        CheckConfig {
            none_always_valid: false,
            diagnostic_verbosity: Self::DEFAULT_VERBOSITY,
            complain_for_missing_doc: false,
        }
    }
}
