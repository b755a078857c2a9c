//! Generation parameters

use crate::{CharClasses, Charset, VericodeError, VericodeResult};

/// Default validity period in seconds
pub const DEFAULT_PERIOD: u64 = 300;

/// Default code length
pub const DEFAULT_LENGTH: usize = 6;

/// Longest code accepted. Past 86 symbols the digest is exhausted, so
/// this only bounds the work a single request can ask for.
pub const MAX_LENGTH: usize = 1024;

/// Parameters shared by generation and validation.
/// Validation only succeeds when these match the generating call exactly,
/// counter included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GenerationParams {
    /// Window width in seconds (>= 1)
    pub period: u64,
    /// Symbols per code (1..=MAX_LENGTH)
    pub length: usize,
    /// Character classes making up the alphabet (at least one)
    pub classes: CharClasses,
    /// Optional nonce for several distinct codes within one window
    pub counter: Option<u64>,
}

impl GenerationParams {
    pub fn new() -> Self {
        GenerationParams {
            period: DEFAULT_PERIOD,
            length: DEFAULT_LENGTH,
            classes: CharClasses::DIGITS,
            counter: None,
        }
    }

    pub fn with_period(mut self, period: u64) -> Self {
        self.period = period;
        self
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    pub fn with_classes(mut self, classes: CharClasses) -> Self {
        self.classes = classes;
        self
    }

    pub fn with_digits(mut self, on: bool) -> Self {
        self.classes.digits = on;
        self
    }

    pub fn with_uppercase(mut self, on: bool) -> Self {
        self.classes.uppercase = on;
        self
    }

    pub fn with_lowercase(mut self, on: bool) -> Self {
        self.classes.lowercase = on;
        self
    }

    pub fn with_counter(mut self, counter: Option<u64>) -> Self {
        self.counter = counter;
        self
    }

    /// Validate every parameter and build the alphabet.
    /// Runs before any hashing so misconfiguration fails fast.
    pub fn check(&self) -> VericodeResult<Charset> {
        if self.period == 0 {
            return Err(VericodeError::InvalidPeriod(self.period));
        }
        if self.length == 0 || self.length > MAX_LENGTH {
            return Err(VericodeError::InvalidLength(self.length));
        }
        Charset::build(self.classes)
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::new()
    }
}
