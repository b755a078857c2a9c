//! Symbol alphabet assembly from character classes

use crate::{VericodeError, VericodeResult};

const DIGITS: &[u8] = b"0123456789";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Character class selectors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CharClasses {
    pub digits: bool,
    pub uppercase: bool,
    pub lowercase: bool,
}

impl CharClasses {
    pub const DIGITS: CharClasses = CharClasses {
        digits: true,
        uppercase: false,
        lowercase: false,
    };

    pub const ALPHANUMERIC: CharClasses = CharClasses {
        digits: true,
        uppercase: true,
        lowercase: true,
    };

    pub fn new(digits: bool, uppercase: bool, lowercase: bool) -> Self {
        CharClasses {
            digits,
            uppercase,
            lowercase,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.digits || self.uppercase || self.lowercase)
    }
}

impl Default for CharClasses {
    fn default() -> Self {
        Self::DIGITS
    }
}

/// Ordered alphabet: digits, then uppercase, then lowercase.
/// INVARIANT: never empty, and the order is identical for generation and
/// validation since it fixes which symbol each extracted index maps to.
#[derive(Clone, PartialEq, Eq)]
pub struct Charset {
    symbols: Vec<u8>,
}

impl Charset {
    /// Build the alphabet from the selected classes
    pub fn build(classes: CharClasses) -> VericodeResult<Self> {
        if classes.is_empty() {
            return Err(VericodeError::EmptyCharset);
        }

        let mut symbols = Vec::with_capacity(DIGITS.len() + UPPERCASE.len() + LOWERCASE.len());
        if classes.digits {
            symbols.extend_from_slice(DIGITS);
        }
        if classes.uppercase {
            symbols.extend_from_slice(UPPERCASE);
        }
        if classes.lowercase {
            symbols.extend_from_slice(LOWERCASE);
        }

        Ok(Charset { symbols })
    }

    /// Number of symbols (always >= 1)
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol at `index`, if in range
    #[inline]
    pub fn symbol(&self, index: usize) -> Option<char> {
        self.symbols.get(index).map(|&b| b as char)
    }

    /// Check if `c` belongs to this alphabet
    pub fn contains(&self, c: char) -> bool {
        c.is_ascii() && self.symbols.contains(&(c as u8))
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII is ever pushed.
        std::str::from_utf8(&self.symbols).unwrap_or_default()
    }
}

impl std::fmt::Debug for Charset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Charset({:?})", self.as_str())
    }
}
