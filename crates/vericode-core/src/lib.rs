//! Vericode Core - Stateless time-bucketed verification codes
//!
//! Codes are derived from a user identifier, a shared secret and the current
//! time window, so a verifier can check a submitted code without storing
//! anything:
//! - Charset assembly (digits, uppercase, lowercase, in that order)
//! - Time bucketing with an injectable clock
//! - SHA-256 keyed derivation into a 256-bit integer
//! - Modulo/shift extraction of charset symbols
//! - Dual-window (current + previous) constant-time validation
//!
//! Every operation is a pure function of its inputs and is safe to call
//! concurrently without coordination.

pub mod charset;
pub mod code;
pub mod compare;
pub mod derive;
pub mod error;
pub mod extract;
pub mod params;
pub mod secret;
pub mod window;

pub use charset::*;
pub use code::*;
pub use compare::*;
pub use derive::*;
pub use error::*;
pub use extract::*;
pub use params::*;
pub use secret::*;
pub use window::*;
