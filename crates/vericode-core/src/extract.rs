//! Digest-to-symbol extraction

use crate::{Charset, Derivation, SHIFT_BITS};

/// Map a derived integer onto `length` charset symbols.
///
/// Each round takes `value mod |charset|` as the symbol index and then
/// shifts the integer right by 3 bits. Past `derivation.safe_rounds()` the
/// integer is zero and every further symbol is `charset[0]`; that tail is
/// reproduced as-is so generation and validation stay in lockstep.
pub fn extract(derivation: &Derivation, charset: &Charset, length: usize) -> String {
    if length > derivation.safe_rounds() {
        tracing::debug!(
            length,
            safe_rounds = derivation.safe_rounds(),
            "code length exceeds digest entropy, tail symbols are predictable"
        );
    }

    let modulus = charset.len() as u32;
    let mut value = derivation.value;
    let mut code = String::with_capacity(length.min(derivation.safe_rounds() + 1));

    for _ in 0..length {
        let index = value.rem(modulus) as usize;
        // index < charset.len() by construction
        if let Some(symbol) = charset.symbol(index) {
            code.push(symbol);
        }
        value.shr_assign(SHIFT_BITS);
    }

    code
}
