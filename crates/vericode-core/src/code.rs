//! Code generation and dual-window validation

use crate::{
    constant_time_eq, derive, extract, Charset, Clock, GenerationParams, SecretKey, SystemClock,
    TimeBucket, VericodeError, VericodeResult, WindowState,
};

/// Code for one explicit bucket. Parameters must already be checked.
fn code_for_bucket(
    user_id: &str,
    bucket: TimeBucket,
    secret: &SecretKey,
    charset: &Charset,
    params: &GenerationParams,
) -> String {
    let derivation = derive(user_id, bucket, secret, params.counter);
    extract(&derivation, charset, params.length)
}

fn check_inputs(user_id: &str, params: &GenerationParams) -> VericodeResult<Charset> {
    let charset = params.check()?;
    if user_id.is_empty() {
        return Err(VericodeError::EmptyIdentifier);
    }
    Ok(charset)
}

/// Generate the code for `user_id` at `unix_seconds`
pub fn generate_at(
    user_id: &str,
    secret: &SecretKey,
    params: &GenerationParams,
    unix_seconds: i64,
) -> VericodeResult<String> {
    let charset = check_inputs(user_id, params)?;
    let bucket = TimeBucket::at(unix_seconds, params.period)?;

    tracing::debug!(user_id, bucket = bucket.value(), "generating code");
    Ok(code_for_bucket(user_id, bucket, secret, &charset, params))
}

/// Generate the code for `user_id` at the current system time
pub fn generate(
    user_id: &str,
    secret: &SecretKey,
    params: &GenerationParams,
) -> VericodeResult<String> {
    generate_at(user_id, secret, params, SystemClock.unix_seconds())
}

/// Check `code` against the current and the previous window at `unix_seconds`.
///
/// Both candidates are always computed and compared in constant time; a
/// mismatch is `Ok(false)`, only configuration problems are errors.
pub fn validate_at(
    code: &str,
    user_id: &str,
    secret: &SecretKey,
    params: &GenerationParams,
    unix_seconds: i64,
) -> VericodeResult<bool> {
    let charset = check_inputs(user_id, params)?;
    if code.is_empty() {
        return Ok(false);
    }

    let live = TimeBucket::at(unix_seconds, params.period)?;
    let current = code_for_bucket(user_id, live, secret, &charset, params);
    let current_ok = constant_time_eq(code.as_bytes(), current.as_bytes());

    let previous_ok = match live.previous() {
        Some(prev) => {
            let previous = code_for_bucket(user_id, prev, secret, &charset, params);
            constant_time_eq(code.as_bytes(), previous.as_bytes())
        }
        None => false,
    };

    let valid = current_ok | previous_ok;
    tracing::debug!(user_id, bucket = live.value(), valid, "code validated");
    Ok(valid)
}

/// Check `code` at the current system time
pub fn validate(
    code: &str,
    user_id: &str,
    secret: &SecretKey,
    params: &GenerationParams,
) -> VericodeResult<bool> {
    validate_at(code, user_id, secret, params, SystemClock.unix_seconds())
}

/// Secret and clock bundled for front-ends that issue many calls
#[derive(Debug)]
pub struct Vericode<C: Clock = SystemClock> {
    secret: SecretKey,
    clock: C,
}

impl Vericode<SystemClock> {
    pub fn new(secret: SecretKey) -> Self {
        Vericode {
            secret,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> Vericode<C> {
    pub fn with_clock(secret: SecretKey, clock: C) -> Self {
        Vericode { secret, clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn generate(&self, user_id: &str, params: &GenerationParams) -> VericodeResult<String> {
        generate_at(user_id, &self.secret, params, self.clock.unix_seconds())
    }

    pub fn validate(
        &self,
        code: &str,
        user_id: &str,
        params: &GenerationParams,
    ) -> VericodeResult<bool> {
        validate_at(code, user_id, &self.secret, params, self.clock.unix_seconds())
    }

    /// Where a code issued at `issued_at` sits in its lifecycle right now
    pub fn window_state(
        &self,
        issued_at: i64,
        params: &GenerationParams,
    ) -> VericodeResult<WindowState> {
        let issued = TimeBucket::at(issued_at, params.period)?;
        let live = TimeBucket::now(&self.clock, params.period)?;
        Ok(WindowState::classify(issued, live))
    }
}
