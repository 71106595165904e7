/// Maximum accepted clock skew between producer and relay, in seconds.
pub const MAX_CLOCK_SKEW_SECONDS: u64 = 10;

// Why a replay check was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayError {
    StaleTimestamp,
    NonceNotMonotonic,
}

/// Replay-mitigation heuristic: a timestamp window plus one process-wide
/// monotonic nonce counter.
///
/// The counter is global, not per-client. Two concurrent producers can starve
/// each other; single-producer deployments are the intended use.
#[derive(Debug, Default)]
pub struct ReplayGuard {
    last_nonce: u64,
}

impl ReplayGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept and advance, or reject without mutating.
    ///
    /// Rejects when `timestamp` is more than [`MAX_CLOCK_SKEW_SECONDS`] away
    /// from `now` in either direction, or when `nonce` is not strictly
    /// greater than the last accepted nonce.
    pub fn check_and_advance(
        &mut self,
        nonce: u64,
        timestamp: u64,
        now: u64,
    ) -> Result<(), ReplayError> {
        if now.abs_diff(timestamp) > MAX_CLOCK_SKEW_SECONDS {
            return Err(ReplayError::StaleTimestamp);
        }
        if nonce <= self.last_nonce {
            return Err(ReplayError::NonceNotMonotonic);
        }
        self.last_nonce = nonce;
        Ok(())
    }
}
