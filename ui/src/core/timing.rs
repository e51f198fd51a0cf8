//! Timer utilities: a platform sleep and the bounded readiness wait used
//! while third-party libraries finish loading.

/// How often and how many times a readiness probe runs before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval_ms: u64,
    pub max_attempts: u32,
}

impl PollPolicy {
    pub const DEFAULT_INTERVAL_MS: u64 = 100;
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 50;

    pub fn new(interval_ms: u64, max_attempts: u32) -> Self {
        Self {
            interval_ms,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Upper bound on the time spent waiting, in milliseconds.
    pub fn budget_ms(&self) -> u64 {
        self.interval_ms
            .saturating_mul(u64::from(self.max_attempts.saturating_sub(1)))
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL_MS, Self::DEFAULT_MAX_ATTEMPTS)
    }
}

/// The probe never reported ready within the policy's attempt ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("gave up after {attempts} attempts")]
pub struct PollTimeout {
    pub attempts: u32,
}

/// Run `probe` until it returns true or the attempt ceiling is reached.
///
/// The probe receives the 1-based attempt number and runs once immediately,
/// then once per `interval_ms`. Returns the attempt that succeeded.
pub async fn poll_until<F>(policy: PollPolicy, mut probe: F) -> Result<u32, PollTimeout>
where
    F: FnMut(u32) -> bool,
{
    let max_attempts = policy.max_attempts.max(1);
    for attempt in 1..=max_attempts {
        if probe(attempt) {
            return Ok(attempt);
        }
        if attempt < max_attempts {
            sleep_ms(policy.interval_ms).await;
        }
    }
    tracing::debug!(attempts = max_attempts, "readiness probe exhausted");
    Err(PollTimeout {
        attempts: max_attempts,
    })
}

#[cfg(target_arch = "wasm32")]
pub async fn sleep_ms(ms: u64) {
    let clamped = ms.min(u64::from(u32::MAX)) as u32;
    gloo_timers::future::TimeoutFuture::new(clamped).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}
