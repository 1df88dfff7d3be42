use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, instrument};

/// Requests per second PubChem's usage policy allows
pub const PUBCHEM_RATE_LIMIT: f64 = 5.0;

/// Token bucket rate limiter shared by clones of a single client
///
/// PubChem asks callers to stay under 5 requests per second and blocks
/// clients that sustain more. RCSB publishes no hard limit but the same
/// limiter can be used to pace bulk lookups.
#[derive(Clone)]
pub struct RateLimiter {
    bucket: Arc<Mutex<TokenBucket>>,
}

struct TokenBucket {
    tokens: f64,
    capacity: f64,
    refill_rate: f64, // tokens per second
    last_refill: Instant,
}

impl RateLimiter {
    /// Create a rate limiter allowing `rate` requests per second
    ///
    /// # Example
    ///
    /// ```
    /// use affinity_data_client::rate_limit::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(2.0);
    /// ```
    pub fn new(rate: f64) -> Self {
        let capacity = rate.max(1.0);
        Self {
            bucket: Arc::new(Mutex::new(TokenBucket {
                tokens: capacity,
                capacity,
                refill_rate: rate,
                last_refill: Instant::now(),
            })),
        }
    }

    /// Wait until a token is available and consume it
    ///
    /// Fails with `RateLimitExceeded` when the rate is not a positive finite
    /// number, or when the next token is further away than a `Duration` holds.
    #[instrument(skip(self))]
    pub async fn acquire(&self) -> crate::Result<()> {
        let rate = self.rate().await;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(crate::ClientError::RateLimitExceeded);
        }

        loop {
            let wait = {
                let mut bucket = self.bucket.lock().await;
                bucket.refill();

                if bucket.tokens >= 1.0 {
                    bucket.tokens -= 1.0;
                    debug!(remaining_tokens = %bucket.tokens, "Token acquired");
                    return Ok(());
                }

                let missing = 1.0 - bucket.tokens;
                Duration::try_from_secs_f64(missing / bucket.refill_rate)
                    .map_err(|_| crate::ClientError::RateLimitExceeded)?
            };

            debug!(wait_ms = wait.as_millis(), "Waiting for rate limit token");
            sleep(wait).await;
        }
    }

    /// Check if a token is available without consuming it
    pub async fn check_available(&self) -> bool {
        let mut bucket = self.bucket.lock().await;
        bucket.refill();
        bucket.tokens >= 1.0
    }

    /// Current token count
    pub async fn token_count(&self) -> f64 {
        let mut bucket = self.bucket.lock().await;
        bucket.refill();
        bucket.tokens
    }

    /// Configured requests per second
    pub async fn rate(&self) -> f64 {
        self.bucket.lock().await.refill_rate
    }
}

impl TokenBucket {
    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill);
        self.tokens = (self.tokens + elapsed.as_secs_f64() * self.refill_rate).min(self.capacity);
        self.last_refill = now;
    }
}
