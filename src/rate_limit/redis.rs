use chrono::{Duration, DurationRound, Utc};
use redis::Commands;

use super::{RateLimitError, RateLimiter};

/// A rate limiter that uses Redis as a backing store.
pub struct RedisRateLimiter {
    client: redis::Client,
}

impl RedisRateLimiter {
    /// Create a new rate limiter.
    ///
    /// # Arguments
    ///
    /// * `connection_uri` - The connection string used to connect to Redis.
    pub fn new(connection_uri: &str) -> anyhow::Result<Self> {
        Ok(Self {
            client: redis::Client::open(connection_uri)?,
        })
    }
}

impl RateLimiter for RedisRateLimiter {
    fn record_operation(&self, key: &str, max_req_per_min: u64) -> Result<(), RateLimitError> {
        // Fixed-window counting as suggested by the Redis documentation:
        // https://redis.com/redis-best-practices/basic-rate-limiting/

        let mut conn = self.client.get_connection().map_err(anyhow::Error::from)?;

        // Counter keys are scoped to the current minute. By the time the same
        // minute label comes around again, the previous counter has been
        // expired for almost an hour.
        let now = Utc::now();
        let window_key = format!("{}:{}", key, now.format("%M"));

        let hits: Option<u64> = conn.get(&window_key).map_err(anyhow::Error::from)?;
        if let Some(hit_count) = hits {
            if hit_count >= max_req_per_min {
                // The window is exhausted. Report when the next window opens.
                let reset = (now + Duration::minutes(1))
                    .duration_trunc(Duration::minutes(1))
                    .map_err(anyhow::Error::from)?;

                return Err(RateLimitError::LimitedUntil(reset));
            }
        }

        redis::pipe()
            .atomic()
            .cmd("INCR")
            .arg(&window_key)
            .ignore()
            .cmd("EXPIRE")
            .arg(&window_key)
            .arg(59)
            .ignore()
            .query::<()>(&mut conn)
            .map_err(anyhow::Error::from)?;

        Ok(())
    }
}
