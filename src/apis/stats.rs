/// Per-client request statistics
use serde::Serialize;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ApiStats {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub cache_hits: u64,
    pub average_response_time_ms: f64,
    pub last_error: Option<String>,
}

impl ApiStats {
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.successful_requests as f64 / self.total_requests as f64 * 100.0
        }
    }
}

/// Shared, async-safe stats accumulator owned by each API client
#[derive(Debug, Default)]
pub struct ApiStatsTracker {
    inner: RwLock<ApiStats>,
}

impl ApiStatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed request and fold its latency into the running average
    pub async fn record_request(&self, success: bool, elapsed_ms: f64) {
        let mut stats = self.inner.write().await;
        stats.total_requests += 1;
        if success {
            stats.successful_requests += 1;
        } else {
            stats.failed_requests += 1;
        }
        let n = stats.total_requests as f64;
        stats.average_response_time_ms += (elapsed_ms - stats.average_response_time_ms) / n;
    }

    pub async fn record_error(&self, message: impl Into<String>) {
        self.inner.write().await.last_error = Some(message.into());
    }

    pub async fn record_cache_hit(&self) {
        self.inner.write().await.cache_hits += 1;
    }

    pub async fn get_stats(&self) -> ApiStats {
        self.inner.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_running_average_and_counts() {
        let tracker = ApiStatsTracker::new();
        tracker.record_request(true, 100.0).await;
        tracker.record_request(false, 300.0).await;
        tracker.record_error("HTTP 500").await;
        tracker.record_cache_hit().await;

        let stats = tracker.get_stats().await;
        assert_eq!(stats.total_requests, 2);
        assert_eq!(stats.successful_requests, 1);
        assert_eq!(stats.failed_requests, 1);
        assert_eq!(stats.cache_hits, 1);
        assert!((stats.average_response_time_ms - 200.0).abs() < f64::EPSILON);
        assert_eq!(stats.last_error.as_deref(), Some("HTTP 500"));
        assert!((stats.success_rate() - 50.0).abs() < f64::EPSILON);
    }
}
