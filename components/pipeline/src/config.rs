//! Pipeline configuration.

use std::time::Duration;

/// Default delay before the transform runs and the outcome settles.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(2000);

/// Default delay between settlement and the `Waiting` line.
pub const DEFAULT_LOG_DELAY: Duration = Duration::from_millis(2000);

/// Delays used by [`DelayedPipeline`](crate::DelayedPipeline) and
/// [`DirectoryLookup`](crate::DirectoryLookup).
///
/// # Example
/// ```
/// use pipeline::PipelineConfig;
/// use std::time::Duration;
///
/// let config = PipelineConfig::default().with_settle_delay(Duration::from_millis(10));
/// assert_eq!(config.settle_delay, Duration::from_millis(10));
/// assert_eq!(config.log_delay, Duration::from_millis(2000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Wait before transforming and settling
    pub settle_delay: Duration,
    /// Wait after settling before logging `Waiting`
    pub log_delay: Duration,
}

impl PipelineConfig {
    /// Set the settle delay
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Set the log delay
    pub fn with_log_delay(mut self, delay: Duration) -> Self {
        self.log_delay = delay;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
            log_delay: DEFAULT_LOG_DELAY,
        }
    }
}
