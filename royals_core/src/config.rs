use std::time::Duration;

/// Pause between automated turns, long enough for a human to follow them.
pub const MOVE_DELAY: Duration = Duration::from_millis(2500);

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub move_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            move_delay: MOVE_DELAY,
        }
    }
}
