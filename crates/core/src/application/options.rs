// Service options (No magic values)

use std::str::FromStr;
use std::time::Duration;

/// Default upper bound for a single publish call (2s)
pub const DEFAULT_PUBLISH_TIMEOUT: Duration = Duration::from_secs(2);

/// Default upper bound for a single repository call (5s)
pub const DEFAULT_REPOSITORY_TIMEOUT: Duration = Duration::from_secs(5);

/// How the services hand events to the publisher
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PublishMode {
    /// Awaited on the request path, failure captured and discarded
    #[default]
    Inline,
    /// Spawned onto the runtime, never awaited by the request path
    Detached,
}

impl FromStr for PublishMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inline" => Ok(PublishMode::Inline),
            "detached" => Ok(PublishMode::Detached),
            other => Err(format!(
                "unknown publish mode '{}', expected inline or detached",
                other
            )),
        }
    }
}

/// Tunables shared by the project and task services
#[derive(Debug, Clone, Copy)]
pub struct ServiceOptions {
    /// Bound for each repository call; `None` waits indefinitely
    pub repository_timeout: Option<Duration>,
    pub publish_timeout: Duration,
    pub publish_mode: PublishMode,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            repository_timeout: Some(DEFAULT_REPOSITORY_TIMEOUT),
            publish_timeout: DEFAULT_PUBLISH_TIMEOUT,
            publish_mode: PublishMode::Inline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_mode_parse() {
        assert_eq!("inline".parse::<PublishMode>().unwrap(), PublishMode::Inline);
        assert_eq!("Detached".parse::<PublishMode>().unwrap(), PublishMode::Detached);
        assert!("async".parse::<PublishMode>().is_err());
    }
}
