use crate::core::Correlation;

pub const DEFAULT_REMOTE: &str = "origin";

/// Settings read from the `sweep` section of git config.
///
/// ```text
/// [sweep]
///     defaultRemote = upstream
///     correlation = exact
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepConfig {
    pub default_remote: String,
    pub correlation: Correlation,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            default_remote: DEFAULT_REMOTE.to_string(),
            correlation: Correlation::default(),
        }
    }
}

impl SweepConfig {
    pub fn from_git_config(config: &git2::Config) -> Self {
        let default_remote = config
            .get_string("sweep.defaultRemote")
            .ok()
            .filter(|remote| !remote.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REMOTE.to_string());

        let correlation = match config.get_string("sweep.correlation") {
            Ok(value) => value.parse().unwrap_or_else(|e| {
                log::warn!("{}, falling back to suffix", e);
                Correlation::Suffix
            }),
            Err(_) => Correlation::default(),
        };

        Self {
            default_remote,
            correlation,
        }
    }
}
