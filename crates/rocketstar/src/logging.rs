//! Logging configuration for rocketstar.
//!
//! Diagnostics go to stderr through `tracing`, leaving stdout to the
//! command output. Problems found in the data documents (duplicate keys,
//! ids that disagree with their key) are logged under [`DATA_TARGET`] and
//! stay visible at the default verbosity; the rest of the library only
//! speaks up with `-v`.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Target for warnings about the content of the roster and mission documents.
pub const DATA_TARGET: &str = "rocketstar::data";

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Errors, plus warnings about the data documents.
    #[default]
    Normal,
    /// Debug and above, with timestamps and targets.
    Verbose,
    /// Everything.
    Trace,
}

impl Verbosity {
    /// Map the `-v` count and `-q` flag to a verbosity. `-q` wins.
    #[must_use]
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// The most verbose level any rocketstar event is shown at.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    #[must_use]
    pub fn directives(&self) -> String {
        match self {
            Self::Quiet => "rocketstar=error".to_string(),
            Self::Normal => format!("rocketstar=error,{DATA_TARGET}=warn"),
            Self::Verbose | Self::Trace => format!("rocketstar={}", self.to_level_filter()),
        }
    }

    fn detailed(self) -> bool {
        matches!(self, Self::Verbose | Self::Trace)
    }
}

/// Initialize the logging system.
///
/// Call once at startup. `RUST_LOG` takes precedence over `verbosity`.
///
/// # Examples
///
/// ```no_run
/// use rocketstar::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::from_flags(1, false));
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directives()));

    // Short lines for everyday use, full lines once -v is given
    let detailed = verbosity.detailed().then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
    });
    let terse = (!verbosity.detailed()).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .without_time()
            .with_target(false)
    });

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(detailed)
        .with(terse);

    // Already set is fine (tests, embedding)
    let _ = subscriber.try_init();
}

/// Initialize logging for tests.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(Verbosity::Normal.directives())
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags() {
        assert_eq!(Verbosity::from_flags(0, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(1, false), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(5, false), Verbosity::Trace);
        assert_eq!(Verbosity::from_flags(2, true), Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_to_level() {
        assert_eq!(Verbosity::Quiet.to_level_filter(), Level::ERROR);
        assert_eq!(Verbosity::Normal.to_level_filter(), Level::WARN);
        assert_eq!(Verbosity::Verbose.to_level_filter(), Level::DEBUG);
        assert_eq!(Verbosity::Trace.to_level_filter(), Level::TRACE);
    }

    #[test]
    fn test_normal_directives_show_data_warnings() {
        let directives = Verbosity::Normal.directives();
        assert!(directives.contains("rocketstar::data=warn"));
        assert!(directives.starts_with("rocketstar=error"));
        assert!(EnvFilter::try_new(&directives).is_ok());
    }

    #[test]
    fn test_quiet_directives_hide_data_warnings() {
        assert_eq!(Verbosity::Quiet.directives(), "rocketstar=error");
    }

    #[test]
    fn test_verbose_directives() {
        assert_eq!(Verbosity::Verbose.directives(), "rocketstar=DEBUG");
        assert_eq!(Verbosity::Trace.directives(), "rocketstar=TRACE");
        assert!(EnvFilter::try_new(Verbosity::Trace.directives()).is_ok());
    }

    #[test]
    fn test_init_logging_with_all_verbosity_levels() {
        // Only the first call installs a subscriber
        init_logging(Verbosity::Quiet);
        init_logging(Verbosity::Normal);
        init_logging(Verbosity::Verbose);
        init_logging(Verbosity::Trace);
    }
}
