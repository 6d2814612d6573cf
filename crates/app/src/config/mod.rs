//! Application configuration module

use clap::Args;

use crate::config::{logging::LoggingConfig, storage::StorageConfig};

pub mod logging;
pub mod storage;

pub use logging::LogFormat;

/// Frutos application configuration
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Data directory settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        config: AppConfig,
    }

    #[test]
    fn explicit_arguments_are_parsed() -> TestResult {
        let cli = TestCli::try_parse_from([
            "frutos-app",
            "--data-dir",
            "/srv/frutos",
            "--log-level",
            "debug",
            "--log-format",
            "json",
        ])?;

        assert_eq!(cli.config.storage.data_dir, Path::new("/srv/frutos"));
        assert_eq!(
            cli.config.storage.products_path(),
            Path::new("/srv/frutos/products.json")
        );
        assert_eq!(cli.config.storage.carts_dir(), Path::new("/srv/frutos/carts"));
        assert_eq!(cli.config.logging.log_level, "debug");
        assert_eq!(cli.config.logging.log_format, LogFormat::Json);

        Ok(())
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let result = TestCli::try_parse_from(["frutos-app", "--log-format", "xml"]);

        assert!(result.is_err());
    }
}
