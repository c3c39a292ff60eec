use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "impeller_playground=debug,wgpu=warn"). When unset, `RUST_LOG` is used.
///
/// `write_style` controls ANSI coloring behavior.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        // Another logger may already be installed by the host test binary.
        if builder(&config).try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

/// Initializes a logger whose output is captured by the test harness.
///
/// Safe to call from every test; only the first call installs the logger.
pub fn init_test_logging() {
    let _ = builder(&LoggingConfig::default()).is_test(true).try_init();
}

fn builder(config: &LoggingConfig) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();

    if let Some(filter) = &config.env_filter {
        builder.parse_filters(filter);
    } else if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else {
        // wgpu is chatty at info level; keep its warnings only.
        builder
            .filter_level(log::LevelFilter::Info)
            .filter_module("wgpu_core", log::LevelFilter::Warn)
            .filter_module("wgpu_hal", log::LevelFilter::Warn);
    }

    builder.write_style(config.write_style);
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_filter(filter: &str) -> LoggingConfig {
        LoggingConfig {
            env_filter: Some(filter.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn explicit_filter_sets_max_level() {
        let logger = builder(&with_filter("warn")).build();
        assert_eq!(logger.filter(), log::LevelFilter::Warn);
    }

    #[test]
    fn module_directives_raise_max_level() {
        let logger = builder(&with_filter("warn,impeller_playground=debug")).build();
        assert_eq!(logger.filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(with_filter("info"));
        init_logging(with_filter("trace"));
        log::info!("logger survives repeated initialization");
    }
}
