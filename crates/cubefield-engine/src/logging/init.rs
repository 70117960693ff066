use std::sync::Once;

/// Filter used when neither the config nor `RUST_LOG` provides one.
///
/// wgpu's internals log every resource at info; keep them at warn.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` uses `env_logger` filter syntax, e.g.
/// `"cubefield_engine=trace,wgpu=warn"`. It takes precedence over `RUST_LOG`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Millisecond timestamps on every record.
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            timestamps: true,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Later calls are no-ops.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config
            .env_filter
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);
        if config.timestamps {
            builder.format_timestamp_millis();
        } else {
            builder.format_timestamp(None);
        }

        // A logger installed by someone else (e.g. a test harness) wins.
        if builder.try_init().is_err() {
            log::debug!("global logger already installed");
            return;
        }

        log::debug!("logging initialized with filter `{filter}`");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        let config = LoggingConfig {
            env_filter: Some("warn".into()),
            ..LoggingConfig::default()
        };
        init_logging(config.clone());
        init_logging(config);
        log::warn!("still logging");
    }
}
