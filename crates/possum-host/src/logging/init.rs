use std::sync::OnceLock;

use env_logger::WriteStyle;
use log::LevelFilter;

/// Filter used when neither the config nor `RUST_LOG` provides one.
const DEFAULT_FILTER: &str = "info";

/// Windowing crates that log per event at `info`/`debug`. Capped at `warn`
/// unless the active filter names them explicitly.
const PLATFORM_MODULES: &[&str] = &["winit", "calloop", "sctk"];

/// How the `env_logger` backend is set up.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` directives, e.g. `"info,possum_host=debug"`.
    pub filter: Option<String>,
    /// Prefix each record with a millisecond timestamp.
    pub timestamps: bool,
    pub write_style: WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            timestamps: true,
            write_style: WriteStyle::Auto,
        }
    }
}

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Installs `env_logger` as the `log` backend.
///
/// Only the first call does any work; later calls return its outcome.
/// Returns `false` when some other logger was already installed, in which
/// case that logger stays in place.
pub fn init_logging(config: LoggingConfig) -> bool {
    *INSTALLED.get_or_init(|| {
        let filter = resolve_filter(config.filter.as_deref(), std::env::var("RUST_LOG").ok());

        let mut builder = env_logger::Builder::new();
        for module in PLATFORM_MODULES {
            builder.filter_module(module, LevelFilter::Warn);
        }
        // Directives naming a platform module replace the cap above.
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);
        if config.timestamps {
            builder.format_timestamp_millis();
        } else {
            builder.format_timestamp(None);
        }

        let installed = builder.try_init().is_ok();
        if installed {
            log::debug!("logging: filter `{filter}`");
        }
        installed
    })
}

/// Picks the filter: explicit config, then `RUST_LOG`, then `info`. Blank
/// values count as unset.
fn resolve_filter(configured: Option<&str>, env: Option<String>) -> String {
    configured
        .filter(|f| !f.trim().is_empty())
        .map(str::to_string)
        .or_else(|| env.filter(|f| !f.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}
