mod console_engine;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use possum_host::config::HostConfig;
use possum_host::engine::EngineInitError;
use possum_host::logging::init_logging;
use possum_host::window::{Runtime, WindowSurface};

use console_engine::ConsoleEngine;

/// Config file looked up in the working directory when no path is given.
const CONFIG_FILE: &str = "possum.toml";

/// The command-line path if given, else `possum.toml` in the working
/// directory, else the sample config shipped next to this crate.
fn config_path(arg: Option<String>) -> PathBuf {
    if let Some(arg) = arg {
        return PathBuf::from(arg);
    }
    let local = PathBuf::from(CONFIG_FILE);
    if local.is_file() {
        return local;
    }
    Path::new(env!("CARGO_MANIFEST_DIR")).join(CONFIG_FILE)
}

fn main() -> Result<()> {
    let path = config_path(std::env::args().nth(1));

    let mut config = HostConfig::load(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    if let Some(dir) = path.parent() {
        config.rebase_fetch_root(dir);
    }

    init_logging(config.logging.to_logging_config());
    log::info!("possum studio: config {}", path.display());

    Runtime::run(config, |surface: &WindowSurface| {
        Ok::<_, EngineInitError>(ConsoleEngine::new(surface.window().title()))
    })
}
