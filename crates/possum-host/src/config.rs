//! Host configuration.
//!
//! One TOML document configures every host-side component:
//!
//! ```toml
//! [assets]
//! vertex_shader = "sprite_vert.glsl"
//! fragment_shader = "sprite_frag.glsl"
//! textures = ["background.png", "possum_sprite_sheet.png"]
//!
//! [fetch]
//! root = "static"
//!
//! [surface]
//! policy = { padded_multiple = 64 }   # or "exact" / "power_of_two"
//!
//! [input]
//! mode = "batched"                    # or "immediate"
//!
//! [frame]
//! max_consecutive_failures = 120
//! max_delta_ms = 250
//!
//! [window]
//! title = "possum"
//! width = 1280.0
//! height = 720.0
//!
//! [logging]
//! filter = "possum_host=debug"
//! ```
//!
//! Only `[assets]` is required.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::assets::AssetManifest;
use crate::frame::FrameConfig;
use crate::input::DeliveryMode;
use crate::logging::LoggingConfig;
use crate::surface::SizingPolicy;
use crate::window::RuntimeConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostConfig {
    pub assets: AssetManifest,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub surface: SurfaceConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub frame: FrameConfig,
    #[serde(default)]
    pub window: RuntimeConfig,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    /// Base directory for relative resource paths.
    pub root: PathBuf,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { root: PathBuf::from(".") }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SurfaceConfig {
    pub policy: SizingPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    pub mode: DeliveryMode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    /// `env_logger` filter string; falls back to `RUST_LOG`, then `info`.
    pub filter: Option<String>,
}

impl LoggingSection {
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            filter: self.filter.clone(),
            ..LoggingConfig::default()
        }
    }
}

impl HostConfig {
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(src)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&src)
    }

    /// Resolves `fetch.root` relative to the directory holding the config
    /// file, so configs can name assets next to themselves.
    pub fn rebase_fetch_root(&mut self, config_dir: &Path) {
        if self.fetch.root.is_relative() {
            self.fetch.root = config_dir.join(&self.fetch.root);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use super::*;

    const MINIMAL: &str = r#"
        [assets]
        vertex_shader = "sprite_vert.glsl"
        fragment_shader = "sprite_frag.glsl"
    "#;

    #[test]
    fn minimal_config_uses_defaults() {
        let c = HostConfig::from_toml_str(MINIMAL).unwrap();
        assert!(c.assets.textures.is_empty());
        assert_eq!(c.fetch.root, PathBuf::from("."));
        assert_eq!(c.surface.policy, SizingPolicy::Exact);
        assert_eq!(c.input.mode, DeliveryMode::Batched);
        assert_eq!(c.frame, FrameConfig::default());
        assert_eq!(c.logging.filter, None);
    }

    #[test]
    fn full_config_parses() {
        let c = HostConfig::from_toml_str(
            r#"
            [assets]
            vertex_shader = "v.glsl"
            fragment_shader = "f.glsl"
            textures = ["a.png", "b.png"]

            [fetch]
            root = "static"

            [surface]
            policy = { padded_multiple = 64 }

            [input]
            mode = "immediate"

            [frame]
            max_consecutive_failures = 5
            max_delta_ms = 250

            [window]
            title = "possum world"
            width = 800.0
            height = 600.0

            [logging]
            filter = "possum_host=trace"
            "#,
        )
        .unwrap();

        assert_eq!(c.assets.textures.len(), 2);
        assert_eq!(c.fetch.root, PathBuf::from("static"));
        assert_eq!(
            c.surface.policy,
            SizingPolicy::PaddedMultiple(NonZeroU32::new(64).unwrap())
        );
        assert_eq!(c.input.mode, DeliveryMode::Immediate);
        assert_eq!(c.frame.max_consecutive_failures, 5);
        assert_eq!(c.frame.max_delta_ms, Some(250));
        assert_eq!(c.window.title, "possum world");
        assert_eq!(
            c.logging.to_logging_config().filter.as_deref(),
            Some("possum_host=trace")
        );
    }

    #[test]
    fn missing_assets_is_rejected() {
        let err = HostConfig::from_toml_str("[input]\nmode = \"batched\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_tile_is_rejected() {
        let src = format!("{MINIMAL}\n[surface]\npolicy = {{ padded_multiple = 0 }}\n");
        assert!(HostConfig::from_toml_str(&src).is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let src = format!("{MINIMAL}\n[input]\nmode = \"batched\"\ncoalesce = true\n");
        assert!(HostConfig::from_toml_str(&src).is_err());
    }

    #[test]
    fn rebase_only_touches_relative_roots() {
        let mut c = HostConfig::from_toml_str(MINIMAL).unwrap();
        c.fetch.root = PathBuf::from("static");
        c.rebase_fetch_root(Path::new("/srv/possum"));
        assert_eq!(c.fetch.root, PathBuf::from("/srv/possum/static"));

        c.fetch.root = PathBuf::from("/abs");
        c.rebase_fetch_root(Path::new("/srv/possum"));
        assert_eq!(c.fetch.root, PathBuf::from("/abs"));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = HostConfig::load("/definitely/not/here/possum.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
