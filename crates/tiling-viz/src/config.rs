//! Viewer settings read from an optional `key = value` file.

use std::path::Path;

use log::LevelFilter;
use tiling_core::TilingConfig;

pub const CONFIG_PATH: &str = "tiling.cfg";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    pub edge_length: f64,
    pub epsilon: f64,
    pub log_level: LevelFilter,
    /// Multiplier on mouse-drag panning. 1.0 keeps the content under the pointer.
    pub pan_speed: f32,
    pub show_help: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            edge_length: 0.2,
            epsilon: 1e-5,
            log_level: LevelFilter::Info,
            pan_speed: 1.0,
            show_help: true,
        }
    }
}

impl ViewerConfig {
    /// Reads `path`, falling back to defaults when the file does not exist.
    ///
    /// Returns the config together with the problems found while reading it,
    /// since the logger is only installed once the level is known.
    pub fn load(path: impl AsRef<Path>) -> (Self, Vec<String>) {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => (Self::default(), Vec::new()),
            Err(err) => (
                Self::default(),
                vec![format!("cannot read {}: {err}", path.display())],
            ),
        }
    }

    /// Parses `key = value` lines. Blank lines and `#` comments are skipped;
    /// unknown keys and bad values are reported and leave the default in place.
    pub fn parse(text: &str) -> (Self, Vec<String>) {
        let mut cfg = Self::default();
        let mut warnings = Vec::new();

        for (number, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                warnings.push(format!("line {}: expected `key = value`", number + 1));
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            let ok = if key.eq_ignore_ascii_case("edge_length") {
                value.parse().map(|v| cfg.edge_length = v).is_ok()
            } else if key.eq_ignore_ascii_case("epsilon") {
                value.parse().map(|v| cfg.epsilon = v).is_ok()
            } else if key.eq_ignore_ascii_case("log_level") {
                value.parse().map(|v| cfg.log_level = v).is_ok()
            } else if key.eq_ignore_ascii_case("pan_speed") {
                value.parse().map(|v| cfg.pan_speed = v).is_ok()
            } else if key.eq_ignore_ascii_case("show_help") {
                parse_flag(value).map(|v| cfg.show_help = v).is_some()
            } else {
                warnings.push(format!("line {}: unknown key `{key}`", number + 1));
                continue;
            };
            if !ok {
                warnings.push(format!("line {}: bad value `{value}` for `{key}`", number + 1));
            }
        }

        (cfg, warnings)
    }

    pub fn tiling_config(&self) -> TilingConfig {
        TilingConfig {
            edge_length: self.edge_length,
            epsilon: self.epsilon,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "1" | "true" | "TRUE" | "on" | "ON" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "off" | "OFF" | "no" | "NO" => Some(false),
        _ => None,
    }
}
