//! Runtime configuration: compiled-in defaults overridden by URL query
//! parameters (`?db=...&limit=50&controls=fly&placement=raycast&grid=off&log=debug`).

use crate::constants::{
    CAMERA_START, GRID_SIZE, GRID_SPACING, RIPPLES_PATH, SNAPSHOT_LIMIT, SNAPSHOT_LIMIT_MAX,
};
use crate::controls::{ControlScheme, KeyBindings};
use crate::placement::PlacementStrategy;
use glam::Vec3;
use log::LevelFilter;

/// Database URL baked in at build time; empty means the in-memory sandbox.
pub const DEFAULT_DATABASE_URL: &str = match option_env!("RIPPLE_DATABASE_URL") {
    Some(url) => url,
    None => "",
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    pub size: f32,
    pub spacing: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: GRID_SIZE,
            spacing: GRID_SPACING,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub database_url: String,
    pub auth_token: Option<String>,
    pub collection: String,
    pub snapshot_limit: u32,
    pub controls: ControlScheme,
    pub placement: PlacementStrategy,
    pub key_bindings: KeyBindings,
    pub grid: Option<GridConfig>,
    pub log_level: LevelFilter,
    pub camera_start: Vec3,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            auth_token: None,
            collection: RIPPLES_PATH.to_string(),
            snapshot_limit: SNAPSHOT_LIMIT,
            controls: ControlScheme::default(),
            placement: PlacementStrategy::default(),
            key_bindings: KeyBindings::default(),
            grid: Some(GridConfig::default()),
            log_level: LevelFilter::Info,
            camera_start: Vec3::from_array(CAMERA_START),
        }
    }
}

impl AppConfig {
    pub fn from_query(search: &str) -> Self {
        let mut config = Self::default();
        config.apply_query(search);
        config
    }

    /// Apply `?key=value&...` overrides. Unknown keys and unparsable values
    /// are logged and ignored.
    pub fn apply_query(&mut self, search: &str) {
        for (key, value) in parse_query(search) {
            let applied = match key.as_str() {
                "db" => {
                    self.database_url = value.clone();
                    true
                }
                "auth" => {
                    self.auth_token = Some(value.clone()).filter(|v| !v.is_empty());
                    true
                }
                "path" => {
                    let path = value.trim_matches('/').to_string();
                    if !path.is_empty() {
                        self.collection = path;
                    }
                    !self.collection.is_empty()
                }
                "limit" => match value.parse::<u32>() {
                    Ok(n) => {
                        self.snapshot_limit = n.clamp(1, SNAPSHOT_LIMIT_MAX);
                        true
                    }
                    Err(_) => false,
                },
                "controls" => ControlScheme::from_name(&value)
                    .map(|c| self.controls = c)
                    .is_some(),
                "placement" => PlacementStrategy::from_name(&value)
                    .map(|p| self.placement = p)
                    .is_some(),
                "grid" => match value.as_str() {
                    "off" | "0" | "false" => {
                        self.grid = None;
                        true
                    }
                    "on" | "1" | "true" => {
                        self.grid = Some(GridConfig::default());
                        true
                    }
                    _ => false,
                },
                "log" => value
                    .parse::<LevelFilter>()
                    .map(|l| self.log_level = l)
                    .is_ok(),
                _ => false,
            };
            if !applied {
                log::debug!("[config] ignoring query parameter {}={}", key, value);
            }
        }
    }

    pub fn uses_remote_store(&self) -> bool {
        !self.database_url.trim().is_empty()
    }
}

/// Split a query string into decoded key/value pairs.
pub fn parse_query(search: &str) -> Vec<(String, String)> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next().unwrap_or_default();
            let value = parts.next().unwrap_or_default();
            (percent_decode(key), percent_decode(value))
        })
        .collect()
}

fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3])
                    .ok()
                    .and_then(|h| u8::from_str_radix(h, 16).ok());
                match hex {
                    Some(b) => {
                        out.push(b);
                        i += 2;
                    }
                    None => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
