use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

fn default_start_zoom() -> f32 {
    1.0
}

fn default_show_graticule() -> bool {
    true
}

fn default_hit_tolerance_px() -> f32 {
    8.0
}

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfigData {
    /// Map center on startup as `[lng, lat]`
    #[serde(default)]
    pub start_center: [f64; 2],

    /// Camera orthographic scale on startup
    #[serde(default = "default_start_zoom")]
    pub start_zoom: f32,

    /// Draw the lat/lng graticule behind measurements
    #[serde(default = "default_show_graticule")]
    pub show_graticule: bool,

    /// How close (in screen pixels) the cursor must be to count as hovering a point
    #[serde(default = "default_hit_tolerance_px")]
    pub hit_tolerance_px: f32,
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            start_center: [0.0, 0.0],
            start_zoom: default_start_zoom(),
            show_graticule: default_show_graticule(),
            hit_tolerance_px: default_hit_tolerance_px(),
        }
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to show or hide the graticule
#[derive(Message)]
pub struct SetGraticuleRequest {
    pub visible: bool,
}

/// Parse config JSON, falling back to defaults with a reason on failure
fn parse_config(json: &str) -> (AppConfigData, Option<String>) {
    match serde_json::from_str(json) {
        Ok(data) => (data, None),
        Err(e) => {
            warn!("Failed to parse config file: {}", e);
            (
                AppConfigData::default(),
                Some(format!("Configuration file was corrupted: {}", e)),
            )
        }
    }
}

/// Load configuration from disk
fn load_config() -> (AppConfig, Option<String>) {
    let config_path = crate::paths::config_file();

    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(json) => {
                let parsed = parse_config(&json);
                if parsed.1.is_none() {
                    info!("Loaded config from {:?}", config_path);
                }
                parsed
            }
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    AppConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (AppConfigData::default(), None)
    };

    (
        AppConfig {
            data,
            config_path,
            dirty: false,
        },
        reset_reason,
    )
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    if let Err(e) = crate::paths::ensure_directories() {
        warn!("Failed to create config directories: {}", e);
    }

    let (loaded, reset_reason) = load_config();
    *config = loaded;

    // Set notification if config was reset due to an error
    if let Some(reason) = reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

/// System to toggle graticule visibility
fn set_graticule_system(
    mut events: MessageReader<SetGraticuleRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.show_graticule != event.visible {
            config.data.show_graticule = event.visible;
            config.dirty = true;
            save_events.write(SaveConfigRequest);
        }
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<SetGraticuleRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    set_graticule_system.run_if(on_message::<SetGraticuleRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}
