/// Tuning constants, loadable from a TOML file.
///
/// Every field has a default, so a config file only needs to name the values
/// it overrides.  A missing file is not an error; the defaults are used.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// File looked up in the working directory when no override is given.
pub const DEFAULT_CONFIG_FILE: &str = "zombie_shooter.toml";

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV_VAR: &str = "ZOMBIE_SHOOTER_CONFIG";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Footprints (world units) ─────────────────────────────────────────────
    pub player_radius: f32,
    pub gun_length: f32,
    pub zombie_size: f32,
    pub boss_size: f32,
    pub bullet_radius: f32,
    pub pickup_size: f32,
    pub exit_width: f32,
    pub exit_height: f32,
    /// Gap between the exit zone and the right edge of the surface.
    pub exit_margin: f32,

    // ── Speeds (world units per tick) ────────────────────────────────────────
    pub player_speed: f32,
    pub zombie_speed: f32,
    pub bullet_speed: f32,

    // ── Timing (milliseconds) ────────────────────────────────────────────────
    pub shoot_delay_ms: u64,
    pub hit_cooldown_ms: u64,

    // ── Health ───────────────────────────────────────────────────────────────
    pub player_max_health: u32,
    pub boss_max_health: f32,
    /// Share of a boss's max health removed per bullet.
    pub boss_damage_fraction: f32,

    // ── Level scaling ────────────────────────────────────────────────────────
    pub base_zombie_count: u32,
    pub zombies_per_level: u32,
    pub boss_level_interval: u32,
    pub pickup_level_interval: u32,
    pub player_spawn_x: f32,

    /// Rejection-sampling attempts before placement gives up on overlap checks.
    pub placement_max_attempts: u32,

    // ── Front end ────────────────────────────────────────────────────────────
    pub frame_ms: u64,
    /// World units covered by one terminal column.
    pub cell_width: f32,
    /// World units covered by one terminal row.
    pub cell_height: f32,
    pub log_file: PathBuf,
    /// Run enemies, bullets and pickups in two-player sessions as well.
    pub two_player_survival: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            player_radius: 20.0,
            gun_length: 30.0,
            zombie_size: 30.0,
            boss_size: 60.0,
            bullet_radius: 5.0,
            pickup_size: 15.0,
            exit_width: 100.0,
            exit_height: 20.0,
            exit_margin: 20.0,
            player_speed: 7.0,
            zombie_speed: 1.5,
            bullet_speed: 10.0,
            shoot_delay_ms: 350,
            hit_cooldown_ms: 1000,
            player_max_health: 8,
            boss_max_health: 4.0,
            boss_damage_fraction: 0.25,
            base_zombie_count: 6,
            zombies_per_level: 2,
            boss_level_interval: 10,
            pickup_level_interval: 5,
            player_spawn_x: 100.0,
            placement_max_attempts: 1000,
            frame_ms: 33,
            cell_width: 10.0,
            cell_height: 20.0,
            log_file: PathBuf::from("zombie_shooter.log"),
            two_player_survival: true,
        }
    }
}

impl GameConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from `path`.  A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::warn!("config file {} not found, using defaults", path.display());
            return Ok(GameConfig::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_toml_str(&content)?;
        log::info!("loaded config from {}", path.display());
        Ok(cfg)
    }

    /// Resolve the config path from the environment, falling back to
    /// `DEFAULT_CONFIG_FILE`.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive: [(&'static str, f32); 14] = [
            ("player_radius", self.player_radius),
            ("gun_length", self.gun_length),
            ("zombie_size", self.zombie_size),
            ("boss_size", self.boss_size),
            ("bullet_radius", self.bullet_radius),
            ("pickup_size", self.pickup_size),
            ("exit_width", self.exit_width),
            ("exit_height", self.exit_height),
            ("player_speed", self.player_speed),
            ("zombie_speed", self.zombie_speed),
            ("bullet_speed", self.bullet_speed),
            ("boss_max_health", self.boss_max_health),
            ("cell_width", self.cell_width),
            ("cell_height", self.cell_height),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(invalid(field, format!("must be > 0, got {}", value)));
            }
        }

        if !(self.boss_damage_fraction > 0.0 && self.boss_damage_fraction <= 1.0) {
            return Err(invalid(
                "boss_damage_fraction",
                format!("must be in (0, 1], got {}", self.boss_damage_fraction),
            ));
        }
        if self.exit_margin < 0.0 || self.player_spawn_x < 0.0 {
            let field = if self.exit_margin < 0.0 { "exit_margin" } else { "player_spawn_x" };
            return Err(invalid(field, "must not be negative".to_string()));
        }

        let non_zero: [(&'static str, u64); 5] = [
            ("player_max_health", self.player_max_health as u64),
            ("boss_level_interval", self.boss_level_interval as u64),
            ("pickup_level_interval", self.pickup_level_interval as u64),
            ("placement_max_attempts", self.placement_max_attempts as u64),
            ("frame_ms", self.frame_ms),
        ];
        for (field, value) in non_zero {
            if value == 0 {
                return Err(invalid(field, "must not be zero".to_string()));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
