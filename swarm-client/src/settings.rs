use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use swarm_core::{Resolution, ShapeSequence, SwarmConfig};
use swarm_shared::SwarmSettings;

/// Read a settings file; absent fields keep their defaults
pub fn load_settings(path: &Path) -> Result<SwarmSettings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let settings = serde_json::from_str(&text)
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    log::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

/// Overlay file settings onto the engine configuration
pub fn apply_settings(settings: &SwarmSettings, mut config: SwarmConfig) -> SwarmConfig {
    config.max_speed = settings.max_speed;
    config.max_force = settings.max_force;
    config.target_force = settings.target_force;
    config.capture_radius = settings.capture_radius;
    config.slowdown_radius = settings.slowdown_radius;
    config.noise_scale = settings.noise_scale;
    config.noise_speed = settings.noise_speed;
    config.edge_margin = settings.edge_margin;
    config.default_particles = config.clamp_particle_count(settings.particle_count);
    config.cycle.cycle_ms = settings.cycle_ms;
    config.cycle.roam_ms = settings.roam_ms;
    config.cycle.transition_ms = settings.transition_ms;
    config.use_neighbor_grid = settings.use_neighbor_grid;

    if config.cycle.roam_ms >= config.cycle.cycle_ms {
        log::warn!(
            "Roam time {}ms is not shorter than the cycle {}ms; the swarm will never assemble",
            config.cycle.roam_ms,
            config.cycle.cycle_ms
        );
    }
    config
}

pub fn shape_sequence(settings: &SwarmSettings) -> ShapeSequence {
    ShapeSequence::new(settings.shapes.clone())
}

pub fn resolution(settings: &SwarmSettings) -> Resolution {
    if settings.high_detail {
        Resolution::High
    } else {
        Resolution::Standard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "swarm-settings-{}-{}",
            std::process::id(),
            name
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults_leave_config_unchanged() {
        let config = apply_settings(&SwarmSettings::default(), SwarmConfig::default());
        assert_eq!(config, SwarmConfig::default());
    }

    #[test]
    fn test_settings_override_config() {
        let settings = SwarmSettings {
            max_speed: 3.5,
            particle_count: 9_000,
            cycle_ms: 12_000.0,
            use_neighbor_grid: false,
            ..SwarmSettings::default()
        };
        let config = apply_settings(&settings, SwarmConfig::default());
        assert_eq!(config.max_speed, 3.5);
        assert_eq!(config.default_particles, 2500);
        assert_eq!(config.cycle.cycle_ms, 12_000.0);
        assert!(!config.use_neighbor_grid);
    }

    #[test]
    fn test_load_partial_file() {
        let path = temp_file(
            "partial.json",
            r#"{ "shapes": ["HELLO", "CASTLE"], "high_detail": true }"#,
        );
        let settings = load_settings(&path).unwrap();
        assert_eq!(shape_sequence(&settings).len(), 2);
        assert_eq!(resolution(&settings), Resolution::High);
        assert_eq!(settings.max_force, 0.04);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_empty_shape_list_uses_show() {
        let settings = SwarmSettings::default();
        assert_eq!(shape_sequence(&settings), ShapeSequence::show());
    }

    #[test]
    fn test_bad_file_reports_path() {
        let path = temp_file("broken.json", "{ not json");
        let err = load_settings(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.json"));
        fs::remove_file(path).ok();

        let missing = load_settings(Path::new("/definitely/not/here.json"));
        assert!(missing.is_err());
    }
}
