//! Tunable gameplay values and the RON settings file they load from.

use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::prefab::Prefabs;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Offsets and forces used by the gameplay features.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Reflect)]
#[reflect(Resource)]
#[serde(default)]
pub struct AdventureConfig {
    /// Where characters respawn when nothing overrides it.
    pub world_spawn: [f32; 3],
    /// Respawn location relative to the revival stone a player is bound to.
    pub revival_offset: [f32; 3],
    /// Revival stone collider position relative to the stone.
    pub collider_offset: [f32; 3],
    /// Rider position relative to the platform it stands on.
    pub rider_offset: [f32; 3],
    /// Impulse applied to a platform whenever it is damaged.
    pub platform_knockback: [f32; 3],
}

impl Default for AdventureConfig {
    fn default() -> Self {
        Self {
            world_spawn: [0.0, 40.0, 0.0],
            revival_offset: [1.0, 0.0, 1.0],
            collider_offset: [0.0, 1.0, 0.0],
            rider_offset: [0.0, 1.5, 0.0],
            platform_knockback: [0.0, 210.0, 0.0],
        }
    }
}

impl AdventureConfig {
    #[must_use]
    pub const fn world_spawn(&self) -> Vec3 {
        Vec3::from_array(self.world_spawn)
    }

    #[must_use]
    pub const fn revival_offset(&self) -> Vec3 {
        Vec3::from_array(self.revival_offset)
    }

    #[must_use]
    pub const fn collider_offset(&self) -> Vec3 {
        Vec3::from_array(self.collider_offset)
    }

    #[must_use]
    pub const fn rider_offset(&self) -> Vec3 {
        Vec3::from_array(self.rider_offset)
    }

    #[must_use]
    pub const fn platform_knockback(&self) -> Vec3 {
        Vec3::from_array(self.platform_knockback)
    }
}

/// Everything a settings file can contain. Missing sections keep their defaults;
/// prefabs listed in the file are layered over the built-in ones.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub gameplay: AdventureConfig,
    pub prefabs: Option<Prefabs>,
}

impl Settings {
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron(&source)
    }

    /// Insert the loaded values as resources, replacing any defaults.
    pub fn apply(self, app: &mut App) {
        let mut prefabs = Prefabs::default();
        if let Some(overrides) = self.prefabs {
            prefabs.merge(overrides);
        }
        app.insert_resource(self.gameplay).insert_resource(prefabs);
    }
}

pub(super) fn plugin(app: &mut App) {
    app.register_type::<AdventureConfig>()
        .init_resource::<AdventureConfig>();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefab::FIREBALL;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_settings_use_defaults() {
        let settings = Settings::from_ron("()").unwrap();
        assert_eq!(settings.gameplay, AdventureConfig::default());
        assert!(settings.prefabs.is_none());
    }

    #[test]
    fn partial_gameplay_section_keeps_other_defaults() {
        let settings = Settings::from_ron("(gameplay: (rider_offset: (0.0, 2.0, 0.0)))").unwrap();
        assert_eq!(settings.gameplay.rider_offset(), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(
            settings.gameplay.revival_offset(),
            AdventureConfig::default().revival_offset()
        );
    }

    #[test]
    fn prefab_overrides_layer_over_builtins() {
        let settings = Settings::from_ron(
            r#"(prefabs: Some({
                "Projectile:fireball": Projectile((speed: 3.0, scale: 1.0, max_distance: 8.0)),
            }))"#,
        )
        .unwrap();

        let mut app = App::new();
        settings.apply(&mut app);

        let prefabs = app.world().resource::<Prefabs>();
        assert_eq!(prefabs.projectile(FIREBALL).map(|p| p.speed), Some(3.0));
        assert!(
            prefabs
                .collider(crate::prefab::REVIVAL_STONE_COLLIDER)
                .is_some()
        );
    }

    #[test]
    fn malformed_settings_are_rejected() {
        assert!(matches!(
            Settings::from_ron("(gameplay: 12)"),
            Err(ConfigError::Parse(_))
        ));
    }
}
