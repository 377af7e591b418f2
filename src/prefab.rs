//! Named blueprints for the entities gameplay spawns at runtime.

use std::collections::HashMap;

use bevy::prelude::*;
use serde::Deserialize;

/// Invisible hit volume that sits on top of a revival stone.
pub const REVIVAL_STONE_COLLIDER: &str = "AdventureAssets:revivalStoneCollider";

/// Projectile fired by fireball launchers.
pub const FIREBALL: &str = "Projectile:fireball";

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ColliderPrefab {
    /// Full box extents.
    pub size: [f32; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ProjectilePrefab {
    /// Units per second along the launch direction.
    pub speed: f32,
    /// Uniform world scale of the spawned projectile.
    pub scale: f32,
    /// Distance from the launch point after which the projectile is removed.
    pub max_distance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum Prefab {
    Collider(ColliderPrefab),
    Projectile(ProjectilePrefab),
}

/// Prefab lookup by name.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Prefabs(HashMap<String, Prefab>);

impl Default for Prefabs {
    fn default() -> Self {
        let mut prefabs = Self(HashMap::new());
        prefabs.insert(
            REVIVAL_STONE_COLLIDER,
            Prefab::Collider(ColliderPrefab {
                size: [1.0, 2.0, 1.0],
            }),
        );
        prefabs.insert(
            FIREBALL,
            Prefab::Projectile(ProjectilePrefab {
                speed: 12.0,
                scale: 0.4,
                max_distance: 32.0,
            }),
        );
        prefabs
    }
}

impl Prefabs {
    pub fn insert(&mut self, name: impl Into<String>, prefab: Prefab) -> Option<Prefab> {
        self.0.insert(name.into(), prefab)
    }

    pub fn remove(&mut self, name: &str) -> Option<Prefab> {
        self.0.remove(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Prefab> {
        self.0.get(name)
    }

    /// The collider prefab called `name`, or `None` if it is missing or not a collider.
    #[must_use]
    pub fn collider(&self, name: &str) -> Option<ColliderPrefab> {
        match self.get(name) {
            Some(Prefab::Collider(prefab)) => Some(*prefab),
            _ => None,
        }
    }

    /// The projectile prefab called `name`, or `None` if it is missing or not a projectile.
    #[must_use]
    pub fn projectile(&self, name: &str) -> Option<ProjectilePrefab> {
        match self.get(name) {
            Some(Prefab::Projectile(prefab)) => Some(*prefab),
            _ => None,
        }
    }

    /// Overlay `other` on top of these prefabs, replacing same-named entries.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }
}

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<Prefabs>();
}
