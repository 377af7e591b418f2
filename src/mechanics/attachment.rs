//! Spatial parent/child links between entities.
//!
//! A link is an `AttachedTo` relationship plus an `AttachmentOffset` that
//! places the child relative to its parent. Links never own the child:
//! despawning a parent only drops the link and leaves the child where it was.
//! A child has at most one parent; attaching an already-attached child to a
//! different parent is an error and the caller must detach first.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AttachError {
    #[error("{child} is already attached to {current}")]
    AlreadyAttached { child: Entity, current: Entity },
    #[error("{0} cannot be attached to itself")]
    SelfAttachment(Entity),
}

// === Components ===

/// The entity this one is attached to.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
#[relationship(relationship_target = Attached)]
pub struct AttachedTo(pub Entity);

/// Everything attached to this entity.
#[derive(Component, Debug, Default)]
#[relationship_target(relationship = AttachedTo)]
pub struct Attached(Vec<Entity>);

/// Pose of an attached entity in its parent's space.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AttachmentOffset(pub Transform);

fn placed_on(parent: &GlobalTransform, offset: Transform) -> Transform {
    parent.mul_transform(offset).compute_transform()
}

// === System Param ===

/// Read access to existing links, with mutations queued through `Commands`.
#[derive(SystemParam)]
pub struct Attachments<'w, 's> {
    links: Query<'w, 's, &'static AttachedTo>,
    globals: Query<'w, 's, &'static GlobalTransform>,
}

impl Attachments<'_, '_> {
    #[must_use]
    pub fn parent_of(&self, child: Entity) -> Option<Entity> {
        self.links.get(child).ok().map(|link| link.0)
    }

    /// Link `child` under `parent` at `offset`/`rotation` in parent space.
    ///
    /// The child's `Transform` is moved onto the parent right away when the
    /// parent's pose is known. Re-attaching to the same parent only moves the
    /// child to the new offset.
    pub fn attach(
        &self,
        commands: &mut Commands,
        parent: Entity,
        child: Entity,
        offset: Vec3,
        rotation: Quat,
    ) -> Result<(), AttachError> {
        if parent == child {
            return Err(AttachError::SelfAttachment(child));
        }
        match self.parent_of(child) {
            Some(current) if current != parent => {
                return Err(AttachError::AlreadyAttached { child, current });
            }
            _ => {}
        }
        let offset = Transform::from_translation(offset).with_rotation(rotation);
        let mut entity = commands.entity(child);
        entity.insert((AttachedTo(parent), AttachmentOffset(offset)));
        if let Ok(parent_global) = self.globals.get(parent) {
            entity.insert(placed_on(parent_global, offset));
        }
        Ok(())
    }

    /// Unlink `child` from `parent`, leaving it where it currently is in the
    /// world. Returns `false` without doing anything when the link does not exist.
    pub fn detach(&self, commands: &mut Commands, parent: Entity, child: Entity) -> bool {
        if self.parent_of(child) != Some(parent) {
            return false;
        }
        // The child may be mid-despawn.
        if let Ok(mut entity) = commands.get_entity(child) {
            entity.try_remove::<(AttachedTo, AttachmentOffset)>();
        }
        true
    }
}

// === Systems ===

/// Keeps attached entities on their parents. Runs right before transform propagation.
fn follow_parents(
    parents: Query<&GlobalTransform>,
    mut attached: Query<(&AttachedTo, &AttachmentOffset, &mut Transform)>,
) {
    for (link, offset, mut transform) in &mut attached {
        let Ok(parent) = parents.get(link.0) else {
            continue;
        };
        *transform = placed_on(parent, offset.0);
    }
}

// === Observers ===

/// A link can also end from the parent's side (parent despawned), so the
/// offset is cleaned up whenever the link goes.
fn drop_offset(remove: On<Remove, AttachedTo>, mut commands: Commands) {
    if let Ok(mut entity) = commands.get_entity(remove.entity) {
        entity.try_remove::<AttachmentOffset>();
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<AttachedTo>()
        .register_type::<AttachmentOffset>();

    app.add_observer(drop_offset);

    app.add_systems(
        PostUpdate,
        follow_parents.before(TransformSystems::Propagate),
    );
}
