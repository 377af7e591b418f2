//! Interaction events the host dispatches at world entities.

use bevy::prelude::*;

use crate::mechanics::AttachedTo;

/// A character used (right-clicked) `entity`.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct Activate {
    pub entity: Entity,
    /// The character that performed the activation.
    pub instigator: Entity,
}

/// A character struck `entity`.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct Attack {
    pub entity: Entity,
    pub instigator: Entity,
}

/// `entity` took damage after the host resolved an attack.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct Damaged {
    pub entity: Entity,
    pub amount: f32,
}

/// Marker: this entity only stands in for its parent. `Activate` and `Attack`
/// aimed at it are re-dispatched to the parent and go no further here.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ForwardToParent;

fn forward_activation(
    activate: On<Activate>,
    proxies: Query<&AttachedTo, With<ForwardToParent>>,
    mut commands: Commands,
) {
    let Ok(link) = proxies.get(activate.entity) else {
        return;
    };
    commands.trigger(Activate {
        entity: link.0,
        instigator: activate.instigator,
    });
}

fn forward_attack(
    attack: On<Attack>,
    proxies: Query<&AttachedTo, With<ForwardToParent>>,
    mut commands: Commands,
) {
    let Ok(link) = proxies.get(attack.entity) else {
        return;
    };
    commands.trigger(Attack {
        entity: link.0,
        instigator: attack.instigator,
    });
}

pub(super) fn plugin(app: &mut App) {
    app.register_type::<ForwardToParent>();

    app.add_observer(forward_activation)
        .add_observer(forward_attack);
}
