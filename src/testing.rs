//! Testing utilities for Bevy systems and observers.

#![cfg(test)]

use avian3d::dynamics::integrator::VelocityIntegrationData;
use avian3d::prelude::*;
use bevy::ecs::query::QueryFilter;
use bevy::prelude::*;

/// Creates a minimal app for testing with essential plugins.
pub fn create_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app
}

/// Helper to advance the app by one frame.
pub fn tick(app: &mut App) {
    app.update();
}

/// A dynamic rigid body with `mass` that accepts forces and impulses without
/// the physics plugins being added.
pub fn dynamic_body(mass: f32) -> impl Bundle {
    (
        RigidBody::Dynamic,
        ComputedMass::new(mass),
        VelocityIntegrationData::default(),
    )
}

/// Assert how many entities match the filter `F`.
pub fn assert_entity_count<F: QueryFilter>(app: &mut App, expected: usize) {
    let mut query = app.world_mut().query_filtered::<(), F>();
    let actual = query.iter(app.world()).count();
    assert_eq!(actual, expected, "expected {expected} matching entities, found {actual}");
}

/// Every `M` read since the app was created, in write order.
#[derive(Resource)]
pub struct CapturedMessages<M: Message>(pub Vec<M>);

impl<M: Message> Default for CapturedMessages<M> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

fn collect_messages<M: Message + Clone>(
    mut reader: MessageReader<M>,
    mut captured: ResMut<CapturedMessages<M>>,
) {
    captured.0.extend(reader.read().cloned());
}

/// Record every `M` into [`CapturedMessages`] at the end of each update.
pub fn capture_messages<M: Message + Clone>(app: &mut App) {
    app.init_resource::<CapturedMessages<M>>();
    app.add_systems(Last, collect_messages::<M>);
}
