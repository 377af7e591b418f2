//! Third-party plugin isolation.

mod avian;

pub use avian::{CollisionGroup, Impulse, simulation_plugin};

pub fn plugin(app: &mut bevy::prelude::App) {
    app.add_plugins(avian::plugin);
}
