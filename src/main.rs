//! Headless sandbox: spawns one of each feature, plays a short scripted
//! interaction, and logs what happens.
//!
//! Pass a RON settings file as the first argument to override the defaults.

use std::time::Duration;

use adventure_assets::gameplay::platform::spawn_platform;
use adventure_assets::prelude::*;
use adventure_assets::third_party::simulation_plugin;
use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::transform::TransformPlugin;

/// How long the sandbox runs before exiting.
const RUN_TIME: f32 = 10.0;

#[derive(Resource, Debug, Clone, Copy)]
struct Sandbox {
    character: Entity,
    stone: Entity,
    platform: Entity,
    door: Entity,
}

fn main() {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / 60.0,
        ))),
        LogPlugin::default(),
        TransformPlugin,
        simulation_plugin,
        adventure_assets::plugin,
    ));

    if let Some(path) = std::env::args().nth(1) {
        match Settings::load(&path) {
            Ok(settings) => settings.apply(&mut app),
            Err(error) => warn!("ignoring settings from {path}: {error}"),
        }
    }

    app.add_systems(Startup, spawn_sandbox).add_systems(
        Update,
        (
            play_script.run_if(run_once),
            respawn_after_script.run_if(run_once),
            exit_after_run_time,
        )
            .chain()
            .before(GameSet::Respawn),
    );
    app.run();
}

fn placed(transform: Transform) -> (Block, Transform, GlobalTransform) {
    (Block, transform, GlobalTransform::from(transform))
}

fn spawn_sandbox(mut commands: Commands, mut local: ResMut<LocalPlayer>) {
    let player = commands.spawn((Name::new("Player"), Player)).id();
    let character = commands
        .spawn((
            Name::new("Character"),
            Character { player },
            Transform::from_xyz(0.0, 1.0, 0.0),
        ))
        .id();
    local.0 = Some(character);

    let stone = commands
        .spawn((
            Name::new("Revival Stone"),
            RevivalStone::default(),
            placed(Transform::from_xyz(5.0, 0.0, 5.0)),
        ))
        .id();
    commands.spawn((
        Name::new("Fireball Launcher"),
        FireballLauncher::every(2.0),
        placed(Transform::from_xyz(-5.0, 1.0, 0.0)),
    ));
    let platform = spawn_platform(&mut commands, Transform::from_xyz(0.0, 2.0, -5.0));
    let door = commands
        .spawn((PasswordDoor, placed(Transform::from_xyz(0.0, 0.0, 8.0))))
        .id();

    commands.insert_resource(Sandbox {
        character,
        stone,
        platform,
        door,
    });
}

fn play_script(sandbox: Res<Sandbox>, mut commands: Commands) {
    let instigator = sandbox.character;
    commands.trigger(Activate {
        entity: sandbox.stone,
        instigator,
    });
    commands.trigger(DoorPlaced {
        entity: sandbox.door,
        instigator,
    });
    commands.trigger(SetDoorPassword {
        entity: sandbox.door,
        password: "open sesame".to_string(),
    });
    commands.trigger(SubmitDoorPassword {
        entity: sandbox.door,
        instigator,
        attempt: "open sesame".to_string(),
    });
    commands.trigger(Activate {
        entity: sandbox.platform,
        instigator,
    });
    commands.trigger(Damaged {
        entity: sandbox.platform,
        amount: 1.0,
    });
}

fn respawn_after_script(sandbox: Res<Sandbox>, mut respawns: MessageWriter<RespawnRequest>) {
    respawns.write(RespawnRequest {
        character: sandbox.character,
    });
}

fn exit_after_run_time(time: Res<Time>, mut exit: MessageWriter<AppExit>) {
    if time.elapsed_secs() >= RUN_TIME {
        info!("sandbox finished");
        exit.write(AppExit::Success);
    }
}
