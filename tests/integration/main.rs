//! End-to-end flows through the full gameplay plugin.

use adventure_assets::gameplay::password_door::UNLOCKED;
use adventure_assets::gameplay::revival_stone::{ACTIVATED, DESTROYED, RevivalStoneCollider};
use adventure_assets::mechanics::{AttachedTo, IntervalTrigger};
use adventure_assets::prelude::*;
use avian3d::dynamics::integrator::VelocityIntegrationData;
use avian3d::prelude::{CollisionLayers, ComputedMass, LayerMask, LinearVelocity, RigidBody};
use pretty_assertions::assert_eq;

#[derive(Resource, Default)]
struct Inbox {
    notifications: Vec<Notification>,
    screens: Vec<ScreenRequest>,
}

fn collect_inbox(
    mut inbox: ResMut<Inbox>,
    mut notifications: MessageReader<Notification>,
    mut screens: MessageReader<ScreenRequest>,
) {
    inbox.notifications.extend(notifications.read().cloned());
    inbox.screens.extend(screens.read().copied());
}

fn create_game_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(adventure_assets::plugin);
    app.init_resource::<Inbox>()
        .add_systems(Last, collect_inbox);
    app
}

fn place(world: &mut World, bundle: impl Bundle, position: Vec3) -> Entity {
    let transform = Transform::from_translation(position);
    world
        .spawn((bundle, Block, transform, GlobalTransform::from(transform)))
        .id()
}

fn spawn_player(world: &mut World) -> (Entity, Entity) {
    let player = world.spawn(Player).id();
    let character = world
        .spawn((Character { player }, Transform::default()))
        .id();
    (player, character)
}

fn texts_for(app: &App, player: Entity) -> Vec<String> {
    app.world()
        .resource::<Inbox>()
        .notifications
        .iter()
        .filter(|n| n.recipient == player)
        .map(|n| n.text.clone())
        .collect()
}

#[test]
fn revival_stone_binds_respawn_until_destroyed() {
    let mut app = create_game_app();
    let stone = place(
        app.world_mut(),
        RevivalStone::default(),
        Vec3::new(4.0, 10.0, 4.0),
    );
    let (player, character) = spawn_player(app.world_mut());
    app.update();

    // Players interact with the collider on top of the stone.
    let collider = app.world().get::<RevivalStone>(stone).unwrap().collider.unwrap();
    assert!(app.world().get::<RevivalStoneCollider>(collider).is_some());
    app.world_mut().trigger(Activate {
        entity: collider,
        instigator: character,
    });
    app.world_mut()
        .write_message(RespawnRequest { character });
    app.update();

    let transform = app.world().get::<Transform>(character).unwrap();
    assert_eq!(transform.translation, Vec3::new(5.0, 10.0, 5.0));
    assert_eq!(transform.rotation, Quat::IDENTITY);

    app.world_mut().despawn(stone);
    app.world_mut()
        .write_message(RespawnRequest { character });
    app.update();

    assert!(app.world().get::<RevivalTarget>(player).is_none());
    assert!(app.world().get_entity(collider).is_err());
    assert_eq!(
        app.world().get::<Transform>(character).unwrap().translation,
        AdventureConfig::default().world_spawn()
    );
    assert_eq!(texts_for(&app, player), vec![ACTIVATED, DESTROYED]);
}

#[test]
fn respawn_without_target_uses_world_spawn() {
    let mut app = create_game_app();
    let (_, character) = spawn_player(app.world_mut());

    app.world_mut()
        .write_message(RespawnRequest { character });
    app.update();

    assert_eq!(
        app.world().get::<Transform>(character).unwrap().translation,
        AdventureConfig::default().world_spawn()
    );
}

#[test]
fn placed_launcher_fires_but_item_does_not() {
    let mut app = create_game_app();
    let due = FireballLauncher {
        trigger: IntervalTrigger {
            interval: 30.0,
            last_fire: -30.0,
        },
    };
    let item = app.world_mut().spawn((BlockItem, due)).id();
    let block = place(app.world_mut(), (), Vec3::ZERO);
    app.world_mut().trigger(BlockItemPlaced {
        entity: item,
        placed_block: block,
    });

    app.update();
    app.update();

    let mut fireballs = app.world_mut().query::<&Fireball>();
    assert_eq!(fireballs.iter(app.world()).count(), 1);
}

#[test]
fn door_round_trip_for_the_local_player() {
    let mut app = create_game_app();
    let (player, character) = spawn_player(app.world_mut());
    app.world_mut().resource_mut::<LocalPlayer>().0 = Some(character);
    let door = place(app.world_mut(), PasswordDoor, Vec3::ZERO);

    app.world_mut().trigger(DoorPlaced {
        entity: door,
        instigator: character,
    });
    app.world_mut().trigger(SetDoorPassword {
        entity: door,
        password: "hunter2".into(),
    });
    app.world_mut().trigger(Activate {
        entity: door,
        instigator: character,
    });
    app.world_mut().trigger(SubmitDoorPassword {
        entity: door,
        instigator: character,
        attempt: "hunter2".into(),
    });
    app.update();

    let screens: Vec<_> = app
        .world()
        .resource::<Inbox>()
        .screens
        .iter()
        .map(|request| (request.screen, request.door))
        .collect();
    assert_eq!(
        screens,
        vec![
            (Screen::SetDoorPassword, door),
            (Screen::EnterDoorPassword, door),
        ]
    );
    assert!(!app.world().get::<DoorLock>(door).unwrap().is_locked());
    assert_eq!(texts_for(&app, player), vec![UNLOCKED]);
}

fn spawn_test_platform(world: &mut World) -> Entity {
    world
        .spawn((
            Platform::default(),
            CollisionLayers::new(LayerMask::ALL, LayerMask::ALL),
            RigidBody::Dynamic,
            ComputedMass::new(1.0),
            VelocityIntegrationData::default(),
            Transform::default(),
            GlobalTransform::default(),
        ))
        .id()
}

#[test]
fn platform_carries_rider_and_takes_knockback() {
    let mut app = create_game_app();
    let platform = spawn_test_platform(app.world_mut());
    let (_, character) = spawn_player(app.world_mut());

    app.world_mut().trigger(Activate {
        entity: platform,
        instigator: character,
    });
    app.world_mut().trigger(Damaged {
        entity: platform,
        amount: 3.0,
    });
    app.update();

    assert_eq!(
        app.world().get::<MovementMode>(character),
        Some(&MovementMode::Disabled)
    );
    assert_eq!(
        app.world().get::<AttachedTo>(character),
        Some(&AttachedTo(platform))
    );
    assert_eq!(
        app.world().get::<LinearVelocity>(platform).unwrap().0,
        AdventureConfig::default().platform_knockback()
    );

    app.world_mut().trigger(Activate {
        entity: platform,
        instigator: character,
    });
    app.update();

    assert_eq!(
        app.world().get::<MovementMode>(character),
        Some(&MovementMode::Walking)
    );
    assert_eq!(
        app.world().get::<CollisionLayers>(platform).unwrap().filters,
        LayerMask::ALL
    );
}

#[test]
fn destroyed_platform_drops_its_rider() {
    let mut app = create_game_app();
    let platform = spawn_test_platform(app.world_mut());
    let (_, character) = spawn_player(app.world_mut());
    app.world_mut().trigger(Activate {
        entity: platform,
        instigator: character,
    });
    app.update();

    app.world_mut().despawn(platform);
    app.update();

    assert!(app.world().get_entity(character).is_ok());
    assert!(app.world().get::<AttachedTo>(character).is_none());
    assert_eq!(
        app.world().get::<MovementMode>(character),
        Some(&MovementMode::Walking)
    );
}
