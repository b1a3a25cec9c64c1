//! Smoke-тесты headless App: полный schedule, порты, event plumbing

use bevy::prelude::*;
use duskrun_simulation::{
    create_headless_app, spawn_locomotion_actor, spawn_pursuit_agent, GroundProbe, JumpIntent,
    LocomotionConfig, LocomotionState, MoveInput, NavAgent, PursuitAgent, PursuitConfig,
    PursuitTarget,
};

fn spawn_player(app: &mut App, position: Vec3) -> Entity {
    let world = app.world_mut();
    let mut commands = world.commands();
    let player = spawn_locomotion_actor(
        &mut commands,
        position,
        LocomotionConfig::default(),
        GroundProbe::default(),
    )
    .expect("default config is valid");
    world.flush();
    player
}

#[test]
fn player_moves_and_falls_in_empty_world() {
    let mut app = create_headless_app();
    let player = spawn_player(&mut app, Vec3::ZERO);

    for _ in 0..10 {
        // Хост пишет input каждый кадр: стик вперёд
        app.world_mut().get_mut::<MoveInput>(player).unwrap().axes = Vec2::new(0.0, 1.0);
        app.update();
    }

    let transform = app.world().get::<Transform>(player).unwrap();
    // Планарное движение по input (+Z), падение без земли под ногами
    assert!(transform.translation.z > 0.0);
    assert!(transform.translation.y < 0.0);
}

#[test]
fn jump_budget_enforced_through_events() {
    let mut app = create_headless_app();
    let player = spawn_player(&mut app, Vec3::ZERO);
    let jump_force = LocomotionConfig::default().jump_force;

    // Актор на земле (probe в пустом мире её не найдёт — ставим руками)
    app.world_mut()
        .get_mut::<LocomotionState>(player)
        .unwrap()
        .on_ground = true;

    app.world_mut().send_event(JumpIntent { entity: player });
    app.update();

    let state = app.world().get::<LocomotionState>(player).unwrap();
    assert_eq!(state.jump_count, 1);
    assert!(!state.on_ground);
    // fall_velocity = jump_force минус кадр гравитации
    assert!((state.fall_velocity - jump_force).abs() < 0.2);

    // Бюджет по умолчанию 1: второй прыжок в воздухе — тихий no-op
    app.world_mut().send_event(JumpIntent { entity: player });
    app.update();

    let state = app.world().get::<LocomotionState>(player).unwrap();
    assert_eq!(state.jump_count, 1);
}

#[test]
fn pursuit_agent_chases_target_through_schedule() {
    let mut app = create_headless_app();
    let player = spawn_player(&mut app, Vec3::new(15.0, 0.0, 0.0));

    let world = app.world_mut();
    let mut commands = world.commands();
    let agent = spawn_pursuit_agent(
        &mut commands,
        Vec3::ZERO,
        PursuitConfig {
            chase_distance: 20.0,
            standoff_distance: 1.5,
            sense_interval: 0.25,
        },
    )
    .expect("valid config");
    world.flush();

    app.world_mut()
        .entity_mut(agent)
        .insert(PursuitTarget(Some(player)));

    for _ in 0..5 {
        app.update();
    }

    // Первый sense — немедленно при активации: цель в range, chase выдал команду
    let pursuit = app.world().get::<PursuitAgent>(agent).unwrap();
    assert!(pursuit.in_range);
    let nav = app.world().get::<NavAgent>(agent).unwrap();
    assert!(nav.current_destination().is_some());

    // Деактивация = despawn: периодика умирает вместе с entity, loop живёт
    app.world_mut().despawn(agent);
    app.update();
}

#[test]
fn spawn_rejects_invalid_config() {
    let mut app = create_headless_app();
    let world = app.world_mut();
    let mut commands = world.commands();

    let result = spawn_locomotion_actor(
        &mut commands,
        Vec3::ZERO,
        LocomotionConfig {
            dash_duration: 0.0,
            ..Default::default()
        },
        GroundProbe::default(),
    );
    assert!(result.is_err());

    let result = spawn_pursuit_agent(
        &mut commands,
        Vec3::ZERO,
        PursuitConfig {
            sense_interval: 0.0,
            ..Default::default()
        },
    );
    assert!(result.is_err());
}
