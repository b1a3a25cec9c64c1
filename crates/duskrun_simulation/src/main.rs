//! Headless симуляция DUSKRUN
//!
//! Запускает Bevy App без рендера: playable актор идёт вперёд, прыгает и
//! делает dash; pursuit агент преследует его по headless collision миру.

use bevy::prelude::*;
use duskrun_simulation::{
    create_headless_app, spawn_locomotion_actor, spawn_pursuit_agent, CollisionWorld, GroundProbe,
    JumpIntent, LayerMask, LocomotionConfig, LocomotionState, MoveInput, PursuitConfig,
    PursuitTarget, StaticColliderWorld,
};

fn main() {
    println!("Starting DUSKRUN headless simulation");

    let mut app = create_headless_app();

    // Headless мир: большая сфера под полом = террейн, сфера впереди = стена
    app.insert_resource(CollisionWorld::new(
        StaticColliderWorld::default()
            .with_sphere(Vec3::new(0.0, -50.0, 0.0), 50.0, LayerMask::TERRAIN)
            .with_sphere(Vec3::new(0.0, 0.5, 30.0), 1.0, LayerMask::OBSTACLE),
    ));

    app.add_systems(Startup, setup_scene);
    app.add_systems(Update, demo_input);

    for tick in 0..600 {
        app.update();

        if tick == 180 {
            // Внешняя точка входа Jump
            let players: Vec<Entity> = collect_players(&mut app);
            for entity in players {
                app.world_mut().send_event(JumpIntent { entity });
            }
        }

        if tick == 300 {
            // Dash trigger edge
            let mut inputs = app.world_mut().query::<&mut MoveInput>();
            let world = app.world_mut();
            for mut input in inputs.iter_mut(world) {
                input.dash = true;
            }
        }

        if tick % 120 == 0 {
            let mut players = app
                .world_mut()
                .query::<(&Transform, &LocomotionState)>();
            for (transform, state) in players.iter(app.world()) {
                println!(
                    "tick {}: player at {:.2?}, grounded: {}",
                    tick, transform.translation, state.on_ground
                );
            }
        }
    }

    println!("Simulation complete!");
}

fn collect_players(app: &mut App) -> Vec<Entity> {
    let mut query = app
        .world_mut()
        .query_filtered::<Entity, With<LocomotionState>>();
    query.iter(app.world()).collect()
}

/// Спавн сцены: playable актор + преследующий его агент
fn setup_scene(mut commands: Commands) {
    let player = match spawn_locomotion_actor(
        &mut commands,
        Vec3::new(0.0, 0.1, 0.0),
        LocomotionConfig::default(),
        GroundProbe::default(),
    ) {
        Ok(entity) => entity,
        Err(err) => {
            duskrun_simulation::log_error(&format!("player spawn failed: {err}"));
            return;
        }
    };

    let agent = match spawn_pursuit_agent(
        &mut commands,
        Vec3::new(15.0, 0.1, 0.0),
        PursuitConfig {
            chase_distance: 20.0,
            standoff_distance: 1.5,
            sense_interval: 0.25,
        },
    ) {
        Ok(entity) => entity,
        Err(err) => {
            duskrun_simulation::log_error(&format!("agent spawn failed: {err}"));
            return;
        }
    };

    commands.entity(agent).insert(PursuitTarget(Some(player)));
}

/// Демо-ввод: стик вперёд
fn demo_input(mut query: Query<&mut MoveInput>) {
    for mut input in query.iter_mut() {
        input.axes = Vec2::new(0.0, 1.0);
    }
}
