//! Locomotion системы: per-frame state machine + fixed-rate ground probe
//!
//! Per-frame update — две взаимоисключающие ветки по DashState:
//! - normal: планарный input + slerp поворот + гравитация → motor
//! - dash: движением владеет dash state machine (drive_dash)
//!
//! Step-логика вынесена в чистые функции с явным dt — системы лишь
//! обвязка над Query/Time (тестируемость без wall clock).

use bevy::prelude::*;

use crate::components::{JumpIntent, MoveInput};
use crate::locomotion::{
    DashBlocked, DashState, GroundProbe, LocomotionConfig, LocomotionState, GRAVITY,
};
use crate::physics::{CharacterMotor, CollisionQuery, CollisionWorld};

/// Планарное направление из осей стика (нормализованное, ноль без ввода)
pub fn planar_direction(axes: Vec2) -> Vec3 {
    Vec3::new(axes.x, 0.0, axes.y).normalize_or_zero()
}

/// Доворот к направлению движения
///
/// Frame-proportional slerp: фактор = speed_rotation * dt с насыщением на 1
/// (фактор ≥ 1 — мгновенный доворот, не экстраполяция).
pub fn rotate_towards(transform: &mut Transform, direction: Vec3, speed_rotation: f32, dt: f32) {
    if direction == Vec3::ZERO {
        return;
    }
    let target = Transform::default().looking_to(direction, Vec3::Y).rotation;
    let factor = (speed_rotation * dt).min(1.0);
    transform.rotation = transform.rotation.slerp(target, factor);
}

/// Интеграция вертикальной скорости
///
/// На земле fall velocity зажата снизу min_fall_velocity (contact damping,
/// не копим скорость бесконечно). В воздухе — неограниченное накопление
/// с живым множителем gravity_scale (0 во время dash).
pub fn integrate_vertical(state: &mut LocomotionState, config: &LocomotionConfig, dt: f32) {
    if state.on_ground {
        state.fall_velocity = (state.fall_velocity + GRAVITY * dt).max(config.min_fall_velocity);
    } else {
        state.fall_velocity += GRAVITY * state.gravity_scale * dt;
    }
}

/// Один кадр normal ветки: поворот + гравитация + составное смещение → motor
///
/// Итоговое смещение: планарное направление * speed_move, вертикаль
/// замещается fall_velocity; в motor уходит displacement * dt.
pub fn locomotion_step(
    transform: &mut Transform,
    state: &mut LocomotionState,
    config: &LocomotionConfig,
    axes: Vec2,
    motor: &mut CharacterMotor,
    dt: f32,
) {
    let direction = planar_direction(axes);
    rotate_towards(transform, direction, config.speed_rotation, dt);
    integrate_vertical(state, config, dt);

    let mut displacement = direction * config.speed_move;
    displacement.y = state.fall_velocity;
    motor.move_by(displacement * dt);
}

/// Система: per-frame locomotion update (normal ветка)
///
/// Во время dash ветка скипается целиком — позицию ведёт только dash.
pub fn drive_locomotion(
    mut query: Query<(
        &mut Transform,
        &mut LocomotionState,
        &LocomotionConfig,
        &DashState,
        &MoveInput,
        &mut CharacterMotor,
    )>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    for (mut transform, mut state, config, dash, input, mut motor) in query.iter_mut() {
        if dash.is_active() {
            continue;
        }
        locomotion_step(&mut transform, &mut state, config, input.axes, &mut motor, dt);
    }
}

/// Исход попытки dash
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashAttempt {
    /// Dash закоммичен, состояние Active
    Started,
    /// Препятствие в пределах dash_distance — отказ без изменения состояния
    Blocked { distance: f32 },
    /// Уже в dash или в cooldown — тихий no-op
    NotReady,
}

/// TryDash: гейт по duty cycle + однократная obstacle проверка на коммите
///
/// Raycast из текущей позиции по текущему forward на dash_distance против
/// obstacle_mask. Проверка выполняется один раз — в полёте не перепроверяется.
/// Направление и скорость (dash_distance / dash_duration) фиксируются здесь.
pub fn try_start_dash(
    transform: &Transform,
    config: &LocomotionConfig,
    dash: &mut DashState,
    state: &mut LocomotionState,
    collision: &dyn CollisionQuery,
) -> DashAttempt {
    if !dash.is_ready() {
        return DashAttempt::NotReady;
    }

    let forward = *transform.forward();
    if let Some(hit) = collision.raycast(
        transform.translation,
        forward,
        config.dash_distance,
        config.obstacle_mask,
    ) {
        return DashAttempt::Blocked {
            distance: hit.distance,
        };
    }

    *dash = DashState::Active {
        direction: forward,
        speed: config.dash_distance / config.dash_duration,
        elapsed: 0.0,
    };
    // Гравитация нейтральна на всё время dash
    state.gravity_scale = 0.0;

    DashAttempt::Started
}

/// Система: dash trigger по input edge
pub fn trigger_dash(
    mut query: Query<(
        Entity,
        &Transform,
        &LocomotionConfig,
        &mut DashState,
        &mut LocomotionState,
        &mut MoveInput,
    )>,
    collision: Res<CollisionWorld>,
    mut blocked_events: EventWriter<DashBlocked>,
) {
    for (entity, transform, config, mut dash, mut state, mut input) in query.iter_mut() {
        if !input.take_dash() {
            continue;
        }

        match try_start_dash(transform, config, &mut dash, &mut state, collision.0.as_ref()) {
            DashAttempt::Started => {
                crate::log(&format!("dash: {entity:?} started"));
            }
            DashAttempt::Blocked { distance } => {
                crate::log_warning(&format!(
                    "dash: {entity:?} blocked by obstacle at {distance:.2}m"
                ));
                blocked_events.write(DashBlocked { entity, distance });
            }
            DashAttempt::NotReady => {}
        }
    }
}

/// Один кадр dash state machine
///
/// Active: движение с зафиксированными direction/speed, учёт elapsed;
/// по истечении dash_duration восстанавливается configured gravity
/// multiplier и начинается cooldown. Cooldown: тикает remaining, по нулю
/// duty cycle открывается (Ready).
pub fn dash_step(
    dash: &mut DashState,
    state: &mut LocomotionState,
    config: &LocomotionConfig,
    motor: &mut CharacterMotor,
    dt: f32,
) {
    match dash {
        DashState::Ready => {}

        DashState::Active {
            direction,
            speed,
            elapsed,
        } => {
            motor.move_by(*direction * *speed * dt);
            *elapsed += dt;

            if *elapsed >= config.dash_duration {
                state.gravity_scale = config.gravity_multiplier;
                *dash = DashState::Cooldown {
                    remaining: config.dash_cooldown,
                };
            }
        }

        DashState::Cooldown { remaining } => {
            *remaining -= dt;
            if *remaining <= 0.0 {
                *dash = DashState::Ready;
            }
        }
    }
}

/// Система: ведение активного dash + тик cooldown
pub fn drive_dash(
    mut query: Query<(
        &mut DashState,
        &mut LocomotionState,
        &LocomotionConfig,
        &mut CharacterMotor,
    )>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    for (mut dash, mut state, config, mut motor) in query.iter_mut() {
        dash_step(&mut dash, &mut state, config, &mut motor, dt);
    }
}

/// Jump: grounded → первый прыжок, airborne → air-jump пока есть бюджет
///
/// No-op во время dash и при исчерпанном бюджете. Возвращает true если
/// прыжок выполнен.
pub fn apply_jump(state: &mut LocomotionState, config: &LocomotionConfig, dashing: bool) -> bool {
    if dashing {
        return false;
    }

    if state.on_ground {
        state.on_ground = false;
        state.jump_count = 1;
        state.fall_velocity = config.jump_force;
        true
    } else if state.jump_count < config.max_jump_count {
        state.jump_count += 1;
        state.fall_velocity = config.jump_force;
        true
    } else {
        false
    }
}

/// Система: обработка JumpIntent событий (внешняя точка входа Jump)
pub fn apply_jump_intents(
    mut events: EventReader<JumpIntent>,
    mut query: Query<(&mut LocomotionState, &LocomotionConfig, &DashState)>,
) {
    for event in events.read() {
        let Ok((mut state, config, dash)) = query.get_mut(event.entity) else {
            continue;
        };
        apply_jump(&mut state, config, dash.is_active());
    }
}

/// Система: ground probe (FixedUpdate, независимая от frame rate частота)
///
/// Проба — сфера radius на check_distance ниже позиции актора против всей
/// геометрии вне ignore_mask. Результат кэшируется в LocomotionState и
/// читается кадровыми системами (staleness ≤ один physics tick).
pub fn ground_probe(
    mut query: Query<(&Transform, &GroundProbe, &mut LocomotionState)>,
    collision: Res<CollisionWorld>,
) {
    for (transform, probe, mut state) in query.iter_mut() {
        let foot = transform.translation + Vec3::NEG_Y * probe.check_distance;
        state.on_ground = collision
            .0
            .sphere_overlap(foot, probe.radius, probe.ignore_mask.inverted());
    }
}
