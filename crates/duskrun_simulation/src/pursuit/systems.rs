//! Pursuit системы: периодический sensing + per-frame управление
//!
//! Sensing отвязан от кадрового управления: дистанционные проверки и смена
//! destination ограничены фиксированной частотой (sense_interval), а
//! близкие stop/chase решения остаются frame-accurate — они напрямую
//! влияют на воспринимаемую отзывчивость.
//!
//! Step-логика вынесена в чистые функции с явным dt (тесты без wall clock).

use bevy::prelude::*;

use crate::components::{AvoidanceQuality, NavAgent};
use crate::pursuit::{PursuitAgent, PursuitConfig, PursuitTarget, VisibilityChanged};
use crate::ConfigError;

/// Одна активация sensing задачи
///
/// Без цели — no-op (in_range сохраняет последнее значение). Иначе:
/// latch in_range по chase_distance; вне range — команда "домой", но только
/// если текущая destination отличается от home.
///
/// Сравнение destination с home — точное равенство значений; если
/// навигационный сервис округляет destination внутри себя, команда может
/// повторяться каждый период (известный edge case, семантика равенства —
/// на стороне сервиса).
pub fn sense_step(
    agent: &mut PursuitAgent,
    config: &PursuitConfig,
    position: Vec3,
    target: Option<Vec3>,
    nav: &mut NavAgent,
) {
    let Some(target_position) = target else {
        return;
    };

    let distance = position.distance(target_position);
    agent.in_range = distance <= config.chase_distance;

    if !agent.in_range && nav.current_destination() != Some(agent.home) {
        nav.set_destination(agent.home);
    }
}

/// Тик sensing таймера; активация по истечении периода
///
/// Возвращает true если sense сработал в этом тике.
pub fn sense_tick(
    agent: &mut PursuitAgent,
    config: &PursuitConfig,
    position: Vec3,
    target: Option<Vec3>,
    nav: &mut NavAgent,
    dt: f32,
) -> bool {
    agent.sense_timer -= dt;
    if agent.sense_timer > 0.0 {
        return false;
    }

    agent.sense_timer = config.sense_interval;
    sense_step(agent, config, position, target, nav);
    true
}

/// Один кадр pursuit управления
///
/// Вне range (или без цели) — no-op: агент держит destination, выставленную
/// sensing задачей. В range: живая дистанция каждый кадр; в пределах
/// standoff — stop/clear (позиция держится), иначе chase к текущей позиции
/// цели.
pub fn chase_step(
    agent: &PursuitAgent,
    config: &PursuitConfig,
    position: Vec3,
    target: Option<Vec3>,
    nav: &mut NavAgent,
) {
    if !agent.in_range {
        return;
    }
    let Some(target_position) = target else {
        return;
    };

    let distance = position.distance(target_position);

    if distance <= config.standoff_distance {
        // Достаточно близко — стоим (повторный reset не спамим)
        if nav.current_destination().is_some() {
            nav.reset_path();
        }
    } else {
        // Frame-accurate преследование живой позиции цели
        nav.set_destination(target_position);
    }
}

/// Позиция цели, если она задана и всё ещё существует
fn target_position(target: &PursuitTarget, transforms: &Query<&Transform>) -> Option<Vec3> {
    let entity = target.0?;
    transforms.get(entity).ok().map(|t| t.translation)
}

/// Система: периодический sensing (low-frequency задача)
pub fn sense_targets(
    mut agents: Query<(
        &mut PursuitAgent,
        &PursuitConfig,
        &Transform,
        &PursuitTarget,
        &mut NavAgent,
    )>,
    transforms: Query<&Transform>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    for (mut agent, config, transform, target, mut nav) in agents.iter_mut() {
        let target_pos = target_position(target, &transforms);
        sense_tick(
            &mut agent,
            config,
            transform.translation,
            target_pos,
            &mut nav,
            dt,
        );
    }
}

/// Система: per-frame pursuit управление
pub fn chase_control(
    mut agents: Query<(
        &PursuitAgent,
        &PursuitConfig,
        &Transform,
        &PursuitTarget,
        &mut NavAgent,
    )>,
    transforms: Query<&Transform>,
) {
    for (agent, config, transform, target, mut nav) in agents.iter_mut() {
        let target_pos = target_position(target, &transforms);
        chase_step(agent, config, transform.translation, target_pos, &mut nav);
    }
}

/// Система: visibility сигналы → avoidance quality hint
pub fn apply_visibility_hints(
    mut events: EventReader<VisibilityChanged>,
    mut agents: Query<&mut NavAgent>,
) {
    for event in events.read() {
        let Ok(mut nav) = agents.get_mut(event.entity) else {
            continue;
        };
        nav.avoidance = if event.visible {
            AvoidanceQuality::Medium
        } else {
            AvoidanceQuality::Low
        };
    }
}

/// Spawn helper для pursuit агента
///
/// Активация: валидация конфига (fail fast), захват home = стартовая
/// позиция, avoidance hint Medium, цель изначально не задана.
/// Деактивация = despawn: таймеры живут в компонентах и умирают вместе
/// с entity — осиротевшей периодики не бывает.
pub fn spawn_pursuit_agent(
    commands: &mut Commands,
    position: Vec3,
    config: PursuitConfig,
) -> Result<Entity, ConfigError> {
    config.validate()?;

    let entity = commands
        .spawn((
            Transform::from_translation(position),
            PursuitAgent::new(position),
            PursuitTarget::default(),
            NavAgent::default(),
            config,
        ))
        .id();

    Ok(entity)
}
