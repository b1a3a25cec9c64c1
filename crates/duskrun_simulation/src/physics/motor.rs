//! Character motor — порт movement/collision-resolution сервиса
//!
//! Архитектура:
//! - Поведенческие системы пишут запрошенное смещение в CharacterMotor (MoveBy)
//! - apply_character_motor применяет смещение напрямую к Transform (headless)
//! - sync_motor_to_rapier форвардит смещение в KinematicCharacterController,
//!   когда хост запускает полный Rapier plugin (collision resolution там)
//!
//! Хост регистрирует ровно один из двух вариантов применения.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::components::MoveInput;
use crate::locomotion::{DashState, GroundProbe, LocomotionConfig, LocomotionState};
use crate::physics::query::actor_collision_groups;
use crate::ConfigError;

/// Mailbox запрошенного смещения за кадр
///
/// Смещение уже промасштабировано на dt вызывающей стороной
/// (контракт MoveBy: "подвинь меня на этот вектор").
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct CharacterMotor {
    pending: Vec3,
}

impl CharacterMotor {
    /// Добавить смещение к запросу текущего кадра
    pub fn move_by(&mut self, displacement: Vec3) {
        self.pending += displacement;
    }

    /// Забрать накопленное смещение (сбрасывает mailbox)
    pub fn take(&mut self) -> Vec3 {
        std::mem::take(&mut self.pending)
    }

    /// Запрошенное, ещё не применённое смещение
    pub fn pending(&self) -> Vec3 {
        self.pending
    }
}

/// Система: прямое применение motor → Transform (headless режим, без Rapier)
pub fn apply_character_motor(mut query: Query<(&mut CharacterMotor, &mut Transform)>) {
    for (mut motor, mut transform) in query.iter_mut() {
        transform.translation += motor.take();
    }
}

/// Система: форвард motor → Rapier KinematicCharacterController
///
/// Не регистрируется по умолчанию — хост включает её вместо
/// apply_character_motor когда подключён RapierPhysicsPlugin.
pub fn sync_motor_to_rapier(
    mut query: Query<(&mut CharacterMotor, &mut KinematicCharacterController)>,
) {
    for (mut motor, mut controller) in query.iter_mut() {
        controller.translation = Some(motor.take());
    }
}

/// Spawn helper для playable актора с locomotion контроллером
///
/// Валидирует конфиг (fail fast при активации) и создаёт entity с полным
/// набором компонентов:
/// - Transform + motor + input
/// - LocomotionState/DashState (persistent состояние контроллера)
/// - Rapier: kinematic body + capsule collider + collision groups
pub fn spawn_locomotion_actor(
    commands: &mut Commands,
    position: Vec3,
    config: LocomotionConfig,
    probe: GroundProbe,
) -> Result<Entity, ConfigError> {
    config.validate()?;
    probe.validate()?;

    let entity = commands
        .spawn((
            Transform::from_translation(position),
            LocomotionState::new(&config),
            DashState::default(),
            MoveInput::default(),
            CharacterMotor::default(),
            config,
            probe,
            // Rapier physics (инертны без RapierPhysicsPlugin на хосте)
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(0.5, 0.4), // Высота 1.0m (0.5 + 0.5), радиус 0.4m
            KinematicCharacterController::default(),
            actor_collision_groups(),
        ))
        .id();

    Ok(entity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motor_accumulates_and_takes() {
        let mut motor = CharacterMotor::default();
        motor.move_by(Vec3::new(1.0, 0.0, 0.0));
        motor.move_by(Vec3::new(0.0, -2.0, 0.5));

        assert_eq!(motor.pending(), Vec3::new(1.0, -2.0, 0.5));
        assert_eq!(motor.take(), Vec3::new(1.0, -2.0, 0.5));
        assert_eq!(motor.pending(), Vec3::ZERO);
    }
}
