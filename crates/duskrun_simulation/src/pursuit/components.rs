//! Pursuit agent компоненты

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Tunable параметры pursuit агента
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct PursuitConfig {
    /// Радиус обнаружения цели (метры): in range при distance ≤ chase_distance
    pub chase_distance: f32,
    /// Standoff радиус: агент останавливается в пределах этой дистанции
    pub standoff_distance: f32,
    /// Период sensing задачи (секунды)
    pub sense_interval: f32,
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self {
            chase_distance: 0.5,
            standoff_distance: 1.5,
            sense_interval: 0.25,
        }
    }
}

impl PursuitConfig {
    /// Проверка конфига при активации (fail fast)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chase_distance <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "chase_distance",
                value: self.chase_distance,
            });
        }
        if self.standoff_distance <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "standoff_distance",
                value: self.standoff_distance,
            });
        }
        if self.sense_interval <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "sense_interval",
                value: self.sense_interval,
            });
        }
        Ok(())
    }
}

/// Persistent состояние pursuit агента
///
/// Инвариант: in_range пишет только периодическая sensing система;
/// per-frame управление его лишь читает.
#[derive(Component, Debug, Clone)]
pub struct PursuitAgent {
    /// Home позиция, захваченная при активации (далее неизменна)
    pub home: Vec3,
    /// Latched результат последнего sense
    pub in_range: bool,
    /// Осталось до следующей активации sensing (секунды)
    pub sense_timer: f32,
}

impl PursuitAgent {
    /// Активация агента: захват home позиции, первый sense — немедленно
    pub fn new(home: Vec3) -> Self {
        Self {
            home,
            in_range: false,
            sense_timer: 0.0,
        }
    }
}

/// Внешняя отслеживаемая цель (nullable, переназначается в любой момент)
///
/// None → агент ничего не делает. Despawned entity эквивалентен None
/// (lookup молча фейлится).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PursuitTarget(pub Option<Entity>);
