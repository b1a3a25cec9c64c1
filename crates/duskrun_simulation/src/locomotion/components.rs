//! Locomotion компоненты: конфиг, persistent состояние, dash state machine

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::physics::LayerMask;
use crate::ConfigError;

/// Гравитационная константа (m/s²)
pub const GRAVITY: f32 = -9.8;

/// Tunable параметры locomotion контроллера
///
/// Передаются при активации актора явной validated структурой,
/// не ambient-глобалами. gravity_multiplier хранит configured значение;
/// живой множитель лежит в LocomotionState::gravity_scale (dash зануляет
/// и восстанавливает его).
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct LocomotionConfig {
    /// Скорость планарного движения (m/s)
    pub speed_move: f32,
    /// Скорость поворота к направлению движения (slerp rate, 1/s)
    pub speed_rotation: f32,
    /// Вертикальная скорость прыжка (m/s)
    pub jump_force: f32,
    /// Бюджет прыжков до приземления (1 = без air-jump)
    pub max_jump_count: u32,
    /// Нижний предел fall velocity на земле (contact damping, отрицательный)
    pub min_fall_velocity: f32,
    /// Множитель гравитации в воздухе, диапазон [0, 5] (0 = без гравитации)
    pub gravity_multiplier: f32,
    /// Дистанция dash (метры)
    pub dash_distance: f32,
    /// Длительность dash (секунды)
    pub dash_duration: f32,
    /// Cooldown после dash (секунды)
    pub dash_cooldown: f32,
    /// Слои, блокирующие dash (raycast на коммите)
    pub obstacle_mask: LayerMask,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            speed_move: 5.0,      // 5 m/s (средняя скорость ходьбы)
            speed_rotation: 10.0, // Быстрый, но заметный доворот
            jump_force: 3.0,
            max_jump_count: 1,
            min_fall_velocity: -2.0,
            gravity_multiplier: 1.0,
            dash_distance: 5.0,
            dash_duration: 2.0,
            dash_cooldown: 3.0,
            obstacle_mask: LayerMask::OBSTACLE,
        }
    }
}

impl LocomotionConfig {
    /// Проверка конфига при активации (fail fast: невалидный конфиг — setup fault)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.speed_move < 0.0 {
            return Err(ConfigError::Negative {
                field: "speed_move",
                value: self.speed_move,
            });
        }
        if self.speed_rotation < 0.0 {
            return Err(ConfigError::Negative {
                field: "speed_rotation",
                value: self.speed_rotation,
            });
        }
        if self.jump_force <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "jump_force",
                value: self.jump_force,
            });
        }
        if self.max_jump_count == 0 {
            return Err(ConfigError::EmptyJumpBudget);
        }
        if self.min_fall_velocity > 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "min_fall_velocity",
                value: self.min_fall_velocity,
                min: f32::NEG_INFINITY,
                max: 0.0,
            });
        }
        if !(0.0..=5.0).contains(&self.gravity_multiplier) {
            return Err(ConfigError::OutOfRange {
                field: "gravity_multiplier",
                value: self.gravity_multiplier,
                min: 0.0,
                max: 5.0,
            });
        }
        if self.dash_distance <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "dash_distance",
                value: self.dash_distance,
            });
        }
        if self.dash_duration <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "dash_duration",
                value: self.dash_duration,
            });
        }
        if self.dash_cooldown < 0.0 {
            return Err(ConfigError::Negative {
                field: "dash_cooldown",
                value: self.dash_cooldown,
            });
        }
        Ok(())
    }
}

/// Параметры ground probe (fixed-rate сферическая проба под ногами)
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct GroundProbe {
    /// Радиус пробной сферы (метры)
    pub radius: f32,
    /// Смещение пробы вниз от позиции актора (метры)
    pub check_distance: f32,
    /// Слои, игнорируемые пробой (обычно слой самих акторов)
    pub ignore_mask: LayerMask,
}

impl Default for GroundProbe {
    fn default() -> Self {
        Self {
            radius: 0.2,
            check_distance: 0.0,
            ignore_mask: LayerMask::ACTOR,
        }
    }
}

impl GroundProbe {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.radius <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "ground probe radius",
                value: self.radius,
            });
        }
        if self.check_distance < 0.0 {
            return Err(ConfigError::Negative {
                field: "ground probe check_distance",
                value: self.check_distance,
            });
        }
        Ok(())
    }
}

/// Persistent per-frame/per-tick состояние контроллера
///
/// Создаётся один раз при активации актора, живёт с entity.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct LocomotionState {
    /// Прыжков выполнено с последнего приземления
    pub jump_count: u32,
    /// На земле ли актор (пишется только ground probe и Jump)
    pub on_ground: bool,
    /// Текущая вертикальная скорость (m/s, отрицательная = падение)
    pub fall_velocity: f32,
    /// Живой множитель гравитации (0 во время dash, иначе configured)
    pub gravity_scale: f32,
}

impl Default for LocomotionState {
    fn default() -> Self {
        Self {
            jump_count: 0,
            on_ground: false,
            fall_velocity: 0.0,
            gravity_scale: 1.0,
        }
    }
}

impl LocomotionState {
    pub fn new(config: &LocomotionConfig) -> Self {
        Self {
            jump_count: 0,
            on_ground: false,
            fall_velocity: 0.0,
            gravity_scale: config.gravity_multiplier,
        }
    }
}

/// Dash duty cycle: Ready → Active → Cooldown → Ready
///
/// Каждая точка ожидания — явное инспектируемое состояние с таймером.
/// Инвариант: одновременно активен максимум один dash (enum исключает
/// второй Active по построению); повторный триггер невозможен пока
/// состояние не Ready.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub enum DashState {
    /// Готов к триггеру
    Ready,

    /// Dash выполняется: движение с постоянной скоростью по направлению,
    /// зафиксированному на коммите (не обновляется при повороте)
    Active {
        direction: Vec3,
        speed: f32,
        elapsed: f32,
    },

    /// Восстановление после dash (движения нет, триггер закрыт)
    Cooldown { remaining: f32 },
}

impl Default for DashState {
    fn default() -> Self {
        Self::Ready
    }
}

impl DashState {
    /// isDashing: движение сейчас контролирует dash
    pub fn is_active(&self) -> bool {
        matches!(self, DashState::Active { .. })
    }

    /// canDash: duty cycle пройден, триггер открыт
    pub fn is_ready(&self) -> bool {
        matches!(self, DashState::Ready)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(LocomotionConfig::default().validate().is_ok());
        assert!(GroundProbe::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let mut config = LocomotionConfig::default();
        config.dash_duration = 0.0;
        assert!(config.validate().is_err());

        let mut config = LocomotionConfig::default();
        config.max_jump_count = 0;
        assert!(config.validate().is_err());

        let mut config = LocomotionConfig::default();
        config.gravity_multiplier = 6.0;
        assert!(config.validate().is_err());

        let probe = GroundProbe {
            radius: 0.0,
            ..Default::default()
        };
        assert!(probe.validate().is_err());
    }

    #[test]
    fn test_dash_state_flags() {
        assert!(DashState::Ready.is_ready());
        assert!(!DashState::Ready.is_active());

        let active = DashState::Active {
            direction: Vec3::Z,
            speed: 2.5,
            elapsed: 0.0,
        };
        assert!(active.is_active());
        assert!(!active.is_ready());

        let cooldown = DashState::Cooldown { remaining: 1.0 };
        assert!(!cooldown.is_active());
        assert!(!cooldown.is_ready());
    }
}
