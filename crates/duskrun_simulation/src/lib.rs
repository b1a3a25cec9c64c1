//! DUSKRUN Simulation Core
//!
//! ECS-симуляция поведения персонажей на Bevy 0.16 (strategic layer):
//! - pursuit: автономный преследующий агент (chase/return + throttled sensing)
//! - locomotion: player-driven контроллер (движение, гравитация, прыжки, dash)
//!
//! HYBRID ARCHITECTURE:
//! - ECS = behavior state machines, решения, команды
//! - Хост-рантайм = rendering, pathfinding, полная физика, input devices
//!   (подключаются через порты: NavAgent, CollisionWorld, CharacterMotor,
//!   MoveInput/JumpIntent)

use bevy::prelude::*;
use thiserror::Error;

// Публичные модули
pub mod components;
pub mod locomotion;
pub mod logger;
pub mod physics;
pub mod pursuit;

// Re-export базовых типов для удобства
pub use components::*;
pub use locomotion::{
    DashBlocked, DashState, GroundProbe, LocomotionConfig, LocomotionPlugin, LocomotionState,
};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel,
    LogPrinter,
};
pub use physics::{
    spawn_locomotion_actor, CharacterMotor, CollisionQuery, CollisionWorld, LayerMask, RayHit,
    StaticColliderWorld,
};
pub use pursuit::{
    spawn_pursuit_agent, PursuitAgent, PursuitConfig, PursuitPlugin, PursuitTarget,
    VisibilityChanged,
};

/// Ошибка конфигурации контроллера
///
/// Единственный Result-фасад крейта: невалидный конфиг — setup fault,
/// репортится при активации (fail fast). Поведенческие отказы (нет цели,
/// заблокированный dash, исчерпанный бюджет прыжков) — тихие no-op.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must be within {min}..={max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("max_jump_count must be at least 1")]
    EmptyJumpBudget,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для physics tick (ground probe)
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Подсистемы
            .add_plugins((LocomotionPlugin, PursuitPlugin));
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins).add_plugins(SimulationPlugin);
    app
}
