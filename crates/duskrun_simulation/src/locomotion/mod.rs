//! Locomotion controller module
//!
//! Player-driven контроллер движения: планарное движение + гравитация +
//! прыжки + dash override (per-frame state machine).

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

// Re-export основных типов
pub use components::{DashState, GroundProbe, LocomotionConfig, LocomotionState, GRAVITY};
pub use events::DashBlocked;
pub use systems::{
    apply_jump, apply_jump_intents, dash_step, drive_dash, drive_locomotion, ground_probe,
    integrate_vertical, locomotion_step, planar_direction, rotate_towards, trigger_dash,
    try_start_dash, DashAttempt,
};

use crate::components::JumpIntent;
use crate::physics::{apply_character_motor, CollisionWorld};

/// Locomotion Plugin
///
/// Per-frame цепочка (порядок как в исходном контроллере):
/// 1. apply_jump_intents — внешние Jump вызовы до интеграции
/// 2. drive_locomotion — normal ветка (скип во время dash)
/// 3. trigger_dash — input edge + гейт + obstacle проверка
/// 4. drive_dash — движение dash / тик cooldown (с кадра коммита)
/// 5. apply_character_motor — применение накопленного смещения
///
/// Ground probe — отдельно в FixedUpdate (детерминизм collision sampling).
pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<JumpIntent>()
            .add_event::<DashBlocked>()
            .init_resource::<CollisionWorld>()
            .add_systems(
                Update,
                (
                    apply_jump_intents,
                    drive_locomotion,
                    trigger_dash,
                    drive_dash,
                    apply_character_motor,
                )
                    .chain(), // Последовательное выполнение
            )
            .add_systems(FixedUpdate, ground_probe);
    }
}
