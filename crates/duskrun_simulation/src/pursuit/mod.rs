//! Pursuit agent module
//!
//! Автономный преследующий агент: range-gated chase/return решение на
//! низкочастотном sensing + frame-accurate standoff/chase управление.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

// Re-export основных типов
pub use components::{PursuitAgent, PursuitConfig, PursuitTarget};
pub use events::VisibilityChanged;
pub use systems::{
    apply_visibility_hints, chase_control, chase_step, sense_step, sense_targets, sense_tick,
    spawn_pursuit_agent,
};

/// Pursuit Plugin
///
/// Порядок выполнения:
/// 1. sense_targets — периодический sense (latch in_range, return home)
/// 2. chase_control — per-frame standoff/chase команды
/// 3. apply_visibility_hints — avoidance quality от visibility событий
pub struct PursuitPlugin;

impl Plugin for PursuitPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<VisibilityChanged>().add_systems(
            Update,
            (sense_targets, chase_control, apply_visibility_hints).chain(),
        );
    }
}
