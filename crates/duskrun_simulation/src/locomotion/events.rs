//! Locomotion events

use bevy::prelude::*;

/// Event: dash отклонён obstacle проверкой на коммите
///
/// Диагностика для telemetry/debugging: наблюдаемое событие,
/// не исключение. Frame loop не прерывается.
#[derive(Event, Debug, Clone)]
pub struct DashBlocked {
    pub entity: Entity,
    /// Дистанция до блокирующего препятствия (метры)
    pub distance: f32,
}
