//! Pursuit events — visibility сигналы от хоста

use bevy::prelude::*;

/// Event: актор вошёл/вышел из frustum активной камеры
///
/// Advisory сигнал: регулирует только avoidance quality hint навигации
/// (выше когда видим, ниже когда нет). На поведение не влияет.
#[derive(Event, Debug, Clone)]
pub struct VisibilityChanged {
    pub entity: Entity,
    pub visible: bool,
}
