//! Input порт: значения от внешнего input сервиса
//!
//! Крейт не опрашивает устройства. Хост (джойстик, клавиатура, UI кнопки)
//! пишет MoveInput каждый кадр и шлёт JumpIntent события.

use bevy::prelude::*;

/// Двухосевой directional input + dash trigger
///
/// axes ∈ [-1,1]×[-1,1] (x = горизонталь, y = вертикаль стика).
/// dash — edge flag: хост ставит true на нажатие, trigger система
/// потребляет его (без буферизации — пропущенный edge теряется).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct MoveInput {
    pub axes: Vec2,
    pub dash: bool,
}

impl MoveInput {
    /// Забрать dash edge (сбрасывает флаг)
    pub fn take_dash(&mut self) -> bool {
        std::mem::take(&mut self.dash)
    }
}

/// Event: намерение прыгнуть (внешняя точка входа Jump)
///
/// Генерируется хостом (UI кнопка, key binding). Обрабатывается
/// apply_jump_intents: no-op во время dash и при исчерпанном бюджете прыжков.
#[derive(Event, Debug, Clone)]
pub struct JumpIntent {
    pub entity: Entity,
}
