//! Navigation порт: command mailbox для внешнего pathfinding сервиса
//!
//! Архитектура:
//! - ECS системы пишут команды через set_destination/reset_path (high-level intent)
//! - Хост-адаптер читает NavAgent и конвертирует в свой NavigationAgent target
//! - Pathfinding/steering крейт не реализует

use bevy::prelude::*;

/// Качество obstacle avoidance навигационного агента
///
/// Чисто performance hint: выше когда актор видим камерой, ниже когда нет.
/// На поведение не влияет.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AvoidanceQuality {
    Low,
    #[default]
    Medium,
    High,
}

/// Command mailbox навигационного сервиса
///
/// destination намеренно приватна: команды идут только через методы,
/// каждая команда инкрементит revision — хост детектит выдачу команд
/// без per-frame поллинга (и без спама одинаковыми командами).
#[derive(Component, Debug, Clone, PartialEq)]
pub struct NavAgent {
    destination: Option<Vec3>,
    revision: u32,
    /// Avoidance quality hint (обновляется visibility событиями)
    pub avoidance: AvoidanceQuality,
}

impl Default for NavAgent {
    fn default() -> Self {
        Self {
            destination: None,
            revision: 0,
            avoidance: AvoidanceQuality::Medium, // Выставляется при активации
        }
    }
}

impl NavAgent {
    /// SetDestination: навигировать к позиции (world coordinates)
    pub fn set_destination(&mut self, position: Vec3) {
        self.destination = Some(position);
        self.revision = self.revision.wrapping_add(1);
    }

    /// ResetPath: остановиться и сбросить текущий путь
    pub fn reset_path(&mut self) {
        self.destination = None;
        self.revision = self.revision.wrapping_add(1);
    }

    /// CurrentDestination: текущая цель (None после reset_path)
    pub fn current_destination(&self) -> Option<Vec3> {
        self.destination
    }

    /// Счётчик выданных команд (детект выдачи для хоста и тестов)
    pub fn revision(&self) -> u32 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_agent_commands_bump_revision() {
        let mut nav = NavAgent::default();
        assert_eq!(nav.revision(), 0);
        assert_eq!(nav.current_destination(), None);

        nav.set_destination(Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(nav.revision(), 1);
        assert_eq!(nav.current_destination(), Some(Vec3::new(1.0, 0.0, 2.0)));

        nav.reset_path();
        assert_eq!(nav.revision(), 2);
        assert_eq!(nav.current_destination(), None);
    }
}
