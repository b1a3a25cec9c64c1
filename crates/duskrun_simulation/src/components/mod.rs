//! ECS Components — порты внешних сервисов
//!
//! Организация по доменам:
//! - navigation: команды навигационному сервису (NavAgent mailbox)
//! - input: значения input сервиса (MoveInput, JumpIntent)

pub mod input;
pub mod navigation;

// Re-exports для удобного импорта
pub use input::*;
pub use navigation::*;
