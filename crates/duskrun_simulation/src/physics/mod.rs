//! Physics ports module
//!
//! Коллизии и перемещение через внешние сервисы (порты):
//! - query: spatial queries (sphere overlap, raycast) через CollisionQuery trait
//! - motor: collision-aware перемещение через CharacterMotor mailbox
//!
//! Крейт не реализует геометрию сам — headless реализация StaticColliderWorld
//! для тестов/демо, полный Rapier адаптер на стороне хоста.

pub mod motor;
pub mod query;

// Re-export основных типов
pub use motor::{
    apply_character_motor, spawn_locomotion_actor, sync_motor_to_rapier, CharacterMotor,
};
pub use query::{
    actor_collision_groups, CollisionQuery, CollisionWorld, LayerMask, RayHit, SphereCollider,
    StaticColliderWorld,
};
