//! Spatial query порт (physics/collision service)
//!
//! Контракт из внешнего мира:
//! - SphereOverlap(center, radius, mask) -> bool
//! - Raycast(origin, direction, max_distance, mask) -> Option<RayHit>
//!
//! Реализации:
//! - StaticColliderWorld: headless набор сфер (тесты, демо-бинарь)
//! - Хост с полным Rapier подключает свой адаптер через CollisionWorld resource

use bevy::prelude::*;
use bevy_rapier3d::prelude::{CollisionGroups, Group};
use serde::{Deserialize, Serialize};

/// Engine-agnostic collision layer mask (битовая маска слоёв)
///
/// Конвертируется в rapier Group на стыке со спавном коллайдеров.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Слой акторов (персонажи, NPC)
    pub const ACTOR: LayerMask = LayerMask(1 << 0);
    /// Слой террейна (пол, рельеф)
    pub const TERRAIN: LayerMask = LayerMask(1 << 1);
    /// Слой препятствий (стены, блокирующие dash объекты)
    pub const OBSTACLE: LayerMask = LayerMask(1 << 2);

    /// Есть ли общие слои у двух масок
    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    /// Инверсия маски (аналог ~ignoreLayer)
    pub fn inverted(self) -> LayerMask {
        LayerMask(!self.0)
    }
}

impl std::ops::BitOr for LayerMask {
    type Output = LayerMask;

    fn bitor(self, rhs: LayerMask) -> LayerMask {
        LayerMask(self.0 | rhs.0)
    }
}

impl From<LayerMask> for Group {
    fn from(mask: LayerMask) -> Group {
        Group::from_bits_truncate(mask.0)
    }
}

/// Collision groups для kinematic акторов (membership = ACTOR, коллайдят со всеми)
pub fn actor_collision_groups() -> CollisionGroups {
    CollisionGroups::new(LayerMask::ACTOR.into(), Group::ALL)
}

/// Результат raycast запроса
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Дистанция от origin до точки попадания (метры)
    pub distance: f32,
    /// Точка попадания (world coordinates)
    pub point: Vec3,
}

/// Порт spatial queries: крейт задаёт вопросы, геометрию держит реализация
pub trait CollisionQuery: Send + Sync {
    /// Пересекает ли сфера любую геометрию на слоях mask
    fn sphere_overlap(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool;

    /// Ближайшее попадание луча в геометрию на слоях mask (в пределах max_distance)
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit>;
}

/// Resource-обёртка над активной реализацией CollisionQuery
///
/// По умолчанию — пустой мир (overlap false, raycast None): все проверки
/// деградируют в no-op, симуляция не падает без физики.
#[derive(Resource)]
pub struct CollisionWorld(pub Box<dyn CollisionQuery>);

impl CollisionWorld {
    pub fn new(query: impl CollisionQuery + 'static) -> Self {
        Self(Box::new(query))
    }
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new(StaticColliderWorld::default())
    }
}

/// Статический сферический коллайдер (headless мир)
#[derive(Debug, Clone, Copy)]
pub struct SphereCollider {
    pub center: Vec3,
    pub radius: f32,
    pub layers: LayerMask,
}

/// Headless реализация CollisionQuery: набор статических сфер
///
/// Замена физическому движку в headless режиме (тесты, демо):
/// большая сфера под полом = террейн, маленькие сферы = препятствия.
#[derive(Debug, Clone, Default)]
pub struct StaticColliderWorld {
    colliders: Vec<SphereCollider>,
}

impl StaticColliderWorld {
    pub fn with_sphere(mut self, center: Vec3, radius: f32, layers: LayerMask) -> Self {
        self.colliders.push(SphereCollider {
            center,
            radius,
            layers,
        });
        self
    }
}

impl CollisionQuery for StaticColliderWorld {
    fn sphere_overlap(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool {
        self.colliders.iter().any(|collider| {
            collider.layers.intersects(mask)
                && collider.center.distance(center) <= collider.radius + radius
        })
    }

    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        let mut nearest: Option<RayHit> = None;

        for collider in &self.colliders {
            if !collider.layers.intersects(mask) {
                continue;
            }

            // Ray-sphere intersection: |origin + t*d - center| = radius
            let oc = origin - collider.center;
            let b = oc.dot(direction);
            let c = oc.length_squared() - collider.radius * collider.radius;
            let discriminant = b * b - c;

            if discriminant < 0.0 {
                continue;
            }

            let sqrt_d = discriminant.sqrt();
            let mut t = -b - sqrt_d;
            if t < 0.0 {
                // Origin внутри сферы — берём выходную точку
                t = -b + sqrt_d;
            }

            if t < 0.0 || t > max_distance {
                continue;
            }

            if nearest.map(|hit| t < hit.distance).unwrap_or(true) {
                nearest = Some(RayHit {
                    distance: t,
                    point: origin + direction * t,
                });
            }
        }

        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_mask_intersects() {
        assert!(LayerMask::ALL.intersects(LayerMask::OBSTACLE));
        assert!(!LayerMask::TERRAIN.intersects(LayerMask::OBSTACLE));
        assert!((LayerMask::TERRAIN | LayerMask::OBSTACLE).intersects(LayerMask::OBSTACLE));
        assert!(!LayerMask::ACTOR.inverted().intersects(LayerMask::ACTOR));
    }

    #[test]
    fn test_sphere_overlap() {
        let world = StaticColliderWorld::default().with_sphere(
            Vec3::new(0.0, -1.0, 0.0),
            1.0,
            LayerMask::TERRAIN,
        );

        // Проба у пола пересекает террейн
        assert!(world.sphere_overlap(Vec3::new(0.0, 0.1, 0.0), 0.2, LayerMask::ALL));
        // Маска без террейна — пересечения нет
        assert!(!world.sphere_overlap(Vec3::new(0.0, 0.1, 0.0), 0.2, LayerMask::OBSTACLE));
        // Слишком высоко — пересечения нет
        assert!(!world.sphere_overlap(Vec3::new(0.0, 2.0, 0.0), 0.2, LayerMask::ALL));
    }

    #[test]
    fn test_raycast_hits_nearest() {
        let world = StaticColliderWorld::default()
            .with_sphere(Vec3::new(0.0, 0.0, 5.0), 1.0, LayerMask::OBSTACLE)
            .with_sphere(Vec3::new(0.0, 0.0, 3.0), 0.5, LayerMask::OBSTACLE);

        let hit = world
            .raycast(Vec3::ZERO, Vec3::Z, 10.0, LayerMask::OBSTACLE)
            .expect("ray should hit");

        // Ближайшая сфера: центр z=3, радиус 0.5 → попадание на z=2.5
        assert!((hit.distance - 2.5).abs() < 1e-4);
        assert!((hit.point.z - 2.5).abs() < 1e-4);
    }

    #[test]
    fn test_raycast_respects_max_distance_and_mask() {
        let world =
            StaticColliderWorld::default().with_sphere(Vec3::new(0.0, 0.0, 5.0), 1.0, LayerMask::OBSTACLE);

        assert!(world.raycast(Vec3::ZERO, Vec3::Z, 3.0, LayerMask::OBSTACLE).is_none());
        assert!(world.raycast(Vec3::ZERO, Vec3::Z, 10.0, LayerMask::TERRAIN).is_none());
        assert!(world.raycast(Vec3::ZERO, Vec3::Z, 10.0, LayerMask::OBSTACLE).is_some());
    }
}
