//! ECS Components module
//!
//! Pure data: every component here is plain state, all behaviour lives in
//! the systems.

pub mod camera_focus;
pub mod collision;
pub mod delivery_zone;
pub mod graphics;
pub mod movement;
pub mod particle_spawner;
pub mod point_light;
pub mod position;

pub use camera_focus::CameraFocus;
pub use collision::{BoundingBox, Collision, MeshCollision};
pub use delivery_zone::DeliveryZone;
pub use graphics::Graphics;
pub use movement::{Movement, DEFAULT_ACCELERATION, GRAVITY};
pub use particle_spawner::ParticleSpawner;
pub use point_light::PointLight;
pub use position::Position;
