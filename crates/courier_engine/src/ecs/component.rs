//! Component kinds, kind sets and the closed component sum type
//!
//! The kind tags are an identity contract shared with anything that stores
//! or transmits component references: new kinds are appended with the next
//! free tag, existing tags never change.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::components::{
    BoundingBox, CameraFocus, Collision, DeliveryZone, Graphics, MeshCollision, Movement,
    ParticleSpawner, PointLight, Position,
};
use super::error::EcsError;
use super::registry::ComponentRegistry;
use super::storage::ComponentStore;

/// Stable component kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum ComponentKind {
    /// Axis-aligned collision box
    BoundingBox = 0,
    /// Camera target offset
    CameraFocus = 1,
    /// Collider flags
    Collision = 2,
    /// Renderer drawable reference
    Graphics = 3,
    /// Triangle mesh collider
    MeshCollision = 4,
    /// Euler-integrated motion
    Movement = 5,
    /// Countdown-driven particle emission
    ParticleSpawner = 6,
    /// Point light reference
    PointLight = 7,
    /// Spatial state
    Position = 8,
    /// Spatial state composed under a parent matrix
    PositionParent = 9,
    /// One-shot delivery trigger
    DeliveryZone = 10,
}

impl ComponentKind {
    /// Every kind, in tag order
    pub const ALL: [Self; 11] = [
        Self::BoundingBox,
        Self::CameraFocus,
        Self::Collision,
        Self::Graphics,
        Self::MeshCollision,
        Self::Movement,
        Self::ParticleSpawner,
        Self::PointLight,
        Self::Position,
        Self::PositionParent,
        Self::DeliveryZone,
    ];

    /// Stable integer tag
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Single-kind set
    pub const fn flag(self) -> ComponentKinds {
        ComponentKinds::from_bits_retain(1 << self as u8)
    }

    /// Human readable name, used in logs and errors
    pub const fn name(self) -> &'static str {
        match self {
            Self::BoundingBox => "BoundingBox",
            Self::CameraFocus => "CameraFocus",
            Self::Collision => "Collision",
            Self::Graphics => "Graphics",
            Self::MeshCollision => "MeshCollision",
            Self::Movement => "Movement",
            Self::ParticleSpawner => "ParticleSpawner",
            Self::PointLight => "PointLight",
            Self::Position => "Position",
            Self::PositionParent => "PositionParent",
            Self::DeliveryZone => "DeliveryZone",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<ComponentKind> for u8 {
    fn from(kind: ComponentKind) -> Self {
        kind.tag()
    }
}

impl TryFrom<u8> for ComponentKind {
    type Error = EcsError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(tag as usize)
            .copied()
            .ok_or(EcsError::InvalidComponentTag(tag))
    }
}

bitflags! {
    /// Set of component kinds, one bit per tag
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ComponentKinds: u32 {
        /// [`ComponentKind::BoundingBox`]
        const BOUNDING_BOX = 1 << 0;
        /// [`ComponentKind::CameraFocus`]
        const CAMERA_FOCUS = 1 << 1;
        /// [`ComponentKind::Collision`]
        const COLLISION = 1 << 2;
        /// [`ComponentKind::Graphics`]
        const GRAPHICS = 1 << 3;
        /// [`ComponentKind::MeshCollision`]
        const MESH_COLLISION = 1 << 4;
        /// [`ComponentKind::Movement`]
        const MOVEMENT = 1 << 5;
        /// [`ComponentKind::ParticleSpawner`]
        const PARTICLE_SPAWNER = 1 << 6;
        /// [`ComponentKind::PointLight`]
        const POINT_LIGHT = 1 << 7;
        /// [`ComponentKind::Position`]
        const POSITION = 1 << 8;
        /// [`ComponentKind::PositionParent`]
        const POSITION_PARENT = 1 << 9;
        /// [`ComponentKind::DeliveryZone`]
        const DELIVERY_ZONE = 1 << 10;
    }
}

impl ComponentKinds {
    /// Iterate the kinds contained in this set, in tag order
    pub fn kinds(self) -> impl Iterator<Item = ComponentKind> {
        ComponentKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(kind.flag()))
    }
}

impl From<ComponentKind> for ComponentKinds {
    fn from(kind: ComponentKind) -> Self {
        kind.flag()
    }
}

impl FromIterator<ComponentKind> for ComponentKinds {
    fn from_iter<I: IntoIterator<Item = ComponentKind>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, kind| set | kind.flag())
    }
}

/// Closed sum type over every component shape
///
/// `PositionParent` has no variant of its own: it is a [`Position`] whose
/// `parent` matrix is set.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentData {
    /// See [`BoundingBox`]
    BoundingBox(BoundingBox),
    /// See [`CameraFocus`]
    CameraFocus(CameraFocus),
    /// See [`Collision`]
    Collision(Collision),
    /// See [`Graphics`]
    Graphics(Graphics),
    /// See [`MeshCollision`]
    MeshCollision(MeshCollision),
    /// See [`Movement`]
    Movement(Movement),
    /// See [`ParticleSpawner`]
    ParticleSpawner(ParticleSpawner),
    /// See [`PointLight`]
    PointLight(PointLight),
    /// See [`Position`]
    Position(Position),
    /// See [`DeliveryZone`]
    DeliveryZone(DeliveryZone),
}

impl ComponentData {
    /// Kind reported for this instance
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::BoundingBox(_) => ComponentKind::BoundingBox,
            Self::CameraFocus(_) => ComponentKind::CameraFocus,
            Self::Collision(_) => ComponentKind::Collision,
            Self::Graphics(_) => ComponentKind::Graphics,
            Self::MeshCollision(_) => ComponentKind::MeshCollision,
            Self::Movement(_) => ComponentKind::Movement,
            Self::ParticleSpawner(_) => ComponentKind::ParticleSpawner,
            Self::PointLight(_) => ComponentKind::PointLight,
            Self::Position(position) if position.parent.is_some() => ComponentKind::PositionParent,
            Self::Position(_) => ComponentKind::Position,
            Self::DeliveryZone(_) => ComponentKind::DeliveryZone,
        }
    }

    /// Kinds an entity owns once this instance is attached
    pub fn signature(&self) -> ComponentKinds {
        match self {
            Self::Position(position) if position.parent.is_some() => {
                ComponentKinds::POSITION | ComponentKinds::POSITION_PARENT
            }
            other => other.kind().flag(),
        }
    }

    /// Kind-specific default construction
    pub fn default_for(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::BoundingBox => BoundingBox::default().into(),
            ComponentKind::CameraFocus => CameraFocus::default().into(),
            ComponentKind::Collision => Collision::default().into(),
            ComponentKind::Graphics => Graphics::default().into(),
            ComponentKind::MeshCollision => MeshCollision::default().into(),
            ComponentKind::Movement => Movement::default().into(),
            ComponentKind::ParticleSpawner => ParticleSpawner::default().into(),
            ComponentKind::PointLight => PointLight::default().into(),
            ComponentKind::Position => Position::default().into(),
            ComponentKind::PositionParent => Position::default()
                .with_parent(crate::foundation::math::Mat4::identity())
                .into(),
            ComponentKind::DeliveryZone => DeliveryZone::default().into(),
        }
    }
}

/// Typed access to a kind's store
///
/// Implemented by every concrete component so callers can write
/// `world.get::<Movement>(entity)` instead of matching on [`ComponentData`].
pub trait Component: Sized + Into<ComponentData> + 'static {
    /// Store-level kind of this type
    const KIND: ComponentKind;

    /// Borrow this type's store
    fn store(registry: &ComponentRegistry) -> &ComponentStore<Self>;

    /// Mutably borrow this type's store
    fn store_mut(registry: &mut ComponentRegistry) -> &mut ComponentStore<Self>;
}

macro_rules! impl_component {
    ($ty:ident, $field:ident) => {
        impl Component for $ty {
            const KIND: ComponentKind = ComponentKind::$ty;

            fn store(registry: &ComponentRegistry) -> &ComponentStore<Self> {
                &registry.$field
            }

            fn store_mut(registry: &mut ComponentRegistry) -> &mut ComponentStore<Self> {
                &mut registry.$field
            }
        }

        impl From<$ty> for ComponentData {
            fn from(component: $ty) -> Self {
                Self::$ty(component)
            }
        }
    };
}

impl_component!(BoundingBox, bounding_boxes);
impl_component!(CameraFocus, camera_foci);
impl_component!(Collision, collisions);
impl_component!(Graphics, graphics);
impl_component!(MeshCollision, mesh_collisions);
impl_component!(Movement, movements);
impl_component!(ParticleSpawner, particle_spawners);
impl_component!(PointLight, point_lights);
impl_component!(Position, positions);
impl_component!(DeliveryZone, delivery_zones);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_stable() {
        let tags: Vec<u8> = ComponentKind::ALL.iter().map(|kind| kind.tag()).collect();
        assert_eq!(tags, (0..=10).collect::<Vec<u8>>());
        assert_eq!(ComponentKind::Position.tag(), 8);
        assert_eq!(ComponentKind::DeliveryZone.tag(), 10);
    }

    #[test]
    fn test_tag_round_trip_and_rejection() {
        for kind in ComponentKind::ALL {
            assert_eq!(ComponentKind::try_from(kind.tag()), Ok(kind));
        }
        assert_eq!(
            ComponentKind::try_from(11),
            Err(EcsError::InvalidComponentTag(11))
        );
    }

    #[test]
    fn test_kind_serializes_as_tag() {
        let encoded = ron::to_string(&ComponentKind::Movement).unwrap();
        assert_eq!(encoded, "5");
        let decoded: ComponentKind = ron::from_str("7").unwrap();
        assert_eq!(decoded, ComponentKind::PointLight);
    }

    #[test]
    fn test_kind_set_iteration() {
        let set: ComponentKinds = [ComponentKind::Position, ComponentKind::Movement]
            .into_iter()
            .collect();
        assert_eq!(
            set.kinds().collect::<Vec<_>>(),
            vec![ComponentKind::Movement, ComponentKind::Position]
        );
        assert_eq!(set, ComponentKinds::MOVEMENT | ComponentKinds::POSITION);
    }

    #[test]
    fn test_parented_position_reports_both_kinds() {
        let data = ComponentData::default_for(ComponentKind::PositionParent);
        assert_eq!(data.kind(), ComponentKind::PositionParent);
        assert_eq!(
            data.signature(),
            ComponentKinds::POSITION | ComponentKinds::POSITION_PARENT
        );
        assert_eq!(
            ComponentData::default_for(ComponentKind::Position).signature(),
            ComponentKinds::POSITION
        );
    }
}
