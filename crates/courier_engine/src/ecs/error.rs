//! ECS error types

use thiserror::Error;

use super::component::ComponentKind;
use super::entity::Entity;

/// Errors surfaced by the entity manager
///
/// Only structural misuse is reported here. Systems treat a missing
/// component as "not part of this query" and never raise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EcsError {
    /// Operation on a destroyed or never-issued entity
    #[error("unknown entity {0}")]
    UnknownEntity(Entity),

    /// Typed access to a component the entity does not own
    #[error("entity {entity} has no {kind} component")]
    MissingComponent {
        /// Entity that was accessed
        entity: Entity,
        /// Kind that was requested
        kind: ComponentKind,
    },

    /// Integer tag outside the known kind range
    #[error("invalid component tag {0}")]
    InvalidComponentTag(u8),
}
