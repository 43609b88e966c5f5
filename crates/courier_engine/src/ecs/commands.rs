//! Deferred structural changes
//!
//! While a tick is open, creates, destroys, attaches and detaches are
//! recorded here instead of touching the stores, and applied in issue order
//! when the tick ends. Iteration inside a system therefore never observes a
//! store changing under it.

use std::collections::HashSet;

use super::component::{ComponentData, ComponentKind};
use super::entity::Entity;

/// One recorded structural change
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Promote a reserved entity to alive
    Spawn(Entity),
    /// Destroy an entity and everything it owns
    Despawn(Entity),
    /// Attach or overwrite a component
    Attach(Entity, ComponentData),
    /// Detach a component kind
    Detach(Entity, ComponentKind),
}

impl Command {
    /// Entity the command targets
    pub fn entity(&self) -> Entity {
        match self {
            Self::Spawn(entity)
            | Self::Despawn(entity)
            | Self::Attach(entity, _)
            | Self::Detach(entity, _) => *entity,
        }
    }
}

/// Pending structural changes, in issue order
#[derive(Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<Command>,
    despawns: HashSet<Entity>,
}

impl CommandBuffer {
    /// Record a command
    pub fn push(&mut self, command: Command) {
        if let Command::Despawn(entity) = command {
            self.despawns.insert(entity);
        }
        self.commands.push(command);
    }

    /// Number of pending commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True when nothing is pending
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// True when a despawn for `entity` is already pending
    pub fn despawn_pending(&self, entity: Entity) -> bool {
        self.despawns.contains(&entity)
    }

    /// Take every pending command, leaving the buffer empty
    pub fn drain(&mut self) -> std::vec::Drain<'_, Command> {
        self.despawns.clear();
        self.commands.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_despawn_tracking_clears_on_drain() {
        let entity = Entity::new(3, 1);
        let mut buffer = CommandBuffer::default();
        buffer.push(Command::Spawn(entity));
        assert!(!buffer.despawn_pending(entity));

        buffer.push(Command::Despawn(entity));
        assert!(buffer.despawn_pending(entity));
        assert!(!buffer.despawn_pending(Entity::new(3, 2)));

        let drained: Vec<Command> = buffer.drain().collect();
        assert_eq!(drained, vec![Command::Spawn(entity), Command::Despawn(entity)]);
        assert!(buffer.is_empty());
        assert!(!buffer.despawn_pending(entity));
    }
}
