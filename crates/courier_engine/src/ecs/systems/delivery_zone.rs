//! Delivery zone triggers
//!
//! Each untriggered zone looks for the first deliverable actor inside its
//! radius. On a hit the zone latches `triggered` and a
//! [`GameplayEvent::DeliveryTriggered`] is queued. Latched zones are skipped
//! until gameplay code resets them.

use log::{info, trace, warn};

use crate::ecs::component::{ComponentKind, ComponentKinds};
use crate::ecs::scheduler::SystemStage;
use crate::ecs::system::{System, SystemContext};
use crate::ecs::{Entity, World};
use crate::events::GameplayEvent;
use crate::foundation::math::Vec3;

/// Decides which positioned entities can complete a delivery
pub type DeliverableFilter = Box<dyn Fn(&World, Entity) -> bool>;

/// Detects deliverable actors entering delivery zones
#[derive(Default)]
pub struct DeliveryZoneSystem {
    filter: Option<DeliverableFilter>,
    actors: Vec<(Entity, Vec3)>,
    zones: Vec<Entity>,
}

impl DeliveryZoneSystem {
    /// System whose actors are all positioned entities without a zone
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: restrict which entities count as actors
    pub fn with_filter(mut self, filter: impl Fn(&World, Entity) -> bool + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Replace the actor filter
    pub fn set_filter(&mut self, filter: Option<DeliverableFilter>) {
        self.filter = filter;
    }

    fn is_deliverable(&self, world: &World, entity: Entity) -> bool {
        match &self.filter {
            Some(filter) => filter(world, entity),
            None => !world.has(entity, ComponentKind::DeliveryZone),
        }
    }
}

impl std::fmt::Debug for DeliveryZoneSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliveryZoneSystem")
            .field("custom_filter", &self.filter.is_some())
            .finish_non_exhaustive()
    }
}

impl System for DeliveryZoneSystem {
    fn name(&self) -> &'static str {
        "delivery_zone"
    }

    fn stage(&self) -> SystemStage {
        SystemStage::DeliveryZone
    }

    fn run(&mut self, world: &mut World, context: &mut SystemContext<'_, '_>) {
        self.zones.clear();
        self.zones.extend(world.query(ComponentKinds::DELIVERY_ZONE));
        if self.zones.is_empty() {
            return;
        }

        let mut actors = std::mem::take(&mut self.actors);
        actors.clear();
        for entity in &world.query(ComponentKinds::POSITION) {
            if !self.is_deliverable(world, entity) {
                continue;
            }
            if let Some(position) = world.registry().positions.get(entity) {
                actors.push((entity, position.world_position()));
            }
        }

        let registry = world.registry_mut();
        for &zone_entity in &self.zones {
            let Some(zone) = registry.delivery_zones.get_mut(zone_entity) else {
                continue;
            };
            if zone.triggered {
                continue;
            }
            if !zone.is_valid() {
                warn!("Skipping delivery zone {zone_entity}: invalid radius {}", zone.radius);
                continue;
            }
            let Some(&(actor, _)) = actors
                .iter()
                .find(|(actor, position)| *actor != zone_entity && zone.contains(*position))
            else {
                continue;
            };

            zone.triggered = true;
            info!("Delivery zone {zone_entity} triggered by {actor} on tick {}", context.tick);
            context.services.events.send(GameplayEvent::DeliveryTriggered {
                zone: zone_entity,
                actor,
                tick: context.tick,
            });
        }

        trace!(
            "DeliveryZoneSystem: {} zones, {} actors",
            self.zones.len(),
            actors.len()
        );
        self.actors = actors;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{DeliveryZone, Movement, Position};
    use crate::ecs::systems::test_support::{run_once, Collaborators};

    fn zone_at_origin(world: &mut World) -> Entity {
        let zone = world.create();
        world.attach(zone, DeliveryZone::new(Vec3::zeros(), 5.0)).unwrap();
        world.attach(zone, Position::default()).unwrap();
        zone
    }

    #[test]
    fn test_actor_inside_radius_triggers_once() {
        let mut world = World::new();
        let zone = zone_at_origin(&mut world);
        let actor = world.create();
        world.attach(actor, Position::at(Vec3::new(5.0, 0.0, 0.0))).unwrap();

        let mut system = DeliveryZoneSystem::new();
        let mut collaborators = Collaborators::default();
        run_once(&mut system, &mut world, &mut collaborators, 0.1, 4);
        run_once(&mut system, &mut world, &mut collaborators, 0.1, 5);

        assert!(world.get::<DeliveryZone>(zone).unwrap().triggered);
        assert_eq!(
            collaborators.events(),
            vec![GameplayEvent::DeliveryTriggered { zone, actor, tick: 4 }]
        );
    }

    #[test]
    fn test_zone_never_triggers_itself() {
        let mut world = World::new();
        let zone = zone_at_origin(&mut world);

        let mut collaborators = Collaborators::default();
        run_once(&mut DeliveryZoneSystem::new(), &mut world, &mut collaborators, 0.1, 0);

        assert!(!world.get::<DeliveryZone>(zone).unwrap().triggered);
        assert!(collaborators.events().is_empty());
    }

    #[test]
    fn test_custom_filter_selects_actors() {
        let mut world = World::new();
        let zone = zone_at_origin(&mut world);
        let bystander = world.create();
        world.attach(bystander, Position::at(Vec3::new(1.0, 0.0, 0.0))).unwrap();

        let courier = world.create();
        world.attach(courier, Position::at(Vec3::new(2.0, 0.0, 0.0))).unwrap();
        world.attach(courier, Movement::default()).unwrap();

        let mut system = DeliveryZoneSystem::new()
            .with_filter(|world: &World, entity| world.has(entity, ComponentKind::Movement));
        let mut collaborators = Collaborators::default();
        run_once(&mut system, &mut world, &mut collaborators, 0.1, 0);

        assert_eq!(
            collaborators.events(),
            vec![GameplayEvent::DeliveryTriggered { zone, actor: courier, tick: 0 }]
        );
    }

    #[test]
    fn test_negative_radius_zone_is_skipped() {
        let mut world = World::new();
        let zone = world.create();
        world.attach(zone, DeliveryZone::new(Vec3::zeros(), -5.0)).unwrap();
        let actor = world.create();
        world.attach(actor, Position::at(Vec3::new(3.0, 0.0, 0.0))).unwrap();

        let mut collaborators = Collaborators::default();
        run_once(&mut DeliveryZoneSystem::new(), &mut world, &mut collaborators, 0.1, 0);

        assert!(!world.get::<DeliveryZone>(zone).unwrap().triggered);
        assert!(collaborators.events().is_empty());
    }

    #[test]
    fn test_actor_outside_radius_does_not_trigger() {
        let mut world = World::new();
        let zone = zone_at_origin(&mut world);
        let actor = world.create();
        world.attach(actor, Position::at(Vec3::new(5.5, 0.0, 0.0))).unwrap();

        run_once(&mut DeliveryZoneSystem::new(), &mut world, &mut Collaborators::default(), 0.1, 0);
        assert!(!world.get::<DeliveryZone>(zone).unwrap().triggered);
    }
}
