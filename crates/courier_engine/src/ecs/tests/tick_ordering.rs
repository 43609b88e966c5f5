//! Stage ordering guarantees observable from component state

use approx::assert_relative_eq;

use super::{step, unclamped_scheduler};
use crate::ecs::components::{BoundingBox, CameraFocus, Collision, Movement, ParticleSpawner, Position};
use crate::ecs::systems::test_support::Collaborators;
use crate::ecs::{ComponentKind, World};
use crate::foundation::handles::SpawnerHandle;
use crate::foundation::math::Vec3;

#[test]
fn test_camera_sees_collision_corrected_position() {
    let mut world = World::new();
    let wall = world.create();
    world.attach(wall, Position::at(Vec3::new(2.0, 0.0, 0.0))).unwrap();
    world.attach(wall, BoundingBox::default()).unwrap();
    world.attach(wall, Collision::fixed()).unwrap();

    // Movement alone would carry the player to x = 1.5, inside the wall.
    let player = world.create();
    world.attach(player, Position::default()).unwrap();
    world.attach(player, BoundingBox::default()).unwrap();
    world.attach(player, Collision::dynamic()).unwrap();
    world.attach(player, Movement::drifting(Vec3::new(1.5, 0.0, 0.0))).unwrap();
    world.attach(player, CameraFocus::new(Vec3::new(0.0, 2.0, -4.0))).unwrap();

    let mut scheduler = unclamped_scheduler();
    step(&mut scheduler, &mut world, &mut Collaborators::default(), 1.0);

    let corrected = world.get::<Position>(player).unwrap().world_position();
    assert_relative_eq!(corrected, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-5);
    assert_relative_eq!(
        world.get::<CameraFocus>(player).unwrap().target,
        corrected + Vec3::new(0.0, 2.0, -4.0),
        epsilon = 1e-5
    );
    assert_eq!(scheduler.collision().contacts().len(), 1);
}

#[test]
fn test_one_tick_gravity_through_scheduler() {
    let mut world = World::new();
    let entity = world.create();
    world.attach(entity, Position::at(Vec3::new(0.0, 100.0, 0.0))).unwrap();
    world.attach_default(entity, ComponentKind::Movement).unwrap();

    let mut scheduler = unclamped_scheduler();
    let report = step(&mut scheduler, &mut world, &mut Collaborators::default(), 0.25);
    assert_eq!(report.delta_time, 0.25);

    let velocity = world.get::<Movement>(entity).unwrap().velocity;
    assert_relative_eq!(velocity, Vec3::new(0.0, -9.8 * 0.25, 0.0), epsilon = 1e-6);
    assert_relative_eq!(
        world.get::<Position>(entity).unwrap().location(),
        Vec3::new(0.0, 100.0, 0.0) + velocity * 0.25,
        epsilon = 1e-5
    );
}

#[test]
fn test_default_step_is_clamped() {
    let mut world = World::new();
    let entity = world.create();
    world.attach(entity, Position::default()).unwrap();
    world.attach(entity, Movement::drifting(Vec3::new(1.0, 0.0, 0.0))).unwrap();

    let mut scheduler = crate::ecs::Scheduler::default();
    let report = step(&mut scheduler, &mut world, &mut Collaborators::default(), 5.0);

    assert_eq!(report.delta_time, 0.1);
    assert_relative_eq!(
        world.get::<Position>(entity).unwrap().location(),
        Vec3::new(0.1, 0.0, 0.0),
        epsilon = 1e-6
    );
}

#[test]
fn test_spawner_emits_through_collaborator() {
    let mut world = World::new();
    let entity = world.create();
    world
        .attach(entity, ParticleSpawner::new(SpawnerHandle::default(), 0.5).immediate())
        .unwrap();

    let mut scheduler = unclamped_scheduler();
    let mut collaborators = Collaborators::default();
    step(&mut scheduler, &mut world, &mut collaborators, 0.1);
    step(&mut scheduler, &mut world, &mut collaborators, 0.1);

    assert_eq!(collaborators.particles.emitted.len(), 1);
    assert_eq!(collaborators.particles.emitted[0].0, entity);
}
