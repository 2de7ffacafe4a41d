// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Headless collision playground
//!
//! A player box is driven through a scripted sequence of arrow-key presses
//! around three blocks (bounce, static and pass-through). Every collision
//! and contact event is printed as it happens.
//!
//! Run with `RUST_LOG=trace` to see the collision system's own logging.

use collision_engine::collision::{CollisionEvent, CollisionEventKind, CollisionSystem};
use collision_engine::ecs::components::{Collider, CollisionGroup, CollisionNotifier, Resolution};
use collision_engine::ecs::{Entity, World};
use collision_engine::EcsResult;

const PX_PER_SECOND: f64 = 200.0;
const FRAME_DT: f64 = 1.0 / 60.0;

/// Held direction and how many frames to hold it
const SCRIPT: [((f64, f64), usize); 6] = [
    ((1.0, 0.0), 30),
    ((0.0, 1.0), 45),
    ((-1.0, 0.0), 40),
    ((0.0, 1.0), 40),
    ((1.0, -1.0), 30),
    ((0.0, -1.0), 60),
];

fn block(world: &mut World, x: f64, y: f64, size: f64, resolution: Resolution) -> EcsResult<Entity> {
    let entity = world.create();
    world.add_component(
        entity,
        Collider::new(x, y, size, size)
            .with_group(CollisionGroup::ENEMY)
            .interacting_with(CollisionGroup::all())
            .with_notify(CollisionNotifier::ENTER | CollisionNotifier::EXIT)
            .with_resolution(resolution),
    )?;
    Ok(entity)
}

fn describe(event: &CollisionEvent) -> String {
    match event {
        CollisionEvent::Collision(payload) => format!(
            "collision: {} hit {} collider(s), now at ({:.1}, {:.1})",
            payload.mover.entity,
            payload.collisions.len(),
            payload.mover.collider.x,
            payload.mover.collider.y
        ),
        other => {
            let contact = other.contact().map(|c| c.other.entity);
            format!("{:?}: {} / {:?}", other.kind(), other.mover().entity, contact)
        }
    }
}

fn main() -> EcsResult<()> {
    env_logger::init();

    println!("Collision Engine - Collision Playground");
    println!("========================================\n");

    let mut world = World::new();
    let player = world.create();
    world.add_component(
        player,
        Collider::new(100.0, 100.0, 100.0, 100.0)
            .with_group(CollisionGroup::PLAYER)
            .interacting_with(CollisionGroup::ENEMY)
            .with_notify(CollisionNotifier::ENTER | CollisionNotifier::EXIT),
    )?;

    let bouncy = block(&mut world, 200.0, 350.0, 100.0, Resolution::Bounce)?;
    let wall = block(&mut world, 300.0, 200.0, 60.0, Resolution::Static)?;
    let ghost = block(&mut world, 200.0, 100.0, 60.0, Resolution::None)?;
    println!("player: {}", player);
    println!("bounce block: {}", bouncy);
    println!("static block: {}", wall);
    println!("pass-through block: {}\n", ghost);

    let mut collisions = CollisionSystem::new();
    for kind in [
        CollisionEventKind::Collision,
        CollisionEventKind::Enter,
        CollisionEventKind::Exit,
    ] {
        collisions.events_mut().on(kind, |event| println!("  {}", describe(event)));
    }

    let mut frame = 0;
    for ((dir_x, dir_y), frames) in SCRIPT {
        println!("holding ({:+}, {:+}) for {} frames", dir_x, dir_y, frames);
        for _ in 0..frames {
            frame += 1;
            let hits = collisions.move_entity(
                &mut world,
                FRAME_DT,
                player,
                dir_x * PX_PER_SECOND,
                dir_y * PX_PER_SECOND,
            )?;
            if !hits.is_empty() {
                log::trace!("frame {}: {} hit(s)", frame, hits.len());
            }
        }
        let collider = world.tap::<Collider>(player)?;
        println!("  player at ({:.1}, {:.1})\n", collider.x, collider.y);
    }

    println!("Simulated {} frames; player touching {:?}", frame, collisions.touching(player));
    Ok(())
}
