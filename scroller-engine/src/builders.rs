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
//! Entity builders and level spawning
//!
//! A builder claims a slot and writes every component it attaches, so a
//! reused slot never shows data left behind by its previous occupant.

use crate::ecs::components::{
    Animation, AnimationDescriptor, Collectible, Inventory, State, StateKey, Tag, Text,
    Transform,
};
use crate::ecs::{Entity, Signature, World};
use crate::error::{CapacityError, LoadError};
use crate::level::SpawnRequest;
use crate::systems::{COINS_TAG, HEALTH_TAG};
use log::{debug, warn};
use std::collections::HashMap;
use std::fmt;

/// Builds one entity of a kind at a world position
pub type EntityBuilder = fn(&mut World, f32, f32) -> Result<Entity, CapacityError>;

/// Player footprint width
pub const PLAYER_WIDTH: i32 = 9;
/// Player footprint height
pub const PLAYER_HEIGHT: i32 = 14;

/// Kind name to builder lookup
#[derive(Clone, Default)]
pub struct BuilderRegistry {
    builders: HashMap<String, EntityBuilder>,
}

impl fmt::Debug for BuilderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuilderRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

impl BuilderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every shipped kind
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("player", build_player);
        registry.register("coin", build_coin);
        registry.register("heart", build_heart);
        registry.register("hud_coins", build_hud_coins);
        registry.register("hud_health", build_hud_health);
        registry
    }

    /// Add or replace the builder for `kind`
    pub fn register(&mut self, kind: &str, builder: EntityBuilder) {
        if self.builders.insert(kind.to_string(), builder).is_some() {
            debug!("replaced builder for '{}'", kind);
        }
    }

    /// Whether `kind` has a builder
    pub fn contains(&self, kind: &str) -> bool {
        self.builders.contains_key(kind)
    }

    /// Build one entity of `kind`
    pub fn build(&self, world: &mut World, kind: &str, x: f32, y: f32) -> Result<Entity, LoadError> {
        let builder = self
            .builders
            .get(kind)
            .ok_or_else(|| LoadError::UnknownSpawnKind(kind.to_string()))?;
        Ok(builder(world, x, y)?)
    }

    /// Registered kind names, sorted
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.builders.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

/// Spawn every request in order
///
/// Kinds are checked up front, so an unknown kind leaves the world untouched.
/// Running out of slots part way through keeps what was already spawned.
pub fn spawn_level(
    world: &mut World,
    registry: &BuilderRegistry,
    spawns: &[SpawnRequest],
) -> Result<Vec<Entity>, LoadError> {
    if let Some(unknown) = spawns.iter().find(|s| !registry.contains(&s.kind)) {
        warn!("level spawns unknown kind '{}'", unknown.kind);
        return Err(LoadError::UnknownSpawnKind(unknown.kind.clone()));
    }

    let mut spawned = Vec::with_capacity(spawns.len());
    for spawn in spawns {
        spawned.push(registry.build(world, &spawn.kind, spawn.x, spawn.y)?);
    }
    debug!("spawned {} entities", spawned.len());
    Ok(spawned)
}

/// The controllable, camera-focused player
pub fn build_player(world: &mut World, x: f32, y: f32) -> Result<Entity, CapacityError> {
    let entity = world.create_entity()?;

    let run = AnimationDescriptor::looping("Player/Run", 60);
    let slide = AnimationDescriptor::looping("Player/Fall-Jump-WallJ/Wall Slide", 100);
    let animation = Animation::new()
        .with_state(StateKey::Idle, AnimationDescriptor::looping("Player/Idle", 200))
        .with_state(StateKey::Left, run.clone())
        .with_state(StateKey::Right, run)
        .with_state(
            StateKey::Jump,
            AnimationDescriptor::one_shot("Player/Fall-Jump-WallJ/Jump", 200),
        )
        .with_state(StateKey::Roll, AnimationDescriptor::one_shot("Player/Roll", 60))
        .with_state(StateKey::Shoot, AnimationDescriptor::one_shot("Player/Shoot", 80))
        .with_state(StateKey::WallRight, slide.clone())
        .with_state(StateKey::WallLeft, slide);

    world.insert_transform(
        entity,
        Transform::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT).with_max_speed(2.2, 5.0),
    );
    world.insert_state(entity, State::default());
    world.insert_animation(entity, animation);
    world.insert_inventory(entity, Inventory::default());
    world.add_components(
        entity,
        Signature::VELOCITY | Signature::CONTROLLER | Signature::COLLIDABLE | Signature::FOCUSED,
    );
    Ok(entity)
}

fn build_pickup(
    world: &mut World,
    x: f32,
    y: f32,
    size: (i32, i32),
    asset: &str,
    item: &str,
) -> Result<Entity, CapacityError> {
    let entity = world.create_entity()?;
    world.insert_transform(entity, Transform::new(x, y, size.0, size.1));
    world.insert_animation(
        entity,
        Animation::new().with_state(StateKey::Idle, AnimationDescriptor::looping(asset, 150)),
    );
    world.insert_collectible(entity, Collectible::new(item, 1));
    Ok(entity)
}

/// A spinning coin worth one gold
pub fn build_coin(world: &mut World, x: f32, y: f32) -> Result<Entity, CapacityError> {
    build_pickup(world, x, y, (8, 8), "Items/Coin/Spin", "gold")
}

/// A heart worth one health
pub fn build_heart(world: &mut World, x: f32, y: f32) -> Result<Entity, CapacityError> {
    build_pickup(world, x, y, (7, 6), "Items/Heart/Pick heart", "health")
}

fn build_hud_text(
    world: &mut World,
    x: f32,
    y: f32,
    tag: &str,
    initial: &str,
) -> Result<Entity, CapacityError> {
    let entity = world.create_entity()?;
    world.insert_transform(entity, Transform::new(x, y, 0, 0));
    world.insert_tag(entity, Tag::new(tag));
    world.insert_text(entity, Text::new(initial));
    world.add_components(entity, Signature::HUD);
    Ok(entity)
}

/// Screen-space coin counter
pub fn build_hud_coins(world: &mut World, x: f32, y: f32) -> Result<Entity, CapacityError> {
    build_hud_text(world, x, y, COINS_TAG, "Coins: 0")
}

/// Screen-space health counter
pub fn build_hud_health(world: &mut World, x: f32, y: f32) -> Result<Entity, CapacityError> {
    build_hud_text(world, x, y, HEALTH_TAG, "X 0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::ENTITY_COUNT;

    #[test]
    fn test_standard_kinds() {
        let registry = BuilderRegistry::standard();
        assert_eq!(
            registry.kinds(),
            vec!["coin", "heart", "hud_coins", "hud_health", "player"]
        );
    }

    #[test]
    fn test_player_signature() {
        let mut world = World::new();
        let player = build_player(&mut world, 10.0, 20.0).unwrap();
        assert!(world.has(
            player,
            Signature::TRANSFORM
                | Signature::VELOCITY
                | Signature::STATE
                | Signature::ANIMATION
                | Signature::CONTROLLER
                | Signature::COLLIDABLE
                | Signature::FOCUSED
                | Signature::INVENTORY
        ));
        let t = world.transform(player).unwrap();
        assert_eq!((t.w, t.h), (PLAYER_WIDTH, PLAYER_HEIGHT));
        assert_eq!(world.animation(player).unwrap().states.len(), 8);
    }

    #[test]
    fn test_pickups_are_not_solid() {
        let mut world = World::new();
        let coin = build_coin(&mut world, 0.0, 0.0).unwrap();
        let heart = build_heart(&mut world, 0.0, 0.0).unwrap();
        assert_eq!(world.collectible(coin).unwrap().item, "gold");
        assert_eq!(world.collectible(heart).unwrap().item, "health");
        assert!(!world.has(coin, Signature::COLLIDABLE));
        assert!(world.state(coin).is_none());
    }

    #[test]
    fn test_hud_text_is_tagged() {
        let mut world = World::new();
        let hud = build_hud_health(&mut world, 4.0, 16.0).unwrap();
        assert!(world.has(hud, Signature::HUD | Signature::TEXT | Signature::TAG));
        assert_eq!(world.find_by_tag(HEALTH_TAG), Some(hud));
        assert_eq!(world.text(hud).unwrap().value, "X 0");
    }

    #[test]
    fn test_unknown_kind_spawns_nothing() {
        let mut world = World::new();
        let spawns = vec![
            SpawnRequest::new("coin", 0.0, 0.0),
            SpawnRequest::new("dragon", 0.0, 0.0),
        ];
        let result = spawn_level(&mut world, &BuilderRegistry::standard(), &spawns);
        assert!(matches!(result, Err(LoadError::UnknownSpawnKind(kind)) if kind == "dragon"));
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn test_spawn_past_capacity() {
        let mut world = World::new();
        let spawns = vec![SpawnRequest::new("coin", 0.0, 0.0); ENTITY_COUNT + 1];
        let result = spawn_level(&mut world, &BuilderRegistry::standard(), &spawns);
        assert!(matches!(result, Err(LoadError::Capacity(_))));
        assert_eq!(world.entity_count(), ENTITY_COUNT);
    }
}
