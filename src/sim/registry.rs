//! Entity registry: owns the live set, drives update/draw and collision scans
//!
//! Entities are kept sorted by id (ids only ever grow and removal preserves
//! order), so iteration is insertion order and lookup is a binary search.

use std::fmt;
use std::rc::Rc;

use super::collision;
use super::entity::{Command, Entity, EntityId, EntityTag, Frame};
use crate::content::ContentSource;
use crate::error::Result;
use crate::render::DrawSink;

pub struct Registry {
    entities: Vec<Entity>,
    next_id: u32,
    content: Rc<dyn ContentSource>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("entities", &self.entities.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl Registry {
    pub fn new(content: Rc<dyn ContentSource>) -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
            content,
        }
    }

    #[cfg(test)]
    pub(crate) fn builtin() -> Self {
        Self::new(Rc::new(crate::content::SpriteAtlas::builtin()))
    }

    pub fn content(&self) -> &dyn ContentSource {
        self.content.as_ref()
    }

    /// Initialize (once) and insert; a failed asset lookup leaves the registry
    /// untouched
    pub fn add(&mut self, mut entity: Entity) -> Result<EntityId> {
        entity.initialize_once(self.content.as_ref())?;
        let id = EntityId(self.next_id);
        self.next_id += 1;
        entity.id = id;
        log::trace!("spawn {:?} {id:?}", entity.tag());
        self.entities.push(entity);
        Ok(id)
    }

    /// Remove by id; absent ids are ignored
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.index_of(id)?;
        Some(self.entities.remove(index))
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id).ok()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).map(|i| &self.entities[i])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.index_of(id).map(|i| &mut self.entities[i])
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn count(&self, tag: EntityTag) -> usize {
        self.entities.iter().filter(|e| e.tag() == tag).count()
    }

    /// Apply queued spawns and removals in order
    pub fn apply(&mut self, commands: Vec<Command>) -> Result<()> {
        for command in commands {
            match command {
                Command::Spawn(entity) => {
                    self.add(entity)?;
                }
                Command::Despawn(id) => {
                    self.remove(id);
                }
            }
        }
        Ok(())
    }

    /// Update every entity, then scan for collisions.
    ///
    /// Changes requested during either pass land after that pass, so an entity
    /// removed mid-pass still takes part in it and a spawned one first moves
    /// next frame.
    pub fn update(&mut self, frame: &mut Frame) -> Result<()> {
        let mut commands = Vec::new();
        for entity in &mut self.entities {
            entity.update(frame, &mut commands)?;
        }
        self.apply(commands)?;

        let mut commands = Vec::new();
        self.detect_collisions(frame, &mut commands);
        self.apply(commands)
    }

    /// Test every allowed ordered pair once and run its reaction on contact
    pub fn detect_collisions(&mut self, frame: &mut Frame, commands: &mut Vec<Command>) {
        let scan: Vec<(EntityId, EntityTag)> = self
            .entities
            .iter()
            .map(|e| (e.id, e.tag()))
            .filter(|&(_, tag)| collision::is_collidable(tag))
            .collect();

        for &(a, a_tag) in &scan {
            for &(b, b_tag) in &scan {
                if a == b {
                    continue;
                }
                let Some(rule) = collision::rule_for(a_tag, b_tag) else {
                    continue;
                };
                let hit = match (self.get(a), self.get(b)) {
                    (Some(x), Some(y)) => x.body.check_collision(&y.body),
                    _ => false,
                };
                if hit {
                    (rule.react)(self, a, b, frame, commands);
                }
            }
        }
    }

    /// Hand every visible entity to the renderer in insertion order
    pub fn draw(&self, sink: &mut dyn DrawSink) -> Result<()> {
        for entity in &self.entities {
            if let Some(request) = entity.draw_request()? {
                sink.draw(request);
            }
        }
        Ok(())
    }
}
