//! Spawn and difficulty controller
//!
//! Runs once per playing frame after collisions: spawns enemy ships and fresh
//! asteroids on timers, turns dead asteroids into score, explosions and
//! children, then rescales the asteroid cap and life allowance from score.

use glam::Vec2;
use rand::Rng;

use super::entity::{Entity, EntityId, EntityTag, Frame, Tier};
use super::registry::Registry;
use super::state::GameEvent;
use crate::audio::SoundEffect;
use crate::error::Result;
use crate::tuning::Tuning;

/// Unit directions pointing away from each viewport corner, clockwise from
/// top-left
const CORNER_HEADINGS: [Vec2; 4] = [
    Vec2::new(1.0, 1.0),
    Vec2::new(-1.0, 1.0),
    Vec2::new(-1.0, -1.0),
    Vec2::new(1.0, -1.0),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Director {
    /// Every live asteroid, spawned or split
    asteroids: Vec<EntityId>,
    /// Director-spawned large asteroids still alive; bounded by the cap
    fresh: Vec<EntityId>,
    last_asteroid_spawn: f64,
    last_ship_spawn: f64,
    asteroid_cap: u32,
    max_lives: u32,
}

impl Director {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            asteroids: Vec::new(),
            fresh: Vec::new(),
            last_asteroid_spawn: 0.0,
            last_ship_spawn: 0.0,
            asteroid_cap: tuning.director.base_asteroid_cap,
            max_lives: tuning.player.lives,
        }
    }

    /// Forget all tracked asteroids and restart the timers from `now`
    pub fn reset(&mut self, tuning: &Tuning, now: f64) {
        *self = Self::new(tuning);
        self.last_asteroid_spawn = now;
        self.last_ship_spawn = now;
    }

    pub fn asteroid_cap(&self) -> u32 {
        self.asteroid_cap
    }

    pub fn max_lives(&self) -> u32 {
        self.max_lives
    }

    pub fn tracked(&self) -> &[EntityId] {
        &self.asteroids
    }

    pub fn fresh(&self) -> &[EntityId] {
        &self.fresh
    }

    /// Register an asteroid created outside the spawn timer
    pub fn track(&mut self, id: EntityId) {
        self.asteroids.push(id);
    }

    pub fn update(
        &mut self,
        registry: &mut Registry,
        player: EntityId,
        frame: &mut Frame,
    ) -> Result<()> {
        let score = player_score(registry, player);
        self.spawn_ship(registry, player, score, frame)?;
        self.spawn_asteroid(registry, frame)?;
        self.sweep_dead(registry, player, frame)?;
        self.scale_difficulty(registry, player, frame);
        Ok(())
    }

    fn spawn_ship(
        &mut self,
        registry: &mut Registry,
        player: EntityId,
        score: u64,
        frame: &mut Frame,
    ) -> Result<()> {
        let tuning = frame.tuning;
        let t = &tuning.director;
        if frame.now - self.last_ship_spawn <= t.ship_interval
            || registry.count(EntityTag::EnemyShip) > 0
        {
            return Ok(());
        }

        let tier = if score > t.small_ship_score {
            Tier::Small
        } else {
            Tier::Large
        };
        let view = frame.viewport;
        let min_y = tuning.enemy.spawn_min_y;
        let max_y = (view.height as i32).max(min_y + 1);
        let y = view.y + frame.rng.random_range(min_y..max_y) as f32;
        let ship = Entity::enemy_ship(tier, Vec2::new(view.x, y), player, tuning);
        let id = registry.add(ship)?;
        log::debug!("enemy ship {id:?} ({tier:?}) at y={y}");
        self.last_ship_spawn = frame.now;
        Ok(())
    }

    fn spawn_asteroid(&mut self, registry: &mut Registry, frame: &mut Frame) -> Result<()> {
        if frame.now - self.last_asteroid_spawn <= frame.tuning.director.asteroid_interval
            || self.fresh.len() >= self.asteroid_cap as usize
        {
            return Ok(());
        }

        let mut rock = Entity::asteroid(Tier::Large, frame.tuning);
        rock.initialize_once(registry.content())?;

        let view = frame.viewport;
        let corner = frame.rng.random_range(0..CORNER_HEADINGS.len());
        let away = CORNER_HEADINGS[corner];
        let origin = Vec2::new(
            if away.x > 0.0 { view.x } else { view.x + view.width },
            if away.y > 0.0 { view.y } else { view.y + view.height },
        );
        let half = Vec2::new(
            (rock.body.width() / 2) as f32,
            (rock.body.height() / 2) as f32,
        );
        rock.body.kin.position = origin + away * half;
        rock.body.kin.velocity = away * frame.tuning.asteroid.spawn_speed;

        let id = registry.add(rock)?;
        self.asteroids.push(id);
        self.fresh.push(id);
        self.last_asteroid_spawn = frame.now;
        log::debug!("asteroid {id:?} from corner {corner}");
        Ok(())
    }

    fn sweep_dead(
        &mut self,
        registry: &mut Registry,
        player: EntityId,
        frame: &mut Frame,
    ) -> Result<()> {
        let tuning = frame.tuning;
        let snapshot = self.asteroids.clone();
        for &id in snapshot.iter().rev() {
            let Some((rock, body)) = registry
                .get(id)
                .and_then(|e| Some((e.as_asteroid()?, &e.body)))
            else {
                self.forget(id);
                continue;
            };
            if !rock.is_dead() {
                continue;
            }

            let tier = rock.tier;
            let award = if rock.killer.is_some_and(|k| k.is_enemy_bullet()) {
                0
            } else {
                rock.score
            };
            let position = body.position();
            let velocity = body.kin.velocity;

            if let Some(p) = registry.get_mut(player).and_then(Entity::as_player_mut) {
                p.score += award;
            }

            registry.add(Entity::asteroid_explosion(tier.smaller(), position))?;
            frame.play(SoundEffect::Explosion);

            if tier != Tier::Small {
                let offset = Vec2::new(0.0, tuning.asteroid.split_offset_y);
                for (at, heading) in [(position + offset, velocity), (position, -velocity)] {
                    let mut child = Entity::asteroid(tier.smaller(), tuning);
                    child.body.kin.position = at;
                    child.body.kin.velocity = heading;
                    let child = registry.add(child)?;
                    self.asteroids.push(child);
                }
            }

            registry.remove(id);
            self.forget(id);
            log::debug!("asteroid {id:?} ({tier:?}) destroyed, +{award}");
        }
        Ok(())
    }

    fn forget(&mut self, id: EntityId) {
        self.asteroids.retain(|&a| a != id);
        self.fresh.retain(|&a| a != id);
    }

    fn scale_difficulty(&mut self, registry: &mut Registry, player: EntityId, frame: &mut Frame) {
        let tuning = frame.tuning;
        let t = &tuning.director;
        let base_lives = tuning.player.lives;
        let Some(state) = registry.get_mut(player).and_then(Entity::as_player_mut) else {
            return;
        };

        self.asteroid_cap = t.base_asteroid_cap + (state.score / t.asteroid_cap_step) as u32;

        let max_lives = base_lives + (state.score / t.extra_life_step) as u32;
        if max_lives > self.max_lives && state.alive() {
            state.lives += 1;
            frame.events.push(GameEvent::ExtraLife);
            log::info!("extra life at {} points", state.score);
        }
        self.max_lives = max_lives;
    }
}

fn player_score(registry: &Registry, player: EntityId) -> u64 {
    registry
        .get(player)
        .and_then(Entity::as_player)
        .map_or(0, |p| p.score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::tests::Harness;
    use crate::sim::entity::{Killer, Kind};

    struct Scene {
        h: Harness,
        registry: Registry,
        director: Director,
        player: EntityId,
    }

    impl Scene {
        fn new() -> Self {
            let h = Harness::new();
            let mut registry = Registry::builtin();
            let player = registry.add(Entity::player(&h.tuning)).unwrap();
            let mut director = Director::new(&h.tuning);
            // Keep the timers quiet unless a test opts in
            director.reset(&h.tuning, h.now);
            Self {
                h,
                registry,
                director,
                player,
            }
        }

        fn rock(&mut self, tier: Tier, position: Vec2, velocity: Vec2) -> EntityId {
            let mut rock = Entity::asteroid(tier, &self.h.tuning);
            rock.body.kin.position = position;
            rock.body.kin.velocity = velocity;
            let id = self.registry.add(rock).unwrap();
            self.director.track(id);
            id
        }

        fn kill(&mut self, id: EntityId, tag: EntityTag) {
            let rock = self
                .registry
                .get_mut(id)
                .and_then(Entity::as_asteroid_mut)
                .unwrap();
            rock.health = 0;
            rock.killer = Some(Killer {
                id: EntityId(999),
                tag,
            });
        }

        fn run(&mut self) {
            let mut frame = self.h.frame();
            self.director
                .update(&mut self.registry, self.player, &mut frame)
                .unwrap();
        }

        fn score(&self) -> u64 {
            player_score(&self.registry, self.player)
        }

        fn set_score(&mut self, score: u64) {
            self.registry
                .get_mut(self.player)
                .and_then(Entity::as_player_mut)
                .unwrap()
                .score = score;
        }

        fn asteroids(&self) -> Vec<&Entity> {
            self.registry
                .iter()
                .filter(|e| e.tag() == EntityTag::Asteroid)
                .collect()
        }
    }

    #[test]
    fn test_large_split_yields_two_mediums() {
        let mut s = Scene::new();
        let parent = s.rock(Tier::Large, Vec2::new(300.0, 200.0), Vec2::new(1.0, -1.0));
        s.kill(parent, EntityTag::Bullet);
        s.run();

        assert!(!s.registry.contains(parent));
        assert!(!s.director.tracked().contains(&parent));
        let children = s.asteroids();
        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|c| c.as_asteroid().unwrap().tier == Tier::Medium));
        assert_eq!(children[0].body.position(), Vec2::new(300.0, 215.0));
        assert_eq!(children[0].body.kin.velocity, Vec2::new(1.0, -1.0));
        assert_eq!(children[1].body.position(), Vec2::new(300.0, 200.0));
        assert_eq!(children[1].body.kin.velocity, Vec2::new(-1.0, 1.0));
        assert_eq!(s.director.tracked().len(), 2);

        // Explosion one size down, with its sound
        let boom = s.registry.iter().find(|e| e.tag() == EntityTag::Explosion).unwrap();
        assert_eq!(boom.body.sprite(), crate::content::names::EXPLOSION_MEDIUM);
        assert!(s.h.events.contains(&GameEvent::Sound(SoundEffect::Explosion)));
    }

    #[test]
    fn test_small_asteroid_leaves_no_children() {
        let mut s = Scene::new();
        let rock = s.rock(Tier::Small, Vec2::new(50.0, 50.0), Vec2::ZERO);
        s.kill(rock, EntityTag::Bullet);
        s.run();
        assert!(s.asteroids().is_empty());
        assert!(s.director.tracked().is_empty());
        assert_eq!(s.score(), 100);
    }

    #[test]
    fn test_score_by_killer() {
        for (tier, killer, expected) in [
            (Tier::Large, EntityTag::Bullet, 20),
            (Tier::Medium, EntityTag::Bullet, 50),
            (Tier::Small, EntityTag::Bullet, 100),
            (Tier::Large, EntityTag::EnemyBullet, 0),
            (Tier::Small, EntityTag::EnemyBullet, 0),
        ] {
            let mut s = Scene::new();
            let rock = s.rock(tier, Vec2::new(100.0, 100.0), Vec2::ZERO);
            s.kill(rock, killer);
            s.run();
            assert_eq!(s.score(), expected, "{tier:?} killed by {killer:?}");
        }
    }

    #[test]
    fn test_spawn_cap_follows_score() {
        let mut s = Scene::new();
        s.run();
        assert_eq!(s.director.asteroid_cap(), 3);
        s.set_score(2500);
        s.run();
        assert_eq!(s.director.asteroid_cap(), 5);
    }

    #[test]
    fn test_extra_life_on_threshold() {
        let mut s = Scene::new();
        s.set_score(9999);
        s.run();
        let lives = |s: &Scene| s.registry.get(s.player).unwrap().as_player().unwrap().lives;
        assert_eq!(lives(&s), 3);
        assert_eq!(s.director.max_lives(), 3);

        s.set_score(10_001);
        s.run();
        assert_eq!(s.director.max_lives(), 4);
        assert_eq!(lives(&s), 4);
        assert!(s.h.events.contains(&GameEvent::ExtraLife));

        // Only on the frame the threshold moves
        s.run();
        assert_eq!(lives(&s), 4);
    }

    #[test]
    fn test_fresh_asteroids_respect_cap() {
        let mut s = Scene::new();
        for _ in 0..10 {
            s.h.now += 2.0;
            s.run();
        }
        assert_eq!(s.director.fresh().len(), 3);
        assert_eq!(s.asteroids().len(), 3);
        for rock in s.asteroids() {
            let v = rock.body.kin.velocity;
            assert_eq!(v.x.abs(), 1.0);
            assert_eq!(v.y.abs(), 1.0);
            let p = rock.body.position();
            // Placed half a rock in from its corner, drifting inward
            assert!(p.x == 30.0 || p.x == 770.0, "x = {}", p.x);
            assert!(p.y == 30.0 || p.y == 450.0, "y = {}", p.y);
            assert_eq!(v.x > 0.0, p.x < 400.0);
            assert_eq!(v.y > 0.0, p.y < 240.0);
        }

        // Children of a fresh rock do not count against the cap
        let first = s.director.fresh()[0];
        s.kill(first, EntityTag::Bullet);
        s.h.now += 2.0;
        s.run();
        assert_eq!(s.director.fresh().len(), 2);
        s.h.now += 2.0;
        s.run();
        assert_eq!(s.director.fresh().len(), 3);
        assert_eq!(s.director.tracked().len(), 5);
    }

    #[test]
    fn test_enemy_ship_spawns_once_on_left_edge() {
        let mut s = Scene::new();
        s.h.now += 16.0;
        s.run();
        let ships: Vec<_> = s
            .registry
            .iter()
            .filter(|e| e.tag() == EntityTag::EnemyShip)
            .collect();
        assert_eq!(ships.len(), 1);
        let ship = ships[0];
        assert_eq!(ship.body.position().x, 0.0);
        assert!((50.0..480.0).contains(&ship.body.position().y));
        let Kind::EnemyShip(state) = &ship.kind else {
            unreachable!()
        };
        assert_eq!(state.tier, Tier::Large);
        assert_eq!(state.player, s.player);

        // A live ship blocks the next one
        s.h.now += 16.0;
        s.run();
        assert_eq!(s.registry.count(EntityTag::EnemyShip), 1);
    }

    #[test]
    fn test_high_score_brings_small_ships() {
        let mut s = Scene::new();
        s.set_score(10_001);
        s.h.now += 16.0;
        s.run();
        let ship = s
            .registry
            .iter()
            .find_map(Entity::as_enemy_ship)
            .unwrap();
        assert_eq!(ship.tier, Tier::Small);
    }
}
