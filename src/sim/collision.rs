//! Collision allow-list and touch reactions
//!
//! Only the ordered (attacker, target) pairs in [`RULES`] are ever tested.
//! A reaction mutates the target in place (health, killer, lives) and queues
//! removals and spawns as [`Command`]s so the current scan keeps seeing the
//! same entity set.

use super::entity::{Command, Entity, EntityId, EntityTag, Frame, Killer, Kind, Tier};
use super::registry::Registry;
use crate::content::names;

/// Reaction run when `attacker` overlaps `target`
pub type Reaction = fn(&mut Registry, EntityId, EntityId, &mut Frame, &mut Vec<Command>);

#[derive(Clone, Copy)]
pub struct CollisionRule {
    pub attacker: EntityTag,
    pub target: EntityTag,
    pub react: Reaction,
}

pub static RULES: [CollisionRule; 5] = [
    CollisionRule {
        attacker: EntityTag::Bullet,
        target: EntityTag::Asteroid,
        react: bullet_hits_asteroid,
    },
    CollisionRule {
        attacker: EntityTag::Bullet,
        target: EntityTag::EnemyShip,
        react: bullet_hits_enemy_ship,
    },
    CollisionRule {
        attacker: EntityTag::Asteroid,
        target: EntityTag::Player,
        react: asteroid_hits_player,
    },
    CollisionRule {
        attacker: EntityTag::EnemyBullet,
        target: EntityTag::Asteroid,
        react: enemy_bullet_hits_asteroid,
    },
    CollisionRule {
        attacker: EntityTag::EnemyBullet,
        target: EntityTag::Player,
        react: enemy_bullet_hits_player,
    },
];

pub fn rule_for(attacker: EntityTag, target: EntityTag) -> Option<&'static CollisionRule> {
    RULES
        .iter()
        .find(|rule| rule.attacker == attacker && rule.target == target)
}

/// Kinds that take part in collision scanning at all
pub fn is_collidable(tag: EntityTag) -> bool {
    RULES
        .iter()
        .any(|rule| rule.attacker == tag || rule.target == tag)
}

fn mark_killed(registry: &mut Registry, asteroid: EntityId, killer: Killer) {
    if let Some(rock) = registry.get_mut(asteroid).and_then(Entity::as_asteroid_mut) {
        rock.health = 0;
        rock.killer = Some(killer);
    }
}

fn strike_player(
    registry: &mut Registry,
    player: EntityId,
    frame: &mut Frame,
    commands: &mut Vec<Command>,
) {
    let Some(Entity {
        body,
        kind: Kind::Player(state),
        ..
    }) = registry.get_mut(player)
    else {
        return;
    };
    if !state.is_invulnerable(frame.now) {
        state.kill(body, frame, commands);
    }
}

fn bullet_hits_asteroid(
    registry: &mut Registry,
    bullet: EntityId,
    asteroid: EntityId,
    _frame: &mut Frame,
    commands: &mut Vec<Command>,
) {
    let killer = Killer {
        id: bullet,
        tag: EntityTag::Bullet,
    };
    mark_killed(registry, asteroid, killer);
    commands.push(Command::Despawn(bullet));
}

fn bullet_hits_enemy_ship(
    registry: &mut Registry,
    bullet: EntityId,
    ship: EntityId,
    frame: &mut Frame,
    commands: &mut Vec<Command>,
) {
    let killer = Killer {
        id: bullet,
        tag: EntityTag::Bullet,
    };
    kill_enemy_ship(registry, ship, killer, frame, commands);
    commands.push(Command::Despawn(bullet));
}

fn asteroid_hits_player(
    registry: &mut Registry,
    _asteroid: EntityId,
    player: EntityId,
    frame: &mut Frame,
    commands: &mut Vec<Command>,
) {
    strike_player(registry, player, frame, commands);
}

fn enemy_bullet_hits_asteroid(
    registry: &mut Registry,
    bullet: EntityId,
    asteroid: EntityId,
    _frame: &mut Frame,
    commands: &mut Vec<Command>,
) {
    // Only shots from large ships break rocks
    let from_large_ship = matches!(
        registry.get(bullet).map(|e| &e.kind),
        Some(Kind::EnemyBullet(state)) if state.shooter.is_some_and(|s| s.tier == Tier::Large)
    );
    if !from_large_ship {
        return;
    }
    let killer = Killer {
        id: bullet,
        tag: EntityTag::EnemyBullet,
    };
    mark_killed(registry, asteroid, killer);
    commands.push(Command::Despawn(bullet));
}

fn enemy_bullet_hits_player(
    registry: &mut Registry,
    bullet: EntityId,
    player: EntityId,
    frame: &mut Frame,
    commands: &mut Vec<Command>,
) {
    strike_player(registry, player, frame, commands);
    commands.push(Command::Despawn(bullet));
}

/// Destroy an enemy ship, crediting its player.
///
/// Enemy-bullet kills are ignored entirely, and a ship is only destroyed once
/// even if several shots land in the same scan.
pub fn kill_enemy_ship(
    registry: &mut Registry,
    ship: EntityId,
    killer: Killer,
    frame: &mut Frame,
    commands: &mut Vec<Command>,
) {
    if killer.is_enemy_bullet() {
        return;
    }
    let Some(Entity {
        body,
        kind: Kind::EnemyShip(state),
        ..
    }) = registry.get_mut(ship)
    else {
        return;
    };
    if state.destroyed {
        return;
    }
    state.destroyed = true;

    let award = match state.tier {
        Tier::Small => frame.tuning.enemy.score_small,
        Tier::Medium | Tier::Large => frame.tuning.enemy.score_large,
    };
    let player = state.player;
    let position = body.position();

    commands.push(Command::Despawn(ship));
    commands.push(Command::Spawn(Entity::explosion(
        names::SHIP_EXPLOSION,
        position,
    )));
    if let Some(p) = registry.get_mut(player).and_then(Entity::as_player_mut) {
        p.score += award;
    }
    log::debug!("enemy ship {ship:?} destroyed, +{award}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::tests::Harness;
    use crate::sim::entity::Shooter;
    use glam::Vec2;

    const ALL: [EntityTag; 7] = [
        EntityTag::Player,
        EntityTag::Asteroid,
        EntityTag::EnemyShip,
        EntityTag::Bullet,
        EntityTag::EnemyBullet,
        EntityTag::Explosion,
        EntityTag::Background,
    ];

    #[test]
    fn test_allow_list_is_exactly_five_pairs() {
        let allowed: Vec<_> = ALL
            .iter()
            .flat_map(|&a| ALL.iter().map(move |&b| (a, b)))
            .filter(|&(a, b)| rule_for(a, b).is_some())
            .collect();
        assert_eq!(
            allowed,
            vec![
                (EntityTag::Asteroid, EntityTag::Player),
                (EntityTag::Bullet, EntityTag::Asteroid),
                (EntityTag::Bullet, EntityTag::EnemyShip),
                (EntityTag::EnemyBullet, EntityTag::Player),
                (EntityTag::EnemyBullet, EntityTag::Asteroid),
            ]
        );
        // Never the reverse direction
        assert!(rule_for(EntityTag::Player, EntityTag::Asteroid).is_none());
        assert!(rule_for(EntityTag::EnemyShip, EntityTag::Player).is_none());
    }

    #[test]
    fn test_scenery_is_not_collidable() {
        assert!(!is_collidable(EntityTag::Explosion));
        assert!(!is_collidable(EntityTag::Background));
        assert!(is_collidable(EntityTag::EnemyShip));
    }

    fn arena(h: &Harness) -> (Registry, EntityId, EntityId) {
        let mut registry = Registry::builtin();
        let mut player = Entity::player(&h.tuning);
        player.body.kin.position = Vec2::new(400.0, 240.0);
        let player = registry.add(player).unwrap();
        let mut rock = Entity::asteroid(Tier::Medium, &h.tuning);
        rock.body.kin.position = Vec2::new(100.0, 100.0);
        let rock = registry.add(rock).unwrap();
        (registry, player, rock)
    }

    #[test]
    fn test_small_ship_bullet_spares_asteroids() {
        let mut h = Harness::new();
        let (mut registry, _, rock) = arena(&h);
        for (tier, dies) in [(Tier::Small, false), (Tier::Large, true)] {
            let shooter = Shooter {
                id: EntityId(99),
                tier,
            };
            let bullet = Entity::enemy_bullet(Vec2::ZERO, Vec2::X, 0.0, shooter, &h.tuning);
            let bullet = registry.add(bullet).unwrap();
            let mut commands = Vec::new();
            enemy_bullet_hits_asteroid(&mut registry, bullet, rock, &mut h.frame(), &mut commands);
            let state = registry.get(rock).unwrap().as_asteroid().unwrap();
            assert_eq!(state.is_dead(), dies);
            assert_eq!(commands.len(), usize::from(dies));
        }
        let killer = registry.get(rock).unwrap().as_asteroid().unwrap().killer;
        assert!(killer.unwrap().is_enemy_bullet());
    }

    #[test]
    fn test_enemy_ship_kill_scoring() {
        let mut h = Harness::new();
        for (tier, award) in [(Tier::Small, 1000), (Tier::Large, 200)] {
            let (mut registry, player, _) = arena(&h);
            let ship = Entity::enemy_ship(tier, Vec2::new(10.0, 60.0), player, &h.tuning);
            let ship = registry.add(ship).unwrap();
            let bullet = Killer {
                id: EntityId(50),
                tag: EntityTag::Bullet,
            };
            let mut commands = Vec::new();
            kill_enemy_ship(&mut registry, ship, bullet, &mut h.frame(), &mut commands);
            // A second hit in the same scan changes nothing
            kill_enemy_ship(&mut registry, ship, bullet, &mut h.frame(), &mut commands);
            assert_eq!(registry.get(player).unwrap().as_player().unwrap().score, award);
            assert_eq!(commands.len(), 2);
        }
    }

    #[test]
    fn test_enemy_bullet_kill_of_ship_does_nothing() {
        let mut h = Harness::new();
        let (mut registry, player, _) = arena(&h);
        let ship = Entity::enemy_ship(Tier::Small, Vec2::new(10.0, 60.0), player, &h.tuning);
        let ship = registry.add(ship).unwrap();
        let killer = Killer {
            id: EntityId(50),
            tag: EntityTag::EnemyBullet,
        };
        let mut commands = Vec::new();
        kill_enemy_ship(&mut registry, ship, killer, &mut h.frame(), &mut commands);
        assert!(commands.is_empty());
        assert_eq!(registry.get(player).unwrap().as_player().unwrap().score, 0);
    }

    #[test]
    fn test_invulnerable_player_survives_strike() {
        let mut h = Harness::new();
        let (mut registry, player, rock) = arena(&h);
        registry
            .get_mut(player)
            .and_then(Entity::as_player_mut)
            .unwrap()
            .last_respawn = h.now - 0.5;
        let mut commands = Vec::new();
        asteroid_hits_player(&mut registry, rock, player, &mut h.frame(), &mut commands);
        assert_eq!(registry.get(player).unwrap().as_player().unwrap().lives, 3);

        h.now += 1.0;
        asteroid_hits_player(&mut registry, rock, player, &mut h.frame(), &mut commands);
        assert_eq!(registry.get(player).unwrap().as_player().unwrap().lives, 2);
        // Asteroid contact never hurts the asteroid
        assert!(!registry.get(rock).unwrap().as_asteroid().unwrap().is_dead());
    }
    #[test]
    fn test_enemy_bullet_always_removes_itself() {
        let mut h = Harness::new();
        let (mut registry, player, _) = arena(&h);
        let shooter = Shooter {
            id: EntityId(99),
            tier: Tier::Small,
        };
        let shot = Entity::enemy_bullet(Vec2::ZERO, Vec2::X, 0.0, shooter, &h.tuning);
        let shot = registry.add(shot).unwrap();
        let despawned = |commands: &[Command]| {
            commands
                .iter()
                .any(|c| matches!(c, Command::Despawn(id) if *id == shot))
        };
        let lives = |registry: &Registry| registry.get(player).unwrap().as_player().unwrap().lives;

        // Freshly respawned: no damage, but the shot is still spent
        registry
            .get_mut(player)
            .and_then(Entity::as_player_mut)
            .unwrap()
            .last_respawn = h.now - 0.5;
        let mut commands = Vec::new();
        enemy_bullet_hits_player(&mut registry, shot, player, &mut h.frame(), &mut commands);
        assert_eq!(lives(&registry), 3);
        assert!(despawned(&commands));

        h.now += 1.0;
        let mut commands = Vec::new();
        enemy_bullet_hits_player(&mut registry, shot, player, &mut h.frame(), &mut commands);
        assert_eq!(lives(&registry), 2);
        assert!(despawned(&commands));
    }
}
