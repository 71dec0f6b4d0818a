//! Collision resolution rules.
//!
//! A contact between A and B is resolved as `collide(A, B)` followed by
//! `collide(B, A)`. Each call looks only at the subject's own state and the
//! other side's declared variant, and yields a list of reactions that the
//! simulation then applies. The table itself is pure.

use tanks_core::constants::{BULLET_CRATER_ALPHA, ROCKET_CRATER_ALPHA};
use tanks_core::enums::{ElementKind, ElementState, SoundCue, Weapon};
use tanks_core::types::EntityId;

use crate::entity::Entity;

/// What one side of a contact looks like to the rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactSide {
    pub id: EntityId,
    pub kind: ElementKind,
    pub state: ElementState,
    pub is_enemy: bool,
    pub x: f64,
}

impl ContactSide {
    pub fn of(entity: &Entity) -> Self {
        Self {
            id: entity.id(),
            kind: entity.element_kind(),
            state: entity.state(),
            is_enemy: entity.as_tank().is_some_and(|t| t.is_enemy),
            x: entity.position().map_or(0.0, |p| p.x),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reaction {
    /// Projectile spent: hidden, resting, unused. Shock wave, shake and flash.
    Consume,
    Sound(SoundCue),
    /// Crater decal at the contact point.
    Crater { alpha: f32 },
    /// Register `hits` hits on an enemy tank, credited to the player.
    Hit {
        target: EntityId,
        hits: u32,
        weapon: Weapon,
    },
    /// Player rammed an enemy tank.
    Ram { enemy: EntityId },
    /// Two enemies collided: `faster` speeds up, `waiting` pauses.
    Convoy {
        faster: EntityId,
        waiting: EntityId,
    },
    /// Enemy touched a boundary sensor.
    Reverse,
    /// Player touched a boundary sensor.
    Halt,
}

fn weapon_of(kind: ElementKind) -> Option<Weapon> {
    match kind {
        ElementKind::Bullet => Some(Weapon::Bullet),
        ElementKind::Rocket => Some(Weapon::Rocket),
        _ => None,
    }
}

/// Reactions of `subject` to touching `other`.
pub fn resolve(subject: &ContactSide, other: &ContactSide) -> Vec<Reaction> {
    match subject.kind {
        ElementKind::Bullet | ElementKind::Rocket => projectile_rules(subject, other),
        ElementKind::Tank => tank_rules(subject, other),
        ElementKind::Terrain | ElementKind::Sensor | ElementKind::ParallaxBackground => Vec::new(),
    }
}

fn projectile_rules(subject: &ContactSide, other: &ContactSide) -> Vec<Reaction> {
    if subject.state != ElementState::Moving {
        return Vec::new();
    }
    let Some(weapon) = weapon_of(subject.kind) else {
        return Vec::new();
    };

    let mut reactions = vec![Reaction::Consume];
    if weapon == Weapon::Rocket {
        reactions.push(Reaction::Sound(SoundCue::Explosion));
    }

    match other.kind {
        ElementKind::Tank if other.is_enemy => {
            let hits = match weapon {
                Weapon::Bullet => 1,
                Weapon::Rocket => 2,
            };
            reactions.push(Reaction::Hit {
                target: other.id,
                hits,
                weapon,
            });
            if weapon == Weapon::Bullet {
                reactions.push(Reaction::Sound(SoundCue::Explosion));
            }
        }
        // Rockets can touch the player; the rocket is spent, nothing else.
        ElementKind::Tank => {}
        ElementKind::Terrain => match weapon {
            Weapon::Bullet => {
                reactions.push(Reaction::Crater {
                    alpha: BULLET_CRATER_ALPHA,
                });
                reactions.push(Reaction::Sound(SoundCue::BulletHit));
            }
            Weapon::Rocket => reactions.push(Reaction::Crater {
                alpha: ROCKET_CRATER_ALPHA,
            }),
        },
        ElementKind::Bullet
        | ElementKind::Rocket
        | ElementKind::Sensor
        | ElementKind::ParallaxBackground => {}
    }
    reactions
}

fn tank_rules(subject: &ContactSide, other: &ContactSide) -> Vec<Reaction> {
    if subject.state.is_dead() {
        return Vec::new();
    }

    match other.kind {
        ElementKind::Tank => {
            if other.state.is_dead() {
                return Vec::new();
            }
            match (subject.is_enemy, other.is_enemy) {
                (false, true) => vec![Reaction::Ram { enemy: other.id }],
                // Only the side further left acts, so the mirrored call is a no-op.
                (true, true) if (subject.x, subject.id) < (other.x, other.id) => {
                    vec![Reaction::Convoy {
                        faster: subject.id,
                        waiting: other.id,
                    }]
                }
                _ => Vec::new(),
            }
        }
        ElementKind::Sensor if subject.is_enemy => vec![Reaction::Reverse],
        ElementKind::Sensor => vec![Reaction::Halt],
        ElementKind::Bullet
        | ElementKind::Rocket
        | ElementKind::Terrain
        | ElementKind::ParallaxBackground => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn side(id: u32, kind: ElementKind, state: ElementState, is_enemy: bool, x: f64) -> ContactSide {
        ContactSide {
            id: EntityId(id),
            kind,
            state,
            is_enemy,
            x,
        }
    }

    #[test]
    fn test_bullet_on_enemy_hits_once() {
        let bullet = side(1, ElementKind::Bullet, ElementState::Moving, false, 0.0);
        let enemy = side(2, ElementKind::Tank, ElementState::Moving, true, 10.0);
        let reactions = resolve(&bullet, &enemy);
        assert_eq!(reactions[0], Reaction::Consume);
        assert!(reactions.contains(&Reaction::Hit {
            target: EntityId(2),
            hits: 1,
            weapon: Weapon::Bullet,
        }));
        // Enemy side ignores projectiles.
        assert!(resolve(&enemy, &bullet).is_empty());
    }

    #[test]
    fn test_rocket_on_enemy_hits_twice() {
        let rocket = side(1, ElementKind::Rocket, ElementState::Moving, false, 0.0);
        let enemy = side(2, ElementKind::Tank, ElementState::Stopped, true, 10.0);
        assert!(resolve(&rocket, &enemy).contains(&Reaction::Hit {
            target: EntityId(2),
            hits: 2,
            weapon: Weapon::Rocket,
        }));
    }

    #[test]
    fn test_spent_projectile_is_inert() {
        let bullet = side(1, ElementKind::Bullet, ElementState::Unused, false, 0.0);
        let terrain = side(2, ElementKind::Terrain, ElementState::None, false, 0.0);
        assert!(resolve(&bullet, &terrain).is_empty());
    }

    #[test]
    fn test_crater_alpha_per_weapon() {
        let terrain = side(9, ElementKind::Terrain, ElementState::None, false, 0.0);
        let bullet = side(1, ElementKind::Bullet, ElementState::Moving, false, 0.0);
        let rocket = side(2, ElementKind::Rocket, ElementState::Moving, false, 0.0);
        assert!(resolve(&bullet, &terrain).contains(&Reaction::Crater { alpha: 1.0 }));
        assert!(resolve(&bullet, &terrain).contains(&Reaction::Sound(SoundCue::BulletHit)));
        assert!(resolve(&rocket, &terrain).contains(&Reaction::Crater { alpha: 0.5 }));
        assert!(resolve(&rocket, &terrain).contains(&Reaction::Sound(SoundCue::Explosion)));
    }

    #[test]
    fn test_rocket_on_player_only_consumed() {
        let rocket = side(1, ElementKind::Rocket, ElementState::Moving, false, 0.0);
        let player = side(2, ElementKind::Tank, ElementState::Moving, false, 0.0);
        let reactions = resolve(&rocket, &player);
        assert!(reactions.contains(&Reaction::Consume));
        assert!(!reactions.iter().any(|r| matches!(r, Reaction::Hit { .. })));
    }

    #[test]
    fn test_ram_only_player_side_reacts() {
        let player = side(1, ElementKind::Tank, ElementState::Moving, false, 0.0);
        let enemy = side(2, ElementKind::Tank, ElementState::Moving, true, 50.0);
        assert_eq!(
            resolve(&player, &enemy),
            vec![Reaction::Ram { enemy: EntityId(2) }]
        );
        assert!(resolve(&enemy, &player).is_empty());
    }

    #[test]
    fn test_convoy_left_tank_speeds_up() {
        let left = side(7, ElementKind::Tank, ElementState::Moving, true, 100.0);
        let right = side(3, ElementKind::Tank, ElementState::Moving, true, 200.0);
        let expected = vec![Reaction::Convoy {
            faster: EntityId(7),
            waiting: EntityId(3),
        }];
        assert_eq!(resolve(&left, &right), expected);
        assert!(resolve(&right, &left).is_empty());
    }

    #[test]
    fn test_convoy_tie_breaks_on_id() {
        let a = side(1, ElementKind::Tank, ElementState::Moving, true, 100.0);
        let b = side(2, ElementKind::Tank, ElementState::Moving, true, 100.0);
        assert_eq!(resolve(&a, &b).len(), 1);
        assert!(resolve(&b, &a).is_empty());
    }

    #[test]
    fn test_dead_tanks_ignored() {
        let player = side(1, ElementKind::Tank, ElementState::Moving, false, 0.0);
        let wreck = side(2, ElementKind::Tank, ElementState::Dead, true, 0.0);
        assert!(resolve(&player, &wreck).is_empty());
        assert!(resolve(&wreck, &player).is_empty());

        let dying = side(3, ElementKind::Tank, ElementState::WillDie, true, 0.0);
        let sensor = side(4, ElementKind::Sensor, ElementState::None, false, 0.0);
        assert!(resolve(&dying, &sensor).is_empty());
    }

    #[test]
    fn test_sensor_reverses_enemy_halts_player() {
        let sensor = side(4, ElementKind::Sensor, ElementState::None, false, 0.0);
        let enemy = side(2, ElementKind::Tank, ElementState::Moving, true, 0.0);
        let player = side(1, ElementKind::Tank, ElementState::Moving, false, 0.0);
        assert_eq!(resolve(&enemy, &sensor), vec![Reaction::Reverse]);
        assert_eq!(resolve(&player, &sensor), vec![Reaction::Halt]);
        assert!(resolve(&sensor, &enemy).is_empty());
    }
}
