//! Weapon, health and score bookkeeping.
//!
//! Everything here is plain integer arithmetic. Callers turn the returned
//! changes into `GameEvent`s.

use serde::{Deserialize, Serialize};

use tanks_core::constants::*;
use tanks_core::enums::Weapon;

/// Economy tuning. `Default` is the stock game balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomyRules {
    pub initial_health: u32,
    pub max_health: u32,
    pub initial_bullets: u32,
    pub initial_rockets: u32,
    pub bullets_for_tank: i32,
    pub hit_by_tank: i32,
    pub shoot_bullet: i32,
    pub shoot_rocket: i32,
    pub destroy_tank_health: i32,
    pub destroy_tank_score: i32,
    pub remaining_bullet_score: u32,
    pub remaining_rocket_score: u32,
}

impl Default for EconomyRules {
    fn default() -> Self {
        Self {
            initial_health: INITIAL_HEALTH,
            max_health: MAX_HEALTH,
            initial_bullets: INITIAL_BULLETS,
            initial_rockets: INITIAL_ROCKETS,
            bullets_for_tank: BULLETS_FOR_TANK,
            hit_by_tank: HEALTH_HIT_BY_TANK,
            shoot_bullet: HEALTH_SHOOT_BULLET,
            shoot_rocket: HEALTH_SHOOT_ROCKET,
            destroy_tank_health: HEALTH_DESTROY_TANK,
            destroy_tank_score: SCORE_DESTROY_TANK,
            remaining_bullet_score: SCORE_REMAINING_BULLET,
            remaining_rocket_score: SCORE_REMAINING_ROCKET,
        }
    }
}

impl EconomyRules {
    /// Health cost of firing one shot of `weapon`.
    pub fn fire_cost(&self, weapon: Weapon) -> i32 {
        match weapon {
            Weapon::Bullet => self.shoot_bullet,
            Weapon::Rocket => self.shoot_rocket,
        }
    }

    /// Score bonus for the ammunition left at the end of a won match.
    pub fn ammo_bonus(&self, bullets: u32, rockets: u32) -> u32 {
        bullets
            .saturating_mul(self.remaining_bullet_score)
            .saturating_add(rockets.saturating_mul(self.remaining_rocket_score))
    }
}

/// Before/after pair of one bookkeeping mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    pub from: u32,
    pub to: u32,
}

impl Change {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// Result of a health mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthChange {
    pub change: Change,
    /// Health hit zero; the tank has to be destroyed.
    pub depleted: bool,
}

/// A tank's counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    pub health: u32,
    pub score: u32,
    pub bullets: u32,
    pub rockets: u32,
}

impl Ledger {
    pub fn new(rules: &EconomyRules) -> Self {
        Self {
            health: rules.initial_health.min(rules.max_health),
            score: 0,
            bullets: rules.initial_bullets,
            rockets: rules.initial_rockets,
        }
    }

    /// Add `delta` to health, clamping to `[0, max]`.
    pub fn change_health(&mut self, delta: i32, max: u32) -> HealthChange {
        let from = self.health;
        let raw = i64::from(from) + i64::from(delta);
        let depleted = raw <= 0;
        self.health = raw.clamp(0, i64::from(max)) as u32;
        HealthChange {
            change: Change {
                from,
                to: self.health,
            },
            depleted,
        }
    }

    pub fn change_score(&mut self, delta: i32) -> Change {
        apply(&mut self.score, delta)
    }

    pub fn change_bullets(&mut self, delta: i32) -> Change {
        apply(&mut self.bullets, delta)
    }

    pub fn change_rockets(&mut self, delta: i32) -> Change {
        apply(&mut self.rockets, delta)
    }

    pub fn ammo(&self, weapon: Weapon) -> u32 {
        match weapon {
            Weapon::Bullet => self.bullets,
            Weapon::Rocket => self.rockets,
        }
    }

    pub fn has_ammo(&self, weapon: Weapon) -> bool {
        self.ammo(weapon) > 0
    }

    pub fn out_of_ammo(&self) -> bool {
        self.bullets == 0 && self.rockets == 0
    }
}

fn apply(counter: &mut u32, delta: i32) -> Change {
    let from = *counter;
    *counter = from.saturating_add_signed(delta);
    Change { from, to: *counter }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_clamp_law() {
        let rules = EconomyRules::default();
        let mut ledger = Ledger::new(&rules);
        let deltas = [36, -1, -10, 500, -50, -50, 36, -200, 100, -7, i32::MAX, i32::MIN];
        for delta in deltas {
            let result = ledger.change_health(delta, rules.max_health);
            assert!(ledger.health <= rules.max_health);
            assert_eq!(result.change.to, ledger.health);
            assert_eq!(result.depleted, ledger.health == 0);
        }
    }

    #[test]
    fn test_health_overflow_clamps_to_max() {
        let mut ledger = Ledger::new(&EconomyRules::default());
        ledger.health = 90;
        let result = ledger.change_health(36, 100);
        assert_eq!(result.change, Change { from: 90, to: 100 });
        assert!(!result.depleted);
    }

    #[test]
    fn test_health_depletes_at_zero() {
        let mut ledger = Ledger::new(&EconomyRules::default());
        ledger.health = 10;
        let result = ledger.change_health(-10, 100);
        assert!(result.depleted);
        assert_eq!(ledger.health, 0);

        ledger.health = 10;
        let result = ledger.change_health(-50, 100);
        assert!(result.depleted);
        assert_eq!(ledger.health, 0);
    }

    #[test]
    fn test_counters_never_go_negative() {
        let mut ledger = Ledger::new(&EconomyRules::default());
        ledger.rockets = 1;
        assert_eq!(ledger.change_rockets(-3), Change { from: 1, to: 0 });
        assert_eq!(ledger.change_score(-100), Change { from: 0, to: 0 });
        assert!(!ledger.change_score(0).changed());
    }

    #[test]
    fn test_ammo_bonus() {
        let rules = EconomyRules::default();
        assert_eq!(rules.ammo_bonus(10, 2), 10 * 3 + 2 * 10);
        assert_eq!(rules.ammo_bonus(0, 0), 0);
        assert_eq!(rules.fire_cost(Weapon::Bullet), -1);
        assert_eq!(rules.fire_cost(Weapon::Rocket), -10);
    }

    #[test]
    fn test_out_of_ammo() {
        let mut ledger = Ledger::new(&EconomyRules::default());
        assert!(!ledger.out_of_ammo());
        ledger.bullets = 0;
        assert!(!ledger.out_of_ammo());
        assert!(!ledger.has_ammo(Weapon::Bullet));
        ledger.rockets = 0;
        assert!(ledger.out_of_ammo());
    }
}
