//! Enumeration types used throughout the simulation.

use std::ops::{BitAnd, BitOr};

use serde::{Deserialize, Serialize};

/// Top-level match state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchState {
    /// Set up, waiting for the first key press.
    #[default]
    None,
    Run,
    Win,
    Loose,
    Paused,
}

impl MatchState {
    /// True once the match has ended in either direction.
    pub fn is_finished(self) -> bool {
        matches!(self, MatchState::Win | MatchState::Loose)
    }
}

/// How a finished match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Win,
    Loose,
}

impl MatchOutcome {
    pub fn state(self) -> MatchState {
        match self {
            MatchOutcome::Win => MatchState::Win,
            MatchOutcome::Loose => MatchState::Loose,
        }
    }
}

/// Lifecycle state shared by every simulated element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementState {
    #[default]
    None,
    Idle,
    Moving,
    Paused,
    Stopped,
    /// Fatally hit; the death animation runs on the next update.
    WillDie,
    Dead,
    /// Eligible for removal from the live collection.
    Unused,
}

impl ElementState {
    pub fn is_dead(self) -> bool {
        matches!(
            self,
            ElementState::WillDie | ElementState::Dead | ElementState::Unused
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            ElementState::None => "none",
            ElementState::Idle => "idle",
            ElementState::Moving => "moving",
            ElementState::Paused => "paused",
            ElementState::Stopped => "stopped",
            ElementState::WillDie => "willDie",
            ElementState::Dead => "dead",
            ElementState::Unused => "unused",
        }
    }
}

/// Facing direction of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    None,
    Left,
    Right,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::None => Direction::None,
        }
    }
}

/// Declared variant of an element, visible to the other side of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Tank,
    Bullet,
    Rocket,
    Terrain,
    Sensor,
    ParallaxBackground,
}

/// Player weapons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weapon {
    Bullet,
    Rocket,
}

/// Turret poses a tank can take.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurretAngle {
    /// Driving pose.
    Down,
    /// Halted pose.
    Middle,
    /// Idle pose before the match starts.
    #[default]
    Up,
    /// Short kick while firing.
    Recoil,
}

impl TurretAngle {
    pub fn degrees(self) -> f64 {
        match self {
            TurretAngle::Down => 0.0,
            TurretAngle::Middle => 30.0,
            TurretAngle::Up => 45.0,
            TurretAngle::Recoil => 10.0,
        }
    }
}

/// Sound cues for the frontend audio system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Shot,
    Explosion,
    BulletHit,
    EmptyWeapon,
}

/// Physics category bits used to decide which contacts are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category(pub u32);

impl Category {
    pub const NONE: Category = Category(0x0000_0000);
    pub const PLAYER: Category = Category(0x0000_0001);
    pub const ENEMY: Category = Category(0x0000_0010);
    pub const WEAPON: Category = Category(0x0000_0100);
    pub const TERRAIN: Category = Category(0x0000_1000);
    pub const SENSOR: Category = Category(0x0001_0000);

    pub fn intersects(self, other: Category) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for Category {
    type Output = Category;

    fn bitor(self, rhs: Category) -> Category {
        Category(self.0 | rhs.0)
    }
}

impl BitAnd for Category {
    type Output = Category;

    fn bitand(self, rhs: Category) -> Category {
        Category(self.0 & rhs.0)
    }
}
