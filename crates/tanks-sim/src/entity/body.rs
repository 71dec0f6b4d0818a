//! Physics body data handed to the integrator.
//!
//! The simulation only writes target velocities, pinning and contact masks.
//! Positions and velocities belong to whichever `PhysicsIntegrator` runs.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use tanks_core::constants::*;
use tanks_core::enums::Category;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Axis-aligned box of `Body::size` centered on the position.
    Rect,
    /// Static polyline in world coordinates.
    EdgeChain(Vec<DVec2>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Velocity the body converges to; `None` leaves it to gravity.
    pub target_velocity: Option<DVec2>,
    pub size: DVec2,
    pub shape: Shape,
    pub category: Category,
    pub contact_mask: Category,
    pub dynamic: bool,
    pub pinned: bool,
    pub resting: bool,
    /// Settles onto the terrain instead of flying freely.
    pub follows_ground: bool,
}

impl Body {
    fn rect(position: DVec2, size: DVec2, category: Category, contact_mask: Category) -> Self {
        Self {
            position,
            velocity: DVec2::ZERO,
            target_velocity: None,
            size,
            shape: Shape::Rect,
            category,
            contact_mask,
            dynamic: true,
            pinned: false,
            resting: false,
            follows_ground: false,
        }
    }

    pub fn tank(position: DVec2, is_enemy: bool) -> Self {
        let (category, contact_mask) = if is_enemy {
            (
                Category::ENEMY,
                Category::PLAYER | Category::ENEMY | Category::SENSOR,
            )
        } else {
            (Category::PLAYER, Category::ENEMY | Category::SENSOR)
        };
        Self {
            follows_ground: true,
            ..Self::rect(
                position,
                DVec2::new(CHASSIS_WIDTH, CHASSIS_HEIGHT),
                category,
                contact_mask,
            )
        }
    }

    pub fn bullet(position: DVec2) -> Self {
        Self::rect(
            position,
            DVec2::splat(BULLET_SIZE),
            Category::WEAPON,
            Category::TERRAIN | Category::ENEMY,
        )
    }

    pub fn rocket(position: DVec2) -> Self {
        Self::rect(
            position,
            DVec2::splat(ROCKET_SIZE),
            Category::WEAPON,
            Category::TERRAIN | Category::PLAYER | Category::ENEMY,
        )
    }

    pub fn terrain(boundary: Vec<DVec2>) -> Self {
        Self {
            dynamic: false,
            shape: Shape::EdgeChain(boundary),
            ..Self::rect(DVec2::ZERO, DVec2::ZERO, Category::TERRAIN, Category::WEAPON)
        }
    }

    pub fn sensor(position: DVec2, height: f64) -> Self {
        Self {
            dynamic: false,
            ..Self::rect(
                position,
                DVec2::new(SENSOR_WIDTH, height),
                Category::SENSOR,
                Category::PLAYER | Category::ENEMY,
            )
        }
    }

    /// Whether a contact between the two bodies is reported at all.
    pub fn contact_relevant(&self, other: &Body) -> bool {
        self.category.intersects(other.contact_mask) || other.category.intersects(self.contact_mask)
    }

    /// Take the body out of contact reporting.
    pub fn disable_contacts(&mut self) {
        self.category = Category::NONE;
        self.contact_mask = Category::NONE;
    }

    /// Min and max corners of a `Rect` body.
    pub fn aabb(&self) -> (DVec2, DVec2) {
        let half = self.size / 2.0;
        (self.position - half, self.position + half)
    }

    pub fn overlaps(&self, other: &Body) -> bool {
        let (a_min, a_max) = self.aabb();
        let (b_min, b_max) = other.aabb();
        a_min.x <= b_max.x && b_min.x <= a_max.x && a_min.y <= b_max.y && b_min.y <= a_max.y
    }
}
