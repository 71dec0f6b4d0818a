//! Physics collaborator seam and the kinematic reference integrator.
//!
//! The simulation never integrates forces itself. Each step it hands every
//! body to a `PhysicsIntegrator` and resolves the contacts that come back.
//! `KinematicIntegrator` is enough to run matches headless: velocities
//! converge on their targets, tanks settle onto the terrain and overlapping
//! boxes report a contact once when they start touching.

use std::collections::HashSet;

use glam::DVec2;

use tanks_core::constants::{GRAVITY, VELOCITY_CONVERGENCE_RATE};
use tanks_core::enums::Category;
use tanks_core::types::EntityId;
use tanks_terrain::polyline::height_at;

use crate::entity::{Body, Shape};

/// A contact that began this step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub a: EntityId,
    pub b: EntityId,
    pub point: DVec2,
}

/// One body lent to the integrator for a step.
#[derive(Debug)]
pub struct BodyMut<'a> {
    pub id: EntityId,
    pub body: &'a mut Body,
}

pub trait PhysicsIntegrator {
    /// Advance all bodies by `dt` and return the contacts that began.
    fn integrate(&mut self, bodies: &mut [BodyMut<'_>], dt: f64) -> Vec<Contact>;
}

#[derive(Debug, Clone)]
struct Ground {
    id: EntityId,
    boundary: Vec<DVec2>,
    category: Category,
    contact_mask: Category,
}

#[derive(Debug)]
pub struct KinematicIntegrator {
    /// Fraction of the velocity error corrected per step.
    pub rate: f64,
    pub gravity: f64,
    ground: Option<Ground>,
    touching: HashSet<(EntityId, EntityId)>,
}

impl Default for KinematicIntegrator {
    fn default() -> Self {
        Self {
            rate: VELOCITY_CONVERGENCE_RATE,
            gravity: GRAVITY,
            ground: None,
            touching: HashSet::new(),
        }
    }
}

impl KinematicIntegrator {
    pub fn new() -> Self {
        Self::default()
    }

    fn refresh_ground(&mut self, bodies: &[BodyMut<'_>]) {
        let found = bodies.iter().find_map(|b| match &b.body.shape {
            Shape::EdgeChain(points) => Some((b.id, points, &*b.body)),
            Shape::Rect => None,
        });
        match found {
            Some((id, points, _))
                if self
                    .ground
                    .as_ref()
                    .is_some_and(|g| g.id == id && g.boundary.last() == points.last()) => {}
            Some((id, points, body)) => {
                self.ground = Some(Ground {
                    id,
                    boundary: points.clone(),
                    category: body.category,
                    contact_mask: body.contact_mask,
                });
            }
            None => self.ground = None,
        }
    }

    fn ground_height(&self, x: f64) -> Option<f64> {
        self.ground.as_ref().and_then(|g| height_at(&g.boundary, x))
    }

    fn advance(&self, body: &mut Body, dt: f64) {
        if !body.dynamic || body.resting || body.pinned {
            return;
        }

        if body.follows_ground {
            if let Some(target) = body.target_velocity {
                body.velocity.x += (target.x - body.velocity.x) * self.rate;
            }
            body.position.x += body.velocity.x * dt;

            body.velocity.y -= self.gravity * dt;
            body.position.y += body.velocity.y * dt;
            if let Some(ground) = self.ground_height(body.position.x) {
                let rest_y = ground + body.size.y / 2.0;
                if body.position.y <= rest_y {
                    body.position.y = rest_y;
                    body.velocity.y = 0.0;
                }
            }
            return;
        }

        match body.target_velocity {
            Some(target) => body.velocity += (target - body.velocity) * self.rate,
            None => body.velocity.y -= self.gravity * dt,
        }
        body.position += body.velocity * dt;
    }

    fn ground_contact(&self, id: EntityId, body: &Body) -> Option<Contact> {
        let ground = self.ground.as_ref()?;
        let relevant = body.category.intersects(ground.contact_mask)
            || ground.category.intersects(body.contact_mask);
        if !relevant || body.resting {
            return None;
        }
        let x = body.position.x;
        let height = height_at(&ground.boundary, x)?;
        if body.position.y - body.size.y / 2.0 > height {
            return None;
        }
        Some(Contact {
            a: id,
            b: ground.id,
            point: DVec2::new(x, height),
        })
    }
}

fn ordered(a: EntityId, b: EntityId) -> (EntityId, EntityId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl PhysicsIntegrator for KinematicIntegrator {
    fn integrate(&mut self, bodies: &mut [BodyMut<'_>], dt: f64) -> Vec<Contact> {
        self.refresh_ground(bodies);

        for item in bodies.iter_mut() {
            self.advance(&mut *item.body, dt);
        }

        let mut now_touching = HashSet::new();
        let mut candidates = Vec::new();

        for item in bodies.iter() {
            if let Some(contact) = self.ground_contact(item.id, &*item.body) {
                candidates.push(contact);
            }
        }

        for (i, a) in bodies.iter().enumerate() {
            if !matches!(a.body.shape, Shape::Rect) {
                continue;
            }
            for b in &bodies[i + 1..] {
                if !matches!(b.body.shape, Shape::Rect)
                    || !a.body.contact_relevant(&*b.body)
                    || !a.body.overlaps(&*b.body)
                {
                    continue;
                }
                candidates.push(Contact {
                    a: a.id,
                    b: b.id,
                    point: (a.body.position + b.body.position) / 2.0,
                });
            }
        }

        let mut began = Vec::new();
        for contact in candidates {
            let key = ordered(contact.a, contact.b);
            now_touching.insert(key);
            if !self.touching.contains(&key) {
                began.push(contact);
            }
        }
        self.touching = now_touching;
        began
    }
}
