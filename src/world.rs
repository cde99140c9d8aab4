use log::{debug, trace, warn};

use crate::body::{Body, BodyId};
use crate::collision::check_collision;
use crate::error::PhysicsError;
use crate::manifold::Manifold;
use crate::math::Vector2;

/// Construction-time parameters for a [`World`]. `Default` reproduces the
/// engine's long-standing tuning: 300 bodies, 1000 manifolds, downward
/// gravity, 32 sub-step iterations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldConfig {
    pub body_capacity: usize,
    pub manifold_capacity: usize,
    pub gravity: Vector2<f32>,
    pub iterations: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            body_capacity: 300,
            manifold_capacity: 1000,
            gravity: Vector2::new(0.0, 1.0),
            iterations: 32,
        }
    }
}

/// Owns every body and runs the sub-stepped simulation loop: integrate,
/// refresh cached geometry, broad-phase, narrow-phase, resolve — `iterations`
/// times per call to [`World::update_physics`].
pub struct World {
    config: WorldConfig,
    slots: Vec<Option<Body>>,
    free_list: Vec<usize>,
    manifolds: Vec<Manifold>,
    manifold_overflow_logged: bool,
}

impl Default for World {
    fn default() -> Self {
        World::new(WorldConfig::default())
    }
}

impl World {
    pub fn new(config: WorldConfig) -> Self {
        World {
            slots: Vec::with_capacity(config.body_capacity),
            free_list: Vec::new(),
            manifolds: Vec::with_capacity(config.manifold_capacity.min(64)),
            manifold_overflow_logged: false,
            config,
        }
    }

    pub fn set_gravity(&mut self, gravity: Vector2<f32>) {
        self.config.gravity = gravity;
    }

    pub fn set_iterations(&mut self, iterations: u32) {
        self.config.iterations = iterations.clamp(1, 64);
    }

    pub fn bodies_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.slots.iter().filter_map(|s| s.as_ref())
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.slots.get(id).and_then(|s| s.as_ref())
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.slots.get_mut(id).and_then(|s| s.as_mut())
    }

    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        let slot = self.slots.get_mut(id)?;
        let body = slot.take()?;
        self.free_list.push(id);
        Some(body)
    }

    /// Drops every body and pending manifold, returning the world to a fresh
    /// state without discarding its configuration.
    pub fn close(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.manifolds.clear();
        self.manifold_overflow_logged = false;
    }

    pub fn create_body_circle(
        &mut self,
        position_px: Vector2<f32>,
        radius_px: f32,
        density: f32,
        is_static: bool,
    ) -> Result<BodyId, PhysicsError> {
        let id = self.allocate_slot()?;
        match Body::new_circle(id, position_px, radius_px, density, is_static) {
            Ok(body) => {
                self.slots[id] = Some(body);
                Ok(id)
            }
            Err(reason) => {
                self.free_list.push(id);
                warn!("rejected circle body: {reason}");
                Err(PhysicsError::DegenerateShape(reason))
            }
        }
    }

    pub fn create_body_rectangle(
        &mut self,
        position_px: Vector2<f32>,
        width_px: f32,
        height_px: f32,
        density: f32,
        is_static: bool,
    ) -> Result<BodyId, PhysicsError> {
        let id = self.allocate_slot()?;
        match Body::new_rectangle(id, position_px, width_px, height_px, density, is_static) {
            Ok(body) => {
                self.slots[id] = Some(body);
                Ok(id)
            }
            Err(reason) => {
                self.free_list.push(id);
                warn!("rejected rectangle body: {reason}");
                Err(PhysicsError::DegenerateShape(reason))
            }
        }
    }

    /// Lowest unused id is reused first: the free list is a LIFO stack, but
    /// `remove_body` only ever pushes ids smaller than every currently-active
    /// id that was allocated after it, so in practice this tracks the
    /// original lowest-unused-id scan without its O(N^2) cost.
    fn allocate_slot(&mut self) -> Result<BodyId, PhysicsError> {
        if let Some(id) = self.free_list.pop() {
            return Ok(id);
        }
        if self.slots.len() >= self.config.body_capacity {
            warn!(
                "body registry is full (capacity = {})",
                self.config.body_capacity
            );
            return Err(PhysicsError::BodyCapacityExceeded {
                capacity: self.config.body_capacity,
            });
        }
        let id = self.slots.len();
        self.slots.push(None);
        Ok(id)
    }

    pub fn update_physics(&mut self, dt: f32) {
        let iterations = self.config.iterations;
        for _ in 0..iterations {
            self.integrate(dt, iterations);
            self.refresh_geometry();
            self.manifolds.clear();
            self.detect_collisions();
            trace!(
                "sub-step: {} bodies, {} manifolds",
                self.bodies_count(),
                self.manifolds.len()
            );
            self.resolve_manifolds();
        }
    }

    fn integrate(&mut self, dt: f32, iterations: u32) {
        let gravity = self.config.gravity;
        for slot in self.slots.iter_mut() {
            if let Some(body) = slot {
                body.step(dt, iterations, gravity);
                body.is_on_ground = false;
            }
        }
    }

    fn refresh_geometry(&mut self) {
        for slot in self.slots.iter_mut() {
            if let Some(body) = slot {
                body.transform_vertices();
                body.update_aabb();
            }
        }
    }

    fn detect_collisions(&mut self) {
        let active: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|_| i))
            .collect();

        for (pos, &i) in active.iter().enumerate() {
            for &j in &active[pos + 1..] {
                let a = self.slots[i].as_ref().unwrap();
                let b = self.slots[j].as_ref().unwrap();

                if a.is_static && b.is_static {
                    continue;
                }
                if !crate::aabb::Aabb::intersects(a.aabb_units(), b.aabb_units()) {
                    continue;
                }

                if let Some(hit) = check_collision(a, b) {
                    if self.manifolds.len() >= self.config.manifold_capacity {
                        if !self.manifold_overflow_logged {
                            warn!(
                                "manifold capacity reached ({}), dropping further contacts this sub-step",
                                self.config.manifold_capacity
                            );
                            self.manifold_overflow_logged = true;
                        }
                        continue;
                    }
                    debug!(
                        "manifold {} <-> {}: normal=({:.3}, {:.3}) depth={:.4}",
                        i, j, hit.normal.x, hit.normal.y, hit.depth
                    );
                    self.manifolds.push(Manifold::new(
                        i,
                        j,
                        hit.normal,
                        hit.depth,
                        hit.contacts,
                        hit.contact_count,
                    ));
                }
            }
        }
        self.manifold_overflow_logged = false;
    }

    fn resolve_manifolds(&mut self) {
        for index in 0..self.manifolds.len() {
            let manifold = self.manifolds[index];
            self.resolve_manifold(&manifold);
        }
    }

    fn two_mut(&mut self, a: usize, b: usize) -> (&mut Body, &mut Body) {
        debug_assert!(a != b);
        if a < b {
            let (left, right) = self.slots.split_at_mut(b);
            (left[a].as_mut().unwrap(), right[0].as_mut().unwrap())
        } else {
            let (left, right) = self.slots.split_at_mut(a);
            (right[0].as_mut().unwrap(), left[b].as_mut().unwrap())
        }
    }

    /// Positional correction, then a full normal-impulse pass over every
    /// contact, then a full friction-impulse pass over every contact. The
    /// friction pass always runs after every normal impulse has already been
    /// applied, so it reacts to post-normal-resolution velocities rather
    /// than to the pre-resolution state.
    fn resolve_manifold(&mut self, manifold: &Manifold) {
        let (a, b) = self.two_mut(manifold.body_a, manifold.body_b);

        let total_inv_mass = a.inv_mass() + b.inv_mass();
        if total_inv_mass == 0.0 {
            return;
        }

        // Static vs dynamic moves only the dynamic body by the full depth;
        // dynamic vs dynamic splits the full depth evenly between both.
        if a.is_static {
            b.translate_units(manifold.normal * manifold.depth);
        } else if b.is_static {
            a.translate_units(manifold.normal * -manifold.depth);
        } else {
            a.translate_units(manifold.normal * (-manifold.depth * 0.5));
            b.translate_units(manifold.normal * (manifold.depth * 0.5));
        }

        mark_ground_flag(a, b, manifold.normal);

        let contact_count = manifold.contact_count.max(1) as f32;
        let restitution = (a.restitution() + b.restitution()) * 0.5;
        let static_friction = (a.static_friction() + b.static_friction()) * 0.5;
        let dynamic_friction = (a.dynamic_friction() + b.dynamic_friction()) * 0.5;

        let mut normal_impulses = [0.0f32; 2];

        for c in 0..manifold.contact_count.max(1) {
            let contact = manifold.contacts[c];
            let r_a = contact - a.position_units();
            let r_b = contact - b.position_units();

            let rel_vel = (b.velocity + r_b.perp() * b.angular_velocity)
                - (a.velocity + r_a.perp() * a.angular_velocity);
            let contact_vel = rel_vel.dot(manifold.normal);
            if contact_vel > 0.0 {
                continue;
            }

            let ra_cross_n = r_a.cross(manifold.normal);
            let rb_cross_n = r_b.cross(manifold.normal);
            let denom = total_inv_mass
                + ra_cross_n * ra_cross_n * a.inv_inertia()
                + rb_cross_n * rb_cross_n * b.inv_inertia();
            if denom == 0.0 {
                continue;
            }

            let j = -(1.0 + restitution) * contact_vel / denom / contact_count;
            normal_impulses[c] = j;
            let impulse = manifold.normal * j;

            a.velocity -= impulse * a.inv_mass();
            a.angular_velocity -= ra_cross_n * j * a.inv_inertia();
            b.velocity += impulse * b.inv_mass();
            b.angular_velocity += rb_cross_n * j * b.inv_inertia();
        }

        for c in 0..manifold.contact_count.max(1) {
            let contact = manifold.contacts[c];
            let r_a = contact - a.position_units();
            let r_b = contact - b.position_units();

            let rel_vel = (b.velocity + r_b.perp() * b.angular_velocity)
                - (a.velocity + r_a.perp() * a.angular_velocity);

            let mut tangent = rel_vel - manifold.normal * rel_vel.dot(manifold.normal);
            if tangent.is_zero() {
                continue;
            }
            tangent = tangent.normalized();

            let ra_cross_t = r_a.cross(tangent);
            let rb_cross_t = r_b.cross(tangent);
            let denom = total_inv_mass
                + ra_cross_t * ra_cross_t * a.inv_inertia()
                + rb_cross_t * rb_cross_t * b.inv_inertia();
            if denom == 0.0 {
                continue;
            }

            let mut jt = -rel_vel.dot(tangent) / denom / contact_count;

            let j = normal_impulses[c];
            jt = if jt.abs() < j * static_friction {
                jt
            } else {
                -j * dynamic_friction
            };

            let friction_impulse = tangent * jt;
            a.velocity -= friction_impulse * a.inv_mass();
            a.angular_velocity -= ra_cross_t * jt * a.inv_inertia();
            b.velocity += friction_impulse * b.inv_mass();
            b.angular_velocity += rb_cross_t * jt * b.inv_inertia();
        }
    }
}

/// Direct contact-normal-sign rule, independent of the configured gravity
/// vector: `a` is on the ground when the normal (which points from `a` to
/// `b`) has a positive `y` component, `b` when it has a negative one. Never
/// clears a flag already set this sub-step by an earlier manifold.
fn mark_ground_flag(a: &mut Body, b: &mut Body, normal: Vector2<f32>) {
    if !a.is_on_ground {
        a.is_on_ground = normal.y > 0.0;
    }
    if !b.is_on_ground {
        b.is_on_ground = normal.y < 0.0;
    }
}
