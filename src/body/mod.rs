mod shape;

pub use shape::Shape;

use crate::aabb::Aabb;
use crate::math::{clamp, Vector2};
use crate::PPU;

pub type BodyId = usize;

const DEFAULT_RESTITUTION: f32 = 0.0;
const DEFAULT_STATIC_FRICTION: f32 = 0.0;
const DEFAULT_DYNAMIC_FRICTION: f32 = 0.0;

/// A single rigid body: kinematic state, shape, derived inertial properties,
/// and the cached world-space geometry the solver reads every sub-step.
///
/// All spatial fields (`position`, vertices, AABB) are stored in simulation
/// units internally; the public getters convert to pixel space by
/// multiplying by [`PPU`], and the factories divide incoming pixel-space
/// dimensions by `PPU` on the way in. `velocity` and `force` are left
/// unconverted, matching the source's integration formula (see
/// `Body::step`) — client code that calls `apply_force`/reads `velocity`
/// works in the same pixel-ish units the Go source did.
pub struct Body {
    id: BodyId,

    position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    rotation: f32,
    pub angular_velocity: f32,
    force: Vector2<f32>,

    pub shape: Shape,

    area: f32,
    mass: f32,
    inv_mass: f32,
    inertia: f32,
    inv_inertia: f32,

    restitution: f32,
    static_friction: f32,
    dynamic_friction: f32,

    pub is_static: bool,
    pub rotation_disabled: bool,
    pub is_on_ground: bool,
    pub use_gravity: bool,

    world_vertices: Vec<Vector2<f32>>,
    aabb: Aabb,
    transform_dirty: bool,
    aabb_dirty: bool,
}

impl Body {
    fn new(id: BodyId, position: Vector2<f32>, shape: Shape, density: f32, is_static: bool) -> Self {
        let area = shape.area();
        let mass = area * density;
        let inertia = shape.inertia(mass);

        let (inv_mass, inv_inertia) = if is_static {
            (0.0, 0.0)
        } else {
            (1.0 / mass, 1.0 / inertia)
        };

        let vertex_count = match shape {
            Shape::Rectangle { .. } => 4,
            Shape::Circle { .. } => 0,
        };

        let mut body = Body {
            id,
            position,
            velocity: Vector2::zero(),
            rotation: 0.0,
            angular_velocity: 0.0,
            force: Vector2::zero(),

            shape,

            area,
            mass,
            inv_mass,
            inertia,
            inv_inertia,

            restitution: DEFAULT_RESTITUTION,
            static_friction: DEFAULT_STATIC_FRICTION,
            dynamic_friction: DEFAULT_DYNAMIC_FRICTION,

            is_static,
            rotation_disabled: false,
            is_on_ground: false,
            use_gravity: true,

            world_vertices: vec![Vector2::zero(); vertex_count],
            aabb: Aabb::default(),
            transform_dirty: true,
            aabb_dirty: true,
        };
        body.transform_vertices();
        body.update_aabb();
        body
    }

    pub(crate) fn new_circle(
        id: BodyId,
        position_px: Vector2<f32>,
        radius_px: f32,
        density: f32,
        is_static: bool,
    ) -> Result<Self, &'static str> {
        let shape = Shape::Circle {
            radius: radius_px / PPU,
        };
        shape.validate()?;
        Ok(Body::new(id, position_px / PPU, shape, density, is_static))
    }

    pub(crate) fn new_rectangle(
        id: BodyId,
        position_px: Vector2<f32>,
        width_px: f32,
        height_px: f32,
        density: f32,
        is_static: bool,
    ) -> Result<Self, &'static str> {
        let shape = Shape::new_rectangle(width_px / PPU, height_px / PPU);
        shape.validate()?;
        Ok(Body::new(id, position_px / PPU, shape, density, is_static))
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    // --- pixel-space getters -------------------------------------------------

    pub fn position(&self) -> Vector2<f32> {
        self.position * PPU
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn vertices(&self) -> Vec<Vector2<f32>> {
        self.world_vertices.iter().map(|v| *v * PPU).collect()
    }

    pub fn radius(&self) -> Option<f32> {
        match self.shape {
            Shape::Circle { radius } => Some(radius * PPU),
            Shape::Rectangle { .. } => None,
        }
    }

    pub fn width(&self) -> Option<f32> {
        match self.shape {
            Shape::Rectangle { width, .. } => Some(width * PPU),
            Shape::Circle { .. } => None,
        }
    }

    pub fn height(&self) -> Option<f32> {
        match self.shape {
            Shape::Rectangle { height, .. } => Some(height * PPU),
            Shape::Circle { .. } => None,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.aabb.min * PPU, self.aabb.max * PPU)
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    pub fn static_friction(&self) -> f32 {
        self.static_friction
    }

    pub fn dynamic_friction(&self) -> f32 {
        self.dynamic_friction
    }

    // --- mutators -------------------------------------------------------------

    pub fn mv(&mut self, delta_px: Vector2<f32>) {
        self.position += delta_px / PPU;
        self.transform_dirty = true;
        self.aabb_dirty = true;
    }

    pub fn move_to(&mut self, position_px: Vector2<f32>) {
        self.position = position_px / PPU;
        self.transform_dirty = true;
        self.aabb_dirty = true;
    }

    pub fn rotate(&mut self, delta_radians: f32) {
        self.rotation += delta_radians;
        self.transform_dirty = true;
        self.aabb_dirty = true;
    }

    pub fn rotate_to(&mut self, radians: f32) {
        self.rotation = radians;
        self.transform_dirty = true;
        self.aabb_dirty = true;
    }

    /// Replaces the accumulated force outright (does not add to any force
    /// applied earlier in the same sub-step). This mirrors the final source
    /// revision, which overwrites rather than accumulates — callers that want
    /// cumulative forces from multiple sources must sum them before calling.
    pub fn apply_force(&mut self, force: Vector2<f32>) {
        self.force = force;
    }

    pub fn set_restitution(&mut self, value: f32) {
        self.restitution = clamp(value, 0.0, 1.0);
    }

    pub fn set_static_friction(&mut self, value: f32) {
        self.static_friction = clamp(value, 0.0, 1.0);
    }

    pub fn set_dynamic_friction(&mut self, value: f32) {
        self.dynamic_friction = clamp(value, 0.0, 1.0);
    }

    // --- solver-internal --------------------------------------------------

    pub(crate) fn inv_mass(&self) -> f32 {
        self.inv_mass
    }

    pub(crate) fn inv_inertia(&self) -> f32 {
        self.inv_inertia
    }

    pub(crate) fn position_units(&self) -> Vector2<f32> {
        self.position
    }

    pub(crate) fn world_vertices(&self) -> &[Vector2<f32>] {
        &self.world_vertices
    }

    pub(crate) fn aabb_units(&self) -> &Aabb {
        &self.aabb
    }

    /// Translate by a delta already expressed in simulation units, bypassing
    /// the `PPU` conversion `mv` applies at the public boundary. Used by the
    /// solver's positional-correction pass, which works entirely in units.
    pub(crate) fn translate_units(&mut self, delta: Vector2<f32>) {
        self.position += delta;
        self.transform_dirty = true;
        self.aabb_dirty = true;
    }

    /// Sub-step integration: semi-implicit Euler at `dt / iterations`.
    ///
    /// Velocity accumulates force then gravity; position accumulates velocity
    /// scaled by both the sub-step `dt` *and* `PPU`. Velocity itself is never
    /// divided by `PPU` — this asymmetry is a quirk of the source's unit
    /// system (see design notes) and is preserved verbatim rather than
    /// "fixed", since every restitution/friction default was tuned against it.
    pub(crate) fn step(&mut self, dt: f32, iterations: u32, gravity: Vector2<f32>) {
        if self.is_static {
            return;
        }

        let dt_prime = dt / iterations as f32;
        let accel = self.force * self.inv_mass;
        self.velocity += accel * dt_prime;
        if self.use_gravity {
            self.velocity += gravity * dt_prime;
        }
        self.position += self.velocity * PPU * dt_prime;
        if !self.rotation_disabled {
            self.rotation += self.angular_velocity * PPU * dt_prime;
        }

        if !self.velocity.nearly_equal(Vector2::zero()) || self.angular_velocity.abs() > 1e-6 {
            self.transform_dirty = true;
            self.aabb_dirty = true;
        }

        self.force = Vector2::zero();
    }

    pub(crate) fn transform_vertices(&mut self) {
        if !self.transform_dirty {
            return;
        }

        if let Shape::Rectangle { local_vertices, .. } = &self.shape {
            let transform = crate::math::Transform::new(self.position, self.rotation);
            for (world, local) in self.world_vertices.iter_mut().zip(local_vertices.iter()) {
                *world = transform.apply(*local);
            }
        }

        self.transform_dirty = false;
    }

    pub(crate) fn update_aabb(&mut self) {
        if !self.aabb_dirty {
            return;
        }

        self.aabb = match self.shape {
            Shape::Circle { radius } => Aabb::from_circle(self.position, radius),
            Shape::Rectangle { .. } => Aabb::from_vertices(&self.world_vertices),
        };

        self.aabb_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::v2;

    #[test]
    fn static_body_has_zero_inverse_mass_and_inertia() {
        let body = Body::new_circle(0, v2!(0.0, 0.0), 20.0, 1.0, true).unwrap();
        assert_eq!(body.inv_mass(), 0.0);
        assert_eq!(body.inv_inertia(), 0.0);
    }

    #[test]
    fn static_body_step_is_a_no_op() {
        let mut body = Body::new_circle(0, v2!(0.0, 0.0), 20.0, 1.0, true).unwrap();
        body.velocity = v2!(5.0, 5.0);
        let before = body.position();
        body.step(1.0 / 60.0, 1, v2!(0.0, 1.0));
        assert_eq!(body.position(), before);
        assert_eq!(body.velocity, v2!(5.0, 5.0));
    }

    #[test]
    fn restitution_setter_clamps() {
        let mut body = Body::new_circle(0, v2!(0.0, 0.0), 20.0, 1.0, false).unwrap();
        body.set_restitution(1.5);
        assert_eq!(body.restitution(), 1.0);
        body.set_restitution(-0.5);
        assert_eq!(body.restitution(), 0.0);
    }

    #[test]
    fn degenerate_circle_is_rejected() {
        assert!(Body::new_circle(0, v2!(0.0, 0.0), 0.0, 1.0, false).is_err());
    }

    #[test]
    fn rectangle_vertices_round_trip_to_pixel_space() {
        let body = Body::new_rectangle(0, v2!(100.0, 100.0), 50.0, 50.0, 1.0, false).unwrap();
        let verts = body.vertices();
        assert_eq!(verts.len(), 4);
        // Top-left vertex before rotation: position + (-w/2, h/2)
        assert!((verts[0].x - 75.0).abs() < 1e-3);
        assert!((verts[0].y - 125.0).abs() < 1e-3);
    }

    #[test]
    fn circle_aabb_tracks_position_after_move() {
        let mut body = Body::new_circle(0, v2!(0.0, 0.0), 20.0, 1.0, false).unwrap();
        body.mv(v2!(100.0, 0.0));
        body.update_aabb_for_test();
        let aabb = body.aabb();
        assert!((aabb.min.x - 80.0).abs() < 1e-3);
        assert!((aabb.max.x - 120.0).abs() < 1e-3);
    }

    impl Body {
        fn update_aabb_for_test(&mut self) {
            self.transform_vertices();
            self.update_aabb();
        }
    }
}
