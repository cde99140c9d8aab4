use crate::body::BodyId;
use crate::math::Vector2;

/// A persistent-for-one-step record of an overlapping body pair, carrying
/// everything the resolution pass needs: which bodies, how they're
/// separated, and where they touch.
///
/// `body_a`/`body_b` are always stored with `body_a < body_b`; this is what
/// makes manifold resolution order equal insertion order equal lexicographic
/// pair order, independent of which body happened to be tested first.
#[derive(Clone, Copy, Debug)]
pub struct Manifold {
    pub body_a: BodyId,
    pub body_b: BodyId,
    pub normal: Vector2<f32>,
    pub depth: f32,
    pub contacts: [Vector2<f32>; 2],
    pub contact_count: usize,
}

impl Manifold {
    pub(crate) fn new(
        body_a: BodyId,
        body_b: BodyId,
        normal: Vector2<f32>,
        depth: f32,
        contacts: [Vector2<f32>; 2],
        contact_count: usize,
    ) -> Self {
        Manifold {
            body_a,
            body_b,
            normal,
            depth,
            contacts,
            contact_count,
        }
    }
}
