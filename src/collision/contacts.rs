//! Contact-point generation, run once a narrow-phase test has already
//! confirmed a collision and produced a normal/depth.

use crate::math::{Vector2, NEAR_EQ_EPSILON_SQ};

/// Closest point on segment `a -> b` to `p`, and the squared distance to it.
/// `t = (p-a).(b-a) / |b-a|^2`, clamped to `[0, 1]`.
pub fn point_segment_distance(p: Vector2<f32>, a: Vector2<f32>, b: Vector2<f32>) -> (f32, Vector2<f32>) {
    let ab = b - a;
    let ap = p - a;
    let ab_len_sq = ab.length_squared();

    let t = if ab_len_sq == 0.0 {
        0.0
    } else {
        (ap.dot(ab) / ab_len_sq).clamp(0.0, 1.0)
    };

    let closest = a + ab * t;
    (p.distance_squared(closest), closest)
}

pub fn circle_circle_contact(center_a: Vector2<f32>, radius_a: f32, center_b: Vector2<f32>) -> Vector2<f32> {
    center_a + (center_b - center_a).normalized() * radius_a
}

/// Single contact: the point on `polygon`'s edges closest to `circle_center`.
pub fn polygon_circle_contact(circle_center: Vector2<f32>, polygon: &[Vector2<f32>]) -> Vector2<f32> {
    let mut best_dist = f32::MAX;
    let mut best_point = polygon[0];

    for i in 0..polygon.len() {
        let j = (i + 1) % polygon.len();
        let (dist_sq, point) = point_segment_distance(circle_center, polygon[i], polygon[j]);
        if dist_sq < best_dist {
            best_dist = dist_sq;
            best_point = point;
        }
    }

    best_point
}

/// One or two contacts between two convex polygons: the closest
/// point-to-segment pairing of every vertex of one polygon against every
/// edge of the other, and symmetrically. A second near-equal minimum
/// (within [`NEAR_EQ_EPSILON_SQ`]) is admitted as a second contact rather
/// than replacing the first, which is what produces the two-point manifold
/// for a flush edge-edge collision.
pub fn polygon_polygon_contacts(verts_a: &[Vector2<f32>], verts_b: &[Vector2<f32>]) -> ([Vector2<f32>; 2], usize) {
    let mut contacts = [Vector2::zero(); 2];
    let mut contact_count = 0usize;
    let mut min_dist = f32::MAX;

    let mut consider = |point: Vector2<f32>, dist_sq: f32, contacts: &mut [Vector2<f32>; 2], contact_count: &mut usize, min_dist: &mut f32| {
        if (dist_sq - *min_dist).abs() < NEAR_EQ_EPSILON_SQ {
            if *contact_count < 2 && (*contact_count == 0 || !contacts[0].nearly_equal(point)) {
                contacts[1] = point;
                *contact_count = 2;
            }
        } else if dist_sq < *min_dist {
            *min_dist = dist_sq;
            contacts[0] = point;
            *contact_count = 1;
        }
    };

    for &p in verts_a {
        for i in 0..verts_b.len() {
            let j = (i + 1) % verts_b.len();
            let (dist_sq, point) = point_segment_distance(p, verts_b[i], verts_b[j]);
            consider(point, dist_sq, &mut contacts, &mut contact_count, &mut min_dist);
        }
    }

    for &p in verts_b {
        for i in 0..verts_a.len() {
            let j = (i + 1) % verts_a.len();
            let (dist_sq, point) = point_segment_distance(p, verts_a[i], verts_a[j]);
            consider(point, dist_sq, &mut contacts, &mut contact_count, &mut min_dist);
        }
    }

    (contacts, contact_count)
}
