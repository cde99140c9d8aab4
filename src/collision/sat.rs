//! Separating Axis Theorem primitives. Each function returns the contact
//! normal and penetration depth for a single axis-exhaustive test, or `None`
//! the moment any axis separates the pair.

use crate::math::Vector2;

struct Projection {
    min: f32,
    max: f32,
}

fn project_vertices(vertices: &[Vector2<f32>], axis: Vector2<f32>) -> Projection {
    let mut min = f32::MAX;
    let mut max = f32::MIN;
    for v in vertices {
        let proj = v.dot(axis);
        min = min.min(proj);
        max = max.max(proj);
    }
    Projection { min, max }
}

fn project_circle(center: Vector2<f32>, axis: Vector2<f32>, radius: f32) -> Projection {
    let p1 = (center + axis * radius).dot(axis);
    let p2 = (center - axis * radius).dot(axis);
    if p1 < p2 {
        Projection { min: p1, max: p2 }
    } else {
        Projection { min: p2, max: p1 }
    }
}

/// Outward edge normal of `vertices[i] -> vertices[(i+1) % len]`: `(-edge.y, edge.x)`, normalized.
fn edge_normal(vertices: &[Vector2<f32>], i: usize) -> Vector2<f32> {
    let j = (i + 1) % vertices.len();
    let edge = vertices[j] - vertices[i];
    Vector2::new(-edge.y, edge.x).normalized()
}

/// `(depth, axis)` of the separating axis with minimum overlap among a
/// polygon's own edge normals, or `None` the instant one axis separates.
fn min_overlap_axis(
    vertices: &[Vector2<f32>],
    other_min: impl Fn(Vector2<f32>) -> Option<Projection>,
) -> Option<(f32, Vector2<f32>)> {
    let mut depth = f32::MAX;
    let mut axis_out = Vector2::zero();

    for i in 0..vertices.len() {
        let axis = edge_normal(vertices, i);
        let proj_self = project_vertices(vertices, axis);
        let proj_other = other_min(axis)?;

        if proj_self.min >= proj_other.max || proj_other.min >= proj_self.max {
            return None;
        }

        let overlap = (proj_other.max - proj_self.min).min(proj_self.max - proj_other.min);
        if overlap < depth {
            depth = overlap;
            axis_out = axis;
        }
    }

    Some((depth, axis_out))
}

/// SAT test between two convex polygons. Normal points from `a` to `b`.
pub fn polygon_polygon(
    verts_a: &[Vector2<f32>],
    verts_b: &[Vector2<f32>],
    center_a: Vector2<f32>,
    center_b: Vector2<f32>,
) -> Option<(Vector2<f32>, f32)> {
    let (depth_a, axis_a) = min_overlap_axis(verts_a, |axis| {
        let proj_b = project_vertices(verts_b, axis);
        Some(proj_b)
    })?;
    let (depth_b, axis_b) = min_overlap_axis(verts_b, |axis| {
        let proj_a = project_vertices(verts_a, axis);
        Some(proj_a)
    })?;

    let (mut depth, mut normal) = if depth_a < depth_b {
        (depth_a, axis_a)
    } else {
        (depth_b, axis_b)
    };

    let direction = center_b - center_a;
    if direction.dot(normal) < 0.0 {
        normal = -normal;
    }
    depth = depth.max(0.0);

    Some((normal, depth))
}

/// SAT test between a polygon and a circle. Normal points from the polygon
/// (`polygon_center`) toward the circle (`circle_center`).
pub fn polygon_circle(
    polygon_verts: &[Vector2<f32>],
    polygon_center: Vector2<f32>,
    circle_center: Vector2<f32>,
    radius: f32,
) -> Option<(Vector2<f32>, f32)> {
    let (mut depth, mut normal) = min_overlap_axis(polygon_verts, |axis| {
        Some(project_circle(circle_center, axis, radius))
    })?;

    // Additional axis: direction from the circle center to the closest polygon vertex.
    let closest_vertex = polygon_verts.iter().copied().min_by(|a, b| {
        a.distance_squared(circle_center)
            .partial_cmp(&b.distance_squared(circle_center))
            .unwrap()
    })?;
    let axis = (closest_vertex - circle_center).normalized();

    let proj_poly = project_vertices(polygon_verts, axis);
    let proj_circle = project_circle(circle_center, axis, radius);
    if proj_poly.min >= proj_circle.max || proj_circle.min >= proj_poly.max {
        return None;
    }
    let overlap = (proj_circle.max - proj_poly.min).min(proj_poly.max - proj_circle.min);
    if overlap < depth {
        depth = overlap;
        normal = axis;
    }

    let direction = circle_center - polygon_center;
    if direction.dot(normal) < 0.0 {
        normal = -normal;
    }
    depth = depth.max(0.0);

    Some((normal, depth))
}

/// Radius-sum test between two circles. Normal points from `a` to `b`.
/// Exactly-equal distances (tangent circles) are treated as no collision.
pub fn circle_circle(
    center_a: Vector2<f32>,
    radius_a: f32,
    center_b: Vector2<f32>,
    radius_b: f32,
) -> Option<(Vector2<f32>, f32)> {
    let to_other = center_b - center_a;
    let dist = to_other.length();
    let radii_sum = radius_a + radius_b;

    if dist >= radii_sum {
        return None;
    }

    Some((to_other.normalized(), radii_sum - dist))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::v2;

    fn square(center: Vector2<f32>, half: f32) -> Vec<Vector2<f32>> {
        vec![
            center + v2!(-half, half),
            center + v2!(half, half),
            center + v2!(half, -half),
            center + v2!(-half, -half),
        ]
    }

    #[test]
    fn circles_just_touching_do_not_collide() {
        assert!(circle_circle(v2!(0.0, 0.0), 5.0, v2!(10.0, 0.0), 5.0).is_none());
    }

    #[test]
    fn circles_overlapping_collide_with_expected_depth() {
        let (normal, depth) = circle_circle(v2!(0.0, 0.0), 5.0, v2!(8.0, 0.0), 5.0).unwrap();
        assert_eq!(normal, v2!(1.0, 0.0));
        assert!((depth - 2.0).abs() < 1e-5);
    }

    #[test]
    fn separated_squares_do_not_collide() {
        let a = square(v2!(0.0, 0.0), 5.0);
        let b = square(v2!(100.0, 100.0), 5.0);
        assert!(polygon_polygon(&a, &b, v2!(0.0, 0.0), v2!(100.0, 100.0)).is_none());
    }

    #[test]
    fn overlapping_squares_collide_with_expected_depth() {
        let a = square(v2!(0.0, 0.0), 2.5);
        let b = square(v2!(4.0, 0.0), 2.5);
        let (_, depth) = polygon_polygon(&a, &b, v2!(0.0, 0.0), v2!(4.0, 0.0)).unwrap();
        assert!((depth - 1.0).abs() < 1e-5);
    }

    #[test]
    fn polygon_polygon_is_symmetric_under_swap() {
        let a = square(v2!(0.0, 0.0), 2.5);
        let b = square(v2!(4.0, 0.0), 2.5);
        let (normal_ab, depth_ab) = polygon_polygon(&a, &b, v2!(0.0, 0.0), v2!(4.0, 0.0)).unwrap();
        let (normal_ba, depth_ba) = polygon_polygon(&b, &a, v2!(4.0, 0.0), v2!(0.0, 0.0)).unwrap();
        assert!((depth_ab - depth_ba).abs() < 1e-5);
        assert!((normal_ab.x + normal_ba.x).abs() < 1e-5);
        assert!((normal_ab.y + normal_ba.y).abs() < 1e-5);
    }

    #[test]
    fn circle_resting_above_rectangle_collides_upward_normal() {
        // Screen convention: larger y is "down". The rectangle spans y in
        // [-5, 5]; the circle sits just above it (smaller y), overlapping
        // its top edge by 3 units.
        let floor = square(v2!(0.0, 0.0), 5.0);
        let (normal, depth) = polygon_circle(&floor, v2!(0.0, 0.0), v2!(0.0, -12.0), 10.0).unwrap();
        assert!(normal.y < 0.0);
        assert!((depth - 3.0).abs() < 1e-4);
    }
}
