mod contacts;
mod sat;

use crate::body::{Body, Shape};
use crate::math::Vector2;

/// Result of a narrow-phase test: separating normal (from `a` to `b`),
/// penetration depth, and up to two contact points in world space.
pub(crate) struct NarrowPhaseHit {
    pub normal: Vector2<f32>,
    pub depth: f32,
    pub contacts: [Vector2<f32>; 2],
    pub contact_count: usize,
}

/// Pair dispatch over the two shape tags. `Rectangle`/`Rectangle` runs full
/// polygon SAT with a two-point contact manifold; any pair touching a circle
/// degrades to a single contact point, which is all a round shape can
/// support without an arbitrary tie-break.
pub(crate) fn check_collision(a: &Body, b: &Body) -> Option<NarrowPhaseHit> {
    match (a.shape, b.shape) {
        (Shape::Rectangle { .. }, Shape::Rectangle { .. }) => {
            let verts_a = a.world_vertices();
            let verts_b = b.world_vertices();
            let (normal, depth) =
                sat::polygon_polygon(verts_a, verts_b, a.position_units(), b.position_units())?;
            let (contacts, contact_count) = contacts::polygon_polygon_contacts(verts_a, verts_b);
            Some(NarrowPhaseHit {
                normal,
                depth,
                contacts,
                contact_count,
            })
        }

        (Shape::Rectangle { .. }, Shape::Circle { radius }) => {
            let verts_a = a.world_vertices();
            let (normal, depth) = sat::polygon_circle(
                verts_a,
                a.position_units(),
                b.position_units(),
                radius,
            )?;
            let contact = contacts::polygon_circle_contact(b.position_units(), verts_a);
            Some(single_contact(normal, depth, contact))
        }

        (Shape::Circle { radius }, Shape::Rectangle { .. }) => {
            let verts_b = b.world_vertices();
            // `sat::polygon_circle` always returns a polygon-to-circle normal;
            // negate it here so the result stays a-to-b, as every other arm
            // of this dispatch promises.
            let (normal, depth) = sat::polygon_circle(
                verts_b,
                b.position_units(),
                a.position_units(),
                radius,
            )?;
            let contact = contacts::polygon_circle_contact(a.position_units(), verts_b);
            Some(single_contact(-normal, depth, contact))
        }

        (Shape::Circle { radius: radius_a }, Shape::Circle { radius: radius_b }) => {
            let (normal, depth) = sat::circle_circle(
                a.position_units(),
                radius_a,
                b.position_units(),
                radius_b,
            )?;
            let contact = contacts::circle_circle_contact(a.position_units(), radius_a, b.position_units());
            Some(single_contact(normal, depth, contact))
        }
    }
}

fn single_contact(normal: Vector2<f32>, depth: f32, contact: Vector2<f32>) -> NarrowPhaseHit {
    NarrowPhaseHit {
        normal,
        depth,
        contacts: [contact, Vector2::zero()],
        contact_count: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::v2;

    #[test]
    fn circle_rectangle_dispatch_is_antisymmetric_with_rectangle_circle() {
        let rect = Body::new_rectangle(0, v2!(0.0, 0.0), 500.0, 500.0, 1.0, true).unwrap();
        let circle = Body::new_circle(1, v2!(0.0, -240.0), 50.0, 1.0, false).unwrap();

        let rc = check_collision(&rect, &circle).unwrap();
        let cr = check_collision(&circle, &rect).unwrap();

        assert!((rc.depth - cr.depth).abs() < 1e-3);
        assert!((rc.normal.x + cr.normal.x).abs() < 1e-4);
        assert!((rc.normal.y + cr.normal.y).abs() < 1e-4);
    }

    #[test]
    fn far_apart_bodies_do_not_collide() {
        let a = Body::new_circle(0, v2!(0.0, 0.0), 20.0, 1.0, false).unwrap();
        let b = Body::new_circle(1, v2!(1000.0, 1000.0), 20.0, 1.0, false).unwrap();
        assert!(check_collision(&a, &b).is_none());
    }
}
