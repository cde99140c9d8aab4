use crate::math::{v2, Vector2};

/// Tagged shape variant. Pair dispatch on `(Shape, Shape)` is a 2x2 match
/// rather than a trait-object hierarchy, since concavity and other shapes
/// are explicitly out of scope.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    /// `local_vertices` are laid out counter-clockwise starting at the
    /// top-left corner, centered at the origin. This ordering is load-bearing
    /// for SAT edge-normal direction: flipping it flips every outward normal.
    Rectangle {
        width: f32,
        height: f32,
        local_vertices: [Vector2<f32>; 4],
    },
}

impl Shape {
    pub fn new_rectangle(width: f32, height: f32) -> Self {
        let hw = width * 0.5;
        let hh = height * 0.5;
        Shape::Rectangle {
            width,
            height,
            local_vertices: [
                v2!(-hw, hh),
                v2!(hw, hh),
                v2!(hw, -hh),
                v2!(-hw, -hh),
            ],
        }
    }

    pub fn area(&self) -> f32 {
        match self {
            Shape::Circle { radius } => std::f32::consts::PI * radius * radius,
            Shape::Rectangle { width, height, .. } => width * height,
        }
    }

    /// Moment of inertia for unit-density `mass`, about the shape's own center.
    pub fn inertia(&self, mass: f32) -> f32 {
        match self {
            Shape::Circle { radius } => 0.5 * mass * radius * radius,
            Shape::Rectangle { width, height, .. } => {
                mass * (width * width + height * height) / 12.0
            }
        }
    }

    /// `Err` with a description of the offending dimension when the shape is
    /// degenerate (zero or negative extent) and cannot be simulated.
    pub fn validate(&self) -> Result<(), &'static str> {
        match self {
            Shape::Circle { radius } if *radius <= 0.0 => Err("circle radius must be positive"),
            Shape::Rectangle { width, .. } if *width <= 0.0 => {
                Err("rectangle width must be positive")
            }
            Shape::Rectangle { height, .. } if *height <= 0.0 => {
                Err("rectangle height must be positive")
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_vertices_are_counter_clockwise_from_top_left() {
        let Shape::Rectangle { local_vertices, .. } = Shape::new_rectangle(4.0, 2.0) else {
            unreachable!()
        };
        assert_eq!(local_vertices[0], v2!(-2.0, 1.0));
        assert_eq!(local_vertices[1], v2!(2.0, 1.0));
        assert_eq!(local_vertices[2], v2!(2.0, -1.0));
        assert_eq!(local_vertices[3], v2!(-2.0, -1.0));
    }

    #[test]
    fn circle_area_and_inertia() {
        let shape = Shape::Circle { radius: 2.0 };
        assert!((shape.area() - std::f32::consts::PI * 4.0).abs() < 1e-6);
        assert!((shape.inertia(10.0) - 20.0).abs() < 1e-6);
    }

    #[test]
    fn rectangle_area_and_inertia() {
        let shape = Shape::new_rectangle(4.0, 2.0);
        assert!((shape.area() - 8.0).abs() < 1e-6);
        let expected = 10.0 * (16.0 + 4.0) / 12.0;
        assert!((shape.inertia(10.0) - expected).abs() < 1e-6);
    }

    #[test]
    fn degenerate_shapes_are_rejected() {
        assert!(Shape::Circle { radius: 0.0 }.validate().is_err());
        assert!(Shape::new_rectangle(0.0, 5.0).validate().is_err());
        assert!(Shape::new_rectangle(5.0, -1.0).validate().is_err());
    }
}
