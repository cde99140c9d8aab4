use super::Vector2;

/// Affine transform derived from a body's position and rotation at
/// vertex-update time: `(posX, posY, sin θ, cos θ)`.
///
/// Caching the sine/cosine instead of the raw angle means `apply` is a pure
/// multiply-add per component, run once per vertex per dirty body.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Transform {
    pub pos_x: f32,
    pub pos_y: f32,
    pub sin: f32,
    pub cos: f32,
}

impl Transform {
    pub fn new(position: Vector2<f32>, angle: f32) -> Self {
        Transform {
            pos_x: position.x,
            pos_y: position.y,
            sin: angle.sin(),
            cos: angle.cos(),
        }
    }

    /// `v' = (cos·x − sin·y + tx, sin·x + cos·y + ty)`
    pub fn apply(&self, v: Vector2<f32>) -> Vector2<f32> {
        Vector2::new(
            self.cos * v.x - self.sin * v.y + self.pos_x,
            self.sin * v.x + self.cos * v.y + self.pos_y,
        )
    }
}
