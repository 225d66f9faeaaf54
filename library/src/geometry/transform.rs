use crate::geometry::alias::{Point, Vector};
use cgmath::{Matrix4, Rad, Zero};

pub type Affine = Matrix4<f32>;

/// Placement applied to model-space vertices: scale first, then rotation
/// about X, Y and Z (in that order), then translation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transformation {
    translation: Vector,
    rotation: [Rad<f32>; 3],
    scale: Vector,
}

impl Transformation {
    #[must_use]
    pub fn identity() -> Self {
        Self {
            translation: Vector::zero(),
            rotation: [Rad(0.0); 3],
            scale: Vector::new(1.0, 1.0, 1.0),
        }
    }

    #[must_use]
    pub fn new(translation: Vector, rotation: [Rad<f32>; 3], scale: Vector) -> Self {
        Self { translation, rotation, scale }
    }

    #[must_use]
    pub fn with_translation(mut self, translation: Vector) -> Self {
        self.translation = translation;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, x: Rad<f32>, y: Rad<f32>, z: Rad<f32>) -> Self {
        self.rotation = [x, y, z];
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Vector) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(Vector::new(scale, scale, scale))
    }

    #[must_use]
    pub fn to_affine(&self) -> Affine {
        let [x, y, z] = self.rotation;
        Affine::from_translation(self.translation)
            * Affine::from_angle_z(z)
            * Affine::from_angle_y(y)
            * Affine::from_angle_x(x)
            * Affine::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

impl Default for Transformation {
    #[must_use]
    fn default() -> Self {
        Self::identity()
    }
}
