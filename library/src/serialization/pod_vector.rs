use crate::geometry::fundamental_constants::DEFAULT_EPSILON_F32;
use bytemuck::{Pod, Zeroable};
use cgmath::AbsDiffEq;
use std::fmt::{Display, Formatter};

/// One RGBA texel of the render target as the kernel stores it.
#[repr(C)]
#[derive(PartialEq, Copy, Clone, Pod, Debug, Default, Zeroable)]
pub struct PodVector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl PodVector {
    #[must_use]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, w: 0.0 }
    }
}

impl Display for PodVector {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

impl AbsDiffEq for PodVector {
    type Epsilon = f32;

    fn default_epsilon() -> Self::Epsilon {
        DEFAULT_EPSILON_F32
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) &&
        self.y.abs_diff_eq(&other.y, epsilon) &&
        self.z.abs_diff_eq(&other.z, epsilon) &&
        self.w.abs_diff_eq(&other.w, epsilon)
    }
}
