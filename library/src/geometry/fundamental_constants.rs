pub(crate) const VERTICES_IN_TRIANGLE: usize = 3;

pub(crate) const DEFAULT_EPSILON_F32: f32 = 1e-6;
