use crate::geometry::alias::{Point, Vector};
use crate::gpu::binding_slots::ResourceKind;
use crate::serialization::canonical_layouts::{FIELD_DEFOCUS_ANGLE, FIELD_FOCUS_DISTANCE, FIELD_FOV, FIELD_LOOK_AT, FIELD_ORIGIN, FIELD_UP};
use crate::serialization::record_writer::RecordWriter;
use crate::serialization::serializable_for_gpu::SerializableForGpu;
use cgmath::{Deg, InnerSpace, Rad};

/// Thin-lens pinhole camera; angles are kept in radians.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    origin: Point,
    look_at: Point,
    up: Vector,
    fov: Rad<f32>,
    focus_distance: f32,
    defocus_angle: Rad<f32>,
}

impl Camera {
    #[must_use]
    pub fn new(origin: Point, look_at: Point, up: Vector, fov: impl Into<Rad<f32>>, focus_distance: f32, defocus_angle: impl Into<Rad<f32>>) -> Self {
        assert_ne!(origin, look_at, "camera must look somewhere");
        assert!(up.magnitude2() > 0.0, "up vector must not be zero");
        assert!(focus_distance > 0.0, "focus distance must be positive");
        let fov = fov.into();
        assert!(fov.0 > 0.0, "field of view must be positive");

        Self {
            origin,
            look_at,
            up,
            fov,
            focus_distance,
            defocus_angle: defocus_angle.into(),
        }
    }

    #[must_use]
    pub fn from_degrees(origin: Point, look_at: Point, up: Vector, fov: f32, focus_distance: f32, defocus_angle: f32) -> Self {
        Self::new(origin, look_at, up, Deg(fov), focus_distance, Deg(defocus_angle))
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    #[must_use]
    pub fn look_at(&self) -> Point {
        self.look_at
    }

    #[must_use]
    pub fn up(&self) -> Vector {
        self.up
    }

    #[must_use]
    pub fn fov(&self) -> Rad<f32> {
        self.fov
    }

    #[must_use]
    pub fn focus_distance(&self) -> f32 {
        self.focus_distance
    }

    #[must_use]
    pub fn defocus_angle(&self) -> Rad<f32> {
        self.defocus_angle
    }
}

impl SerializableForGpu for Camera {
    const RESOURCE_KIND: ResourceKind = ResourceKind::Camera;

    fn serialize_into(&self, writer: &mut RecordWriter) {
        writer
            .write_vector(FIELD_ORIGIN, &[self.origin.x, self.origin.y, self.origin.z])
            .write_vector(FIELD_LOOK_AT, &[self.look_at.x, self.look_at.y, self.look_at.z])
            .write_vector(FIELD_UP, &[self.up.x, self.up.y, self.up.z])
            .write_scalar(FIELD_FOV, self.fov.0)
            .write_scalar(FIELD_FOCUS_DISTANCE, self.focus_distance)
            .write_scalar(FIELD_DEFOCUS_ANGLE, self.defocus_angle.0);
    }
}
