use crate::serialization::field_schema::{ElementType, FieldSchema};
use crate::serialization::layout_plan::LayoutPlan;

// Compiled into the tracer kernel; both sides must change together.
pub const MAX_MATERIALS: usize = 100;
pub const MAX_SPHERES: usize = 100;
pub const MAX_OBJECTS: usize = 50;
pub const MAX_TRIANGLES_PER_OBJECT: usize = 2000;
pub const MAX_VERTICES_PER_OBJECT: usize = 2000;
pub const MAX_TEXTURE_COORDINATES_PER_OBJECT: usize = 2000;

pub(crate) const FIELD_ALBEDO: &str = "albedo";
pub(crate) const FIELD_EMISSION: &str = "emission";
pub(crate) const FIELD_EMISSION_STRENGTH: &str = "emission_strength";
pub(crate) const FIELD_MATERIAL_TYPE: &str = "material_type";
pub(crate) const FIELD_FUZZ: &str = "fuzz";
pub(crate) const FIELD_TEXTURE_INDEX: &str = "texture_index";

const MATERIAL_SCHEMA: [FieldSchema; 6] = [
    FieldSchema::vector(FIELD_ALBEDO, 3, ElementType::Float),
    FieldSchema::vector(FIELD_EMISSION, 3, ElementType::Float),
    FieldSchema::scalar(FIELD_EMISSION_STRENGTH, ElementType::Float),
    FieldSchema::scalar(FIELD_MATERIAL_TYPE, ElementType::Signed),
    FieldSchema::scalar(FIELD_FUZZ, ElementType::Float),
    FieldSchema::scalar(FIELD_TEXTURE_INDEX, ElementType::Signed),
];

pub(crate) const FIELD_CENTER: &str = "center";
pub(crate) const FIELD_RADIUS: &str = "radius";
pub(crate) const FIELD_MATERIAL_INDEX: &str = "material_index";

const SPHERE_SCHEMA: [FieldSchema; 3] = [
    FieldSchema::vector(FIELD_CENTER, 3, ElementType::Float),
    FieldSchema::scalar(FIELD_RADIUS, ElementType::Float),
    FieldSchema::scalar(FIELD_MATERIAL_INDEX, ElementType::Unsigned),
];

pub(crate) const FIELD_ORIGIN: &str = "origin";
pub(crate) const FIELD_LOOK_AT: &str = "look_at";
pub(crate) const FIELD_UP: &str = "up";
pub(crate) const FIELD_FOV: &str = "fov";
pub(crate) const FIELD_FOCUS_DISTANCE: &str = "focus_distance";
pub(crate) const FIELD_DEFOCUS_ANGLE: &str = "defocus_angle";

const CAMERA_SCHEMA: [FieldSchema; 6] = [
    FieldSchema::vector(FIELD_ORIGIN, 3, ElementType::Float),
    FieldSchema::vector(FIELD_LOOK_AT, 3, ElementType::Float),
    FieldSchema::vector(FIELD_UP, 3, ElementType::Float),
    FieldSchema::scalar(FIELD_FOV, ElementType::Float),
    FieldSchema::scalar(FIELD_FOCUS_DISTANCE, ElementType::Float),
    FieldSchema::scalar(FIELD_DEFOCUS_ANGLE, ElementType::Float),
];

pub(crate) const FIELD_VERTICES: &str = "vertices";
pub(crate) const FIELD_INDICES: &str = "indices";
pub(crate) const FIELD_TEXTURE_COORDINATES: &str = "texture_coordinates";
pub(crate) const FIELD_TEXTURE_INDICES: &str = "texture_indices";
pub(crate) const FIELD_VERTEX_COUNT: &str = "vertex_count";
pub(crate) const FIELD_INDEX_COUNT: &str = "index_count";
pub(crate) const FIELD_BOUNDS_MIN: &str = "bounds_min";
pub(crate) const FIELD_BOUNDS_MAX: &str = "bounds_max";

const MESH_OBJECT_SCHEMA: [FieldSchema; 9] = [
    FieldSchema::vector(FIELD_VERTICES, 3, ElementType::Float).repeated(MAX_VERTICES_PER_OBJECT),
    FieldSchema::vector(FIELD_INDICES, 3, ElementType::Unsigned).repeated(MAX_TRIANGLES_PER_OBJECT),
    FieldSchema::vector(FIELD_TEXTURE_COORDINATES, 2, ElementType::Float).repeated(MAX_TEXTURE_COORDINATES_PER_OBJECT),
    FieldSchema::vector(FIELD_TEXTURE_INDICES, 3, ElementType::Unsigned).repeated(MAX_TRIANGLES_PER_OBJECT),
    FieldSchema::scalar(FIELD_VERTEX_COUNT, ElementType::Unsigned),
    FieldSchema::scalar(FIELD_INDEX_COUNT, ElementType::Unsigned),
    FieldSchema::scalar(FIELD_MATERIAL_INDEX, ElementType::Unsigned),
    FieldSchema::vector(FIELD_BOUNDS_MIN, 3, ElementType::Float),
    FieldSchema::vector(FIELD_BOUNDS_MAX, 3, ElementType::Float),
];

#[must_use]
pub(crate) fn material_layout() -> LayoutPlan {
    LayoutPlan::new(&MATERIAL_SCHEMA, MAX_MATERIALS)
}

#[must_use]
pub(crate) fn sphere_layout() -> LayoutPlan {
    LayoutPlan::new(&SPHERE_SCHEMA, MAX_SPHERES)
}

#[must_use]
pub(crate) fn camera_layout() -> LayoutPlan {
    LayoutPlan::new(&CAMERA_SCHEMA, 1)
}

#[must_use]
pub(crate) fn mesh_object_layout() -> LayoutPlan {
    LayoutPlan::new(&MESH_OBJECT_SCHEMA, MAX_OBJECTS)
}
