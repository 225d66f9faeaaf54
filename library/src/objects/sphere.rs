use crate::error::TracerError;
use crate::geometry::alias::Point;
use crate::gpu::binding_slots::ResourceKind;
use crate::objects::material_index::MaterialIndex;
use crate::serialization::canonical_layouts::{FIELD_CENTER, FIELD_MATERIAL_INDEX, FIELD_RADIUS};
use crate::serialization::record_writer::RecordWriter;
use crate::serialization::serializable_for_gpu::SerializableForGpu;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    center: Point,
    radius: f32,
    material: MaterialIndex,
}

impl Sphere {
    #[must_use]
    pub fn new(center: Point, radius: f32, material: MaterialIndex) -> Self {
        assert!(radius.is_finite() && radius > 0.0, "radius must be positive and finite");
        Sphere { center, radius, material }
    }

    /// Builds spheres from parallel columns of attributes.
    pub fn from_columns(centers: &[Point], radii: &[f32], materials: &[MaterialIndex]) -> Result<Vec<Sphere>, TracerError> {
        if centers.len() != radii.len() || centers.len() != materials.len() {
            return Err(TracerError::mismatch(format!(
                "sphere columns differ in length: {} centers, {} radii, {} materials",
                centers.len(), radii.len(), materials.len(),
            )));
        }
        if let Some(radius) = radii.iter().find(|radius| !radius.is_finite() || **radius <= 0.0) {
            return Err(TracerError::mismatch(format!("sphere radius must be positive and finite, got {radius}")));
        }
        if let Some(center) = centers.iter().find(|center| !(center.x.is_finite() && center.y.is_finite() && center.z.is_finite())) {
            return Err(TracerError::mismatch(format!("sphere center must be finite, got {center:?}")));
        }

        Ok(centers
            .iter()
            .zip(radii)
            .zip(materials)
            .map(|((center, radius), material)| Sphere::new(*center, *radius, *material))
            .collect())
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[must_use]
    pub fn material(&self) -> MaterialIndex {
        self.material
    }
}

impl SerializableForGpu for Sphere {
    const RESOURCE_KIND: ResourceKind = ResourceKind::Spheres;

    fn serialize_into(&self, writer: &mut RecordWriter) {
        writer
            .write_vector(FIELD_CENTER, &[self.center.x, self.center.y, self.center.z])
            .write_scalar(FIELD_RADIUS, self.radius)
            .write_scalar(FIELD_MATERIAL_INDEX, self.material.as_u32());
    }
}
