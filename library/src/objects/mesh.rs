use crate::error::TracerError;
use crate::geometry::aabb::Aabb;
use crate::geometry::alias::{Point, TextureCoordinate, Vector};
use crate::geometry::transform::Transformation;
use crate::gpu::binding_slots::ResourceKind;
use crate::objects::material_index::MaterialIndex;
use crate::serialization::canonical_layouts::{FIELD_BOUNDS_MAX, FIELD_BOUNDS_MIN, FIELD_INDEX_COUNT, FIELD_INDICES, FIELD_MATERIAL_INDEX, FIELD_TEXTURE_COORDINATES, FIELD_TEXTURE_INDICES, FIELD_VERTEX_COUNT, FIELD_VERTICES};
use crate::serialization::layout_plan::LayoutPlan;
use crate::serialization::record_writer::RecordWriter;
use crate::serialization::serializable_for_gpu::SerializableForGpu;
use cgmath::{Rad, Transform};

pub type TriangleIndices = [u32; 3];

/// Triangle soup with an optional texture mapping, packed as one kernel object.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    vertices: Vec<Point>,
    triangles: Vec<TriangleIndices>,
    texture_coordinates: Vec<TextureCoordinate>,
    texture_triangles: Vec<TriangleIndices>,
    material: MaterialIndex,
    bounds: Aabb,
}

impl Mesh {
    pub fn new(vertices: Vec<Point>, triangles: Vec<TriangleIndices>, material: MaterialIndex) -> Result<Self, TracerError> {
        if vertices.is_empty() {
            return Err(TracerError::mismatch("mesh has no vertices"));
        }
        if let Some(position) = vertices.iter().position(|vertex| !xyz(*vertex).iter().all(|component| component.is_finite())) {
            return Err(TracerError::mismatch(format!("vertex {position} {:?} is not finite", vertices[position])));
        }
        Self::check_indices(&triangles, vertices.len(), "vertex")?;

        let bounds = Aabb::enclosing(&vertices);
        Ok(Self {
            vertices,
            triangles,
            texture_coordinates: Vec::new(),
            texture_triangles: Vec::new(),
            material,
            bounds,
        })
    }

    /// Attaches per-corner texture coordinates; one texture triple per triangle.
    pub fn with_texture_mapping(mut self, coordinates: Vec<TextureCoordinate>, texture_triangles: Vec<TriangleIndices>) -> Result<Self, TracerError> {
        if texture_triangles.len() != self.triangles.len() {
            return Err(TracerError::mismatch(format!(
                "{} texture triangles for {} triangles",
                texture_triangles.len(), self.triangles.len(),
            )));
        }
        if let Some(position) = coordinates.iter().position(|coordinate| !(coordinate.x.is_finite() && coordinate.y.is_finite())) {
            return Err(TracerError::mismatch(format!("texture coordinate {position} {:?} is not finite", coordinates[position])));
        }
        Self::check_indices(&texture_triangles, coordinates.len(), "texture coordinate")?;

        self.texture_coordinates = coordinates;
        self.texture_triangles = texture_triangles;
        Ok(self)
    }

    fn check_indices(triangles: &[TriangleIndices], referenced_count: usize, what: &str) -> Result<(), TracerError> {
        let out_of_range = triangles
            .iter()
            .enumerate()
            .find(|(_, triangle)| triangle.iter().any(|index| *index as usize >= referenced_count));

        match out_of_range {
            Some((position, triangle)) => Err(TracerError::mismatch(format!(
                "triangle {position} {triangle:?} references a {what} beyond {referenced_count}",
            ))),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn transformed(&self, transformation: &Transformation) -> Mesh {
        let affine = transformation.to_affine();
        let vertices: Vec<Point> = self.vertices.iter().map(|vertex| affine.transform_point(*vertex)).collect();
        let bounds = Aabb::enclosing(&vertices);
        Mesh {
            vertices,
            triangles: self.triangles.clone(),
            texture_coordinates: self.texture_coordinates.clone(),
            texture_triangles: self.texture_triangles.clone(),
            material: self.material,
            bounds,
        }
    }

    #[must_use]
    pub fn translated(&self, translation: Vector) -> Mesh {
        self.transformed(&Transformation::identity().with_translation(translation))
    }

    #[must_use]
    pub fn rotated(&self, x: Rad<f32>, y: Rad<f32>, z: Rad<f32>) -> Mesh {
        self.transformed(&Transformation::identity().with_rotation(x, y, z))
    }

    #[must_use]
    pub fn scaled(&self, scale: Vector) -> Mesh {
        self.transformed(&Transformation::identity().with_scale(scale))
    }

    #[must_use]
    pub fn with_material(mut self, material: MaterialIndex) -> Mesh {
        self.material = material;
        self
    }

    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[must_use]
    pub fn triangles(&self) -> &[TriangleIndices] {
        &self.triangles
    }

    #[must_use]
    pub fn texture_coordinates(&self) -> &[TextureCoordinate] {
        &self.texture_coordinates
    }

    #[must_use]
    pub fn texture_triangles(&self) -> &[TriangleIndices] {
        &self.texture_triangles
    }

    #[must_use]
    pub fn material(&self) -> MaterialIndex {
        self.material
    }

    #[must_use]
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

#[must_use]
fn xyz(point: Point) -> [f32; 3] {
    [point.x, point.y, point.z]
}

fn check_fits(plan: &LayoutPlan, field: &str, what: &str, count: usize) -> Result<(), TracerError> {
    let limit = plan.field(field).schema().array_length();
    if count > limit {
        return Err(TracerError::capacity_exceeded(what, count, limit));
    }
    Ok(())
}

impl SerializableForGpu for Mesh {
    const RESOURCE_KIND: ResourceKind = ResourceKind::Objects;

    fn check_limits(&self, plan: &LayoutPlan) -> Result<(), TracerError> {
        check_fits(plan, FIELD_VERTICES, "mesh vertices", self.vertices.len())?;
        check_fits(plan, FIELD_INDICES, "mesh triangles", self.triangles.len())?;
        check_fits(plan, FIELD_TEXTURE_COORDINATES, "mesh texture coordinates", self.texture_coordinates.len())
    }

    fn serialize_into(&self, writer: &mut RecordWriter) {
        for (index, vertex) in self.vertices.iter().enumerate() {
            writer.write_element(FIELD_VERTICES, index, &xyz(*vertex));
        }
        for (index, triangle) in self.triangles.iter().enumerate() {
            writer.write_element(FIELD_INDICES, index, triangle);
        }
        for (index, coordinate) in self.texture_coordinates.iter().enumerate() {
            writer.write_element(FIELD_TEXTURE_COORDINATES, index, &[coordinate.x, coordinate.y]);
        }
        for (index, triangle) in self.texture_triangles.iter().enumerate() {
            writer.write_element(FIELD_TEXTURE_INDICES, index, triangle);
        }
        writer
            .write_scalar(FIELD_VERTEX_COUNT, self.vertices.len() as u32)
            .write_scalar(FIELD_INDEX_COUNT, self.triangles.len() as u32)
            .write_scalar(FIELD_MATERIAL_INDEX, self.material.as_u32())
            .write_vector(FIELD_BOUNDS_MIN, &xyz(self.bounds.min()))
            .write_vector(FIELD_BOUNDS_MAX, &xyz(self.bounds.max()));
    }
}
