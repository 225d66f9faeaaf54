use crate::error::TracerError;
use crate::geometry::alias::{Point, TextureCoordinate};
use crate::geometry::fundamental_constants::VERTICES_IN_TRIANGLE;
use crate::geometry::transform::Transformation;
use crate::objects::material_index::MaterialIndex;
use crate::objects::mesh::{Mesh, TriangleIndices};
use log::debug;
use obj::raw::object::{parse_obj, Polygon, RawObj};
use obj::ObjError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct WarehouseSlot(pub(crate) usize);

/// Loaded mesh prototypes; every instance is a transformed copy.
pub struct MeshWarehouse {
    prototypes: Vec<Mesh>,
}

impl MeshWarehouse {
    #[must_use]
    pub fn new() -> Self {
        Self { prototypes: Vec::new() }
    }

    pub fn load(&mut self, source_file: &Path) -> Result<WarehouseSlot, TracerError> {
        let file = File::open(source_file)?;
        let prototype = parse_mesh(BufReader::new(file))?;
        debug!("loaded {}: {} vertices, {} triangles", source_file.display(), prototype.vertex_count(), prototype.triangle_count());

        self.prototypes.push(prototype);
        Ok(WarehouseSlot(self.prototypes.len() - 1))
    }

    #[must_use]
    pub fn instantiate(&self, prototype: WarehouseSlot, transformation: &Transformation, material: MaterialIndex) -> Mesh {
        self.prototypes[prototype.0].transformed(transformation).with_material(material)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }
}

impl Default for MeshWarehouse {
    fn default() -> Self {
        Self::new()
    }
}

#[must_use]
fn translate_error(from: ObjError) -> TracerError {
    match from {
        ObjError::Io(io_error) => TracerError::Io(io_error),
        other => TracerError::malformed(other.to_string()),
    }
}

fn triangle_of<T: Copy>(position: usize, corners: &[T]) -> Result<[T; VERTICES_IN_TRIANGLE], TracerError> {
    <[T; VERTICES_IN_TRIANGLE]>::try_from(corners)
        .map_err(|_| TracerError::malformed(format!("face {position} has {} corners, only triangles are supported", corners.len())))
}

fn as_index(position: usize, index: usize) -> Result<u32, TracerError> {
    u32::try_from(index).map_err(|_| TracerError::malformed(format!("face {position} index {index} does not fit 32 bits")))
}

/// Reads `v`, `vt` and triangular `f` records; texture triples are kept only
/// when every face carries them.
pub fn parse_mesh(input: impl BufRead) -> Result<Mesh, TracerError> {
    let raw: RawObj = parse_obj(input).map_err(translate_error)?;

    if raw.positions.is_empty() || raw.polygons.is_empty() {
        return Err(TracerError::malformed("mesh has no vertices or no faces"));
    }

    let vertices: Vec<Point> = raw.positions.iter().map(|(x, y, z, _)| Point::new(*x, *y, *z)).collect();
    let texture_coordinates: Vec<TextureCoordinate> = raw.tex_coords.iter().map(|(u, v, _)| TextureCoordinate::new(*u, *v)).collect();

    let mut triangles: Vec<TriangleIndices> = Vec::with_capacity(raw.polygons.len());
    let mut texture_triangles: Vec<TriangleIndices> = Vec::with_capacity(raw.polygons.len());
    let mut every_face_textured = true;

    for (position, polygon) in raw.polygons.iter().enumerate() {
        let (corners, texture_corners): (Vec<usize>, Option<Vec<usize>>) = match polygon {
            Polygon::P(corners) => (corners.clone(), None),
            Polygon::PN(corners) => (corners.iter().map(|(p, _)| *p).collect(), None),
            Polygon::PT(corners) => (corners.iter().map(|(p, _)| *p).collect(), Some(corners.iter().map(|(_, t)| *t).collect())),
            Polygon::PTN(corners) => (corners.iter().map(|(p, _, _)| *p).collect(), Some(corners.iter().map(|(_, t, _)| *t).collect())),
        };

        let [a, b, c] = triangle_of(position, &corners)?;
        triangles.push([as_index(position, a)?, as_index(position, b)?, as_index(position, c)?]);

        match texture_corners {
            Some(texture_corners) => {
                let [a, b, c] = triangle_of(position, &texture_corners)?;
                texture_triangles.push([as_index(position, a)?, as_index(position, b)?, as_index(position, c)?]);
            }
            None => every_face_textured = false,
        }
    }

    let as_malformed = |error: TracerError| match error {
        TracerError::ArgumentMismatch { what } => TracerError::malformed(what),
        other => other,
    };

    let mesh = Mesh::new(vertices, triangles, MaterialIndex::default()).map_err(as_malformed)?;
    if every_face_textured && !texture_coordinates.is_empty() {
        return mesh.with_texture_mapping(texture_coordinates, texture_triangles).map_err(as_malformed);
    }
    Ok(mesh)
}
