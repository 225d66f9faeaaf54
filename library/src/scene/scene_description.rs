use crate::error::TracerError;
use crate::gpu::backend::ComputeBackend;
use crate::gpu::binding_slots::{ResourceKind, TEXTURE_ARRAY_KINDS};
use crate::gpu::storage_buffer::StorageBuffer;
use crate::gpu::texture_array::TextureArray;
use crate::objects::material::{Material, TextureIndex};
use crate::objects::material_index::MaterialIndex;
use crate::objects::mesh::Mesh;
use crate::objects::sphere::Sphere;
use crate::objects::texture::{SurfaceTexture, TextureLayers};
use crate::scene::camera::Camera;
use crate::scene::gpu_scene::GpuScene;
use crate::serialization::canonical_layouts::{camera_layout, material_layout, mesh_object_layout, sphere_layout};
use crate::serialization::packed_buffer::PackedBuffer;
use crate::serialization::scene_packer::pack_records;
use log::{info, warn};

/// Host-side scene under construction; `build` uploads it and consumes it.
pub struct SceneDescription {
    camera: Camera,
    materials: Vec<Material>,
    spheres: Vec<Sphere>,
    meshes: Vec<Mesh>,
    textures: Vec<SurfaceTexture>,
}

impl SceneDescription {
    #[must_use]
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            materials: Vec::new(),
            spheres: Vec::new(),
            meshes: Vec::new(),
            textures: Vec::new(),
        }
    }

    #[must_use]
    pub fn add_material(&mut self, target: &Material) -> MaterialIndex {
        self.materials.push(*target);
        MaterialIndex(self.materials.len() - 1)
    }

    /// The returned index selects the layer of every texture array.
    #[must_use]
    pub fn add_texture(&mut self, texture: SurfaceTexture) -> TextureIndex {
        self.textures.push(texture);
        TextureIndex((self.textures.len() - 1) as u32)
    }

    pub fn add_sphere(&mut self, sphere: Sphere) -> &mut Self {
        self.spheres.push(sphere);
        self
    }

    pub fn add_spheres(&mut self, spheres: impl IntoIterator<Item = Sphere>) -> &mut Self {
        self.spheres.extend(spheres);
        self
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> &mut Self {
        self.meshes.push(mesh);
        self
    }

    pub fn set_camera(&mut self, camera: Camera) -> &mut Self {
        self.camera = camera;
        self
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[must_use]
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    #[must_use]
    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    #[must_use]
    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    #[must_use]
    pub fn textures(&self) -> &[SurfaceTexture] {
        &self.textures
    }

    fn check_material_references(&self) -> Result<(), TracerError> {
        let material_count = self.materials.len();
        let referenced = self
            .spheres
            .iter()
            .map(|sphere| sphere.material())
            .chain(self.meshes.iter().map(|mesh| mesh.material()));

        for material in referenced {
            if material.0 >= material_count {
                return Err(TracerError::mismatch(format!(
                    "material {} is referenced, but only {} materials exist",
                    material.0, material_count,
                )));
            }
        }
        Ok(())
    }

    fn check_texture_references(&self) -> Result<(), TracerError> {
        let texture_count = self.textures.len();
        for texture in self.materials.iter().filter_map(|material| material.texture()) {
            if texture.0 as usize >= texture_count {
                return Err(TracerError::mismatch(format!(
                    "texture {} is referenced, but only {} textures exist",
                    texture.0, texture_count,
                )));
            }
        }
        Ok(())
    }

    /// Packs every buffer and stacks every texture array, then uploads them in
    /// binding order. Nothing is uploaded when packing fails; a failed upload
    /// releases whatever was uploaded before it. A scene without textures gets
    /// single-layer neutral arrays.
    pub fn build<B: ComputeBackend>(self, backend: &mut B) -> Result<GpuScene<B>, TracerError> {
        self.check_material_references()?;
        self.check_texture_references()?;

        if self.spheres.is_empty() && self.meshes.is_empty() {
            warn!("scene has neither spheres nor meshes, the image will show only the background");
        }
        if self.materials.is_empty() {
            warn!("scene has no materials");
        }

        let packed: [(ResourceKind, PackedBuffer); 4] = [
            (ResourceKind::Materials, pack_records(&self.materials, &material_layout())?),
            (ResourceKind::Objects, pack_records(&self.meshes, &mesh_object_layout())?),
            (ResourceKind::Spheres, pack_records(&self.spheres, &sphere_layout())?),
            (ResourceKind::Camera, pack_records(&[self.camera], &camera_layout())?),
        ];

        let neutral = [SurfaceTexture::neutral()];
        let surfaces: &[SurfaceTexture] = if self.textures.is_empty() { &neutral } else { &self.textures };
        let stacked = TEXTURE_ARRAY_KINDS
            .iter()
            .map(|&kind| Ok((kind, TextureLayers::stack(kind, surfaces.iter().map(|surface| surface.map(kind)).collect())?)))
            .collect::<Result<Vec<_>, TracerError>>()?;

        let mut uploaded: Vec<StorageBuffer<B>> = Vec::with_capacity(packed.len());
        let mut textures: Vec<TextureArray<B>> = Vec::with_capacity(stacked.len());
        for (kind, buffer) in packed {
            match StorageBuffer::new(backend, kind, buffer) {
                Ok(storage) => uploaded.push(storage),
                Err(error) => {
                    release_partial(backend, uploaded, textures);
                    return Err(error);
                }
            }
        }
        for (kind, layers) in &stacked {
            match TextureArray::new(backend, *kind, layers) {
                Ok(texture) => textures.push(texture),
                Err(error) => {
                    release_partial(backend, uploaded, textures);
                    return Err(error);
                }
            }
        }

        info!(
            "scene built: {} materials, {} meshes, {} spheres, {} textures, {} bytes in storage buffers",
            self.materials.len(),
            self.meshes.len(),
            self.spheres.len(),
            self.textures.len(),
            uploaded.iter().map(|buffer| buffer.size_bytes()).sum::<usize>(),
        );

        Ok(GpuScene::new(uploaded, textures, self.meshes.len(), self.spheres.len(), self.materials.len()))
    }
}

fn release_partial<B: ComputeBackend>(backend: &mut B, buffers: Vec<StorageBuffer<B>>, textures: Vec<TextureArray<B>>) {
    for buffer in buffers {
        buffer.cleanup(backend);
    }
    for texture in textures {
        texture.cleanup(backend);
    }
}
