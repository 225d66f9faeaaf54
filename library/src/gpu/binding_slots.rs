use strum_macros::{Display, EnumCount, EnumIter};

pub(crate) const UNIFORMS_GROUP_INDEX: u32 = 0;
pub(crate) const FRAME_BUFFERS_GROUP_INDEX: u32 = 1;
pub(crate) const SCENE_GROUP_INDEX: u32 = 2;
pub(crate) const TEXTURES_GROUP_INDEX: u32 = 3;

/// Backend-owned linear clamp-to-edge sampler shared by every texture array.
pub(crate) const TEXTURE_SAMPLER_SLOT: BindingSlot = BindingSlot::new(TEXTURES_GROUP_INDEX, 3);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingSlot {
    group: u32,
    binding: u32,
}

impl BindingSlot {
    #[must_use]
    pub const fn new(group: u32, binding: u32) -> Self {
        Self { group, binding }
    }

    #[must_use]
    pub const fn group(&self) -> u32 {
        self.group
    }

    #[must_use]
    pub const fn binding(&self) -> u32 {
        self.binding
    }
}

/// Every resource the tracer kernel reads or writes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, EnumCount, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ResourceKind {
    FrameUniforms,
    RenderTarget,
    Materials,
    Objects,
    Spheres,
    Camera,
    DiffuseTextures,
    NormalTextures,
    ParallaxTextures,
}

pub const TEXTURE_ARRAY_KINDS: [ResourceKind; 3] =
    [ResourceKind::DiffuseTextures, ResourceKind::NormalTextures, ResourceKind::ParallaxTextures];

/// Kernel declarations, `@group(g) @binding(b)`; the shader source must agree.
const BINDING_TABLE: [(ResourceKind, BindingSlot); 9] = [
    (ResourceKind::FrameUniforms, BindingSlot::new(UNIFORMS_GROUP_INDEX, 0)),
    (ResourceKind::RenderTarget, BindingSlot::new(FRAME_BUFFERS_GROUP_INDEX, 0)),
    (ResourceKind::Materials, BindingSlot::new(SCENE_GROUP_INDEX, 0)),
    (ResourceKind::Objects, BindingSlot::new(SCENE_GROUP_INDEX, 1)),
    (ResourceKind::Spheres, BindingSlot::new(SCENE_GROUP_INDEX, 2)),
    (ResourceKind::Camera, BindingSlot::new(SCENE_GROUP_INDEX, 5)),
    (ResourceKind::DiffuseTextures, BindingSlot::new(TEXTURES_GROUP_INDEX, 0)),
    (ResourceKind::NormalTextures, BindingSlot::new(TEXTURES_GROUP_INDEX, 1)),
    (ResourceKind::ParallaxTextures, BindingSlot::new(TEXTURES_GROUP_INDEX, 2)),
];

impl ResourceKind {
    #[must_use]
    pub const fn binding_slot(self) -> BindingSlot {
        let mut i = 0;
        while i < BINDING_TABLE.len() {
            if BINDING_TABLE[i].0 as u32 == self as u32 {
                return BINDING_TABLE[i].1;
            }
            i += 1;
        }
        panic!("resource kind is missing from the binding table");
    }

    /// Scene data uploaded once and read by the kernel through a storage binding.
    #[must_use]
    pub const fn is_scene_buffer(self) -> bool {
        matches!(self, ResourceKind::Materials | ResourceKind::Objects | ResourceKind::Spheres | ResourceKind::Camera)
    }

    /// RGBA8 2D array sampled by the kernel, one layer per texture index.
    #[must_use]
    pub const fn is_texture_array(self) -> bool {
        matches!(self, ResourceKind::DiffuseTextures | ResourceKind::NormalTextures | ResourceKind::ParallaxTextures)
    }
}
