use crate::gpu::binding_slots::ResourceKind;
use crate::serialization::canonical_layouts::{FIELD_ALBEDO, FIELD_EMISSION, FIELD_EMISSION_STRENGTH, FIELD_FUZZ, FIELD_MATERIAL_TYPE, FIELD_TEXTURE_INDEX};
use crate::serialization::record_writer::RecordWriter;
use crate::serialization::serializable_for_gpu::SerializableForGpu;
use palette::Srgb;
use strum_macros::{EnumCount, EnumIter};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, EnumCount, EnumIter)]
pub enum MaterialClass {
    #[default]
    Diffuse,
    Metal,
    Dielectric,
    Isotropic,
}

impl MaterialClass {
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextureIndex(pub u32);

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Material {
    albedo: Srgb,
    emission: Srgb,
    emission_strength: f32,
    class: MaterialClass,
    fuzz: f32,
    texture: Option<TextureIndex>,
}

impl Material {
    const ZERO_COLOR: Srgb = Srgb::new(0.0, 0.0, 0.0);
    const NO_TEXTURE: i32 = -1;

    #[must_use]
    pub fn new() -> Self {
        Self { ..Self::default() }
    }

    #[must_use]
    pub fn with_albedo(mut self, r: f32, g: f32, b: f32) -> Self {
        assert!((0.0..=1.0).contains(&r));
        assert!((0.0..=1.0).contains(&g));
        assert!((0.0..=1.0).contains(&b));
        self.albedo = Srgb::new(r, g, b);
        self
    }

    #[must_use]
    pub fn with_emission(mut self, r: f32, g: f32, b: f32) -> Self {
        assert!(r >= 0.0);
        assert!(g >= 0.0);
        assert!(b >= 0.0);
        self.emission = Srgb::new(r, g, b);
        self
    }

    #[must_use]
    pub fn with_emission_strength(mut self, strength: f32) -> Self {
        assert!(strength >= 0.0);
        self.emission_strength = strength;
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: MaterialClass) -> Self {
        self.class = class;
        self
    }

    #[must_use]
    pub fn with_fuzz(mut self, fuzz: f32) -> Self {
        self.fuzz = fuzz;
        self
    }

    #[must_use]
    pub fn with_texture(mut self, texture: TextureIndex) -> Self {
        self.texture = Some(texture);
        self
    }

    #[must_use]
    pub fn albedo(&self) -> Srgb {
        self.albedo
    }

    #[must_use]
    pub fn emission(&self) -> Srgb {
        self.emission
    }

    #[must_use]
    pub fn class(&self) -> MaterialClass {
        self.class
    }

    #[must_use]
    pub fn texture(&self) -> Option<TextureIndex> {
        self.texture
    }

    #[must_use]
    fn texture_slot(&self) -> i32 {
        self.texture.map_or(Self::NO_TEXTURE, |texture| texture.0 as i32)
    }
}

impl Default for Material {
    #[must_use]
    fn default() -> Self {
        Material {
            albedo: Self::ZERO_COLOR,
            emission: Self::ZERO_COLOR,
            emission_strength: 0.0,
            class: MaterialClass::Diffuse,
            fuzz: 0.0,
            texture: None,
        }
    }
}

impl SerializableForGpu for Material {
    const RESOURCE_KIND: ResourceKind = ResourceKind::Materials;

    fn serialize_into(&self, writer: &mut RecordWriter) {
        writer
            .write_vector(FIELD_ALBEDO, &[self.albedo.red, self.albedo.green, self.albedo.blue])
            .write_vector(FIELD_EMISSION, &[self.emission.red, self.emission.green, self.emission.blue])
            .write_scalar(FIELD_EMISSION_STRENGTH, self.emission_strength)
            .write_scalar(FIELD_MATERIAL_TYPE, self.class.as_i32())
            .write_scalar(FIELD_FUZZ, self.fuzz)
            .write_scalar(FIELD_TEXTURE_INDEX, self.texture_slot());
    }
}
