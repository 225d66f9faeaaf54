use crate::error::TracerError;
use crate::gpu::binding_slots::ResourceKind;
use image::{ImageError, RgbaImage};
use log::debug;
use std::path::Path;

pub const BYTES_PER_TEXEL: usize = 4;

/// Layers one texture array may hold on every wgpu adapter.
pub const MAX_TEXTURE_LAYERS: usize = 256;

const FLAT_NORMAL: [u8; BYTES_PER_TEXEL] = [128, 128, 255, 255];
const NO_DEPTH: [u8; BYTES_PER_TEXEL] = [0, 0, 0, 255];
const WHITE: [u8; BYTES_PER_TEXEL] = [255, 255, 255, 255];

/// 8-bit RGBA image, rows from top to bottom. Images without alpha load as opaque.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    texels: Vec<u8>,
}

impl Texture {
    pub fn from_rgba(width: u32, height: u32, texels: Vec<u8>) -> Result<Self, TracerError> {
        if width == 0 || height == 0 {
            return Err(TracerError::mismatch(format!("texture of {width}x{height} texels is empty")));
        }
        let expected = width as usize * height as usize * BYTES_PER_TEXEL;
        if texels.len() != expected {
            return Err(TracerError::mismatch(format!("{width}x{height} texture needs {expected} bytes, got {}", texels.len())));
        }
        Ok(Self { width, height, texels })
    }

    #[must_use]
    pub fn filled(width: u32, height: u32, texel: [u8; BYTES_PER_TEXEL]) -> Self {
        assert!(width > 0 && height > 0, "texture must not be empty");
        Self { width, height, texels: texel.repeat(width as usize * height as usize) }
    }

    /// Only PNG files are accepted.
    pub fn load(path: &Path) -> Result<Self, TracerError> {
        let is_png = path.extension().is_some_and(|extension| extension.eq_ignore_ascii_case("png"));
        if !is_png {
            return Err(TracerError::malformed(format!("{} is not a png image", path.display())));
        }

        let image: RgbaImage = image::open(path).map_err(|error| translate_error(path, error))?.to_rgba8();
        debug!("loaded texture {}: {}x{}", path.display(), image.width(), image.height());
        Self::from_rgba(image.width(), image.height(), image.into_raw())
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn texels(&self) -> &[u8] {
        &self.texels
    }
}

#[must_use]
fn translate_error(path: &Path, error: ImageError) -> TracerError {
    match error {
        ImageError::IoError(io_error) => TracerError::Io(io_error),
        other => TracerError::malformed(format!("failed to decode {}: {other}", path.display())),
    }
}

/// Maps sampled at one texture index: surface color, tangent-space normal and
/// depth used for the parallax offset.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceTexture {
    diffuse: Texture,
    normal: Texture,
    parallax: Texture,
}

impl SurfaceTexture {
    #[must_use]
    pub fn new(diffuse: Texture, normal: Texture, parallax: Texture) -> Self {
        Self { diffuse, normal, parallax }
    }

    /// Color only: flat normals and no parallax offset, sized like `diffuse`.
    #[must_use]
    pub fn plain(diffuse: Texture) -> Self {
        let normal = Texture::filled(diffuse.width(), diffuse.height(), FLAT_NORMAL);
        let parallax = Texture::filled(diffuse.width(), diffuse.height(), NO_DEPTH);
        Self { diffuse, normal, parallax }
    }

    /// Reads `diffuse.png`, `normal.png` and `parallax.png` from `folder`.
    pub fn load(folder: &Path) -> Result<Self, TracerError> {
        Ok(Self {
            diffuse: Texture::load(&folder.join("diffuse.png"))?,
            normal: Texture::load(&folder.join("normal.png"))?,
            parallax: Texture::load(&folder.join("parallax.png"))?,
        })
    }

    /// Stand-in bound when a scene has no textures, so the kernel always sees valid arrays.
    #[must_use]
    pub(crate) fn neutral() -> Self {
        Self {
            diffuse: Texture::filled(1, 1, WHITE),
            normal: Texture::filled(1, 1, FLAT_NORMAL),
            parallax: Texture::filled(1, 1, NO_DEPTH),
        }
    }

    #[must_use]
    pub fn map(&self, kind: ResourceKind) -> &Texture {
        match kind {
            ResourceKind::DiffuseTextures => &self.diffuse,
            ResourceKind::NormalTextures => &self.normal,
            ResourceKind::ParallaxTextures => &self.parallax,
            other => panic!("{other} is not a texture array"),
        }
    }
}

/// Equally sized textures uploaded as one array; layer `i` serves texture index `i`.
#[derive(Debug)]
pub struct TextureLayers<'a> {
    width: u32,
    height: u32,
    layers: Vec<&'a Texture>,
}

impl<'a> TextureLayers<'a> {
    pub fn stack(kind: ResourceKind, layers: Vec<&'a Texture>) -> Result<Self, TracerError> {
        let Some(first) = layers.first() else {
            return Err(TracerError::mismatch(format!("{kind} has no layers")));
        };
        if layers.len() > MAX_TEXTURE_LAYERS {
            return Err(TracerError::capacity_exceeded(kind.to_string(), layers.len(), MAX_TEXTURE_LAYERS));
        }
        let (width, height) = (first.width(), first.height());
        if let Some((index, odd)) = layers.iter().enumerate().find(|(_, layer)| layer.width() != width || layer.height() != height) {
            return Err(TracerError::mismatch(format!(
                "{kind} layer {index} is {}x{}, layer 0 is {width}x{height}; all layers must match",
                odd.width(), odd.height(),
            )));
        }
        Ok(Self { width, height, layers })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Texels of every layer, layer after layer.
    #[must_use]
    pub fn bytes(&self) -> Vec<u8> {
        self.layers.iter().flat_map(|layer| layer.texels().iter().copied()).collect()
    }
}
