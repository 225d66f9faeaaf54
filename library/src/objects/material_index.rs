#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct MaterialIndex(pub usize);

impl MaterialIndex {
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0 as u32
    }
}

impl From<usize> for MaterialIndex {
    #[must_use]
    fn from(value: usize) -> Self {
        MaterialIndex(value)
    }
}
