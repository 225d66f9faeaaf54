use bytemuck::Pod;

pub(crate) const ELEMENT_SIZE_BYTES: usize = 4;
pub(crate) const MAX_COMPONENTS: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ElementType {
    Float,
    Signed,
    Unsigned,
}

/// Scalars the kernel can read; all of them are four bytes wide.
pub(crate) trait GpuScalar: Pod {
    const ELEMENT: ElementType;
}

impl GpuScalar for f32 {
    const ELEMENT: ElementType = ElementType::Float;
}

impl GpuScalar for i32 {
    const ELEMENT: ElementType = ElementType::Signed;
}

impl GpuScalar for u32 {
    const ELEMENT: ElementType = ElementType::Unsigned;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FieldSchema {
    name: &'static str,
    components: usize,
    element: ElementType,
    array_length: usize,
}

impl FieldSchema {
    #[must_use]
    pub(crate) const fn scalar(name: &'static str, element: ElementType) -> Self {
        Self { name, components: 1, element, array_length: 1 }
    }

    #[must_use]
    pub(crate) const fn vector(name: &'static str, components: usize, element: ElementType) -> Self {
        Self { name, components, element, array_length: 1 }
    }

    #[must_use]
    pub(crate) const fn repeated(self, array_length: usize) -> Self {
        Self { array_length, ..self }
    }

    #[must_use]
    pub(crate) const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub(crate) const fn components(&self) -> usize {
        self.components
    }

    #[must_use]
    pub(crate) const fn element(&self) -> ElementType {
        self.element
    }

    #[must_use]
    pub(crate) const fn array_length(&self) -> usize {
        self.array_length
    }

    #[must_use]
    pub(crate) const fn is_vector(&self) -> bool {
        self.components > 1
    }
}
