use crate::serialization::field_schema::{FieldSchema, ELEMENT_SIZE_BYTES, MAX_COMPONENTS};

pub(crate) const VECTOR_SLOT_SIZE_BYTES: usize = ELEMENT_SIZE_BYTES * MAX_COMPONENTS;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FieldPlacement {
    schema: FieldSchema,
    offset: usize,
    element_stride: usize,
}

impl FieldPlacement {
    #[must_use]
    pub(crate) fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    #[must_use]
    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub(crate) fn offset_of_element(&self, index: usize) -> usize {
        assert!(index < self.schema.array_length(), "element {index} is out of '{}' bounds", self.schema.name());
        self.offset + index * self.element_stride
    }
}

/// Byte layout of one fixed-size record kind. Vectors of two to four
/// components take a whole 16-byte slot aligned to 16; scalars pack at 4.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LayoutPlan {
    stride: usize,
    capacity: usize,
    fields: Vec<FieldPlacement>,
}

impl LayoutPlan {
    #[must_use]
    pub(crate) fn new(schema: &[FieldSchema], capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be positive");
        assert!(!schema.is_empty(), "schema must not be empty");

        let mut fields: Vec<FieldPlacement> = Vec::with_capacity(schema.len());
        let mut cursor: usize = 0;
        let mut has_vector = false;

        for field in schema {
            assert!((1..=MAX_COMPONENTS).contains(&field.components()), "field '{}' has {} components", field.name(), field.components());
            assert!(field.array_length() > 0, "field '{}' has zero length", field.name());
            assert!(fields.iter().all(|placed| placed.schema.name() != field.name()), "field '{}' is duplicated", field.name());

            let (alignment, element_stride) = if field.is_vector() {
                has_vector = true;
                (VECTOR_SLOT_SIZE_BYTES, VECTOR_SLOT_SIZE_BYTES)
            } else {
                (ELEMENT_SIZE_BYTES, ELEMENT_SIZE_BYTES)
            };

            cursor = cursor.next_multiple_of(alignment);
            fields.push(FieldPlacement { schema: *field, offset: cursor, element_stride });
            cursor += element_stride * field.array_length();
        }

        let record_alignment = if has_vector { VECTOR_SLOT_SIZE_BYTES } else { ELEMENT_SIZE_BYTES };
        let stride = cursor.next_multiple_of(record_alignment);

        Self { stride, capacity, fields }
    }

    #[must_use]
    pub(crate) fn stride(&self) -> usize {
        self.stride
    }

    #[must_use]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub(crate) fn total_size_bytes(&self) -> usize {
        self.stride * self.capacity
    }

    #[must_use]
    pub(crate) fn field(&self, name: &str) -> &FieldPlacement {
        self.fields
            .iter()
            .find(|placement| placement.schema.name() == name)
            .unwrap_or_else(|| panic!("field '{name}' is not in the layout"))
    }

    #[must_use]
    pub(crate) fn offset_of(&self, name: &str) -> usize {
        self.field(name).offset()
    }
}
