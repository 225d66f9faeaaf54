use crate::serialization::field_schema::{GpuScalar, ELEMENT_SIZE_BYTES};
use crate::serialization::layout_plan::LayoutPlan;

/// Writes the fields of a single record, addressing them by name.
/// Bytes not written keep their zero fill.
pub(crate) struct RecordWriter<'a> {
    record: &'a mut [u8],
    plan: &'a LayoutPlan,
}

impl<'a> RecordWriter<'a> {
    #[must_use]
    pub(super) fn new(record: &'a mut [u8], plan: &'a LayoutPlan) -> Self {
        assert_eq!(record.len(), plan.stride(), "record size differs from the layout stride");
        Self { record, plan }
    }

    pub(crate) fn write_scalar<T: GpuScalar>(&mut self, name: &str, value: T) -> &mut Self {
        self.write_element(name, 0, &[value])
    }

    pub(crate) fn write_vector<T: GpuScalar>(&mut self, name: &str, components: &[T]) -> &mut Self {
        self.write_element(name, 0, components)
    }

    pub(crate) fn write_element<T: GpuScalar>(&mut self, name: &str, index: usize, components: &[T]) -> &mut Self {
        let placement = self.plan.field(name);
        let schema = placement.schema();
        assert_eq!(schema.element(), T::ELEMENT, "field '{name}' holds {:?} elements", schema.element());
        assert_eq!(components.len(), schema.components(), "field '{name}' has {} components", schema.components());

        let start = placement.offset_of_element(index);
        let bytes: &[u8] = bytemuck::cast_slice(components);
        debug_assert_eq!(bytes.len(), components.len() * ELEMENT_SIZE_BYTES);

        self.record[start..start + bytes.len()].copy_from_slice(bytes);
        self
    }
}
