use crate::serialization::layout_plan::LayoutPlan;
use crate::serialization::record_writer::RecordWriter;

/// Zero-filled byte image of `stride × capacity`; records are written in place.
#[derive(Debug, PartialEq, Eq)]
pub struct PackedBuffer {
    backend: Vec<u8>,
    stride: usize,
    records_written: usize,
}

impl PackedBuffer {
    #[must_use]
    pub(crate) fn new(plan: &LayoutPlan) -> Self {
        Self {
            backend: vec![0; plan.total_size_bytes()],
            stride: plan.stride(),
            records_written: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.backend.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.backend.is_empty()
    }

    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[must_use]
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.backend
    }

    /// Bytes of record `index`, written or not.
    #[must_use]
    pub fn record(&self, index: usize) -> &[u8] {
        let start = index * self.stride;
        &self.backend[start..start + self.stride]
    }

    /// Records must be written in order, each exactly once.
    pub(crate) fn write_record<WritingCode>(&mut self, plan: &LayoutPlan, execute_writing: WritingCode)
    where
        WritingCode: FnOnce(&mut RecordWriter),
    {
        assert_eq!(plan.stride(), self.stride, "layout does not match the buffer");
        assert!(self.records_written < plan.capacity(), "buffer is full");

        let start = self.records_written * self.stride;
        let mut writer = RecordWriter::new(&mut self.backend[start..start + self.stride], plan);
        execute_writing(&mut writer);

        self.records_written += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::field_schema::{ElementType, FieldSchema};

    #[must_use]
    fn make_test_plan(capacity: usize) -> LayoutPlan {
        LayoutPlan::new(&[
            FieldSchema::vector("value", 4, ElementType::Float),
        ], capacity)
    }

    #[test]
    fn test_buffer_initialization() {
        let plan = make_test_plan(5);
        let system_under_test = PackedBuffer::new(&plan);

        assert_eq!(system_under_test.len(), 80);
        assert_eq!(system_under_test.stride(), 16);
        assert_eq!(system_under_test.records_written(), 0);
        assert!(system_under_test.bytes().iter().all(|byte| *byte == 0));
    }

    #[test]
    fn test_records_written_in_order() {
        let plan = make_test_plan(3);
        let mut system_under_test = PackedBuffer::new(&plan);

        system_under_test.write_record(&plan, |writer| {
            writer.write_vector("value", &[1.0f32, 2.0, 3.0, 4.0]);
        });
        system_under_test.write_record(&plan, |writer| {
            writer.write_vector("value", &[5.0f32, 6.0, 7.0, 8.0]);
        });

        assert_eq!(system_under_test.records_written(), 2);

        let values: Vec<f32> = bytemuck::pod_collect_to_vec(system_under_test.bytes());
        assert_eq!(&values[0..8], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert!(system_under_test.record(2).iter().all(|byte| *byte == 0));
    }

    #[test]
    #[should_panic(expected = "buffer is full")]
    fn test_write_beyond_capacity() {
        let plan = make_test_plan(1);
        let mut system_under_test = PackedBuffer::new(&plan);

        system_under_test.write_record(&plan, |_| {});
        system_under_test.write_record(&plan, |_| {});
    }

    #[test]
    #[should_panic(expected = "layout does not match the buffer")]
    fn test_foreign_plan() {
        let plan = make_test_plan(1);
        let foreign = LayoutPlan::new(&[FieldSchema::scalar("x", ElementType::Float)], 1);
        let mut system_under_test = PackedBuffer::new(&plan);

        system_under_test.write_record(&foreign, |_| {});
    }
}
