use crate::error::TracerError;
use crate::gpu::binding_slots::ResourceKind;
use crate::serialization::layout_plan::LayoutPlan;
use crate::serialization::record_writer::RecordWriter;

pub(crate) trait SerializableForGpu {
    const RESOURCE_KIND: ResourceKind;

    /// Per-item limits imposed by the layout, checked before anything is written.
    fn check_limits(&self, _plan: &LayoutPlan) -> Result<(), TracerError> {
        Ok(())
    }

    fn serialize_into(&self, writer: &mut RecordWriter);
}
