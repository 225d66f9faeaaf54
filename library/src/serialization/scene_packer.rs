use crate::error::TracerError;
use crate::serialization::layout_plan::LayoutPlan;
use crate::serialization::packed_buffer::PackedBuffer;
use crate::serialization::serializable_for_gpu::SerializableForGpu;
use log::debug;

/// Serializes `items` into a fresh buffer; every limit is verified before
/// the buffer is allocated, so a failure never yields a partial image.
pub(crate) fn pack_records<T: SerializableForGpu>(items: &[T], plan: &LayoutPlan) -> Result<PackedBuffer, TracerError> {
    if items.len() > plan.capacity() {
        return Err(TracerError::capacity_exceeded(T::RESOURCE_KIND.to_string(), items.len(), plan.capacity()));
    }
    for item in items {
        item.check_limits(plan)?;
    }

    let mut result = PackedBuffer::new(plan);
    for item in items {
        result.write_record(plan, |writer| item.serialize_into(writer));
    }

    debug!("packed {} {} record(s) into {} bytes", items.len(), T::RESOURCE_KIND, result.len());
    Ok(result)
}
