pub mod canonical_layouts;
pub mod packed_buffer;
pub mod pod_vector;
pub(crate) mod field_schema;
pub(crate) mod layout_plan;
pub(crate) mod record_writer;
pub(crate) mod scene_packer;
pub(crate) mod serializable_for_gpu;
