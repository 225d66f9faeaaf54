use std::collections::BTreeMap;
use std::rc::Rc;
use wgpu::{BindGroup, BindingResource, Buffer, Sampler, TextureView};

pub(crate) struct BindGroupBuilder<'a> {
    index: u32,
    label: Option<&'a str>,
    layout: wgpu::BindGroupLayout,

    accumulated_buffer_entries: BTreeMap<u32, Rc<Buffer>>,
    accumulated_sampler_entries: BTreeMap<u32, Sampler>,
    accumulated_texture_entries: BTreeMap<u32, Rc<TextureView>>,
}

impl<'a> BindGroupBuilder<'a> {
    #[must_use]
    pub(super) fn new(index: u32, label: Option<&'a str>, layout: wgpu::BindGroupLayout) -> Self {
        Self {
            index,
            label,
            layout,
            accumulated_buffer_entries: BTreeMap::new(),
            accumulated_sampler_entries: BTreeMap::new(),
            accumulated_texture_entries: BTreeMap::new(),
        }
    }

    /// Storage and uniform buffers alike; the layout decides how the slot is read.
    pub(crate) fn set_buffer_entry(&mut self, slot: u32, buffer: Rc<Buffer>) -> &mut Self {
        assert_eq!(self.accumulated_sampler_entries.contains_key(&slot), false, "slot already occupied by a sampler");
        assert_eq!(self.accumulated_texture_entries.contains_key(&slot), false, "slot already occupied by a texture");

        let previous = self.accumulated_buffer_entries.insert(slot, buffer);
        assert!(previous.is_none(), "slot {slot} already set");
        self
    }

    pub(crate) fn set_sampler_entry(&mut self, slot: u32, sampler: Sampler) -> &mut Self {
        assert_eq!(self.accumulated_buffer_entries.contains_key(&slot), false, "slot already occupied by a buffer");
        assert_eq!(self.accumulated_texture_entries.contains_key(&slot), false, "slot already occupied by a texture");

        let previous = self.accumulated_sampler_entries.insert(slot, sampler);
        assert!(previous.is_none(), "slot {slot} already set");
        self
    }

    pub(crate) fn set_texture_entry(&mut self, slot: u32, view: Rc<TextureView>) -> &mut Self {
        assert_eq!(self.accumulated_buffer_entries.contains_key(&slot), false, "slot already occupied by a buffer");
        assert_eq!(self.accumulated_sampler_entries.contains_key(&slot), false, "slot already occupied by a sampler");

        let previous = self.accumulated_texture_entries.insert(slot, view);
        assert!(previous.is_none(), "slot {slot} already set");
        self
    }

    #[must_use]
    pub(super) fn make_bind_group(&self, device: &wgpu::Device) -> BindGroup {
        let buffers = self.accumulated_buffer_entries.iter().map(|(slot_number, buffer)| wgpu::BindGroupEntry {
            binding: *slot_number,
            resource: buffer.as_entire_binding(),
        });
        let samplers = self.accumulated_sampler_entries.iter().map(|(slot_number, sampler)| wgpu::BindGroupEntry {
            binding: *slot_number,
            resource: BindingResource::Sampler(sampler),
        });
        let textures = self.accumulated_texture_entries.iter().map(|(slot_number, view)| wgpu::BindGroupEntry {
            binding: *slot_number,
            resource: BindingResource::TextureView(view.as_ref()),
        });
        let entries: Vec<wgpu::BindGroupEntry> = buffers.chain(samplers).chain(textures).collect();

        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: self.label,
            layout: &self.layout,
            entries: entries.as_slice(),
        })
    }

    #[must_use]
    pub(super) fn index(&self) -> u32 {
        self.index
    }

    #[cfg(test)]
    #[must_use]
    pub(super) fn slots(&self) -> Vec<u32> {
        let mut slots: Vec<u32> = self
            .accumulated_buffer_entries
            .keys()
            .chain(self.accumulated_sampler_entries.keys())
            .chain(self.accumulated_texture_entries.keys())
            .copied()
            .collect();
        slots.sort_unstable();
        slots
    }
}
