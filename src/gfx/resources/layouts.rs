//! Bind group layouts shared by every pipeline
//!
//! Group 0 holds globals, 1 the object transform, 2 the material and 3 the
//! shadow map. The shadow pipeline only uses groups 0 and 1.

use crate::wgpu_utils::{binding_types, BindGroupLayoutBuilder, BindGroupLayoutWithDesc};

pub struct SceneLayouts {
    pub globals: BindGroupLayoutWithDesc,
    pub transform: BindGroupLayoutWithDesc,
    pub material: BindGroupLayoutWithDesc,
    pub shadow: BindGroupLayoutWithDesc,
}

impl SceneLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            globals: BindGroupLayoutBuilder::new()
                .next_binding_rendering(binding_types::uniform())
                .create(device, "Globals Bind Group Layout"),
            transform: BindGroupLayoutBuilder::new()
                .next_binding_rendering(binding_types::uniform())
                .create(device, "Transform Bind Group Layout"),
            material: BindGroupLayoutBuilder::new()
                .next_binding_fragment(binding_types::uniform())
                .create(device, "Material Bind Group Layout"),
            shadow: BindGroupLayoutBuilder::new()
                .next_binding_fragment(binding_types::texture_depth_2d())
                .next_binding_fragment(binding_types::sampler(
                    wgpu::SamplerBindingType::Comparison,
                ))
                .create(device, "Shadow Bind Group Layout"),
        }
    }

    /// Layouts for the lit pipelines, in group order
    pub fn main_pass(&self) -> [&wgpu::BindGroupLayout; 4] {
        [
            &self.globals.layout,
            &self.transform.layout,
            &self.material.layout,
            &self.shadow.layout,
        ]
    }

    pub fn shadow_pass(&self) -> [&wgpu::BindGroupLayout; 2] {
        [&self.globals.layout, &self.transform.layout]
    }
}
