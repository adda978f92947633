//! Material system for Phong shading
//!
//! Materials are stored in MaterialManager and objects reference them by ID.
//! All materials share one bind group layout, owned by the render engine.

use std::collections::{hash_map::Entry, HashMap};
use wgpu::Device;

use super::color::hex_to_linear_rgba;
use crate::wgpu_utils::{BindGroupBuilder, BindGroupLayoutWithDesc, UniformBuffer};

/// Material ID for referencing materials
pub type MaterialId = String;

pub const DEFAULT_MATERIAL: &str = "default";

/// GPU uniform data for materials
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
    /// rgb: specular color, w: shininess
    pub specular: [f32; 4],
    /// rgb: emissive color, w: dithering (0 or 1)
    pub emissive: [f32; 4],
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

struct MaterialGpuResources {
    ubo: MaterialUBO,
    bind_group: wgpu::BindGroup,
}

/// Phong material
///
/// Colors are linear RGB. Use [`Material::from_hex`] for sRGB hex colors.
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
    pub specular: [f32; 3],
    pub shininess: f32,
    pub emissive: [f32; 3],
    /// Adds screen-space noise before quantization to hide banding
    pub dithering: bool,

    gpu: Option<MaterialGpuResources>,
}

impl Default for Material {
    fn default() -> Self {
        Self::new(DEFAULT_MATERIAL, [0.8, 0.8, 0.8, 1.0])
    }
}

impl Material {
    pub fn new(name: &str, base_color: [f32; 4]) -> Self {
        let [sr, sg, sb, _] = hex_to_linear_rgba(0x111111);
        Self {
            name: name.to_string(),
            base_color,
            specular: [sr, sg, sb],
            shininess: 30.0,
            emissive: [0.0, 0.0, 0.0],
            dithering: false,
            gpu: None,
        }
    }

    /// Phong material from an sRGB hex color such as `0xb0a780`
    pub fn from_hex(name: &str, hex: u32) -> Self {
        Self::new(name, hex_to_linear_rgba(hex))
    }

    /// Builder pattern: Set specular color and shininess
    pub fn with_specular(mut self, specular: [f32; 3], shininess: f32) -> Self {
        self.specular = specular;
        self.shininess = shininess.max(0.0);
        self
    }

    /// Builder pattern: Set emissive color
    pub fn with_emission(mut self, r: f32, g: f32, b: f32) -> Self {
        self.emissive = [r, g, b];
        self
    }

    pub fn with_dithering(mut self, dithering: bool) -> Self {
        self.dithering = dithering;
        self
    }

    pub fn uniform(&self) -> MaterialUniform {
        let [sr, sg, sb] = self.specular;
        let [er, eg, eb] = self.emissive;
        MaterialUniform {
            base_color: self.base_color,
            specular: [sr, sg, sb, self.shininess],
            emissive: [er, eg, eb, if self.dithering { 1.0 } else { 0.0 }],
        }
    }

    /// Creates the GPU buffer on first use and uploads current properties
    pub fn update_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        layout: &BindGroupLayoutWithDesc,
    ) {
        let uniform = self.uniform();
        match &mut self.gpu {
            Some(gpu) => gpu.ubo.update_content(queue, uniform),
            None => {
                let ubo = MaterialUBO::new_with_data(device, &uniform);
                let bind_group = BindGroupBuilder::new(layout)
                    .resource(ubo.binding_resource())
                    .create(device, &format!("Material Bind Group: {}", self.name));
                self.gpu = Some(MaterialGpuResources { ubo, bind_group });
            }
        }
    }

    /// Gets the bind group for rendering
    pub fn get_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu.as_ref().map(|gpu| &gpu.bind_group)
    }
}

/// Manages all materials in the engine
///
/// Centralized storage for all materials. Objects reference materials by ID
/// rather than storing material data directly, so GPU resources are shared
/// between objects.
pub struct MaterialManager {
    materials: HashMap<MaterialId, Material>,
    default_material: Material,
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialManager {
    /// Creates a new material manager with a default material
    pub fn new() -> Self {
        Self {
            materials: HashMap::new(),
            default_material: Material::default(),
        }
    }

    /// Adds a material, replacing any existing one with the same name
    pub fn add_material(&mut self, material: Material) -> &mut Material {
        if material.name == DEFAULT_MATERIAL {
            self.default_material = material;
            return &mut self.default_material;
        }
        match self.materials.entry(material.name.clone()) {
            Entry::Occupied(mut entry) => {
                entry.insert(material);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(material),
        }
    }

    pub fn get_material(&self, id: &str) -> Option<&Material> {
        if id == DEFAULT_MATERIAL {
            return Some(&self.default_material);
        }
        self.materials.get(id)
    }

    pub fn get_material_mut(&mut self, id: &str) -> Option<&mut Material> {
        if id == DEFAULT_MATERIAL {
            return Some(&mut self.default_material);
        }
        self.materials.get_mut(id)
    }

    pub fn get_default_material(&self) -> &Material {
        &self.default_material
    }

    /// Gets material for an object with fallback to default
    pub fn get_material_for_object(&self, material_id: Option<&str>) -> &Material {
        material_id
            .and_then(|id| self.get_material(id))
            .unwrap_or(&self.default_material)
    }

    /// Lists all material IDs, default included
    pub fn list_materials(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.materials.keys().map(String::as_str).collect();
        names.push(DEFAULT_MATERIAL);
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.materials.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Updates GPU resources for all materials
    pub fn update_all_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        layout: &BindGroupLayoutWithDesc,
    ) {
        self.default_material
            .update_gpu_resources(device, queue, layout);
        for material in self.materials.values_mut() {
            material.update_gpu_resources(device, queue, layout);
        }
    }
}
