//! Global uniform bindings for camera and scene lighting
//!
//! Everything shared across objects for a frame: camera matrices, the ambient
//! term and the single spot light with its shadow projection. Bound to slot 0
//! in all render pipelines.

use crate::{
    gfx::{camera::camera_utils::CameraUniform, scene::SpotLight},
    wgpu_utils::{BindGroupBuilder, BindGroupLayoutWithDesc, UniformBuffer},
};

/// Global uniform buffer content
///
/// MUST match the `Globals` struct in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
    pub light_view_proj: [[f32; 4]; 4],
    /// rgb: ambient radiance
    pub ambient: [f32; 4],
    /// xyz: spot position, w: range (0 = unlimited)
    pub spot_position: [f32; 4],
    /// xyz: spot direction, w: decay exponent
    pub spot_direction: [f32; 4],
    /// rgb: spot radiance, w: 1 when the spot casts shadows
    pub spot_color: [f32; 4],
    /// x: cos outer, y: cos inner, z: depth bias, w: shadow texel size
    pub spot_cone: [f32; 4],
}
// 16 + 64 + 64 + 5 * 16 = 224 bytes

impl GlobalUBOContent {
    /// Packs the frame's camera and lights. Without a spot light only the
    /// ambient term contributes.
    pub fn compose(camera: &CameraUniform, ambient: [f32; 3], spot: Option<&SpotLight>) -> Self {
        let [ar, ag, ab] = ambient;
        let mut content = Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            light_view_proj: cgmath::Matrix4::<f32>::from_scale(1.0).into(),
            ambient: [ar, ag, ab, 0.0],
            spot_position: [0.0; 4],
            spot_direction: [0.0, -1.0, 0.0, 0.0],
            spot_color: [0.0; 4],
            spot_cone: [1.0, 1.0, 0.0, 0.0],
        };

        if let Some(spot) = spot {
            let direction = spot.direction();
            let [r, g, b] = spot.radiance();
            let (cos_outer, cos_inner) = spot.cone_cosines();

            content.light_view_proj = spot.shadow_view_proj().into();
            content.spot_position = [
                spot.position.x,
                spot.position.y,
                spot.position.z,
                spot.distance,
            ];
            content.spot_direction = [direction.x, direction.y, direction.z, spot.decay];
            content.spot_color = [r, g, b, if spot.cast_shadow { 1.0 } else { 0.0 }];
            content.spot_cone = [
                cos_outer,
                cos_inner,
                spot.shadow.bias,
                1.0 / spot.shadow.map_size.max(1) as f32,
            ];
        }

        content
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Owns the global uniform buffer and its bind group
pub struct GlobalBindings {
    ubo: GlobalUBO,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, layout: &BindGroupLayoutWithDesc) -> Self {
        let ubo = GlobalUBO::new(device);
        let bind_group = BindGroupBuilder::new(layout)
            .resource(ubo.binding_resource())
            .create(device, "Global Bind Group");

        Self { ubo, bind_group }
    }

    pub fn update(&mut self, queue: &wgpu::Queue, content: GlobalUBOContent) {
        self.ubo.update_content(queue, content);
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
