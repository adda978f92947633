use cgmath::{
    EuclideanSpace, InnerSpace, Matrix, Matrix3, Matrix4, Point3, Rad, SquareMatrix, Vector3,
    Zero,
};
use wgpu::Device;

use crate::{
    gfx::{
        geometry::{GeometryData, Topology},
        resources::material::MaterialId,
    },
    wgpu_utils::{BindGroupBuilder, BindGroupLayoutWithDesc, UniformBuffer},
};

use super::vertex::Vertex3D;

/// Bind group slot used for per-object transforms in every pipeline
pub const TRANSFORM_GROUP: u32 = 1;

pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    topology: Topology,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl Mesh {
    pub fn from_geometry(geometry: &GeometryData) -> Self {
        let (vertices, indices) = geometry.to_scene_format();
        Self {
            index_count: indices.len() as u32,
            vertices,
            indices,
            topology: geometry.topology,
            vertex_buffer: None,
            index_buffer: None,
        }
    }

    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn has_gpu_buffers(&self) -> bool {
        self.vertex_buffer.is_some() && self.index_buffer.is_some()
    }

    fn init_gpu_buffers(&mut self, device: &Device) {
        use wgpu::util::DeviceExt;

        self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.index_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }
}

/// Per-object uniform: model matrix, normal matrix and shading flags
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
    /// x: receives shadows (0 or 1)
    pub flags: [f32; 4],
}

// GPU resources struct to hold the transform uniform buffer and bind group
pub struct ObjectGpuResources {
    pub transform_ubo: UniformBuffer<ObjectUniform>,
    pub transform_bind_group: wgpu::BindGroup,
}

/// A renderable: one mesh, a material reference and a transform
///
/// Rotation is stored as Euler angles applied in X, Y, Z order, so a rotation
/// about the object's local Z axis (how clock hands turn) is a single field.
pub struct Object {
    pub name: String,
    pub mesh: Mesh,
    material_id: Option<MaterialId>,
    position: Vector3<f32>,
    rotation: Vector3<f32>,
    scale: Vector3<f32>,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    pub visible: bool,
    transform_dirty: bool,
    pub gpu_resources: Option<ObjectGpuResources>, // None until init_gpu_resources called
}

impl Object {
    /// Create a new Object with identity transformation
    pub fn new(name: impl Into<String>, geometry: &GeometryData) -> Self {
        Self {
            name: name.into(),
            mesh: Mesh::from_geometry(geometry),
            material_id: None,
            position: Vector3::zero(),
            rotation: Vector3::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            cast_shadow: false,
            receive_shadow: false,
            visible: true,
            transform_dirty: true,
            gpu_resources: None,
        }
    }

    pub fn with_material(mut self, material_id: &str) -> Self {
        self.set_material(material_id);
        self
    }

    pub fn with_position(mut self, position: Vector3<f32>) -> Self {
        self.set_position(position);
        self
    }

    /// Euler rotation in radians, applied X then Y then Z
    pub fn with_rotation(mut self, rotation: Vector3<f32>) -> Self {
        self.rotation = rotation;
        self.transform_dirty = true;
        self
    }

    pub fn with_shadows(mut self, cast: bool, receive: bool) -> Self {
        self.cast_shadow = cast;
        self.receive_shadow = receive;
        self
    }

    pub fn set_material(&mut self, material_id: &str) {
        self.material_id = Some(material_id.to_string());
    }

    pub fn get_material_id(&self) -> Option<&str> {
        self.material_id.as_deref()
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
        self.transform_dirty = true;
    }

    pub fn rotation(&self) -> Vector3<f32> {
        self.rotation
    }

    /// Set rotation around the local Z axis, leaving X and Y untouched
    pub fn set_rotation_z(&mut self, angle: Rad<f32>) {
        if self.rotation.z != angle.0 {
            self.rotation.z = angle.0;
            self.transform_dirty = true;
        }
    }

    pub fn set_scale(&mut self, scale: Vector3<f32>) {
        self.scale = scale;
        self.transform_dirty = true;
    }

    /// Orients the object so its local -Z axis points at `target`
    pub fn look_at(&mut self, target: Point3<f32>, up: Vector3<f32>) {
        let direction = target - Point3::from_vec(self.position);
        if direction.magnitude2() <= f32::EPSILON {
            return;
        }

        // Right-handed basis with local +Z pointing away from the target
        let z = -direction.normalize();
        let x = up.cross(z);
        if x.magnitude2() <= f32::EPSILON {
            return;
        }
        let x = x.normalize();
        let y = z.cross(x);

        let basis = Matrix3::from_cols(x, y, z);
        self.rotation = euler_xyz_from_matrix(&basis);
        self.transform_dirty = true;
    }

    /// Model matrix: translation * rotation(X, Y, Z) * scale
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    pub fn is_transform_dirty(&self) -> bool {
        self.transform_dirty
    }

    fn uniform(&self) -> ObjectUniform {
        let model = self.model_matrix();
        let normal = model
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix4::identity);

        ObjectUniform {
            model: model.into(),
            normal: normal.into(),
            flags: [if self.receive_shadow { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }

    /// Sync the transform to the GPU if it changed since the last upload
    pub fn update_transform(&mut self, queue: &wgpu::Queue) {
        if !self.transform_dirty {
            return;
        }
        let uniform = self.uniform();
        if let Some(gpu_resources) = self.gpu_resources.as_mut() {
            gpu_resources.transform_ubo.update_content(queue, uniform);
            self.transform_dirty = false;
        }
    }

    /// Get the transform bind group for rendering
    pub fn get_transform_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources
            .as_ref()
            .map(|res| &res.transform_bind_group)
    }

    pub fn init_gpu_resources(&mut self, device: &Device, transform_layout: &BindGroupLayoutWithDesc) {
        self.mesh.init_gpu_buffers(device);

        let transform_ubo = UniformBuffer::new_with_data(device, &self.uniform());
        let transform_bind_group = BindGroupBuilder::new(transform_layout)
            .resource(transform_ubo.binding_resource())
            .create(device, &format!("Transform Bind Group: {}", self.name));

        self.gpu_resources = Some(ObjectGpuResources {
            transform_ubo,
            transform_bind_group,
        });
        self.transform_dirty = false;
    }
}

/// Decomposes a rotation matrix into Euler angles for X, Y, Z order
pub fn euler_xyz_from_matrix(m: &Matrix3<f32>) -> Vector3<f32> {
    // cgmath is column-major: m[col][row]
    let m13 = m[2][0];
    let y = m13.clamp(-1.0, 1.0).asin();

    if m13.abs() < 0.999_999 {
        Vector3::new((-m[2][1]).atan2(m[2][2]), y, (-m[1][0]).atan2(m[0][0]))
    } else {
        Vector3::new(m[1][2].atan2(m[1][1]), y, 0.0)
    }
}

pub trait DrawObject {
    fn draw_mesh(&mut self, mesh: &Mesh);
    fn draw_object(&mut self, object: &Object);
}

impl DrawObject for wgpu::RenderPass<'_> {
    fn draw_mesh(&mut self, mesh: &Mesh) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&mesh.vertex_buffer, &mesh.index_buffer)
        else {
            return; // Skip drawing if not uploaded
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, 0..1);
    }

    fn draw_object(&mut self, object: &Object) {
        let Some(transform_bind_group) = object.get_transform_bind_group() else {
            return;
        };
        self.set_bind_group(TRANSFORM_GROUP, transform_bind_group, &[]);
        self.draw_mesh(&object.mesh);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_box;
    use cgmath::{Transform, Vector4};
    use std::f32::consts::FRAC_PI_2;

    fn assert_close(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < 1e-5, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_rotation_z_turns_local_axes() {
        let mut object = Object::new("hand", &generate_box(1.0, 1.0, 1.0));
        object.set_rotation_z(Rad(FRAC_PI_2));

        let x_axis = object.model_matrix() * Vector4::new(1.0, 0.0, 0.0, 0.0);
        assert_close(x_axis.truncate(), Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_translation_applies_after_rotation() {
        let object = Object::new("peg", &generate_box(1.0, 1.0, 1.0))
            .with_position(Vector3::new(0.0, 1.0, 0.2))
            .with_rotation(Vector3::new(0.0, 0.0, FRAC_PI_2));

        let p = object
            .model_matrix()
            .transform_point(Point3::new(1.0, 0.0, 0.0));
        assert_close(Vector3::new(p.x, p.y, p.z), Vector3::new(0.0, 2.0, 0.2));
    }

    #[test]
    fn test_set_rotation_z_marks_dirty_only_on_change() {
        let mut object = Object::new("hand", &generate_box(1.0, 1.0, 1.0));
        object.transform_dirty = false;

        object.set_rotation_z(Rad(0.0));
        assert!(!object.is_transform_dirty());

        object.set_rotation_z(Rad(1.0));
        assert!(object.is_transform_dirty());
    }

    #[test]
    fn test_euler_round_trip_through_matrix() {
        let angles = Vector3::new(0.3, -0.4, 1.1);
        let object = Object::new("hand", &generate_box(1.0, 1.0, 1.0)).with_rotation(angles);
        let m = object.model_matrix();
        let basis = Matrix3::from_cols(m.x.truncate(), m.y.truncate(), m.z.truncate());
        assert_close(euler_xyz_from_matrix(&basis), angles);
    }

    #[test]
    fn test_look_at_points_negative_z_at_target() {
        let mut object = Object::new("helper", &generate_box(1.0, 1.0, 1.0))
            .with_position(Vector3::new(15.0, 40.0, 35.0));
        object.look_at(Point3::new(0.0, 0.0, 0.0), Vector3::unit_y());

        let forward = object.model_matrix() * Vector4::new(0.0, 0.0, -1.0, 0.0);
        let expected = (Vector3::zero() - Vector3::new(15.0, 40.0, 35.0)).normalize();
        assert_close(forward.truncate(), expected);
    }

    #[test]
    fn test_mesh_keeps_topology() {
        let object = Object::new("lines", &crate::gfx::geometry::generate_frustum_lines(
            Rad(1.0),
            1.0,
            1.0,
            2.0,
        ));
        assert_eq!(object.mesh.topology(), Topology::Lines);
        assert!(!object.mesh.has_gpu_buffers());
    }
}
