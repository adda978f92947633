use wgpu::Device;

use crate::gfx::{
    camera::camera_utils::CameraManager,
    resources::{
        layouts::SceneLayouts,
        material::{Material, MaterialManager},
    },
};

use super::{
    light::{Light, SpotLight},
    object::Object,
};

/// Handle to an object owned by a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

/// Handle to a light owned by a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightId(usize);

/// Main scene containing objects, lights, materials, and camera
///
/// Objects live in slots so handles stay valid when other objects are removed.
pub struct Scene {
    pub camera_manager: CameraManager,
    objects: Vec<Option<Object>>,
    lights: Vec<Light>,
    pub material_manager: MaterialManager,
}

impl Scene {
    /// Creates a new scene with the given camera manager
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            objects: Vec::new(),
            lights: Vec::new(),
            material_manager: MaterialManager::new(),
        }
    }

    /// Updates the scene (camera matrices, etc.)
    pub fn update(&mut self) {
        self.camera_manager.camera.update_view_proj();
    }

    pub fn add_object(&mut self, object: Object) -> ObjectId {
        log::trace!("Adding object '{}'", object.name);
        self.objects.push(Some(object));
        ObjectId(self.objects.len() - 1)
    }

    /// Removes an object, returning it. The slot is not reused.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<Object> {
        self.objects.get_mut(id.0).and_then(Option::take)
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.0).and_then(Option::as_ref)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Iterates live objects in insertion order
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &Object)> {
        self.objects
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|object| (ObjectId(i), object)))
    }

    fn objects_mut(&mut self) -> impl Iterator<Item = &mut Object> {
        self.objects.iter_mut().flatten()
    }

    pub fn find_object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| id)
    }

    pub fn add_light(&mut self, light: Light) -> LightId {
        self.lights.push(light);
        LightId(self.lights.len() - 1)
    }

    pub fn light(&self, id: LightId) -> Option<&Light> {
        self.lights.get(id.0)
    }

    pub fn light_mut(&mut self, id: LightId) -> Option<&mut Light> {
        self.lights.get_mut(id.0)
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Sum of all ambient lights, premultiplied by intensity
    pub fn ambient_light(&self) -> [f32; 3] {
        self.lights
            .iter()
            .filter_map(|light| match light {
                Light::Ambient(ambient) => Some(ambient.radiance()),
                Light::Spot(_) => None,
            })
            .fold([0.0; 3], |acc, c| [acc[0] + c[0], acc[1] + c[1], acc[2] + c[2]])
    }

    /// The spot light used for shading and the shadow pass
    ///
    /// Prefers the first shadow-casting spot, else the first spot.
    pub fn shadow_spot_light(&self) -> Option<&SpotLight> {
        let mut spots = self.lights.iter().filter_map(Light::as_spot);
        let first = spots.clone().next();
        spots.find(|spot| spot.cast_shadow).or(first)
    }

    /// Adds a material, replacing one with the same name
    pub fn add_material(&mut self, material: Material) -> &mut Material {
        self.material_manager.add_material(material)
    }

    /// Gets material for rendering an object
    ///
    /// Returns the material assigned to the object, or the default material
    /// if no material is assigned or the assigned material doesn't exist.
    pub fn get_material_for_object(&self, object: &Object) -> &Material {
        self.material_manager
            .get_material_for_object(object.get_material_id())
    }

    /// Initializes GPU resources for objects that don't have them yet and
    /// uploads all materials
    pub fn init_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue, layouts: &SceneLayouts) {
        for object in self.objects.iter_mut().flatten() {
            if object.gpu_resources.is_none() {
                object.init_gpu_resources(device, &layouts.transform);
            }
        }

        self.material_manager
            .update_all_gpu_resources(device, queue, &layouts.material);
    }

    /// Updates all object transforms and syncs to GPU
    pub fn update_all_transforms(&mut self, queue: &wgpu::Queue) {
        for object in self.objects_mut() {
            object.update_transform(queue);
        }
    }

    /// Gets statistics about the scene
    pub fn statistics(&self) -> SceneStatistics {
        let mut stats = SceneStatistics {
            light_count: self.lights.len(),
            material_count: self.material_manager.len(),
            ..Default::default()
        };

        for (_, object) in self.objects() {
            stats.object_count += 1;
            stats.total_vertices += object.mesh.vertices().len();
            stats.total_indices += object.mesh.indices().len();
            if object.cast_shadow {
                stats.shadow_casters += 1;
            }
        }

        stats
    }
}

/// Scene statistics for debugging
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub light_count: usize,
    pub material_count: usize,
    pub shadow_casters: usize,
    pub total_vertices: usize,
    pub total_indices: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        camera::{CameraController, OrbitCamera},
        geometry::generate_box,
        scene::light::{AmbientLight, SpotLight},
    };
    use cgmath::{Point3, Vector3};

    fn empty_scene() -> Scene {
        let camera = OrbitCamera::new(10.0, 0.0, 0.0, Vector3::new(0.0, 0.0, 0.0), 1.0);
        Scene::new(CameraManager::new(camera, CameraController::new(0.01, 0.5)))
    }

    #[test]
    fn test_ids_survive_removal() {
        let mut scene = empty_scene();
        let a = scene.add_object(Object::new("a", &generate_box(1.0, 1.0, 1.0)));
        let b = scene.add_object(Object::new("b", &generate_box(1.0, 1.0, 1.0)));

        assert!(scene.remove_object(a).is_some());
        assert!(scene.remove_object(a).is_none());
        assert!(scene.object(a).is_none());
        assert_eq!(scene.object(b).map(|o| o.name.as_str()), Some("b"));
        assert_eq!(scene.objects().count(), 1);
    }

    #[test]
    fn test_find_by_name() {
        let mut scene = empty_scene();
        scene.add_object(Object::new("frame", &generate_box(1.0, 1.0, 1.0)));
        let peg = scene.add_object(Object::new("peg", &generate_box(1.0, 1.0, 1.0)));
        assert_eq!(scene.find_object_by_name("peg"), Some(peg));
        assert_eq!(scene.find_object_by_name("missing"), None);
    }

    #[test]
    fn test_ambient_sums_lights() {
        let mut scene = empty_scene();
        scene.add_light(Light::Ambient(AmbientLight::new([1.0; 3], 0.1)));
        scene.add_light(Light::Ambient(AmbientLight::new([1.0, 0.0, 0.0], 0.5)));
        let ambient = scene.ambient_light();
        assert!((ambient[0] - 0.6).abs() < 1e-6);
        assert!((ambient[1] - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_shadow_spot_prefers_caster() {
        let mut scene = empty_scene();
        assert!(scene.shadow_spot_light().is_none());

        scene.add_light(Light::Spot(SpotLight::new([1.0; 3], 1.0, Point3::new(1.0, 1.0, 1.0))));
        let mut caster = SpotLight::new([1.0; 3], 1.0, Point3::new(2.0, 2.0, 2.0));
        caster.cast_shadow = true;
        scene.add_light(Light::Spot(caster));

        let chosen = scene.shadow_spot_light().map(|s| s.position);
        assert_eq!(chosen, Some(Point3::new(2.0, 2.0, 2.0)));
    }

    #[test]
    fn test_statistics_count_live_objects() {
        let mut scene = empty_scene();
        let a = scene.add_object(Object::new("a", &generate_box(1.0, 1.0, 1.0)).with_shadows(true, false));
        scene.add_object(Object::new("b", &generate_box(1.0, 1.0, 1.0)));
        scene.remove_object(a);

        let stats = scene.statistics();
        assert_eq!(stats.object_count, 1);
        assert_eq!(stats.shadow_casters, 0);
        assert_eq!(stats.total_vertices, 24);
        assert_eq!(stats.total_indices, 36);
        assert_eq!(stats.material_count, 1);
    }
}
