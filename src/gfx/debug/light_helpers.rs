use cgmath::{EuclideanSpace, InnerSpace, Vector3};

use crate::gfx::{
    geometry::{generate_frustum_lines, generate_spot_cone_lines},
    resources::material::Material,
    scene::{LightId, Object, ObjectId, Scene, SpotLight},
};

pub const CONE_MATERIAL: &str = "debug_spot_cone";
pub const FRUSTUM_MATERIAL: &str = "debug_shadow_frustum";

const CONE_SEGMENTS: u32 = 32;

/// Spot-light cone and shadow-camera frustum for one spot light
pub struct DebugHelpers {
    light: LightId,
    cone: ObjectId,
    frustum: ObjectId,
}

impl DebugHelpers {
    /// Adds both helpers to the scene. Returns `None` if `light` isn't a spot light.
    pub fn new(scene: &mut Scene, light: LightId) -> Option<Self> {
        let spot = *scene.light(light)?.as_spot()?;

        scene.add_material(line_material(CONE_MATERIAL, [1.0, 1.0, 1.0]));
        scene.add_material(line_material(FRUSTUM_MATERIAL, [1.0, 0.67, 0.0]));

        let cone_length = (spot.target - spot.position).magnitude().max(1.0);
        let cone = scene.add_object(
            Object::new(
                "spot_light_helper",
                &generate_spot_cone_lines(cone_length, spot.angle, CONE_SEGMENTS),
            )
            .with_material(CONE_MATERIAL),
        );

        let frustum = scene.add_object(
            Object::new(
                "shadow_camera_helper",
                &generate_frustum_lines(
                    spot.shadow_fov(),
                    1.0,
                    spot.shadow.near,
                    spot.shadow.far,
                ),
            )
            .with_material(FRUSTUM_MATERIAL),
        );

        let helpers = Self {
            light,
            cone,
            frustum,
        };
        helpers.update(scene);
        log::debug!("Debug helpers attached to spot light");
        Some(helpers)
    }

    /// Re-aligns both helpers with the light's current position and target
    pub fn update(&self, scene: &mut Scene) {
        let Some(spot) = scene.light(self.light).and_then(|l| l.as_spot()).copied() else {
            return;
        };

        for id in [self.cone, self.frustum] {
            if let Some(object) = scene.object_mut(id) {
                align_with_spot(object, &spot);
            }
        }
    }

    pub fn objects(&self) -> [ObjectId; 2] {
        [self.cone, self.frustum]
    }
}

fn line_material(name: &str, color: [f32; 3]) -> Material {
    let [r, g, b] = color;
    Material::new(name, [0.0, 0.0, 0.0, 1.0])
        .with_specular([0.0; 3], 1.0)
        .with_emission(r, g, b)
}

fn align_with_spot(object: &mut Object, spot: &SpotLight) {
    let position = spot.position.to_vec();
    if object.position() != position {
        object.set_position(position);
    }
    let up = if spot.direction().y.abs() > 0.999 {
        Vector3::unit_z()
    } else {
        Vector3::unit_y()
    };
    object.look_at(spot.target, up);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        camera::{CameraController, CameraManager, OrbitCamera},
        geometry::Topology,
        scene::{AmbientLight, Light},
    };
    use cgmath::{Point3, Vector4};

    /// Distance between the helper's -Z axis and the spot direction
    fn forward_error(object: &Object, spot: &SpotLight) -> f32 {
        let forward = (object.model_matrix() * Vector4::new(0.0, 0.0, -1.0, 0.0)).truncate();
        (forward.normalize() - spot.direction()).magnitude()
    }

    fn scene_with_spot() -> (Scene, LightId, LightId) {
        let camera = OrbitCamera::new(10.0, 0.0, 0.0, Vector3::new(0.0, 0.0, 0.0), 1.0);
        let mut scene = Scene::new(CameraManager::new(camera, CameraController::new(0.01, 0.5)));
        let ambient = scene.add_light(Light::Ambient(AmbientLight::new([1.0; 3], 0.1)));
        let spot = scene.add_light(Light::Spot(SpotLight::new(
            [1.0; 3],
            1.0,
            Point3::new(15.0, 40.0, 35.0),
        )));
        (scene, ambient, spot)
    }

    #[test]
    fn test_requires_spot_light() {
        let (mut scene, ambient, _) = scene_with_spot();
        assert!(DebugHelpers::new(&mut scene, ambient).is_none());
        assert_eq!(scene.objects().count(), 0);
    }

    #[test]
    fn test_helpers_are_line_meshes_pointing_at_target() {
        let (mut scene, _, spot_id) = scene_with_spot();
        let helpers = DebugHelpers::new(&mut scene, spot_id).map(|h| h.objects());
        let Some(objects) = helpers else {
            panic!("helpers not created");
        };

        let spot = *scene.light(spot_id).and_then(Light::as_spot).unwrap();
        for id in objects {
            let object = scene.object(id).unwrap();
            assert_eq!(object.mesh.topology(), Topology::Lines);
            assert!(!object.cast_shadow);
            assert!(forward_error(object, &spot) < 1e-4);
        }
    }

    #[test]
    fn test_update_follows_moved_light() {
        let (mut scene, _, spot_id) = scene_with_spot();
        let helpers = DebugHelpers::new(&mut scene, spot_id).unwrap();

        if let Some(spot) = scene.light_mut(spot_id).and_then(Light::as_spot_mut) {
            spot.position = Point3::new(-20.0, 10.0, 5.0);
        }
        helpers.update(&mut scene);

        let spot = *scene.light(spot_id).and_then(Light::as_spot).unwrap();
        let cone = scene.object(helpers.objects()[0]).unwrap();
        assert_eq!(cone.position(), Vector3::new(-20.0, 10.0, 5.0));
        assert!(forward_error(cone, &spot) < 1e-4);
    }
}
