//! Builds the clock scene: dial, hands, markings, ground, camera and lights

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use cgmath::{Point3, Vector3};

use crate::gfx::{
    camera::{CameraController, CameraManager, OrbitCamera, OrbitCameraBounds},
    geometry::{
        extrude_polygon, extrude_ring, generate_box, generate_cylinder, generate_plane,
        ExtrudeSettings,
    },
    resources::material::Material,
    scene::{AmbientLight, Light, LightId, Object, ObjectId, Scene, ShadowSettings, SpotLight},
};

use super::{
    angles::{marking_angle, marking_position, REFERENCE_ANGLE},
    shapes::*,
};

const CLOCK_MATERIAL: &str = "clock";
const FRAME_MATERIAL: &str = "frame";
const PEG_MATERIAL: &str = "peg";
const MARKING_MATERIAL: &str = "marking";
const GROUND_MATERIAL: &str = "ground";

const CLOCK_COLOR: u32 = 0xb0a780;
const FRAME_COLOR: u32 = 0x050505;
const GROUND_COLOR: u32 = 0x0a0a0a;

pub const GROUND_SIZE: f32 = 2000.0;
pub const GROUND_HEIGHT: f32 = -10.0;
const PEG_SEGMENTS: u32 = 24;

pub const CAMERA_EYE: [f32; 3] = [0.0, -3.0, 5.0];
pub const CAMERA_MIN_DISTANCE: f32 = 5.0;
pub const CAMERA_MAX_DISTANCE: f32 = 50.0;

/// Handles to the three hands, the only objects that move after construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockHands {
    pub hour: ObjectId,
    pub minute: ObjectId,
    pub second: ObjectId,
}

/// Every object and light the builder added
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneObjects {
    pub backface: ObjectId,
    pub frame: ObjectId,
    pub peg: ObjectId,
    pub hands: ClockHands,
    pub markings: [ObjectId; MARKING_COUNT],
    pub ground: ObjectId,
    pub ambient_light: LightId,
    pub spot_light: LightId,
}

/// Constructs the fixed clock scene
///
/// Building is deterministic: two scenes built with equal settings hold the
/// same geometry, materials and transforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneBuilder {
    pub shadow_map_size: u32,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self {
            shadow_map_size: ShadowSettings::default().map_size,
        }
    }
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shadow_map_size(mut self, size: u32) -> Self {
        self.shadow_map_size = size.max(1);
        self
    }

    /// Orbit camera looking at the world origin from below the dial, with
    /// zoom limited and panning disabled
    pub fn camera_manager(&self, aspect: f32) -> CameraManager {
        let camera = OrbitCamera::looking_at(Vector3::from(CAMERA_EYE), Vector3::new(0.0, 0.0, 0.0), aspect)
            .with_bounds(OrbitCameraBounds {
                min_distance: Some(CAMERA_MIN_DISTANCE),
                max_distance: Some(CAMERA_MAX_DISTANCE),
                ..Default::default()
            });
        let controller = CameraController::new(0.005, 0.5).with_pan(false);
        CameraManager::new(camera, controller)
    }

    pub fn build_scene(&self, scene: &mut Scene) -> SceneObjects {
        self.add_materials(scene);

        let center = Vector3::from(DIAL_CENTER);
        let steps = ExtrudeSettings {
            depth: 1.0,
            steps: EXTRUDE_STEPS,
        };

        let backface = scene.add_object(
            Object::new(
                "backface",
                &generate_cylinder(DIAL_RADIUS, BACKFACE_THICKNESS, DIAL_SEGMENTS),
            )
            .with_material(CLOCK_MATERIAL)
            .with_position(center)
            .with_shadows(true, true),
        );

        let frame = scene.add_object(
            Object::new(
                "frame",
                &extrude_ring(
                    DIAL_RADIUS,
                    FRAME_INNER_RADIUS,
                    DIAL_SEGMENTS as usize,
                    &ExtrudeSettings {
                        depth: FRAME_DEPTH,
                        ..steps
                    },
                ),
            )
            .with_material(FRAME_MATERIAL)
            .with_position(center)
            .with_shadows(true, true),
        );

        let markings = std::array::from_fn(|k| {
            let offset = marking_position(k, MARKING.radius);
            scene.add_object(
                Object::new(
                    format!("marking_{k}"),
                    &generate_box(MARKING.length, MARKING.width, MARKING.depth),
                )
                .with_material(MARKING_MATERIAL)
                .with_position(center + Vector3::new(offset.x, offset.y, MARKING.z_center))
                .with_rotation(Vector3::new(0.0, 0.0, marking_angle(k).0))
                .with_shadows(true, true),
            )
        });

        let [hour, minute, second] = HANDS.map(|hand| {
            scene.add_object(
                Object::new(
                    hand.name,
                    &extrude_polygon(
                        hand.outline,
                        &ExtrudeSettings {
                            depth: hand.depth,
                            ..steps
                        },
                    ),
                )
                .with_material(hand.name)
                .with_position(center + Vector3::new(0.0, 0.0, hand.z_offset))
                .with_rotation(Vector3::new(0.0, 0.0, REFERENCE_ANGLE.0))
                .with_shadows(true, true),
            )
        });

        let peg = scene.add_object(
            Object::new("peg", &generate_cylinder(PEG.radius, PEG.height, PEG_SEGMENTS))
                .with_material(PEG_MATERIAL)
                .with_position(center + Vector3::new(0.0, 0.0, PEG.z_center))
                .with_shadows(true, true),
        );

        let ground = scene.add_object(
            Object::new("ground", &generate_plane(GROUND_SIZE, GROUND_SIZE, 1, 1))
                .with_material(GROUND_MATERIAL)
                .with_position(Vector3::new(0.0, GROUND_HEIGHT, 0.0))
                .with_rotation(Vector3::new(-FRAC_PI_2, 0.0, 0.0))
                .with_shadows(false, true),
        );

        let ambient_light = scene.add_light(Light::Ambient(AmbientLight::new([1.0; 3], 0.1)));
        let spot_light = scene.add_light(Light::Spot(self.spot_light()));

        log::debug!("Clock scene built: {:?}", scene.statistics());

        SceneObjects {
            backface,
            frame,
            peg,
            hands: ClockHands {
                hour,
                minute,
                second,
            },
            markings,
            ground,
            ambient_light,
            spot_light,
        }
    }

    fn spot_light(&self) -> SpotLight {
        let mut spot = SpotLight::new([1.0; 3], 1.0, Point3::new(15.0, 40.0, 35.0));
        spot.angle = cgmath::Rad(FRAC_PI_4);
        spot.penumbra = 0.1;
        spot.decay = 2.0;
        spot.distance = 200.0;
        spot.cast_shadow = true;
        spot.shadow = ShadowSettings {
            map_size: self.shadow_map_size,
            near: 10.0,
            far: 200.0,
            ..Default::default()
        };
        spot
    }

    fn add_materials(&self, scene: &mut Scene) {
        let solids = [
            (CLOCK_MATERIAL, CLOCK_COLOR),
            (FRAME_MATERIAL, FRAME_COLOR),
            (PEG_MATERIAL, PEG.color),
            (MARKING_MATERIAL, MARKING.color),
            (GROUND_MATERIAL, GROUND_COLOR),
        ];
        let hands = HANDS.map(|hand| (hand.name, hand.color));

        for (name, color) in solids.into_iter().chain(hands) {
            scene.add_material(Material::from_hex(name, color).with_dithering(true));
        }
    }
}
