//! Scene lights
//!
//! The clock needs two kinds: a flat ambient term and a single spot light that
//! can cast shadows. Colors are linear RGB.

use cgmath::{perspective, InnerSpace, Matrix4, Point3, Rad, Vector3};

use crate::gfx::camera::camera_utils::OPENGL_TO_WGPU_MATRIX;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

impl AmbientLight {
    pub fn new(color: [f32; 3], intensity: f32) -> Self {
        Self { color, intensity }
    }

    /// Color premultiplied by intensity
    pub fn radiance(&self) -> [f32; 3] {
        self.color.map(|c| c * self.intensity)
    }
}

/// Shadow map parameters for a shadow-casting light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowSettings {
    pub map_size: u32,
    pub near: f32,
    pub far: f32,
    pub bias: f32,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            map_size: 512,
            near: 10.0,
            far: 200.0,
            bias: 0.0005,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    /// Half-angle of the outer cone
    pub angle: Rad<f32>,
    /// Fraction of the cone over which light fades to zero, in [0, 1]
    pub penumbra: f32,
    pub decay: f32,
    /// Range of the light; zero means unlimited
    pub distance: f32,
    pub cast_shadow: bool,
    pub shadow: ShadowSettings,
}

impl SpotLight {
    pub fn new(color: [f32; 3], intensity: f32, position: Point3<f32>) -> Self {
        Self {
            color,
            intensity,
            position,
            target: Point3::new(0.0, 0.0, 0.0),
            angle: Rad(std::f32::consts::FRAC_PI_3),
            penumbra: 0.0,
            decay: 2.0,
            distance: 0.0,
            cast_shadow: false,
            shadow: ShadowSettings::default(),
        }
    }

    pub fn radiance(&self) -> [f32; 3] {
        self.color.map(|c| c * self.intensity)
    }

    /// Normalized direction from the light towards its target
    pub fn direction(&self) -> Vector3<f32> {
        let dir = self.target - self.position;
        if dir.magnitude2() <= f32::EPSILON {
            -Vector3::unit_y()
        } else {
            dir.normalize()
        }
    }

    /// Cosines of the outer and inner cone half-angles
    pub fn cone_cosines(&self) -> (f32, f32) {
        let outer = self.angle.0.cos();
        let inner = (self.angle.0 * (1.0 - self.penumbra.clamp(0.0, 1.0))).cos();
        (outer, inner)
    }

    /// Field of view of the shadow camera, covering the full cone
    pub fn shadow_fov(&self) -> Rad<f32> {
        Rad(self.angle.0 * 2.0)
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        let dir = self.direction();
        // Avoid a degenerate basis when looking straight down
        let up = if dir.y.abs() > 0.999 {
            Vector3::unit_z()
        } else {
            Vector3::unit_y()
        };
        Matrix4::look_at_rh(self.position, self.position + dir, up)
    }

    pub fn shadow_view_proj(&self) -> Matrix4<f32> {
        let proj = perspective(self.shadow_fov(), 1.0, self.shadow.near, self.shadow.far);
        OPENGL_TO_WGPU_MATRIX * proj * self.view_matrix()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient(AmbientLight),
    Spot(SpotLight),
}

impl Light {
    pub fn as_spot(&self) -> Option<&SpotLight> {
        match self {
            Light::Spot(spot) => Some(spot),
            Light::Ambient(_) => None,
        }
    }

    pub fn as_spot_mut(&mut self) -> Option<&mut SpotLight> {
        match self {
            Light::Spot(spot) => Some(spot),
            Light::Ambient(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Light::Ambient(_) => "ambient",
            Light::Spot(_) => "spot",
        }
    }
}
