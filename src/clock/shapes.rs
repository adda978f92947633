//! Named outlines and dimensions of the clock parts
//!
//! Hand outlines lie in the XY plane with the pivot at the origin and the
//! blade running along -X, so a Z rotation of
//! [`REFERENCE_ANGLE`](super::angles::REFERENCE_ANGLE) points them at "12".
//! Each starts with a short wide tail on +X before tapering to the tip.

/// Radius of the dial face
pub const DIAL_RADIUS: f32 = 4.0;
/// Inner radius of the frame ring
pub const FRAME_INNER_RADIUS: f32 = 3.65;
pub const FRAME_DEPTH: f32 = 0.2;
pub const BACKFACE_THICKNESS: f32 = 0.1;
/// Points sampled on each circle of the dial and frame
pub const DIAL_SEGMENTS: u32 = 50;
/// Wall subdivisions for extruded parts
pub const EXTRUDE_STEPS: u32 = 5;

/// Center of the dial in world space
pub const DIAL_CENTER: [f32; 3] = [0.0, 1.0, 0.0];

pub const HOUR_HAND_OUTLINE: [[f32; 2]; 6] = [
    [0.0, 0.20],
    [0.25, 0.15],
    [0.25, -0.15],
    [0.0, -0.20],
    [-2.0, -0.05],
    [-2.0, 0.05],
];

pub const MINUTE_HAND_OUTLINE: [[f32; 2]; 6] = [
    [0.0, 0.15],
    [0.25, 0.10],
    [0.25, -0.10],
    [0.0, -0.15],
    [-3.0, -0.0375],
    [-3.0, 0.0375],
];

pub const SECOND_HAND_OUTLINE: [[f32; 2]; 6] = [
    [0.0, 0.05],
    [0.75, 0.03],
    [0.75, -0.03],
    [0.0, -0.05],
    [-3.0, -0.015],
    [-3.0, 0.015],
];

/// One hand: its outline and the slab of depth it occupies in front of the dial
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandSpec {
    pub name: &'static str,
    pub outline: &'static [[f32; 2]],
    /// Distance from the dial plane to the hand's back face
    pub z_offset: f32,
    pub depth: f32,
    /// sRGB hex color
    pub color: u32,
}

impl HandSpec {
    /// Length from the pivot to the tip
    pub fn length(&self) -> f32 {
        self.outline.iter().map(|p| -p[0]).fold(0.0, f32::max)
    }

    /// Width at the tip
    pub fn tip_width(&self) -> f32 {
        let length = self.length();
        let ys = self
            .outline
            .iter()
            .filter(|p| (-p[0] - length).abs() < 1e-6)
            .map(|p| p[1]);
        let (min, max) = ys.fold((f32::MAX, f32::MIN), |(lo, hi), y| (lo.min(y), hi.max(y)));
        max - min
    }

    pub fn front(&self) -> f32 {
        self.z_offset + self.depth
    }
}

pub const HOUR_HAND: HandSpec = HandSpec {
    name: "hour_hand",
    outline: &HOUR_HAND_OUTLINE,
    z_offset: 0.10,
    depth: 0.08,
    color: 0x353025,
};

pub const MINUTE_HAND: HandSpec = HandSpec {
    name: "minute_hand",
    outline: &MINUTE_HAND_OUTLINE,
    z_offset: 0.20,
    depth: 0.08,
    color: 0x000000,
};

pub const SECOND_HAND: HandSpec = HandSpec {
    name: "second_hand",
    outline: &SECOND_HAND_OUTLINE,
    z_offset: 0.30,
    depth: 0.04,
    color: 0xee0100,
};

/// Back to front
pub const HANDS: [HandSpec; 3] = [HOUR_HAND, MINUTE_HAND, SECOND_HAND];

/// The rectangular prisms marking each hour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkingSpec {
    /// Radial extent
    pub length: f32,
    pub width: f32,
    pub depth: f32,
    /// Distance of the marking's center from the dial center
    pub radius: f32,
    /// Z of the marking's center
    pub z_center: f32,
    pub color: u32,
}

pub const MARKING: MarkingSpec = MarkingSpec {
    length: 0.5,
    width: 0.1,
    depth: 0.04,
    radius: 3.0,
    z_center: 0.075,
    color: 0x050505,
};

pub const MARKING_COUNT: usize = 12;

/// Pivot cap over the hands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PegSpec {
    pub radius: f32,
    pub height: f32,
    pub z_center: f32,
    pub color: u32,
}

pub const PEG: PegSpec = PegSpec {
    radius: 0.12,
    height: 0.36,
    z_center: 0.22,
    color: 0x353025,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_dimensions() {
        let expected = [(2.0, 0.1), (3.0, 0.075), (3.0, 0.03)];
        for (hand, (length, width)) in HANDS.iter().zip(expected) {
            assert!((hand.length() - length).abs() < 1e-6, "{}", hand.name);
            assert!((hand.tip_width() - width).abs() < 1e-6, "{}", hand.name);
        }
    }

    #[test]
    fn test_layers_do_not_overlap() {
        let backface_front = BACKFACE_THICKNESS / 2.0;
        let marking_back = MARKING.z_center - MARKING.depth / 2.0;
        let marking_front = MARKING.z_center + MARKING.depth / 2.0;
        assert!(marking_back >= backface_front);
        assert!(HOUR_HAND.z_offset >= marking_front);

        for pair in HANDS.windows(2) {
            assert!(pair[0].front() <= pair[1].z_offset);
        }
        assert!(PEG.z_center + PEG.height / 2.0 > SECOND_HAND.front());
    }

    #[test]
    fn test_parts_fit_inside_frame() {
        for hand in HANDS {
            assert!(hand.length() < FRAME_INNER_RADIUS);
        }
        assert!(MARKING.radius + MARKING.length / 2.0 < FRAME_INNER_RADIUS);
    }
}
