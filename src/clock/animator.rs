//! Turns the hands to match a time sample

use crate::gfx::scene::Scene;

use super::{
    angles::{hand_angles, HandAngles, HourMode},
    builder::ClockHands,
    time::TimeSample,
};

/// Applies hand angles to the scene
///
/// Holds no state between ticks: the rotations depend only on the sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockAnimator {
    hands: ClockHands,
    mode: HourMode,
}

impl ClockAnimator {
    pub fn new(hands: ClockHands, mode: HourMode) -> Self {
        Self { hands, mode }
    }

    pub fn mode(&self) -> HourMode {
        self.mode
    }

    /// Sets the Z rotation of the three hands. Hands missing from the scene are skipped.
    pub fn tick(&self, scene: &mut Scene, now: TimeSample) -> HandAngles {
        let angles = hand_angles(now, self.mode);
        log::debug!("Tick {now}: {angles:?}");

        for (id, angle) in [
            (self.hands.hour, angles.hour),
            (self.hands.minute, angles.minute),
            (self.hands.second, angles.second),
        ] {
            if let Some(hand) = scene.object_mut(id) {
                hand.set_rotation_z(angle);
            }
        }

        angles
    }
}
