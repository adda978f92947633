//! Time to hand-angle mapping
//!
//! Hands and markings are modelled pointing along local -X and turn about +Z.
//! An angle of [`REFERENCE_ANGLE`] points them at "12"; decreasing the angle
//! turns them clockwise as seen from in front of the dial.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use cgmath::{Rad, Vector2};

use super::time::TimeSample;

/// Z rotation that points a hand at "12"
pub const REFERENCE_ANGLE: Rad<f32> = Rad(-FRAC_PI_2);

/// How the hour hand moves between whole hours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum HourMode {
    /// Jumps once per hour
    Stepped,
    /// Advances with the minutes, like a mechanical clock
    #[default]
    Creep,
}

/// Z rotations of the three hands, each in `[0, 2π)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub hour: Rad<f32>,
    pub minute: Rad<f32>,
    pub second: Rad<f32>,
}

pub fn hand_angles(sample: TimeSample, mode: HourMode) -> HandAngles {
    let minute = sample.minute() as f32;
    let hour12 = match mode {
        HourMode::Stepped => sample.hour() as f32,
        HourMode::Creep => sample.hour() as f32 + minute / 60.0,
    };

    HandAngles {
        hour: dial_angle(hour12 / 12.0),
        minute: dial_angle(minute / 60.0),
        second: dial_angle(sample.second() as f32 / 60.0),
    }
}

/// Angle for a fraction of a full clockwise turn starting at "12"
pub fn dial_angle(fraction: f32) -> Rad<f32> {
    normalize_angle(Rad(REFERENCE_ANGLE.0 - TAU * fraction))
}

/// Wraps into `[0, 2π)`
pub fn normalize_angle(angle: Rad<f32>) -> Rad<f32> {
    let wrapped = angle.0.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        Rad(0.0)
    } else {
        Rad(wrapped)
    }
}

/// Smallest absolute difference between two angles, in `[0, π]`
pub fn angular_distance(a: Rad<f32>, b: Rad<f32>) -> Rad<f32> {
    let d = normalize_angle(a - b).0;
    Rad(if d > PI { TAU - d } else { d })
}

/// Unit vector in the dial plane that a hand rotated by `angle` points along
pub fn dial_direction(angle: Rad<f32>) -> Vector2<f32> {
    let (sin, cos) = angle.0.sin_cos();
    Vector2::new(-cos, -sin)
}

/// Offset from the dial center of hour marking `index` (0 is "12")
pub fn marking_position(index: usize, radius: f32) -> Vector2<f32> {
    dial_direction(marking_angle(index)) * radius
}

/// Z rotation that lays marking `index` along its radius
pub fn marking_angle(index: usize) -> Rad<f32> {
    dial_angle((index % 12) as f32 / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn sample(h: u32, m: u32, s: u32) -> TimeSample {
        TimeSample::new(h, m, s).unwrap()
    }

    fn close(a: Rad<f32>, b: Rad<f32>) -> bool {
        angular_distance(a, b).0 < EPS
    }

    #[test]
    fn test_midnight_points_at_twelve() {
        let angles = hand_angles(sample(0, 0, 0), HourMode::Creep);
        let twelve = Vector2::new(0.0, 1.0);
        for angle in [angles.hour, angles.minute, angles.second] {
            let dir = dial_direction(angle);
            assert!((dir - twelve).x.abs() < EPS && (dir - twelve).y.abs() < EPS);
        }
        assert_eq!(angles, hand_angles(sample(12, 0, 0), HourMode::Creep));
    }

    #[test]
    fn test_three_oclock() {
        let angles = hand_angles(sample(3, 0, 0), HourMode::Stepped);
        let dir = dial_direction(angles.hour);
        assert!((dir.x - 1.0).abs() < EPS && dir.y.abs() < EPS);
        assert!(close(angles.hour, REFERENCE_ANGLE - Rad(FRAC_PI_2)));
        assert!(close(angles.minute, REFERENCE_ANGLE));
        assert!(close(angles.second, REFERENCE_ANGLE));
    }

    #[test]
    fn test_half_past_six_creeps() {
        let creep = hand_angles(sample(6, 30, 0), HourMode::Creep);
        let six = dial_angle(6.0 / 12.0);
        let seven = dial_angle(7.0 / 12.0);
        assert!(close(angular_distance(creep.hour, six), Rad(TAU / 24.0)));
        assert!(close(angular_distance(creep.hour, seven), Rad(TAU / 24.0)));
        assert!(close(creep.minute, six));

        let stepped = hand_angles(sample(6, 30, 0), HourMode::Stepped);
        assert!(close(stepped.hour, six));
    }

    #[test]
    fn test_second_hand_steps_and_wraps() {
        let a = hand_angles(sample(1, 2, 10), HourMode::Creep).second;
        let b = hand_angles(sample(1, 2, 11), HourMode::Creep).second;
        assert!(close(angular_distance(a, b), Rad(TAU / 60.0)));
        // clockwise means decreasing angle
        assert!(close(normalize_angle(a - Rad(TAU / 60.0)), b));

        let last = hand_angles(sample(1, 2, 59), HourMode::Creep).second;
        let first = hand_angles(sample(1, 3, 0), HourMode::Creep).second;
        assert!(close(angular_distance(last, first), Rad(TAU / 60.0)));
    }

    #[test]
    fn test_angles_normalized() {
        for h in 0..24 {
            for m in (0..60).step_by(7) {
                let angles = hand_angles(sample(h, m, m), HourMode::Creep);
                for angle in [angles.hour, angles.minute, angles.second] {
                    assert!((0.0..TAU).contains(&angle.0));
                }
            }
        }
    }

    #[test]
    fn test_normalize_tiny_negative() {
        assert_eq!(normalize_angle(Rad(-1e-9)).0, 0.0);
        assert!(close(normalize_angle(Rad(-FRAC_PI_2)), Rad(3.0 * FRAC_PI_2)));
        assert!(close(normalize_angle(Rad(5.0 * TAU + 1.0)), Rad(1.0)));
    }

    #[test]
    fn test_markings_every_thirty_degrees() {
        for k in 0..12 {
            let pos = marking_position(k, 3.0);
            let expected = (TAU * k as f32 / 12.0).sin_cos();
            assert!((pos.x - 3.0 * expected.0).abs() < 1e-4);
            assert!((pos.y - 3.0 * expected.1).abs() < 1e-4);
        }
        assert!(close(marking_angle(12), marking_angle(0)));
    }
}
