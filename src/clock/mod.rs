//! # Clock
//!
//! Everything specific to the analog clock: turning a wall-clock reading
//! into hand angles, the shapes of the parts, building the scene and the
//! once-per-second update.
//!
//! ```rust
//! use haggis_clock::clock::{hand_angles, HourMode, TimeSample};
//!
//! let angles = hand_angles(TimeSample::new(15, 0, 0).unwrap(), HourMode::Stepped);
//! assert_eq!(angles.minute, angles.second);
//! ```

pub mod angles;
pub mod animator;
pub mod builder;
pub mod schedule;
pub mod shapes;
pub mod time;

pub use angles::{hand_angles, HandAngles, HourMode, REFERENCE_ANGLE};
pub use animator::ClockAnimator;
pub use builder::{ClockHands, SceneBuilder, SceneObjects};
pub use schedule::ScheduledTask;
pub use time::TimeSample;
