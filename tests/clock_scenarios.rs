//! End-to-end checks of the clock without a window or GPU

use std::f32::consts::TAU;

use cgmath::{Rad, Vector2};
use haggis_clock::{
    clock::{
        angles::{angular_distance, dial_angle, dial_direction},
        ClockAnimator, HourMode, SceneBuilder, SceneObjects, TimeSample,
    },
    gfx::scene::{ObjectId, Scene},
};

const EPS: f32 = 1e-4;

fn clock(mode: HourMode) -> (Scene, SceneObjects, ClockAnimator) {
    let builder = SceneBuilder::new();
    let mut scene = Scene::new(builder.camera_manager(1200.0 / 800.0));
    let objects = builder.build_scene(&mut scene);
    let animator = ClockAnimator::new(objects.hands, mode);
    (scene, objects, animator)
}

fn pointing(scene: &Scene, id: ObjectId) -> Vector2<f32> {
    let rotation = scene.object(id).map(|o| o.rotation().z).unwrap_or(f32::NAN);
    dial_direction(Rad(rotation))
}

fn assert_points(actual: Vector2<f32>, expected: Vector2<f32>) {
    assert!(
        (actual.x - expected.x).abs() < EPS && (actual.y - expected.y).abs() < EPS,
        "{actual:?} != {expected:?}"
    );
}

#[test]
fn midnight_and_noon_point_at_twelve() {
    let (mut scene, objects, animator) = clock(HourMode::Creep);
    let twelve = Vector2::new(0.0, 1.0);

    for hour in [0, 12] {
        animator.tick(&mut scene, TimeSample::new(hour, 0, 0).unwrap());
        for id in [objects.hands.hour, objects.hands.minute, objects.hands.second] {
            assert_points(pointing(&scene, id), twelve);
        }
    }
}

#[test]
fn three_oclock_hour_hand_is_quarter_turn_clockwise() {
    let (mut scene, objects, animator) = clock(HourMode::Creep);
    animator.tick(&mut scene, TimeSample::new(3, 0, 0).unwrap());

    // Viewed from the front, "3" is to the right of the dial center
    assert_points(pointing(&scene, objects.hands.hour), Vector2::new(1.0, 0.0));
    assert_points(pointing(&scene, objects.hands.minute), Vector2::new(0.0, 1.0));
    assert_points(pointing(&scene, objects.hands.second), Vector2::new(0.0, 1.0));
}

#[test]
fn half_past_six_hour_hand_between_six_and_seven() {
    let (mut scene, objects, animator) = clock(HourMode::Creep);
    let angles = animator.tick(&mut scene, TimeSample::new(18, 30, 0).unwrap());

    let half_hour = TAU / 24.0;
    assert!((angular_distance(angles.hour, dial_angle(6.0 / 12.0)).0 - half_hour).abs() < EPS);
    assert!((angular_distance(angles.hour, dial_angle(7.0 / 12.0)).0 - half_hour).abs() < EPS);
    assert_points(pointing(&scene, objects.hands.minute), Vector2::new(0.0, -1.0));
}

#[test]
fn second_hand_makes_full_turn_per_minute() {
    let (mut scene, objects, animator) = clock(HourMode::Creep);
    let mut previous = None;

    for second in 0..60 {
        let angles = animator.tick(&mut scene, TimeSample::new(9, 15, second).unwrap());
        if let Some(previous) = previous {
            let step = angular_distance(previous, angles.second).0;
            assert!((step - TAU / 60.0).abs() < EPS, "second {second}");
        }
        previous = Some(angles.second);
    }

    let wrapped = animator.tick(&mut scene, TimeSample::new(9, 16, 0).unwrap());
    assert_points(pointing(&scene, objects.hands.second), Vector2::new(0.0, 1.0));
    assert!(previous.is_some_and(|p| (angular_distance(p, wrapped.second).0 - TAU / 60.0).abs() < EPS));
}

#[test]
fn repeated_ticks_change_nothing() {
    let (mut scene, objects, animator) = clock(HourMode::Stepped);
    let now = TimeSample::new(4, 20, 33).unwrap();

    animator.tick(&mut scene, now);
    let before: Vec<_> = scene.objects().map(|(_, o)| o.model_matrix()).collect();
    animator.tick(&mut scene, now);
    let after: Vec<_> = scene.objects().map(|(_, o)| o.model_matrix()).collect();

    assert_eq!(before, after);
    assert!(scene.object(objects.hands.hour).is_some());
}

#[test]
fn resize_updates_camera_aspect() {
    let (mut scene, _, _) = clock(HourMode::Creep);
    assert!((scene.camera_manager.camera.aspect - 1.5).abs() < 1e-6);

    scene.camera_manager.resize(1000, 500);
    assert_eq!(scene.camera_manager.camera.aspect, 2.0);
}
