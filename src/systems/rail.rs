// drives the camera along the rail: progress easing, lean, milestone seek

use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;

use crate::config::*;
use super::track::{self, RailTrack};

/// A named stop on the loop, at a fixed progress value.
pub struct Milestone {
    pub position: f32,
    pub name: &'static str,
}

pub const MILESTONES: [Milestone; 4] = [
    Milestone { position: 0.20, name: "HARBOR GATE" },
    Milestone { position: 0.45, name: "NEON MARKET" },
    Milestone { position: 0.70, name: "UPLINK SPIRE" },
    Milestone { position: 0.95, name: "TERMINUS" },
];

/// Marks the one camera that rides the rail.
#[derive(Component)]
pub struct RailCamera;

// ride state; progress is unwrapped so laps accumulate
#[derive(Resource, Default)]
pub struct RideState {
    pub progress: f32,
    pub target_progress: f32,
    pub lean: f32,
    leaning_left: bool,
    leaning_right: bool,
}

impl RideState {
    pub fn wrapped(&self) -> f32 {
        track::wrap_progress(self.progress)
    }
}

/// Fired once whenever the ride crosses a milestone, in either direction.
#[derive(Event)]
pub struct MilestonePassedEvent(pub usize);

/// Absolute target for a seek from `progress` to the next milestone
/// ahead, rolling over into the next lap past the last one.
pub fn seek_target(progress: f32) -> f32 {
    let wrapped = track::wrap_progress(progress);
    match MILESTONES.iter().find(|m| m.position > wrapped) {
        Some(milestone) => progress.floor() + milestone.position,
        None => progress.floor() + 1.0 + MILESTONES[0].position,
    }
}

/// True when the unwrapped motion from `prev` to `next` stepped over the
/// milestone at `position` on any lap.
pub fn crossed_milestone(prev: f32, next: f32, position: f32) -> bool {
    (next - position).floor() != (prev - position).floor()
}

pub struct RailCameraPlugin;

impl Plugin for RailCameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RideState>()
            .add_event::<MilestonePassedEvent>()
            .add_systems(Update, (ride_input, update_ride).chain());
    }
}

fn ride_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut wheel: EventReader<MouseWheel>,
    mut ride: ResMut<RideState>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        ride.target_progress += RIDE_KEY_SPEED * dt;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        ride.target_progress -= RIDE_KEY_SPEED * dt;
    }

    ride.leaning_left = keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft);
    ride.leaning_right = keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight);

    if keys.just_pressed(KeyCode::Space) {
        ride.target_progress = seek_target(ride.progress);
    }

    for event in wheel.read() {
        ride.target_progress += event.y * RIDE_WHEEL_SPEED;
    }
}

fn update_ride(
    time: Res<Time>,
    track: Res<RailTrack>,
    mut ride: ResMut<RideState>,
    mut passed: EventWriter<MilestonePassedEvent>,
    mut camera: Query<&mut Transform, With<RailCamera>>,
) {
    let dt = time.delta_secs();
    let prev = ride.progress;

    // exponential ease toward the target, normalized to the 60Hz feel
    let catchup = 1.0 - (1.0 - RIDE_CATCHUP).powf(dt * 60.0);
    ride.progress += (ride.target_progress - ride.progress) * catchup;

    // lean accumulates while held, springs back to center when released
    if ride.leaning_left {
        ride.lean += LEAN_SPEED * dt;
    } else if ride.leaning_right {
        ride.lean -= LEAN_SPEED * dt;
    } else if ride.lean != 0.0 {
        ride.lean *= (1.0 - LEAN_RETURN * dt).max(0.0);
        if ride.lean.abs() < 0.001 {
            ride.lean = 0.0;
        }
    }

    for (index, milestone) in MILESTONES.iter().enumerate() {
        if crossed_milestone(prev, ride.progress, milestone.position) {
            passed.write(MilestonePassedEvent(index));
        }
    }

    let Ok(mut transform) = camera.single_mut() else {
        return;
    };

    let wrapped = ride.wrapped();
    let point = track.point_at(wrapped);
    let ahead = track.point_at(wrapped + LOOK_AHEAD);

    let forward = ahead - point;
    let right = Vec3::new(forward.z, 0.0, -forward.x).normalize_or_zero();
    let mut target = ahead + right * ride.lean;
    target.y += LOOK_RAISE;

    transform.translation = point + Vec3::Y * RIDE_LIFT;
    transform.look_at(target, Vec3::Y);
}
