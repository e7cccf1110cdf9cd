// milestone rings on the rail: gold tori that fade with track distance,
// plus the screen-space anchors the label painter draws from

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::config::*;
use super::rail::{MILESTONES, RailCamera, RideState};
use super::track::{self, RailTrack};

#[derive(Component)]
pub struct MilestoneRing {
    pub index: usize,
}

/// Screen position of one ring and its label for this frame.
#[derive(Clone, Copy, Default)]
pub struct RingAnchor {
    pub visible: bool,
    pub ring_px: Vec2,
    pub label_px: Vec2,
}

#[derive(Resource, Default)]
pub struct RingAnchors(pub Vec<RingAnchor>);

pub struct RingsPlugin;

impl Plugin for RingsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(RingAnchors(vec![RingAnchor::default(); MILESTONES.len()]))
            .add_systems(Startup, spawn_rings)
            .add_systems(Update, (fade_rings, update_anchors));
    }
}

fn spawn_rings(
    mut commands: Commands,
    track: Res<RailTrack>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(Torus {
        minor_radius: RING_TUBE_RADIUS,
        major_radius: RING_RADIUS,
    });

    for (index, milestone) in MILESTONES.iter().enumerate() {
        let point = track.point_at(milestone.position);
        let tangent = track.tangent_at(milestone.position);

        // rings fade independently, so each owns a material clone
        let material = materials.add(StandardMaterial {
            base_color: Color::srgba(1.0, 0.84, 0.0, RING_MAX_OPACITY),
            emissive: LinearRgba::rgb(1.0, 0.84, 0.0) * 1.5,
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            double_sided: true,
            cull_mode: None,
            ..default()
        });

        // the torus axis lies on local Y; swing it onto the tangent
        commands.spawn((
            MilestoneRing { index },
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material),
            Transform {
                translation: point,
                rotation: Quat::from_rotation_arc(Vec3::Y, tangent),
                ..default()
            },
            Visibility::Visible,
        ));
    }
}

// opacity and tint keyed off wrapped track distance to the camera:
// full and white-shifted when close, cubic falloff, dim floor beyond
fn fade_rings(
    ride: Res<RideState>,
    rings: Query<(&MilestoneRing, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let wrapped = ride.wrapped();

    for (ring, material_handle) in rings.iter() {
        let distance = track::track_distance(MILESTONES[ring.index].position, wrapped);

        let color = if distance <= RING_START_FADE {
            // close: full opacity, blended halfway toward white
            let blend = (1.0 - distance / RING_START_FADE) * 0.5;
            Color::srgba(1.0, 0.84 + 0.16 * blend, blend, RING_MAX_OPACITY)
        } else if distance <= RING_START_FADE + RING_FADE_RANGE {
            let fade = (1.0 - (distance - RING_START_FADE) / RING_FADE_RANGE).powi(3);
            let opacity = RING_MIN_OPACITY + (RING_MAX_OPACITY - RING_MIN_OPACITY) * fade;
            Color::srgba(1.0, 0.84, 0.0, opacity)
        } else {
            Color::srgba(1.0, 0.84, 0.0, RING_MIN_OPACITY)
        };

        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.base_color = color;
        }
    }
}

// project ring centers into the viewport; the label painter clamps and
// draws from these during the egui pass
fn update_anchors(
    mut anchors: ResMut<RingAnchors>,
    cameras: Query<(&Camera, &GlobalTransform), With<RailCamera>>,
    rings: Query<(&MilestoneRing, &GlobalTransform)>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };

    for (ring, transform) in rings.iter() {
        let anchor = &mut anchors.0[ring.index];
        let center = transform.translation();

        let Ok(center_px) = camera.world_to_viewport(camera_transform, center) else {
            anchor.visible = false;
            continue;
        };

        anchor.visible = center_px.x >= 0.0
            && center_px.x <= window.width()
            && center_px.y >= 0.0
            && center_px.y <= window.height();
        if !anchor.visible {
            continue;
        }

        // on-screen ring radius, from a point one radius to the side
        let edge = center + camera_transform.right() * RING_RADIUS;
        let edge_px = camera
            .world_to_viewport(camera_transform, edge)
            .unwrap_or(center_px);
        let radius_px = (edge_px - center_px).length();

        // damp the offset as the camera closes in so the label stays put
        let camera_distance = camera_transform.translation().distance(center);
        let damping = (camera_distance / (10.0 * RING_RADIUS)).min(1.0);
        let min_offset = (radius_px * (1.2 + damping * 0.8)).max(40.0);

        anchor.ring_px = center_px;
        // right and up of the ring; viewport y grows downward
        anchor.label_px = center_px + Vec2::new(min_offset * 2.0, -min_offset);
    }
}
