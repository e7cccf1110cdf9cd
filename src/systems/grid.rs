use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore};
use bevy::prelude::*;

use crate::config::{BLOCK_SIZE, ROAD_WIDTH};
use crate::systems::rail::RailCamera;

// faint street-level grid that follows the camera
// major lines land on the block pitch so the layout stays readable
pub struct GridPlugin;

#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct GridGizmoGroup;

impl Plugin for GridPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GridConfig::default())
            .init_gizmo_group::<GridGizmoGroup>()
            .add_systems(Startup, setup_gizmos)
            .add_systems(Update, draw_grid);
    }
}

#[derive(Resource)]
pub struct GridConfig {
    pub major_spacing: f32,
    pub minor_spacing: f32,
    pub major_color: Color,
    pub minor_color: Color,
    pub extent: f32,
    pub enabled: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            major_spacing: BLOCK_SIZE + ROAD_WIDTH,
            minor_spacing: (BLOCK_SIZE + ROAD_WIDTH) / 6.0,
            major_color: Color::srgba(0.0, 0.7, 0.6, 0.12),
            minor_color: Color::srgba(0.0, 0.4, 0.35, 0.04),
            extent: 1500.0,
            enabled: true,
        }
    }
}

fn setup_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<GridGizmoGroup>();
    config.depth_bias = 0.1; // keep the grid under real geometry
}

// one pass per axis and weight; minor lines skip the major positions
fn ruled_lines(
    gizmos: &mut Gizmos<GridGizmoGroup>,
    center: Vec3,
    extent: f32,
    spacing: f32,
    skip: Option<f32>,
    color: Color,
) {
    let min_x = center.x - extent;
    let max_x = center.x + extent;
    let min_z = center.z - extent;
    let max_z = center.z + extent;

    let mut x = (min_x / spacing).floor() * spacing;
    while x <= max_x {
        if skip.is_none_or(|major| (x % major).abs() > f32::EPSILON) {
            gizmos.line(Vec3::new(x, 0.0, min_z), Vec3::new(x, 0.0, max_z), color);
        }
        x += spacing;
    }

    let mut z = (min_z / spacing).floor() * spacing;
    while z <= max_z {
        if skip.is_none_or(|major| (z % major).abs() > f32::EPSILON) {
            gizmos.line(Vec3::new(min_x, 0.0, z), Vec3::new(max_x, 0.0, z), color);
        }
        z += spacing;
    }
}

fn draw_grid(
    mut gizmos: Gizmos<GridGizmoGroup>,
    config: Res<GridConfig>,
    camera: Query<&Transform, With<RailCamera>>,
) {
    if !config.enabled {
        return;
    }

    let Ok(camera_transform) = camera.single() else {
        return;
    };

    let center = camera_transform.translation;
    ruled_lines(
        &mut gizmos,
        center,
        config.extent,
        config.minor_spacing,
        Some(config.major_spacing),
        config.minor_color,
    );
    ruled_lines(
        &mut gizmos,
        center,
        config.extent,
        config.major_spacing,
        None,
        config.major_color,
    );
}
