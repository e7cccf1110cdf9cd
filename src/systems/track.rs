// the closed ride rail: a cyclic Catmull-Rom loop through the city plus
// a dashed emissive ribbon mesh that marks it in the scene

use bevy::math::cubic_splines::{CubicCardinalSpline, CubicCurve, CyclicCubicGenerator};
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

use crate::config::*;

// authored at unit scale, blown up to city proportions on load
const CONTROL_POINTS: [[f32; 3]; 16] = [
    [-20.0, 0.0, 0.0],
    [-15.0, 5.0, -5.0],
    [-10.0, 10.0, 0.0],
    [-5.0, 5.0, 5.0],
    [0.0, 0.0, 0.0],
    [5.0, -5.0, -5.0],
    [10.0, -10.0, 0.0],
    [15.0, -5.0, 5.0],
    [20.0, 0.0, 0.0],
    [15.0, 5.0, -5.0],
    [10.0, 10.0, 0.0],
    [5.0, 5.0, 5.0],
    [0.0, 0.0, 0.0],
    [-5.0, -5.0, -5.0],
    [-10.0, -10.0, 0.0],
    [-15.0, -5.0, 5.0],
];

/// Wraps a progress value into [0, 1).
pub fn wrap_progress(p: f32) -> f32 {
    p.rem_euclid(1.0)
}

/// Shortest distance between two progress values along the closed loop.
pub fn track_distance(a: f32, b: f32) -> f32 {
    let d = (wrap_progress(a) - wrap_progress(b)).abs();
    if d > 0.5 { 1.0 - d } else { d }
}

/// The ride rail. Progress is normalized to [0, 1) over the whole loop.
#[derive(Resource)]
pub struct RailTrack {
    curve: CubicCurve<Vec3>,
    segment_count: usize,
}

impl RailTrack {
    pub fn from_control_points() -> Self {
        let points: Vec<Vec3> = CONTROL_POINTS
            .iter()
            .map(|p| {
                Vec3::new(
                    p[0] * TRACK_SCALE_XZ,
                    p[1] * TRACK_SCALE_Y + TRACK_LIFT,
                    p[2] * TRACK_SCALE_XZ,
                )
            })
            .collect();

        let curve = CubicCardinalSpline::new_catmull_rom(points)
            .to_curve_cyclic()
            .expect("rail needs at least two control points");
        let segment_count = curve.segments().len();

        Self { curve, segment_count }
    }

    pub fn point_at(&self, u: f32) -> Vec3 {
        self.curve.position(wrap_progress(u) * self.segment_count as f32)
    }

    pub fn tangent_at(&self, u: f32) -> Vec3 {
        self.curve
            .velocity(wrap_progress(u) * self.segment_count as f32)
            .normalize_or_zero()
    }
}

#[derive(Resource)]
struct TrackMaterial(Handle<StandardMaterial>);

pub struct TrackPlugin;

impl Plugin for TrackPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(RailTrack::from_control_points())
            .add_systems(Startup, spawn_ribbon)
            .add_systems(Update, pulse_ribbon);
    }
}

// sweeps a thin quad cross-section along the loop; only dash runs get
// indices, which bakes the gap pattern into the geometry
fn ribbon_mesh(track: &RailTrack) -> Mesh {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut uvs: Vec<[f32; 2]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for i in 0..=TRACK_SEGMENTS {
        let t = i as f32 / TRACK_SEGMENTS as f32;
        let point = track.point_at(t);
        let tangent = track.tangent_at(t);
        let binormal = tangent.cross(Vec3::Y).normalize_or_zero();

        let side = binormal * (TRACK_WIDTH / 2.0);
        let lift = Vec3::Y * (TRACK_THICKNESS / 2.0);

        positions.push((point + side + lift).to_array());
        positions.push((point - side + lift).to_array());
        positions.push((point + side - lift).to_array());
        positions.push((point - side - lift).to_array());

        let u = t * 10.0;
        uvs.extend([[u, 1.0], [u, 0.0], [u, 1.0], [u, 0.0]]);

        if i < TRACK_SEGMENTS && i % TRACK_DASH_PERIOD < TRACK_DASH_RUN {
            let b = (i * 4) as u32;
            // top face
            indices.extend([b, b + 1, b + 5, b, b + 5, b + 4]);
            // bottom face
            indices.extend([b + 2, b + 7, b + 3, b + 2, b + 6, b + 7]);
            // sides
            indices.extend([b, b + 2, b + 4, b + 2, b + 6, b + 4]);
            indices.extend([b + 1, b + 3, b + 5, b + 3, b + 7, b + 5]);
        }
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh.compute_smooth_normals();
    mesh
}

fn spawn_ribbon(
    mut commands: Commands,
    track: Res<RailTrack>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.6, 0.1, 0.1, 0.5),
        emissive: LinearRgba::rgb(0.6, 0.1, 0.1) * 2.0,
        alpha_mode: AlphaMode::Add,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    commands.insert_resource(TrackMaterial(material.clone()));
    commands.spawn((
        Mesh3d(meshes.add(ribbon_mesh(&track))),
        MeshMaterial3d(material),
        Transform::default(),
        Visibility::Visible,
    ));
}

// cheap stand-in for a scrolling-chevron shader
fn pulse_ribbon(
    time: Res<Time>,
    handle: Res<TrackMaterial>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if let Some(material) = materials.get_mut(&handle.0) {
        let pulse = 0.5 + 0.5 * (time.elapsed_secs() * TRACK_PULSE_RATE).sin();
        material.emissive = LinearRgba::rgb(0.6, 0.1, 0.1) * (1.0 + 2.0 * pulse);
    }
}
