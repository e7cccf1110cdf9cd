// the backdrop: a distant star shell and a tube of drifting particles
// around the ride, both rendered as point-list meshes with vertex colors

use bevy::prelude::*;
use bevy::render::mesh::{PrimitiveTopology, VertexAttributeValues};
use bevy::render::render_asset::RenderAssetUsages;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use rand_distr::{Distribution, UnitSphere};

use crate::config::*;

pub struct StarsPlugin;

impl Plugin for StarsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_star_field)
            .add_systems(Update, drift_particles);
    }
}

// particle state lives beside the mesh so the drift system can integrate
#[derive(Resource)]
struct ParticleField {
    mesh: Handle<Mesh>,
    velocities: Vec<Vec3>,
    rng: StdRng,
}

fn point_cloud_mesh(positions: Vec<[f32; 3]>, colors: Vec<[f32; 4]>) -> Mesh {
    // normals point back at the scene center; the material is unlit but
    // the attribute keeps the mesh pipeline layout complete
    let normals: Vec<[f32; 3]> = positions
        .iter()
        .map(|p| {
            let n = -Vec3::from_array(*p).normalize_or_zero();
            [n.x, n.y, n.z]
        })
        .collect();

    let mut mesh = Mesh::new(
        PrimitiveTopology::PointList,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    mesh
}

fn spawn_star_field(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut rng = StdRng::seed_from_u64(INITIAL_SEED);

    // stars: uniform directions on the shell, individual gray brightness
    let mut star_positions = Vec::with_capacity(STAR_COUNT);
    let mut star_colors = Vec::with_capacity(STAR_COUNT);

    for _ in 0..STAR_COUNT {
        let direction: [f32; 3] = UnitSphere.sample(&mut rng);
        let position = Vec3::from_array(direction) * STAR_RADIUS;
        star_positions.push(position.to_array());

        let brightness = STAR_SHELL_DIM * (0.2 + rng.random::<f32>() * 0.8);
        star_colors.push([brightness, brightness, brightness, 1.0]);
    }

    commands.spawn((
        Mesh3d(meshes.add(point_cloud_mesh(star_positions, star_colors))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(1.0, 1.0, 1.0, 0.9),
            unlit: true,
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        Transform::default(),
        Visibility::Visible,
    ));

    // particles: a drifting tube around the ride height
    let mut particle_positions = Vec::with_capacity(PARTICLE_COUNT);
    let mut particle_colors = Vec::with_capacity(PARTICLE_COUNT);
    let mut velocities = Vec::with_capacity(PARTICLE_COUNT);

    for _ in 0..PARTICLE_COUNT {
        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        let radius = rng.random::<f32>() * PARTICLE_TUBE_RADIUS;
        let z = (rng.random::<f32>() * 2.0 - 1.0) * PARTICLE_TUBE_LENGTH;

        particle_positions.push([
            angle.cos() * radius,
            angle.sin() * radius + TRACK_LIFT,
            z,
        ]);

        velocities.push(Vec3::new(
            (rng.random::<f32>() - 0.5) * PARTICLE_DRIFT,
            (rng.random::<f32>() - 0.5) * PARTICLE_DRIFT,
            -rng.random::<f32>() * PARTICLE_FLOW,
        ));

        let brightness = 0.2 + rng.random::<f32>() * 0.8;
        particle_colors.push([brightness, brightness, brightness, 1.0]);
    }

    let mesh = meshes.add(point_cloud_mesh(particle_positions, particle_colors));

    commands.spawn((
        Mesh3d(mesh.clone()),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(1.0, 1.0, 1.0, 0.35),
            unlit: true,
            alpha_mode: AlphaMode::Add,
            ..default()
        })),
        Transform::default(),
        Visibility::Visible,
    ));

    commands.insert_resource(ParticleField { mesh, velocities, rng });
}

// integrate velocities; anything past the far cap respawns at the near
// one, so the tube never empties out
fn drift_particles(
    time: Res<Time>,
    mut field: ResMut<ParticleField>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let dt = time.delta_secs();
    let ParticleField { mesh, velocities, rng } = field.as_mut();

    let Some(mesh) = meshes.get_mut(&*mesh) else {
        return;
    };
    let Some(VertexAttributeValues::Float32x3(positions)) =
        mesh.attribute_mut(Mesh::ATTRIBUTE_POSITION)
    else {
        return;
    };

    for (position, velocity) in positions.iter_mut().zip(velocities.iter()) {
        position[0] += velocity.x * dt;
        position[1] += velocity.y * dt;
        position[2] += velocity.z * dt;

        if position[2] < -PARTICLE_TUBE_LENGTH {
            let angle = rng.random::<f32>() * std::f32::consts::TAU;
            let radius = rng.random::<f32>() * PARTICLE_TUBE_RADIUS;
            position[0] = angle.cos() * radius;
            position[1] = angle.sin() * radius + TRACK_LIFT;
            position[2] = PARTICLE_TUBE_LENGTH;
        }
    }
}
