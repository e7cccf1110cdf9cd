// assembles one tower into a renderable entity hierarchy:
// volume mesh, per-level window batches, roof accent

use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;
use rand::Rng;
use rand::rngs::StdRng;

use crate::config::*;
use super::SharedAssets;
use super::lighting::{self, LightLevel, LightingPolicy};
use super::sampler::BuildingPlan;

#[derive(Component)]
pub struct Building {
    pub id: u32,
    pub plan: BuildingPlan,
}

/// One of the four vertical faces of the bounding volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facade {
    Front, // +Z
    Back,  // -Z
    Right, // +X
    Left,  // -X
}

impl Facade {
    pub const ALL: [Facade; 4] = [Facade::Front, Facade::Back, Facade::Right, Facade::Left];

    /// Front/back facades share the A-axis room count, left/right the B.
    pub fn on_a_axis(self) -> bool {
        matches!(self, Facade::Front | Facade::Back)
    }

    // yaw that turns a +Z-facing pane outward from this facade
    fn yaw(self) -> f32 {
        match self {
            Facade::Front => 0.0,
            Facade::Back => std::f32::consts::PI,
            Facade::Right => std::f32::consts::FRAC_PI_2,
            Facade::Left => -std::f32::consts::FRAC_PI_2,
        }
    }
}

/// A single window cell, produced per facade position and consumed
/// straight into a batch mesh. Never persisted.
#[derive(Clone, Copy, Debug)]
pub struct WindowInstance {
    pub facade: Facade,
    pub floor: u32,
    pub room: u32,
    pub position: Vec3, // building-local
    pub yaw: f32,
    pub level: LightLevel,
}

/// Places every window of the plan via the tiling formula, one instance
/// per (facade, floor, room), with its brightness drawn from the policy.
pub fn window_instances(
    plan: &BuildingPlan,
    policy: &LightingPolicy,
    vacancy: f32,
    rng: &mut StdRng,
) -> Vec<WindowInstance> {
    let capacity = (plan.rooms_a + plan.rooms_b) as usize * 2 * plan.floors as usize;
    let mut instances = Vec::with_capacity(capacity);

    for facade in Facade::ALL {
        let rooms = if facade.on_a_axis() { plan.rooms_a } else { plan.rooms_b };
        // panes sit a hair off the facade plane to avoid z-fighting
        let reach = if facade.on_a_axis() {
            plan.width_b() / 2.0 + WINDOW_SURFACE_OFFSET
        } else {
            plan.width_a() / 2.0 + WINDOW_SURFACE_OFFSET
        };

        for floor in 0..plan.floors {
            let y = plan.floor_offset(floor);

            for room in 0..rooms {
                let position = match facade {
                    Facade::Front => Vec3::new(plan.room_offset_a(room), y, reach),
                    Facade::Back => Vec3::new(plan.room_offset_a(room), y, -reach),
                    Facade::Right => Vec3::new(reach, y, plan.room_offset_b(room)),
                    Facade::Left => Vec3::new(-reach, y, plan.room_offset_b(room)),
                };

                instances.push(WindowInstance {
                    facade,
                    floor,
                    room,
                    position,
                    yaw: facade.yaw(),
                    level: lighting::window_level(policy, vacancy, rng),
                });
            }
        }
    }

    instances
}

// merge all windows of one level into a single quad-soup mesh, so a
// building costs at most one draw call per palette level
fn batch_mesh(plan: &BuildingPlan, windows: &[&WindowInstance]) -> Mesh {
    let mut positions = Vec::with_capacity(windows.len() * 4);
    let mut normals = Vec::with_capacity(windows.len() * 4);
    let mut uvs = Vec::with_capacity(windows.len() * 4);
    let mut indices = Vec::with_capacity(windows.len() * 6);

    let half_w = plan.window_width / 2.0;
    let half_h = plan.window_height / 2.0;
    const CORNERS: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];

    for window in windows {
        let rotation = Quat::from_rotation_y(window.yaw);
        let normal = rotation * Vec3::Z;
        let base = positions.len() as u32;

        for corner in CORNERS {
            let local = Vec3::new(corner[0] * half_w, corner[1] * half_h, 0.0);
            let p = window.position + rotation * local;
            positions.push([p.x, p.y, p.z]);
            normals.push([normal.x, normal.y, normal.z]);
        }

        uvs.extend([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Groups instances by light level and emits one mesh per non-empty
/// level, dimmest first. A facade with no instances simply contributes
/// nothing; that is not an error.
pub fn facade_batches(plan: &BuildingPlan, instances: &[WindowInstance]) -> Vec<(LightLevel, Mesh)> {
    let mut batches = Vec::new();

    for level in LightLevel::ALL {
        let windows: Vec<&WindowInstance> =
            instances.iter().filter(|w| w.level == level).collect();
        if windows.is_empty() {
            continue;
        }
        batches.push((level, batch_mesh(plan, &windows)));
    }

    batches
}

/// Builds the full compound node for one tower and returns its root
/// entity. The caller owns placement; everything here is building-local.
pub fn spawn_building(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    shared: &mut SharedAssets,
    plan: &BuildingPlan,
    id: u32,
    vacancy: f32,
    rng: &mut StdRng,
) -> Entity {
    let policy = LightingPolicy::for_building(plan.is_modern());
    let instances = window_instances(plan, &policy, vacancy, rng);

    debug!(
        "building {}: modern={} {:.1}x{:.1}x{:.1} rooms=({},{}) floors={} windows={}",
        id,
        plan.is_modern(),
        plan.width_a(),
        plan.height(),
        plan.width_b(),
        plan.rooms_a,
        plan.rooms_b,
        plan.floors,
        instances.len(),
    );

    let building = commands
        .spawn((Building { id, plan: *plan }, Transform::default(), Visibility::Visible))
        .id();

    // volume, tinted per building around the same deep blue
    let tint = rng.random::<f32>() * 0.07;
    let volume_material = materials.add(StandardMaterial {
        base_color: Color::srgb(tint, 0.067 + tint, 0.2 + tint),
        emissive: LinearRgba::rgb(0.0, 0.067, 0.2) * 0.1,
        perceptual_roughness: 0.9,
        ..default()
    });
    let volume = commands
        .spawn((
            Mesh3d(meshes.add(Cuboid::new(plan.width_a(), plan.height(), plan.width_b()))),
            MeshMaterial3d(volume_material),
            Transform::default(),
            Visibility::Visible,
        ))
        .id();

    let mut children = vec![volume];

    for (level, mesh) in facade_batches(plan, &instances) {
        children.push(
            commands
                .spawn((
                    Mesh3d(meshes.add(mesh)),
                    MeshMaterial3d(shared.window_material(level, materials)),
                    Transform::default(),
                    Visibility::Visible,
                ))
                .id(),
        );
    }

    // roof accent, brighter on modern towers
    let roof = commands
        .spawn((
            Mesh3d(meshes.add(Cuboid::new(
                plan.width_a() + ROOF_OVERHANG,
                ROOF_THICKNESS,
                plan.width_b() + ROOF_OVERHANG,
            ))),
            MeshMaterial3d(shared.roof_material(plan.is_modern(), materials)),
            Transform::from_translation(Vec3::Y * (plan.height() / 2.0)),
            Visibility::Visible,
        ))
        .id();
    children.push(roof);

    commands.entity(building).add_children(&children);
    building
}
