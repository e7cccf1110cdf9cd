// tiles the block grid: sidewalks, lot constraints, one tower per lot

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use crate::config::*;
use super::assembler;
use super::sampler::{self, BuildingConstraints};
use super::{CityParams, SharedAssets};

// entity hierarchy components
#[derive(Component)]
pub struct CityRoot {
    pub seed: u64,
}

#[derive(Component)]
pub struct CityBlock {
    pub coord: IVec2,
}

/// A lot footprint multiplier with its selection weight.
pub struct BlockVariation {
    pub width: f32,
    pub depth: f32,
    pub weight: f32,
}

// weights sum to 1; most blocks stay standard
pub static BLOCK_VARIATIONS: [BlockVariation; 5] = [
    BlockVariation { width: 1.0, depth: 1.0, weight: 0.7 },
    BlockVariation { width: 2.0, depth: 1.0, weight: 0.1 },
    BlockVariation { width: 1.0, depth: 2.0, weight: 0.1 },
    BlockVariation { width: 1.5, depth: 1.5, weight: 0.05 },
    BlockVariation { width: 2.0, depth: 2.0, weight: 0.05 },
];

/// Cumulative-probability draw over the variation table, defaulting to
/// the standard block if rounding ever exhausts the weights.
pub fn select_variation(rng: &mut StdRng) -> &'static BlockVariation {
    let draw = rng.random::<f32>();
    let mut cumulative = 0.0;

    for variation in &BLOCK_VARIATIONS {
        cumulative += variation.weight;
        if draw <= cumulative {
            return variation;
        }
    }

    &BLOCK_VARIATIONS[0]
}

/// Generates the whole city under one root entity and returns it.
/// Each block gets its own rng stream derived from the city seed, so a
/// block's content does not depend on how many blocks precede it.
pub fn spawn_city(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    shared: &mut SharedAssets,
    seed: u64,
    params: &CityParams,
) -> Entity {
    let root = commands
        .spawn((CityRoot { seed }, Transform::default(), Visibility::Visible))
        .id();

    let side = (2 * params.grid_radius + 1) as u64;
    let pitch = BLOCK_SIZE + params.road_width;
    let mut building_id = 0u32;

    for x in -params.grid_radius..=params.grid_radius {
        for z in -params.grid_radius..=params.grid_radius {
            let index = (x + params.grid_radius) as u64 * side + (z + params.grid_radius) as u64;
            let mut block_rng = StdRng::seed_from_u64(seed.wrapping_add(index));

            let variation = select_variation(&mut block_rng);
            let block_width = BLOCK_SIZE * variation.width;
            let block_depth = BLOCK_SIZE * variation.depth;

            let jitter = Vec3::new(
                (block_rng.random::<f32>() - 0.5) * 2.0 * params.block_jitter,
                0.0,
                (block_rng.random::<f32>() - 0.5) * 2.0 * params.block_jitter,
            );

            let block_entity = commands
                .spawn((
                    CityBlock { coord: IVec2::new(x, z) },
                    Transform::from_translation(
                        Vec3::new(x as f32 * pitch, 0.0, z as f32 * pitch) + jitter,
                    ),
                    Visibility::Visible,
                ))
                .id();

            // sidewalk slab, sunk so tower bases sit proud of it
            let sidewalk = commands
                .spawn((
                    Mesh3d(meshes.add(Cuboid::new(
                        block_width + 2.0 * SIDEWALK_WIDTH,
                        1.0,
                        block_depth + 2.0 * SIDEWALK_WIDTH,
                    ))),
                    MeshMaterial3d(shared.sidewalk_material(materials)),
                    Transform::from_translation(Vec3::new(0.0, -0.5, 0.0)),
                    Visibility::Visible,
                ))
                .id();

            // the tower must fit the lot interior
            let constraints = BuildingConstraints {
                max_width: block_width - 2.0 * (BUILDING_MARGIN + SIDEWALK_WIDTH),
                max_depth: block_depth - 2.0 * (BUILDING_MARGIN + SIDEWALK_WIDTH),
                max_height: BUILDING_MAX_HEIGHT,
            };

            let outcome = sampler::sample_constrained(&mut block_rng, Some(&constraints));
            if outcome.relaxed {
                warn!(
                    "block ({}, {}): lot too tight for the standard room minimum, relaxed",
                    x, z
                );
            }

            let building = assembler::spawn_building(
                commands,
                meshes,
                materials,
                shared,
                &outcome.plan,
                building_id,
                params.vacancy_chance,
                &mut block_rng,
            );
            building_id += 1;

            // volume is centered on its origin; lift it onto the ground
            commands
                .entity(building)
                .insert(Transform::from_translation(Vec3::Y * (outcome.plan.height() / 2.0)));

            commands.entity(block_entity).add_children(&[sidewalk, building]);
            commands.entity(root).add_children(&[block_entity]);
        }
    }

    info!("generated city: {} blocks from seed {}", side * side, seed);
    root
}
