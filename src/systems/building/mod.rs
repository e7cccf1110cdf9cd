// this is the entry point for the city generation plugin
use bevy::prelude::*;
use std::collections::HashMap;

use crate::config::*;

pub mod assembler;
pub mod city;
pub mod lighting;
pub mod sampler;

use lighting::LightLevel;

// resources
#[derive(Resource)]
pub struct Seed(pub u64);

// city layout parameters, adjustable at runtime
#[derive(Resource)]
pub struct CityParams {
    pub grid_radius: i32,
    pub road_width: f32,
    pub block_jitter: f32,
    pub vacancy_chance: f32,
}

impl Default for CityParams {
    fn default() -> Self {
        Self {
            grid_radius: GRID_RADIUS,
            road_width: ROAD_WIDTH,
            block_jitter: BLOCK_JITTER,
            vacancy_chance: VACANCY_CHANCE,
        }
    }
}

// Event for regeneration
#[derive(Event)]
pub struct RegenerateEvent {
    pub seed: u64,
}

/// Material/mesh templates shared across every building of every
/// generation pass. Insert-if-absent only; entries are never replaced,
/// so handles stay stable across regenerations.
#[derive(Resource, Default)]
pub struct SharedAssets {
    window_materials: HashMap<LightLevel, Handle<StandardMaterial>>,
    roof_modern: Option<Handle<StandardMaterial>>,
    roof_older: Option<Handle<StandardMaterial>>,
    sidewalk: Option<Handle<StandardMaterial>>,
}

impl SharedAssets {
    /// Palette material for one window level. Every batch of that level
    /// in the whole city shares the returned handle.
    pub fn window_material(
        &mut self,
        level: LightLevel,
        materials: &mut Assets<StandardMaterial>,
    ) -> Handle<StandardMaterial> {
        self.window_materials
            .entry(level)
            .or_insert_with(|| {
                materials.add(StandardMaterial {
                    base_color: Color::srgba(0.0, 1.0, 0.8, 0.6),
                    emissive: LinearRgba::rgb(0.0, 1.0, 0.8) * level.intensity(),
                    alpha_mode: AlphaMode::Blend,
                    double_sided: true,
                    cull_mode: None,
                    ..default()
                })
            })
            .clone()
    }

    pub fn roof_material(
        &mut self,
        modern: bool,
        materials: &mut Assets<StandardMaterial>,
    ) -> Handle<StandardMaterial> {
        let (slot, intensity) = if modern {
            (&mut self.roof_modern, ROOF_EMISSIVE_MODERN)
        } else {
            (&mut self.roof_older, ROOF_EMISSIVE_OLDER)
        };

        slot.get_or_insert_with(|| {
            materials.add(StandardMaterial {
                base_color: Color::srgb(0.0, 1.0, 0.8),
                emissive: LinearRgba::rgb(0.0, 1.0, 0.8) * intensity,
                ..default()
            })
        })
        .clone()
    }

    pub fn sidewalk_material(
        &mut self,
        materials: &mut Assets<StandardMaterial>,
    ) -> Handle<StandardMaterial> {
        self.sidewalk
            .get_or_insert_with(|| {
                materials.add(StandardMaterial {
                    base_color: Color::srgb(0.4, 0.4, 0.4),
                    perceptual_roughness: 0.95,
                    ..default()
                })
            })
            .clone()
    }
}

// main plugin for generation
pub struct CityGenerationPlugin;

impl Plugin for CityGenerationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Seed(INITIAL_SEED))
            .insert_resource(CityParams::default())
            .init_resource::<SharedAssets>()
            .add_event::<RegenerateEvent>()
            .add_event::<crate::systems::export::ExportEvent>()
            .add_systems(Startup, generate_initial_city)
            .add_systems(
                Update,
                (handle_regeneration, crate::systems::export::handle_export),
            );
    }
}

fn generate_initial_city(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut shared: ResMut<SharedAssets>,
    seed: Res<Seed>,
    params: Res<CityParams>,
) {
    city::spawn_city(
        &mut commands,
        meshes.as_mut(),
        materials.as_mut(),
        shared.as_mut(),
        seed.0,
        &params,
    );
}

pub fn handle_regeneration(
    mut commands: Commands,
    mut events: EventReader<RegenerateEvent>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut shared: ResMut<SharedAssets>,
    mut seed: ResMut<Seed>,
    params: Res<CityParams>,
    query: Query<Entity, With<city::CityRoot>>,
) {
    for event in events.read() {
        // cleanup existing city, children are handled automatically
        for entity in query.iter() {
            commands.entity(entity).try_despawn();
        }

        seed.0 = event.seed;
        city::spawn_city(
            &mut commands,
            meshes.as_mut(),
            materials.as_mut(),
            shared.as_mut(),
            event.seed,
            &params,
        );
    }
}
