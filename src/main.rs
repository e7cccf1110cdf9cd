use bevy::core_pipeline::bloom::Bloom;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy::window::WindowPlugin;
use bevy_egui::EguiPlugin;

pub mod config;
pub mod systems;

#[cfg(test)]
pub mod test;

// import modules here
use systems::building::CityGenerationPlugin;
use systems::grid::GridPlugin;
use systems::rail::{RailCamera, RailCameraPlugin};
use systems::rings::RingsPlugin;
use systems::stars::StarsPlugin;
use systems::track::TrackPlugin;
use systems::ui::UIPlugin;

use crate::config::TRACK_LIFT;

fn main() -> bevy::app::AppExit {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "neon transit".to_string(),
                resolution: bevy::window::WindowResolution::new(1920.0, 1080.0),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // my custom plugins
        .add_plugins(CityGenerationPlugin)
        .add_plugins(TrackPlugin)
        .add_plugins(RailCameraPlugin)
        .add_plugins(StarsPlugin)
        .add_plugins(RingsPlugin)
        .add_plugins(GridPlugin)
        .add_plugins(UIPlugin)
        .insert_resource(ClearColor(Color::BLACK)) // night sky
        .insert_resource(AmbientLight {
            color: Color::srgb(0.07, 0.07, 0.07),
            brightness: 60.0,
            ..default()
        })
        .add_systems(Startup, start)
        .add_systems(Update, handle_exit)
        .run()
}

// application entry point here
fn start(mut commands: Commands) {
    // the rail controller moves this camera every frame; bloom picks up
    // the emissive windows, roofs and rings
    commands.spawn((
        RailCamera,
        Camera3d::default(),
        Camera { hdr: true, ..default() },
        Bloom {
            intensity: 0.25,
            ..Bloom::NATURAL
        },
        Tonemapping::TonyMcMapface,
        Transform::from_xyz(0.0, TRACK_LIFT, 0.0),
    ));

    // cool key light, the city mostly lights itself
    commands.spawn((
        DirectionalLight {
            illuminance: 400.0,
            ..default()
        },
        Transform::from_xyz(1.0, 1.0, 1.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // blue haze over the center of the city
    commands.spawn((
        PointLight {
            color: Color::srgb(0.27, 0.27, 1.0),
            intensity: 2_000_000.0,
            range: 600.0,
            ..default()
        },
        Transform::from_xyz(0.0, TRACK_LIFT, 0.0),
    ));
}

// application exit
fn handle_exit(keys: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
