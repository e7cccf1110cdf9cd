use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin}; // fps
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass, egui};

use crate::systems::building::{CityParams, RegenerateEvent, Seed};
use crate::systems::export::ExportEvent;
use crate::systems::rail::RideState;

pub mod hud;
pub mod indicator;

pub use indicator::{MilestoneIndicator, render_milestone_indicator, update_milestone_indicator};

#[derive(Resource)]
pub struct PanelVisible(pub bool);

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        assert!(app.is_plugin_added::<EguiPlugin>());
        app.insert_resource(PanelVisible(true))
            .insert_resource(MilestoneIndicator::default())
            .add_systems(Update, (key_input, update_milestone_indicator))
            .add_systems(
                EguiPrimaryContextPass,
                (
                    ui_main,
                    fps,
                    hud::milestone_readout,
                    hud::ring_labels,
                    render_milestone_indicator,
                ),
            );
    }
}

fn key_input(keyboard_input: Res<ButtonInput<KeyCode>>, mut panel: ResMut<PanelVisible>) {
    if keyboard_input.just_pressed(KeyCode::Tab) {
        panel.0 = !panel.0;
    }
}

fn ui_main(
    mut contexts: EguiContexts,
    current_seed: Res<Seed>,
    mut params: ResMut<CityParams>,
    mut regen_events: EventWriter<RegenerateEvent>,
    mut export_events: EventWriter<ExportEvent>,
    panel: Res<PanelVisible>,
    ride: Res<RideState>,
) {
    if !panel.0 {
        return;
    }

    if let Ok(ctx) = contexts.ctx_mut() {
        egui::SidePanel::left("config_panel")
            .default_width(220.0)
            .min_width(220.0)
            .max_width(360.0)
            .resizable(true)
            .show(ctx, |ui| {
                let mut regenerate = false;

                ui.label("Ride:");
                ui.label("W/S - Forward / Back");
                ui.label("A/D - Lean");
                ui.label("Space - Next Milestone");
                ui.label("Scroll - Scrub");
                ui.label("Tab - Toggle Panel");

                ui.separator();

                ui.horizontal(|ui| {
                    ui.label("Track position:");
                    ui.label(format!("{:.1}%", ride.wrapped() * 100.0));
                });

                ui.separator();
                ui.label("Generation Parameters:");

                // seed
                egui::CollapsingHeader::new("Seed")
                    .default_open(true)
                    .show(ui, |ui| {
                        ui.label(format!("Current: {}", current_seed.0));

                        if ui.button("Regenerate").clicked() {
                            let new_seed = rand::random();
                            regen_events.write(RegenerateEvent { seed: new_seed });
                        }
                    });

                // city parameters
                egui::CollapsingHeader::new("City Layout")
                    .default_open(true)
                    .show(ui, |ui| {
                        regenerate |= ui
                            .add(egui::Slider::new(&mut params.grid_radius, 2..=8)
                                .text("Grid Radius"))
                            .on_hover_text("Blocks on each side of the center. Regenerates the city.")
                            .changed();
                        regenerate |= ui
                            .add(egui::Slider::new(&mut params.road_width, 10.0..=40.0)
                                .text("Road Width (m)")
                                .suffix(" m"))
                            .on_hover_text("Gap between adjacent blocks.")
                            .changed();
                        regenerate |= ui
                            .add(egui::Slider::new(&mut params.block_jitter, 0.0..=12.0)
                                .text("Block Jitter (m)")
                                .suffix(" m"))
                            .on_hover_text("Random offset per block, breaks up the perfect grid.")
                            .changed();
                    });

                // lighting parameters
                egui::CollapsingHeader::new("Window Lighting")
                    .default_open(true)
                    .show(ui, |ui| {
                        regenerate |= ui
                            .add(egui::Slider::new(&mut params.vacancy_chance, 0.0..=0.5)
                                .text("Vacancy Chance"))
                            .on_hover_text("Chance that any window is dark regardless of the building's policy.")
                            .changed();
                    });

                ui.separator();

                // export section
                ui.horizontal(|ui| {
                    if ui
                        .button("Export OBJ")
                        .on_hover_text("Export the scene as an OBJ file, current directory")
                        .clicked()
                    {
                        let timestamp = std::time::SystemTime::now()
                            .duration_since(std::time::UNIX_EPOCH)
                            .map(|d| d.as_secs())
                            .unwrap_or(0);
                        let filename = format!("city_export_{}.obj", timestamp);
                        export_events.write(ExportEvent { filename });
                    }
                });

                ui.separator();
                ui.label("ESC - Exit");

                // trigger regeneration on any parameter change
                if regenerate {
                    regen_events.write(RegenerateEvent { seed: current_seed.0 });
                }
            });
    }
}

fn fps(mut contexts: EguiContexts, diagnostics: Res<DiagnosticsStore>) {
    if let Ok(ctx) = contexts.ctx_mut() {
        egui::Area::new(egui::Id::new("fps_counter"))
            .anchor(egui::Align2::RIGHT_TOP, egui::Vec2::new(-10.0, 10.0))
            .show(ctx, |ui| {
                ui.with_layout(egui::Layout::top_down(egui::Align::RIGHT), |ui| {
                    if let Some(fps_diagnostic) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
                        if let Some(fps) = fps_diagnostic.smoothed() {
                            ui.label(
                                egui::RichText::new(format!("{:.0}", fps))
                                    .size(26.0)
                                    .color(egui::Color32::WHITE),
                            );
                        }
                    }
                });
            });
    }
}
