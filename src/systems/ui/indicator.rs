use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::systems::rail::{MILESTONES, MilestonePassedEvent};

// transient banner that flashes the milestone name when the ride
// crosses one, then fades out
#[derive(Resource)]
pub struct MilestoneIndicator {
    pub name: &'static str,
    pub timer: f32,
    pub duration: f32,
}

impl Default for MilestoneIndicator {
    fn default() -> Self {
        Self {
            name: "",
            timer: 0.0,
            duration: 2.0,
        }
    }
}

pub fn update_milestone_indicator(
    mut indicator: ResMut<MilestoneIndicator>,
    mut events: EventReader<MilestonePassedEvent>,
    time: Res<Time>,
) {
    for event in events.read() {
        indicator.name = MILESTONES[event.0].name;
        indicator.timer = indicator.duration;
    }

    if indicator.timer > 0.0 {
        indicator.timer -= time.delta_secs();
        if indicator.timer < 0.0 {
            indicator.timer = 0.0;
        }
    }
}

pub fn render_milestone_indicator(
    indicator: Res<MilestoneIndicator>,
    mut contexts: EguiContexts,
) {
    if indicator.timer <= 0.0 {
        return;
    }

    if let Ok(ctx) = contexts.ctx_mut() {
        let alpha = (indicator.timer / indicator.duration).clamp(0.0, 1.0);
        let gold = egui::Color32::from_rgb(120, 96, 20);

        egui::Area::new(egui::Id::new("milestone_indicator"))
            .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 60.0))
            .show(ctx, |ui| {
                let frame = egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(
                        gold.r(),
                        gold.g(),
                        gold.b(),
                        (200.0 * alpha) as u8,
                    ))
                    .stroke(egui::Stroke::new(
                        2.0,
                        egui::Color32::from_rgba_unmultiplied(
                            255,
                            255,
                            255,
                            (200.0 * alpha) as u8,
                        ),
                    ))
                    .inner_margin(egui::Margin::symmetric(20, 10))
                    .corner_radius(egui::CornerRadius::same(8));

                frame.show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(indicator.name)
                            .size(18.0)
                            .color(egui::Color32::from_rgba_unmultiplied(
                                255,
                                255,
                                255,
                                (255.0 * alpha) as u8,
                            ))
                            .strong(),
                    );
                });
            });
    }
}
