use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::systems::rail::{MILESTONES, RideState};
use crate::systems::rings::RingAnchors;
use crate::systems::track;

const HUD_CYAN: egui::Color32 = egui::Color32::from_rgb(77, 255, 243);
const HUD_GOLD: egui::Color32 = egui::Color32::from_rgb(255, 215, 0);
const HUD_DIM: egui::Color32 = egui::Color32::from_rgb(60, 70, 70);

// bottom-center readout: distance to the next milestone plus a 20-step
// progress strip with the milestone positions picked out
pub fn milestone_readout(mut contexts: EguiContexts, ride: Res<RideState>) {
    let wrapped = ride.wrapped();

    let next = MILESTONES
        .iter()
        .find(|m| m.position > wrapped)
        .unwrap_or(&MILESTONES[0]);
    let distance = track::track_distance(next.position, wrapped);

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::Area::new(egui::Id::new("milestone_hud"))
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -24.0))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(format!(
                        "{:>6.2} TO [ {} ]",
                        distance * 100.0,
                        next.name
                    ))
                    .size(16.0)
                    .monospace()
                    .color(HUD_CYAN),
                );

                // arrow strip; one cell per 5% of track
                let current = (wrapped * 20.0).floor() as usize;
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = 2.0;
                    for i in 0..20 {
                        let on_milestone = MILESTONES
                            .iter()
                            .any(|m| (m.position * 20.0).round() as usize == i);
                        let color = if i == current && on_milestone {
                            egui::Color32::WHITE
                        } else if on_milestone {
                            HUD_GOLD
                        } else if i <= current {
                            HUD_CYAN
                        } else {
                            HUD_DIM
                        };
                        ui.label(egui::RichText::new("›").size(18.0).strong().color(color));
                    }
                });
            });
        });
}

// screen-anchored ring labels with connector lines, clamped to a margin
// so they never slide off screen while the ring is visible
pub fn ring_labels(mut contexts: EguiContexts, anchors: Res<RingAnchors>) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let screen = ctx.screen_rect();
    let margin = screen.width() * 0.025;

    egui::Area::new(egui::Id::new("ring_labels"))
        .fixed_pos(egui::pos2(0.0, 0.0))
        .show(ctx, |ui| {
            let painter = ui.painter();

            for (anchor, milestone) in anchors.0.iter().zip(MILESTONES.iter()) {
                if !anchor.visible {
                    continue;
                }

                let galley = painter.layout_no_wrap(
                    format!("[ {} ]", milestone.name),
                    egui::FontId::monospace(15.0),
                    HUD_GOLD,
                );
                let half = galley.size() / 2.0;

                let x = anchor
                    .label_px
                    .x
                    .clamp(margin + half.x, screen.width() - margin - half.x);
                let y = anchor
                    .label_px
                    .y
                    .clamp(margin + half.y, screen.height() - margin - half.y);

                painter.line_segment(
                    [
                        egui::pos2(anchor.ring_px.x, anchor.ring_px.y),
                        egui::pos2(x, y),
                    ],
                    egui::Stroke::new(1.5, HUD_CYAN.gamma_multiply(0.6)),
                );
                painter.galley(egui::pos2(x - half.x, y - half.y), galley, HUD_GOLD);
            }
        });
}
