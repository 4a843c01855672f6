//! The eframe application hosting the scope
//!
//! The UI thread never talks to the serial port: it reads the newest
//! [`PlotFrame`] from the bridge on every redraw and flips the pause state
//! through the [`Controllable`] capability. Repaints are scheduled on a
//! timer well below the sample period so fresh frames show up without user
//! input.

use crate::backend::{AcquisitionControls, Controllable, PresentationBridge};
use crate::config::UiConfig;
use crate::frontend::plot;
use crate::types::LinkStatus;
use egui::{Color32, RichText};
use std::sync::Arc;
use std::time::Duration;

/// Interval between scheduled repaints
const REPAINT_INTERVAL: Duration = Duration::from_millis(100);

/// Main application state for the UI thread
pub struct ScopeApp {
    bridge: Arc<PresentationBridge>,
    controls: AcquisitionControls,
    window_capacity: usize,
    ui_config: UiConfig,
}

impl ScopeApp {
    /// Create the app over an already-spawned acquisition backend
    pub fn new(
        bridge: Arc<PresentationBridge>,
        controls: AcquisitionControls,
        window_capacity: usize,
        ui_config: UiConfig,
    ) -> Self {
        Self {
            bridge,
            controls,
            window_capacity,
            ui_config,
        }
    }

    fn status_label(&self, status: LinkStatus) -> (Color32, String) {
        match status {
            LinkStatus::Connecting => (Color32::YELLOW, status.to_string()),
            LinkStatus::Connected if self.controls.is_paused() => {
                (Color32::YELLOW, "Paused".to_string())
            }
            LinkStatus::Connected => (Color32::GREEN, status.to_string()),
            LinkStatus::Stopped => (Color32::GRAY, status.to_string()),
        }
    }
}

impl eframe::App for ScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let frame = self.bridge.latest();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let paused = self.controls.is_paused();
                let toggle_text = if paused { "Resume" } else { "Pause" };
                if ui.button(toggle_text).clicked() {
                    self.controls.set_paused(!paused);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let (color, text) = self.status_label(frame.status);
                    ui.colored_label(color, text);
                    ui.label(format!("latest: {:.0}", frame.latest));
                });
            });
        });

        egui::TopBottomPanel::bottom("stats").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!(
                        "reads: {}  transport errors: {}  parse errors: {}",
                        frame.stats.successful_reads,
                        frame.stats.transport_errors,
                        frame.stats.parse_errors,
                    ))
                    .small(),
                );
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::hover());
            plot::draw_signal(
                &painter,
                response.rect,
                &frame.samples,
                self.window_capacity,
                self.ui_config.grid_divisions,
            );
        });

        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}
