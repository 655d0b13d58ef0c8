//! Static colour table for status classes, result panels and banners.

use eframe::egui;
use shared::domain::{DisplayState, StatusClass};

use crate::controller::forms::BannerSeverity;

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(79, 70, 229);

pub fn status_color(class: StatusClass) -> egui::Color32 {
    match class {
        StatusClass::Green => egui::Color32::from_rgb(16, 185, 129),
        StatusClass::Yellow => egui::Color32::from_rgb(245, 158, 11),
        StatusClass::Red => egui::Color32::from_rgb(239, 68, 68),
        StatusClass::Purple => egui::Color32::from_rgb(139, 92, 246),
    }
}

pub fn panel_fill(state: DisplayState) -> egui::Color32 {
    status_color(state.status_class()).gamma_multiply(0.15)
}

pub fn banner_colors(severity: BannerSeverity) -> (egui::Color32, egui::Stroke) {
    match severity {
        BannerSeverity::Error => (
            egui::Color32::from_rgb(111, 53, 53),
            egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
        ),
        BannerSeverity::Info => (
            egui::Color32::from_rgb(36, 84, 70),
            egui::Stroke::new(1.0, egui::Color32::from_rgb(82, 156, 126)),
        ),
    }
}

pub fn console_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::light();
    visuals.hyperlink_color = ACCENT;
    visuals.selection.bg_fill = ACCENT;
    visuals.widgets.active.bg_fill = ACCENT;
    visuals.widgets.hovered.bg_fill = ACCENT.gamma_multiply(0.85);
    visuals
}
