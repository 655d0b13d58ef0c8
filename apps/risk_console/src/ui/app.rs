use arboard::Clipboard;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{AssetKind, DisplayState};

use crate::backend_bridge::commands::BackendCommand;
use crate::config::StartupConfig;
use crate::controller::{
    assets::ModalBody,
    events::{UiError, UiErrorContext, UiEvent},
    forms::{AnalyzePhase, FormOrchestrator},
    history::excerpt,
};
use crate::ui::theme;

pub struct RiskConsoleApp {
    orchestrator: FormOrchestrator,
    ui_rx: Receiver<UiEvent>,
    config: StartupConfig,
    image_texture: Option<(u64, egui::TextureHandle)>,
}

impl RiskConsoleApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        config: StartupConfig,
    ) -> Self {
        Self {
            orchestrator: FormOrchestrator::new(cmd_tx),
            ui_rx,
            config,
            image_texture: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.orchestrator.apply_event(event);
        }
    }

    fn note(&mut self, message: impl Into<String>) {
        self.orchestrator.apply_event(UiEvent::Info(message.into()));
    }

    fn report_clipboard(&mut self, what: &str, result: Result<(), String>) {
        match result {
            Ok(()) => self.note(format!("Copied {what} to clipboard")),
            Err(err) => self
                .orchestrator
                .apply_event(UiEvent::Error(UiError::from_message(
                    UiErrorContext::General,
                    format!("Could not copy {what}: {err}"),
                ))),
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.orchestrator.banner().cloned() else {
            return;
        };
        let (fill, stroke) = theme::banner_colors(banner.severity);
        egui::Frame::NONE
            .fill(fill)
            .stroke(stroke)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.orchestrator.dismiss_banner();
                        }
                    });
                });
            });
        ui.add_space(8.0);
    }

    fn show_analyze_form(&mut self, ui: &mut egui::Ui) {
        ui.heading("Analyze a message");
        ui.add(
            egui::TextEdit::multiline(&mut self.orchestrator.analyze.message)
                .hint_text("Type or paste the message to classify")
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );
        let button = self.orchestrator.analyze.button();
        ui.horizontal(|ui| {
            if ui
                .add_enabled(button.enabled, egui::Button::new(button.label))
                .clicked()
            {
                self.orchestrator.submit_analysis();
            }
            let phase = self.orchestrator.analyze_phase();
            if phase == AnalyzePhase::Submitting {
                ui.spinner();
            }
            if let Some(hint) = phase.hint() {
                if phase == AnalyzePhase::Error {
                    ui.colored_label(ui.visuals().error_fg_color, hint);
                } else {
                    ui.weak(hint);
                }
            }
        });
    }

    fn show_results(&mut self, ui: &mut egui::Ui) {
        if !self.orchestrator.presenter.region_visible() {
            return;
        }
        let scroll = self.orchestrator.presenter.take_scroll_request();
        let panels: Vec<DisplayState> = self.orchestrator.presenter.visible_panels().collect();

        ui.add_space(12.0);
        if let Some(result) = self.orchestrator.analyze.displayed() {
            ui.weak(format!("Analyzed: {}", excerpt(&result.message)));
        }
        for state in panels {
            let accent = theme::status_color(state.status_class());
            let control = self.orchestrator.presenter.save_control(state);
            let response = egui::Frame::NONE
                .fill(theme::panel_fill(state))
                .stroke(egui::Stroke::new(1.5, accent))
                .corner_radius(12.0)
                .inner_margin(egui::Margin::symmetric(14, 12))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(egui::RichText::new(state.panel_title()).strong().size(18.0).color(accent));
                    ui.label(state.panel_body());
                    ui.add_space(6.0);
                    if ui
                        .add_enabled(control.enabled(), egui::Button::new(control.label()))
                        .clicked()
                    {
                        self.orchestrator.save_result(state);
                    }
                })
                .response;
            if scroll {
                response.scroll_to_me(Some(egui::Align::TOP));
            }
        }
    }

    fn show_history(&mut self, ui: &mut egui::Ui) {
        ui.heading(format!("History ({})", self.orchestrator.history.len()));
        if self.orchestrator.history.is_empty() {
            ui.weak("No history yet");
            return;
        }
        let now = chrono::Local::now();
        for entry in self.orchestrator.history.entries() {
            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                ui.painter()
                    .circle_filled(rect.center(), 5.0, theme::status_color(entry.status_class));
                ui.label(egui::RichText::new(entry.status_label).strong());
                ui.label(entry.message_excerpt.as_str());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(entry.time_label(now));
                });
            });
        }
    }

    fn show_feedback_form(&mut self, ui: &mut egui::Ui) {
        ui.heading("Feedback");
        let form = &mut self.orchestrator.feedback;
        ui.horizontal(|ui| {
            ui.label("Rating");
            ui.add(
                egui::TextEdit::singleline(&mut form.rating)
                    .hint_text("1-5")
                    .desired_width(48.0),
            );
        });
        ui.add(
            egui::TextEdit::multiline(&mut form.comments)
                .hint_text("Comments (optional)")
                .desired_rows(2)
                .desired_width(f32::INFINITY),
        );
        let button = form.button();
        let failure = form.status().failure_message().map(str::to_string);
        if ui
            .add_enabled(button.enabled, egui::Button::new(button.label))
            .clicked()
        {
            self.orchestrator.submit_feedback();
        }
        show_failure_hint(ui, failure);
    }

    fn show_label_form(&mut self, ui: &mut egui::Ui) {
        ui.heading("Correct a classification");
        let form = &mut self.orchestrator.label;
        ui.add(
            egui::TextEdit::multiline(&mut form.message)
                .hint_text("Message text")
                .desired_rows(2)
                .desired_width(f32::INFINITY),
        );
        egui::ComboBox::from_id_salt("label_choice")
            .selected_text(form.label.as_deref().unwrap_or("Select a label"))
            .show_ui(ui, |ui| {
                for option in &self.config.label_options {
                    ui.selectable_value(&mut form.label, Some(option.clone()), option.as_str());
                }
            });
        let button = form.button();
        let failure = form.status().failure_message().map(str::to_string);
        if ui
            .add_enabled(button.enabled, egui::Button::new(button.label))
            .clicked()
        {
            self.orchestrator.submit_label();
        }
        show_failure_hint(ui, failure);
    }

    fn show_asset_buttons(&mut self, ui: &mut egui::Ui) {
        ui.heading("Diagnostics");
        let mut clicked: Option<(AssetKind, String)> = None;
        for (kind, title, names) in [
            (AssetKind::Image, "Visualizations", &self.config.visualizations),
            (AssetKind::Log, "Logs", &self.config.log_sources),
        ] {
            ui.horizontal_wrapped(|ui| {
                ui.label(title);
                for name in names {
                    let loading = match kind {
                        AssetKind::Image => self.orchestrator.assets.image.is_loading(name),
                        AssetKind::Log => self.orchestrator.assets.log.is_loading(name),
                    };
                    if ui
                        .add_enabled(!loading, egui::Button::new(name.as_str()))
                        .clicked()
                    {
                        clicked = Some((kind, name.clone()));
                    }
                }
            });
        }
        if let Some((kind, name)) = clicked {
            self.orchestrator.open_asset(kind, &name);
        }
    }

    fn sync_image_texture(&mut self, ctx: &egui::Context) {
        let modal = &self.orchestrator.assets.image;
        let Some(ModalBody::Ready(image)) = modal.body() else {
            self.image_texture = None;
            return;
        };
        if matches!(&self.image_texture, Some((generation, _)) if *generation == modal.generation())
        {
            return;
        }
        let color_image = egui::ColorImage::from_rgba_unmultiplied(image.size, &image.rgba);
        let texture = ctx.load_texture(
            format!("visualization:{}", image.name),
            color_image,
            egui::TextureOptions::LINEAR,
        );
        self.image_texture = Some((modal.generation(), texture));
    }

    fn render_image_modal(&mut self, ctx: &egui::Context) {
        if !self.orchestrator.assets.image.is_open() {
            return;
        }
        self.sync_image_texture(ctx);

        let modal = &self.orchestrator.assets.image;
        let title = format!("Visualization: {}", modal.shown_name().unwrap_or_default());
        let mut keep_open = true;
        let mut close_clicked = false;
        let mut copy_uri: Option<String> = None;
        egui::Window::new(title)
            .id(egui::Id::new("image_modal"))
            .open(&mut keep_open)
            .resizable(true)
            .collapsible(false)
            .show(ctx, |ui| {
                match modal.body() {
                    Some(ModalBody::Ready(image)) => match &self.image_texture {
                        Some((_, texture)) => {
                            let size = fit_within(texture.size_vec2(), ui.available_size());
                            ui.add(egui::Image::new(texture).fit_to_exact_size(size))
                                .on_hover_text(image.alt_text.as_str());
                            if ui.button("Copy data URI").clicked() {
                                copy_uri = Some(image.data_uri.clone());
                            }
                        }
                        None => {
                            ui.label("Preview not available.");
                        }
                    },
                    Some(ModalBody::Failed(message)) => {
                        ui.colored_label(ui.visuals().error_fg_color, message.as_str());
                    }
                    None => {
                        ui.spinner();
                    }
                }
                ui.separator();
                close_clicked = ui.button("Close").clicked();
            });

        if let Some(uri) = copy_uri {
            let result = write_clipboard_text(uri);
            self.report_clipboard("data URI", result);
        }
        if !keep_open || close_clicked || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.orchestrator.assets.close_image();
        }
    }

    fn render_log_modal(&mut self, ctx: &egui::Context) {
        let modal = &self.orchestrator.assets.log;
        if !modal.is_open() {
            return;
        }
        let title = format!("Log: {}", modal.shown_name().unwrap_or_default());
        let mut keep_open = true;
        let mut close_clicked = false;
        let mut copy_text: Option<String> = None;
        egui::Window::new(title)
            .id(egui::Id::new("log_modal"))
            .open(&mut keep_open)
            .resizable(true)
            .collapsible(false)
            .default_width(640.0)
            .show(ctx, |ui| {
                match modal.body() {
                    Some(ModalBody::Ready(text)) => {
                        egui::ScrollArea::vertical()
                            .max_height(420.0)
                            .auto_shrink([false, true])
                            .show(ui, |ui| {
                                ui.add(
                                    egui::Label::new(egui::RichText::new(text).monospace())
                                        .selectable(true),
                                );
                            });
                        if ui.button("Copy").clicked() {
                            copy_text = Some(text.clone());
                        }
                    }
                    Some(ModalBody::Failed(message)) => {
                        ui.colored_label(ui.visuals().error_fg_color, message.as_str());
                    }
                    None => {
                        ui.spinner();
                    }
                }
                ui.separator();
                close_clicked = ui.button("Close").clicked();
            });

        if let Some(text) = copy_text {
            let result = write_clipboard_text(text);
            self.report_clipboard("log", result);
        }
        if !keep_open || close_clicked || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.orchestrator.assets.close_log();
        }
    }
}

impl eframe::App for RiskConsoleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_line").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.weak(self.orchestrator.status_line());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(self.config.backend_url.as_str());
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.show_status_banner(ui);
                    self.show_analyze_form(ui);
                    self.show_results(ui);
                    ui.separator();
                    self.show_history(ui);
                    ui.separator();
                    self.show_feedback_form(ui);
                    ui.separator();
                    self.show_label_form(ui);
                    ui.separator();
                    self.show_asset_buttons(ui);
                });
        });

        self.render_image_modal(ctx);
        self.render_log_modal(ctx);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

fn show_failure_hint(ui: &mut egui::Ui, failure: Option<String>) {
    if let Some(message) = failure {
        ui.colored_label(ui.visuals().error_fg_color, format!("Not sent: {message}"));
    }
}

/// Scales `size` down to fit inside `max`, never up.
fn fit_within(size: egui::Vec2, max: egui::Vec2) -> egui::Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return size;
    }
    let scale = (max.x / size.x).min(max.y / size.y).min(1.0);
    size * scale.max(0.0)
}

fn write_clipboard_text(text: String) -> Result<(), String> {
    let mut clipboard = Clipboard::new().map_err(|err| err.to_string())?;
    clipboard.set_text(text).map_err(|err| err.to_string())
}
