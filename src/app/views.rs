//! View rendering (form, status regions, results, settings)

use super::App;
use crate::constants::{APP_NAME, APP_VERSION, CLOUD_HEIGHT};
use crate::state::Phase;
use crate::theme;
use crate::ui::components;
use eframe::egui;

impl App {
    pub fn render_main(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let width = ui.available_width().min(theme::CONTENT_MAX_WIDTH);
                ui.vertical_centered(|ui| {
                    ui.set_max_width(width);
                    ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                        ui.add_space(theme::SPACING_XL);
                        self.render_header(ui);
                        ui.add_space(theme::SPACING_LG);
                        self.render_form(ui, ctx);
                        ui.add_space(theme::SPACING_LG);
                        self.render_regions(ui, ctx);
                        ui.add_space(theme::SPACING_XL);
                    });
                });
            });
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(egui_phosphor::regular::CLOUD)
                    .size(theme::FONT_TITLE + 6.0)
                    .color(theme::ACCENT),
            );
            ui.label(
                egui::RichText::new("Wikipedia Category Analysis")
                    .size(theme::FONT_TITLE)
                    .strong()
                    .color(theme::TEXT_PRIMARY),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let icon =
                    egui::RichText::new(egui_phosphor::regular::GEAR).size(theme::FONT_HEADING);
                let gear = ui
                    .add(egui::Button::new(icon).frame(false))
                    .on_hover_text("Settings");
                if gear.clicked() {
                    self.show_settings = !self.show_settings;
                    self.server_url_input = self.server_url.clone();
                }
            });
        });
    }

    fn render_form(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let submitted = ui
            .horizontal(|ui| {
                let button_width = 110.0;
                let text_width =
                    (ui.available_width() - button_width - theme::SPACING_MD - 14.0).max(80.0);
                let te = theme::input_frame()
                    .show(ui, |ui| {
                        ui.add(
                            egui::TextEdit::singleline(&mut self.category_input)
                                .frame(false)
                                .hint_text("Enter a Wikipedia category, e.g. Birds of Europe")
                                .desired_width(text_width)
                                .font(egui::FontId::proportional(theme::FONT_BODY)),
                        )
                    })
                    .inner;
                if self.focus_input {
                    te.request_focus();
                    self.focus_input = false;
                }
                let enter = te.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                let button = ui.add_sized(
                    [button_width, theme::BUTTON_HEIGHT],
                    theme::button_accent(format!(
                        "{}  Analyze",
                        egui_phosphor::regular::MAGNIFYING_GLASS
                    )),
                );
                enter || button.clicked()
            })
            .inner;

        if submitted {
            self.submit(ctx);
        }
    }

    fn render_regions(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let regions = self.view.regions();

        if regions.loading {
            let caption = match self.view.category() {
                Some(category) => format!("Analyzing '{}'...", category),
                None => "Analyzing...".to_string(),
            };
            components::loading_indicator(ui, &caption);
            ui.add_space(theme::SPACING_MD);
        }

        if regions.message {
            if let Some(message) = self.view.message().cloned() {
                let banner = components::message_banner(ui, &message);
                if self.view.take_scroll_request() {
                    banner.scroll_to_me(Some(egui::Align::Center));
                }
                ui.add_space(theme::SPACING_MD);
            }
        }

        if regions.empty_state {
            components::empty_state(ui);
        }

        if regions.results {
            self.render_results(ui, ctx);
        }
    }

    fn render_results(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        debug_assert_eq!(self.view.phase(), Phase::Results);

        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new("Top words")
                    .size(theme::FONT_HEADING)
                    .color(theme::ACCENT),
            );
            if let Some(message) = self.view.message() {
                ui.label(
                    egui::RichText::new(&message.text)
                        .size(theme::FONT_LABEL)
                        .color(theme::TEXT_MUTED),
                );
            }
        });
        ui.add_space(theme::SPACING_SM);

        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = egui::vec2(theme::SPACING_MD, theme::SPACING_MD);
            for card in self.view.cards() {
                components::word_card(ui, card);
            }
        });

        ui.add_space(theme::SPACING_XL);
        ui.label(
            egui::RichText::new(format!("Word cloud ({} words)", self.view.words().len()))
                .size(theme::FONT_HEADING)
                .color(theme::ACCENT),
        );
        ui.add_space(theme::SPACING_SM);

        theme::section_frame().show(ui, |ui| {
            // Layout and painting both use the width inside the frame
            let width = ui.available_width();
            self.ensure_cloud(ctx, width);

            let canvas_width = self.view.cloud_width().unwrap_or(width);
            if self.view.cloud_pending() && self.view.cloud().is_empty() {
                ui.allocate_ui(egui::vec2(canvas_width, CLOUD_HEIGHT), |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.add(egui::Spinner::new().size(24.0).color(theme::ACCENT));
                    });
                });
            } else {
                components::word_cloud(ui, self.view.cloud(), canvas_width, CLOUD_HEIGHT);
            }
        });
    }

    pub fn render_settings_window(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }
        let mut open = true;
        egui::Window::new("Settings")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .default_width(theme::SETTINGS_PANEL_WIDTH)
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-theme::SPACING_XL, 48.0))
            .show(ctx, |ui| {
                ui.add(egui::Label::new(
                    egui::RichText::new("Analysis Server")
                        .size(theme::FONT_LABEL)
                        .color(theme::ACCENT),
                ));
                ui.add_space(2.0);

                let apply = ui
                    .horizontal(|ui| {
                        let te = theme::input_frame()
                            .show(ui, |ui| {
                                ui.add(
                                    egui::TextEdit::singleline(&mut self.server_url_input)
                                        .frame(false)
                                        .desired_width(theme::SETTINGS_PANEL_WIDTH - 90.0)
                                        .font(egui::FontId::proportional(theme::FONT_LABEL)),
                                )
                            })
                            .inner;
                        let clicked = ui.add(theme::button("Apply")).clicked();
                        let entered =
                            te.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                        clicked || entered
                    })
                    .inner;
                if apply {
                    self.apply_server_url();
                }

                if let Err(reason) = &self.client {
                    ui.add_space(theme::SPACING_SM);
                    ui.label(
                        egui::RichText::new(reason)
                            .size(theme::FONT_SMALL)
                            .color(theme::STATUS_ERROR),
                    );
                } else if self.server_url_overridden {
                    ui.add_space(theme::SPACING_SM);
                    ui.label(
                        egui::RichText::new("Set from command line or environment; not saved")
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_DIM),
                    );
                }

                ui.add_space(theme::SPACING_MD);
                ui.separator();
                ui.label(
                    egui::RichText::new(format!("{} v{}", APP_NAME, APP_VERSION))
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                );
            });
        if !open {
            self.show_settings = false;
        }
    }
}
