//! Reusable UI components
//!
//! Stateless widgets: they draw what the view state says and report
//! interaction back through their `Response`.

use crate::cards::WordCard;
use crate::cloud::{PlacedWord, TextMeasure};
use crate::state::StatusMessage;
use crate::theme;
use eframe::egui;

/// Measures cloud words with the same fonts the cloud is painted with
pub struct EguiMeasure<'a> {
    ctx: &'a egui::Context,
}

impl<'a> EguiMeasure<'a> {
    pub fn new(ctx: &'a egui::Context) -> Self {
        Self { ctx }
    }
}

impl TextMeasure for EguiMeasure<'_> {
    fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        let galley = self.ctx.fonts(|f| {
            f.layout_no_wrap(text.to_string(), cloud_font(size), egui::Color32::WHITE)
        });
        let size = galley.size();
        (size.x, size.y)
    }
}

/// No display font is bundled, so cloud words use the proportional family
pub fn cloud_font(size: f32) -> egui::FontId {
    egui::FontId::proportional(size)
}

/// Single word card: word as title, frequency label underneath
pub fn word_card(ui: &mut egui::Ui, card: &WordCard) -> egui::Response {
    let (w, h) = theme::CARD_SIZE;
    theme::card_frame()
        .show(ui, |ui| {
            ui.set_width(w - 2.0 * theme::SPACING_LG);
            ui.set_height(h - 2.0 * theme::SPACING_LG);
            ui.vertical_centered(|ui| {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(&card.word)
                            .size(theme::FONT_HEADING)
                            .strong()
                            .color(theme::TEXT_PRIMARY),
                    )
                    .truncate(),
                );
                ui.add_space(theme::SPACING_SM);
                ui.label(
                    egui::RichText::new(&card.label)
                        .size(theme::FONT_LABEL)
                        .color(theme::TEXT_MUTED),
                );
            });
        })
        .response
}

/// Red banner for error messages
pub fn message_banner(ui: &mut egui::Ui, message: &StatusMessage) -> egui::Response {
    theme::error_frame()
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(egui_phosphor::regular::WARNING_CIRCLE)
                        .size(theme::FONT_TITLE)
                        .color(theme::STATUS_ERROR),
                );
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(&message.text)
                            .size(theme::FONT_BODY)
                            .color(theme::TEXT_SECONDARY),
                    )
                    .wrap(),
                );
            });
        })
        .response
}

/// Placeholder shown when a request produced nothing to display
pub fn empty_state(ui: &mut egui::Ui) -> egui::Response {
    theme::section_frame()
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(egui_phosphor::regular::CLOUD_SLASH)
                        .size(40.0)
                        .color(theme::TEXT_DIM),
                );
                ui.add_space(theme::SPACING_MD);
                ui.label(
                    egui::RichText::new("No results to display")
                        .size(theme::FONT_HEADING)
                        .color(theme::TEXT_SECONDARY),
                );
                ui.label(
                    egui::RichText::new("Check the category name and try again.")
                        .size(theme::FONT_LABEL)
                        .color(theme::TEXT_MUTED),
                );
            });
        })
        .response
}

/// Spinner with a caption
pub fn loading_indicator(ui: &mut egui::Ui, caption: &str) {
    ui.horizontal(|ui| {
        ui.add(egui::Spinner::new().size(18.0).color(theme::ACCENT));
        ui.label(
            egui::RichText::new(caption)
                .size(theme::FONT_BODY)
                .color(theme::TEXT_MUTED),
        );
    });
}

/// Paint a finished cloud layout centered in a `width` x `height` canvas.
/// Hovering a word shows `word: frequency`.
pub fn word_cloud(
    ui: &mut egui::Ui,
    words: &[PlacedWord],
    width: f32,
    height: f32,
) -> egui::Response {
    let (mut response, painter) =
        ui.allocate_painter(egui::vec2(width, height), egui::Sense::hover());
    let center = response.rect.center();

    for (i, word) in words.iter().enumerate() {
        let color = theme::cloud_color(i);
        let galley = painter.layout_no_wrap(word.text.clone(), cloud_font(word.size), color);
        let angle = word.rotate.to_radians();
        // TextShape rotates around its top-left corner; offset so the
        // rotated galley is centered on the placed point
        let half = galley.size() / 2.0;
        let rot = egui::emath::Rot2::from_angle(angle);
        let pos = center + egui::vec2(word.x, word.y) - rot * half;
        painter.add(egui::epaint::TextShape::new(pos, galley, color).with_angle(angle));
    }

    if let Some(pointer) = response.hover_pos() {
        let rel = pointer - center;
        if let Some(word) = words.iter().find(|w| w.contains(rel.x, rel.y)) {
            response = response.on_hover_text_at_pointer(word.tooltip());
        }
    }
    response
}
