//! Shared UI components.

use eframe::egui::{self, Color32, Rect, Response, RichText, Sense, StrokeKind, Ui};

use super::app::{App, GameEditor};
use crate::modes::GameMode;

/// One entry of the menu grid.
pub struct MenuCard<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub icon: &'a str,
    /// Label and fill of the corner badge.
    pub badge: Option<(&'a str, Color32)>,
}

/// Render a clickable menu card. Long descriptions wrap inside the card.
pub fn menu_card(ui: &mut Ui, card: &MenuCard<'_>, size: egui::Vec2) -> Response {
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());
    let response = response.on_hover_text(card.description);
    if !ui.is_rect_visible(rect) {
        return response;
    }

    let visuals = ui.style().interact(&response);
    let text_color = visuals.text_color();
    let weak = ui.visuals().weak_text_color();
    let painter = ui.painter();
    let font = |points: f32| egui::FontId::proportional(points * size.x / 200.0);

    painter.rect(rect, 8.0, visuals.bg_fill, visuals.bg_stroke, StrokeKind::Outside);

    painter.text(
        rect.center_top() + egui::vec2(0.0, size.y * 0.22),
        egui::Align2::CENTER_CENTER,
        card.icon,
        font(34.0),
        text_color,
    );
    painter.text(
        rect.center() + egui::vec2(0.0, size.y * 0.02),
        egui::Align2::CENTER_CENTER,
        card.title,
        font(17.0),
        text_color,
    );

    let description = painter.layout(card.description.to_string(), font(12.0), weak, rect.width() - 16.0);
    let top_left = egui::pos2(rect.center().x - description.size().x / 2.0, rect.bottom() - size.y * 0.3);
    painter.galley(top_left, description, weak);

    if let Some((label, fill)) = card.badge {
        let text = painter.layout_no_wrap(label.to_string(), font(10.0), Color32::BLACK);
        let badge_size = text.size() + egui::vec2(10.0, 4.0);
        let badge = Rect::from_min_size(
            rect.right_top() + egui::vec2(-badge_size.x - 6.0, 6.0),
            badge_size,
        );
        painter.rect_filled(badge, 4.0, fill);
        painter.galley(badge.min + egui::vec2(5.0, 2.0), text, Color32::BLACK);
    }

    response
}

/// Badge for a mode card: whether the user has saved input for it.
///
/// `None` until the mode's input has been looked up.
pub fn saved_badge(saved: Option<bool>) -> Option<(&'static str, Color32)> {
    match saved? {
        true => Some(("Saved", colors::SUCCESS)),
        false => Some(("Empty", colors::NEUTRAL)),
    }
}

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const WARNING: Color32 = Color32::from_rgb(255, 200, 100);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
}

/// Render a back button that returns true when clicked.
pub fn back_button(ui: &mut Ui) -> bool {
    ui.button(RichText::new("< Back to Menu").size(14.0)).clicked()
}

/// Render a panel header with title.
pub fn panel_header(ui: &mut Ui, title: &str) {
    ui.heading(RichText::new(title).size(24.0));
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(20.0);
}

/// Render the saved-input editor of a mode with Load / Save / Clear.
///
/// `hint` is shown in the empty text area.
pub fn input_editor(app: &mut App, ui: &mut Ui, mode: GameMode, hint: &str, amount_range: std::ops::RangeInclusive<i32>) {
    let GameEditor { data, amount, saved } = app.editor(mode);
    let saved = *saved;

    ui.horizontal(|ui| {
        ui.label(format!("{}:", mode.amount_label()));
        ui.add(egui::DragValue::new(amount).range(amount_range));
        ui.add_space(10.0);
        if saved {
            ui.colored_label(colors::SUCCESS, "Saved");
        } else {
            ui.colored_label(colors::NEUTRAL, "Not saved");
        }
    });
    ui.add_space(5.0);
    ui.add(
        egui::TextEdit::multiline(data)
            .desired_rows(8)
            .desired_width(f32::INFINITY)
            .hint_text(hint),
    );
    ui.add_space(5.0);

    ui.horizontal(|ui| {
        if ui.button("Load").clicked() {
            app.load_game_input(mode);
        }
        if ui.button("Save").clicked() {
            app.save_game_input(mode);
        }
        if ui
            .add_enabled(saved, egui::Button::new(RichText::new("Clear").color(colors::WARNING)))
            .clicked()
        {
            app.clear_game_input(mode);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_badge() {
        assert_eq!(saved_badge(None), None);
        assert_eq!(saved_badge(Some(true)), Some(("Saved", colors::SUCCESS)));
        assert_eq!(saved_badge(Some(false)), Some(("Empty", colors::NEUTRAL)));
    }
}
