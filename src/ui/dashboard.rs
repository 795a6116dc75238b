//! Main menu with mode cards and recent activity.

use chrono::NaiveDateTime;
use eframe::egui::{self, Color32, CornerRadius, Margin, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{AIRPLANE_TILT, CALENDAR, CLOCK_COUNTER_CLOCKWISE, GRID_FOUR, SWORD};

use super::app::{App, LogLevel, Screen};
use super::components::{MenuCard, menu_card, saved_badge};
use crate::modes::GameMode;

fn mode_icon(mode: GameMode) -> &'static str {
    match mode {
        GameMode::FlyLudo => AIRPLANE_TILT,
        GameMode::Bingo => GRID_FOUR,
        GameMode::Schedule => CALENDAR,
        GameMode::Upgrade => SWORD,
    }
}

/// Greeting text for the login before the current one.
fn last_login_text(previous: Option<NaiveDateTime>) -> String {
    previous
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "first visit".to_string())
}

/// Show the menu.
///
/// Returns `Some(screen)` if navigation is requested.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Screen> {
    let mut next = None;

    ui.vertical_centered(|ui| {
        ui.add_space(30.0);

        ui.label(RichText::new("Minigame Hub").size(32.0).strong());
        ui.add_space(5.0);
        if let Some(user) = &app.session {
            let last_login = last_login_text(app.previous_login);
            ui.label(RichText::new(format!("Hello {}, last login: {}", user.name, last_login)).size(14.0).weak());
        }

        ui.add_space(30.0);

        let available = ui.available_width();
        let num_cards = (GameMode::ALL.len() + 1) as f32;
        let spacing = 20.0;
        let total_spacing = spacing * (num_cards - 1.0);
        let card_width = ((available - total_spacing) / num_cards).clamp(130.0, 220.0);
        let card_size = egui::vec2(card_width, card_width * 0.75);
        let total_width = card_width * num_cards + total_spacing;
        let start_offset = ((available - total_width) / 2.0).max(0.0);

        ui.horizontal(|ui| {
            ui.add_space(start_offset);

            for mode in GameMode::ALL {
                let card = MenuCard {
                    title: mode.title(),
                    description: mode.description(),
                    icon: mode_icon(mode),
                    badge: saved_badge(app.editors.get(&mode).map(|e| e.saved)),
                };
                if menu_card(ui, &card, card_size).clicked() {
                    next = Some(Screen::Game(mode));
                }
                ui.add_space(spacing);
            }

            let activity = MenuCard {
                title: "Activity",
                description: "Your recent history",
                icon: CLOCK_COUNTER_CLOCKWISE,
                badge: None,
            };
            if menu_card(ui, &activity, card_size).clicked() {
                next = Some(Screen::Activity);
            }
        });

        ui.add_space(30.0);
    });

    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .outer_margin(Margin::symmetric(10, 0))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.label(RichText::new("Recent Activity").strong());
            ui.add_space(10.0);

            ScrollArea::vertical().max_height(180.0).show(ui, |ui| {
                if app.log_messages.is_empty() {
                    ui.label(RichText::new("No recent activity").weak());
                    return;
                }
                for entry in app.log_messages.iter().rev().take(10) {
                    let color = match entry.level {
                        LogLevel::Info => Color32::GRAY,
                        LogLevel::Success => Color32::from_rgb(100, 200, 100),
                        LogLevel::Warning => Color32::from_rgb(230, 180, 50),
                        LogLevel::Error => Color32::from_rgb(230, 100, 100),
                    };

                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(entry.timestamp.format("%H:%M:%S").to_string())
                                .small()
                                .color(Color32::DARK_GRAY),
                        );
                        ui.label(RichText::new(&entry.message).color(color));
                    });
                }
            });
        });

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_last_login_text() {
        assert_eq!(last_login_text(None), "first visit");

        let t = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap().and_hms_opt(7, 8, 9).unwrap();
        assert_eq!(last_login_text(Some(t)), "2024-05-06 07:08");
    }
}
