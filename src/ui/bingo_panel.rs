//! Bingo generator panel.

use eframe::egui::{self, RichText, Ui};

use super::app::App;
use super::components::{back_button, input_editor, panel_header};
use crate::modes::GameMode;
use crate::modes::bingo::{self, MAX_SIZE, MIN_SIZE};

/// Show the bingo panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, GameMode::Bingo.title());

    {
        let editor = app.editor(GameMode::Bingo);
        if editor.amount == 0 {
            editor.amount = 5;
        }
    }
    input_editor(
        app,
        ui,
        GameMode::Bingo,
        "One item per line",
        MIN_SIZE as i32..=MAX_SIZE as i32,
    );

    ui.add_space(10.0);
    if ui.button(RichText::new("Generate card").size(16.0)).clicked() {
        let editor = app.editor(GameMode::Bingo).clone();
        let items = bingo::parse_items(&editor.data);
        match bingo::generate(&items, editor.amount.max(0) as usize, &mut rand::thread_rng()) {
            Ok(card) => {
                app.log_info(format!("Generated a {0}x{0} bingo card", card.size));
                app.bingo_card = Some(card);
            }
            Err(e) => app.error_message = Some(e.to_string()),
        }
    }

    ui.add_space(15.0);
    if let Some(card) = &app.bingo_card {
        egui::Grid::new("bingo_card")
            .striped(true)
            .min_col_width(90.0)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for row in card.rows() {
                    for cell in row {
                        match cell {
                            Some(item) => ui.label(item),
                            None => ui.label(RichText::new("FREE").strong()),
                        };
                    }
                    ui.end_row();
                }
            });
    }

    go_back
}
