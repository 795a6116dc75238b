//! Flight chess simulator panel.

use eframe::egui::{RichText, ScrollArea, Ui};

use super::app::App;
use super::components::{back_button, colors, input_editor, panel_header};
use crate::modes::GameMode;
use crate::modes::fly_ludo::{self, MAX_PLAYERS, MIN_PLAYERS, TRACK_LEN};

/// Show the flight chess panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, GameMode::FlyLudo.title());

    {
        let editor = app.editor(GameMode::FlyLudo);
        if editor.amount == 0 {
            editor.amount = 2;
        }
    }
    input_editor(
        app,
        ui,
        GameMode::FlyLudo,
        "One player name per line",
        MIN_PLAYERS as i32..=MAX_PLAYERS as i32,
    );

    ui.add_space(10.0);
    if ui.button(RichText::new("Simulate race").size(16.0)).clicked() {
        let editor = app.editor(GameMode::FlyLudo).clone();
        let result = fly_ludo::parse_players(&editor.data, editor.amount.max(0) as usize)
            .and_then(|players| fly_ludo::simulate(&players, &mut rand::thread_rng()));
        match result {
            Ok(race) => {
                if let Some(winner) = race.winner {
                    app.log_info(format!("{} won the flight chess race", race.players[winner]));
                }
                app.race = Some(race);
            }
            Err(e) => app.error_message = Some(e.to_string()),
        }
    }

    ui.add_space(15.0);
    if let Some(race) = &app.race {
        match race.winner {
            Some(winner) => ui.colored_label(
                colors::SUCCESS,
                format!("{} wins after {} rolls", race.players[winner], race.turns.len()),
            ),
            None => ui.colored_label(colors::WARNING, "No winner within the turn limit"),
        };

        for (name, position) in race.players.iter().zip(&race.positions) {
            let place = match position {
                Some(p) => format!("{p}/{TRACK_LEN}"),
                None => "hangar".to_string(),
            };
            ui.label(format!("{name}: {place}"));
        }

        ui.add_space(10.0);
        ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
            for turn in &race.turns {
                ui.label(RichText::new(turn.describe(&race.players)).small());
            }
        });
    }

    go_back
}
