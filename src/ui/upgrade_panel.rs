//! RPG upgrade game panel.

use eframe::egui::{self, RichText, ScrollArea, Ui};

use super::app::App;
use super::components::{back_button, colors, panel_header};
use crate::modes::GameMode;
use crate::modes::upgrade::{Action, Hero};

const MAX_LOG_LINES: usize = 200;

/// Show the upgrade panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, GameMode::Upgrade.title());

    ui.horizontal(|ui| {
        if ui.button("Load").clicked() {
            app.load_game_input(GameMode::Upgrade);
        }
        let can_save = app.hero.is_some();
        if ui.add_enabled(can_save, egui::Button::new("Save")).clicked() {
            save_hero(app);
        }
        let saved = app.editor(GameMode::Upgrade).saved;
        if ui
            .add_enabled(saved, egui::Button::new(RichText::new("Clear").color(colors::WARNING)))
            .clicked()
        {
            app.clear_game_input(GameMode::Upgrade);
        }
    });
    ui.add_space(10.0);

    if app.hero.is_none() {
        ui.horizontal(|ui| {
            ui.label("Hero name:");
            ui.text_edit_singleline(&mut app.hero_name);
            if ui.button("Create hero").clicked() {
                let name = match app.hero_name.trim() {
                    "" => "Hero".to_string(),
                    name => name.to_string(),
                };
                app.hero_log.push(format!("{name} sets out on an adventure."));
                app.hero = Some(Hero::new(name));
            }
        });
        return go_back;
    }
    let Some(hero) = app.hero.as_mut() else {
        return go_back;
    };

    egui::Grid::new("hero_stats").num_columns(2).spacing([20.0, 4.0]).show(ui, |ui| {
        ui.label("Name");
        ui.label(RichText::new(&hero.name).strong());
        ui.end_row();
        ui.label("Level");
        ui.label(hero.level.to_string());
        ui.end_row();
        ui.label("Experience");
        ui.add(
            egui::ProgressBar::new(hero.exp as f32 / hero.exp_to_next() as f32)
                .desired_width(200.0)
                .text(format!("{}/{}", hero.exp, hero.exp_to_next())),
        );
        ui.end_row();
        ui.label("HP");
        ui.label(format!("{}/{}", hero.hp, hero.max_hp));
        ui.end_row();
        ui.label("Attack");
        ui.label(hero.attack.to_string());
        ui.end_row();
        ui.label("Gold");
        ui.label(hero.gold.to_string());
        ui.end_row();
    });

    ui.add_space(10.0);
    let mut action = None;
    ui.horizontal(|ui| {
        if ui.button("Train").clicked() {
            action = Some(Action::Train);
        }
        if ui.button("Fight").clicked() {
            action = Some(Action::Fight);
        }
        if ui.button("Rest").clicked() {
            action = Some(Action::Rest);
        }
    });

    if let Some(action) = action {
        let line = hero.perform(action, &mut rand::thread_rng());
        app.hero_log.push(line);
        if app.hero_log.len() > MAX_LOG_LINES {
            app.hero_log.remove(0);
        }
    }

    ui.add_space(10.0);
    ScrollArea::vertical().stick_to_bottom(true).max_height(250.0).show(ui, |ui| {
        for line in &app.hero_log {
            ui.label(line);
        }
    });

    go_back
}

/// Copy the hero into the upgrade editor and persist it.
fn save_hero(app: &mut App) {
    let Some(hero) = app.hero.clone() else {
        return;
    };

    match hero.to_data() {
        Ok(data) => {
            let editor = app.editor(GameMode::Upgrade);
            editor.data = data;
            editor.amount = hero.level as i32;
            app.save_game_input(GameMode::Upgrade);
        }
        Err(e) => app.error_message = Some(e.to_string()),
    }
}
