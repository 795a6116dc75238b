//! Activity history: behavior, insert and delete logs of the current user.

use chrono::NaiveDateTime;
use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::ARROWS_CLOCKWISE;

use super::app::App;
use super::components::{back_button, panel_header};

fn log_table(ui: &mut Ui, id: &str, title: &str, rows: &[(NaiveDateTime, &str)]) {
    ui.label(RichText::new(title).strong());
    ui.add_space(5.0);

    if rows.is_empty() {
        ui.label(RichText::new("Nothing recorded").weak());
        return;
    }

    egui::Grid::new(id).striped(true).num_columns(2).show(ui, |ui| {
        for (timestamp, text) in rows {
            ui.label(RichText::new(timestamp.format("%Y-%m-%d %H:%M:%S").to_string()).weak());
            ui.label(*text);
            ui.end_row();
        }
    });
}

/// Show the activity panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, "Activity");

    if ui.button(format!("{ARROWS_CLOCKWISE} Refresh")).clicked() {
        app.load_activity();
    }
    ui.add_space(10.0);

    let behavior: Vec<_> = app
        .activity
        .behavior
        .iter()
        .map(|r| (r.timestamp, r.behavior.as_str()))
        .collect();
    let inserts: Vec<_> = app.activity.inserts.iter().map(|r| (r.timestamp, r.value.as_str())).collect();
    let deletes: Vec<_> = app.activity.deletes.iter().map(|r| (r.timestamp, r.value.as_str())).collect();

    ScrollArea::vertical().show(ui, |ui| {
        log_table(ui, "behavior_log", "Actions", &behavior);
        ui.add_space(15.0);
        log_table(ui, "insert_log", "Created", &inserts);
        ui.add_space(15.0);
        log_table(ui, "delete_log", "Removed", &deletes);
    });

    go_back
}
