//! Scheduling tool panel.

use eframe::egui::{self, RichText, Ui};
use chrono::NaiveDate;
use egui_extras::DatePickerButton;

use super::app::App;
use super::components::{back_button, input_editor, panel_header};
use crate::modes::GameMode;
use crate::modes::schedule::{self, MAX_LANES, MIN_LANES};

/// Show the scheduler panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, GameMode::Schedule.title());

    {
        let editor = app.editor(GameMode::Schedule);
        if editor.amount == 0 {
            editor.amount = 2;
        }
    }
    input_editor(
        app,
        ui,
        GameMode::Schedule,
        "task name,hours",
        MIN_LANES as i32..=MAX_LANES as i32,
    );

    ui.add_space(10.0);
    ui.horizontal(|ui| {
        ui.label("Start date:");
        ui.add(DatePickerButton::new(&mut app.schedule_start).id_salt("schedule_start"));
        ui.add_space(10.0);

        if ui.button(RichText::new("Plan").size(16.0)).clicked() {
            let editor = app.editor(GameMode::Schedule).clone();
            let result = schedule::parse_tasks(&editor.data)
                .and_then(|tasks| schedule::plan(&tasks, editor.amount.max(0) as usize));
            match result {
                Ok(plan) => {
                    app.log_info(format!("Planned schedule, makespan {}h", plan.makespan));
                    app.plan = Some(plan);
                }
                Err(e) => app.error_message = Some(e.to_string()),
            }
        }
    });

    ui.add_space(15.0);
    if let Some(plan) = &app.plan {
        let finish = clock(app.schedule_start, plan.makespan, "%Y-%m-%d %H:%M");
        ui.label(
            RichText::new(format!(
                "Makespan: {}h, everything done by {}",
                plan.makespan, finish
            ))
            .strong(),
        );
        ui.add_space(8.0);

        egui::Grid::new("schedule_plan")
            .striped(true)
            .num_columns(4)
            .show(ui, |ui| {
                ui.label(RichText::new("Lane").strong());
                ui.label(RichText::new("Task").strong());
                ui.label(RichText::new("Start").strong());
                ui.label(RichText::new("End").strong());
                ui.end_row();

                for (idx, lane) in plan.lanes.iter().enumerate() {
                    for task in &lane.tasks {
                        ui.label(format!("{}", idx + 1));
                        ui.label(&task.name);
                        ui.label(clock(app.schedule_start, task.start, "%m-%d %H:%M"));
                        ui.label(clock(app.schedule_start, task.end, "%m-%d %H:%M"));
                        ui.end_row();
                    }
                }
            });
    }

    go_back
}

/// Format an hour offset, or "n/a" when it falls off the calendar.
fn clock(start: NaiveDate, hours: u32, fmt: &str) -> String {
    schedule::at(start, hours)
        .map(|t| t.format(fmt).to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_out_of_range() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(clock(day, 5, "%m-%d %H:%M"), "03-01 05:00");
        assert_eq!(clock(NaiveDate::MAX, u32::MAX, "%m-%d %H:%M"), "n/a");
    }
}
