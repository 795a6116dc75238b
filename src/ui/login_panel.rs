//! Login, registration and password reset screen.

use eframe::egui::{self, RichText, Ui};

use super::app::{App, LoginTab};

/// Show the login screen.
pub fn show(app: &mut App, ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(RichText::new("Minigame Hub").size(32.0).strong());
        ui.add_space(5.0);
        ui.label(RichText::new("Sign in to play").size(14.0).weak());
        ui.add_space(25.0);

        ui.horizontal(|ui| {
            let width = 300.0;
            ui.add_space(((ui.available_width() - width) / 2.0).max(0.0));
            ui.selectable_value(&mut app.login_form.tab, LoginTab::Login, "Login");
            ui.selectable_value(&mut app.login_form.tab, LoginTab::Register, "Register");
            ui.selectable_value(&mut app.login_form.tab, LoginTab::Reset, "Reset password");
        });
        ui.add_space(15.0);

        match app.login_form.tab {
            LoginTab::Login => login_form(app, ui),
            LoginTab::Register => register_form(app, ui),
            LoginTab::Reset => reset_form(app, ui),
        }
    });
}

fn login_form(app: &mut App, ui: &mut Ui) {
    let form = &mut app.login_form;

    egui::Grid::new("login_grid")
        .num_columns(2)
        .spacing([20.0, 8.0])
        .show(ui, |ui| {
            ui.label("Account:");
            ui.text_edit_singleline(&mut form.account);
            ui.end_row();

            ui.label("Password:");
            ui.add(egui::TextEdit::singleline(&mut form.password).password(true));
            ui.end_row();
        });

    ui.add_space(8.0);
    ui.checkbox(&mut form.remember, "Remember me");
    ui.add_space(12.0);

    let submit = ui.button(RichText::new("Log in").size(16.0)).clicked()
        || ui.input(|i| i.key_pressed(egui::Key::Enter));
    if submit {
        app.login();
    }
}

fn register_form(app: &mut App, ui: &mut Ui) {
    let form = &mut app.login_form.register;

    egui::Grid::new("register_grid")
        .num_columns(2)
        .spacing([20.0, 8.0])
        .show(ui, |ui| {
            ui.label("Name:");
            ui.add(egui::TextEdit::singleline(&mut form.name).hint_text("Defaults to account"));
            ui.end_row();

            ui.label("Account:");
            ui.text_edit_singleline(&mut form.account);
            ui.end_row();

            ui.label("Password:");
            ui.add(egui::TextEdit::singleline(&mut form.password).password(true));
            ui.end_row();

            ui.label("Confirm:");
            ui.add(egui::TextEdit::singleline(&mut form.confirm).password(true));
            ui.end_row();
        });

    ui.add_space(12.0);
    if ui.button(RichText::new("Create account").size(16.0)).clicked() {
        app.register();
    }
}

fn reset_form(app: &mut App, ui: &mut Ui) {
    let form = &mut app.login_form.reset;

    egui::Grid::new("reset_grid")
        .num_columns(2)
        .spacing([20.0, 8.0])
        .show(ui, |ui| {
            ui.label("Account:");
            ui.text_edit_singleline(&mut form.account);
            ui.end_row();

            ui.label("New password:");
            ui.add(egui::TextEdit::singleline(&mut form.password).password(true));
            ui.end_row();

            ui.label("Confirm:");
            ui.add(egui::TextEdit::singleline(&mut form.confirm).password(true));
            ui.end_row();
        });

    ui.add_space(12.0);
    if ui.button(RichText::new("Reset password").size(16.0)).clicked() {
        app.reset_password();
    }
}
