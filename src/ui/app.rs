//! Main application state and async plumbing.

use std::collections::HashMap;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use eframe::egui;
use sea_orm::DatabaseConnection;
use tokio::sync::mpsc;

use crate::auth::{self, LoginOutcome};
use crate::config::AppConfig;
use crate::credentials::CredentialStore;
use crate::db::{activity, game_input};
use crate::games;
use crate::entities::{delete_log, insert_log, user_info, user_log};
use crate::models::{GameInput, RegisterForm, ResetForm};
use crate::modes::GameMode;
use crate::modes::bingo::BingoCard;
use crate::modes::fly_ludo::RaceResult;
use crate::modes::schedule::Plan;
use crate::modes::upgrade::Hero;

use super::components::colors;
use super::{activity_panel, bingo_panel, dashboard, login_panel, ludo_panel, schedule_panel, upgrade_panel};

/// Number of rows fetched per log table for the activity screen.
const ACTIVITY_LIMIT: u64 = 50;

/// Current screen being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Menu,
    Game(GameMode),
    Activity,
}

/// Tabs of the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginTab {
    #[default]
    Login,
    Register,
    Reset,
}

/// Form state for the login screen.
#[derive(Default, Clone)]
pub struct LoginForm {
    pub tab: LoginTab,
    pub account: String,
    pub password: String,
    pub remember: bool,
    pub register: RegisterForm,
    pub reset: ResetForm,
}

/// Editable copy of one mode's saved input.
#[derive(Default, Clone)]
pub struct GameEditor {
    pub data: String,
    pub amount: i32,
    /// A saved row exists for the current user.
    pub saved: bool,
}

/// Rows shown on the activity screen.
#[derive(Default, Clone)]
pub struct ActivityRecords {
    pub behavior: Vec<user_log::Model>,
    pub inserts: Vec<insert_log::Model>,
    pub deletes: Vec<delete_log::Model>,
}

/// Messages from async tasks to UI.
pub enum UiMessage {
    LoggedIn {
        outcome: LoginOutcome,
        password: String,
        remember: bool,
    },
    Registered(user_info::Model),
    PasswordReset(String),
    GameInputLoaded(GameMode, Option<GameInput>),
    GameInputSaved(GameMode),
    GameInputCleared(GameMode, bool),
    ActivityLoaded(ActivityRecords),
    Logged,
    OperationFailed(String),
}

/// Log level for UI messages.
#[derive(Clone, Copy, Debug)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Log entry for display in the UI.
#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

/// Main application state.
pub struct App {
    // Runtime and database
    pub rt: tokio::runtime::Runtime,
    pub pool: DatabaseConnection,

    // Message channel for async communication
    pub tx: mpsc::UnboundedSender<UiMessage>,
    pub rx: mpsc::UnboundedReceiver<UiMessage>,
    pending_ops: usize,

    pub config: AppConfig,
    pub credentials: CredentialStore,

    // Navigation and session
    pub screen: Screen,
    pub session: Option<user_info::Model>,
    /// Login time before the current session, `None` on a first visit.
    pub previous_login: Option<NaiveDateTime>,
    pub login_form: LoginForm,

    // Mode state
    pub editors: HashMap<GameMode, GameEditor>,
    pub bingo_card: Option<BingoCard>,
    pub race: Option<RaceResult>,
    pub plan: Option<Plan>,
    pub schedule_start: NaiveDate,
    pub hero: Option<Hero>,
    pub hero_name: String,
    pub hero_log: Vec<String>,
    pub activity: ActivityRecords,

    // Log messages
    pub log_messages: Vec<LogEntry>,

    // Dialogs
    pub error_message: Option<String>,
    pub success_message: Option<String>,
}

impl App {
    pub fn new(
        pool: DatabaseConnection,
        config: AppConfig,
        rt: tokio::runtime::Runtime,
        credentials: CredentialStore,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let prefill = credentials.prefill();
        let login_form = LoginForm {
            account: prefill.account,
            password: prefill.password,
            remember: prefill.remember,
            ..Default::default()
        };

        Self {
            rt,
            pool,
            tx,
            rx,
            pending_ops: 0,
            config,
            credentials,
            screen: Screen::default(),
            session: None,
            previous_login: None,
            login_form,
            editors: HashMap::new(),
            bingo_card: None,
            race: None,
            plan: None,
            schedule_start: Local::now().date_naive(),
            hero: None,
            hero_name: String::new(),
            hero_log: Vec::new(),
            activity: ActivityRecords::default(),
            log_messages: Vec::new(),
            error_message: None,
            success_message: None,
        }
    }

    /// Log a message to the UI log.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.log_messages.push(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            level,
        });

        // Keep only last 100 messages
        if self.log_messages.len() > 100 {
            self.log_messages.remove(0);
        }
    }

    pub fn log_info(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn log_success(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Success, message);
    }

    pub fn log_warning(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    pub fn log_error(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Logged-in user id.
    pub fn user_id(&self) -> Option<i32> {
        self.session.as_ref().map(|u| u.user_id)
    }

    /// Editor for `mode`, created empty on first use.
    pub fn editor(&mut self, mode: GameMode) -> &mut GameEditor {
        self.editors.entry(mode).or_default()
    }

    /// Run a database future on the runtime and forward its message.
    fn spawn<F>(&mut self, task: F)
    where
        F: std::future::Future<Output = UiMessage> + Send + 'static,
    {
        let tx = self.tx.clone();
        self.pending_ops += 1;
        self.rt.spawn(async move {
            let _ = tx.send(task.await);
        });
    }

    /// Check the login form credentials.
    pub fn login(&mut self) {
        let pool = self.pool.clone();
        let account = self.login_form.account.clone();
        let password = self.login_form.password.clone();
        let remember = self.login_form.remember;

        self.spawn(async move {
            match auth::login(&pool, &account, &password).await {
                Ok(outcome) => UiMessage::LoggedIn {
                    outcome,
                    password,
                    remember,
                },
                Err(e) => UiMessage::OperationFailed(e.to_string()),
            }
        });
    }

    /// Submit the registration form.
    pub fn register(&mut self) {
        let pool = self.pool.clone();
        let form = self.login_form.register.clone();

        self.spawn(async move {
            match auth::register(&pool, form).await {
                Ok(user) => UiMessage::Registered(user),
                Err(e) => UiMessage::OperationFailed(e.to_string()),
            }
        });
    }

    /// Submit the password reset form.
    pub fn reset_password(&mut self) {
        let pool = self.pool.clone();
        let form = self.login_form.reset.clone();

        self.spawn(async move {
            match auth::reset_password(&pool, form).await {
                Ok(user) => UiMessage::PasswordReset(user.account),
                Err(e) => UiMessage::OperationFailed(e.to_string()),
            }
        });
    }

    /// Drop the session and return to the login screen.
    pub fn logout(&mut self) {
        if let Some(user_id) = self.user_id() {
            self.record_behavior(user_id, "logout".to_string());
        }

        self.session = None;
        self.previous_login = None;
        self.screen = Screen::Login;
        self.editors.clear();
        self.bingo_card = None;
        self.race = None;
        self.plan = None;
        self.hero = None;
        self.hero_log.clear();

        let prefill = self.credentials.prefill();
        self.login_form = LoginForm {
            account: prefill.account,
            password: prefill.password,
            remember: prefill.remember,
            ..Default::default()
        };
    }

    fn record_behavior(&mut self, user_id: i32, behavior: String) {
        let pool = self.pool.clone();
        self.spawn(async move {
            match activity::log_behavior(&pool, user_id, &behavior).await {
                Ok(_) => UiMessage::Logged,
                Err(e) => UiMessage::OperationFailed(e.to_string()),
            }
        });
    }

    /// Log the click and open a mode screen.
    pub fn open_mode(&mut self, mode: GameMode) {
        let Some(user_id) = self.user_id() else {
            return;
        };

        let pool = self.pool.clone();
        self.spawn(async move {
            match games::open_mode(&pool, user_id, mode).await {
                Ok(()) => UiMessage::Logged,
                Err(e) => UiMessage::OperationFailed(e.to_string()),
            }
        });
        self.log_info(format!("Opened {}", mode.title()));
        self.screen = Screen::Game(mode);
        self.load_game_input(mode);
    }

    /// Log the click and open the activity screen.
    pub fn open_activity(&mut self) {
        let Some(user_id) = self.user_id() else {
            return;
        };

        self.record_behavior(user_id, "open Activity".to_string());
        self.screen = Screen::Activity;
        self.load_activity();
    }

    /// Load the current user's log tables.
    pub fn load_activity(&mut self) {
        let Some(user_id) = self.user_id() else {
            return;
        };
        let pool = self.pool.clone();

        self.spawn(async move {
            let result = async {
                Ok::<_, sea_orm::DbErr>(ActivityRecords {
                    behavior: activity::recent_behavior(&pool, user_id, ACTIVITY_LIMIT).await?,
                    inserts: activity::recent_inserts(&pool, user_id, ACTIVITY_LIMIT).await?,
                    deletes: activity::recent_deletes(&pool, user_id, ACTIVITY_LIMIT).await?,
                })
            }
            .await;

            match result {
                Ok(records) => UiMessage::ActivityLoaded(records),
                Err(e) => UiMessage::OperationFailed(e.to_string()),
            }
        });
    }

    /// Load the saved input of `mode` into its editor.
    pub fn load_game_input(&mut self, mode: GameMode) {
        let Some(user_id) = self.user_id() else {
            return;
        };
        let pool = self.pool.clone();

        self.spawn(async move {
            match game_input::load(&pool, mode, user_id).await {
                Ok(input) => UiMessage::GameInputLoaded(mode, input),
                Err(e) => UiMessage::OperationFailed(e.to_string()),
            }
        });
    }

    /// Save the editor of `mode`; first saves are recorded in the insert log.
    pub fn save_game_input(&mut self, mode: GameMode) {
        let Some(user_id) = self.user_id() else {
            return;
        };
        let editor = self.editor(mode).clone();
        let input = GameInput {
            user_id,
            data: editor.data,
            amount: editor.amount,
        };
        let pool = self.pool.clone();

        self.spawn(async move {
            match games::save_input(&pool, mode, &input).await {
                Ok(_) => UiMessage::GameInputSaved(mode),
                Err(e) => UiMessage::OperationFailed(e.to_string()),
            }
        });
    }

    /// Delete the saved input of `mode` and record it in the delete log.
    pub fn clear_game_input(&mut self, mode: GameMode) {
        let Some(user_id) = self.user_id() else {
            return;
        };
        let pool = self.pool.clone();

        self.spawn(async move {
            match games::clear_input(&pool, mode, user_id).await {
                Ok(removed) => UiMessage::GameInputCleared(mode, removed),
                Err(e) => UiMessage::OperationFailed(e.to_string()),
            }
        });
    }

    /// Poll async operation results.
    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.pending_ops = self.pending_ops.saturating_sub(1);

            match msg {
                UiMessage::LoggedIn {
                    outcome,
                    password,
                    remember,
                } => {
                    let user = outcome.user;
                    if let Err(e) = self.credentials.record_login(&user.account, &password, remember) {
                        tracing::warn!("Failed to persist login form: {}", e);
                        self.log_warning(format!("Could not save login details: {e}"));
                    }
                    self.log_success(format!("Welcome, {}", user.name));
                    self.login_form.password.clear();
                    self.session = Some(user);
                    self.previous_login = outcome.previous_login;
                    self.screen = Screen::Menu;
                }
                UiMessage::Registered(user) => {
                    self.success_message = Some(format!("Account '{}' created, you can log in now", user.account));
                    self.login_form.account = user.account;
                    self.login_form.password.clear();
                    self.login_form.register = RegisterForm::default();
                    self.login_form.tab = LoginTab::Login;
                }
                UiMessage::PasswordReset(account) => {
                    self.success_message = Some(format!("Password of '{account}' updated"));
                    self.login_form.account = account;
                    self.login_form.password.clear();
                    self.login_form.reset = ResetForm::default();
                    self.login_form.tab = LoginTab::Login;
                }
                UiMessage::GameInputLoaded(mode, input) => {
                    let editor = self.editor(mode);
                    match input {
                        Some(input) => {
                            editor.data = input.data;
                            editor.amount = input.amount;
                            editor.saved = true;
                        }
                        None => editor.saved = false,
                    }
                    if mode == GameMode::Upgrade {
                        self.restore_hero();
                    }
                }
                UiMessage::GameInputSaved(mode) => {
                    self.editor(mode).saved = true;
                    self.log_success(format!("{} input saved", mode.title()));
                }
                UiMessage::GameInputCleared(mode, removed) => {
                    *self.editor(mode) = GameEditor::default();
                    if mode == GameMode::Upgrade {
                        self.hero = None;
                        self.hero_log.clear();
                    }
                    if removed {
                        self.log_success(format!("{} input cleared", mode.title()));
                    } else {
                        self.log_info(format!("{} had no saved input", mode.title()));
                    }
                }
                UiMessage::ActivityLoaded(records) => {
                    self.activity = records;
                }
                UiMessage::Logged => {}
                UiMessage::OperationFailed(e) => {
                    tracing::error!("Operation failed: {}", e);
                    self.error_message = Some(e.clone());
                    self.log_error(e);
                }
            }
        }
    }

    /// Rebuild the hero from the upgrade editor's saved JSON.
    fn restore_hero(&mut self) {
        let data = self.editor(GameMode::Upgrade).data.clone();
        match Hero::from_data(&data) {
            Ok(hero) => {
                if let Some(hero) = &hero {
                    self.hero_name = hero.name.clone();
                }
                self.hero = hero;
            }
            Err(e) => {
                tracing::warn!("Discarding unreadable hero save: {}", e);
                self.log_warning("Saved hero could not be read");
                self.hero = None;
            }
        }
    }

    /// Render modal dialogs (error, success).
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(ref error) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::ERROR, error);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }

        if let Some(ref msg) = self.success_message.clone() {
            egui::Window::new("Success")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::SUCCESS, msg);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.success_message = None;
                    }
                });
        }
    }

    /// Render the top bar with the session and a logout button.
    fn show_top_bar(&mut self, ctx: &egui::Context) {
        let Some(user) = self.session.clone() else {
            return;
        };

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Signed in as {} ({})", user.name, user.account));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Log out").clicked() {
                        self.log_info("Logged out");
                        self.logout();
                    }
                });
            });
        });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_async_results();

        // Keep polling while database work is in flight
        if self.pending_ops > 0 {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }

        self.show_top_bar(ctx);
        self.show_dialogs(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match self.screen {
            Screen::Login => login_panel::show(self, ui),
            Screen::Menu => {
                if let Some(next) = dashboard::show(self, ui) {
                    match next {
                        Screen::Game(mode) => self.open_mode(mode),
                        Screen::Activity => self.open_activity(),
                        other => self.screen = other,
                    }
                }
            }
            Screen::Game(mode) => {
                let go_back = match mode {
                    GameMode::FlyLudo => ludo_panel::show(self, ui),
                    GameMode::Bingo => bingo_panel::show(self, ui),
                    GameMode::Schedule => schedule_panel::show(self, ui),
                    GameMode::Upgrade => upgrade_panel::show(self, ui),
                };
                if go_back {
                    self.screen = Screen::Menu;
                }
            }
            Screen::Activity => {
                if activity_panel::show(self, ui) {
                    self.screen = Screen::Menu;
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::memory_db;

    fn test_app(dir: &std::path::Path) -> App {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let pool = rt.block_on(memory_db());
        let credentials = CredentialStore::new(dir.join("remember.json"), dir.join("last.json"));
        App::new(pool, AppConfig::default(), rt, credentials)
    }

    #[test]
    fn test_log_keeps_last_hundred() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());

        for i in 0..120 {
            app.log_info(format!("message {i}"));
        }
        assert_eq!(app.log_messages.len(), 100);
        assert_eq!(app.log_messages[0].message, "message 20");
    }

    #[test]
    fn test_login_form_prefilled_from_store() {
        let dir = tempfile::tempdir().unwrap();
        CredentialStore::new(dir.path().join("remember.json"), dir.path().join("last.json"))
            .record_login("alice", "pw", true)
            .unwrap();

        let app = test_app(dir.path());
        assert_eq!(app.login_form.account, "alice");
        assert_eq!(app.login_form.password, "pw");
        assert!(app.login_form.remember);
        assert_eq!(app.screen, Screen::Login);
    }

    #[test]
    fn test_mode_actions_need_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());

        app.open_mode(GameMode::Bingo);
        assert_eq!(app.screen, Screen::Login);
        assert_eq!(app.pending_ops, 0);
    }
}
