pub use super::bingo_input::Entity as BingoInput;
pub use super::delete_log::Entity as DeleteLog;
pub use super::fly_ludo_input::Entity as FlyLudoInput;
pub use super::insert_log::Entity as InsertLog;
pub use super::schedule_input::Entity as ScheduleInput;
pub use super::upgrade_input::Entity as UpgradeInput;
pub use super::user_info::Entity as UserInfo;
pub use super::user_log::Entity as UserLog;
