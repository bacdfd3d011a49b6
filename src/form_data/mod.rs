mod db_setting;
mod file_settings_view;

pub use self::db_setting::*;
pub use self::file_settings_view::*;
