mod handler;
pub mod model;

pub use handler::{
    create_setting, delete_setting, get_all_settings, get_setting_by_key, update_setting,
};
