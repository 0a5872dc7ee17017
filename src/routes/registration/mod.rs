mod handler;
pub mod model;

pub use handler::{
    create_registration, delete_registration, get_all_registrations, get_registration_by_id,
};
