mod handler;
pub mod model;

pub use handler::{get_all_faculties, get_faculty_by_id};
