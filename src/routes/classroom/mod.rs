mod handler;
pub mod model;

pub use handler::{
    create_classroom, delete_classroom, get_all_classrooms, get_classroom_by_id, update_classroom,
};
