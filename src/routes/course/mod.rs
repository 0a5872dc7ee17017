mod handler;
pub mod model;

pub use handler::{
    create_course, delete_course, get_all_courses, get_course_by_id, get_courses_by_class_id,
    update_course,
};
