pub mod auth;
pub mod classroom;
pub mod course;
pub mod faculty;
pub mod mail;
pub mod registration;
pub mod setting;
