mod handler;
pub mod model;

pub use handler::{send_mail_queue, test_connection};
