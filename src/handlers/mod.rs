pub mod graphql_handler;
pub mod health_handler;
pub mod upload_handler;

pub use graphql_handler::{graphiql, graphql};
pub use health_handler::health_check;
pub use upload_handler::{create_course_with_video, upload_submission_file, MAX_UPLOAD_BYTES};
