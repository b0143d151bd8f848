pub mod controller;
pub mod router;
pub mod service;

pub use router::init_course_histories_router;
pub use service::CourseHistoryService;
