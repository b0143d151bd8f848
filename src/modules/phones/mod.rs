pub mod controller;
pub mod router;
pub mod service;

pub use router::init_phones_router;
pub use service::PhoneService;
