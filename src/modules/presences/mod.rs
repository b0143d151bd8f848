pub mod controller;
pub mod router;
pub mod service;

pub use router::init_presences_router;
pub use service::PresenceService;
