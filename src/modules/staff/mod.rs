//! Principals, preceptors and professors.
//!
//! Creating a staff member creates its user identity (staff flag set, never a
//! superuser) and the role record in one transaction.

pub mod preceptors;
pub mod principals;
pub mod professors;
pub mod router;
pub mod service;

pub use router::{init_preceptors_router, init_principals_router, init_professors_router};
pub use service::{StaffRecord, StaffService};
