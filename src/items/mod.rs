//! Items resource: thin CRUD pass-through to the persistence driver.

pub mod handlers;

pub use handlers::router;
