//! Records exchanged with the catalog backend

/// Movies and the body sent to create or edit one
pub mod movie;
/// Actors and producers
pub mod person;
/// Accounts, credentials and backend messages
pub mod user;
