//! Request and response bodies

pub mod users;
pub mod billing;
pub mod payments;
