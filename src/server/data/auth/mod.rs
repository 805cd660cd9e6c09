//! Accounts, the devices they log in from and the sessions those devices hold.

pub mod device;
pub mod session;
pub mod user;
