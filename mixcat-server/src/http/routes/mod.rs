//! Route handlers organized by resource

pub mod admin;
pub mod categories;
pub mod drinks;
pub mod health;
pub mod uploads;
