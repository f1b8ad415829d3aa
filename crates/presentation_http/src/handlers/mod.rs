//! HTTP request handlers

pub mod destinations;
pub mod health;
pub mod routing;
