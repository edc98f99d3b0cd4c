//! API handlers for Lectern REST endpoints

pub mod authors;
pub mod books;
pub mod health;
pub mod openapi;
