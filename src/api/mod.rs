//! API handlers for Menagerie REST endpoints

pub mod animals;
pub mod configuration;
pub mod diets;
pub mod estimates;
pub mod feeds;
pub mod health;
pub mod openapi;
pub mod populations;
