pub mod config;
pub mod render;
pub mod routes;
pub mod state;
