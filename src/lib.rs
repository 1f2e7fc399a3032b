pub mod analysis;
pub mod api;
pub mod models;
pub mod ui;
