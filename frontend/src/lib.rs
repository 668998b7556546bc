pub mod api;
pub mod chart;
pub mod components;
pub mod config;
pub mod error;
pub mod model;
pub mod notify;
pub mod sequence;
pub mod view;
