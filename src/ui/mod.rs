//! UI module - reusable egui widgets for the analysis screen

pub mod components;
