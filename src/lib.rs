// Cinder: toxic comment triage for YouTube videos
//
// This is the library root. The fetch controller feeds the state store; the
// filter engine, render pipeline, and report composer all read from it.

pub mod config;
pub mod fetch;
pub mod filter;
pub mod format;
pub mod models;
pub mod output;
pub mod render;
pub mod report;
pub mod sanitize;
pub mod state;
pub mod status;
pub mod web;
