//! Headless bill import: upload a billing spreadsheet, trim rows locally while
//! keeping the summary totals in step, then commit the bill.

pub mod api;
pub mod cli;
pub mod config;
pub mod engine;
pub mod models;
pub mod types;
pub mod workflow;
