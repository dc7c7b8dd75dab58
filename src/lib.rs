// src/lib.rs
pub mod backend;
pub mod banner;
pub mod cli;
pub mod config;
pub mod errors;
pub mod form;
pub mod models;
pub mod repl;
pub mod view;
