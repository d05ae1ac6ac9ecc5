pub mod candy_machine;
pub mod cli;
pub mod config;
pub mod constants;
pub mod create;
pub mod errors;
pub mod mint;
pub mod modules;
pub mod network;
pub mod parse;
pub mod pdas;
pub mod settings;
pub mod setup;
pub mod show;
pub mod utils;
