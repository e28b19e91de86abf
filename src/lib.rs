pub mod config;
pub mod console_interface;
pub mod core;
pub mod models;
pub mod utils;

#[cfg(test)]
mod test;
