pub mod errors;
pub mod id_generator;
pub mod models;
pub mod ports;
pub mod service;
