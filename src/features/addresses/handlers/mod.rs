pub mod address_handler;

pub use address_handler::*;
