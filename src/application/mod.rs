pub mod dto;
pub mod figures;
pub mod ports;
pub mod services;
