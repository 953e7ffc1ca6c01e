// src/handlers.rs

pub mod address;
pub mod contact;
pub mod donations;
pub mod services;
pub mod status;
