pub mod address;
pub mod contact;
pub mod donation;
pub mod service;
