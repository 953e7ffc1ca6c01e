// src/services.rs

pub mod address_lookup;
pub use address_lookup::AddressLookup;
pub mod contact_service;
pub use contact_service::ContactService;
