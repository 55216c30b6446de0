// Service exports
pub mod store;

pub use store::{GeoStore, StoreError};
