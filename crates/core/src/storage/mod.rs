pub mod file_store;
pub mod manager;
pub mod store;
