pub mod http_store;
pub mod json_store;

pub use http_store::HttpStore;
pub use json_store::JsonFileStore;
