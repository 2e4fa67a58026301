pub mod catalog_error;
pub use catalog_error::*;

pub mod config;
pub use config::*;

pub mod schema;
pub use schema::*;

pub mod dataset;
pub use dataset::*;

pub mod catalog_document;
pub use catalog_document::*;

pub mod catalog_store;
pub use catalog_store::*;
