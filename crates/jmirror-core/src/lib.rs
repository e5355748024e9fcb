pub mod config;
pub mod logging;

pub mod fetch;
pub mod mirror_store;
pub mod paginate;
pub mod pipeline;
pub mod storage;
pub mod tree;
pub mod url_model;
pub mod validate;
