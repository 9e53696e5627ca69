pub mod batch;
pub mod catalog;
pub mod codec;
pub mod config;
pub mod delivery;
pub mod engine;
pub mod models;
pub mod storage;
pub mod types;
