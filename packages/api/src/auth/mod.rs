pub mod error;
pub mod keys;
pub mod repository;
pub mod service;
