pub mod app;
pub mod domain;
pub mod platform;
pub mod services;
pub mod storage;
pub mod error;

pub use error::{Error, Result};
