//! Core types and the record service for the Packline packing-line backend.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! storage backend plugs in through [`store::RecordStore`]; the HTTP surface
//! drives [`service::RecordService`].

pub mod error;
pub mod input;
pub mod operator;
pub mod packing;
pub mod service;
pub mod store;

pub use error::{Error, Result};
pub use service::{RecordService, ServiceError};
