//! Document and chat client core: a typed REST resource client, domain
//! services, and a single-writer state store with async effects.

pub mod api;
pub mod config;
pub mod http;
pub mod logging;
pub mod model;
pub mod service;
pub mod shutdown;
pub mod store;
