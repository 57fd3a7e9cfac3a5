//! HTTP transport and wire types for the backend API.

pub mod http;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;
