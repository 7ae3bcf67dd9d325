//! Intensity transforms and the server decorator that applies them to tiles.

pub mod server;
pub mod sublinear;
