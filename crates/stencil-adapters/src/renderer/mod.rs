//! Rendering engine adapters.

mod simple;

pub use simple::SimpleRenderer;
