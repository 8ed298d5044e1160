pub mod annotate;
pub mod builder;
pub mod classify;
pub mod expand;
pub mod extract;
pub mod resolve;
