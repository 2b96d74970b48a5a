//! Shared utilities: ZIP assembly, XML generation, media types, natural-order
//! comparison, and output-name handling.

pub mod archive;
pub mod mime;
pub mod natsort;
pub mod paths;
pub mod xml;
