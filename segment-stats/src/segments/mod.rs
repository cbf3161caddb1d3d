pub mod codec;
pub mod collector;
pub mod extension;
pub mod json;
pub mod options;
pub mod render;
pub mod stats;
