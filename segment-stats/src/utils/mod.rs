pub mod byte_size;
pub mod fixedint;
pub mod string;
pub mod tracing;
pub mod varint;
