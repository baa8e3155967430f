pub mod mem0;

pub use mem0::{Mem0Client, DEFAULT_MEM0_BASE_URL};
