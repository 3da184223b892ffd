pub mod buffers;
pub mod config;
pub mod core;
pub mod linalg;
pub mod registry;
pub mod split_statistics;
pub mod survival;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
