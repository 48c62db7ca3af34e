//! Calculation cache adapters.
//!
//! [`RedisCalculationCache`] stores results in Redis via a `bb8` pool;
//! [`InMemoryCalculationCache`] keeps them in process for single-node runs
//! and tests.

mod in_memory;
mod redis;

pub use in_memory::InMemoryCalculationCache;
pub use redis::RedisCalculationCache;
