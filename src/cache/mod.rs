//! Response caching for the pricing API.

mod key;
mod response_cache;

pub use key::CacheKey;
pub use response_cache::{CachedValue, ResponseCache};
