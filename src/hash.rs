//! Map type behind caller-owned caches such as
//! [`DecimalsCache`](crate::quote::DecimalsCache).
//!
//! The hasher is picked by cargo feature. Selecting `std-hash`, or more
//! than one backend, falls back to the standard library map.

/// `FxHashMap`, enabled by the `rustc-hash` feature alone.
#[cfg(all(feature = "rustc-hash", not(feature = "ahash"), not(feature = "std-hash")))]
pub type FastMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// `AHashMap`, enabled by the `ahash` feature alone.
#[cfg(all(feature = "ahash", not(feature = "rustc-hash"), not(feature = "std-hash")))]
pub type FastMap<K, V> = ahash::AHashMap<K, V>;

/// Standard library map.
#[cfg(not(any(
    all(feature = "rustc-hash", not(feature = "ahash"), not(feature = "std-hash")),
    all(feature = "ahash", not(feature = "rustc-hash"), not(feature = "std-hash")),
)))]
pub type FastMap<K, V> = std::collections::HashMap<K, V>;
