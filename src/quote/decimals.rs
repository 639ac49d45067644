use crate::FastMap;
use alloy_primitives::Address;
use tracing::debug;

/// Read-through cache of token decimals keyed by token address.
///
/// The cache is owned by the caller and handed to whatever needs it; the
/// math never consults global state. Fetch failures are not cached.
#[derive(Clone, Debug, Default)]
pub struct DecimalsCache {
    entries: FastMap<Address, u8>,
}

impl DecimalsCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, token: &Address) -> Option<u8> {
        self.entries.get(token).copied()
    }

    /// Seeds a known value, e.g. from a token list. Returns the previous
    /// entry, if any.
    pub fn insert(&mut self, token: Address, decimals: u8) -> Option<u8> {
        self.entries.insert(token, decimals)
    }

    /// Returns the cached decimals for `token`, calling `fetch` (usually
    /// an RPC `decimals()` call) only on a miss.
    pub fn get_or_fetch<E>(
        &mut self,
        token: Address,
        fetch: impl FnOnce(Address) -> Result<u8, E>,
    ) -> Result<u8, E> {
        if let Some(decimals) = self.get(&token) {
            return Ok(decimals);
        }
        let decimals = fetch(token)?;
        debug!(%token, decimals, "cached token decimals");
        self.entries.insert(token, decimals);
        Ok(decimals)
    }

    /// Decimals for both tokens of a pair.
    pub fn pair<E>(
        &mut self,
        token0: Address,
        token1: Address,
        mut fetch: impl FnMut(Address) -> Result<u8, E>,
    ) -> Result<(u8, u8), E> {
        let decimals0 = self.get_or_fetch(token0, &mut fetch)?;
        let decimals1 = self.get_or_fetch(token1, &mut fetch)?;
        Ok((decimals0, decimals1))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
