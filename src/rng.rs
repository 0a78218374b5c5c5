use std::collections::HashMap;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable randomness with one independent ChaCha8 stream per named
/// consumer ("continents", "workforce", "trade", ...).
///
/// Stream seeds are derived by mixing the master seed with the stream
/// name, so the set of streams requested - and the order they are
/// requested in - never changes what any one stream produces.
pub struct RngManager {
    master_seed: u64,
    streams: HashMap<String, ChaCha8Rng>,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self {
            master_seed: seed,
            streams: HashMap::new(),
        }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn stream(&mut self, name: &str) -> SystemRng<'_> {
        let seed = derive_stream_seed(self.master_seed, name);
        let entry = self
            .streams
            .entry(name.to_string())
            .or_insert_with(|| ChaCha8Rng::seed_from_u64(seed));
        SystemRng { inner: entry }
    }
}

fn derive_stream_seed(master: u64, name: &str) -> u64 {
    let mut seed = master;
    for byte in name.bytes() {
        seed = seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        seed ^= u64::from(byte).wrapping_mul(1103515245);
    }
    seed.wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407)
}

pub struct SystemRng<'a> {
    inner: &'a mut ChaCha8Rng,
}

impl RngCore for SystemRng<'_> {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = RngManager::new(42);
        let mut b = RngManager::new(42);

        let x: u64 = a.stream("continents").gen();
        let y: u64 = b.stream("continents").gen();
        assert_eq!(x, y, "same seed and name should replay identically");
    }

    #[test]
    fn different_names_diverge() {
        let mut manager = RngManager::new(42);

        let x: u64 = manager.stream("continents").gen();
        let y: u64 = manager.stream("trade").gen();
        assert_ne!(x, y, "named streams should be independent");
    }

    #[test]
    fn stream_request_order_is_irrelevant() {
        let mut forward = RngManager::new(7);
        let _: u64 = forward.stream("workforce").gen();
        let from_forward: u64 = forward.stream("trade").gen();

        let mut reversed = RngManager::new(7);
        let from_reversed: u64 = reversed.stream("trade").gen();

        assert_eq!(from_forward, from_reversed);
    }

    #[test]
    fn stream_state_persists_across_borrows() {
        let mut manager = RngManager::new(11);
        let first: u64 = manager.stream("trade").gen();
        let second: u64 = manager.stream("trade").gen();
        assert_ne!(first, second, "a stream should advance, not restart");
    }
}
