use log::error;
use rand::rngs::OsRng;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::error::{Error, Result};

pub struct SecureRandom {
    rng: ChaCha20Rng,
}

impl SecureRandom {
    // Seeding fails only when the os entropy source is not available
    pub fn new() -> Result<Self> {
        let rng = ChaCha20Rng::from_rng(OsRng).map_err(|e| {
            error!("Seeding ChaCha20Rng from OsRng failed: {}", e);
            Error::RandomGenerationFailed(e.to_string())
        })?;
        Ok(SecureRandom { rng })
    }

    pub fn get_bytes<const N: usize>(&mut self) -> Result<Vec<u8>> {
        let mut buf = [0u8; N];
        self.rng
            .try_fill_bytes(&mut buf)
            .map_err(|e| Error::RandomGenerationFailed(e.to_string()))?;
        Ok(buf.to_vec())
    }
}

pub fn get_random_bytes<const N: usize>() -> Result<Vec<u8>> {
    SecureRandom::new()?.get_bytes::<N>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_random_bytes() {
        let a = get_random_bytes::<32>().unwrap();
        let b = get_random_bytes::<32>().unwrap();
        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
    }
}
