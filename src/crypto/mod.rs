mod random;

pub use self::random::get_random_bytes;

use sha2::{Digest, Sha256};

//32 bytes hash output
pub fn do_slice_sha256_hash(data: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}
