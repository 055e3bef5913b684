use rand::RngCore;
use rand_core::OsRng;

/// Fills a fresh buffer of `len` bytes from the OS CSPRNG.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    OsRng.fill_bytes(&mut buf);
    buf
}

/// Fixed-size variant of [`random_bytes`], handy for hashes and keys.
pub fn random_bytes_fixed<const N: usize>() -> [u8; N] {
    let mut buf = [0u8; N];
    OsRng.fill_bytes(&mut buf);
    buf
}
