use crate::HmacSha256;
use hmac::Mac;
use pbkdf2::pbkdf2;
use rand::Rng;

/// Function to generate a random salt for PBKDF2
pub fn generate_random_salt() -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..16).map(|_| rng.gen()).collect()
}

/// Derive a 32-byte password hash with PBKDF2-HMAC-SHA256
pub fn derive_password_hash(password: &str, salt: &[u8], iterations: u32) -> Vec<u8> {
    let mut key = vec![0u8; 32];
    pbkdf2::<HmacSha256>(password.as_bytes(), salt, iterations.max(1), &mut key);
    key
}

/// Check `password` against a stored hash without an early-exit byte comparison
pub fn verify_password_hash(password: &str, salt: &[u8], iterations: u32, expected: &[u8]) -> bool {
    let derived = derive_password_hash(password, salt, iterations);

    // Both digests are keyed with the salt; verify_slice compares in constant time
    let (Ok(mut actual), Ok(mut reference)) = (
        HmacSha256::new_from_slice(salt),
        HmacSha256::new_from_slice(salt),
    ) else {
        return false;
    };
    actual.update(&derived);
    reference.update(expected);
    actual
        .verify_slice(&reference.finalize().into_bytes())
        .is_ok()
}
