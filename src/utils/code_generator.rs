//! Short code generation and validation utilities.
//!
//! Generated codes are 6 alphanumeric characters drawn from a per-service
//! generator that is seeded once. Custom codes must match [`SHORT_CODE_REGEX`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use serde_json::json;
use std::sync::{LazyLock, Mutex, PoisonError};

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Length of generated codes.
pub const GENERATED_CODE_LENGTH: usize = 6;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Accepted short code format: 2-64 characters, alphanumeric at both ends,
/// `_` and `-` allowed in between.
pub static SHORT_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]{0,62}[A-Za-z0-9]$").unwrap());

/// Codes that single-segment fixed routes would shadow. Routing is
/// case-sensitive, so only these exact spellings are reserved.
const RESERVED_CODES: &[&str] = &["link", "image", "health"];

/// Produces random short codes that are unused in a [`LinkRepository`].
///
/// Owns its random source; each service instance creates its own generator.
pub struct CodeGenerator {
    rng: Mutex<StdRng>,
}

impl CodeGenerator {
    /// Creates a generator seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Creates a generator with a fixed seed, for reproducible sequences.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Draws one random code, without checking for collisions.
    pub fn generate(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        (0..GENERATED_CODE_LENGTH)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }

    /// Draws codes until one is neither reserved nor present in `links`.
    ///
    /// There is no attempt limit; the existence check is authoritative and any
    /// storage error ends the loop.
    pub async fn generate_unique(&self, links: &dyn LinkRepository) -> Result<String, AppError> {
        let mut attempts: u64 = 0;

        loop {
            attempts += 1;
            let code = self.generate();

            if is_reserved(&code) || links.exists(&code).await? {
                tracing::debug!(code, attempts, "Generated code collided, retrying");
                continue;
            }

            return Ok(code);
        }
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Validates a short code, generated or user-provided.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the code does not match
/// [`SHORT_CODE_REGEX`] or collides with a fixed route.
pub fn validate_code(code: &str) -> Result<(), AppError> {
    if !SHORT_CODE_REGEX.is_match(code) {
        return Err(AppError::bad_request(
            "Invalid short link format",
            json!({ "code": code }),
        ));
    }

    if is_reserved(code) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
