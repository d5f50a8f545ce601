//! Chip challenge-response check.
//!
//! A genuine part's chip answers a nonce with `nonce + 1`. The scheme is
//! fixed and deliberately simple; it carries no key material.

/// Returns `true` if `chip_response` answers `nonce`.
///
/// A nonce at `i64::MAX` has no valid answer.
pub fn verify_chip_response(nonce: i64, chip_response: i64) -> bool {
    nonce.checked_add(1) == Some(chip_response)
}
