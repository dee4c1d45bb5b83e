//! Kani Arbitrary implementations and proof harnesses for property verification.
//!
//! # Usage
//!
//! Kani is not a Cargo dependency. Install and run with:
//!
//! ```bash
//! cargo install --locked kani-verifier
//! cargo kani setup
//! cargo kani --features kani
//! ```
//!
//! This module is only compiled when using Kani (`#[cfg(kani)]`).

use crate::{Address, ResourceId, TokenField, TokenQueryParams};

/// Address alphabet: base32 upper case letters and digits 2-7
const ADDRESS_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

fn arbitrary_address_char() -> char {
    let idx: usize = kani::any();
    ADDRESS_CHARS[idx % ADDRESS_CHARS.len()] as char
}

impl kani::Arbitrary for Address {
    fn any() -> Self {
        let s: String = (0..crate::ADDRESS_LENGTH).map(|_| arbitrary_address_char()).collect();
        Address::parse(&s).expect("valid address by construction")
    }
}

impl kani::Arbitrary for ResourceId {
    fn any() -> Self {
        ResourceId::new(kani::any())
    }
}

impl kani::Arbitrary for TokenField {
    fn any() -> Self {
        let idx: usize = kani::any();
        TokenField::ALL[idx % TokenField::ALL.len()]
    }
}

#[kani::proof]
fn address_char_check_matches_alphabet() {
    let c: char = kani::any();
    let in_alphabet = c.is_ascii() && ADDRESS_CHARS.contains(&(c as u8));
    assert_eq!(Address::is_valid_char(c), in_alphabet);
}

#[kani::proof]
fn token_params_with_then_contains() {
    let field: TokenField = kani::any();
    let params = TokenQueryParams::new().with(field);
    assert!(params.contains(field));
    assert_eq!(params.len(), 1);
}

#[kani::proof]
fn resource_id_roundtrips_through_u64() {
    let id: ResourceId = kani::any();
    assert!(ResourceId::try_from(id.get()).is_ok());
}
