//! Property-based tests checking the parser, builder and grammar validator
//! against each other.
//!
//! Strategies generate values that satisfy the URI grammar; every built URI
//! must validate, and parsing it must give back what went in.

use proptest::prelude::*;

use arc82::{
    ADDRESS_LENGTH, Address, ApplicationQueryParams, LocalPairing, ParsedQuery, ResourceType,
    TokenField, TokenQueryParams, build_application_uri, build_token_uri, decode_base64url_bytes,
    encode_base64url, encode_base64url_bytes, extract_id, extract_type, is_base64url_char,
    validate_grammar,
};

/// Strategies for generating grammar-conformant values.
mod strategies {
    use super::*;

    /// Address alphabet (RFC 4648 base32, upper case)
    const BASE32_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

    /// A well-formed 58-character address.
    pub fn address() -> impl Strategy<Value = Address> {
        prop::collection::vec(prop::sample::select(BASE32_ALPHABET.to_vec()), ADDRESS_LENGTH)
            .prop_map(|chars| {
                let s: String = chars.into_iter().map(char::from).collect();
                Address::parse(&s).unwrap()
            })
    }

    /// An unpadded base64url key for 1 to 64 arbitrary bytes.
    pub fn key() -> impl Strategy<Value = String> {
        prop::collection::vec(any::<u8>(), 1..=64).prop_map(|b| encode_base64url_bytes(&b))
    }

    /// Application parameters with every request kind.
    pub fn application_params() -> impl Strategy<Value = ApplicationQueryParams> {
        (
            prop::collection::vec(key(), 0..4),
            prop::collection::vec(key(), 0..4),
            prop::collection::vec((key(), address()), 0..4),
            any::<bool>(),
        )
            .prop_map(|(boxes, global, local, program_code)| {
                let mut params = ApplicationQueryParams::new();
                for k in boxes {
                    params = params.with_box(k);
                }
                for k in global {
                    params = params.with_global(k);
                }
                for (k, a) in local {
                    params = params.with_local(k, a);
                }
                if program_code {
                    params = params.with_program_code();
                }
                params
            })
    }

    /// Any subset of token fields.
    pub fn token_fields() -> impl Strategy<Value = Vec<TokenField>> {
        prop::sample::subsequence(TokenField::ALL.to_vec(), 0..=TokenField::ALL.len())
    }
}

mod codec_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn bytes_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
            let encoded = encode_base64url_bytes(&bytes);
            prop_assert!(encoded.chars().all(is_base64url_char));
            prop_assert!(!encoded.contains('='));
            prop_assert_eq!(decode_base64url_bytes(&encoded).unwrap(), bytes);
        }

        #[test]
        fn text_roundtrip(text in "\\PC{0,64}") {
            let encoded = encode_base64url(&text);
            prop_assert_eq!(arc82::decode_base64url(&encoded).unwrap(), text);
        }

        #[test]
        fn invalid_length_rejected(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
            let mut encoded = encode_base64url_bytes(&bytes);
            // 4n + 1 characters can never be valid
            while encoded.len() % 4 != 1 {
                encoded.push('A');
            }
            prop_assert!(decode_base64url_bytes(&encoded).is_err());
        }
    }
}

mod id_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn any_u64_id_roundtrips(id in any::<u64>()) {
            let uri = build_application_uri(id, None).unwrap();
            prop_assert_eq!(extract_id(&uri), Some(id));
            prop_assert_eq!(extract_type(&uri), Some(ResourceType::Application));
            prop_assert!(validate_grammar(&uri).is_ok());

            let uri = build_token_uri(id, None).unwrap();
            prop_assert_eq!(extract_id(&uri), Some(id));
            prop_assert_eq!(extract_type(&uri), Some(ResourceType::Token));
        }

        #[test]
        fn negative_ids_rejected(id in i64::MIN..0) {
            prop_assert!(build_application_uri(id, None).is_err());
            prop_assert!(build_token_uri(id, None).is_err());
        }
    }
}

mod roundtrip_tests {
    use super::strategies::*;
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn application_builder_roundtrip(id in any::<u64>(), params in application_params()) {
            let uri = build_application_uri(id, Some(&params)).unwrap();
            prop_assert!(validate_grammar(&uri).is_ok(), "grammar rejected {}", uri);

            let parsed = ParsedQuery::parse_with(&uri, LocalPairing::Strict).unwrap();
            prop_assert_eq!(parsed.id().get(), id);
            prop_assert_eq!(parsed.application_params().unwrap(), &params);
            prop_assert_eq!(parsed.canonical(), uri);
        }

        #[test]
        fn token_builder_roundtrip(id in any::<u64>(), fields in token_fields()) {
            let params: TokenQueryParams = fields.iter().copied().collect();
            let uri = build_token_uri(id, Some(&params)).unwrap();
            prop_assert!(validate_grammar(&uri).is_ok(), "grammar rejected {}", uri);

            let parsed = ParsedQuery::parse(&uri).unwrap();
            let recovered: Vec<TokenField> = parsed.token_params().unwrap().iter().collect();
            prop_assert_eq!(recovered, fields);
        }

        #[test]
        fn token_flag_order_is_irrelevant(id in any::<u64>(), fields in token_fields()) {
            let reversed: Vec<&str> = fields.iter().rev().map(|f| f.query_key()).collect();
            let uri = if reversed.is_empty() {
                format!("algorand://asset/{id}")
            } else {
                format!("algorand://asset/{id}?{}", reversed.join("&"))
            };
            let parsed = ParsedQuery::parse(&uri).unwrap();
            let expected: TokenQueryParams = fields.into_iter().collect();
            prop_assert_eq!(parsed.token_params().unwrap(), &expected);
        }

        #[test]
        fn addresses_parse(address in address()) {
            let reparsed = Address::parse(address.as_str()).unwrap();
            prop_assert_eq!(reparsed, address);
        }
    }
}
