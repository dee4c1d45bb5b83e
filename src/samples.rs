//! Example URIs covering every query form.

/// Example URIs, one per query form, all accepted by both
/// [`ParsedQuery::parse`](crate::ParsedQuery::parse) and
/// [`validate_grammar`](crate::validate_grammar).
///
/// ```
/// for uri in arc82::example_uris() {
///     assert!(arc82::is_valid_uri(uri));
///     assert!(arc82::validate_grammar(uri).is_ok());
/// }
/// ```
#[must_use]
pub const fn example_uris() -> &'static [&'static str] {
    &[
        // box "algorand"
        "algorand://app/2345?box=YWxnb3JvbmQ",
        // global "global_key"
        "algorand://app/12345?global=Z2xvYmFsX2tleQ",
        // local "local_key"
        "algorand://app/12345?local=bG9jYWxfa2V5&algorandaddress=ZZAF5ARA4MEC5PVDOP64JM5O5MQST63Q2KOY2FLYFLXXD3PFSNJJBYAFZM",
        "algorand://app/12345?tealcode",
        "algorand://app/12345?box=Ym94X2tleQ&global=Z2xvYmFsX2tleQ&tealcode",
        "algorand://asset/31566704?total&decimals&unitname&assetname",
        "algorand://asset/31566704?url&metadatahash",
        "algorand://asset/31566704?manager&reserve&freeze&clawback",
        "algorand://asset/31566704?frozen",
    ]
}
