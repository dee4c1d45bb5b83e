//! End-to-end resolution of ARC-82 URIs against an in-memory ledger.

use std::time::Duration;

use arc82::{Address, LocalPairing, ParsedQuery, ResourceType};
use arc82_query::{
    AccountInfo, ApplicationInfo, ItemError, LedgerClient, LedgerError, LocalState, MemoryLedger,
    QueryConfig, QueryError, StateEntry, TealValue, TokenInfo, query_application,
    query_application_with, query_from_uri, query_from_uri_with, query_token,
};

const APP_ID: u64 = 2345;
const ALICE: &str = "ZZAF5ARA4MEC5PVDOP64JM5O5MQST63Q2KOY2FLYFLXXD3PFSNJJBYAFZM";

fn bob() -> String {
    "B".repeat(58)
}

fn alice() -> Address {
    Address::parse(ALICE).unwrap()
}

/// An application with global state, two boxes, and one opted-in account.
fn ledger() -> MemoryLedger {
    let ledger = MemoryLedger::new();
    ledger.insert_application(ApplicationInfo {
        id: APP_ID,
        global_state: vec![
            StateEntry::bytes("global_key", "hello"),
            StateEntry::uint("counter", 42),
            StateEntry::bytes("raw", vec![0xff, 0xfe]),
        ],
        approval_program: vec![0x08, 0x81, 0x01],
        clear_program: vec![0x08, 0x81, 0x00],
    });
    ledger.insert_box(APP_ID, "algorond", "first box");
    ledger.insert_box(APP_ID, "other", "second box");
    ledger.insert_account(AccountInfo {
        address: alice(),
        apps_local_state: vec![LocalState {
            app_id: APP_ID,
            key_value: vec![StateEntry::uint("balance", 7)],
        }],
    });
    ledger.insert_account(AccountInfo::new(Address::parse(&bob()).unwrap()));
    ledger.insert_token(TokenInfo {
        id: 31_566_704,
        total: 10_000_000_000,
        decimals: 6,
        default_frozen: false,
        unit_name: Some("USDC".into()),
        name: Some("USD Coin".into()),
        url: Some("https://example.com".into()),
        metadata_hash: None,
        manager: Some(ALICE.into()),
        reserve: None,
        freeze: None,
        clawback: None,
    });
    ledger
}

/// Delegates to a [`MemoryLedger`], failing account reads for one address
/// and delaying box reads by a per-key amount.
struct FlakyLedger {
    inner: MemoryLedger,
    unreachable: Option<String>,
    box_delays: Vec<(Vec<u8>, u64)>,
}

impl FlakyLedger {
    fn new(inner: MemoryLedger) -> Self {
        Self {
            inner,
            unreachable: None,
            box_delays: Vec::new(),
        }
    }
}

impl LedgerClient for FlakyLedger {
    async fn application_info(&self, app_id: u64) -> Result<ApplicationInfo, LedgerError> {
        self.inner.application_info(app_id).await
    }

    async fn box_value(&self, app_id: u64, key: &[u8]) -> Result<Vec<u8>, LedgerError> {
        let delay = self
            .box_delays
            .iter()
            .find(|(k, _)| k == key)
            .map_or(0, |(_, ms)| *ms);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        self.inner.box_value(app_id, key).await
    }

    async fn account_info(&self, address: &Address) -> Result<AccountInfo, LedgerError> {
        if self.unreachable.as_deref() == Some(address.as_str()) {
            return Err(LedgerError::timeout(format!("account {address}")));
        }
        self.inner.account_info(address).await
    }

    async fn token_info(&self, token_id: u64) -> Result<TokenInfo, LedgerError> {
        self.inner.token_info(token_id).await
    }
}

#[tokio::test]
async fn boxes_present_and_absent() {
    let ledger = ledger();
    let query = ParsedQuery::parse("algorand://app/2345?box=YWxnb3JvbmQ%3D&box=bm9uZQ").unwrap();

    let outcome = query_application(&query, &ledger).await.unwrap();

    assert!(outcome.exists);
    assert!(outcome.success());
    assert_eq!(outcome.boxes.len(), 2);
    let first = outcome.boxes[0].as_ref().unwrap();
    assert_eq!(first.key, "YWxnb3JvbmQ");
    assert_eq!(first.value, b"first box");
    assert_eq!(
        outcome.boxes[1],
        Err(ItemError::NotFound {
            key: "bm9uZQ".into()
        })
    );
    assert_eq!(outcome.found_count(), 1);
}

#[tokio::test]
async fn global_state_lookup() {
    let ledger = ledger();
    // global_key, counter, raw, missing
    let query = ParsedQuery::parse(
        "algorand://app/2345?global=Z2xvYmFsX2tleQ&global=Y291bnRlcg&global=cmF3&global=bWlzc2luZw",
    )
    .unwrap();

    let outcome = query_application(&query, &ledger).await.unwrap();

    let text = outcome.global[0].as_ref().unwrap();
    assert_eq!(text.value, TealValue::Bytes(b"hello".to_vec()));
    assert_eq!(text.decoded.as_deref(), Some("hello"));

    let counter = outcome.global[1].as_ref().unwrap();
    assert_eq!(counter.value.as_uint(), Some(42));
    assert_eq!(counter.decoded, None);

    let raw = outcome.global[2].as_ref().unwrap();
    assert_eq!(raw.decoded, None);

    assert!(matches!(outcome.global[3], Err(ItemError::NotFound { .. })));
    assert!(outcome.success());
}

#[tokio::test]
async fn local_state_found_missing_and_not_opted_in() {
    let ledger = ledger();
    let balance = arc82::encode_base64url("balance");
    let other = arc82::encode_base64url("other");

    let found = format!("algorand://app/2345?local={balance}&local={other}&algorandaddress={ALICE}");
    let outcome = query_from_uri(&found, &ledger).await.unwrap();
    let outcome = outcome.as_application().unwrap();
    let item = outcome.local[0].as_ref().unwrap();
    assert_eq!(item.address, alice());
    assert_eq!(item.value, TealValue::Uint(7));
    assert!(matches!(outcome.local[1], Err(ItemError::NotFound { .. })));

    let bob = bob();
    let not_opted = format!("algorand://app/2345?local={balance}&algorandaddress={bob}");
    let outcome = query_from_uri(&not_opted, &ledger).await.unwrap();
    let outcome = outcome.as_application().unwrap();
    assert!(matches!(outcome.local[0], Err(ItemError::NotOptedIn { .. })));
    assert!(outcome.success());
}

#[tokio::test]
async fn unknown_account_is_not_opted_in() {
    let ledger = ledger();
    let address = "C".repeat(58);
    let uri = format!("algorand://app/2345?local=YmFsYW5jZQ&algorandaddress={address}");
    let outcome = query_from_uri(&uri, &ledger).await.unwrap();
    let outcome = outcome.as_application().unwrap();
    assert!(matches!(outcome.local[0], Err(ItemError::NotOptedIn { .. })));
}

#[tokio::test]
async fn program_code_only_when_requested() {
    let ledger = ledger();

    let with = ParsedQuery::parse("algorand://app/2345?tealcode").unwrap();
    let outcome = query_application(&with, &ledger).await.unwrap();
    let code = outcome.program_code.unwrap();
    assert_eq!(code.approval, vec![0x08, 0x81, 0x01]);
    assert_eq!(code.clear, vec![0x08, 0x81, 0x00]);

    let without = ParsedQuery::parse("algorand://app/2345").unwrap();
    let outcome = query_application(&without, &ledger).await.unwrap();
    assert!(outcome.program_code.is_none());
    assert!(outcome.success());
}

#[tokio::test]
async fn missing_application() {
    let ledger = ledger();
    let query = ParsedQuery::parse("algorand://app/999?box=YQ&tealcode").unwrap();

    let outcome = query_application(&query, &ledger).await.unwrap();

    assert!(!outcome.exists);
    assert!(!outcome.success());
    assert!(outcome.failure.is_some());
    assert!(outcome.boxes.is_empty());
    assert!(outcome.program_code.is_none());
}

#[tokio::test]
async fn token_fields() {
    let ledger = ledger();
    let query = ParsedQuery::parse("algorand://asset/31566704?total&decimals&unitname&reserve").unwrap();

    let outcome = query_token(&query, &ledger).await.unwrap();

    assert!(outcome.success());
    assert_eq!(outcome.parameters.total, Some(10_000_000_000));
    assert_eq!(outcome.parameters.decimals, Some(6));
    assert_eq!(outcome.parameters.unit_name.as_deref(), Some("USDC"));
    assert_eq!(outcome.parameters.reserve, None);
    assert_eq!(outcome.parameters.manager, None);
}

#[tokio::test]
async fn missing_token() {
    let ledger = ledger();
    let query = ParsedQuery::parse("algorand://asset/1?total&decimals").unwrap();

    let outcome = query_token(&query, &ledger).await.unwrap();

    assert!(!outcome.exists);
    assert!(!outcome.success());
    assert!(outcome.parameters.is_empty());
}

#[tokio::test]
async fn wrong_resource_type() {
    let ledger = ledger();
    let token = ParsedQuery::parse("algorand://asset/31566704?total").unwrap();
    let app = ParsedQuery::parse("algorand://app/2345").unwrap();

    assert_eq!(
        query_application(&token, &ledger).await.unwrap_err(),
        QueryError::WrongResourceType {
            expected: ResourceType::Application,
            found: ResourceType::Token,
        }
    );
    assert!(matches!(
        query_token(&app, &ledger).await,
        Err(QueryError::WrongResourceType { .. })
    ));
}

#[tokio::test]
async fn local_timeout_stops_remaining_reads() {
    let bob = bob();
    let mut client = FlakyLedger::new(ledger());
    client.unreachable = Some(bob.clone());
    let balance = arc82::encode_base64url("balance");
    let uri = format!(
        "algorand://app/2345?box=YWxnb3JvbmQ\
         &local={balance}&algorandaddress={ALICE}\
         &local={balance}&algorandaddress={bob}\
         &local={balance}&algorandaddress={ALICE}"
    );
    let config = QueryConfig::new().with_pairing(LocalPairing::Strict);

    let outcome = query_from_uri_with(&uri, &client, &config).await.unwrap();
    let outcome = outcome.as_application().unwrap();

    assert!(outcome.exists);
    assert!(!outcome.success());
    assert!(outcome.failure.as_deref().unwrap().contains("timed out"));
    assert!(outcome.boxes[0].is_ok());
    assert_eq!(outcome.local.len(), 2);
    assert!(outcome.local[0].is_ok());
    assert!(matches!(
        outcome.local[1],
        Err(ItemError::Ledger(LedgerError::Timeout { .. }))
    ));
}

#[tokio::test]
async fn local_timeout_skips_program_code() {
    let mut client = FlakyLedger::new(ledger());
    client.unreachable = Some(ALICE.to_string());
    let uri = format!("algorand://app/2345?local=YmFsYW5jZQ&algorandaddress={ALICE}&tealcode");

    let outcome = query_from_uri(&uri, &client).await.unwrap();
    let outcome = outcome.as_application().unwrap();

    assert!(outcome.failure.is_some());
    assert_eq!(outcome.local.len(), 1);
    assert!(outcome.program_code.is_none());
}

#[tokio::test]
async fn missing_local_key_on_opted_in_account() {
    let ledger = ledger();
    let uri = format!("algorand://app/2345?local=bWlzc2luZw&algorandaddress={ALICE}");

    let outcome = query_from_uri(&uri, &ledger).await.unwrap();
    let item = &outcome.as_application().unwrap().local[0];

    assert_eq!(
        item,
        &Err(ItemError::NotFound {
            key: "bWlzc2luZw".into()
        })
    );
    assert!(!item.as_ref().unwrap_err().is_fatal());
}

#[tokio::test]
async fn strict_pairing_rejects_non_adjacent_address() {
    let ledger = ledger();
    let bob = bob();
    let config = QueryConfig::new().with_pairing(LocalPairing::Strict);
    let uri = format!(
        "algorand://app/2345?local=YmFsYW5jZQ&local=YmFsYW5jZQ&algorandaddress={ALICE}&algorandaddress={bob}"
    );

    let err = query_from_uri_with(&uri, &ledger, &config).await.unwrap_err();
    assert!(matches!(err, QueryError::Parse(_)));
}

#[tokio::test]
async fn concurrent_reads_keep_request_order() {
    let mut client = FlakyLedger::new(ledger());
    client.box_delays = vec![(b"algorond".to_vec(), 30), (b"other".to_vec(), 1)];
    let query = ParsedQuery::parse(
        "algorand://app/2345?box=YWxnb3JvbmQ&box=b3RoZXI&box=bm9uZQ",
    )
    .unwrap();
    let config = QueryConfig::new().with_max_concurrent_reads(4);

    let outcome = query_application_with(&query, &client, &config).await.unwrap();

    assert_eq!(outcome.boxes[0].as_ref().unwrap().value, b"first box");
    assert_eq!(outcome.boxes[1].as_ref().unwrap().value, b"second box");
    assert!(outcome.boxes[2].is_err());
}

#[tokio::test]
async fn top_level_transport_error_is_query_error() {
    struct Down;

    impl LedgerClient for Down {
        async fn application_info(&self, _: u64) -> Result<ApplicationInfo, LedgerError> {
            Err(LedgerError::transport("connection refused"))
        }
        async fn box_value(&self, _: u64, _: &[u8]) -> Result<Vec<u8>, LedgerError> {
            Err(LedgerError::transport("connection refused"))
        }
        async fn account_info(&self, _: &Address) -> Result<AccountInfo, LedgerError> {
            Err(LedgerError::transport("connection refused"))
        }
        async fn token_info(&self, _: u64) -> Result<TokenInfo, LedgerError> {
            Err(LedgerError::transport("connection refused"))
        }
    }

    let err = query_from_uri("algorand://asset/5?total", &Down).await.unwrap_err();
    assert!(matches!(err, QueryError::Ledger(LedgerError::Transport { .. })));
}

#[tokio::test]
async fn strict_pairing_rejects_unpaired_local() {
    let ledger = ledger();
    let config = QueryConfig::new().with_pairing(LocalPairing::Strict);
    let uri = format!("algorand://app/2345?local=YQ&local=Yg&algorandaddress={ALICE}");

    let err = query_from_uri_with(&uri, &ledger, &config).await.unwrap_err();
    assert!(matches!(err, QueryError::Parse(_)));

    let outcome = query_from_uri(&uri, &ledger).await.unwrap();
    assert_eq!(outcome.as_application().unwrap().local.len(), 2);
}
