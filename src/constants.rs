//! Constants for ARC-82 URI parsing and construction.

/// The URI scheme.
pub const SCHEME: &str = "algorand";

/// Literal prefix every ARC-82 URI must start with.
pub const SCHEME_PREFIX: &str = "algorand:";

/// Marker that introduces an application id.
pub const APP_MARKER: &str = "//app/";

/// Marker that introduces a token (asset) id.
pub const ASSET_MARKER: &str = "//asset/";

/// Exact length of an account address.
pub const ADDRESS_LENGTH: usize = 58;

/// Query key for box storage lookups.
pub const BOX_PARAM: &str = "box";

/// Query key for global state lookups.
pub const GLOBAL_PARAM: &str = "global";

/// Query key for local state lookups.
pub const LOCAL_PARAM: &str = "local";

/// Query key carrying the account address that pairs with `local`.
pub const ADDRESS_PARAM: &str = "algorandaddress";

/// Bare query key requesting application program code.
pub const TEALCODE_PARAM: &str = "tealcode";
