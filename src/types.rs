//! Wire types for the Terra LCD's legacy amino JSON encoding.
//!
//! The LCD publishes no machine-readable schema, so these mirror the JSON
//! shapes the node actually emits. Legacy amino encodes `u64`-sized integers
//! as JSON strings; the `string_u64`/`string_u128` serde helpers below cover
//! that convention.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod string_u64 {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

mod string_u128 {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Coins
// ---------------------------------------------------------------------------

/// A whole-number coin amount, e.g. `{"denom": "uluna", "amount": "1000"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    #[serde(with = "string_u128")]
    pub amount: u128,
}

/// A decimal coin amount, used for gas prices, e.g.
/// `{"denom": "uluna", "amount": "0.015"}`.
///
/// The amount is kept as the node's decimal string; amino decimals carry
/// 18 fractional digits and do not round-trip through `f64`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecCoin {
    pub denom: String,
    pub amount: String,
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// An amino message envelope: `{"type": "bank/MsgSend", "value": {...}}`.
///
/// Message payloads are chain-module specific, so the value is kept as raw
/// JSON rather than enumerating every module's message set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Msg {
    #[serde(rename = "type")]
    pub type_: String,
    pub value: serde_json::Value,
}

impl Msg {
    pub fn new(type_: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            type_: type_.into(),
            value,
        }
    }
}

/// Fee paid for a transaction: coin amounts plus a gas limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdFee {
    pub amount: Vec<Coin>,
    #[serde(with = "string_u64")]
    pub gas: u64,
}

/// A tendermint/secp256k1 public key in its amino envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubKey {
    #[serde(rename = "type")]
    pub type_: String,
    /// Base64-encoded key bytes.
    pub value: String,
}

/// A signature over a [`StdSignMsg`], paired with the signing key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdSignature {
    pub pub_key: Option<PubKey>,
    /// Base64-encoded signature bytes.
    pub signature: String,
}

/// A signed transaction in the legacy amino format, ready to broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdTx {
    pub msg: Vec<Msg>,
    pub fee: StdFee,
    pub signatures: Vec<StdSignature>,
    #[serde(default)]
    pub memo: String,
}

/// The signable view of a transaction: the fields a wallet commits to when
/// producing a [`StdSignature`]. Fee estimation consumes its identity fields
/// and messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdSignMsg {
    pub chain_id: String,
    #[serde(with = "string_u64")]
    pub account_number: u64,
    #[serde(with = "string_u64")]
    pub sequence: u64,
    pub fee: StdFee,
    pub msgs: Vec<Msg>,
    #[serde(default)]
    pub memo: String,
}

/// Controls whether the node waits for block inclusion before responding
/// to a broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastMode {
    /// Wait until the transaction is included in a block.
    Block,
    /// Wait only for the mempool's CheckTx result.
    Sync,
    /// Return immediately after the node receives the transaction.
    Async,
}

/// Request body for `POST /txs`.
#[derive(Debug, Clone, Serialize)]
pub struct BroadcastReq {
    pub tx: StdTx,
    pub mode: BroadcastMode,
}

// ---------------------------------------------------------------------------
// Transaction results
// ---------------------------------------------------------------------------

/// A single key/value attribute within a [`StringEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// An ABCI event emitted during message execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringEvent {
    #[serde(rename = "type")]
    pub type_: String,
    pub attributes: Vec<Attribute>,
}

/// Execution log for one message within a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbciMessageLog {
    #[serde(default)]
    pub msg_index: u32,
    #[serde(default)]
    pub log: String,
    #[serde(default)]
    pub events: Vec<StringEvent>,
}

/// The node's view of an executed (or rejected) transaction.
///
/// `code` is the ABCI result code: zero means the transaction succeeded,
/// anything else is a chain-level failure explained by `raw_log`. Fields the
/// node omits for a given endpoint (`timestamp` and the echoed `tx` are
/// absent from broadcast responses) default to empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxResponse {
    #[serde(with = "string_u64")]
    pub height: u64,
    pub txhash: String,
    #[serde(default)]
    pub codespace: String,
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub raw_log: String,
    #[serde(default)]
    pub logs: Vec<AbciMessageLog>,
    #[serde(default)]
    pub info: String,
    #[serde(default, with = "string_u64")]
    pub gas_wanted: u64,
    #[serde(default, with = "string_u64")]
    pub gas_used: u64,
    /// The original transaction in its amino envelope, when the endpoint
    /// echoes it back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl TxResponse {
    /// Whether the chain executed the transaction successfully.
    pub fn succeeded(&self) -> bool {
        self.code == 0
    }
}

/// Response body for `GET /txs`: one page of matching transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxSearchResponse {
    #[serde(with = "string_u64")]
    pub total_count: u64,
    #[serde(with = "string_u64")]
    pub count: u64,
    #[serde(with = "string_u64")]
    pub page_number: u64,
    #[serde(with = "string_u64")]
    pub page_total: u64,
    #[serde(with = "string_u64")]
    pub limit: u64,
    pub txs: Vec<TxResponse>,
}

// ---------------------------------------------------------------------------
// Fee estimation
// ---------------------------------------------------------------------------

/// The `base_req` block the LCD's tx-building endpoints expect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseReq {
    pub from: String,
    #[serde(default)]
    pub memo: String,
    pub chain_id: String,
    #[serde(with = "string_u64")]
    pub account_number: u64,
    #[serde(with = "string_u64")]
    pub sequence: u64,
    #[serde(default)]
    pub fees: Vec<Coin>,
    #[serde(default)]
    pub gas_prices: Vec<DecCoin>,
    pub gas: String,
    pub gas_adjustment: String,
    pub simulate: bool,
}

/// Request body for `POST /txs/estimate_fee`.
#[derive(Debug, Clone, Serialize)]
pub struct EstimateFeeRequest {
    pub base_req: BaseReq,
    pub msgs: Vec<Msg>,
}

impl EstimateFeeRequest {
    /// Build an estimation request from a signable message.
    ///
    /// `gas` is set to `"auto"` so the node simulates the messages and
    /// scales the result by `gas_adjustment` (a decimal string such as
    /// `"1.4"`), pricing it with `gas_prices`.
    pub fn from_sign_msg(
        from: impl Into<String>,
        msg: &StdSignMsg,
        gas_adjustment: impl Into<String>,
        gas_prices: Vec<DecCoin>,
    ) -> Self {
        Self {
            base_req: BaseReq {
                from: from.into(),
                memo: msg.memo.clone(),
                chain_id: msg.chain_id.clone(),
                account_number: msg.account_number,
                sequence: msg.sequence,
                fees: Vec::new(),
                gas_prices,
                gas: "auto".to_string(),
                gas_adjustment: gas_adjustment.into(),
                simulate: false,
            },
            msgs: msg.msgs.clone(),
        }
    }
}

/// Response body for `POST /txs/estimate_fee`.
#[derive(Debug, Clone, Deserialize)]
pub struct EstimateFeeResponse {
    #[serde(with = "string_u64")]
    pub height: u64,
    pub result: EstimateFeeResult,
}

/// Inner `result` object of an estimation response.
#[derive(Debug, Clone, Deserialize)]
pub struct EstimateFeeResult {
    pub fee: StdFee,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
