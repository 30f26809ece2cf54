//! Async HTTP client for the Terra LCD REST API.

use crate::query::TxSearchRequest;
use crate::types::*;
use reqwest::{Client, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;

/// Error body the LCD returns with non-2xx statuses: `{"error": "..."}`.
#[derive(Debug, serde::Deserialize)]
struct LcdErrorBody {
    error: String,
}

/// Client error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// The node answered with a non-2xx status. `message` is the `error`
    /// field of the LCD's JSON error body, or the raw body when it isn't
    /// JSON.
    #[error("LCD error {status}: {message}")]
    Lcd { status: StatusCode, message: String },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The broadcast was accepted over HTTP but the chain rejected the
    /// transaction (non-zero ABCI code).
    #[error("transaction failed with code {code} in {codespace:?}: {raw_log}")]
    Tx {
        code: u32,
        codespace: String,
        raw_log: String,
    },
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// How long to let the queried node catch up after a broadcast.
pub const DEFAULT_BROADCAST_WAIT: Duration = Duration::from_secs(1);

/// Async client for the Terra LCD transaction endpoints.
///
/// # Example
///
/// ```no_run
/// use terra_lcd_client::LcdClient;
///
/// #[tokio::main]
/// async fn main() -> terra_lcd_client::client::Result<()> {
///     let client = LcdClient::columbus();
///     let tx = client.tx_by_hash("B6A...").await?;
///     println!("landed at height {}", tx.height);
///     Ok(())
/// }
/// ```
pub struct LcdClient {
    client: Client,
    url: String,
    broadcast_wait: Duration,
}

impl LcdClient {
    /// Create a new client with a custom LCD URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            broadcast_wait: DEFAULT_BROADCAST_WAIT,
        }
    }

    /// Create a client for the Columbus mainnet LCD.
    pub fn columbus() -> Self {
        Self::new("https://lcd.terra.dev")
    }

    /// Create a client for the Bombay testnet LCD.
    pub fn bombay() -> Self {
        Self::new("https://bombay-lcd.terra.dev")
    }

    /// Create a client for local development (localhost:1317).
    pub fn local() -> Self {
        Self::new("http://localhost:1317")
    }

    /// Override the pause [`broadcast_tx`](Self::broadcast_tx) takes before
    /// returning. `Duration::ZERO` disables it.
    pub fn with_broadcast_wait(mut self, wait: Duration) -> Self {
        self.broadcast_wait = wait;
        self
    }

    async fn get<R: DeserializeOwned>(&self, path: &str, query: &[(String, String)]) -> Result<R> {
        let response = self
            .client
            .get(format!("{}{}", self.url, path))
            .query(query)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let response = self
            .client
            .post(format!("{}{}", self.url, path))
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn decode<R: DeserializeOwned>(response: reqwest::Response) -> Result<R> {
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<LcdErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or(text);
            return Err(Error::Lcd { status, message });
        }
        Ok(serde_json::from_str(&text)?)
    }

    // ── Transactions ─────────────────────────────────────────────

    /// Looks up a transaction by its hex-encoded hash.
    pub async fn tx_by_hash(&self, tx_hash: &str) -> Result<TxResponse> {
        self.get(&format!("/txs/{tx_hash}"), &[]).await
    }

    /// Searches transactions by event filters, paginated.
    pub async fn txs(&self, request: &TxSearchRequest) -> Result<TxSearchResponse> {
        self.get("/txs", &request.to_query_pairs()).await
    }

    /// Broadcasts a signed transaction.
    ///
    /// After the node responds, pauses for the configured broadcast wait:
    /// the LCD's query endpoints lag block inclusion, so an immediate
    /// re-query of the fresh transaction would miss it. Then checks the
    /// ABCI result code and returns [`Error::Tx`] if the chain rejected
    /// the transaction.
    pub async fn broadcast_tx(&self, tx: StdTx, mode: BroadcastMode) -> Result<TxResponse> {
        let request = BroadcastReq { tx, mode };
        let response: TxResponse = self.post("/txs", &request).await?;

        tokio::time::sleep(self.broadcast_wait).await;

        if !response.succeeded() {
            return Err(Error::Tx {
                code: response.code,
                codespace: response.codespace,
                raw_log: response.raw_log,
            });
        }
        Ok(response)
    }

    /// Estimates the fee for a set of messages by simulating them on the
    /// node, returning the priced [`StdFee`].
    pub async fn estimate_fee(&self, request: &EstimateFeeRequest) -> Result<StdFee> {
        let response: EstimateFeeResponse = self.post("/txs/estimate_fee", request).await?;
        Ok(response.result.fee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> LcdClient {
        LcdClient::new(server.uri()).with_broadcast_wait(Duration::ZERO)
    }

    #[test]
    fn client_creation() {
        let client = LcdClient::columbus();
        assert_eq!(client.url, "https://lcd.terra.dev");

        let client = LcdClient::bombay();
        assert_eq!(client.url, "https://bombay-lcd.terra.dev");

        let client = LcdClient::new("https://custom-lcd.example.com");
        assert_eq!(client.url, "https://custom-lcd.example.com");
        assert_eq!(client.broadcast_wait, DEFAULT_BROADCAST_WAIT);
    }

    #[tokio::test]
    async fn tx_by_hash_hits_txs_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/txs/ABC123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "height": "4816400",
                "txhash": "ABC123",
                "gas_wanted": "200000",
                "gas_used": "104322"
            })))
            .mount(&server)
            .await;

        let tx = test_client(&server).tx_by_hash("ABC123").await.unwrap();
        assert_eq!(tx.height, 4_816_400);
        assert_eq!(tx.txhash, "ABC123");
    }

    #[tokio::test]
    async fn tx_by_hash_unknown_hash_is_lcd_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/txs/DEADBEEF"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"error": "tx not found"})),
            )
            .mount(&server)
            .await;

        let err = test_client(&server)
            .tx_by_hash("DEADBEEF")
            .await
            .unwrap_err();
        match err {
            Error::Lcd { status, message } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(message, "tx not found");
            }
            other => panic!("expected Lcd error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn lcd_error_falls_back_to_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/txs/AAAA"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&server)
            .await;

        let err = test_client(&server).tx_by_hash("AAAA").await.unwrap_err();
        match err {
            Error::Lcd { message, .. } => assert_eq!(message, "internal error"),
            other => panic!("expected Lcd error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn txs_sends_filters_and_pagination() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/txs"))
            .and(query_param("message.action", "send"))
            .and(query_param("page", "2"))
            .and(query_param("limit", "30"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": "31",
                "count": "1",
                "page_number": "2",
                "page_total": "2",
                "limit": "30",
                "txs": [{"height": "100", "txhash": "AA"}]
            })))
            .mount(&server)
            .await;

        let request = TxSearchRequest::new().action("send").page(2).limit(30);
        let page = test_client(&server).txs(&request).await.unwrap();
        assert_eq!(page.total_count, 31);
        assert_eq!(page.txs.len(), 1);
    }

    fn sample_tx() -> StdTx {
        StdTx {
            msg: vec![Msg::new("bank/MsgSend", json!({"amount": []}))],
            fee: StdFee {
                amount: vec![Coin::uluna(1500)],
                gas: 200_000,
            },
            signatures: Vec::new(),
            memo: String::new(),
        }
    }

    #[tokio::test]
    async fn broadcast_tx_posts_tx_and_mode() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/txs"))
            .and(body_partial_json(json!({"mode": "block"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "height": "4816401",
                "txhash": "BCAST1",
                "raw_log": "[]",
                "gas_wanted": "200000",
                "gas_used": "104322"
            })))
            .mount(&server)
            .await;

        let tx = test_client(&server)
            .broadcast_tx(sample_tx(), BroadcastMode::Block)
            .await
            .unwrap();
        assert!(tx.succeeded());
        assert_eq!(tx.txhash, "BCAST1");
    }

    #[tokio::test]
    async fn broadcast_tx_chain_rejection_is_tx_error() {
        // HTTP 200 with a non-zero ABCI code is still a failure.
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/txs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "height": "0",
                "txhash": "BCAST2",
                "codespace": "sdk",
                "code": 4,
                "raw_log": "signature verification failed"
            })))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .broadcast_tx(sample_tx(), BroadcastMode::Sync)
            .await
            .unwrap_err();
        match err {
            Error::Tx {
                code,
                codespace,
                raw_log,
            } => {
                assert_eq!(code, 4);
                assert_eq!(codespace, "sdk");
                assert_eq!(raw_log, "signature verification failed");
            }
            other => panic!("expected Tx error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn estimate_fee_returns_inner_fee() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/txs/estimate_fee"))
            .and(body_partial_json(json!({"base_req": {"gas": "auto"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "height": "4816400",
                "result": {
                    "fee": {
                        "amount": [{"denom": "uluna", "amount": "2835"}],
                        "gas": "189000"
                    }
                }
            })))
            .mount(&server)
            .await;

        let sign_msg = StdSignMsg {
            chain_id: "columbus-4".to_string(),
            account_number: 118,
            sequence: 9,
            fee: StdFee {
                amount: Vec::new(),
                gas: 0,
            },
            msgs: vec![Msg::new("bank/MsgSend", json!({}))],
            memo: String::new(),
        };
        let request = EstimateFeeRequest::from_sign_msg(
            "terra1abc",
            &sign_msg,
            "1.4",
            vec![DecCoin::new("uluna", "0.015")],
        );

        let fee = test_client(&server).estimate_fee(&request).await.unwrap();
        assert_eq!(fee.gas, 189_000);
        assert_eq!(fee.amount, vec![Coin::uluna(2835)]);
    }

    #[tokio::test]
    async fn malformed_body_is_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/txs/BBBB"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = test_client(&server).tx_by_hash("BBBB").await.unwrap_err();
        assert!(matches!(err, Error::Json(_)), "got {err:?}");
    }
}
