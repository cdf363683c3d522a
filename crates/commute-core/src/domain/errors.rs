//! Errors - エラー型と分類
//!
//! - **StoreError**: location store / result store の失敗
//! - **MatrixError**: 外部 distance-matrix 呼び出しの失敗
//! - **CollectorError**: 収集ランの中での分類（どの段で失敗したか）

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected http status {0}")]
    HttpStatus(u16),

    #[error("response status {status}{}", detail(.message))]
    ResponseStatus {
        status: String,
        message: Option<String>,
    },

    #[error("element status {0}")]
    ElementStatus(String),

    #[error("response has no {0}")]
    Missing(&'static str),

    #[error("malformed response: {0}")]
    Malformed(String),
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// CollectorError は収集ランの段ごとの失敗
///
/// `SourceRead` だけが `run` から返る。残りはペア単位でログに出して数えるだけ。
#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("failed to read locations: {0}")]
    SourceRead(#[source] StoreError),

    #[error("distance request {key} failed: {source}")]
    ExternalCall {
        key: String,
        #[source]
        source: MatrixError,
    },

    #[error("write of {key} failed: {source}")]
    SinkWrite {
        key: String,
        #[source]
        source: StoreError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_status_message_is_optional() {
        let bare = MatrixError::ResponseStatus {
            status: "OVER_QUERY_LIMIT".into(),
            message: None,
        };
        assert_eq!(bare.to_string(), "response status OVER_QUERY_LIMIT");

        let detailed = MatrixError::ResponseStatus {
            status: "REQUEST_DENIED".into(),
            message: Some("The provided API key is invalid.".into()),
        };
        assert_eq!(
            detailed.to_string(),
            "response status REQUEST_DENIED: The provided API key is invalid."
        );
    }

    #[test]
    fn external_call_names_the_pair() {
        let err = CollectorError::ExternalCall {
            key: "A->W".into(),
            source: MatrixError::HttpStatus(500),
        };
        assert_eq!(
            err.to_string(),
            "distance request A->W failed: unexpected http status 500"
        );
    }
}
