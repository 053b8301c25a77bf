//! tokio-incremental-http11 エラー型

use std::fmt;

/// tokio-incremental-http11 エラー
#[derive(Debug)]
pub enum Error {
    /// I/O エラー (bind / accept)
    Io(std::io::Error),
    /// HTTP パースエラー (読み取りエラーは `StreamRead` としてここに入る)
    Http(incremental_http11::Error),
    /// 読み取りタイムアウト
    Timeout,
    /// リクエストヘッダーの途中で接続が閉じられた
    ConnectionClosed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Http(e) => write!(f, "HTTP error: {}", e),
            Error::Timeout => write!(f, "read timeout"),
            Error::ConnectionClosed => write!(f, "connection closed before end of headers"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<incremental_http11::Error> for Error {
    fn from(e: incremental_http11::Error) -> Self {
        Error::Http(e)
    }
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Error::Timeout
    }
}

/// Result 型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
