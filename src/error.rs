use std::fmt;

/// リクエストパースエラー
///
/// 構造的なエラーはセッション全体を中断する。再同期は行わない。
#[derive(Debug)]
pub enum Error {
    /// リクエストラインのフィールド数が 3 ではない
    MalformedRequestLine(String),
    /// バージョントークンが `HTTP/1.1` ではない
    UnsupportedVersion(String),
    /// メソッドに大文字 ASCII 英字以外の文字が含まれる
    UnsupportedMethod(String),
    /// ヘッダー行の形式が不正 (コロン直前の空白、キーなし、コロンなし)
    MalformedHeaderFormat(String),
    /// ヘッダーキーに非 ASCII 文字が含まれる
    InvalidHeaderKey(String),
    /// 完了済みのパーサーが再度呼び出された
    ParserAlreadyComplete,
    /// バイトソースの読み取りエラー
    StreamRead(std::io::Error),
    /// 内部整合性違反 (常に実装の不具合)
    InvariantViolation(String),
    /// バッファサイズ超過
    BufferOverflow { size: usize, limit: usize },
    /// ヘッダー数超過
    TooManyHeaders { count: usize, limit: usize },
    /// 行が長すぎる
    LineTooLong { size: usize, limit: usize },
}

/// エラー種別
///
/// `Error` は `std::io::Error` を保持するため比較できない。
/// テストや呼び出し側の分岐にはこちらを使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedRequestLine,
    UnsupportedVersion,
    UnsupportedMethod,
    MalformedHeaderFormat,
    InvalidHeaderKey,
    ParserAlreadyComplete,
    StreamRead,
    InvariantViolation,
    BufferOverflow,
    TooManyHeaders,
    LineTooLong,
}

impl Error {
    /// エラー種別を取得
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedRequestLine(_) => ErrorKind::MalformedRequestLine,
            Error::UnsupportedVersion(_) => ErrorKind::UnsupportedVersion,
            Error::UnsupportedMethod(_) => ErrorKind::UnsupportedMethod,
            Error::MalformedHeaderFormat(_) => ErrorKind::MalformedHeaderFormat,
            Error::InvalidHeaderKey(_) => ErrorKind::InvalidHeaderKey,
            Error::ParserAlreadyComplete => ErrorKind::ParserAlreadyComplete,
            Error::StreamRead(_) => ErrorKind::StreamRead,
            Error::InvariantViolation(_) => ErrorKind::InvariantViolation,
            Error::BufferOverflow { .. } => ErrorKind::BufferOverflow,
            Error::TooManyHeaders { .. } => ErrorKind::TooManyHeaders,
            Error::LineTooLong { .. } => ErrorKind::LineTooLong,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedRequestLine(msg) => write!(f, "malformed request line: {}", msg),
            Error::UnsupportedVersion(version) => {
                write!(f, "unsupported HTTP version: {}", version)
            }
            Error::UnsupportedMethod(method) => write!(f, "unsupported method: {}", method),
            Error::MalformedHeaderFormat(msg) => write!(f, "malformed header format: {}", msg),
            Error::InvalidHeaderKey(key) => write!(f, "invalid header key: {}", key),
            Error::ParserAlreadyComplete => {
                write!(f, "parser already complete, no more data accepted")
            }
            Error::StreamRead(e) => write!(f, "stream read error: {}", e),
            Error::InvariantViolation(msg) => write!(f, "invariant violation: {}", msg),
            Error::BufferOverflow { size, limit } => {
                write!(f, "buffer overflow: {} > {}", size, limit)
            }
            Error::TooManyHeaders { count, limit } => {
                write!(f, "too many headers: {} > {}", count, limit)
            }
            Error::LineTooLong { size, limit } => {
                write!(f, "line too long: {} > {}", size, limit)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::StreamRead(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::StreamRead(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(
            Error::UnsupportedVersion("HTTP/1.2".to_string()).kind(),
            ErrorKind::UnsupportedVersion
        );
        assert_eq!(
            Error::BufferOverflow { size: 2, limit: 1 }.kind(),
            ErrorKind::BufferOverflow
        );
    }

    #[test]
    fn stream_read_has_source() {
        use std::error::Error as _;

        let e = Error::from(std::io::Error::other("reset"));
        assert_eq!(e.kind(), ErrorKind::StreamRead);
        assert!(e.source().is_some());
        assert_eq!(e.to_string(), "stream read error: reset");
    }
}
