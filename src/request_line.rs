//! リクエストラインのパース
//!
//! `METHOD SP TARGET SP HTTP/1.1 CRLF`

use std::fmt;

use crate::error::Error;
use crate::line::find_crlf;

/// 受け付ける唯一のバージョントークン
const VERSION_TOKEN: &str = "HTTP/1.1";

/// リクエストライン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// HTTP メソッド (大文字 ASCII 英字のみ)
    pub method: String,
    /// リクエストターゲット (検証しない)
    pub target: String,
    /// HTTP バージョン (`HTTP/` 以降、常に `1.1`)
    pub version: String,
}

impl fmt::Display for RequestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} HTTP/{}", self.method, self.target, self.version)
    }
}

/// リクエストラインをパース
///
/// - CRLF が見つからない場合は `Ok(None)` (データ不足)
/// - 成功時は `(RequestLine, 消費バイト数)` を返す。消費バイト数は CRLF を含む
pub fn parse_request_line(data: &[u8]) -> Result<Option<(RequestLine, usize)>, Error> {
    let Some(pos) = find_crlf(data) else {
        return Ok(None);
    };
    let line = std::str::from_utf8(&data[..pos])
        .map_err(|e| Error::MalformedRequestLine(format!("invalid UTF-8: {e}")))?;
    let request_line = request_line_from_str(line)?;
    Ok(Some((request_line, pos + 2)))
}

fn request_line_from_str(line: &str) -> Result<RequestLine, Error> {
    let parts: Vec<&str> = line.split(' ').collect();
    if parts.len() != 3 {
        return Err(Error::MalformedRequestLine(format!(
            "expected 3 fields, got {}",
            parts.len()
        )));
    }
    let (method, target, version) = (parts[0], parts[1], parts[2]);
    if target.is_empty() {
        return Err(Error::MalformedRequestLine("empty request-target".to_string()));
    }

    if version != VERSION_TOKEN {
        return Err(Error::UnsupportedVersion(version.to_string()));
    }

    if method.is_empty() || !method.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(Error::UnsupportedMethod(method.to_string()));
    }

    Ok(RequestLine {
        method: method.to_string(),
        target: target.to_string(),
        version: version["HTTP/".len()..].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn kind_of(data: &[u8]) -> ErrorKind {
        parse_request_line(data).unwrap_err().kind()
    }

    #[test]
    fn parse_get() {
        let (line, consumed) = parse_request_line(b"GET /coffee HTTP/1.1\r\nHost: x\r\n")
            .unwrap()
            .unwrap();
        assert_eq!(line.method, "GET");
        assert_eq!(line.target, "/coffee");
        assert_eq!(line.version, "1.1");
        assert_eq!(consumed, 22);
    }

    #[test]
    fn need_more_data() {
        assert!(parse_request_line(b"GET /coffee HTTP/1.1").unwrap().is_none());
        assert!(parse_request_line(b"GET /coffee HTTP/1.1\r").unwrap().is_none());
        assert!(parse_request_line(b"").unwrap().is_none());
    }

    #[test]
    fn field_count() {
        assert_eq!(kind_of(b"/coffee HTTP/1.1\r\n"), ErrorKind::MalformedRequestLine);
        assert_eq!(
            kind_of(b"GET /coffee extra HTTP/1.1\r\n"),
            ErrorKind::MalformedRequestLine
        );
        // 連続した空白は空フィールドになる
        assert_eq!(kind_of(b"GET  / HTTP/1.1\r\n"), ErrorKind::MalformedRequestLine);
        assert_eq!(kind_of(b"GET  HTTP/1.1\r\n"), ErrorKind::MalformedRequestLine);
    }

    #[test]
    fn version() {
        assert_eq!(kind_of(b"GET / HTTP/1.2\r\n"), ErrorKind::UnsupportedVersion);
        assert_eq!(kind_of(b"GET / HTTP/1.0\r\n"), ErrorKind::UnsupportedVersion);
        assert_eq!(kind_of(b"GET / http/1.1\r\n"), ErrorKind::UnsupportedVersion);
        // バージョン検証はメソッド検証より先
        assert_eq!(kind_of(b"/coffee HTTP/1.2 GET\r\n"), ErrorKind::UnsupportedVersion);
    }

    #[test]
    fn method() {
        assert_eq!(kind_of(b"Get / HTTP/1.1\r\n"), ErrorKind::UnsupportedMethod);
        assert_eq!(kind_of(b"M-SEARCH * HTTP/1.1\r\n"), ErrorKind::UnsupportedMethod);
        assert_eq!(kind_of(b" / HTTP/1.1\r\n"), ErrorKind::UnsupportedMethod);
        assert_eq!(kind_of("GÉT / HTTP/1.1\r\n".as_bytes()), ErrorKind::UnsupportedMethod);
    }

    #[test]
    fn invalid_utf8() {
        assert_eq!(kind_of(b"GET /\xff HTTP/1.1\r\n"), ErrorKind::MalformedRequestLine);
    }

    #[test]
    fn display() {
        let (line, _) = parse_request_line(b"POST /coffee HTTP/1.1\r\n")
            .unwrap()
            .unwrap();
        assert_eq!(line.to_string(), "POST /coffee HTTP/1.1");
    }
}
