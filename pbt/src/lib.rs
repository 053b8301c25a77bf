//! PBT テスト共通ユーティリティ

use std::io::{self, Read};

use proptest::prelude::*;

// ========================================
// Strategy 定義
// ========================================

/// HTTP トークン文字 (RFC 9110 Section 5.6.2 の一部)
pub fn token_char() -> impl Strategy<Value = char> {
    prop_oneof![
        prop::char::range('a', 'z'),
        prop::char::range('A', 'Z'),
        prop::char::range('0', '9'),
        Just('-'),
        Just('_'),
        Just('.'),
    ]
}

/// ヘッダー名
pub fn header_name() -> impl Strategy<Value = String> {
    proptest::collection::vec(token_char(), 1..=32).prop_map(|chars| chars.into_iter().collect())
}

/// ヘッダー値 (VCHAR / SP / HTAB)
pub fn header_value() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            prop::char::range('!', '~'),
            Just(' '),
            Just('\t'),
        ],
        0..=64,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// ヘッダーリスト (重複・大文字小文字違いを含みうる)
pub fn headers() -> impl Strategy<Value = Vec<(String, String)>> {
    proptest::collection::vec((header_name(), header_value()), 0..10)
}

/// HTTP メソッド (大文字 ASCII 英字のみ)
pub fn http_method() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("GET".to_string()),
        Just("POST".to_string()),
        Just("PUT".to_string()),
        Just("DELETE".to_string()),
        Just("HEAD".to_string()),
        Just("OPTIONS".to_string()),
        Just("PATCH".to_string()),
        "[A-Z]{1,12}".prop_map(|s| s),
    ]
}

/// リクエストターゲット
pub fn request_target() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("/".to_string()),
        Just("*".to_string()),
        "/[a-zA-Z0-9/_.?=&%-]{1,64}".prop_map(|s| s),
    ]
}

/// リクエストヘッダーブロックを組み立てる
pub fn build_request(method: &str, target: &str, headers: &[(String, String)]) -> String {
    let mut out = format!("{} {} HTTP/1.1\r\n", method, target);
    for (name, value) in headers {
        out.push_str(name);
        out.push_str(": ");
        out.push_str(value);
        out.push_str("\r\n");
    }
    out.push_str("\r\n");
    out
}

// ========================================
// バイトソース
// ========================================

/// 読み取りごとに `sizes` を順番に使ってバイト数を決める reader
///
/// `sizes` を使い切ったら先頭から繰り返す。0 は 1 として扱う。
#[derive(Debug, Clone)]
pub struct ChunkReader {
    data: Vec<u8>,
    sizes: Vec<usize>,
    pos: usize,
    reads: usize,
}

impl ChunkReader {
    pub fn new(data: impl Into<Vec<u8>>, sizes: Vec<usize>) -> Self {
        Self {
            data: data.into(),
            sizes: if sizes.is_empty() { vec![1] } else { sizes },
            pos: 0,
            reads: 0,
        }
    }

    /// 固定サイズで読み取る reader
    pub fn fixed(data: impl Into<Vec<u8>>, size: usize) -> Self {
        Self::new(data, vec![size])
    }

    /// 読み出し済みのバイト数
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl Read for ChunkReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos >= self.data.len() || buf.is_empty() {
            return Ok(0);
        }
        let size = self.sizes[self.reads % self.sizes.len()].max(1);
        self.reads += 1;
        let n = size.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}
