//! ヘッダーブロックのパース
//!
//! 1 回の呼び出しで最大 1 行のヘッダーをパースする。
//! 空行 (CRLF のみ) でヘッダーブロックの終端とする。

use std::collections::HashMap;
use std::collections::hash_map;

use crate::error::Error;
use crate::line::find_crlf;

/// ヘッダーマップ
///
/// キーは小文字化・前後の空白除去済み。同じキーは後勝ちで上書きされる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    inner: HashMap<String, String>,
}

impl HeaderMap {
    /// 空のヘッダーマップを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// ヘッダーを挿入
    ///
    /// キーは小文字化される。既存の値は上書きされ、古い値を返す。
    pub fn insert(&mut self, name: &str, value: impl Into<String>) -> Option<String> {
        self.inner
            .insert(name.trim().to_ascii_lowercase(), value.into())
    }

    /// ヘッダーを取得 (大文字小文字を区別しない)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .get(&name.trim().to_ascii_lowercase())
            .map(String::as_str)
    }

    /// ヘッダーが存在するか確認
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// すべてのヘッダーを走査 (順序は不定)
    pub fn iter(&self) -> hash_map::Iter<'_, String, String> {
        self.inner.iter()
    }
}

impl<'a> IntoIterator for &'a HeaderMap {
    type Item = (&'a String, &'a String);
    type IntoIter = hash_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// ヘッダー行のパース結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderParse {
    /// CRLF が見つからない (データ不足)
    Incomplete,
    /// ヘッダーを 1 つパースした
    Field {
        /// 小文字化済みのキー
        name: String,
        /// 前後の空白除去済みの値
        value: String,
        /// 消費バイト数 (CRLF を含む)
        consumed: usize,
    },
    /// ヘッダーブロックの終端 (空行)
    End {
        /// 消費バイト数 (空行の CRLF)
        consumed: usize,
    },
}

/// キーの前後から `str::trim` で取り除かれる ASCII 空白 (VT を含む)
fn is_trimmed_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// ヘッダー行を 1 つパース
pub fn parse_header(data: &[u8]) -> Result<HeaderParse, Error> {
    let Some(pos) = find_crlf(data) else {
        return Ok(HeaderParse::Incomplete);
    };
    if pos == 0 {
        return Ok(HeaderParse::End { consumed: 2 });
    }

    let line = &data[..pos];
    let colon = line
        .iter()
        .position(|&b| b == b':')
        .ok_or_else(|| Error::MalformedHeaderFormat("missing colon".to_string()))?;
    if colon == 0 {
        return Err(Error::MalformedHeaderFormat("empty name".to_string()));
    }
    // obs-fold との曖昧さを避けるため、コロン直前の空白は拒否する
    if is_trimmed_whitespace(line[colon - 1]) {
        return Err(Error::MalformedHeaderFormat(
            "whitespace before colon".to_string(),
        ));
    }

    let raw_name = &line[..colon];
    if !raw_name.is_ascii() {
        return Err(Error::InvalidHeaderKey(
            String::from_utf8_lossy(raw_name).into_owned(),
        ));
    }
    let name = String::from_utf8_lossy(raw_name)
        .trim()
        .to_ascii_lowercase();
    let value = String::from_utf8_lossy(&line[colon + 1..]).trim().to_string();

    Ok(HeaderParse::Field {
        name,
        value,
        consumed: pos + 2,
    })
}
