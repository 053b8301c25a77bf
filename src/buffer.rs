//! 受信バッファ
//!
//! 読み取り済みだがパーサーがまだ消費していないバイトを保持する。

use crate::error::Error;

/// 受信バッファ
///
/// `storage.len()` が容量、`filled` が保持しているバイト数。
/// 容量は倍々で拡張され、縮小しない。
#[derive(Debug, Clone)]
pub struct ByteAccumulator {
    storage: Vec<u8>,
    filled: usize,
    max_size: usize,
}

impl ByteAccumulator {
    /// 初期容量と最大サイズを指定して作成
    ///
    /// 初期容量 0 は 1 として扱う。
    pub fn new(initial_capacity: usize, max_size: usize) -> Self {
        let initial_capacity = initial_capacity.max(1).min(max_size.max(1));
        Self {
            storage: vec![0; initial_capacity],
            filled: 0,
            max_size,
        }
    }

    /// 保持しているバイト数
    pub fn len(&self) -> usize {
        self.filled
    }

    /// 保持しているバイトがないか
    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// 現在の容量
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// 未消費のバイト列
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage[..self.filled]
    }

    /// 容量を倍にする
    fn grow(&mut self) -> Result<(), Error> {
        let capacity = self.storage.len();
        if capacity >= self.max_size {
            return Err(Error::BufferOverflow {
                size: capacity.saturating_add(1),
                limit: self.max_size,
            });
        }
        let new_capacity = capacity.saturating_mul(2).min(self.max_size);
        self.storage.resize(new_capacity, 0);
        Ok(())
    }

    /// データを末尾に追加
    ///
    /// 空き容量が足りなければ書き込み前に拡張する。
    pub fn append(&mut self, data: &[u8]) -> Result<(), Error> {
        let required = self
            .filled
            .checked_add(data.len())
            .filter(|size| *size <= self.max_size)
            .ok_or(Error::BufferOverflow {
                size: self.filled.saturating_add(data.len()),
                limit: self.max_size,
            })?;
        while self.storage.len() < required {
            self.grow()?;
        }
        self.storage[self.filled..required].copy_from_slice(data);
        self.filled = required;
        Ok(())
    }

    /// 空き領域を取得
    ///
    /// 空きがなければ先に拡張する。読み取りの後は `commit()` を呼ぶ。
    /// 最大サイズに達していればエラーを返す。
    pub fn unfilled_mut(&mut self) -> Result<&mut [u8], Error> {
        if self.filled >= self.max_size {
            return Err(Error::BufferOverflow {
                size: self.filled.saturating_add(1),
                limit: self.max_size,
            });
        }
        if self.filled == self.storage.len() {
            self.grow()?;
        }
        Ok(&mut self.storage[self.filled..])
    }

    /// `unfilled_mut()` に書き込んだ `n` バイトを保持済みにする
    pub fn commit(&mut self, n: usize) -> Result<(), Error> {
        let free = self.storage.len() - self.filled;
        if n > free {
            return Err(Error::InvariantViolation(format!(
                "commit {} bytes with only {} bytes free",
                n, free
            )));
        }
        self.filled += n;
        Ok(())
    }

    /// 先頭 `n` バイトを消費し、残りを先頭に詰める
    pub fn consume(&mut self, n: usize) -> Result<(), Error> {
        if n > self.filled {
            return Err(Error::InvariantViolation(format!(
                "consume {} bytes with only {} bytes held",
                n, self.filled
            )));
        }
        self.storage.copy_within(n..self.filled, 0);
        self.filled -= n;
        Ok(())
    }
}
