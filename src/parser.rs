//! リクエストパーサー (Sans I/O)
//!
//! 受信バッファとパース状態機械を組み合わせる。
//! I/O は行わないので、同期・非同期どちらの読み取りループからも使える。
//!
//! ```rust
//! use incremental_http11::RequestParser;
//!
//! let mut parser = RequestParser::new();
//! assert!(!parser.feed(b"GET /coffee HTTP/1.1\r\nHo").unwrap());
//! assert!(parser.feed(b"st: localhost:42069\r\n\r\n").unwrap());
//!
//! let request = parser.finish();
//! assert_eq!(request.method(), Some("GET"));
//! assert_eq!(request.header("host"), Some("localhost:42069"));
//! ```

use crate::buffer::ByteAccumulator;
use crate::error::Error;
use crate::limits::ParserLimits;
use crate::observer::{NoopObserver, ParseEvent, ParseObserver};
use crate::request::Request;

/// リクエストパーサー
///
/// 1 接続 (1 バイトソース) につき 1 つ作成する。セッション間で状態は共有しない。
///
/// # 型パラメータ
///
/// - `O`: パースイベントの受け取り手。デフォルトは `NoopObserver`
#[derive(Debug)]
pub struct RequestParser<O: ParseObserver = NoopObserver> {
    buf: ByteAccumulator,
    request: Request,
    limits: ParserLimits,
    observer: O,
}

impl Default for RequestParser<NoopObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestParser<NoopObserver> {
    /// 新しいパーサーを作成
    pub fn new() -> Self {
        Self::with_limits(ParserLimits::default())
    }

    /// 制限付きでパーサーを作成
    pub fn with_limits(limits: ParserLimits) -> Self {
        Self::with_limits_and_observer(limits, NoopObserver)
    }
}

impl<O: ParseObserver> RequestParser<O> {
    /// observer 付きでパーサーを作成
    pub fn with_observer(observer: O) -> Self {
        Self::with_limits_and_observer(ParserLimits::default(), observer)
    }

    /// 制限と observer を指定してパーサーを作成
    pub fn with_limits_and_observer(limits: ParserLimits, observer: O) -> Self {
        Self {
            buf: ByteAccumulator::new(limits.initial_buffer_capacity, limits.max_buffer_size),
            request: Request::new(),
            limits,
            observer,
        }
    }

    /// 制限設定を取得
    pub fn limits(&self) -> &ParserLimits {
        &self.limits
    }

    /// パース途中のリクエストを取得
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// 終端状態か
    pub fn is_done(&self) -> bool {
        self.request.is_done()
    }

    /// バッファの未消費データを取得
    ///
    /// 完了後はヘッダーブロックに続くバイト (未パースのボディ) になる。
    pub fn remaining(&self) -> &[u8] {
        self.buf.as_bytes()
    }

    /// 現在のバッファ容量
    pub fn buffer_capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// データを投入してパースを進める
    ///
    /// 終端状態に到達したら `true` を返す。
    pub fn feed(&mut self, data: &[u8]) -> Result<bool, Error> {
        if self.request.is_done() {
            return Err(Error::ParserAlreadyComplete);
        }
        let before = self.buf.capacity();
        self.buf.append(data)?;
        self.notify_growth(before);
        self.advance()
    }

    /// 読み取り用の空き領域を取得
    ///
    /// 空きがなければ倍に拡張する。書き込んだら `commit()` を呼ぶ。
    pub fn unfilled_mut(&mut self) -> Result<&mut [u8], Error> {
        let before = self.buf.capacity();
        // 拡張の通知のため、先に空き領域を確保しておく
        self.buf.unfilled_mut()?;
        self.notify_growth(before);
        self.buf.unfilled_mut()
    }

    /// `unfilled_mut()` に書き込んだ `n` バイトを確定してパースを進める
    ///
    /// 終端状態に到達したら `true` を返す。
    pub fn commit(&mut self, n: usize) -> Result<bool, Error> {
        if self.request.is_done() {
            return Err(Error::ParserAlreadyComplete);
        }
        self.buf.commit(n)?;
        self.advance()
    }

    /// パースを終了してリクエストを取り出す
    ///
    /// 終端状態に到達していない場合は強制的に `Done` にする。
    /// その場合 `Request::is_complete()` は false になる。
    pub fn finish(mut self) -> Request {
        if !self.request.is_done() {
            self.observer.on_event(ParseEvent::EndOfStream {
                state: self.request.state(),
                buffered: self.buf.len(),
            });
            self.request.force_done();
        }
        self.request
    }

    fn advance(&mut self) -> Result<bool, Error> {
        let n = self
            .request
            .parse_with(self.buf.as_bytes(), &self.limits, &mut self.observer)?;
        self.buf.consume(n)?;
        Ok(self.request.is_done())
    }

    fn notify_growth(&mut self, before: usize) {
        let after = self.buf.capacity();
        if after != before {
            self.observer.on_event(ParseEvent::BufferGrown {
                from: before,
                to: after,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::observer::RecordingObserver;
    use crate::request::ParserState;

    #[test]
    fn feed_byte_by_byte() {
        let data = b"GET / HTTP/1.1\r\nHost: localhost:42069\r\n\r\n";
        let mut parser = RequestParser::new();
        for (i, b) in data.iter().enumerate() {
            let done = parser.feed(std::slice::from_ref(b)).unwrap();
            assert_eq!(done, i == data.len() - 1);
        }
        assert!(parser.remaining().is_empty());
        let request = parser.finish();
        assert!(request.is_complete());
        assert_eq!(request.header("Host"), Some("localhost:42069"));
    }

    #[test]
    fn buffer_holds_only_unconsumed_bytes() {
        let mut parser = RequestParser::new();
        parser.feed(b"GET / HTTP/1.1\r\nHost: loc").unwrap();
        assert_eq!(parser.remaining(), b"Host: loc");
        assert_eq!(parser.request().state(), ParserState::AwaitingHeaders);
    }

    #[test]
    fn feed_after_done() {
        let mut parser = RequestParser::new();
        assert!(parser.feed(b"GET / HTTP/1.1\r\n\r\n").unwrap());
        let err = parser.feed(b"x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParserAlreadyComplete);
        let err = parser.commit(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParserAlreadyComplete);
    }

    #[test]
    fn body_bytes_remain() {
        let mut parser = RequestParser::new();
        assert!(
            parser
                .feed(b"POST /coffee HTTP/1.1\r\nContent-Length: 22\r\n\r\n{\"flavor\":\"dark mode\"}")
                .unwrap()
        );
        assert_eq!(parser.remaining(), b"{\"flavor\":\"dark mode\"}");
    }

    #[test]
    fn finish_before_done() {
        let mut parser = RequestParser::new();
        parser.feed(b"GET / HTTP/1.1\r\nHost: x\r\n").unwrap();
        let request = parser.finish();
        assert!(request.is_done());
        assert!(!request.is_complete());
        assert_eq!(request.method(), Some("GET"));
        assert_eq!(request.header("host"), Some("x"));
    }

    #[test]
    fn unfilled_and_commit() {
        let mut parser = RequestParser::new();
        let data = b"GET / HTTP/1.1\r\n\r\n";
        let mut offset = 0;
        while !parser.is_done() {
            let free = parser.unfilled_mut().unwrap();
            let n = free.len().min(data.len() - offset);
            free[..n].copy_from_slice(&data[offset..offset + n]);
            offset += n;
            parser.commit(n).unwrap();
        }
        assert_eq!(offset, data.len());
        assert!(parser.finish().is_complete());
    }

    #[test]
    fn growth_is_reported() {
        let mut observer = RecordingObserver::default();
        let mut parser = RequestParser::with_observer(&mut observer);
        parser.feed(b"GET /0123456789 HTTP/1.1").unwrap();
        assert_eq!(parser.buffer_capacity(), 32);
        drop(parser);
        assert_eq!(observer.events[0], "BufferGrown { from: 8, to: 32 }");
    }

    #[test]
    fn buffer_limit() {
        let limits = ParserLimits {
            max_buffer_size: 16,
            ..ParserLimits::default()
        };
        let mut parser = RequestParser::with_limits(limits);
        let err = parser.feed(b"GET /0123456789 HTTP/1.1\r\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BufferOverflow);
    }
}
