//! # incremental_http11
//!
//! 任意の境界で分割されて届くバイト列から HTTP/1.1 リクエストヘッダーを組み立てる
//! インクリメンタルパーサー (Sans I/O)
//!
//! ## 特徴
//!
//! - **依存なし**: 標準ライブラリのみ使用 (`log` feature を除く)
//! - **インクリメンタル**: 1 バイトずつ届いても、一度に届いても同じ結果になる
//! - **読みすぎない**: ヘッダーブロックの終端以降のバイトは消費しない
//!
//! ## 対象外
//!
//! - ボディのパース
//! - HTTP/1.1 以外のバージョン、chunked 転送エンコーディング、obs-fold
//!
//! ## 使い方
//!
//! ### 同期読み取り
//!
//! ```rust
//! use incremental_http11::request_from_reader;
//!
//! let data = b"GET /coffee HTTP/1.1\r\nHost: localhost:42069\r\nAccept: */*\r\n\r\n";
//! let request = request_from_reader(&data[..]).unwrap();
//!
//! assert!(request.is_complete());
//! assert_eq!(request.method(), Some("GET"));
//! assert_eq!(request.version(), Some("1.1"));
//! assert_eq!(request.header("Accept"), Some("*/*"));
//! ```
//!
//! ### Sans I/O
//!
//! ```rust
//! use incremental_http11::RequestParser;
//!
//! let mut parser = RequestParser::new();
//! // 受信データを feed...
//! for chunk in [&b"GET / HT"[..], b"TP/1.1\r\n", b"\r\n"] {
//!     if parser.feed(chunk).unwrap() {
//!         break;
//!     }
//! }
//! let request = parser.finish();
//! assert!(request.is_complete());
//! ```

mod buffer;
mod driver;
mod error;
mod headers;
mod limits;
mod line;
mod observer;
mod parser;
mod request;
mod request_line;

pub use buffer::ByteAccumulator;
pub use driver::{request_from_reader, request_from_reader_with};
pub use error::{Error, ErrorKind};
pub use headers::{HeaderMap, HeaderParse, parse_header};
pub use limits::ParserLimits;
#[cfg(feature = "log")]
pub use observer::LogObserver;
pub use observer::{NoopObserver, ParseEvent, ParseObserver};
pub use parser::RequestParser;
pub use request::{ParserState, Request};
pub use request_line::{RequestLine, parse_request_line};
