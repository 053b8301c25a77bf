//! tokio_incremental_http11 - Tokio integration for incremental_http11
//!
//! tokio を使用した非同期の読み取りループと TCP リスナー。
//!
//! ## Features
//!
//! - `server` - TCP リスナー機能 (デフォルト有効)
//! - `full` - すべての機能を有効化
//!
//! ## 読み取り
//!
//! ```ignore
//! use tokio_incremental_http11::read_request;
//!
//! let mut stream = tokio::net::TcpStream::connect("127.0.0.1:42069").await?;
//! let request = read_request(&mut stream).await?;
//! if request.is_complete() {
//!     println!("{:?}", request.request_line());
//! }
//! ```
//!
//! ## サーバー
//!
//! ```ignore
//! use tokio_incremental_http11::{Request, Server};
//!
//! let server = Server::bind("127.0.0.1:42069").await?;
//! server.serve(|request: Request, peer_addr: std::net::SocketAddr| async move {
//!     println!("{:?} from {}", request.request_line(), peer_addr);
//! }).await?;
//! ```

pub mod error;
pub mod reader;
#[cfg(feature = "server")]
pub mod server;

pub use error::{Error, Result};
pub use reader::{ReadOptions, read_request, read_request_with};
#[cfg(feature = "server")]
pub use server::{Handler, Server};

// incremental_http11 の型を re-export
pub use incremental_http11::{HeaderMap, ParserLimits, ParserState, Request, RequestLine};
