//! TCP リスナー
//!
//! 接続ごとに tokio タスクを起動し、リクエストヘッダーを 1 つ読み取ってハンドラーに渡す。
//! タスク間で共有するのはハンドラーと設定だけで、パーサーは接続ごとに独立している。
//!
//! ## 使い方
//!
//! ```ignore
//! use tokio_incremental_http11::{Request, Server};
//!
//! let server = Server::bind("127.0.0.1:42069").await?;
//! server
//!     .serve(|request: Request, peer_addr: SocketAddr| async move {
//!         println!("{:?} from {}", request.request_line(), peer_addr);
//!     })
//!     .await?;
//! ```

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use incremental_http11::{LogObserver, ParserLimits, Request};
use tokio::net::{TcpListener, TcpStream};

use crate::error::{Error, Result};
use crate::reader::{ReadOptions, read_request_with};

/// パースイベントのログターゲット
const PARSER_LOG_TARGET: &str = "tokio_incremental_http11::parser";

/// リクエストハンドラー
pub trait Handler: Send + Sync + 'static {
    /// パース済みのリクエストを受け取る
    fn handle(&self, request: Request, peer_addr: SocketAddr) -> impl Future<Output = ()> + Send;
}

/// 関数からハンドラーを作成
impl<F, Fut> Handler for F
where
    F: Fn(Request, SocketAddr) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send,
{
    fn handle(&self, request: Request, peer_addr: SocketAddr) -> impl Future<Output = ()> + Send {
        (self)(request, peer_addr)
    }
}

/// TCP リスナー
pub struct Server {
    listener: TcpListener,
    read_timeout: Duration,
    limits: ParserLimits,
}

impl Server {
    /// 指定アドレスにバインド
    pub async fn bind(addr: &str) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            read_timeout: Duration::from_secs(30),
            limits: ParserLimits::default(),
        })
    }

    /// 1 回の読み取りのタイムアウトを設定
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// パーサーの制限を設定
    pub fn limits(mut self, limits: ParserLimits) -> Self {
        self.limits = limits;
        self
    }

    /// ローカルアドレスを取得
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    fn read_options(&self) -> ReadOptions {
        ReadOptions {
            limits: self.limits.clone(),
            read_timeout: Some(self.read_timeout),
        }
    }

    /// サーバーを起動
    ///
    /// accept の失敗はログに残して継続する。
    pub async fn serve<H: Handler>(self, handler: H) -> Result<()> {
        let options = Arc::new(self.read_options());
        let handler = Arc::new(handler);

        loop {
            let (stream, peer_addr) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    log::warn!("error accepting a connection: {}", e);
                    continue;
                }
            };
            let options = options.clone();
            let handler = handler.clone();

            tokio::spawn(async move {
                if let Err(e) = handle_connection(stream, peer_addr, options, handler).await {
                    log::warn!("error handling request from {}: {}", peer_addr, e);
                }
            });
        }
    }

    /// 単一の接続を処理 (テスト用)
    pub async fn handle_one<H: Handler>(self, handler: H) -> Result<()> {
        let (stream, peer_addr) = self.listener.accept().await?;
        let options = Arc::new(self.read_options());
        handle_connection(stream, peer_addr, options, Arc::new(handler)).await
    }
}

/// 接続を処理
///
/// リクエストヘッダーを 1 つ読み取ってハンドラーに渡す。ボディは読まない。
async fn handle_connection<H: Handler>(
    mut stream: TcpStream,
    peer_addr: SocketAddr,
    options: Arc<ReadOptions>,
    handler: Arc<H>,
) -> Result<()> {
    log::debug!("connection from {}", peer_addr);

    let observer = LogObserver::with_target(PARSER_LOG_TARGET);
    let request = read_request_with(&mut stream, &options, observer).await?;
    if !request.is_complete() {
        return Err(Error::ConnectionClosed);
    }

    handler.handle(request, peer_addr).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_server_bind() {
        let server = Server::bind("127.0.0.1:0").await.unwrap();
        let addr = server.local_addr().unwrap();
        assert!(addr.port() > 0);
    }

    #[tokio::test]
    async fn handle_one_request() {
        let server = Server::bind("127.0.0.1:0").await.unwrap();
        let addr = server.local_addr().unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(server.handle_one(move |request: Request, _peer_addr: SocketAddr| {
            let tx = tx.clone();
            async move {
                let _ = tx.send(request);
            }
        }));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        for chunk in [
            &b"POST /coffee HT"[..],
            b"TP/1.1\r\nHost: localhost:42069\r\n",
            b"Content-Type: application/json\r\n\r\n",
        ] {
            stream.write_all(chunk).await.unwrap();
            stream.flush().await.unwrap();
        }

        let request = rx.recv().await.unwrap();
        assert!(request.is_complete());
        assert_eq!(request.method(), Some("POST"));
        assert_eq!(request.target(), Some("/coffee"));
        assert_eq!(request.header("content-type"), Some("application/json"));
        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn closed_before_end_of_headers() {
        let server = Server::bind("127.0.0.1:0").await.unwrap();
        let addr = server.local_addr().unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(server.handle_one(move |request: Request, _peer_addr: SocketAddr| {
            let tx = tx.clone();
            async move {
                let _ = tx.send(request);
            }
        }));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(b"GET / HTTP/1.1\r\nHost: x\r\n").await.unwrap();
        drop(stream);

        let err = task.await.unwrap().unwrap_err();
        assert!(matches!(err, Error::ConnectionClosed));
        // ハンドラーは呼ばれない
        assert!(rx.try_recv().is_err());
    }
}
