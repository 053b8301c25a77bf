//! 非同期読み取りループ
//!
//! `AsyncRead` から読み取ったバイトを `RequestParser` の空き領域へ直接書き込む。

use std::time::Duration;

use incremental_http11::{NoopObserver, ParseObserver, ParserLimits, Request, RequestParser};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::Result;

/// 読み取り設定
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// パーサーの制限
    pub limits: ParserLimits,
    /// 1 回の読み取りのタイムアウト (None は無制限)
    pub read_timeout: Option<Duration>,
}

/// リクエストヘッダーを読み取る
///
/// ストリームが先に終了した場合は部分的なリクエストを返す。
/// `Request::is_complete()` で完了を確認すること。
/// ヘッダーブロックと同じ読み取りで届いた後続バイトは破棄される。
/// ボディを読む場合は `RequestParser` を直接使い、`remaining()` を参照すること。
pub async fn read_request<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Request> {
    read_request_with(reader, &ReadOptions::default(), NoopObserver).await
}

/// 設定と observer を指定してリクエストヘッダーを読み取る
pub async fn read_request_with<R, O>(
    reader: &mut R,
    options: &ReadOptions,
    observer: O,
) -> Result<Request>
where
    R: AsyncRead + Unpin,
    O: ParseObserver,
{
    let mut parser = RequestParser::with_limits_and_observer(options.limits.clone(), observer);
    while !parser.is_done() {
        let free = parser.unfilled_mut()?;
        let read = reader.read(free);
        let read_result = match options.read_timeout {
            Some(timeout) => tokio::time::timeout(timeout, read).await?,
            None => read.await,
        };
        let n = read_result.map_err(incremental_http11::Error::StreamRead)?;
        if n == 0 {
            // ストリーム終了
            break;
        }
        parser.commit(n)?;
    }
    Ok(parser.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use incremental_http11::ErrorKind;
    use tokio::io::AsyncWriteExt;

    const COFFEE: &[u8] =
        b"GET /coffee HTTP/1.1\r\nHost: localhost:42069\r\nUser-Agent: curl/7.81.0\r\nAccept: */*\r\n\r\n";

    #[tokio::test]
    async fn read_in_small_chunks() {
        let (mut client, mut server) = tokio::io::duplex(64);
        let writer = tokio::spawn(async move {
            for chunk in COFFEE.chunks(3) {
                client.write_all(chunk).await.unwrap();
                tokio::task::yield_now().await;
            }
            client
        });

        let request = read_request(&mut server).await.unwrap();
        assert!(request.is_complete());
        assert_eq!(request.method(), Some("GET"));
        assert_eq!(request.target(), Some("/coffee"));
        assert_eq!(request.version(), Some("1.1"));
        assert_eq!(request.header("host"), Some("localhost:42069"));
        assert_eq!(request.header("user-agent"), Some("curl/7.81.0"));
        assert_eq!(request.header("accept"), Some("*/*"));
        drop(writer.await.unwrap());
    }

    #[tokio::test]
    async fn end_of_stream_returns_partial_request() {
        let (mut client, mut server) = tokio::io::duplex(64);
        client.write_all(b"GET / HTTP/1.1\r\nHost: a\r\n").await.unwrap();
        drop(client);

        let request = read_request(&mut server).await.unwrap();
        assert!(request.is_done());
        assert!(!request.is_complete());
        assert_eq!(request.header("host"), Some("a"));
    }

    #[tokio::test]
    async fn parse_error_is_propagated() {
        let (mut client, mut server) = tokio::io::duplex(64);
        client.write_all(b"GET / HTTP/1.2\r\n\r\n").await.unwrap();

        let err = read_request(&mut server).await.unwrap_err();
        assert!(matches!(err, Error::Http(ref e) if e.kind() == ErrorKind::UnsupportedVersion));
    }

    #[tokio::test]
    async fn read_timeout() {
        let (mut client, mut server) = tokio::io::duplex(64);
        client.write_all(b"GET / HTTP/1.1\r\n").await.unwrap();

        let options = ReadOptions {
            read_timeout: Some(Duration::from_millis(20)),
            ..ReadOptions::default()
        };
        let err = read_request_with(&mut server, &options, NoopObserver)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Timeout));
        drop(client);
    }
}
