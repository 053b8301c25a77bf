//! 同期読み取りループ
//!
//! `std::io::Read` からリクエストヘッダーを読み取る。

use std::io::{ErrorKind, Read};

use crate::error::Error;
use crate::limits::ParserLimits;
use crate::observer::{NoopObserver, ParseObserver};
use crate::parser::RequestParser;
use crate::request::Request;

/// バイトソースからリクエストを読み取る
///
/// 終端状態に到達するか、ストリームが終了するまで読み取りを繰り返す。
/// ストリームが先に終了した場合は部分的なリクエストを返す。
/// `Request::is_complete()` で完了を確認すること。
///
/// ヘッダーブロックと同じ読み取りで届いた後続バイトは破棄される。
///
/// ```rust
/// use incremental_http11::request_from_reader;
///
/// let data = b"GET /coffee HTTP/1.1\r\nHost: localhost:42069\r\n\r\n";
/// let request = request_from_reader(&data[..]).unwrap();
/// assert!(request.is_complete());
/// assert_eq!(request.target(), Some("/coffee"));
/// ```
pub fn request_from_reader<R: Read>(reader: R) -> Result<Request, Error> {
    request_from_reader_with(reader, ParserLimits::default(), NoopObserver)
}

/// 制限と observer を指定してバイトソースからリクエストを読み取る
pub fn request_from_reader_with<R: Read, O: ParseObserver>(
    mut reader: R,
    limits: ParserLimits,
    observer: O,
) -> Result<Request, Error> {
    let mut parser = RequestParser::with_limits_and_observer(limits, observer);
    while !parser.is_done() {
        let free = parser.unfilled_mut()?;
        let n = match reader.read(free) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::StreamRead(e)),
        };
        if n == 0 {
            // ストリーム終了
            break;
        }
        parser.commit(n)?;
    }
    Ok(parser.finish())
}
