//! リクエストとパース状態機械

use crate::error::Error;
use crate::headers::{HeaderMap, HeaderParse, parse_header};
use crate::limits::ParserLimits;
use crate::line::{check_line_length, find_crlf};
use crate::observer::{NoopObserver, ParseEvent, ParseObserver};
use crate::request_line::{RequestLine, parse_request_line};

/// パース状態
///
/// 遷移は前方向のみ。`Done` は終端。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserState {
    /// リクエストライン待ち
    AwaitingRequestLine,
    /// ヘッダー待ち
    AwaitingHeaders,
    /// 完了
    Done,
}

/// HTTP リクエスト (ボディなし)
///
/// パースセッションごとに 1 つ作成され、バイトが届くたびに更新される。
/// `state()` が `Done` になった後は変更されない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    request_line: Option<RequestLine>,
    headers: HeaderMap,
    state: ParserState,
    /// 空行まで読み切ったか (ストリーム終了による強制終了では false)
    complete: bool,
    /// パースしたヘッダー行数 (上書きされた行も数える)
    header_lines: usize,
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    /// 空のリクエストを作成
    pub fn new() -> Self {
        Self {
            request_line: None,
            headers: HeaderMap::new(),
            state: ParserState::AwaitingRequestLine,
            complete: false,
            header_lines: 0,
        }
    }

    /// リクエストラインを取得
    ///
    /// リクエストラインのパース後に `Some` になる。
    pub fn request_line(&self) -> Option<&RequestLine> {
        self.request_line.as_ref()
    }

    pub fn method(&self) -> Option<&str> {
        self.request_line.as_ref().map(|l| l.method.as_str())
    }

    pub fn target(&self) -> Option<&str> {
        self.request_line.as_ref().map(|l| l.target.as_str())
    }

    pub fn version(&self) -> Option<&str> {
        self.request_line.as_ref().map(|l| l.version.as_str())
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// ヘッダーを取得 (大文字小文字を区別しない)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    /// 終端状態か
    pub fn is_done(&self) -> bool {
        self.state == ParserState::Done
    }

    /// ヘッダーブロックの終端まで読み切ったか
    ///
    /// ストリームが途中で終了した場合、`is_done()` は true でもこちらは false になる。
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// データをパース
    ///
    /// 消費したバイト数を返す。0 は追加データが必要なことを表す。
    /// 完了後に呼ぶと `ParserAlreadyComplete` を返す。
    pub fn parse(&mut self, data: &[u8]) -> Result<usize, Error> {
        self.parse_with(data, &ParserLimits::unlimited(), &mut NoopObserver)
    }

    /// 制限と observer を指定してデータをパース
    ///
    /// 利用可能なデータで完結する単位 (リクエストライン、ヘッダー行) をすべて消費する。
    pub fn parse_with<O: ParseObserver>(
        &mut self,
        data: &[u8],
        limits: &ParserLimits,
        observer: &mut O,
    ) -> Result<usize, Error> {
        if self.state == ParserState::Done {
            return Err(Error::ParserAlreadyComplete);
        }

        let mut consumed = 0;
        loop {
            let rest = &data[consumed..];
            match self.state {
                ParserState::AwaitingRequestLine => {
                    check_line_length(rest, find_crlf(rest), limits.max_line_size)?;
                    let Some((line, n)) = parse_request_line(rest)? else {
                        break;
                    };
                    observer.on_event(ParseEvent::RequestLineParsed(&line));
                    self.request_line = Some(line);
                    self.state = ParserState::AwaitingHeaders;
                    consumed += n;
                }
                ParserState::AwaitingHeaders => {
                    check_line_length(rest, find_crlf(rest), limits.max_line_size)?;
                    match parse_header(rest)? {
                        HeaderParse::Incomplete => break,
                        HeaderParse::Field {
                            name,
                            value,
                            consumed: n,
                        } => {
                            if self.header_lines >= limits.max_headers_count {
                                return Err(Error::TooManyHeaders {
                                    count: self.header_lines + 1,
                                    limit: limits.max_headers_count,
                                });
                            }
                            observer.on_event(ParseEvent::HeaderParsed {
                                name: &name,
                                value: &value,
                            });
                            self.headers.insert(&name, value);
                            self.header_lines += 1;
                            consumed += n;
                        }
                        HeaderParse::End { consumed: n } => {
                            consumed += n;
                            self.state = ParserState::Done;
                            self.complete = true;
                            observer.on_event(ParseEvent::HeadersComplete {
                                count: self.headers.len(),
                            });
                            break;
                        }
                    }
                }
                ParserState::Done => {
                    return Err(Error::InvariantViolation(
                        "parse loop continued after Done".to_string(),
                    ));
                }
            }
        }

        if self.state != ParserState::Done {
            observer.on_event(ParseEvent::NeedMoreData {
                buffered: data.len() - consumed,
            });
        }
        Ok(consumed)
    }

    /// ストリーム終了により終端状態へ強制遷移
    pub(crate) fn force_done(&mut self) {
        self.state = ParserState::Done;
    }
}
