//! パースイベントの通知
//!
//! パーサーはグローバルなロガーを持たない。
//! 観測したい場合はセッションごとに `ParseObserver` を渡す。

use crate::request::ParserState;
use crate::request_line::RequestLine;

/// パース中に発生するイベント
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseEvent<'a> {
    /// バッファを拡張した
    BufferGrown { from: usize, to: usize },
    /// リクエストラインをパースした
    RequestLineParsed(&'a RequestLine),
    /// ヘッダーを 1 つパースした
    HeaderParsed { name: &'a str, value: &'a str },
    /// ヘッダーブロックの終端に到達した
    HeadersComplete { count: usize },
    /// 追加データ待ち
    NeedMoreData { buffered: usize },
    /// 完了前にストリームが終了した
    EndOfStream { state: ParserState, buffered: usize },
}

/// パースイベントの受け取り手
pub trait ParseObserver {
    fn on_event(&mut self, event: ParseEvent<'_>);
}

/// 何もしない observer
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ParseObserver for NoopObserver {
    fn on_event(&mut self, _event: ParseEvent<'_>) {}
}

impl<O: ParseObserver + ?Sized> ParseObserver for &mut O {
    fn on_event(&mut self, event: ParseEvent<'_>) {
        (**self).on_event(event);
    }
}

/// `log` クレートへイベントを流す observer
///
/// `log` feature が必要。
#[cfg(feature = "log")]
#[derive(Debug, Clone)]
pub struct LogObserver {
    target: &'static str,
}

#[cfg(feature = "log")]
impl LogObserver {
    pub fn new() -> Self {
        Self {
            target: "incremental_http11",
        }
    }

    /// ログターゲットを指定して作成
    pub fn with_target(target: &'static str) -> Self {
        Self { target }
    }
}

#[cfg(feature = "log")]
impl Default for LogObserver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "log")]
impl ParseObserver for LogObserver {
    fn on_event(&mut self, event: ParseEvent<'_>) {
        let target = self.target;
        match event {
            ParseEvent::BufferGrown { from, to } => {
                log::trace!(target: target, "buffer grown: {} -> {}", from, to);
            }
            ParseEvent::RequestLineParsed(line) => {
                log::debug!(target: target, "request line: {}", line);
            }
            ParseEvent::HeaderParsed { name, value } => {
                log::debug!(target: target, "header: {}: {}", name, value);
            }
            ParseEvent::HeadersComplete { count } => {
                log::debug!(target: target, "headers complete: {} headers", count);
            }
            ParseEvent::NeedMoreData { buffered } => {
                log::trace!(target: target, "need more data: {} bytes buffered", buffered);
            }
            ParseEvent::EndOfStream { state, buffered } => {
                log::warn!(
                    target: target,
                    "end of stream in state {:?} with {} bytes buffered",
                    state,
                    buffered
                );
            }
        }
    }
}

/// イベントを記録する observer (テスト用)
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingObserver {
    pub events: Vec<String>,
}

#[cfg(test)]
impl ParseObserver for RecordingObserver {
    fn on_event(&mut self, event: ParseEvent<'_>) {
        self.events.push(format!("{:?}", event));
    }
}
