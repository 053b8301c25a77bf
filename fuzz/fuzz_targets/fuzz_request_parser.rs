#![no_main]

use incremental_http11::{ParserLimits, Request, RequestParser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // 一括 feed と分割 feed の結果が一致するのは制限なしの場合のみ
    // データを一度に feed
    let mut whole = RequestParser::with_limits(ParserLimits::unlimited());
    let whole_result = whole.feed(data).map(|_| whole.finish());

    // データを分割して feed (ストリーミングシナリオ)
    let mut parser = RequestParser::with_limits(ParserLimits::unlimited());
    let mut chunked_result: Option<Result<Request, _>> = None;
    for chunk in data.chunks(17) {
        match parser.feed(chunk) {
            Ok(true) => break,
            Ok(false) => {}
            Err(e) => {
                chunked_result = Some(Err(e));
                break;
            }
        }
    }
    let chunked_result = chunked_result.unwrap_or_else(|| Ok(parser.finish()));

    // 分割の仕方によらず、成功時は同じリクエストになる
    match (whole_result, chunked_result) {
        (Ok(a), Ok(b)) => assert_eq!(a, b),
        (Err(a), Err(b)) => assert_eq!(a.kind(), b.kind()),
        (a, b) => panic!("mismatch: {:?} vs {:?}", a, b),
    }
});
