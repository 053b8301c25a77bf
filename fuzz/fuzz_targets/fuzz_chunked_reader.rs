#![no_main]

use std::io::{self, Read};

use arbitrary::Arbitrary;
use incremental_http11::{NoopObserver, ParserLimits, request_from_reader_with};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    data: Vec<u8>,
    sizes: Vec<u8>,
    initial_buffer_capacity: u8,
}

/// `sizes` の順にバイト数を決めて返す reader
struct SizedReader<'a> {
    data: &'a [u8],
    sizes: &'a [u8],
    reads: usize,
}

impl Read for SizedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let size = match self.sizes {
            [] => buf.len(),
            sizes => usize::from(sizes[self.reads % sizes.len()]).max(1),
        };
        self.reads += 1;
        let n = size.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fuzz_target!(|input: Input| {
    let limits = ParserLimits {
        initial_buffer_capacity: usize::from(input.initial_buffer_capacity),
        ..ParserLimits::default()
    };
    let reader = SizedReader {
        data: &input.data,
        sizes: &input.sizes,
        reads: 0,
    };
    if let Ok(request) = request_from_reader_with(reader, limits, NoopObserver) {
        assert!(request.is_done());
        if request.is_complete() {
            assert!(request.request_line().is_some());
        }
    }
});
