/// パーサーの制限設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserLimits {
    /// バッファの初期容量 (デフォルト: 8 バイト)
    ///
    /// 不足すると倍々で拡張される。
    pub initial_buffer_capacity: usize,
    /// 最大バッファサイズ (デフォルト: 64KB)
    pub max_buffer_size: usize,
    /// 最大ヘッダー数 (デフォルト: 100)
    pub max_headers_count: usize,
    /// 最大行長 (デフォルト: 8KB)
    ///
    /// リクエストラインとヘッダー行の両方に適用される。CRLF は含まない。
    pub max_line_size: usize,
}

impl Default for ParserLimits {
    fn default() -> Self {
        Self {
            initial_buffer_capacity: 8,
            max_buffer_size: 64 * 1024, // 64KB
            max_headers_count: 100,
            max_line_size: 8 * 1024, // 8KB
        }
    }
}

impl ParserLimits {
    /// 制限なしの設定を作成
    pub fn unlimited() -> Self {
        Self {
            initial_buffer_capacity: 8,
            max_buffer_size: usize::MAX,
            max_headers_count: usize::MAX,
            max_line_size: usize::MAX,
        }
    }
}
