//! 行境界の検出

use crate::error::Error;

/// 最初の CRLF の位置を探す
pub(crate) fn find_crlf(data: &[u8]) -> Option<usize> {
    data.windows(2).position(|w| w == b"\r\n")
}

/// 行長の制限を確認
///
/// CRLF が見つかった場合は行の長さ、見つからない場合は保持しているバイト数で判定する。
/// 末尾の CR は次の読み取りで LF が届く可能性があるため数えない。
pub(crate) fn check_line_length(
    data: &[u8],
    line_end: Option<usize>,
    limit: usize,
) -> Result<(), Error> {
    let size = match line_end {
        Some(pos) => pos,
        None if data.last() == Some(&b'\r') => data.len() - 1,
        None => data.len(),
    };
    if size > limit {
        return Err(Error::LineTooLong { size, limit });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_crlf_positions() {
        assert_eq!(find_crlf(b"GET / HTTP/1.1\r\n"), Some(14));
        assert_eq!(find_crlf(b"\r\n"), Some(0));
        assert_eq!(find_crlf(b"abc\r"), None);
        assert_eq!(find_crlf(b"abc\n\r"), None);
        assert_eq!(find_crlf(b""), None);
    }

    #[test]
    fn line_length() {
        assert!(check_line_length(b"abcd\r\n", Some(4), 4).is_ok());
        assert!(check_line_length(b"abcde\r\n", Some(5), 4).is_err());
        assert!(check_line_length(b"abcd\r", None, 4).is_ok());
        assert!(check_line_length(b"abcde", None, 4).is_err());
    }
}
