//! Input decoding helpers.

use std::borrow::Cow;

/// Decode page bytes to a string.
///
/// 1. Valid UTF-8 (with or without BOM) is returned as-is.
/// 2. Otherwise the `hint` label (usually from `<meta charset>`) is tried.
/// 3. Windows-1252 is the last resort, matching browser behaviour for
///    unlabeled legacy pages.
pub fn decode_text<'a>(bytes: &'a [u8], hint: Option<&str>) -> Cow<'a, str> {
    let (result, _, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return result;
    }

    if let Some(label) = hint
        && let Some(encoding) = encoding_rs::Encoding::for_label(label.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Find the charset label declared in the first kilobyte of an HTML page.
///
/// Handles both `<meta charset="...">` and the
/// `<meta http-equiv="Content-Type" content="text/html; charset=...">` form.
pub fn extract_meta_charset(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(1024)];
    let pos = prefix
        .windows(8)
        .position(|w| w.eq_ignore_ascii_case(b"charset="))?;
    let rest = &prefix[pos + 8..];

    let (start, terminators): (usize, &[u8]) = match rest.first() {
        Some(b'"') => (1, b"\""),
        Some(b'\'') => (1, b"'"),
        Some(_) => (0, b"\"'; >/\t\r\n"),
        None => return None,
    };
    let value = &rest[start..];
    let end = value
        .iter()
        .position(|b| terminators.contains(b))
        .unwrap_or(value.len());

    let label = std::str::from_utf8(&value[..end]).ok()?.trim();
    (!label.is_empty()).then_some(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_meta_charset_forms() {
        assert_eq!(
            extract_meta_charset(b"<html><head><meta charset=\"windows-1251\">"),
            Some("windows-1251")
        );
        assert_eq!(
            extract_meta_charset(b"<meta charset=utf-8>"),
            Some("utf-8")
        );
        assert_eq!(
            extract_meta_charset(
                b"<meta http-equiv=\"Content-Type\" content=\"text/html; CHARSET=iso-8859-2\">"
            ),
            Some("iso-8859-2")
        );
        assert_eq!(extract_meta_charset(b"<html><body>no charset</body>"), None);
        assert_eq!(extract_meta_charset(b"<meta charset=\"\">"), None);
    }

    #[test]
    fn test_decode_prefers_utf8() {
        let text = "Привет, мир".as_bytes();
        assert_eq!(decode_text(text, Some("windows-1251")), "Привет, мир");
    }

    #[test]
    fn test_decode_uses_hint_then_cp1252() {
        // "Привет" in windows-1251
        let cp1251 = [0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2];
        assert_eq!(decode_text(&cp1251, Some("windows-1251")), "Привет");

        // "café" in windows-1252
        let cp1252 = [0x63, 0x61, 0x66, 0xE9];
        assert_eq!(decode_text(&cp1252, None), "café");
        assert_eq!(decode_text(&cp1252, Some("bogus-label")), "café");
    }
}
