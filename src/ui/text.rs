use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cuts `text` to at most `width` terminal columns, ending in `…` when
/// anything was dropped.
pub fn clip_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::clip_to_width;

    #[test]
    fn clip_keeps_short_text() {
        assert_eq!(clip_to_width("home", 10), "home");
        assert_eq!(clip_to_width("home", 4), "home");
    }

    #[test]
    fn clip_counts_columns_not_bytes() {
        assert_eq!(clip_to_width("abcdef", 4), "abc…");
        assert_eq!(clip_to_width("あいう", 5), "あい…");
        assert_eq!(clip_to_width("あいう", 4), "あ…");
        assert_eq!(clip_to_width("abc", 0), "");
    }
}
