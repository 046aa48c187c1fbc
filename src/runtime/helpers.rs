//! Escaping helpers shared by the markup and script generators.

use serde::Serialize;

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Serialize `value` for embedding inside an inline `<script>` block.
///
/// `</` becomes `<\/` so the HTML parser cannot close the script early,
/// and U+2028/U+2029 are escaped since older JS engines reject them raw.
pub(crate) fn json_for_script<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let json = serde_json::to_string(value)?;
    Ok(json
        .replace("</", "<\\/")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029"))
}

/// `m:ss.ss` for timeline output.
pub fn format_time(secs: f64) -> String {
    let secs = secs.max(0.0);
    let m = (secs / 60.0) as u32;
    let s = secs % 60.0;
    format!("{m}:{s:05.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            html_escape(r#"<b class="x">&</b>"#),
            "&lt;b class=&quot;x&quot;&gt;&amp;&lt;/b&gt;"
        );
    }

    #[test]
    fn script_json_cannot_close_tag() {
        let out = json_for_script(&"</script><script>alert(1)").unwrap();
        assert!(!out.contains("</script>"));
        assert!(out.contains("<\\/script>"));
        let back: String = serde_json::from_str(&out).unwrap();
        assert_eq!(back, "</script><script>alert(1)");
    }

    #[test]
    fn time_format() {
        assert_eq!(format_time(0.5), "0:00.50");
        assert_eq!(format_time(65.25), "1:05.25");
    }
}
