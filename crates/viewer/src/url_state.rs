//! URL state for shareable deep links.
//!
//! The loaded point cloud's URL is carried in the `url` query parameter so
//! reloading restores the view and links can be shared. Parsing and
//! formatting are pure string functions; the history/location calls live in
//! the app crate.

/// Query parameter carrying the point-cloud URL.
pub const URL_PARAM: &str = "url";

/// Suffix appended to the loaded file's basename for the document title.
pub const TITLE_SUFFIX: &str = " - LiDAR Viewer";

/// Basename used when the URL yields no usable file name.
pub const FALLBACK_BASENAME: &str = "Point Cloud";

/// Extract the `url` parameter from a raw `location.search` string.
///
/// Returns `None` when the parameter is absent or empty.
pub fn url_from_query(search: &str) -> Option<String> {
    let query = search.trim_start_matches('?');
    for pair in query.split('&') {
        let mut kv = pair.splitn(2, '=');
        let key = kv.next().unwrap_or("");
        if key == URL_PARAM {
            let value = kv.next().unwrap_or("");
            if value.is_empty() {
                return None;
            }
            return Some(percent_decode(value));
        }
    }
    None
}

/// Query string for the shareable deep link, suitable for a history rewrite
/// without navigation.
pub fn share_query(url: &str) -> String {
    format!("?{}={}", URL_PARAM, percent_encode(url))
}

/// File basename used for the document title.
pub fn basename(url: &str) -> &str {
    url.rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(FALLBACK_BASENAME)
}

/// Document title shown after a successful load.
pub fn page_title(url: &str) -> String {
    format!("{}{}", basename(url), TITLE_SUFFIX)
}

fn percent_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).unwrap_or("");
                if let Ok(byte) = u8::from_str_radix(hex, 16) {
                    out.push(byte);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_url_parameter_from_search() {
        let search = "?url=https%3A%2F%2Fexample.com%2Fa.laz";
        assert_eq!(
            url_from_query(search).as_deref(),
            Some("https://example.com/a.laz")
        );
    }

    #[test]
    fn ignores_other_parameters() {
        assert_eq!(url_from_query("?zoom=3&theme=dark"), None);
        assert_eq!(
            url_from_query("?zoom=3&url=x.laz&theme=dark").as_deref(),
            Some("x.laz")
        );
    }

    #[test]
    fn absent_or_empty_parameter_is_none() {
        assert_eq!(url_from_query(""), None);
        assert_eq!(url_from_query("?"), None);
        assert_eq!(url_from_query("?url="), None);
    }

    #[test]
    fn share_query_round_trips() {
        let url = "https://example.com/data/autzen.copc.laz";
        let query = share_query(url);
        assert_eq!(url_from_query(&query).as_deref(), Some(url));
    }

    #[test]
    fn basename_takes_the_last_path_segment() {
        assert_eq!(basename("https://example.com/pc/a.laz"), "a.laz");
        assert_eq!(basename("a.laz"), "a.laz");
        assert_eq!(basename("https://example.com/pc/"), FALLBACK_BASENAME);
    }

    #[test]
    fn title_ends_with_viewer_suffix() {
        assert_eq!(
            page_title("https://example.com/a.laz"),
            "a.laz - LiDAR Viewer"
        );
    }
}
