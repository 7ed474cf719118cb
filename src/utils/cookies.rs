use std::collections::HashMap;

/// Parses a raw `Cookie` header into name/value pairs. Each `;`-separated
/// segment is split on its first `=`; name and value are URL-decoded.
/// Malformed segments (no `=`, empty name, undecodable bytes) are skipped.
pub fn parse_cookie_header(raw: &str) -> HashMap<String, String> {
    raw.split(';')
        .filter_map(|segment| {
            let (name, value) = segment.trim().split_once('=')?;
            let name = urlencoding::decode(name).ok()?;
            if name.is_empty() {
                return None;
            }
            let value = urlencoding::decode(value).ok()?;
            Some((name.into_owned(), value.into_owned()))
        })
        .collect()
}
