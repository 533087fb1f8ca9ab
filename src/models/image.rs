//! Turn whatever the backend stores for a photo or proof into something an
//! `<img src>` can use.

const JPEG_PREFIX: &str = "data:image/jpeg;base64,";
const PNG_PREFIX: &str = "data:image/png;base64,";

/// Normalize an image payload into a renderable source.
///
/// Data-URIs and http(s) URLs pass through. Raw base64 is wrapped in a
/// data-URI; PNG signatures get a PNG wrapper, everything else defaults to JPEG.
pub fn normalize_image_source(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.starts_with("data:") || raw.starts_with("http://") || raw.starts_with("https://") {
        return Some(raw.to_string());
    }

    if raw.starts_with("/9j/") {
        return Some(format!("{JPEG_PREFIX}{raw}"));
    }
    if raw.starts_with("iVBOR") && is_base64(raw) {
        return Some(format!("{PNG_PREFIX}{raw}"));
    }

    // Ambiguous payloads are treated as JPEG, base64 or not.
    Some(format!("{JPEG_PREFIX}{raw}"))
}

/// True when every byte belongs to the standard base64 alphabet.
pub fn is_base64(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'=')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_passes_through() {
        assert_eq!(
            normalize_image_source(Some("data:image/png;base64,AAAA")).as_deref(),
            Some("data:image/png;base64,AAAA")
        );
    }

    #[test]
    fn jpeg_base64_gets_wrapped() {
        assert_eq!(
            normalize_image_source(Some("/9j/4AAQSkZJRgABAQEA")).as_deref(),
            Some("data:image/jpeg;base64,/9j/4AAQSkZJRgABAQEA")
        );
    }

    #[test]
    fn urls_pass_through() {
        assert_eq!(
            normalize_image_source(Some("https://x/y.png")).as_deref(),
            Some("https://x/y.png")
        );
        assert_eq!(
            normalize_image_source(Some("http://cdn.local/a.jpg")).as_deref(),
            Some("http://cdn.local/a.jpg")
        );
    }

    #[test]
    fn missing_or_blank_is_none() {
        assert_eq!(normalize_image_source(None), None);
        assert_eq!(normalize_image_source(Some("")), None);
        assert_eq!(normalize_image_source(Some("   ")), None);
    }

    #[test]
    fn png_signature_gets_png_wrapper() {
        assert_eq!(
            normalize_image_source(Some("iVBORw0KGgo=")).as_deref(),
            Some("data:image/png;base64,iVBORw0KGgo=")
        );
    }

    #[test]
    fn ambiguous_defaults_to_jpeg() {
        assert_eq!(
            normalize_image_source(Some("QUJDRA==")).as_deref(),
            Some("data:image/jpeg;base64,QUJDRA==")
        );
        assert_eq!(
            normalize_image_source(Some("not base64 at all")).as_deref(),
            Some("data:image/jpeg;base64,not base64 at all")
        );
    }

    #[test]
    fn base64_alphabet_check() {
        assert!(is_base64("QUJD+/=="));
        assert!(!is_base64("QUJD DA"));
        assert!(!is_base64(""));
    }
}
