use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use tracker_logging::tracker_warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPage {
    pub html: String,
    pub encoding_label: String,
    /// Malformed byte sequences were replaced with U+FFFD.
    pub had_errors: bool,
}

/// Decode raw statement-page bytes into UTF-8.
///
/// Order: BOM -> Content-Type charset -> chardetng guess. Decoding never
/// fails; malformed sequences are replaced and flagged.
pub fn decode_page(bytes: &[u8], content_type: Option<&str>) -> DecodedPage {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(encoding) = content_type
        .and_then(extract_charset)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return decode_with(bytes, encoding);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']).to_string())
    })
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> DecodedPage {
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracker_warn!(
            "statement page had invalid {} sequences; replaced",
            used.name()
        );
    }
    DecodedPage {
        html: text.into_owned(),
        encoding_label: used.name().to_string(),
        had_errors,
    }
}
