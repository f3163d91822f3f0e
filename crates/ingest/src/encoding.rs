use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

/// Text decoded from an uploaded file along with the encoding that was used.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: &'static str,
    /// `true` when the detected encoding produced malformed output and the
    /// bytes were decoded as UTF-8 instead.
    pub fell_back: bool,
}

/// Detects the character encoding of `bytes` and decodes them.
///
/// A byte-order mark wins outright. Otherwise the encoding is guessed from the
/// content. If decoding with the guess hits malformed sequences, the bytes are
/// decoded as UTF-8 (BOM stripped, invalid sequences replaced).
pub fn decode_text(bytes: &[u8]) -> DecodedText {
    let (encoding, bom_len): (&'static Encoding, usize) = match Encoding::for_bom(bytes) {
        Some(found) => found,
        None => {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            (detector.guess(None, true), 0)
        }
    };

    let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
    if !had_errors {
        tracing::debug!(encoding = encoding.name(), "Decoded trade log");
        return DecodedText {
            text: text.into_owned(),
            encoding: encoding.name(),
            fell_back: false,
        };
    }

    tracing::warn!(
        detected = encoding.name(),
        "Detected encoding produced malformed text; decoding as UTF-8 instead"
    );
    let (text, _) = UTF_8.decode_with_bom_removal(bytes);
    DecodedText {
        text: text.into_owned(),
        encoding: UTF_8.name(),
        fell_back: true,
    }
}
