use anyhow::{Result, anyhow};
use encoding::DecoderTrap;
use encoding::label::encoding_from_whatwg_label;

/// Text decoded from an unknown charset
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedText {
    pub text: String,
    /// charset name as reported by chardet
    pub charset: String,
    pub confidence: f32,
}

/// detect char-encoding and decode to utf-8
/// (ignore unknown character)
/// ref. https://github.com/thuleqaid/rust-chardet
pub fn decode_to_utf8(input: &[u8]) -> Result<DecodedText> {
    let (charset, confidence, _language) = chardet::detect(input);

    let coder = encoding_from_whatwg_label(chardet::charset2encoding(&charset));
    match coder {
        Some(c) => {
            let text = c
                .decode(input, DecoderTrap::Ignore)
                .map_err(|e| anyhow!("cannot decode as {}: {:?}", charset, e))?;
            Ok(DecodedText {
                text,
                charset,
                confidence,
            })
        }
        None => Err(anyhow!(
            "cannot find character encodings: {:?} (confidence {})",
            charset,
            confidence
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through() {
        let decoded = decode_to_utf8(b"Call me Ishmael. Some years ago, never mind how long.").unwrap();
        assert_eq!(
            decoded.text,
            "Call me Ishmael. Some years ago, never mind how long."
        );
    }

    #[test]
    fn test_utf8_is_detected() {
        let source = "Die Straße führt über die Brücke, schöne Grüße aus München.";
        let decoded = decode_to_utf8(source.as_bytes()).unwrap();
        assert_eq!(decoded.text, source);
    }
}
