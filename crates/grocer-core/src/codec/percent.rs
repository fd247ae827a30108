//! Strict percent-decoding for fragment payloads.

use super::CodecError;

/// Percent-decode `input`, rejecting malformed escapes and invalid UTF-8.
///
/// `+` is left as is; fragments are not form-encoded.
pub fn decode_strict(input: &str) -> Result<String, CodecError> {
    let bytes = input.as_bytes();
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] == b'%' {
            let escape = bytes.get(index + 1..index + 3);
            if !escape.is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit)) {
                return Err(CodecError::PercentEncoding(format!(
                    "invalid escape at byte {index}"
                )));
            }
            index += 3;
        } else {
            index += 1;
        }
    }

    urlencoding::decode(input)
        .map(std::borrow::Cow::into_owned)
        .map_err(|error| CodecError::PercentEncoding(error.to_string()))
}
