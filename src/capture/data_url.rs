use base64::Engine;
use base64::engine::general_purpose::STANDARD;

pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

pub fn png_data_url(png: &[u8]) -> String {
    let mut out = String::with_capacity(PNG_DATA_URL_PREFIX.len() + png.len() * 4 / 3 + 4);
    out.push_str(PNG_DATA_URL_PREFIX);
    STANDARD.encode_string(png, &mut out);
    out
}

/// Payload bytes of a PNG data URL, or `None` when the prefix or base64 is wrong.
pub fn decode_png_data_url(data_url: &str) -> Option<Vec<u8>> {
    let payload = data_url.strip_prefix(PNG_DATA_URL_PREFIX)?;
    STANDARD.decode(payload).ok()
}
