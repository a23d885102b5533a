//! `data:` URLs for encoded images, for callers that hand results straight
//! to an `<img src>` or a download link.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Wrap JPEG bytes in a `data:image/jpeg;base64,...` URL.
pub fn jpeg_data_url(jpeg: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", STANDARD.encode(jpeg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_and_payload() {
        let url = jpeg_data_url(&[0xFF, 0xD8, 0xFF, 0xD9]);
        assert_eq!(url, "data:image/jpeg;base64,/9j/2Q==");
    }

    #[test]
    fn test_empty_payload() {
        assert_eq!(jpeg_data_url(&[]), "data:image/jpeg;base64,");
    }
}
