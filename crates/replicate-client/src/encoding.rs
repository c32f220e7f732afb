// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Data-URI encoding for binary model inputs
//!
//! Models accept files inline as `data:<mime>;base64,<payload>` strings. The MIME
//! type is sniffed from the leading bytes, so callers can pass raw file contents
//! without knowing the format.

use std::{io, path::Path};

use base64::Engine as _;
use tokio::fs;
use tracing::debug;

/// Bytes inspected when sniffing the content type
const SNIFF_LEN: usize = 512;

const TEXT_PLAIN: &str = "text/plain;charset=utf-8";
const OCTET_STREAM: &str = "application/octet-stream";

/// A format recognized by its magic bytes at fixed offsets
struct Signature {
    parts: &'static [(usize, &'static [u8])],
    mime: &'static str,
}

const SIGNATURES: &[Signature] = &[
    Signature {
        parts: &[(0, b"\x89PNG\r\n\x1a\n")],
        mime: "image/png",
    },
    Signature {
        parts: &[(0, b"\xff\xd8\xff")],
        mime: "image/jpeg",
    },
    Signature {
        parts: &[(0, b"GIF87a")],
        mime: "image/gif",
    },
    Signature {
        parts: &[(0, b"GIF89a")],
        mime: "image/gif",
    },
    Signature {
        parts: &[(0, b"RIFF"), (8, b"WEBPVP")],
        mime: "image/webp",
    },
    Signature {
        parts: &[(0, b"RIFF"), (8, b"WAVE")],
        mime: "audio/wav",
    },
    Signature {
        parts: &[(0, b"BM")],
        mime: "image/bmp",
    },
    Signature {
        parts: &[(0, b"\x00\x00\x01\x00")],
        mime: "image/x-icon",
    },
    Signature {
        parts: &[(0, b"II*\x00")],
        mime: "image/tiff",
    },
    Signature {
        parts: &[(0, b"MM\x00*")],
        mime: "image/tiff",
    },
    Signature {
        parts: &[(0, b"ID3")],
        mime: "audio/mpeg",
    },
    Signature {
        parts: &[(0, b"OggS\x00")],
        mime: "application/ogg",
    },
    Signature {
        parts: &[(0, b"fLaC")],
        mime: "audio/flac",
    },
    Signature {
        parts: &[(4, b"ftyp")],
        mime: "video/mp4",
    },
    Signature {
        parts: &[(0, b"\x1a\x45\xdf\xa3")],
        mime: "video/webm",
    },
    Signature {
        parts: &[(0, b"%PDF-")],
        mime: "application/pdf",
    },
    Signature {
        parts: &[(0, b"PK\x03\x04")],
        mime: "application/zip",
    },
    Signature {
        parts: &[(0, b"\x1f\x8b\x08")],
        mime: "application/x-gzip",
    },
];

impl Signature {
    fn matches(&self, data: &[u8]) -> bool {
        self.parts.iter().all(|(offset, magic)| {
            data.get(*offset..offset + magic.len())
                .is_some_and(|window| window == *magic)
        })
    }
}

/// Guess the MIME type of raw bytes
///
/// Always returns a type: unrecognized data is reported as plain text when it
/// is UTF-8 without binary control bytes, and as `application/octet-stream`
/// otherwise.
pub fn sniff_content_type(data: &[u8]) -> &'static str {
    let head = &data[..data.len().min(SNIFF_LEN)];

    if let Some(signature) = SIGNATURES.iter().find(|signature| signature.matches(head)) {
        return signature.mime;
    }

    if is_utf8_text(head, data.len() > head.len()) {
        TEXT_PLAIN
    } else {
        OCTET_STREAM
    }
}

/// `truncated` allows one character cut off at the end of the sniff window
fn is_utf8_text(head: &[u8], truncated: bool) -> bool {
    let valid = match std::str::from_utf8(head) {
        Ok(_) => true,
        Err(error) => truncated && error.error_len().is_none(),
    };
    valid && !head.iter().any(|&byte| is_binary(byte))
}

fn is_binary(byte: u8) -> bool {
    matches!(byte, 0x00..=0x08 | 0x0b | 0x0e..=0x1a | 0x1c..=0x1f)
}

/// Encode raw bytes as a `data:` URI accepted as model input
pub fn encode_image(data: &[u8]) -> String {
    let mime = sniff_content_type(data);
    let payload = base64::engine::general_purpose::STANDARD.encode(data);
    format!("data:{mime};base64,{payload}")
}

/// Read a file and encode it as a `data:` URI
pub async fn encode_file(path: impl AsRef<Path>) -> io::Result<String> {
    let path = path.as_ref();
    let data = fs::read(path).await?;
    debug!(path = %path.display(), bytes = data.len(), "encoding file as data URI");
    Ok(encode_image(&data))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";

    #[test]
    fn sniff_images() {
        assert_eq!(sniff_content_type(PNG_HEADER), "image/png");
        assert_eq!(sniff_content_type(b"\xff\xd8\xff\xe0\x00\x10JFIF"), "image/jpeg");
        assert_eq!(sniff_content_type(b"GIF89a\x01\x00"), "image/gif");
        assert_eq!(sniff_content_type(b"RIFF\x24\x00\x00\x00WEBPVP8 "), "image/webp");
        assert_eq!(sniff_content_type(b"BM\x36\x00"), "image/bmp");
    }

    #[test]
    fn sniff_audio_and_video() {
        assert_eq!(sniff_content_type(b"RIFF\x24\x00\x00\x00WAVEfmt "), "audio/wav");
        assert_eq!(sniff_content_type(b"ID3\x04\x00"), "audio/mpeg");
        assert_eq!(sniff_content_type(b"\x00\x00\x00\x18ftypmp42"), "video/mp4");
        assert_eq!(sniff_content_type(b"\x1a\x45\xdf\xa3\x01"), "video/webm");
    }

    #[test]
    fn sniff_fallbacks() {
        assert_eq!(sniff_content_type(b"hello, world\n"), TEXT_PLAIN);
        assert_eq!(sniff_content_type(b""), TEXT_PLAIN);
        assert_eq!(sniff_content_type(b"\x00\x01\x02\x03"), OCTET_STREAM);
        assert_eq!(sniff_content_type("café ünïcode".as_bytes()), TEXT_PLAIN);
        assert_eq!(sniff_content_type(b"caf\xe9 \xff\xfe latin1"), OCTET_STREAM);
        assert_eq!(sniff_content_type(b"caf\xc3"), OCTET_STREAM);
    }

    #[test]
    fn sniff_tolerates_character_split_by_window() {
        let mut data = vec![b'a'; SNIFF_LEN - 1];
        data.extend_from_slice("é and more".as_bytes());
        assert_eq!(sniff_content_type(&data), TEXT_PLAIN);

        data[10] = 0xff;
        assert_eq!(sniff_content_type(&data), OCTET_STREAM);
    }

    #[test]
    fn riff_needs_matching_subtype() {
        assert_eq!(sniff_content_type(b"RIFF\x24\x00\x00\x00AVI LIST"), OCTET_STREAM);
        assert_eq!(sniff_content_type(b"RIFF"), TEXT_PLAIN);
    }

    #[test]
    fn encode_png_bytes() {
        let encoded = encode_image(PNG_HEADER);
        assert!(encoded.starts_with("data:image/png;base64,"));

        let payload = encoded.trim_start_matches("data:image/png;base64,");
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .unwrap();
        assert_eq!(decoded, PNG_HEADER);
    }

    #[test]
    fn encode_text_bytes() {
        assert_eq!(encode_image(b"hi"), "data:text/plain;charset=utf-8;base64,aGk=");
    }

    #[tokio::test]
    async fn encode_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.png");
        std::fs::write(&path, PNG_HEADER).unwrap();

        let encoded = encode_file(&path).await.unwrap();
        assert_eq!(encoded, encode_image(PNG_HEADER));
    }

    #[tokio::test]
    async fn encode_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = encode_file(dir.path().join("missing.png")).await;
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }
}
