use crate::store::ImageAsset;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use time::OffsetDateTime;

/// Largest image accepted for embedding.
pub const MAX_IMAGE_BYTES: u64 = 2 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("{path} is not an image (detected type: {mime})")]
    NotAnImage { path: String, mime: String },
    #[error("{path} is {size} bytes; images are limited to {MAX_IMAGE_BYTES} bytes")]
    TooLarge { path: String, size: u64 },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Read an image file into a data-URL asset.
///
/// The MIME type is guessed from the extension and must be `image/*`.
pub fn load_image(path: &Path, now: OffsetDateTime) -> Result<ImageAsset, ImageError> {
    let display = path.display().to_string();

    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(ImageError::NotAnImage {
            path: display,
            mime: mime.to_string(),
        });
    }

    let size = fs::metadata(path)
        .map_err(|source| ImageError::Io {
            path: display.clone(),
            source,
        })?
        .len();
    if size > MAX_IMAGE_BYTES {
        return Err(ImageError::TooLarge {
            path: display,
            size,
        });
    }

    let bytes = fs::read(path).map_err(|source| ImageError::Io {
        path: display.clone(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| display.clone());

    Ok(ImageAsset {
        id: image_id(&name, &bytes, now),
        name,
        data_url: format!("data:{};base64,{}", mime, STANDARD.encode(&bytes)),
    })
}

fn image_id(name: &str, bytes: &[u8], now: OffsetDateTime) -> String {
    let millis = now.unix_timestamp_nanos() / 1_000_000;
    let mut seed = name.as_bytes().to_vec();
    seed.extend_from_slice(bytes);
    let digest = format!("{:x}", md5::compute(seed));
    format!("img_{}_{}", millis, &digest[..9])
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn loads_png_as_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let asset = load_image(&path, datetime!(2025-03-04 05:06:07 UTC)).unwrap();
        assert_eq!(asset.name, "dot.png");
        assert_eq!(asset.data_url, "data:image/png;base64,iVBORw==");
        assert!(asset.id.starts_with("img_1741064767000_"), "{}", asset.id);
        assert_eq!(asset.id.len(), "img_1741064767000_".len() + 9);
    }

    #[test]
    fn rejects_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "hello").unwrap();

        let err = load_image(&path, OffsetDateTime::UNIX_EPOCH).unwrap_err();
        assert!(matches!(err, ImageError::NotAnImage { .. }), "{err}");
    }

    #[test]
    fn rejects_oversized_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.jpg");
        fs::write(&path, vec![0u8; (MAX_IMAGE_BYTES + 1) as usize]).unwrap();

        let err = load_image(&path, OffsetDateTime::UNIX_EPOCH).unwrap_err();
        assert!(matches!(err, ImageError::TooLarge { .. }), "{err}");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_image(Path::new("/nonexistent/x.gif"), OffsetDateTime::UNIX_EPOCH)
            .unwrap_err();
        assert!(matches!(err, ImageError::Io { .. }), "{err}");
    }
}
