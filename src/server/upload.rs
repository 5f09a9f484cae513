//! Validation of uploaded multipart files.
//!
//! The allow-list and size ceiling mirror what the admin upload form
//! produces: timetable screenshots/photos as common image formats, academic
//! calendars as PDFs. Browsers (and some HTTP clients) ship PDFs under a
//! generic binary media type, so `.pdf` + `application/octet-stream` is
//! accepted as a PDF.

use thiserror::Error;

/// Upper bound on uploaded file size.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Accepted image extensions and their canonical media types.
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
];

/// What a given upload field is expected to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    TimetableImage,
    CalendarPdf,
}

/// Input-validation failures for uploads. Always surfaced as HTTP 400.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Please upload a {0}")]
    MissingFile(&'static str),

    #[error("File exceeds the {0} byte upload limit")]
    TooLarge(usize),

    #[error("Only image files are allowed (jpeg, jpg, png, gif, webp)")]
    NotAnImage,

    #[error("Only PDF files are allowed")]
    NotAPdf,

    #[error("Failed to read multipart upload: {0}")]
    Multipart(String),
}

/// Checks the upload against the size ceiling.
pub fn check_size(len: usize) -> Result<(), UploadError> {
    if len > MAX_UPLOAD_BYTES {
        Err(UploadError::TooLarge(MAX_UPLOAD_BYTES))
    } else {
        Ok(())
    }
}

/// Validates the file name/declared media type against the allow-list for
/// the given upload kind and resolves the canonical media type to tag the
/// payload with.
pub fn resolve_media_type(
    kind: UploadKind,
    file_name: &str,
    declared: Option<&str>,
) -> Result<&'static str, UploadError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match kind {
        UploadKind::TimetableImage => {
            let resolved = IMAGE_TYPES
                .iter()
                .find(|(ext, _)| *ext == extension)
                .map(|(_, media_type)| *media_type)
                .ok_or(UploadError::NotAnImage)?;

            // The declared type, when present, must name an allowed image
            // subtype (e.g. both image/jpeg and image/jpg pass).
            match declared {
                Some(d) if IMAGE_TYPES.iter().any(|(ext, _)| d.contains(ext)) => Ok(resolved),
                Some(_) => Err(UploadError::NotAnImage),
                None => Ok(resolved),
            }
        }
        UploadKind::CalendarPdf => {
            if extension != "pdf" {
                return Err(UploadError::NotAPdf);
            }
            match declared {
                // PDFs often arrive under a generic binary type.
                Some("application/pdf") | Some("application/octet-stream") | None => {
                    Ok("application/pdf")
                }
                Some(_) => Err(UploadError::NotAPdf),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_extensions_resolve() {
        for (name, expected) in [
            ("tt.jpg", "image/jpeg"),
            ("tt.JPEG", "image/jpeg"),
            ("tt.png", "image/png"),
            ("tt.webp", "image/webp"),
        ] {
            assert_eq!(
                resolve_media_type(UploadKind::TimetableImage, name, None).unwrap(),
                expected
            );
        }
    }

    #[test]
    fn test_non_image_rejected_for_timetable() {
        let err = resolve_media_type(UploadKind::TimetableImage, "tt.pdf", None).unwrap_err();
        assert!(matches!(err, UploadError::NotAnImage));

        let err = resolve_media_type(UploadKind::TimetableImage, "noextension", None).unwrap_err();
        assert!(matches!(err, UploadError::NotAnImage));
    }

    #[test]
    fn test_mismatched_declared_type_rejected() {
        let err = resolve_media_type(
            UploadKind::TimetableImage,
            "tt.png",
            Some("application/pdf"),
        )
        .unwrap_err();
        assert!(matches!(err, UploadError::NotAnImage));
    }

    #[test]
    fn test_pdf_accepted_with_pdf_or_generic_type() {
        for declared in [Some("application/pdf"), Some("application/octet-stream"), None] {
            assert_eq!(
                resolve_media_type(UploadKind::CalendarPdf, "cal.pdf", declared).unwrap(),
                "application/pdf"
            );
        }
    }

    #[test]
    fn test_pdf_rejected_with_wrong_extension_or_type() {
        let err = resolve_media_type(UploadKind::CalendarPdf, "cal.png", None).unwrap_err();
        assert!(matches!(err, UploadError::NotAPdf));

        let err =
            resolve_media_type(UploadKind::CalendarPdf, "cal.pdf", Some("image/png")).unwrap_err();
        assert!(matches!(err, UploadError::NotAPdf));
    }

    #[test]
    fn test_size_ceiling() {
        assert!(check_size(MAX_UPLOAD_BYTES).is_ok());
        assert!(matches!(
            check_size(MAX_UPLOAD_BYTES + 1),
            Err(UploadError::TooLarge(_))
        ));
    }
}
