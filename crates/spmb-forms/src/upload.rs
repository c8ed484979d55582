//! File handles and the upload policy.
//!
//! The policy is fixed: at most [`MAX_FILE_SIZE`] bytes and a MIME type in
//! [`ALLOWED_FILE_TYPES`]. Files are referenced by an opaque handle; the
//! bytes themselves never pass through the form engine.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use spmb_core::FileConstraintError;

/// Maximum accepted upload size (5 MiB).
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// MIME types accepted for upload fields.
pub const ALLOWED_FILE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/jpg", "application/pdf"];

/// Hint shown below every file input.
pub const UPLOAD_HINT: &str = "Format: JPG, PNG, PDF (Maks. 5MB)";

/// An opaque reference to a file picked by the applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileHandle {
    /// The original filename.
    pub name: String,
    /// The MIME content type reported for the file.
    pub content_type: String,
    /// The file size in bytes.
    pub size: u64,
    /// Opaque handle understood by the upload collaborator.
    pub reference: String,
}

impl FileHandle {
    /// Creates a handle with a freshly generated reference.
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            size,
            reference: format!("upload-{}", Uuid::new_v4().simple()),
        }
    }

    /// Replaces the generated reference.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }
}

/// Checks a file against the upload policy.
///
/// The size is checked before the type.
///
/// # Errors
///
/// Returns [`FileConstraintError::TooLarge`] or
/// [`FileConstraintError::UnsupportedType`].
pub fn check_file_constraints(file: &FileHandle) -> Result<(), FileConstraintError> {
    if file.size > MAX_FILE_SIZE {
        return Err(FileConstraintError::TooLarge {
            size: file.size,
            max: MAX_FILE_SIZE,
        });
    }
    let content_type = file.content_type.trim().to_ascii_lowercase();
    if !ALLOWED_FILE_TYPES.contains(&content_type.as_str()) {
        return Err(FileConstraintError::UnsupportedType(file.content_type.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: u64 = 1024 * 1024;

    #[test]
    fn test_accepts_pdf_under_limit() {
        let file = FileHandle::new("ijazah.pdf", "application/pdf", 3 * MIB);
        assert!(check_file_constraints(&file).is_ok());
    }

    #[test]
    fn test_accepts_exact_limit() {
        let file = FileHandle::new("foto.png", "image/png", MAX_FILE_SIZE);
        assert!(check_file_constraints(&file).is_ok());
    }

    #[test]
    fn test_rejects_oversized_before_type() {
        let file = FileHandle::new("video.mp4", "video/mp4", 6 * MIB);
        assert_eq!(
            check_file_constraints(&file),
            Err(FileConstraintError::TooLarge {
                size: 6 * MIB,
                max: MAX_FILE_SIZE
            })
        );
    }

    #[test]
    fn test_rejects_unsupported_type() {
        let file = FileHandle::new("nilai.docx", "application/msword", MIB);
        assert!(matches!(
            check_file_constraints(&file),
            Err(FileConstraintError::UnsupportedType(t)) if t == "application/msword"
        ));
    }

    #[test]
    fn test_type_check_ignores_case() {
        let file = FileHandle::new("foto.JPG", "Image/JPEG", MIB);
        assert!(check_file_constraints(&file).is_ok());
    }

    #[test]
    fn test_generated_references_differ() {
        let a = FileHandle::new("a.pdf", "application/pdf", 1);
        let b = FileHandle::new("a.pdf", "application/pdf", 1);
        assert_ne!(a.reference, b.reference);
        assert!(a.reference.starts_with("upload-"));
        assert_eq!(a.with_reference("blob:1").reference, "blob:1");
    }
}
