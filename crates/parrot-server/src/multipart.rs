//! Multipart extraction and submission validation.
//!
//! Everything the engine's `create` contract asks the boundary to guarantee
//! happens here: the MIME type is checked against the supported set, and the
//! metadata map arrives already merged (defaults, then plain form fields,
//! then the optional `metadata` JSON blob).

use std::collections::HashMap;

use axum::extract::Multipart;
use parrot_core::UploadSubmission;
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;

/// MIME types accepted for upload (the M4A and WAV families).
pub const SUPPORTED_MIME_TYPES: &[&str] = &[
    "audio/mp4",
    "audio/x-m4a",
    "audio/m4a",
    "audio/wav",
    "audio/x-wav",
];

pub fn is_supported_mime(mime: &str) -> bool {
    SUPPORTED_MIME_TYPES
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(mime))
}

/// Read the whole multipart body into an [`UploadSubmission`].
///
/// Expects a `file` part plus any number of text fields. A field named
/// `metadata` is treated as a JSON blob of extra metadata.
pub async fn read_submission(mut multipart: Multipart) -> Result<UploadSubmission, ApiError> {
    let mut file: Option<(String, String, u64)> = None;
    let mut fields: Vec<(String, String)> = Vec::new();
    let mut metadata_blob: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::MalformedRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let mime_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::MalformedRequest(e.to_string()))?;
            file = Some((filename, mime_type, bytes.len() as u64));
        } else if name == "metadata" {
            metadata_blob = field.text().await.ok();
        } else if let Ok(text) = field.text().await {
            fields.push((name, text));
        }
    }

    let (filename, mime_type, size) = file.ok_or(ApiError::MissingFile)?;
    if !is_supported_mime(&mime_type) {
        return Err(ApiError::UnsupportedFormat(mime_type));
    }

    let metadata = merge_metadata(&fields, metadata_blob.as_deref());
    Ok(UploadSubmission {
        filename,
        mime_type,
        size,
        metadata,
    })
}

/// Merge order: defaults, then plain form fields, then the JSON blob.
///
/// An unparseable or non-object blob is silently ignored; the client never
/// sees an error for it.
pub fn merge_metadata(fields: &[(String, String)], blob: Option<&str>) -> HashMap<String, Value> {
    let mut metadata = HashMap::new();
    metadata.insert("language".to_string(), Value::from("en"));
    metadata.insert("speakerCount".to_string(), Value::from(1));

    for (name, value) in fields {
        // Numeric form values (e.g. speakerCount) keep their numeric shape.
        let parsed = value
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::from(value.clone()));
        metadata.insert(name.clone(), parsed);
    }

    if let Some(blob) = blob {
        match serde_json::from_str::<Value>(blob) {
            Ok(Value::Object(extra)) => {
                for (key, value) in extra {
                    metadata.insert(key, value);
                }
            }
            _ => debug!("ignoring unparseable metadata blob"),
        }
    }

    metadata
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::mp4("audio/mp4")]
    #[case::x_m4a("audio/x-m4a")]
    #[case::m4a("audio/m4a")]
    #[case::wav("audio/wav")]
    #[case::x_wav("audio/x-wav")]
    fn supported_formats_pass(#[case] mime: &str) {
        assert!(is_supported_mime(mime));
    }

    #[rstest]
    #[case::mp3("audio/mpeg")]
    #[case::ogg("audio/ogg")]
    #[case::binary("application/octet-stream")]
    fn unsupported_formats_fail(#[case] mime: &str) {
        assert!(!is_supported_mime(mime));
    }

    #[test]
    fn mime_check_is_case_insensitive() {
        assert!(is_supported_mime("Audio/WAV"));
    }

    #[test]
    fn merge_starts_from_defaults() {
        let metadata = merge_metadata(&[], None);
        assert_eq!(metadata["language"], Value::from("en"));
        assert_eq!(metadata["speakerCount"], Value::from(1));
        assert_eq!(metadata.len(), 2);
    }

    #[test]
    fn form_fields_override_defaults() {
        let fields = vec![
            ("language".to_string(), "de".to_string()),
            ("speakerCount".to_string(), "3".to_string()),
        ];
        let metadata = merge_metadata(&fields, None);
        assert_eq!(metadata["language"], Value::from("de"));
        assert_eq!(metadata["speakerCount"], Value::from(3));
    }

    #[test]
    fn blob_overrides_fields() {
        let fields = vec![("language".to_string(), "de".to_string())];
        let metadata = merge_metadata(&fields, Some(r#"{"language": "fr", "meeting": "standup"}"#));
        assert_eq!(metadata["language"], Value::from("fr"));
        assert_eq!(metadata["meeting"], Value::from("standup"));
        assert_eq!(metadata["speakerCount"], Value::from(1));
    }

    #[rstest]
    #[case::not_json("{{{")]
    #[case::not_an_object(r#"[1, 2, 3]"#)]
    #[case::scalar(r#""hello""#)]
    fn bad_blobs_are_silently_ignored(#[case] blob: &str) {
        let metadata = merge_metadata(&[], Some(blob));
        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata["language"], Value::from("en"));
    }
}
