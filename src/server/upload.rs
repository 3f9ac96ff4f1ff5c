//! Multipart form decoding for broadcast uploads.
//!
//! Recognized fields:
//! - `file`: the CSV contact list
//! - `from_number`: caller-ID number
//! - `message_url` (or `audio_url`): audio / call-instruction URL
//!
//! Unknown fields are drained and ignored.

use crate::error::{BroadcastError, BroadcastResult};
use crate::services::{BroadcastSubmission, UploadedFile};
use actix_multipart::{Field, Multipart};
use futures::StreamExt;
use tracing::debug;

/// Read a whole multipart upload into a submission, enforcing a per-field size limit.
pub async fn read_submission(
    mut payload: Multipart,
    max_field_bytes: usize,
) -> BroadcastResult<BroadcastSubmission> {
    let mut submission = BroadcastSubmission::default();

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| BroadcastError::MalformedUpload(format!("Multipart error: {}", e)))?;

        let (name, filename) = match field.content_disposition() {
            Some(disposition) => (
                disposition.get_name().map(str::to_string),
                disposition.get_filename().map(str::to_string),
            ),
            None => (None, None),
        };

        match name.as_deref() {
            Some("file") => {
                submission.file = Some(UploadedFile {
                    filename: filename.unwrap_or_default(),
                    bytes: read_field(&mut field, max_field_bytes).await?,
                });
            }
            Some("from_number") => {
                let bytes = read_field(&mut field, max_field_bytes).await?;
                submission.from_number = Some(field_text("from_number", bytes)?);
            }
            Some("message_url") | Some("audio_url") => {
                let bytes = read_field(&mut field, max_field_bytes).await?;
                submission.message_url = Some(field_text("message_url", bytes)?);
            }
            other => {
                debug!(field = ?other, "Ignoring unknown form field");
                drain_field(&mut field).await?;
            }
        }
    }

    Ok(submission)
}

async fn read_field(field: &mut Field, max_bytes: usize) -> BroadcastResult<Vec<u8>> {
    let mut bytes = Vec::new();

    while let Some(chunk) = field.next().await {
        let chunk =
            chunk.map_err(|e| BroadcastError::MalformedUpload(format!("Chunk error: {}", e)))?;

        if bytes.len() + chunk.len() > max_bytes {
            return Err(BroadcastError::PayloadTooLarge { max: max_bytes });
        }

        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

/// Consume a field without keeping its contents.
async fn drain_field(field: &mut Field) -> BroadcastResult<()> {
    while let Some(chunk) = field.next().await {
        chunk.map_err(|e| BroadcastError::MalformedUpload(format!("Chunk error: {}", e)))?;
    }

    Ok(())
}

fn field_text(name: &str, bytes: Vec<u8>) -> BroadcastResult<String> {
    String::from_utf8(bytes)
        .map_err(|_| BroadcastError::MalformedUpload(format!("Field {} is not valid UTF-8", name)))
}
