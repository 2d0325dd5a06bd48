//! Attachment markers
//!
//! Attaching a file appends a marker line with its name to the message
//! text. Only the name travels; no file bytes are uploaded.

use crate::error::{ClientError, ClientResult};

/// Prefix of the marker line
pub const ATTACHMENT_MARKER: &str = "📎 ";

/// `content` followed by a marker line for `file_name`
pub fn with_attachment(content: &str, file_name: &str) -> ClientResult<String> {
    let name = file_name.trim();
    if name.is_empty() || name.contains(['\n', '\r']) {
        return Err(ClientError::Validation(format!(
            "Nome de arquivo inválido: {file_name:?}"
        )));
    }

    let text = content.trim_end();
    if text.is_empty() {
        Ok(format!("{ATTACHMENT_MARKER}{name}"))
    } else {
        Ok(format!("{text}\n{ATTACHMENT_MARKER}{name}"))
    }
}

/// Split message text into the body and the attached file name, if any
pub fn split_attachment(content: &str) -> (&str, Option<&str>) {
    let (body, last) = match content.rsplit_once('\n') {
        Some((body, last)) => (body, last),
        None => ("", content),
    };
    match last.strip_prefix(ATTACHMENT_MARKER) {
        Some(name) if !name.trim().is_empty() => (body, Some(name.trim())),
        _ => (content, None),
    }
}
