use std::collections::HashMap;

use actix_multipart::Multipart;
use actix_web::dev::UrlEncoded;
use actix_web::{web, HttpMessage, HttpRequest};
use futures_util::TryStreamExt;

use crate::error::{ContentError, Result};
use crate::metadata::Upload;

/// A decoded form body, either `multipart/form-data` or
/// `application/x-www-form-urlencoded`. Parts carrying a filename are kept as
/// uploads, the rest as text fields.
///
/// A field that is too large or not UTF-8 does not stop the decoding; it is
/// left out and reported by [`FormData::finish`], so the key can still be
/// checked first.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, Upload>,
    rejected: Option<ContentError>,
}

fn malformed(e: impl std::fmt::Display) -> ContentError {
    ContentError::validation(format!("malformed form: {e}"))
}

fn too_large(name: &str, limit: usize) -> ContentError {
    ContentError::validation(format!("field {name:?} exceeds {limit} bytes"))
}

fn not_utf8(name: &str) -> ContentError {
    ContentError::validation(format!("field {name:?} is not utf-8"))
}

impl FormData {
    /// Decodes the request body according to its content type. Any single
    /// field larger than `limit` bytes is dropped and remembered.
    pub async fn read(req: &HttpRequest, payload: web::Payload, limit: usize) -> Result<Self> {
        match req.content_type() {
            "multipart/form-data" => {
                Self::read_multipart(Multipart::new(req.headers(), payload), limit).await
            }
            "application/x-www-form-urlencoded" => {
                // percent-encoding can triple a field
                let mut payload = payload.into_inner();
                let pairs: HashMap<String, String> = UrlEncoded::new(req, &mut payload)
                    .limit(limit.saturating_mul(3))
                    .await
                    .map_err(malformed)?;
                Ok(Self::from_pairs(pairs, limit))
            }
            other => Err(ContentError::validation(format!(
                "unsupported form encoding {other:?}"
            ))),
        }
    }

    async fn read_multipart(mut payload: Multipart, limit: usize) -> Result<Self> {
        let mut form = FormData::default();

        while let Some(mut field) = payload.try_next().await.map_err(malformed)? {
            let disposition = field.content_disposition();
            let Some(name) = disposition.get_name().map(str::to_string) else {
                continue;
            };
            let filename = disposition.get_filename().map(str::to_string);

            let mut bytes = Vec::new();
            let mut oversized = false;
            while let Some(chunk) = field.try_next().await.map_err(malformed)? {
                if oversized {
                    continue;
                }
                if bytes.len() + chunk.len() > limit {
                    oversized = true;
                    bytes = Vec::new();
                    continue;
                }
                bytes.extend_from_slice(&chunk);
            }

            if oversized {
                form.reject(too_large(&name, limit));
                continue;
            }
            match filename {
                Some(filename) => {
                    form.files.insert(name, Upload { filename, bytes });
                }
                None => match String::from_utf8(bytes) {
                    Ok(value) => {
                        form.fields.insert(name, value);
                    }
                    Err(_) => form.reject(not_utf8(&name)),
                },
            }
        }

        Ok(form)
    }

    fn from_pairs(pairs: HashMap<String, String>, limit: usize) -> Self {
        let mut form = FormData::default();
        for (name, value) in pairs {
            if value.len() > limit {
                form.reject(too_large(&name, limit));
            } else {
                form.fields.insert(name, value);
            }
        }
        form
    }

    /// Keeps the first decoding failure only.
    fn reject(&mut self, e: ContentError) {
        log::debug!("form field dropped: {e}");
        self.rejected.get_or_insert(e);
    }

    /// Reports a field dropped while decoding, if any.
    pub fn finish(&mut self) -> Result<()> {
        match self.rejected.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Text field as submitted; may be empty.
    pub fn take_field(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    pub fn take_file(&mut self, name: &str) -> Option<Upload> {
        self.files.remove(name)
    }

    #[cfg(test)]
    pub(crate) fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }

    #[cfg(test)]
    pub(crate) fn with_file(mut self, name: &str, filename: &str, body: &str) -> Self {
        self.files.insert(
            name.to_string(),
            Upload {
                filename: filename.to_string(),
                bytes: body.as_bytes().to_vec(),
            },
        );
        self
    }
}
