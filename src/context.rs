use std::path::PathBuf;

use handlebars::Handlebars;

use crate::gate::AccessGate;
use crate::repository::{Family, Repository};

pub const DEFAULT_MAX_UPLOAD: usize = 5 * 1024 * 1024;

/// Everything a request handler needs, built once at startup and shared
/// through `web::Data`.
#[derive(Debug)]
pub struct Context {
    pub content_dir: PathBuf,
    pub site_name: String,
    pub gate: AccessGate,
    pub handlebars: Handlebars<'static>,
    /// Upper bound for a single multipart field, in bytes.
    pub max_upload: usize,
}

impl Context {
    pub fn new(
        content_dir: PathBuf,
        site_name: String,
        gate: AccessGate,
        handlebars: Handlebars<'static>,
    ) -> Self {
        Self {
            content_dir,
            site_name,
            gate,
            handlebars,
            max_upload: DEFAULT_MAX_UPLOAD,
        }
    }

    pub fn with_max_upload(mut self, max_upload: usize) -> Self {
        self.max_upload = max_upload;
        self
    }

    pub fn repository(&self, family: Family) -> Repository {
        Repository::new(family, &self.content_dir)
    }
}
