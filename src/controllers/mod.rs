//! HTTP surface. Every family gets the same set of routes under its own
//! prefix; `/` and `/about` aggregate across families.

use actix_web::{http::header, web, HttpResponse};
use serde::Serialize;

use crate::context::Context;
use crate::error::{ContentError, Result};
use crate::repository::Family;

pub mod cards;
pub mod data;
pub mod form;
pub mod items;
pub mod pages;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(pages::config);
    for family in Family::ALL {
        cfg.service(items::scope(family));
    }
}

/// Runs filesystem or hashing work on the blocking pool.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    web::block(f)
        .await
        .map_err(|e| ContentError::Internal(e.to_string()))?
}

pub(crate) fn render<T: Serialize>(ctx: &Context, template: &str, data: &T) -> Result<HttpResponse> {
    let body = ctx.handlebars.render(template, data)?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}

pub(crate) fn redirect(location: String) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}
