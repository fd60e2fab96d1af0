use actix_files::NamedFile;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpRequest, HttpResponse, Scope};

use crate::context::Context;
use crate::error::{ContentError, Result};
use crate::metadata::{Submission, UpdateAction, UpdateOutcome};
use crate::repository::{Family, NEW_CATEGORY};

use super::cards::{item_href, render_card};
use super::data::{AddPageData, ItemPageData, ListPageData, UpdatePageData};
use super::form::FormData;
use super::{blocking, redirect, render};

/// All routes of one family, mounted under `/<family>`.
///
/// `/add` is registered ahead of `/{slug}` so it is never taken for a slug.
pub fn scope(family: Family) -> Scope {
    web::scope(&format!("/{family}"))
        .app_data(web::Data::new(family))
        .route("", web::get().to(list))
        .service(
            web::resource("/add")
                .route(web::get().to(add_form))
                .route(web::post().to(create)),
        )
        .route("/download/{category}/{slug}", web::get().to(download))
        .service(
            web::resource("/update/{category}/{slug}")
                .route(web::get().to(update_form))
                .route(web::post().to(update)),
        )
        .route("/{category}/{slug}", web::get().to(show))
        .route("/{slug}", web::get().to(short_link))
}

async fn list(ctx: web::Data<Context>, family: web::Data<Family>) -> Result<HttpResponse> {
    let family = *family.get_ref();
    let repo = ctx.repository(family);
    let (items, example) = blocking(move || {
        let items = repo.list_all()?;
        let example = repo.get_one(Some(0))?;
        Ok((items, example))
    })
    .await?;

    let data = ListPageData {
        site_name: &ctx.site_name,
        family,
        label: family.label(),
        path: format!("/{family}"),
        cards: items.iter().map(|item| render_card(family, item)).collect(),
        example,
    };
    render(&ctx, "list", &data)
}

async fn show(
    ctx: web::Data<Context>,
    family: web::Data<Family>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let family = *family.get_ref();
    let (category, slug) = path.into_inner();
    let repo = ctx.repository(family);
    let page = blocking(move || repo.get_by_slug(&category, &slug)).await?;

    let data = ItemPageData {
        site_name: &ctx.site_name,
        family,
        path: item_href(family, &page.category, &page.slug),
        meta: &page,
    };
    render(&ctx, "item", &data)
}

async fn short_link(
    ctx: web::Data<Context>,
    family: web::Data<Family>,
    slug: web::Path<String>,
) -> Result<HttpResponse> {
    let family = *family.get_ref();
    let repo = ctx.repository(family);
    let slug = slug.into_inner();
    let key = blocking(move || repo.locate(&slug)).await?;
    Ok(redirect(item_href(family, &key.category, &key.slug)))
}

async fn download(
    ctx: web::Data<Context>,
    family: web::Data<Family>,
    path: web::Path<(String, String)>,
) -> Result<NamedFile> {
    let (category, slug) = path.into_inner();
    let repo = ctx.repository(*family.get_ref());
    let filename = format!("{slug}.md");
    let file_path = blocking(move || repo.download(&category, &slug)).await?;

    let file = NamedFile::open_async(&file_path).await?;
    Ok(file.set_content_disposition(ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(filename)],
    }))
}

async fn add_form(ctx: web::Data<Context>, family: web::Data<Family>) -> Result<HttpResponse> {
    let family = *family.get_ref();
    let repo = ctx.repository(family);
    let categories = blocking(move || repo.categories()).await?;

    let data = AddPageData {
        site_name: &ctx.site_name,
        family,
        label: family.label(),
        categories,
        new_category: NEW_CATEGORY,
    };
    render(&ctx, "add", &data)
}

async fn create(
    ctx: web::Data<Context>,
    family: web::Data<Family>,
    req: HttpRequest,
    payload: web::Payload,
) -> Result<HttpResponse> {
    let family = *family.get_ref();
    let mut form = FormData::read(&req, payload, ctx.max_upload).await?;
    let psw = form.take_field("psw");
    let decoded = form.finish();
    let submission = Submission {
        title: form.take_field("title"),
        file: form.take_file("file"),
        category_select: form.take_field("category_select"),
        new_category: form.take_field("new_category"),
        new_keywords: form.take_field("new_keywords"),
    };

    let gate = ctx.gate.clone();
    let repo = ctx.repository(family);
    blocking(move || {
        let auth = gate.verify(psw.as_deref())?;
        decoded?;
        repo.create(&auth, submission)
    })
    .await?;

    Ok(redirect(format!("/{family}")))
}

async fn update_form(
    ctx: web::Data<Context>,
    family: web::Data<Family>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let family = *family.get_ref();
    let (category, slug) = path.into_inner();
    let repo = ctx.repository(family);
    let content = {
        let (category, slug) = (category.clone(), slug.clone());
        blocking(move || repo.read_source(&category, &slug)).await?
    };

    let data = UpdatePageData {
        site_name: &ctx.site_name,
        family,
        path: item_href(family, &category, &slug),
        category,
        slug,
        content,
    };
    render(&ctx, "update", &data)
}

/// Picks the action named by the `action` field and pulls its fields.
fn update_action(action: Option<&str>, form: &mut FormData) -> Result<UpdateAction> {
    match action {
        Some("save") => {
            let content = form
                .take_field("content")
                .ok_or_else(|| ContentError::validation("content is missing"))?;
            Ok(UpdateAction::Save { content })
        }
        Some("upload") => {
            let file = form
                .take_file("file")
                .filter(|f| !f.filename.is_empty())
                .ok_or_else(|| ContentError::validation("no file selected"))?;
            Ok(UpdateAction::Upload(file))
        }
        Some("delete") => {
            let confirm_slug = form
                .take_field("confirm_slug")
                .filter(|s| !s.is_empty())
                .ok_or_else(|| ContentError::validation("confirmation slug is missing"))?;
            Ok(UpdateAction::Delete { confirm_slug })
        }
        Some(other) => Err(ContentError::validation(format!("unknown action {other:?}"))),
        None => Err(ContentError::validation("action is missing")),
    }
}

async fn update(
    ctx: web::Data<Context>,
    family: web::Data<Family>,
    path: web::Path<(String, String)>,
    req: HttpRequest,
    payload: web::Payload,
) -> Result<HttpResponse> {
    let family = *family.get_ref();
    let (category, slug) = path.into_inner();
    let mut form = FormData::read(&req, payload, ctx.max_upload).await?;
    let key = form.take_field("key");
    let action = form.take_field("action");

    let gate = ctx.gate.clone();
    let repo = ctx.repository(family);
    let outcome = {
        let (category, slug) = (category.clone(), slug.clone());
        blocking(move || {
            let auth = gate.verify(key.as_deref())?;
            form.finish()?;
            let action = update_action(action.as_deref(), &mut form)?;
            repo.update(&auth, &category, &slug, action)
        })
        .await?
    };

    Ok(match outcome {
        UpdateOutcome::Saved | UpdateOutcome::Replaced => {
            redirect(item_href(family, &category, &slug))
        }
        UpdateOutcome::Deleted => redirect(format!("/{family}")),
    })
}
