use actix_web::{web, HttpResponse};

use crate::context::Context;
use crate::error::{ContentError, Result};
use crate::repository::{Family, Repository};

use super::cards::render_card;
use super::data::{AboutPageData, FeaturedSlot, IndexPageData, Section};
use super::{blocking, render};

const ABOUT_FAMILIES: [Family; 2] = [Family::Projects, Family::Notes];

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/about", web::get().to(about));
}

/// Landing page: one random item from each family. An empty family shows a
/// placeholder instead of failing the page.
async fn index(ctx: web::Data<Context>) -> Result<HttpResponse> {
    let repos: Vec<Repository> = Family::ALL.iter().map(|f| ctx.repository(*f)).collect();
    let slots = blocking(move || {
        repos
            .iter()
            .map(|repo| {
                let family = repo.family();
                let item = match repo.get_one(None) {
                    Ok(item) => Some(item),
                    Err(ContentError::Empty(_)) => None,
                    Err(e) => return Err(e),
                };
                Ok(FeaturedSlot {
                    family,
                    label: family.label(),
                    item,
                    placeholder: ContentError::Empty(family).to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()
    })
    .await?;

    let data = IndexPageData {
        site_name: &ctx.site_name,
        slots,
    };
    render(&ctx, "index", &data)
}

async fn about(ctx: web::Data<Context>) -> Result<HttpResponse> {
    let repos: Vec<Repository> = ABOUT_FAMILIES.iter().map(|f| ctx.repository(*f)).collect();
    let listings = blocking(move || {
        repos
            .iter()
            .map(|repo| Ok((repo.family(), repo.list_all()?)))
            .collect::<Result<Vec<_>>>()
    })
    .await?;

    let sections = listings
        .into_iter()
        .map(|(family, items)| Section {
            family,
            label: family.label(),
            cards: items.iter().map(|item| render_card(family, item)).collect(),
        })
        .collect();
    let data = AboutPageData {
        site_name: &ctx.site_name,
        sections,
    };
    render(&ctx, "about", &data)
}
