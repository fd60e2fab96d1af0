use std::path::PathBuf;

use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::{bail, Context as _};
use clap::{command, value_parser, Arg};
use dotenv::dotenv;
use log::info;

use folio::context::{Context, DEFAULT_MAX_UPLOAD};
use folio::gate::AccessGate;
use folio::repository::Family;
use folio::{controllers, renderer};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let matches = command!()
        .args(&[
            Arg::new("content_dir")
                .long("content-dir")
                .env("FOLIO_CONTENT_DIR")
                .help("Directory holding posts/, projects/ and notes/. Missing ones are created.")
                .value_parser(value_parser!(PathBuf))
                .default_value("."),
            Arg::new("template_dir")
                .long("template-dir")
                .env("FOLIO_TEMPLATE_DIR")
                .help("Directory of templates")
                .value_parser(value_parser!(PathBuf))
                .default_value("templates"),
            Arg::new("static_dir")
                .long("static-dir")
                .env("FOLIO_STATIC_DIR")
                .help("Directory served as it is under /static, if it exists")
                .value_parser(value_parser!(PathBuf))
                .default_value("static"),
            Arg::new("bind")
                .long("bind")
                .env("FOLIO_BIND")
                .help("Address to listen on")
                .default_value("127.0.0.1:5000"),
            Arg::new("max_upload")
                .long("max-upload")
                .env("FOLIO_MAX_UPLOAD")
                .help("Largest accepted form field, in bytes [default: 5 MiB]")
                .value_parser(value_parser!(usize)),
        ])
        .get_matches();

    let content_dir: &PathBuf = matches.get_one("content_dir").unwrap();
    if content_dir.exists() && !content_dir.is_dir() {
        bail!("content_dir must be a directory.");
    }
    let template_dir: &PathBuf = matches.get_one("template_dir").unwrap();
    if !template_dir.is_dir() {
        bail!("template_dir must be a directory.");
    }
    let static_dir: PathBuf = matches.get_one::<PathBuf>("static_dir").unwrap().clone();
    let bind: String = matches.get_one::<String>("bind").unwrap().clone();
    let max_upload = matches
        .get_one::<usize>("max_upload")
        .copied()
        .unwrap_or(DEFAULT_MAX_UPLOAD);

    let handlebars = renderer::generate_renderer(template_dir)?;
    let ctx = Context::new(
        content_dir.to_owned(),
        std::env::var("SITE_NAME").unwrap_or_default(),
        AccessGate::from_env(),
        handlebars,
    )
    .with_max_upload(max_upload);

    for family in Family::ALL {
        ctx.repository(family)
            .init()
            .with_context(|| format!("while creating {family} directory"))?;
    }

    let ctx = web::Data::new(ctx);
    let serve_static = static_dir.is_dir();
    let writes = if ctx.gate.is_configured() {
        "enabled"
    } else {
        "locked"
    };
    info!("listening on http://{bind} (writes {writes})");

    HttpServer::new(move || {
        let mut app = App::new()
            .app_data(ctx.clone())
            .wrap(Logger::default());
        if serve_static {
            app = app.service(Files::new("/static", &static_dir));
        }
        app.configure(controllers::configure)
    })
    .bind(&bind)
    .with_context(|| format!("while binding {bind}"))?
    .run()
    .await?;

    Ok(())
}
