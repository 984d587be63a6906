//! Actix-web handlers and the helpers they share.

use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{HttpRequest, HttpResponse, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::de::DeserializeOwned;
use tera::{Context, Tera};

use crate::preferences::UiPreferences;

pub mod item;
pub mod list;
pub mod preferences;
pub mod stats;

/// Registers every dashboard route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list::index)
        .service(list::show_list)
        .service(list::filter_list)
        .service(list::sort_list)
        .service(list::toggle_sort_order)
        .service(list::page_list)
        .service(list::reset_list)
        .service(item::show_item)
        .service(item::approve_item)
        .service(item::reject_item)
        .service(item::request_changes_item)
        .service(stats::show_stats)
        .service(preferences::toggle_theme)
        .service(preferences::set_page_limit);
}

/// Maps a flash message level to the CSS alert class used by the templates.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// `303 See Other` to `location`: the browser replaces the POST with a GET.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}

/// Context shared by every page: alerts, preferences and the active menu entry.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    prefs: &UiPreferences,
    current_page: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("theme", &prefs.theme.to_string());
    context.insert("page_limit", &prefs.page_limit.get());
    context.insert("current_page", current_page);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    render_with_status(tera, template, context, StatusCode::OK)
}

fn render_with_status(
    tera: &Tera,
    template: &str,
    context: &Context,
    status: StatusCode,
) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Error page shown when a page cannot be loaded.
pub fn render_error(
    tera: &Tera,
    mut context: Context,
    status: StatusCode,
    message: &str,
) -> HttpResponse {
    context.insert("message", message);
    render_with_status(tera, "error.html", &context, status)
}

/// Decodes an urlencoded body. Repeated keys are collected into `Vec` fields.
pub fn parse_form<T: DeserializeOwned>(body: &[u8]) -> Result<T, String> {
    serde_html_form::from_bytes(body).map_err(|err| err.to_string())
}

/// Path and query of the current request, used as the "back" target.
pub fn current_location(req: &HttpRequest) -> String {
    match req.query_string() {
        "" => req.path().to_string(),
        query => format!("{}?{}", req.path(), query),
    }
}
