//! Routes of the advertisement list.
//!
//! The list is rendered from the request query string alone. Sidebar and
//! pager forms post the query they were rendered with and get redirected to
//! the next location.

use actix_session::Session;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::list::{FilterForm, PageForm, SortForm};
use crate::preferences::{Preferences, SessionPreferencesStore, system_theme};
use crate::query::QueryString;
use crate::repository::HttpRepository;
use crate::routes::{
    base_context, current_location, parse_form, redirect, render_error, render_template,
};
use crate::services::categories::CategoryCache;
use crate::services::list::{self as list_service, LIST_PATH};
use crate::services::ServiceError;

#[get("/")]
pub async fn index() -> impl Responder {
    redirect(LIST_PATH)
}

/// Show one page of advertisements for the filter, sort and page in the URL.
#[get("/list")]
pub async fn show_list(
    req: HttpRequest,
    session: Session,
    repo: web::Data<HttpRepository>,
    categories: web::Data<CategoryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let prefs = Preferences::load(SessionPreferencesStore::new(session), system_theme(&req)).get();
    let query = QueryString::parse(req.query_string());
    let mut context = base_context(&flash_messages, &prefs, "list");
    context.insert("back", &current_location(&req));

    match list_service::load_list_page(repo.get_ref(), &categories, &query, prefs.page_limit).await
    {
        Ok(data) => {
            context.insert("ads", &data.ads);
            context.insert("has_prev", &data.ads.has_prev());
            context.insert("has_next", &data.ads.has_next());
            context.insert("filter", &data.filter);
            context.insert("filter_is_default", &data.filter.is_default());
            context.insert("sort", &data.sort);
            context.insert("order_hint", data.sort.order_hint());
            context.insert("query", &data.query);
            context.insert("status_options", &data.status_options);
            context.insert("sort_options", &data.sort_options);
            context.insert("categories", &data.categories);
            render_template(&tera, "list/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load list page: {err}");
            render_error(
                &tera,
                context,
                StatusCode::BAD_GATEWAY,
                "Ошибка при получении объявлений",
            )
        }
    }
}

#[post("/list/filter")]
pub async fn filter_list(body: web::Bytes) -> impl Responder {
    let form: FilterForm = match parse_form(&body) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to parse filter form: {err}");
            FlashMessage::error("Ошибка валидации формы").send();
            return redirect(LIST_PATH);
        }
    };

    redirect(&list_service::apply_filter_form(&form))
}

#[post("/list/sort")]
pub async fn sort_list(body: web::Bytes) -> impl Responder {
    match parse_form::<SortForm>(&body) {
        Ok(form) => redirect(&list_service::apply_sort_form(&form)),
        Err(err) => {
            log::error!("Failed to parse sort form: {err}");
            redirect(LIST_PATH)
        }
    }
}

/// Flip the ordering direction, keeping the sort key.
#[post("/list/sort/toggle")]
pub async fn toggle_sort_order(body: web::Bytes) -> impl Responder {
    match parse_form::<SortForm>(&body) {
        Ok(form) => redirect(&list_service::toggle_sort_order(&form.current_query())),
        Err(err) => {
            log::error!("Failed to parse sort form: {err}");
            redirect(LIST_PATH)
        }
    }
}

/// Move to another page; a changed page size is remembered in the session.
#[post("/list/page")]
pub async fn page_list(req: HttpRequest, session: Session, body: web::Bytes) -> impl Responder {
    let form: PageForm = match parse_form(&body) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to parse page form: {err}");
            return redirect(LIST_PATH);
        }
    };

    match list_service::apply_page_form(&form) {
        Ok(change) => {
            if let Some(limit) = change.limit {
                let prefs =
                    Preferences::load(SessionPreferencesStore::new(session), system_theme(&req));
                if let Err(err) = prefs.set_page_limit(limit) {
                    log::error!("Failed to save page size: {err}");
                    FlashMessage::error("Не удалось сохранить размер страницы.").send();
                }
            }
            redirect(&change.location)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&form.current_query().to_location(LIST_PATH))
        }
        Err(err) => {
            log::error!("Failed to change page: {err}");
            redirect(&form.current_query().to_location(LIST_PATH))
        }
    }
}

#[post("/list/reset")]
pub async fn reset_list() -> impl Responder {
    redirect(&list_service::reset_filters())
}
