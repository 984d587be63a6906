//! Routes of the advertisement detail page and the moderation actions.

use actix_session::Session;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::types::REJECTION_REASONS;
use crate::dto::item::ItemQuery;
use crate::forms::item::DecisionForm;
use crate::preferences::{Preferences, SessionPreferencesStore, system_theme};
use crate::query::QueryString;
use crate::repository::HttpRepository;
use crate::routes::{
    base_context, current_location, parse_form, redirect, render_error, render_template,
};
use crate::services::item as item_service;
use crate::services::list::LIST_PATH;
use crate::services::{ServiceError, ServiceResult};

fn item_location(id: i32, nav: &str) -> String {
    if nav.is_empty() {
        format!("/item/{id}")
    } else {
        format!("/item/{id}?{nav}")
    }
}

/// Show an advertisement with its moderation history.
#[get("/item/{id}")]
pub async fn show_item(
    req: HttpRequest,
    id: web::Path<i32>,
    session: Session,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let prefs = Preferences::load(SessionPreferencesStore::new(session), system_theme(&req)).get();
    let mut context = base_context(&flash_messages, &prefs, "item");
    context.insert("back", &current_location(&req));
    let id = id.into_inner();
    let nav = ItemQuery::from_query(&QueryString::parse(req.query_string()));

    match item_service::load_item_page(repo.get_ref(), id, &nav).await {
        Ok(data) => {
            context.insert("ad", &data.ad);
            context.insert("status_label", data.ad.status.label());
            context.insert("history", &data.history);
            context.insert("characteristics", &data.characteristics);
            context.insert("prev_href", &data.prev_href);
            context.insert("next_href", &data.next_href);
            context.insert("back_href", &data.back_href);
            context.insert("nav", &data.nav);
            context.insert("reasons", &REJECTION_REASONS);
            render_template(&tera, "item/index.html", &context)
        }
        Err(ServiceError::NotFound) => {
            context.insert("back_href", &item_service::safe_back(nav.back.as_deref()));
            render_error(&tera, context, StatusCode::NOT_FOUND, "Объявление не найдено")
        }
        Err(err) => {
            log::error!("Failed to load advertisement {id}: {err}");
            render_error(
                &tera,
                context,
                StatusCode::BAD_GATEWAY,
                "Ошибка загрузки объявления",
            )
        }
    }
}

/// Flashes the outcome of a moderation action and returns to the item page.
fn finish_moderation<T>(
    id: i32,
    nav: &str,
    result: ServiceResult<T>,
    success: &str,
) -> HttpResponse {
    match result {
        Ok(_) => {
            FlashMessage::success(success).send();
            redirect(&item_location(id, nav))
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&item_location(id, nav))
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Объявление не найдено.").send();
            redirect(LIST_PATH)
        }
        Err(err) => {
            log::error!("Moderation of advertisement {id} failed: {err}");
            FlashMessage::error("Не удалось сохранить решение.").send();
            redirect(&item_location(id, nav))
        }
    }
}

#[post("/item/{id}/approve")]
pub async fn approve_item(
    id: web::Path<i32>,
    repo: web::Data<HttpRepository>,
    body: web::Bytes,
) -> impl Responder {
    let id = id.into_inner();
    let nav = parse_form::<DecisionForm>(&body)
        .map(|form| form.nav)
        .unwrap_or_default();
    let result = item_service::approve_ad(repo.get_ref(), id).await;
    finish_moderation(id, &nav, result, "Объявление одобрено.")
}

#[post("/item/{id}/reject")]
pub async fn reject_item(
    id: web::Path<i32>,
    repo: web::Data<HttpRepository>,
    body: web::Bytes,
) -> impl Responder {
    let id = id.into_inner();
    let form: DecisionForm = match parse_form(&body) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to parse decision form: {err}");
            FlashMessage::error("Ошибка валидации формы").send();
            return redirect(&item_location(id, ""));
        }
    };
    let nav = form.nav.clone();
    let result = item_service::reject_ad(repo.get_ref(), id, form).await;
    finish_moderation(id, &nav, result, "Объявление отклонено.")
}

#[post("/item/{id}/request-changes")]
pub async fn request_changes_item(
    id: web::Path<i32>,
    repo: web::Data<HttpRepository>,
    body: web::Bytes,
) -> impl Responder {
    let id = id.into_inner();
    let form: DecisionForm = match parse_form(&body) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to parse decision form: {err}");
            FlashMessage::error("Ошибка валидации формы").send();
            return redirect(&item_location(id, ""));
        }
    };
    let nav = form.nav.clone();
    let result = item_service::request_changes(repo.get_ref(), id, form).await;
    finish_moderation(id, &nav, result, "Объявление отправлено на доработку.")
}
