//! Routes that change the visitor's UI preferences.

use actix_session::Session;
use actix_web::{HttpRequest, Responder, post, web};
use actix_web_flash_messages::FlashMessage;

use crate::domain::types::PageLimit;
use crate::forms::preferences::{PageLimitForm, ThemeForm};
use crate::preferences::{Preferences, SessionPreferencesStore, system_theme};
use crate::routes::{parse_form, redirect};
use crate::services::item::safe_back;
use crate::services::list::LIST_PATH;

/// Local pages only; anything else falls back to the list.
fn back_target(back: &str) -> String {
    if back.starts_with("/stats") || back.starts_with("/item/") {
        back.to_string()
    } else {
        safe_back(Some(back))
    }
}

#[post("/preferences/theme")]
pub async fn toggle_theme(req: HttpRequest, session: Session, body: web::Bytes) -> impl Responder {
    let form: ThemeForm = parse_form(&body).unwrap_or_default();
    let prefs = Preferences::load(SessionPreferencesStore::new(session), system_theme(&req));

    if let Err(err) = prefs.toggle_theme() {
        log::error!("Failed to save theme: {err}");
        FlashMessage::error("Не удалось сохранить тему.").send();
    }
    redirect(&back_target(&form.back))
}

#[post("/preferences/page-limit")]
pub async fn set_page_limit(
    req: HttpRequest,
    session: Session,
    body: web::Bytes,
) -> impl Responder {
    let form: PageLimitForm = match parse_form(&body) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to parse page size form: {err}");
            FlashMessage::error("Ошибка валидации формы").send();
            return redirect(LIST_PATH);
        }
    };

    match PageLimit::try_from(&form) {
        Ok(limit) => {
            let prefs =
                Preferences::load(SessionPreferencesStore::new(session), system_theme(&req));
            if let Err(err) = prefs.set_page_limit(limit) {
                log::error!("Failed to save page size: {err}");
                FlashMessage::error("Не удалось сохранить размер страницы.").send();
            }
        }
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
        }
    }
    redirect(&back_target(&form.back))
}
