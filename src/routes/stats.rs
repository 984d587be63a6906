use actix_session::Session;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use chrono::Local;
use tera::Tera;

use crate::forms::stats::StatsForm;
use crate::preferences::{Preferences, SessionPreferencesStore, system_theme};
use crate::repository::HttpRepository;
use crate::routes::{base_context, current_location, render_error, render_template};
use crate::services::ServiceError;
use crate::services::stats as stats_service;

/// Show moderation statistics for the selected period.
#[get("/stats")]
pub async fn show_stats(
    req: HttpRequest,
    session: Session,
    form: web::Query<StatsForm>,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let prefs = Preferences::load(SessionPreferencesStore::new(session), system_theme(&req)).get();
    let mut context = base_context(&flash_messages, &prefs, "stats");
    context.insert("back", &current_location(&req));
    let today = Local::now().date_naive();

    match stats_service::load_stats_page(repo.get_ref(), form.into_inner(), today).await {
        Ok(data) => {
            context.insert("period", &data.period.to_string());
            context.insert("periods", &data.periods);
            context.insert("start_date", &data.start_date);
            context.insert("end_date", &data.end_date);
            context.insert("summary", &data.summary);
            context.insert("activity", &data.activity);
            context.insert("decisions", &data.decisions);
            context.insert("categories", &data.categories);
            render_template(&tera, "stats/index.html", &context)
        }
        Err(ServiceError::Form(message)) => {
            render_error(&tera, context, StatusCode::BAD_REQUEST, &message)
        }
        Err(err) => {
            log::error!("Failed to load statistics: {err}");
            render_error(
                &tera,
                context,
                StatusCode::BAD_GATEWAY,
                "Ошибка загрузки статистики",
            )
        }
    }
}
