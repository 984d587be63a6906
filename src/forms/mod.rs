//! Form definitions backing the dashboard routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod item;
pub mod list;
pub mod preferences;
pub mod stats;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("Ошибка валидации формы: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Не указана причина")]
    MissingReason,

    #[error("Для причины «Другое» нужен комментарий")]
    MissingComment,

    #[error("Некорректная дата")]
    InvalidDate,

    #[error("Дата начала позже даты окончания")]
    InvalidDateRange,

    #[error("Некорректное количество объявлений на странице")]
    InvalidPageLimit,
}
