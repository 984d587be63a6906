use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{MAX_PAGE_LIMIT, PageLimit};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Form data for changing the number of advertisements per page.
pub struct PageLimitForm {
    #[validate(range(min = 1, max = MAX_PAGE_LIMIT))]
    pub limit: u32,
    /// Location to return to after saving.
    #[serde(default)]
    pub back: String,
}

impl TryFrom<&PageLimitForm> for PageLimit {
    type Error = FormError;

    fn try_from(form: &PageLimitForm) -> Result<Self, Self::Error> {
        form.validate()?;
        PageLimit::new(form.limit).map_err(|_| FormError::InvalidPageLimit)
    }
}

#[derive(Debug, Default, Deserialize)]
/// Form data for the theme toggle.
pub struct ThemeForm {
    #[serde(default)]
    pub back: String,
}
