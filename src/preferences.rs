//! Per-visitor UI preferences: colour theme and list page size.
//!
//! Preferences never travel in the list URL. They are read through a
//! [`PreferencesStore`] (the session cookie in production), resolved against
//! their defaults, and published to subscribers whenever they change.

use std::sync::Mutex;

use actix_session::Session;
use actix_web::HttpRequest;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;

use crate::domain::types::{PageLimit, Theme};

/// Session key holding the [`SavedPreferences`].
pub const PREFERENCES_SESSION_KEY: &str = "ui_preferences";

/// Client hint carrying the operating system colour scheme.
pub const COLOR_SCHEME_HINT: &str = "Sec-CH-Prefers-Color-Scheme";

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("failed to load preferences: {0}")]
    Load(String),

    #[error("failed to save preferences: {0}")]
    Save(String),
}

/// Preferences as persisted. Absent values fall back to their defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPreferences {
    pub theme: Option<Theme>,
    pub page_limit: Option<u32>,
}

/// Resolved preferences.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct UiPreferences {
    pub theme: Theme,
    pub page_limit: PageLimit,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            page_limit: PageLimit::DEFAULT,
        }
    }
}

impl UiPreferences {
    /// Resolves saved values. Without a saved theme the system scheme wins;
    /// an out-of-range page size is replaced by the default.
    pub fn resolve(saved: SavedPreferences, system_theme: Option<Theme>) -> Self {
        Self {
            theme: saved.theme.or(system_theme).unwrap_or(Theme::Light),
            page_limit: saved
                .page_limit
                .and_then(|limit| PageLimit::new(limit).ok())
                .unwrap_or_default(),
        }
    }
}

impl From<UiPreferences> for SavedPreferences {
    fn from(prefs: UiPreferences) -> Self {
        Self {
            theme: Some(prefs.theme),
            page_limit: Some(prefs.page_limit.get()),
        }
    }
}

/// Persistence of [`SavedPreferences`].
pub trait PreferencesStore {
    fn load(&self) -> Result<SavedPreferences, PreferencesError>;
    fn save(&self, prefs: &SavedPreferences) -> Result<(), PreferencesError>;
}

/// Stores preferences in the visitor's session cookie.
pub struct SessionPreferencesStore {
    session: Session,
}

impl SessionPreferencesStore {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl PreferencesStore for SessionPreferencesStore {
    fn load(&self) -> Result<SavedPreferences, PreferencesError> {
        self.session
            .get::<SavedPreferences>(PREFERENCES_SESSION_KEY)
            .map(Option::unwrap_or_default)
            .map_err(|err| PreferencesError::Load(err.to_string()))
    }

    fn save(&self, prefs: &SavedPreferences) -> Result<(), PreferencesError> {
        self.session
            .insert(PREFERENCES_SESSION_KEY, prefs)
            .map_err(|err| PreferencesError::Save(err.to_string()))
    }
}

/// In-process store, used where no session is available.
#[derive(Default)]
pub struct MemoryPreferencesStore {
    saved: Mutex<SavedPreferences>,
}

impl MemoryPreferencesStore {
    pub fn new(saved: SavedPreferences) -> Self {
        Self {
            saved: Mutex::new(saved),
        }
    }
}

impl PreferencesStore for MemoryPreferencesStore {
    fn load(&self) -> Result<SavedPreferences, PreferencesError> {
        self.saved
            .lock()
            .map(|saved| *saved)
            .map_err(|err| PreferencesError::Load(err.to_string()))
    }

    fn save(&self, prefs: &SavedPreferences) -> Result<(), PreferencesError> {
        let mut saved = self
            .saved
            .lock()
            .map_err(|err| PreferencesError::Save(err.to_string()))?;
        *saved = *prefs;
        Ok(())
    }
}

/// Reads the colour scheme client hint, e.g. `Sec-CH-Prefers-Color-Scheme: "dark"`.
pub fn system_theme(req: &HttpRequest) -> Option<Theme> {
    req.headers()
        .get(COLOR_SCHEME_HINT)?
        .to_str()
        .ok()?
        .trim()
        .trim_matches('"')
        .parse()
        .ok()
}

/// Preferences bound to a store, with change notifications.
pub struct Preferences<S: PreferencesStore> {
    store: S,
    sender: watch::Sender<UiPreferences>,
}

impl<S: PreferencesStore> Preferences<S> {
    /// Loads the saved preferences. A store failure is logged and the
    /// defaults are used.
    pub fn load(store: S, system_theme: Option<Theme>) -> Self {
        let saved = store.load().unwrap_or_else(|err| {
            log::warn!("{err}");
            SavedPreferences::default()
        });
        let (sender, _) = watch::channel(UiPreferences::resolve(saved, system_theme));
        Self { store, sender }
    }

    pub fn get(&self) -> UiPreferences {
        *self.sender.borrow()
    }

    pub fn theme(&self) -> Theme {
        self.get().theme
    }

    pub fn page_limit(&self) -> PageLimit {
        self.get().page_limit
    }

    /// Persists `prefs` and notifies subscribers. Nothing is published when
    /// saving fails.
    pub fn set(&self, prefs: UiPreferences) -> Result<(), PreferencesError> {
        self.store.save(&prefs.into())?;
        self.sender.send_if_modified(|current| {
            let changed = *current != prefs;
            *current = prefs;
            changed
        });
        Ok(())
    }

    /// Applies `update` to the current preferences and persists the result.
    pub fn update<F>(&self, update: F) -> Result<UiPreferences, PreferencesError>
    where
        F: FnOnce(UiPreferences) -> UiPreferences,
    {
        let next = update(self.get());
        self.set(next)?;
        Ok(next)
    }

    pub fn toggle_theme(&self) -> Result<Theme, PreferencesError> {
        self.update(|prefs| UiPreferences {
            theme: prefs.theme.toggled(),
            ..prefs
        })
        .map(|prefs| prefs.theme)
    }

    pub fn set_page_limit(&self, page_limit: PageLimit) -> Result<(), PreferencesError> {
        self.update(|prefs| UiPreferences { page_limit, ..prefs })
            .map(|_| ())
    }

    /// Receiver that observes every published change.
    pub fn subscribe(&self) -> watch::Receiver<UiPreferences> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    #[test]
    fn saved_values_win_over_system_theme() {
        let saved = SavedPreferences {
            theme: Some(Theme::Light),
            page_limit: Some(25),
        };

        let prefs = UiPreferences::resolve(saved, Some(Theme::Dark));

        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.page_limit.get(), 25);
    }

    #[test]
    fn missing_values_use_hint_and_defaults() {
        let saved = SavedPreferences {
            theme: None,
            page_limit: Some(1000),
        };

        let prefs = UiPreferences::resolve(saved, Some(Theme::Dark));

        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.page_limit, PageLimit::DEFAULT);
        assert_eq!(
            UiPreferences::resolve(SavedPreferences::default(), None).theme,
            Theme::Light
        );
    }

    #[test]
    fn client_hint_is_parsed() {
        let req = TestRequest::default()
            .insert_header((COLOR_SCHEME_HINT, "\"dark\""))
            .to_http_request();
        assert_eq!(system_theme(&req), Some(Theme::Dark));

        let req = TestRequest::default()
            .insert_header((COLOR_SCHEME_HINT, "sepia"))
            .to_http_request();
        assert_eq!(system_theme(&req), None);

        assert_eq!(system_theme(&TestRequest::default().to_http_request()), None);
    }

    #[test]
    fn set_persists_and_notifies_subscribers() {
        let prefs = Preferences::load(MemoryPreferencesStore::default(), None);
        let mut receiver = prefs.subscribe();

        prefs.set_page_limit(PageLimit::new(40).unwrap()).unwrap();

        assert!(receiver.has_changed().unwrap());
        assert_eq!(receiver.borrow_and_update().page_limit.get(), 40);
        assert_eq!(prefs.store.load().unwrap().page_limit, Some(40));
    }

    #[test]
    fn unchanged_value_is_not_published() {
        let prefs = Preferences::load(MemoryPreferencesStore::default(), None);
        let receiver = prefs.subscribe();

        prefs.set(UiPreferences::default()).unwrap();

        assert!(!receiver.has_changed().unwrap());
    }

    #[test]
    fn toggle_flips_theme() {
        let store = MemoryPreferencesStore::new(SavedPreferences {
            theme: Some(Theme::Dark),
            page_limit: None,
        });
        let prefs = Preferences::load(store, None);

        assert_eq!(prefs.toggle_theme().unwrap(), Theme::Light);
        assert_eq!(prefs.theme(), Theme::Light);
    }
}
