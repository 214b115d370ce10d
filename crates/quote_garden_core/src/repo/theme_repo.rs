//! Persisted theme selection.

use crate::model::theme::Theme;
use crate::repo::RepoResult;
use crate::store::{PersistentStore, USER_THEME_KEY};
use log::warn;
use serde_json::Value;

pub struct ThemeRepository<'s, S: PersistentStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: PersistentStore + ?Sized> ThemeRepository<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Saved theme, or `paper` when nothing usable is stored.
    pub fn load(&self) -> Theme {
        match self.store.get_one(USER_THEME_KEY) {
            Ok(Some(Value::String(id))) => Theme::from_id(&id).unwrap_or_else(|| {
                warn!("event=theme_load module=repo status=invalid reason=unknown_id");
                Theme::default()
            }),
            Ok(Some(Value::Null) | None) => Theme::default(),
            Ok(Some(_)) => {
                warn!("event=theme_load module=repo status=invalid reason=not_a_string");
                Theme::default()
            }
            Err(err) => {
                warn!("event=theme_load module=repo status=degraded error={err}");
                Theme::default()
            }
        }
    }

    pub fn save(&self, theme: Theme) -> RepoResult<()> {
        self.store
            .set_one(USER_THEME_KEY, Value::String(theme.id().to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ThemeRepository;
    use crate::model::theme::Theme;
    use crate::store::{MemoryStore, PersistentStore, USER_THEME_KEY};
    use serde_json::json;

    #[test]
    fn defaults_to_paper_and_persists_choice() {
        let store = MemoryStore::new();
        let themes = ThemeRepository::new(&store);
        assert_eq!(themes.load(), Theme::Paper);

        themes.save(Theme::Coffee).unwrap();
        assert_eq!(store.get_one(USER_THEME_KEY).unwrap(), Some(json!("coffee")));
        assert_eq!(themes.load(), Theme::Coffee);
    }

    #[test]
    fn unknown_theme_falls_back_to_paper() {
        let store = MemoryStore::new();
        store.set_one(USER_THEME_KEY, json!("neon")).unwrap();
        assert_eq!(ThemeRepository::new(&store).load(), Theme::Paper);
    }
}
