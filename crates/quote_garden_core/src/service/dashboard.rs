//! New-tab dashboard session: theme, journal, focus timer, daily quote.
//!
//! One `DashboardSession` exists per open tab. It captures the day key once
//! when opened, so the journal keeps writing to the day the tab was opened on.
//! The session holds no store; every call that reads or writes takes the
//! surface's store as an argument.

use crate::daily::{today_key, DailyIndexError};
use crate::model::focus::FocusSession;
use crate::model::quote::Quote;
use crate::model::theme::Theme;
use crate::repo::journal_repo::JournalRepository;
use crate::repo::theme_repo::ThemeRepository;
use crate::repo::RepoResult;
use crate::service::quote_service::QuoteService;
use crate::store::PersistentStore;

/// One entry of the settings theme grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeChoice {
    pub theme: Theme,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct DashboardSession {
    day_key: String,
    theme: Theme,
    focus: FocusSession,
}

impl DashboardSession {
    /// Opens a dashboard for the local calendar day.
    pub fn open<S: PersistentStore + ?Sized>(store: &S) -> Self {
        Self::open_on(store, today_key())
    }

    /// Opens a dashboard pinned to `day_key`.
    pub fn open_on<S: PersistentStore + ?Sized>(store: &S, day_key: impl Into<String>) -> Self {
        Self {
            day_key: day_key.into(),
            theme: ThemeRepository::new(store).load(),
            focus: FocusSession::new(),
        }
    }

    pub fn day_key(&self) -> &str {
        &self.day_key
    }

    pub fn daily_quote<S: PersistentStore + ?Sized>(
        &self,
        store: &S,
    ) -> Result<Quote, DailyIndexError> {
        QuoteService::new(store).daily_quote_for(&self.day_key)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn theme_choices(&self) -> Vec<ThemeChoice> {
        Theme::ALL
            .into_iter()
            .map(|theme| ThemeChoice {
                theme,
                active: theme == self.theme,
            })
            .collect()
    }

    /// Applies `theme` locally and persists it.
    ///
    /// The session switches even when saving fails; the error is returned so
    /// the caller may report it.
    pub fn choose_theme<S: PersistentStore + ?Sized>(
        &mut self,
        store: &S,
        theme: Theme,
    ) -> RepoResult<()> {
        self.theme = theme;
        ThemeRepository::new(store).save(theme)
    }

    pub fn journal_text<S: PersistentStore + ?Sized>(&self, store: &S) -> Option<String> {
        JournalRepository::new(store).load(&self.day_key)
    }

    pub fn save_journal<S: PersistentStore + ?Sized>(
        &self,
        store: &S,
        text: &str,
    ) -> RepoResult<()> {
        JournalRepository::new(store).save(&self.day_key, text)
    }

    pub fn focus(&self) -> &FocusSession {
        &self.focus
    }

    pub fn focus_mut(&mut self) -> &mut FocusSession {
        &mut self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::DashboardSession;
    use crate::model::theme::Theme;
    use crate::store::MemoryStore;

    #[test]
    fn theme_choice_is_shared_through_the_store() {
        let store = MemoryStore::new();
        let mut first = DashboardSession::open_on(&store, "Mon Jan 01 2024");
        assert_eq!(first.theme(), Theme::Paper);

        first.choose_theme(&store, Theme::Vscode).unwrap();
        let active: Vec<_> = first
            .theme_choices()
            .into_iter()
            .filter(|choice| choice.active)
            .collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].theme, Theme::Vscode);

        let second = DashboardSession::open_on(&store, "Mon Jan 01 2024");
        assert_eq!(second.theme(), Theme::Vscode);
    }

    #[test]
    fn journal_is_scoped_to_the_session_day() {
        let store = MemoryStore::new();
        let monday = DashboardSession::open_on(&store, "Mon Jan 01 2024");
        monday.save_journal(&store, "quiet morning").unwrap();

        let tuesday = DashboardSession::open_on(&store, "Tue Jan 02 2024");
        assert_eq!(tuesday.journal_text(&store), None);
        assert_eq!(monday.journal_text(&store).as_deref(), Some("quiet morning"));
    }

    #[test]
    fn each_session_owns_its_focus_timer() {
        let store = MemoryStore::new();
        let mut first = DashboardSession::open_on(&store, "Mon Jan 01 2024");
        let second = DashboardSession::open_on(&store, "Mon Jan 01 2024");

        first.focus_mut().start();
        first.focus_mut().tick(0.0);
        assert_eq!(first.focus().display(), "24:59");
        assert_eq!(second.focus().display(), "25:00");
    }
}
