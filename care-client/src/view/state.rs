//! Screen state
//!
//! `loading -> Ready | Failed`, with `refreshing`/`submitting` flags that
//! gate spinners and disable controls. Errors become transient notices
//! carrying the backend message or a fallback string.

use shared::models::{Category, Child, Consultation, Goal, Invoice, Location, Report, User};

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient notification (toast)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Notice for `error`, logging it
    pub fn from_error(error: &ClientError, fallback: &str) -> Self {
        tracing::error!("{}", error);
        Self::error(error.user_message(fallback))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    /// Message for the retry affordance
    Failed(String),
}

/// Resources with a backend id
pub trait Identified {
    fn id(&self) -> i64;
}

macro_rules! identified {
    ($($ty:ty),* $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> i64 {
                self.id
            }
        })*
    };
}

identified!(User, Child, Consultation, Goal, Report, Invoice, Category, Location);

/// State of one screen
#[derive(Debug, Clone)]
pub struct Screen<T> {
    state: LoadState<T>,
    refreshing: bool,
    submitting: bool,
    notices: Vec<Notice>,
}

impl<T> Default for Screen<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Screen<T> {
    /// Freshly mounted: loading
    pub fn new() -> Self {
        Self {
            state: LoadState::Loading,
            refreshing: false,
            submitting: false,
            notices: Vec::new(),
        }
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn data(&self) -> Option<&T> {
        match &self.state {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match &mut self.state {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Inputs and buttons are enabled only when idle with data
    pub fn controls_enabled(&self) -> bool {
        self.data().is_some() && !self.refreshing && !self.submitting
    }

    /// Explicit refresh (or retry after a failure)
    pub fn begin_refresh(&mut self) {
        match self.state {
            LoadState::Ready(_) => self.refreshing = true,
            _ => self.state = LoadState::Loading,
        }
    }

    /// Apply the result of a (re)load. A failed refresh keeps the old data.
    pub fn finish_load(&mut self, result: ClientResult<T>, fallback: &str) {
        self.refreshing = false;
        match result {
            Ok(data) => self.state = LoadState::Ready(data),
            Err(e) => {
                let notice = Notice::from_error(&e, fallback);
                if self.data().is_none() {
                    self.state = LoadState::Failed(notice.message.clone());
                }
                self.notices.push(notice);
            }
        }
    }

    /// Start a mutation; `false` if one is already running
    pub fn begin_submit(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        true
    }

    /// End a mutation, queueing a success or error notice
    pub fn finish_submit<R>(
        &mut self,
        result: ClientResult<R>,
        success: &str,
        fallback: &str,
    ) -> Option<R> {
        self.submitting = false;
        match result {
            Ok(value) => {
                self.notices.push(Notice::success(success));
                Some(value)
            }
            Err(e) => {
                self.notices.push(Notice::from_error(&e, fallback));
                None
            }
        }
    }

    /// Drain queued notices for display
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

impl<T: Identified> Screen<Vec<T>> {
    /// Patch the list with a created/updated item returned by the backend
    pub fn apply_saved(&mut self, item: T) {
        if let Some(items) = self.data_mut() {
            match items.iter_mut().find(|i| i.id() == item.id()) {
                Some(existing) => *existing = item,
                None => items.push(item),
            }
        }
    }

    /// Drop an item after a successful delete
    pub fn apply_deleted(&mut self, id: i64) {
        if let Some(items) = self.data_mut() {
            items.retain(|i| i.id() != id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Category;

    fn cat(id: i64, name: &str) -> Category {
        Category {
            id,
            name: name.into(),
            color: None,
        }
    }

    #[test]
    fn test_load_success_and_failure() {
        let mut screen: Screen<Vec<Category>> = Screen::new();
        assert!(screen.is_loading());
        assert!(!screen.controls_enabled());

        screen.finish_load(Err(ClientError::Unauthenticated), "Erro ao carregar");
        assert!(matches!(screen.state(), LoadState::Failed(_)));
        assert_eq!(screen.take_notices().len(), 1);

        screen.begin_refresh();
        assert!(screen.is_loading());
        screen.finish_load(Ok(vec![cat(1, "Social")]), "Erro ao carregar");
        assert!(screen.controls_enabled());
    }

    #[test]
    fn test_failed_refresh_keeps_data() {
        let mut screen = Screen::new();
        screen.finish_load(Ok(vec![cat(1, "Social")]), "x");
        screen.begin_refresh();
        assert!(screen.is_refreshing());
        assert!(!screen.controls_enabled());

        screen.finish_load(Err(ClientError::Internal("boom".into())), "Erro ao atualizar");
        assert_eq!(screen.data().map(Vec::len), Some(1));
        let notices = screen.take_notices();
        assert_eq!(notices, vec![Notice::error("Erro ao atualizar")]);
    }

    #[test]
    fn test_submit_gate_and_list_patch() {
        let mut screen = Screen::new();
        screen.finish_load(Ok(vec![cat(1, "Social"), cat(2, "Motor")]), "x");

        assert!(screen.begin_submit());
        assert!(!screen.begin_submit());
        let saved = screen.finish_submit(Ok(cat(2, "Motora")), "Salvo", "Erro");
        screen.apply_saved(saved.unwrap());
        screen.apply_saved(cat(3, "Fala"));
        screen.apply_deleted(1);

        let names: Vec<&str> = screen.data().unwrap().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Motora", "Fala"]);
        assert_eq!(screen.take_notices(), vec![Notice::success("Salvo")]);
    }

    #[test]
    fn test_failed_submit_notice_uses_backend_message() {
        let mut screen: Screen<Vec<Category>> = Screen::new();
        let out: Option<Category> = screen.finish_submit(
            Err(ClientError::Validation("Nome duplicado".into())),
            "Salvo",
            "Erro ao salvar",
        );
        assert!(out.is_none());
        assert!(!screen.is_submitting());
        assert_eq!(screen.take_notices(), vec![Notice::error("Nome duplicado")]);
    }
}
