use std::sync::Arc;

use tracing::info;

use crate::domains::profile::UserProfile;
use crate::error::Result;
use crate::interfaces::session::SessionRepository;

/// View/edit state of the profile page.
pub struct ProfileEditor {
    sessions: Arc<dyn SessionRepository>,
    saved: UserProfile,
    draft: Option<UserProfile>,
}

impl ProfileEditor {
    pub fn open(sessions: Arc<dyn SessionRepository>) -> Result<Self> {
        let saved = sessions.load()?;
        Ok(Self {
            sessions,
            saved,
            draft: None,
        })
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// What the page shows: the draft while editing, else the saved profile.
    pub fn profile(&self) -> &UserProfile {
        self.draft.as_ref().unwrap_or(&self.saved)
    }

    pub fn begin_edit(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(self.saved.clone());
        }
    }

    /// `None` unless editing.
    pub fn draft_mut(&mut self) -> Option<&mut UserProfile> {
        self.draft.as_mut()
    }

    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// Persists the draft and leaves edit mode. A no-op outside edit mode.
    pub fn save(&mut self) -> Result<()> {
        let Some(draft) = self.draft.take() else {
            return Ok(());
        };
        if let Err(err) = self.sessions.save(&draft) {
            self.draft = Some(draft);
            return Err(err);
        }
        info!(user = %draft.display_name(), "profile updated");
        self.saved = draft;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::memory::InMemorySessionStore;

    fn signed_in() -> Arc<dyn SessionRepository> {
        let store = InMemorySessionStore::new();
        store.save(&UserProfile::demo()).unwrap();
        Arc::new(store)
    }

    #[test]
    fn cancel_discards_draft() {
        let mut editor = ProfileEditor::open(signed_in()).unwrap();
        editor.begin_edit();
        editor.draft_mut().unwrap().address = "Ludhiana".to_string();
        assert_eq!(editor.profile().address, "Ludhiana");
        editor.cancel();
        assert!(!editor.is_editing());
        assert_eq!(editor.profile(), &UserProfile::demo());
    }

    #[test]
    fn save_persists_and_leaves_edit_mode() {
        let sessions = signed_in();
        let mut editor = ProfileEditor::open(sessions.clone()).unwrap();
        editor.begin_edit();
        editor.draft_mut().unwrap().set_field("phone", "+91 9111111111");
        editor.save().unwrap();

        assert!(!editor.is_editing());
        assert_eq!(sessions.load().unwrap().phone, "+91 9111111111");
    }

    #[test]
    fn draft_is_unavailable_outside_edit_mode() {
        let mut editor = ProfileEditor::open(signed_in()).unwrap();
        assert!(editor.draft_mut().is_none());
        editor.save().unwrap();
    }
}
