use std::sync::RwLock;

use crate::domains::profile::UserProfile;
use crate::error::Result;
use crate::interfaces::session::SessionRepository;

/// Session store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    profile: RwLock<Option<UserProfile>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionRepository for InMemorySessionStore {
    fn save(&self, profile: &UserProfile) -> Result<()> {
        let mut guard = match self.profile.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(profile.clone());
        Ok(())
    }

    fn stored(&self) -> Result<Option<UserProfile>> {
        let guard = match self.profile.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Ok(guard.clone())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = match self.profile.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = None;
        Ok(())
    }
}
