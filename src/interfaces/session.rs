use crate::domains::profile::UserProfile;
use crate::error::Result;

/// Fixed key the signed-in profile is stored under.
pub const SESSION_KEY: &str = "userInfo";

/// Client-local persistence of the signed-in user. Synchronous and
/// single-writer; one instance is shared by every view of a process.
pub trait SessionRepository: Send + Sync {
    fn save(&self, profile: &UserProfile) -> Result<()>;

    /// The stored profile, or `None` when nobody is signed in.
    fn stored(&self) -> Result<Option<UserProfile>>;

    fn clear(&self) -> Result<()>;

    fn load(&self) -> Result<UserProfile> {
        Ok(self.stored()?.unwrap_or_else(UserProfile::placeholder))
    }
}
