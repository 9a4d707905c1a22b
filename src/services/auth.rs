use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

use crate::config::Latency;
use crate::domains::profile::{Region, UserProfile};
use crate::error::Result;
use crate::flows::{IgnoreReason, Submission};
use crate::interfaces::random::RandomSource;
use crate::interfaces::session::SessionRepository;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginMethod {
    Email { email: String, password: String },
    Phone { phone: String, otp: String },
}

impl LoginMethod {
    fn missing_field(&self) -> Option<&'static str> {
        match self {
            LoginMethod::Email { email, password } => {
                if email.trim().is_empty() {
                    Some("email")
                } else if password.is_empty() {
                    Some("password")
                } else {
                    None
                }
            }
            LoginMethod::Phone { phone, otp } => {
                if phone.trim().is_empty() {
                    Some("phone")
                } else if otp.trim().is_empty() {
                    Some("otp")
                } else {
                    None
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub region: Option<Region>,
    pub password: String,
}

impl SignupForm {
    fn missing_field(&self) -> Option<&'static str> {
        if self.first_name.trim().is_empty() {
            return Some("firstName");
        }
        if self.last_name.trim().is_empty() {
            return Some("lastName");
        }
        if self.phone.trim().is_empty() {
            return Some("phone");
        }
        if self.region.is_none() {
            return Some("region");
        }
        if self.password.is_empty() {
            return Some("password");
        }
        None
    }

    fn to_profile(&self) -> UserProfile {
        UserProfile {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self
                .email
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            phone: self.phone.trim().to_string(),
            region: self.region.map(Region::label).unwrap_or_default().to_string(),
            address: String::new(),
        }
    }
}

/// Simulated sign-in. Credentials are never checked; a successful login
/// stores the demo profile, a signup stores the submitted one.
pub struct AuthService {
    sessions: Arc<dyn SessionRepository>,
    random: Arc<dyn RandomSource>,
    latency: Latency,
    busy: AtomicBool,
}

struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl AuthService {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        random: Arc<dyn RandomSource>,
        latency: Latency,
    ) -> Self {
        Self {
            sessions,
            random,
            latency,
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn try_begin(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(&self.busy))
    }

    pub async fn login(&self, method: LoginMethod) -> Result<Submission> {
        if let Some(field) = method.missing_field() {
            return Ok(Submission::Ignored(IgnoreReason::MissingField(field)));
        }
        let Some(_guard) = self.try_begin() else {
            return Ok(Submission::Ignored(IgnoreReason::Busy));
        };

        self.latency.wait(self.random.as_ref()).await;
        let profile = UserProfile::demo();
        self.sessions.save(&profile)?;
        let via = match method {
            LoginMethod::Email { .. } => "email",
            LoginMethod::Phone { .. } => "phone",
        };
        info!(via, user = %profile.display_name(), "logged in");
        Ok(Submission::Accepted)
    }

    pub async fn signup(&self, form: SignupForm) -> Result<Submission> {
        if let Some(field) = form.missing_field() {
            return Ok(Submission::Ignored(IgnoreReason::MissingField(field)));
        }
        let Some(_guard) = self.try_begin() else {
            return Ok(Submission::Ignored(IgnoreReason::Busy));
        };

        self.latency.wait(self.random.as_ref()).await;
        let profile = form.to_profile();
        self.sessions.save(&profile)?;
        info!(user = %profile.display_name(), region = %profile.region, "account created");
        Ok(Submission::Accepted)
    }

    pub fn logout(&self) -> Result<()> {
        self.sessions.clear()?;
        info!("logged out");
        Ok(())
    }

    pub fn current_profile(&self) -> Result<UserProfile> {
        self.sessions.load()
    }

    pub fn is_signed_in(&self) -> Result<bool> {
        Ok(self.sessions.stored()?.is_some())
    }
}
