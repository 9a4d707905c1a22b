use std::sync::Arc;

use serde::Serialize;

use crate::domains::dashboard::{
    self, ForecastDay, Notification, WeatherCondition, WeatherSnapshot, MIN_TEMP_C, TEMP_SPREAD_C,
    WEATHER_LOCATION,
};
use crate::domains::profile::UserProfile;
use crate::error::Result;
use crate::interfaces::random::RandomSource;
use crate::interfaces::session::SessionRepository;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub profile: UserProfile,
    pub weather: WeatherSnapshot,
    pub forecast: Vec<ForecastDay>,
    pub notifications: Vec<Notification>,
}

pub struct DashboardService {
    sessions: Arc<dyn SessionRepository>,
    random: Arc<dyn RandomSource>,
}

impl DashboardService {
    pub fn new(sessions: Arc<dyn SessionRepository>, random: Arc<dyn RandomSource>) -> Self {
        Self { sessions, random }
    }

    /// Simulated reading: 25–34 °C and one of four conditions.
    pub fn current_weather(&self) -> WeatherSnapshot {
        let temp_c = MIN_TEMP_C + self.random.index(TEMP_SPREAD_C) as i32;
        let condition = WeatherCondition::ALL[self.random.index(WeatherCondition::ALL.len())];
        WeatherSnapshot {
            temp_c,
            condition,
            location: WEATHER_LOCATION,
        }
    }

    pub fn summary(&self) -> Result<DashboardSummary> {
        let weather = self.current_weather();
        Ok(DashboardSummary {
            profile: self.sessions.load()?,
            forecast: weather.forecast(),
            weather,
            notifications: dashboard::notifications(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::memory::InMemorySessionStore;
    use crate::providers::random::SequenceRandom;

    #[test]
    fn summary_uses_stored_profile_and_drawn_weather() {
        let sessions = Arc::new(InMemorySessionStore::new());
        sessions.save(&UserProfile::demo()).unwrap();
        let service = DashboardService::new(sessions, Arc::new(SequenceRandom::new(vec![9, 3])));

        let summary = service.summary().unwrap();
        assert_eq!(summary.profile.first_name, "Ravi");
        assert_eq!(summary.weather.temp_c, 34);
        assert_eq!(summary.weather.condition, WeatherCondition::LightRain);
        assert_eq!(summary.forecast[0].temp_c, 32);
        assert_eq!(summary.notifications.len(), 3);
    }

    #[test]
    fn signed_out_dashboard_greets_placeholder() {
        let service = DashboardService::new(
            Arc::new(InMemorySessionStore::new()),
            Arc::new(SequenceRandom::new(vec![0])),
        );
        assert_eq!(service.summary().unwrap().profile.first_name, "User");
    }
}
