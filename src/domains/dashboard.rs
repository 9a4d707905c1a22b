use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WeatherCondition {
    Sunny,
    PartlyCloudy,
    Cloudy,
    LightRain,
}

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 4] = [
        WeatherCondition::Sunny,
        WeatherCondition::PartlyCloudy,
        WeatherCondition::Cloudy,
        WeatherCondition::LightRain,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "Sunny",
            WeatherCondition::PartlyCloudy => "Partly Cloudy",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::LightRain => "Light Rain",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "/images/weather-sunny.png",
            WeatherCondition::PartlyCloudy | WeatherCondition::Cloudy => {
                "/images/weather-cloudy.png"
            }
            WeatherCondition::LightRain => "/images/weather-rainy.png",
        }
    }
}

pub const WEATHER_LOCATION: &str = "Punjab";
pub const MIN_TEMP_C: i32 = 25;
pub const TEMP_SPREAD_C: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherSnapshot {
    pub temp_c: i32,
    pub condition: WeatherCondition,
    pub location: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastDay {
    pub label: &'static str,
    pub temp_c: i32,
}

impl WeatherSnapshot {
    /// Three-day outlook derived from today's reading.
    pub fn forecast(&self) -> Vec<ForecastDay> {
        [("Tomorrow", -2), ("Day 2", 1), ("Day 3", -1)]
            .into_iter()
            .map(|(label, offset)| ForecastDay {
                label,
                temp_c: self.temp_c + offset,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub date: &'static str,
}

pub fn notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: 1,
            title: "Potential pest alert for wheat crops",
            description:
                "Recent weather conditions may lead to increased aphid activity in wheat crops.",
            date: "2 hours ago",
        },
        Notification {
            id: 2,
            title: "Optimal time for rice planting",
            description:
                "Based on current weather patterns, the next 7 days are ideal for rice planting.",
            date: "1 day ago",
        },
        Notification {
            id: 3,
            title: "New government subsidy available",
            description: "New subsidy program for organic farming practices has been announced.",
            date: "3 days ago",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_offsets_follow_today() {
        let today = WeatherSnapshot {
            temp_c: 30,
            condition: WeatherCondition::Cloudy,
            location: WEATHER_LOCATION,
        };
        let temps: Vec<i32> = today.forecast().iter().map(|day| day.temp_c).collect();
        assert_eq!(temps, [28, 31, 29]);
        assert_eq!(today.condition.icon(), "/images/weather-cloudy.png");
    }
}
