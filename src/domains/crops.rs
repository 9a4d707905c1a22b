use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum WaterRequirement {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRecommendation {
    pub name: String,
    /// Match percentage in `0..=100`.
    pub score: u8,
    pub description: String,
    pub growth_period: String,
    pub water_requirement: WaterRequirement,
    pub expected_yield: String,
    pub image: String,
}

impl CropRecommendation {
    fn new(
        name: &str,
        score: u8,
        description: &str,
        growth_period: &str,
        water_requirement: WaterRequirement,
        expected_yield: &str,
        image: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            score,
            description: description.to_string(),
            growth_period: growth_period.to_string(),
            water_requirement,
            expected_yield: expected_yield.to_string(),
            image: image.to_string(),
        }
    }
}

/// The recommendation list, best match first. Inputs do not affect it.
pub fn recommended_crops() -> Vec<CropRecommendation> {
    vec![
        CropRecommendation::new(
            "Wheat",
            92,
            "Wheat is a grass widely cultivated for its seed, a cereal grain that is a worldwide staple food.",
            "110-130 days",
            WaterRequirement::Medium,
            "3.5-4.5 tons/hectare",
            "/images/wheat.png",
        ),
        CropRecommendation::new(
            "Rice",
            85,
            "Rice is the seed of the grass species Oryza sativa or less commonly Oryza glaberrima.",
            "90-110 days",
            WaterRequirement::High,
            "4-6 tons/hectare",
            "/images/rice.png",
        ),
        CropRecommendation::new(
            "Maize (Corn)",
            78,
            "Maize, also known as corn, is a cereal grain first domesticated by indigenous peoples in southern Mexico.",
            "70-100 days",
            WaterRequirement::Medium,
            "5-7 tons/hectare",
            "/images/maize.png",
        ),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    Clay,
    Sandy,
    Loamy,
    Silty,
    Peaty,
    Chalky,
}

impl SoilType {
    pub const ALL: [SoilType; 6] = [
        SoilType::Clay,
        SoilType::Sandy,
        SoilType::Loamy,
        SoilType::Silty,
        SoilType::Peaty,
        SoilType::Chalky,
    ];

    pub fn form_value(self) -> &'static str {
        match self {
            SoilType::Clay => "clay",
            SoilType::Sandy => "sandy",
            SoilType::Loamy => "loamy",
            SoilType::Silty => "silty",
            SoilType::Peaty => "peaty",
            SoilType::Chalky => "chalky",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SoilType::Clay => "Clay Soil",
            SoilType::Sandy => "Sandy Soil",
            SoilType::Loamy => "Loamy Soil",
            SoilType::Silty => "Silty Soil",
            SoilType::Peaty => "Peaty Soil",
            SoilType::Chalky => "Chalky Soil",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|soil| soil.form_value().eq_ignore_ascii_case(value))
    }
}

/// A slider: inclusive bounds and a step every value snaps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderRange {
    pub min: u32,
    pub max: u32,
    pub step: u32,
    pub default: u32,
}

impl SliderRange {
    pub fn snap(&self, value: u32) -> u32 {
        let clamped = value.clamp(self.min, self.max);
        let offset = clamped - self.min;
        let lower = self.min + (offset / self.step) * self.step;
        let upper = lower + self.step;
        if upper <= self.max && clamped - lower >= upper - clamped {
            upper
        } else {
            lower
        }
    }
}

/// mm/month
pub const RAINFALL: SliderRange = SliderRange {
    min: 0,
    max: 300,
    step: 10,
    default: 50,
};

/// °C
pub const TEMPERATURE: SliderRange = SliderRange {
    min: 0,
    max: 50,
    step: 1,
    default: 25,
};

/// percent
pub const HUMIDITY: SliderRange = SliderRange {
    min: 0,
    max: 100,
    step: 5,
    default: 60,
};

/// Form state for the crop recommendation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowingConditions {
    pub soil_type: Option<SoilType>,
    rainfall: u32,
    temperature: u32,
    humidity: u32,
}

impl Default for GrowingConditions {
    fn default() -> Self {
        Self {
            soil_type: None,
            rainfall: RAINFALL.default,
            temperature: TEMPERATURE.default,
            humidity: HUMIDITY.default,
        }
    }
}

impl GrowingConditions {
    pub fn rainfall(&self) -> u32 {
        self.rainfall
    }

    pub fn temperature(&self) -> u32 {
        self.temperature
    }

    pub fn humidity(&self) -> u32 {
        self.humidity
    }

    pub fn set_rainfall(&mut self, value: u32) {
        self.rainfall = RAINFALL.snap(value);
    }

    pub fn set_temperature(&mut self, value: u32) {
        self.temperature = TEMPERATURE.snap(value);
    }

    pub fn set_humidity(&mut self, value: u32) {
        self.humidity = HUMIDITY.snap(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_is_ordered_by_score() {
        let crops = recommended_crops();
        let names: Vec<_> = crops.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Wheat", "Rice", "Maize (Corn)"]);
        assert!(crops.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }

    #[test]
    fn sliders_clamp_and_snap() {
        let mut conditions = GrowingConditions::default();
        conditions.set_rainfall(444);
        assert_eq!(conditions.rainfall(), 300);
        conditions.set_rainfall(54);
        assert_eq!(conditions.rainfall(), 50);
        conditions.set_rainfall(55);
        assert_eq!(conditions.rainfall(), 60);
        conditions.set_humidity(98);
        assert_eq!(conditions.humidity(), 100);
        conditions.set_temperature(51);
        assert_eq!(conditions.temperature(), 50);
    }

    #[test]
    fn conditions_only_change_through_setters() {
        let mut conditions = GrowingConditions::default();
        conditions.soil_type = Some(SoilType::Clay);
        conditions.set_temperature(1_000);
        let json = serde_json::to_value(&conditions).unwrap();
        assert_eq!(json["soilType"], "clay");
        assert_eq!(json["temperature"], 50);
        assert_eq!(json["rainfall"], 50);
        assert_eq!(json["humidity"], 60);
    }

    #[test]
    fn soil_type_parses_form_values() {
        assert_eq!(SoilType::parse("Loamy"), Some(SoilType::Loamy));
        assert_eq!(SoilType::parse("lava"), None);
    }
}
