use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TipCategory {
    Latest,
    Seasonal,
    Techniques,
}

impl TipCategory {
    pub const ALL: [TipCategory; 3] = [
        TipCategory::Latest,
        TipCategory::Seasonal,
        TipCategory::Techniques,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TipCategory::Latest => "Latest Tips",
            TipCategory::Seasonal => "Seasonal Advice",
            TipCategory::Techniques => "Farming Techniques",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "latest" => Some(TipCategory::Latest),
            "seasonal" => Some(TipCategory::Seasonal),
            "techniques" => Some(TipCategory::Techniques),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmingTip {
    pub id: u32,
    pub title: &'static str,
    pub content: &'static str,
    /// Topic badge, distinct from the tab the tip is listed under.
    pub category: &'static str,
    pub date: &'static str,
    pub read_time: &'static str,
    pub image: Option<&'static str>,
}

const TIPS: [(TipCategory, FarmingTip); 7] = [
    (
        TipCategory::Latest,
        FarmingTip {
            id: 1,
            title: "Optimizing Irrigation During Dry Spells",
            content: "During periods of limited rainfall, it's crucial to optimize your irrigation practices. Consider implementing drip irrigation systems which can reduce water usage by up to 60% compared to traditional methods. Water early in the morning or late in the evening to minimize evaporation. Focus on the root zone rather than the entire field. Monitor soil moisture levels regularly and adjust your watering schedule accordingly.",
            category: "Water Management",
            date: "April 2, 2025",
            read_time: "4 min read",
            image: Some("/images/dry-spells.jpg"),
        },
    ),
    (
        TipCategory::Latest,
        FarmingTip {
            id: 2,
            title: "Natural Pest Control Methods for Organic Farming",
            content: "Organic farming relies on natural pest control methods rather than synthetic pesticides. Introduce beneficial insects like ladybugs and praying mantises to control aphids and other pests. Plant companion crops such as marigolds, which repel nematodes, or basil, which deters flies and mosquitoes. Create diverse plantings to prevent pest buildup. Use neem oil spray for a broad-spectrum natural insecticide that's safe for beneficial insects.",
            category: "Organic Farming",
            date: "March 28, 2025",
            read_time: "5 min read",
            image: Some("/images/pest-control.jpg"),
        },
    ),
    (
        TipCategory::Latest,
        FarmingTip {
            id: 3,
            title: "Soil Health: The Foundation of Successful Farming",
            content: "Healthy soil is the foundation of productive farming. Regular soil testing helps you understand its nutrient content and pH levels. Implement crop rotation to prevent nutrient depletion and reduce pest pressure. Add organic matter through compost or cover crops to improve soil structure and water retention. Minimize tillage to protect soil microorganisms and prevent erosion. Consider adding beneficial microbes to enhance nutrient availability.",
            category: "Soil Management",
            date: "March 25, 2025",
            read_time: "6 min read",
            image: Some("/images/soil-health.jpg"),
        },
    ),
    (
        TipCategory::Seasonal,
        FarmingTip {
            id: 4,
            title: "Preparing Your Fields for the Monsoon Season",
            content: "As monsoon approaches, proper field preparation becomes essential. Clear drainage channels to prevent waterlogging. Consider raised bed farming in areas prone to flooding. Apply organic mulch to protect soil from heavy rainfall impact. Install rain gauges to monitor precipitation levels. Prepare contingency crops that can withstand excessive moisture. Service water pumps and ensure they're ready for potential flooding situations.",
            category: "Seasonal Planning",
            date: "March 20, 2025",
            read_time: "5 min read",
            image: Some("/images/monsoon.jpg"),
        },
    ),
    (
        TipCategory::Seasonal,
        FarmingTip {
            id: 5,
            title: "Summer Crop Protection Strategies",
            content: "Protecting crops during intense summer heat requires specific strategies. Install shade cloth for sensitive crops during peak heat hours. Increase watering frequency but avoid overwatering. Apply mulch to keep soil temperatures moderate and retain moisture. Consider planting heat-resistant varieties. Create windbreaks to reduce hot, drying winds. Monitor for heat stress symptoms and address them promptly.",
            category: "Crop Protection",
            date: "March 15, 2025",
            read_time: "4 min read",
            image: Some("/images/summer.jpg"),
        },
    ),
    (
        TipCategory::Techniques,
        FarmingTip {
            id: 6,
            title: "Intercropping: Maximizing Land Use Efficiency",
            content: "Intercropping involves growing two or more crops simultaneously in the same field. This practice maximizes land use efficiency and can increase total yield per acre. Choose complementary crops that don't compete for the same resources. Consider tall and short plant combinations to maximize sunlight utilization. Legumes paired with grains can enhance soil nitrogen. Plan harvest times carefully to minimize interference between crops.",
            category: "Farming Techniques",
            date: "March 10, 2025",
            read_time: "6 min read",
            image: Some("/images/intercropping.jpg"),
        },
    ),
    (
        TipCategory::Techniques,
        FarmingTip {
            id: 7,
            title: "Conservation Tillage: Protecting Soil While Reducing Costs",
            content: "Conservation tillage minimizes soil disturbance, leaving at least 30% of crop residue on the soil surface. This approach reduces erosion, improves soil health, and lowers fuel and labor costs. Start with appropriate equipment modifications. Manage residue effectively to prevent disease. Monitor for weed pressure and adjust control methods accordingly. Consider cover crops during off-seasons to further enhance soil protection and build organic matter.",
            category: "Sustainable Practices",
            date: "March 5, 2025",
            read_time: "5 min read",
            image: Some("/images/conservation.jpg"),
        },
    ),
];

pub fn tips_for(category: TipCategory) -> Vec<FarmingTip> {
    TIPS.iter()
        .filter(|(tab, _)| *tab == category)
        .map(|(_, tip)| tip.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tip_belongs_to_exactly_one_tab() {
        let counts: Vec<usize> = TipCategory::ALL
            .into_iter()
            .map(|category| tips_for(category).len())
            .collect();
        assert_eq!(counts, [3, 2, 2]);
        assert_eq!(tips_for(TipCategory::Seasonal)[0].id, 4);
    }

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!(TipCategory::parse("Techniques"), Some(TipCategory::Techniques));
        assert_eq!(TipCategory::parse("weekly"), None);
    }
}
