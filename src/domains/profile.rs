use serde::{Deserialize, Serialize};

/// The signed-in user as kept in client-local storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub region: String,
    pub address: String,
}

impl UserProfile {
    /// Shown when nobody is signed in.
    pub fn placeholder() -> Self {
        Self {
            first_name: "User".to_string(),
            ..Self::default()
        }
    }

    /// The account every login resolves to; there is no credential check.
    pub fn demo() -> Self {
        Self {
            first_name: "Ravi".to_string(),
            last_name: "Singh".to_string(),
            email: "ravi.singh@example.com".to_string(),
            phone: "+91 9876543210".to_string(),
            region: "Punjab".to_string(),
            address: "Village Gurdaspur, District Amritsar".to_string(),
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .next()
            .into_iter()
            .chain(self.last_name.chars().next())
            .collect()
    }

    /// Sets a field by its form/JSON name. Returns false for unknown fields.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> bool {
        let slot = match field {
            "firstName" | "first_name" => &mut self.first_name,
            "lastName" | "last_name" => &mut self.last_name,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "region" => &mut self.region,
            "address" => &mut self.address,
            _ => return false,
        };
        *slot = value.into();
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Punjab,
    Haryana,
    UttarPradesh,
    MadhyaPradesh,
    Maharashtra,
    Karnataka,
    AndhraPradesh,
    WestBengal,
}

impl Region {
    pub const ALL: [Region; 8] = [
        Region::Punjab,
        Region::Haryana,
        Region::UttarPradesh,
        Region::MadhyaPradesh,
        Region::Maharashtra,
        Region::Karnataka,
        Region::AndhraPradesh,
        Region::WestBengal,
    ];

    pub fn form_value(self) -> &'static str {
        match self {
            Region::Punjab => "punjab",
            Region::Haryana => "haryana",
            Region::UttarPradesh => "up",
            Region::MadhyaPradesh => "mp",
            Region::Maharashtra => "maharashtra",
            Region::Karnataka => "karnataka",
            Region::AndhraPradesh => "ap",
            Region::WestBengal => "wb",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Region::Punjab => "Punjab",
            Region::Haryana => "Haryana",
            Region::UttarPradesh => "Uttar Pradesh",
            Region::MadhyaPradesh => "Madhya Pradesh",
            Region::Maharashtra => "Maharashtra",
            Region::Karnataka => "Karnataka",
            Region::AndhraPradesh => "Andhra Pradesh",
            Region::WestBengal => "West Bengal",
        }
    }

    /// Accepts either the short form value or the display label.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|region| {
            region.form_value().eq_ignore_ascii_case(value) || region.label().eq_ignore_ascii_case(value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_browser_field_names() {
        let value = serde_json::to_value(UserProfile::demo()).unwrap();
        assert_eq!(value["firstName"], "Ravi");
        assert_eq!(value["lastName"], "Singh");
        assert_eq!(value["address"], "Village Gurdaspur, District Amritsar");
    }

    #[test]
    fn missing_fields_read_as_empty() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"firstName":"Ravi","lastName":"Singh","phone":"1"}"#)
                .unwrap();
        assert_eq!(profile.email, "");
        assert_eq!(profile.address, "");
        assert_eq!(profile.initials(), "RS");
    }

    #[test]
    fn placeholder_has_single_initial() {
        let profile = UserProfile::placeholder();
        assert_eq!(profile.initials(), "U");
        assert_eq!(profile.display_name(), "User");
    }

    #[test]
    fn region_parses_value_or_label() {
        assert_eq!(Region::parse("up"), Some(Region::UttarPradesh));
        assert_eq!(Region::parse("West Bengal"), Some(Region::WestBengal));
        assert_eq!(Region::parse("atlantis"), None);
    }

    #[test]
    fn set_field_rejects_unknown_names() {
        let mut profile = UserProfile::demo();
        assert!(profile.set_field("region", "Haryana"));
        assert_eq!(profile.region, "Haryana");
        assert!(!profile.set_field("password", "secret"));
    }
}
