use serde::{Deserialize, Serialize};

/// Laundry services offered for booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    WashAndFold,
    WashAndIron,
    DryClean,
    IronOnly,
    ShoeCleaning,
}

impl ServiceType {
    pub fn code(&self) -> &'static str {
        match self {
            ServiceType::WashAndFold => "wash_and_fold",
            ServiceType::WashAndIron => "wash_and_iron",
            ServiceType::DryClean => "dry_clean",
            ServiceType::IronOnly => "iron_only",
            ServiceType::ShoeCleaning => "shoe_cleaning",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceType::WashAndFold => "Wash & fold",
            ServiceType::WashAndIron => "Wash & iron",
            ServiceType::DryClean => "Dry clean",
            ServiceType::IronOnly => "Iron only",
            ServiceType::ShoeCleaning => "Shoe cleaning",
        }
    }

    pub fn all() -> Vec<ServiceType> {
        vec![
            ServiceType::WashAndFold,
            ServiceType::WashAndIron,
            ServiceType::DryClean,
            ServiceType::IronOnly,
            ServiceType::ShoeCleaning,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|v| v.code() == code)
    }
}
