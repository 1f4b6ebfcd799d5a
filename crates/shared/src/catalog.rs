//! Static metric catalog: which metrics exist, how they group into menu
//! categories, how their titles read and where their legend sits.

use std::fmt;

pub const DEFAULT_METRIC: &str = "Population";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Population,
    MaritalStatus,
    Education,
    HousingType,
    HousingTenure,
    CookingEnergySource,
}

impl Category {
    /// Menu order.
    pub const ALL: [Category; 6] = [
        Category::Population,
        Category::MaritalStatus,
        Category::Education,
        Category::HousingType,
        Category::HousingTenure,
        Category::CookingEnergySource,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Population => "Population",
            Category::MaritalStatus => "Marital Status",
            Category::Education => "Education",
            Category::HousingType => "Housing Type",
            Category::HousingTenure => "Housing Tenure",
            Category::CookingEnergySource => "Cooking Energy Source",
        }
    }

    /// Map title for a metric of this category.
    pub fn title(self, metric: &str) -> String {
        match self {
            Category::Population => format!("{metric} of Kenya"),
            Category::MaritalStatus => format!("Marital Status: {metric}"),
            Category::Education => format!("Education Level: {metric}"),
            Category::HousingType => format!("Housing Type: {metric}"),
            Category::HousingTenure => format!("Housing Tenure: {metric}"),
            Category::CookingEnergySource => format!("Cooking Energy Source: {metric}"),
        }
    }

    pub fn metrics(self) -> impl Iterator<Item = &'static MetricInfo> {
        METRICS.iter().filter(move |m| m.category == self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricInfo {
    pub name: &'static str,
    pub category: Category,
    /// Horizontal legend shift so labels of varying width line up under the title.
    pub legend_offset_px: u32,
}

const fn metric(name: &'static str, category: Category, legend_offset_px: u32) -> MetricInfo {
    MetricInfo {
        name,
        category,
        legend_offset_px,
    }
}

pub static METRICS: [MetricInfo; 35] = [
    metric("Population", Category::Population, 0),
    metric("Married Monogamous", Category::MaritalStatus, 1),
    metric("Married Polygamous", Category::MaritalStatus, 8),
    metric("Living Together", Category::MaritalStatus, 10),
    metric("Separated", Category::MaritalStatus, 8),
    metric("Divorced", Category::MaritalStatus, 10),
    metric("Widow or Widowed", Category::MaritalStatus, 10),
    metric("Never Married", Category::MaritalStatus, 4),
    metric("No Education", Category::Education, 6),
    metric("Lower Primary", Category::Education, 8),
    metric("Upper Primary", Category::Education, 8),
    metric("Secondary", Category::Education, 3),
    metric("Middle-Level College", Category::Education, 8),
    metric("University Undergraduate", Category::Education, 7),
    metric("University Masters/PhD", Category::Education, 8),
    metric("Adult Basic Education", Category::Education, 10),
    metric("Vocational Training", Category::Education, 15),
    metric("Madrasa/Duksi", Category::Education, 10),
    metric("Bungalow", Category::HousingType, 6),
    metric("Flat", Category::HousingType, 6),
    metric("Maisonnette", Category::HousingType, 10),
    metric("Swahili", Category::HousingType, 7),
    metric("Shanty", Category::HousingType, 8),
    metric("Manyatta/Traditional House", Category::HousingType, 8),
    metric("Landhie", Category::HousingType, 8),
    metric("Owns", Category::HousingTenure, 7),
    metric("Pays Rent/Lease", Category::HousingTenure, 2),
    metric("No Rent, with Consent of Owner", Category::HousingTenure, 12),
    metric("No Rent, Squatting", Category::HousingTenure, 15),
    metric("Electricity", Category::CookingEnergySource, 12),
    metric("Paraffin", Category::CookingEnergySource, 8),
    metric("LPG (Gas)", Category::CookingEnergySource, 3),
    metric("Biogas", Category::CookingEnergySource, 13),
    metric("Firewood", Category::CookingEnergySource, 8),
    metric("Charcoal", Category::CookingEnergySource, 8),
];

pub fn lookup(name: &str) -> Option<&'static MetricInfo> {
    METRICS.iter().find(|m| m.name == name)
}

/// Legend offset in pixels; metrics outside the catalog are not shifted.
pub fn legend_offset_px(name: &str) -> u32 {
    lookup(name).map(|m| m.legend_offset_px).unwrap_or(0)
}

/// Title shown above the map for `name`.
pub fn title_for(name: &str) -> String {
    match lookup(name) {
        Some(info) => info.category.title(name),
        None => format!("{name} in Kenya"),
    }
}
