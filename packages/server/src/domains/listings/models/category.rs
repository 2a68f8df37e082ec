use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::common::ValidationError;

/// Fixed set of listing categories. Shared by the creation and query paths;
/// stored and serialized as the display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Vehicles,
    PropertyRentals,
    Apparel,
    Classifieds,
    Electronics,
    Entertainment,
    Family,
    FreeStuff,
    GardenAndOutdoor,
    Hobbies,
    HomeGoods,
    HomeImprovement,
    HomeSales,
    MusicalInstruments,
    OfficeSupplies,
    PetSupplies,
    SportingGoods,
    ToysAndGames,
    BuyAndSellGroups,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 19] = [
        Category::Vehicles,
        Category::PropertyRentals,
        Category::Apparel,
        Category::Classifieds,
        Category::Electronics,
        Category::Entertainment,
        Category::Family,
        Category::FreeStuff,
        Category::GardenAndOutdoor,
        Category::Hobbies,
        Category::HomeGoods,
        Category::HomeImprovement,
        Category::HomeSales,
        Category::MusicalInstruments,
        Category::OfficeSupplies,
        Category::PetSupplies,
        Category::SportingGoods,
        Category::ToysAndGames,
        Category::BuyAndSellGroups,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Vehicles => "Vehicles",
            Category::PropertyRentals => "Property Rentals",
            Category::Apparel => "Apparel",
            Category::Classifieds => "Classifieds",
            Category::Electronics => "Electronics",
            Category::Entertainment => "Entertainment",
            Category::Family => "Family",
            Category::FreeStuff => "Free Stuff",
            Category::GardenAndOutdoor => "Garden & Outdoor",
            Category::Hobbies => "Hobbies",
            Category::HomeGoods => "Home Goods",
            Category::HomeImprovement => "Home Improvement",
            Category::HomeSales => "Home Sales",
            Category::MusicalInstruments => "Musical Instruments",
            Category::OfficeSupplies => "Office Supplies",
            Category::PetSupplies => "Pet Supplies",
            Category::SportingGoods => "Sporting Goods",
            Category::ToysAndGames => "Toys & Games",
            Category::BuyAndSellGroups => "Buy and sell groups",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.label() == s)
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}
