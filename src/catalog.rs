//! Option lists offered to users when picking recipe parameters.
//!
//! The catalog informs pickers and sub-category visibility; it never
//! validates. Labels outside these lists are passed through untouched.

pub const SERVINGS: &[&str] = &["1", "2", "3", "4", "5", "6", "7", "8"];

pub const CUISINES: &[&str] = &[
    "Française",
    "Italienne",
    "Asiatique",
    "Mexicaine",
    "Indienne",
    "Méditerranéenne",
    "Américaine",
];

pub const CATEGORIES: &[&str] = &["Viande", "Poisson", "Végétarien", "Dessert", "Entrée"];

const MEAT: &[&str] = &["Bœuf", "Porc", "Poulet", "Agneau", "Veau"];
const FISH: &[&str] = &["Saumon", "Thon", "Cabillaud", "Crevettes", "Sardine"];

/// Sub-categories for `category`, or an empty slice when it has none.
pub fn sub_categories(category: &str) -> &'static [&'static str] {
    let category = category.trim();
    if category.eq_ignore_ascii_case("viande") {
        MEAT
    } else if category.eq_ignore_ascii_case("poisson") {
        FISH
    } else {
        &[]
    }
}

pub fn has_sub_categories(category: &str) -> bool {
    !sub_categories(category).is_empty()
}
