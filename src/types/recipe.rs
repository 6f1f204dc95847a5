//! Recipe request parameters and generated recipes.

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::catalog;

use recipe_request_params_builder::IsComplete;

/// Parameters picked by the user for one generation.
///
/// Labels are trimmed however the value is built (`new`, the builder, or
/// deserialization). Only [`RecipeRequestParams::from_selection`] checks the
/// sub-category against the catalog; the other paths keep it as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Builder, Serialize, Deserialize)]
#[builder(finish_fn(name = build_untrimmed, vis = ""))]
#[serde(from = "Labels")]
pub struct RecipeRequestParams {
    #[builder(into)]
    servings: String,
    #[builder(into)]
    cuisine: String,
    #[builder(into)]
    category: String,
    #[builder(into, default)]
    sub_category: String,
}

impl<S: IsComplete> RecipeRequestParamsBuilder<S> {
    pub fn build(self) -> RecipeRequestParams {
        let raw = self.build_untrimmed();
        RecipeRequestParams::new(raw.servings, raw.cuisine, raw.category, raw.sub_category)
    }
}

/// Wire shape, normalized through [`RecipeRequestParams::new`] on the way in.
#[derive(Deserialize)]
struct Labels {
    servings: String,
    cuisine: String,
    category: String,
    #[serde(default)]
    sub_category: String,
}

impl From<Labels> for RecipeRequestParams {
    fn from(l: Labels) -> Self {
        Self::new(l.servings, l.cuisine, l.category, l.sub_category)
    }
}

impl RecipeRequestParams {
    /// Build parameters as given, trimming surrounding whitespace.
    ///
    /// The sub-category is not checked against the catalog, so
    /// `new("4", "Italienne", "Dessert", "Bœuf")` keeps `"Bœuf"`. Use
    /// [`RecipeRequestParams::from_selection`] for picker input.
    pub fn new(
        servings: impl Into<String>,
        cuisine: impl Into<String>,
        category: impl Into<String>,
        sub_category: impl Into<String>,
    ) -> Self {
        Self {
            servings: servings.into().trim().to_string(),
            cuisine: cuisine.into().trim().to_string(),
            category: category.into().trim().to_string(),
            sub_category: sub_category.into().trim().to_string(),
        }
    }

    /// Build parameters from a picker selection, dropping any sub-category
    /// when the category has no sub-taxonomy.
    pub fn from_selection(
        servings: impl Into<String>,
        cuisine: impl Into<String>,
        category: impl Into<String>,
        sub_category: Option<String>,
    ) -> Self {
        let category = category.into();
        let sub_category = if catalog::has_sub_categories(&category) {
            sub_category.unwrap_or_default()
        } else {
            String::new()
        };
        Self::new(servings, cuisine, category, sub_category)
    }

    pub fn servings(&self) -> &str {
        &self.servings
    }

    pub fn cuisine(&self) -> &str {
        &self.cuisine
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn sub_category(&self) -> &str {
        &self.sub_category
    }

    /// The sub-category, or `None` when it is empty.
    pub fn sub_category_opt(&self) -> Option<&str> {
        Some(self.sub_category.as_str()).filter(|s| !s.is_empty())
    }
}

/// A generated recipe body, formatted as markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub text: String,
}

impl Recipe {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
