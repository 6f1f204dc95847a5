//! Prompt construction for recipe generation.

use crate::types::RecipeRequestParams;

/// Build the recipe prompt for `params`.
///
/// The template asks for a title, ingredients with quantities, numbered
/// steps and an optional tip, all as markdown, which is what the rendering
/// side expects to display.
pub fn build(params: &RecipeRequestParams) -> String {
    let category = match params.sub_category_opt() {
        Some(sub) => format!("{} ({sub})", params.category()),
        None => params.category().to_string(),
    };

    format!(
        "Génère une recette détaillée avec:\n\
         - Titre: [Nom de la recette]\n\
         - Portions: {servings}\n\
         - Type: {cuisine}\n\
         - Catégorie: {category}\n\
         - Ingrédients: [liste avec quantités]\n\
         - Étapes: [numérotées]\n\
         - Astuce: [optionnelle]\n\
         Formatte en Markdown.",
        servings = params.servings(),
        cuisine = params.cuisine(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(sub: &str) -> RecipeRequestParams {
        RecipeRequestParams::new("4", "Italienne", "Viande", sub)
    }

    #[test]
    fn includes_servings_cuisine_and_category_with_sub_category() {
        let prompt = build(&params("Bœuf"));
        assert!(prompt.contains("Portions: 4"));
        assert!(prompt.contains("Italienne"));
        assert!(prompt.contains("Viande (Bœuf)"));
    }

    #[test]
    fn omits_parenthetical_without_sub_category() {
        let prompt = build(&RecipeRequestParams::new("2", "Française", "Dessert", ""));
        assert!(prompt.contains("Catégorie: Dessert\n"));
        assert!(!prompt.contains('('));
    }

    #[test]
    fn requests_markdown_sections() {
        let prompt = build(&params(""));
        for section in ["Titre:", "Ingrédients:", "Étapes:", "Astuce:", "Markdown"] {
            assert!(prompt.contains(section), "missing {section}");
        }
    }

    #[test]
    fn is_deterministic() {
        let p = params("Veau");
        assert_eq!(build(&p), build(&p));
    }
}
