//! Image lookup query and URL derivation.

use crate::config::ImageSettings;
use crate::types::RecipeRequestParams;

/// Derive the percent-encoded image search query for `params`.
///
/// Cuisine, category and the sub-category (when present) are joined with
/// single spaces before encoding.
pub fn derive(params: &RecipeRequestParams) -> String {
    urlencoding::encode(&joined_terms(params)).into_owned()
}

fn joined_terms(params: &RecipeRequestParams) -> String {
    let mut terms = vec![params.cuisine(), params.category()];
    if let Some(sub) = params.sub_category_opt() {
        terms.push(sub);
    }
    terms.join(" ")
}

/// Build the URL the image renderer should load for an encoded `query`.
pub fn image_url(settings: &ImageSettings, query: &str) -> String {
    format!(
        "{}/{}x{}/?{query}",
        settings.base_url.trim_end_matches('/'),
        settings.width,
        settings.height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_and_encodes_terms() {
        let params = RecipeRequestParams::new("4", "Italienne", "Viande", "Bœuf");
        let query = derive(&params);
        assert!(!query.contains(' '));
        assert_eq!(
            urlencoding::decode(&query).unwrap(),
            "Italienne Viande Bœuf"
        );
    }

    #[test]
    fn omits_empty_sub_category() {
        let params = RecipeRequestParams::new("2", "Asiatique", "Végétarien", "");
        let decoded = urlencoding::decode(&derive(&params)).unwrap().into_owned();
        assert_eq!(decoded, "Asiatique Végétarien");
    }

    #[test]
    fn derive_is_deterministic() {
        let params = RecipeRequestParams::new("1", "Française", "Poisson", "Thon");
        assert_eq!(derive(&params), derive(&params));
    }

    #[test]
    fn url_uses_dimensions_and_query() {
        let settings = ImageSettings {
            base_url: "https://images.example.com/".into(),
            width: 600,
            height: 400,
        };
        assert_eq!(
            image_url(&settings, "Italienne%20Viande"),
            "https://images.example.com/600x400/?Italienne%20Viande"
        );
    }
}
