//! OpenAI chat model identifiers.

use std::fmt;

use strum::EnumString;

/// Chat-completions models the recipe generator knows by name.
///
/// Anything else parses into [`ChatModel::Custom`] and is sent verbatim, so
/// new model ids work without a release.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, Default)]
pub enum ChatModel {
    #[default]
    #[strum(serialize = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[strum(serialize = "gpt-4o")]
    Gpt4o,
    #[strum(serialize = "gpt-4o-mini")]
    Gpt4oMini,
    #[strum(serialize = "gpt-4.1")]
    Gpt41,
    #[strum(serialize = "gpt-4.1-mini")]
    Gpt41Mini,
    #[strum(serialize = "gpt-4.1-nano")]
    Gpt41Nano,
    /// Custom/unknown model by ID.
    #[strum(default)]
    Custom(String),
}

impl ChatModel {
    /// Get the API model identifier.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Gpt35Turbo => "gpt-3.5-turbo",
            Self::Gpt4o => "gpt-4o",
            Self::Gpt4oMini => "gpt-4o-mini",
            Self::Gpt41 => "gpt-4.1",
            Self::Gpt41Mini => "gpt-4.1-mini",
            Self::Gpt41Nano => "gpt-4.1-nano",
            Self::Custom(s) => s,
        }
    }

    /// The named models, in the order they are offered to users.
    pub fn recognized() -> &'static [ChatModel] {
        &[
            Self::Gpt35Turbo,
            Self::Gpt4o,
            Self::Gpt4oMini,
            Self::Gpt41,
            Self::Gpt41Mini,
            Self::Gpt41Nano,
        ]
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for ChatModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
