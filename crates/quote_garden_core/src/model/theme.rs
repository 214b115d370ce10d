//! Theme identifiers selectable from the dashboard settings.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    #[serde(rename = "paper")]
    Paper,
    #[serde(rename = "nature")]
    Nature,
    #[serde(rename = "github")]
    Github,
    #[serde(rename = "anime")]
    Anime,
    #[serde(rename = "2010s")]
    TwentyTens,
    #[serde(rename = "chef")]
    Chef,
    #[serde(rename = "vscode")]
    Vscode,
    #[serde(rename = "coffee")]
    Coffee,
}

impl Theme {
    /// Settings grid order.
    pub const ALL: [Theme; 8] = [
        Theme::Paper,
        Theme::Nature,
        Theme::Github,
        Theme::Anime,
        Theme::TwentyTens,
        Theme::Chef,
        Theme::Vscode,
        Theme::Coffee,
    ];

    /// Stable id stored under `userTheme` and used as `data-theme`.
    pub fn id(self) -> &'static str {
        match self {
            Self::Paper => "paper",
            Self::Nature => "nature",
            Self::Github => "github",
            Self::Anime => "anime",
            Self::TwentyTens => "2010s",
            Self::Chef => "chef",
            Self::Vscode => "vscode",
            Self::Coffee => "coffee",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Paper => "Paper (Default)",
            Self::Nature => "Nature",
            Self::Github => "GitHub",
            Self::Anime => "Anime",
            Self::TwentyTens => "2010s",
            Self::Chef => "Chef",
            Self::Vscode => "VSCode",
            Self::Coffee => "Coffee",
        }
    }

    /// Exact, case-sensitive id lookup.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|theme| theme.id() == id)
    }

    /// Value for the document `data-theme` attribute; `None` means remove it.
    pub fn data_theme_attribute(self) -> Option<&'static str> {
        match self {
            Self::Paper => None,
            other => Some(other.id()),
        }
    }

    /// `data-theme` value for a raw id. Every id except `paper` is applied
    /// verbatim, including ids this build does not know.
    pub fn attribute_for_id(id: &str) -> Option<&str> {
        (id != Self::Paper.id()).then_some(id)
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
