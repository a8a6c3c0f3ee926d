use serde::{Deserialize, Serialize};

/// A known technology and the year it was first released.
///
/// `name` is the unique key across the catalog. Only `name`, `aliases` and
/// `release_year` feed the scanner; `category` and `link` are carried for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technology {
    pub name: String,
    pub release_year: i32,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub link: String,
}

impl Technology {
    pub fn new(name: impl Into<String>, release_year: i32) -> Self {
        Self {
            name: name.into(),
            release_year,
            aliases: vec![],
            category: String::new(),
            link: String::new(),
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// The canonical name followed by every alias, in catalog order.
    pub fn search_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Longest real-world experience anyone could have with this technology.
    /// Negative when the release year lies in the future. Saturates at the
    /// `i32` bounds for nonsensical years.
    pub fn max_possible_years(&self, current_year: i32) -> i32 {
        current_year.saturating_sub(self.release_year)
    }
}
