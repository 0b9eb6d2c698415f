/// Team entity
///
/// Represents a registered sports team. All descriptive fields are free
/// text: the founding year and the title count are stored exactly as typed.
///
/// # Invariants
/// - `id` is empty until the store assigns one
/// - Once returned from the store, `id` is non-empty and unique
/// - A persisted team is never edited by this system
///
/// # Example
/// ```
/// use liga_registry::domain::team::Team;
///
/// let team = Team::new("River", "1901", "38", "");
///
/// assert_eq!(team.name(), "River");
/// assert!(!team.is_persisted());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    id: String,
    name: String,
    founding_year: String,
    title_count: String,
    image_url: String,
}

impl Team {
    /// Creates a team that has not been stored yet
    ///
    /// # Arguments
    /// * `name` - Team name
    /// * `founding_year` - Founding year as typed by the user
    /// * `title_count` - Number of titles as typed by the user
    /// * `image_url` - Crest image URL, may be empty
    pub fn new(
        name: impl Into<String>,
        founding_year: impl Into<String>,
        title_count: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            founding_year: founding_year.into(),
            title_count: title_count.into(),
            image_url: image_url.into(),
        }
    }

    // ===== Getters =====

    /// Returns the store-assigned ID, empty before persistence
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn founding_year(&self) -> &str {
        &self.founding_year
    }

    pub fn title_count(&self) -> &str {
        &self.title_count
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Whether the store has assigned this team an ID
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }

    /// Reconstructs a Team from persistence layer data
    ///
    /// # Note
    /// Only to be used by the document decoding step.
    pub fn from_persistence(
        id: String,
        name: String,
        founding_year: String,
        title_count: String,
        image_url: String,
    ) -> Self {
        Self {
            id,
            name,
            founding_year,
            title_count,
            image_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_team_has_empty_id() {
        let team = Team::new("River", "1901", "38", "https://example.com/river.png");

        assert_eq!(team.id(), "");
        assert!(!team.is_persisted());
        assert_eq!(team.name(), "River");
        assert_eq!(team.founding_year(), "1901");
        assert_eq!(team.title_count(), "38");
        assert_eq!(team.image_url(), "https://example.com/river.png");
    }

    #[test]
    fn free_text_fields_are_kept_verbatim() {
        let team = Team::new("Boca", "circa 1905", "a lot", "");

        assert_eq!(team.founding_year(), "circa 1905");
        assert_eq!(team.title_count(), "a lot");
    }

    #[test]
    fn persisted_team_reports_its_id() {
        let team = Team::from_persistence(
            "abc123".to_string(),
            "Alianza".to_string(),
            "1901".to_string(),
            "25".to_string(),
            String::new(),
        );

        assert!(team.is_persisted());
        assert_eq!(team.id(), "abc123");
        assert_eq!(team.image_url(), "");
    }
}
