use serde_json::Value;

use super::team::Team;
use crate::domain::repositories::document_store::{Fields, StoredDocument};

/// Collection holding one document per registered team
pub const TEAMS_COLLECTION: &str = "equipos";

/// Document field names as stored in the collection
pub mod fields {
    pub const NAME: &str = "nombre";
    pub const FOUNDING_YEAR: &str = "anioFundacion";
    pub const TITLE_COUNT: &str = "titulos";
    pub const IMAGE_URL: &str = "urlImagen";
}

/// Encodes a team into the fields of a new document
///
/// The team's `id` is never written: the store assigns it.
pub fn encode_team(team: &Team) -> Fields {
    let mut doc = Fields::new();
    doc.insert(fields::NAME.to_string(), Value::from(team.name()));
    doc.insert(
        fields::FOUNDING_YEAR.to_string(),
        Value::from(team.founding_year()),
    );
    doc.insert(
        fields::TITLE_COUNT.to_string(),
        Value::from(team.title_count()),
    );
    doc.insert(fields::IMAGE_URL.to_string(), Value::from(team.image_url()));
    doc
}

/// Decodes a stored document into a Team
///
/// Decoding never fails. A field that is missing, or that holds anything
/// other than a string, becomes an empty string.
///
/// # Example
/// ```
/// use liga_registry::domain::repositories::document_store::{Fields, StoredDocument};
/// use liga_registry::domain::team::decode_team;
///
/// let mut fields = Fields::new();
/// fields.insert("nombre".to_string(), "River".into());
///
/// let team = decode_team(&StoredDocument::new("doc-1", fields));
/// assert_eq!(team.name(), "River");
/// assert_eq!(team.image_url(), "");
/// ```
pub fn decode_team(doc: &StoredDocument) -> Team {
    Team::from_persistence(
        doc.id.clone(),
        string_field(&doc.fields, fields::NAME),
        string_field(&doc.fields, fields::FOUNDING_YEAR),
        string_field(&doc.fields, fields::TITLE_COUNT),
        string_field(&doc.fields, fields::IMAGE_URL),
    )
}

fn string_field(doc: &Fields, key: &str) -> String {
    doc.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stored(id: &str, value: Value) -> StoredDocument {
        let fields = match value {
            Value::Object(map) => map,
            _ => panic!("test documents must be objects"),
        };
        StoredDocument::new(id, fields)
    }

    #[test]
    fn encode_writes_the_four_fields_without_id() {
        let team = Team::new("River", "1901", "38", "https://example.com/r.png");

        let doc = encode_team(&team);

        assert_eq!(doc.len(), 4);
        assert_eq!(doc["nombre"], "River");
        assert_eq!(doc["anioFundacion"], "1901");
        assert_eq!(doc["titulos"], "38");
        assert_eq!(doc["urlImagen"], "https://example.com/r.png");
        assert!(!doc.contains_key("id"));
    }

    #[test]
    fn decode_reads_every_field_and_the_document_id() {
        let doc = stored(
            "doc-9",
            json!({
                "nombre": "Universitario",
                "anioFundacion": "1924",
                "titulos": "28",
                "urlImagen": "https://example.com/u.png"
            }),
        );

        let team = decode_team(&doc);

        assert_eq!(team.id(), "doc-9");
        assert_eq!(team.name(), "Universitario");
        assert_eq!(team.founding_year(), "1924");
        assert_eq!(team.title_count(), "28");
        assert_eq!(team.image_url(), "https://example.com/u.png");
    }

    #[test]
    fn missing_image_url_decodes_to_empty_string() {
        let doc = stored(
            "doc-1",
            json!({ "nombre": "River", "anioFundacion": "1901", "titulos": "38" }),
        );

        let team = decode_team(&doc);

        assert_eq!(team.image_url(), "");
        assert_eq!(team.name(), "River");
    }

    #[test]
    fn empty_document_decodes_to_blank_team() {
        let team = decode_team(&stored("doc-2", json!({})));

        assert_eq!(team.id(), "doc-2");
        assert_eq!(team.name(), "");
        assert_eq!(team.founding_year(), "");
        assert_eq!(team.title_count(), "");
        assert_eq!(team.image_url(), "");
    }

    #[test]
    fn non_string_fields_decode_to_empty_string() {
        let doc = stored(
            "doc-3",
            json!({ "nombre": "Cristal", "anioFundacion": 1955, "titulos": null }),
        );

        let team = decode_team(&doc);

        assert_eq!(team.name(), "Cristal");
        assert_eq!(team.founding_year(), "");
        assert_eq!(team.title_count(), "");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let doc = stored("doc-4", json!({ "nombre": "Melgar", "estadio": "UNSA" }));

        assert_eq!(decode_team(&doc).name(), "Melgar");
    }
}
