/// Shared data structures for the portfolio
///
/// These structs represent a single project record ("obra") as it is
/// stored in the manifest and flows between the pipeline and the viewer.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Project identifier: the manifest uses integers, but strings are accepted
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(untagged)]
pub enum ProjectId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectId::Number(n) => write!(f, "{}", n),
            ProjectId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ProjectId {
    fn from(value: i64) -> Self {
        ProjectId::Number(value)
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        ProjectId::Text(value.to_string())
    }
}

/// Project category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Residential,
    Commercial,
    Corporate,
    Industrial,
    Hospitality,
    /// Shown as written, never matches a category filter
    Unrecognized,
}

impl Category {
    /// All categories that can be selected as a filter
    pub const ALL: [Category; 5] = [
        Category::Residential,
        Category::Commercial,
        Category::Corporate,
        Category::Industrial,
        Category::Hospitality,
    ];

    /// Parse the raw manifest text (English or the site's Spanish labels)
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "residential" | "residencial" => Category::Residential,
            "commercial" | "comercial" => Category::Commercial,
            "corporate" | "corporativo" | "corporativa" => Category::Corporate,
            "industrial" => Category::Industrial,
            "hospitality" | "hoteleria" | "hotelería" => Category::Hospitality,
            _ => Category::Unrecognized,
        }
    }

    /// Button label in the viewer
    pub fn label(&self) -> &'static str {
        match self {
            Category::Residential => "Residencial",
            Category::Commercial => "Comercial",
            Category::Corporate => "Corporativo",
            Category::Industrial => "Industrial",
            Category::Hospitality => "Hotelería",
            Category::Unrecognized => "Otra",
        }
    }
}

/// Project status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Completed,
    InProgress,
    Unrecognized,
}

impl Status {
    pub const ALL: [Status; 2] = [Status::Completed, Status::InProgress];

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "completed" | "finalizada" | "finalizado" | "terminada" | "terminado" => {
                Status::Completed
            }
            "in-progress" | "in progress" | "en curso" | "en-curso" | "en progreso" => {
                Status::InProgress
            }
            _ => Status::Unrecognized,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Completed => "Finalizada",
            Status::InProgress => "En curso",
            Status::Unrecognized => "Sin estado",
        }
    }
}

/// Manifests write `null` for unknown values; read those as the default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A single project in the portfolio
///
/// Category and status keep the text exactly as written in the manifest so
/// that rewriting the file never alters them; use [`Project::category`] and
/// [`Project::status`] for the parsed values.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    #[serde(rename = "nombre", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "cliente", default, deserialize_with = "null_as_default")]
    pub client: String,
    #[serde(rename = "categoria", default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(rename = "estado", default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(rename = "ubicacion", default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(rename = "superficie", default, deserialize_with = "null_as_default")]
    pub area: String,
    #[serde(rename = "descripcion", default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Relative paths under the assets images root
    #[serde(rename = "imagenes", default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub videos: Vec<String>,
    /// ISO date (YYYY-MM-DD)
    #[serde(rename = "fechaInicio", default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(rename = "fechaFin", default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Any other key found in the manifest, written back untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Project {
    pub fn category(&self) -> Category {
        Category::parse(&self.category)
    }

    pub fn status(&self) -> Status {
        Status::parse(&self.status)
    }

    /// CSS-like status slug, e.g. "En curso" -> "en-curso"
    pub fn status_slug(&self) -> String {
        self.status.trim().to_lowercase().replace(' ', "-")
    }

    pub fn has_media(&self) -> bool {
        !self.images.is_empty() || !self.videos.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn sample_project(id: i64, category: &str, status: &str) -> Project {
    Project {
        id: ProjectId::Number(id),
        name: format!("Obra {}", id),
        client: "Cliente".to_string(),
        category: category.to_string(),
        status: status.to_string(),
        location: "Montevideo".to_string(),
        area: "1200 m²".to_string(),
        description: "Fachada de aluminio".to_string(),
        images: Vec::new(),
        videos: Vec::new(),
        start_date: None,
        end_date: None,
        extra: serde_json::Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing_accepts_both_languages() {
        assert_eq!(Category::parse("residential"), Category::Residential);
        assert_eq!(Category::parse("Residencial"), Category::Residential);
        assert_eq!(Category::parse("HOTELERÍA"), Category::Hospitality);
        assert_eq!(Category::parse("naval"), Category::Unrecognized);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(Status::parse("in-progress"), Status::InProgress);
        assert_eq!(Status::parse("En curso"), Status::InProgress);
        assert_eq!(Status::parse("Finalizada"), Status::Completed);
        assert_eq!(Status::parse(""), Status::Unrecognized);
    }

    #[test]
    fn test_project_keeps_unknown_fields() {
        let json = r#"{
            "id": 7,
            "nombre": "Hospital del Cerro",
            "categoria": "corporativo",
            "estado": "Finalizada",
            "imagenes": ["obras/hospital-cerro/1.jpg"],
            "destacada": true
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.id, ProjectId::Number(7));
        assert_eq!(project.category(), Category::Corporate);
        assert!(project.videos.is_empty());
        assert_eq!(project.extra.get("destacada"), Some(&serde_json::Value::Bool(true)));

        let back = serde_json::to_value(&project).unwrap();
        assert_eq!(back["destacada"], serde_json::Value::Bool(true));
        assert_eq!(back["categoria"], "corporativo");
    }

    #[test]
    fn test_string_ids() {
        let project: Project = serde_json::from_str(r#"{"id": "tgs"}"#).unwrap();
        assert_eq!(project.id, ProjectId::from("tgs"));
        assert_eq!(project.id.to_string(), "tgs");
    }

    #[test]
    fn test_status_slug() {
        let project = sample_project(1, "industrial", "En curso");
        assert_eq!(project.status_slug(), "en-curso");
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let json = r#"{"id": 7, "nombre": "Proa Carrasco", "cliente": null,
            "superficie": null, "imagenes": null, "videos": null, "fechaFin": null}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.name, "Proa Carrasco");
        assert_eq!(project.client, "");
        assert_eq!(project.area, "");
        assert!(project.images.is_empty());
        assert!(!project.has_media());
        assert_eq!(project.end_date, None);
    }
}
