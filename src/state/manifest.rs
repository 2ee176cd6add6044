use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::debug;

use super::data::{Project, ProjectId};
use crate::error::ManifestError;

/// The manifest file: every project record with its resolved media paths.
///
/// The canonical file is a top-level JSON array. Older copies of the site
/// wrap the array as `{"obras": [...]}`; that shape is read too and written
/// back unchanged, including any other top-level keys.
///
/// Records read from disk are written back from their original JSON, with
/// only the fields whose value changed replaced. Explicit `null`s, key order
/// and absent keys survive a load/save cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub projects: Vec<Project>,
    shape: Shape,
    sources: HashMap<ProjectId, RecordSource>,
}

#[derive(Debug, Clone, PartialEq)]
enum Shape {
    Array,
    /// The whole top-level object; its `obras` entry is replaced on write
    Wrapped(Map<String, Value>),
}

/// A record as found on disk, and how it serialized right after parsing
#[derive(Debug, Clone, PartialEq)]
struct RecordSource {
    raw: Map<String, Value>,
    baseline: Map<String, Value>,
}

impl RecordSource {
    /// Apply the fields that differ from the baseline onto the raw record
    fn patch(&self, fresh: Map<String, Value>) -> Map<String, Value> {
        let mut out = self.raw.clone();
        for key in self.baseline.keys() {
            if !fresh.contains_key(key) {
                out.shift_remove(key);
            }
        }
        for (key, value) in fresh {
            if self.baseline.get(&key) != Some(&value) {
                out.insert(key, value);
            }
        }
        out
    }
}

fn to_object(project: &Project) -> Result<Map<String, Value>, ManifestError> {
    match serde_json::to_value(project)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

fn unexpected_shape() -> ManifestError {
    ManifestError::Shape("expected an array or an object with an \"obras\" array".to_string())
}

fn parse_record(index: usize, item: Value) -> Result<(Project, RecordSource), ManifestError> {
    let Value::Object(raw) = item else {
        return Err(ManifestError::Shape(format!("record {} is not an object", index)));
    };

    let project: Project =
        serde_json::from_value(Value::Object(raw.clone())).map_err(|source| ManifestError::Record {
            index,
            name: raw
                .get("nombre")
                .and_then(Value::as_str)
                .unwrap_or("?")
                .to_string(),
            source,
        })?;
    let baseline = to_object(&project)?;

    Ok((project, RecordSource { raw, baseline }))
}

impl Manifest {
    pub fn new(projects: Vec<Project>) -> Self {
        Manifest {
            projects,
            shape: Shape::Array,
            sources: HashMap::new(),
        }
    }

    /// Parse and validate manifest JSON
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let (items, shape) = match serde_json::from_str::<Value>(json)? {
            Value::Array(items) => (items, Shape::Array),
            Value::Object(mut map) => {
                let obras = map.get_mut("obras").map(Value::take);
                match obras {
                    Some(Value::Array(items)) => (items, Shape::Wrapped(map)),
                    _ => return Err(unexpected_shape()),
                }
            }
            _ => return Err(unexpected_shape()),
        };

        let mut projects = Vec::with_capacity(items.len());
        let mut sources = HashMap::new();
        for (index, item) in items.into_iter().enumerate() {
            let (project, source) = parse_record(index, item)?;
            sources.insert(project.id.clone(), source);
            projects.push(project);
        }

        let manifest = Manifest {
            projects,
            shape,
            sources,
        };
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load from disk (blocking)
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Err(ManifestError::NotFound(path.to_path_buf()));
        }

        let json = fs::read_to_string(path).map_err(|e| ManifestError::io(path, e))?;
        let manifest = Self::from_json(&json)?;

        debug!("📄 Loaded {} projects from {}", manifest.projects.len(), path.display());
        Ok(manifest)
    }

    /// Identifiers must be unique across the manifest
    pub fn validate(&self) -> Result<(), ManifestError> {
        let mut seen = HashSet::new();
        for project in &self.projects {
            if !seen.insert(&project.id) {
                return Err(ManifestError::DuplicateId(project.id.clone()));
            }
        }
        Ok(())
    }

    fn records(&self) -> Result<Vec<Value>, ManifestError> {
        self.projects
            .iter()
            .map(|project| {
                let fresh = to_object(project)?;
                Ok(Value::Object(match self.sources.get(&project.id) {
                    Some(source) => source.patch(fresh),
                    None => fresh,
                }))
            })
            .collect()
    }

    /// Pretty-printed JSON (2-space indent), deterministic for a given value
    pub fn to_pretty_json(&self) -> Result<String, ManifestError> {
        let records = Value::Array(self.records()?);
        let json = match &self.shape {
            Shape::Array => serde_json::to_string_pretty(&records)?,
            Shape::Wrapped(top) => {
                let mut top = top.clone();
                top.insert("obras".to_string(), records);
                serde_json::to_string_pretty(&top)?
            }
        };
        Ok(json)
    }

    /// Write to disk. Returns false when the file already held identical bytes.
    pub fn save(&self, path: &Path) -> Result<bool, ManifestError> {
        let json = self.to_pretty_json()?;

        if let Ok(existing) = fs::read_to_string(path) {
            if existing == json {
                return Ok(false);
            }
        }

        fs::write(path, json).map_err(|e| ManifestError::io(path, e))?;
        Ok(true)
    }

    pub fn find(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    pub fn is_wrapped(&self) -> bool {
        matches!(self.shape, Shape::Wrapped(_))
    }
}
