use serde::Deserialize;

/// One confirmed-dead type reported by the dead-code analysis service.
///
/// `class_name` may carry server-side qualification (a compiled module
/// prefix on iOS, a package path and `$` nesting on Android) and is
/// normalized through [`super::parse_type_name`] before use. `paths` are
/// project-relative candidate locations, possibly suffixed with `:line`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeadTypeRecord {
    pub class_name: String,
    #[serde(default)]
    pub paths: Option<Vec<String>>,
    /// Whether the type was seen at runtime; seen types are not dead.
    #[serde(default)]
    pub seen: bool,
}

impl DeadTypeRecord {
    pub fn new(class_name: impl Into<String>, paths: Option<Vec<String>>) -> Self {
        Self { class_name: class_name.into(), paths, seen: false }
    }
}

/// Wire shape of the service export: either a bare array of records or an
/// object carrying them under `dead_code`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DeadCodeExport {
    Wrapped { dead_code: Vec<DeadTypeRecord> },
    Records(Vec<DeadTypeRecord>),
}

impl DeadCodeExport {
    pub fn into_records(self) -> Vec<DeadTypeRecord> {
        match self {
            DeadCodeExport::Wrapped { dead_code } => dead_code,
            DeadCodeExport::Records(records) => records,
        }
    }
}
