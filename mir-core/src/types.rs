//! Domain types for the mir config file.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.
//! All types are serializable/deserializable via serde + serde_json.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Keys the current version does not know about, kept verbatim so a
/// load/save cycle never drops them.
pub type ExtraFields = BTreeMap<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed name for a tracked project.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectName(pub String);

impl ProjectName {
    /// Normalise free-form user input into a project name: trimmed,
    /// lowercase, spaces replaced with hyphens. Returns `None` when nothing
    /// usable remains.
    pub fn normalize(raw: &str) -> Option<Self> {
        let name = raw.trim().to_lowercase().replace(' ', "-");
        if name.is_empty() {
            None
        } else {
            Some(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A single tracked project.
///
/// `name` is the registry key; it is not repeated inside the JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(skip)]
    pub name: ProjectName,
    /// Absolute path to the project root on disk.
    pub path: PathBuf,
    /// Web URL of the hosted copy, `null` for local-only projects.
    #[serde(default)]
    pub github: Option<String>,
    /// Registration date; `null` for hand-written records that lack one.
    #[serde(default)]
    pub created: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl ProjectRecord {
    pub fn new(name: ProjectName, path: PathBuf, created: NaiveDate) -> Self {
        Self {
            name,
            path,
            github: None,
            created: Some(created),
            description: None,
            extra: ExtraFields::new(),
        }
    }
}

/// Git identity, global to the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default, rename = "github_username")]
    pub username: Option<String>,
    #[serde(default, rename = "github_email")]
    pub email: Option<String>,
}

/// Where new projects are created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSettings {
    #[serde(default)]
    pub use_workspace: bool,
    /// Root folder holding every project as a subfolder.
    #[serde(default)]
    pub workspace: Option<PathBuf>,
}

impl WorkspaceSettings {
    /// The workspace root, only when the user opted into one.
    pub fn root(&self) -> Option<&Path> {
        if self.use_workspace {
            self.workspace.as_deref()
        } else {
            None
        }
    }
}

/// Root of `~/.mir/config.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub identity: Identity,
    #[serde(flatten)]
    pub workspace: WorkspaceSettings,
    #[serde(default)]
    pub setup_complete: bool,
    #[serde(default)]
    pub projects: Registry,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Ordered mapping from project name to record.
///
/// Stored order is insertion order and survives a load/save cycle. Names are
/// unique: inserting an existing name replaces that record in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    records: Vec<ProjectRecord>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ProjectRecord> {
        self.records.iter().find(|r| r.name.0 == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ProjectRecord> {
        self.records.iter_mut().find(|r| r.name.0 == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Register a project. Returns the previous record when the name was
    /// already present.
    pub fn insert(&mut self, record: ProjectRecord) -> Option<ProjectRecord> {
        match self.records.iter_mut().find(|r| r.name == record.name) {
            Some(slot) => Some(std::mem::replace(slot, record)),
            None => {
                self.records.push(record);
                None
            }
        }
    }

    /// Records in stored order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectRecord> {
        self.records.iter()
    }

    /// Records sorted by name, for display.
    pub fn sorted(&self) -> Vec<&ProjectRecord> {
        let mut records: Vec<&ProjectRecord> = self.records.iter().collect();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        records
    }

    /// First record (stored order) whose path equals `path`.
    pub fn find_by_path(&self, path: &Path) -> Option<&ProjectRecord> {
        self.records.iter().find(|r| r.path == path)
    }
}

impl FromIterator<ProjectRecord> for Registry {
    fn from_iter<I: IntoIterator<Item = ProjectRecord>>(iter: I) -> Self {
        let mut registry = Registry::new();
        for record in iter {
            registry.insert(record);
        }
        registry
    }
}

impl Serialize for Registry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for record in &self.records {
            map.serialize_entry(&record.name.0, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Registry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RegistryVisitor;

        impl<'de> Visitor<'de> for RegistryVisitor {
            type Value = Registry;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of project name to project record")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Registry, A::Error> {
                let mut registry = Registry::new();
                while let Some((name, mut record)) =
                    access.next_entry::<String, ProjectRecord>()?
                {
                    record.name = ProjectName(name);
                    registry.insert(record);
                }
                Ok(registry)
            }
        }

        deserializer.deserialize_map(RegistryVisitor)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, path: &str) -> ProjectRecord {
        ProjectRecord::new(
            ProjectName::from(name),
            PathBuf::from(path),
            NaiveDate::from_ymd_opt(2024, 3, 1).expect("date"),
        )
    }

    #[test]
    fn newtype_display() {
        assert_eq!(ProjectName::from("foo").to_string(), "foo");
    }

    #[test]
    fn normalize_lowercases_and_hyphenates() {
        assert_eq!(
            ProjectName::normalize("  My Cool App "),
            Some(ProjectName::from("my-cool-app"))
        );
        assert_eq!(ProjectName::normalize("   "), None);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut reg: Registry = [record("b", "/b"), record("a", "/a")].into_iter().collect();
        let old = reg.insert(record("b", "/elsewhere"));
        assert_eq!(old.map(|r| r.path), Some(PathBuf::from("/b")));
        let names: Vec<&str> = reg.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(reg.get("b").map(|r| r.path.clone()), Some(PathBuf::from("/elsewhere")));
    }

    #[test]
    fn registry_preserves_stored_order_through_json() {
        let reg: Registry = [record("zeta", "/z"), record("alpha", "/a")].into_iter().collect();
        let json = serde_json::to_string(&reg).expect("serialize");
        assert!(json.find("zeta").unwrap() < json.find("alpha").unwrap());
        let back: Registry = serde_json::from_str(&json).expect("deserialize");
        let names: Vec<&str> = back.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }

    #[test]
    fn sorted_orders_by_name() {
        let reg: Registry = [record("zeta", "/z"), record("alpha", "/a")].into_iter().collect();
        let names: Vec<&str> = reg.sorted().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["alpha", "zeta"]);
    }

    #[test]
    fn workspace_root_requires_opt_in() {
        let ws = WorkspaceSettings {
            use_workspace: false,
            workspace: Some(PathBuf::from("/ws")),
        };
        assert_eq!(ws.root(), None);
    }
}
