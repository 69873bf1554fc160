//! Generated artifacts and the ordered set that holds them
//!
//! Every artifact is addressed by an [`ArtifactKey`] and carries its output
//! path relative to the project directory. Paths always use `/` so that
//! digests are identical on every host.

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

/// Per-module source layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    /// JPA entity
    Entity,
    /// Spring Data repository
    Repository,
    /// Service facade over the repository
    Service,
    /// MVC controller
    Controller,
    /// Thymeleaf list page with the create form
    ListView,
    /// Thymeleaf edit page
    EditView,
}

impl Layer {
    /// All layers in generation order
    pub const ALL: [Layer; 6] = [
        Layer::Entity,
        Layer::Repository,
        Layer::Service,
        Layer::Controller,
        Layer::ListView,
        Layer::EditView,
    ];

    /// Stable identifier
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Layer::Entity => "entity",
            Layer::Repository => "repository",
            Layer::Service => "service",
            Layer::Controller => "controller",
            Layer::ListView => "list-view",
            Layer::EditView => "edit-view",
        }
    }
}

/// Project-wide artifact kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GlobalArtifact {
    /// Controller serving `/`
    HomeController,
    /// Home page linking every module
    HomeView,
    /// Shared stylesheet
    Stylesheet,
}

impl GlobalArtifact {
    /// Stable identifier
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            GlobalArtifact::HomeController => "home-controller",
            GlobalArtifact::HomeView => "home-view",
            GlobalArtifact::Stylesheet => "stylesheet",
        }
    }
}

/// Address of a generated artifact
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArtifactKey {
    /// One layer of one module
    Module(String, Layer),
    /// Project-wide artifact
    Global(GlobalArtifact),
}

impl ArtifactKey {
    /// Key for a module layer
    #[inline]
    #[must_use]
    pub fn module(module_name: impl Into<String>, layer: Layer) -> Self {
        Self::Module(module_name.into(), layer)
    }
}

impl Display for ArtifactKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKey::Module(module, layer) => write!(f, "{module}/{}", layer.as_str()),
            ArtifactKey::Global(kind) => write!(f, "global/{}", kind.as_str()),
        }
    }
}

/// Rendered file content and where it goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// `/`-separated path relative to the project directory
    pub path: String,
    /// Full file content
    pub content: String,
}

impl GeneratedArtifact {
    /// Create artifact
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Path as a platform path
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        self.path.split('/').filter(|s| !s.is_empty()).collect()
    }
}

/// Ordered collection of generated artifacts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactSet {
    artifacts: BTreeMap<ArtifactKey, GeneratedArtifact>,
}

impl ArtifactSet {
    /// Create empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an artifact
    pub fn insert(&mut self, key: ArtifactKey, artifact: GeneratedArtifact) {
        self.artifacts.insert(key, artifact);
    }

    /// Merge another set into this one
    pub fn extend(&mut self, other: ArtifactSet) {
        self.artifacts.extend(other.artifacts);
    }

    /// Look up an artifact
    #[inline]
    #[must_use]
    pub fn get(&self, key: &ArtifactKey) -> Option<&GeneratedArtifact> {
        self.artifacts.get(key)
    }

    /// Iterate in key order
    pub fn iter(&self) -> impl Iterator<Item = (&ArtifactKey, &GeneratedArtifact)> {
        self.artifacts.iter()
    }

    /// Number of artifacts
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Whether the set is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// SHA-256 over keys, paths and contents, hex encoded
    #[must_use]
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for (key, artifact) in &self.artifacts {
            for part in [
                key.to_string().as_str(),
                artifact.path.as_str(),
                artifact.content.as_str(),
            ] {
                hasher.update((part.len() as u64).to_le_bytes());
                hasher.update(part.as_bytes());
            }
        }
        hex::encode(hasher.finalize())
    }
}

impl<'a> IntoIterator for &'a ArtifactSet {
    type Item = (&'a ArtifactKey, &'a GeneratedArtifact);
    type IntoIter = std::collections::btree_map::Iter<'a, ArtifactKey, GeneratedArtifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_order_modules_before_globals() {
        let mut set = ArtifactSet::new();
        set.insert(
            ArtifactKey::Global(GlobalArtifact::Stylesheet),
            GeneratedArtifact::new("a.css", ""),
        );
        set.insert(
            ArtifactKey::module("todo", Layer::EditView),
            GeneratedArtifact::new("b", ""),
        );
        set.insert(
            ArtifactKey::module("todo", Layer::Entity),
            GeneratedArtifact::new("c", ""),
        );

        let keys: Vec<String> = set.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, ["todo/entity", "todo/edit-view", "global/stylesheet"]);
    }

    #[test]
    fn digest_tracks_content() {
        let key = ArtifactKey::module("todo", Layer::Entity);
        let mut a = ArtifactSet::new();
        a.insert(key.clone(), GeneratedArtifact::new("x/Todo.java", "class Todo {}"));
        let mut b = a.clone();
        assert_eq!(a.digest(), b.digest());
        assert_eq!(a.digest().len(), 64);

        b.insert(key, GeneratedArtifact::new("x/Todo.java", "class Todo { }"));
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn relative_path_splits_segments() {
        let artifact = GeneratedArtifact::new("src/main/resources/static/css/app.css", "");
        assert_eq!(
            artifact.relative_path(),
            PathBuf::from("src").join("main").join("resources").join("static").join("css").join("app.css")
        );
    }
}
