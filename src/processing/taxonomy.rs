//! Skill taxonomy: category name to canonical skill list

use crate::error::{AnalyzerError, Result};
use log::{info, warn};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;
use strsim::jaro_winkler;

/// Minimum similarity for a category name suggestion
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Insertion-ordered map keyed by category name.
///
/// Category order is significant for reporting, gap analysis and
/// recommendations, so the map keeps the order the categories were inserted
/// (or appeared in the source document) instead of sorting them.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMap<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for CategoryMap<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T> CategoryMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace, keeping the original position on replace
    pub fn insert(&mut self, category: impl Into<String>, value: T) {
        let category = category.into();
        match self.entries.iter_mut().find(|(name, _)| *name == category) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((category, value)),
        }
    }

    pub fn get(&self, category: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, category: &str) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|(name, _)| name == category)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> FromIterator<(String, T)> for CategoryMap<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        let mut map = CategoryMap::new();
        for (category, value) in iter {
            map.insert(category, value);
        }
        map
    }
}

impl<T: Serialize> Serialize for CategoryMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, value) in &self.entries {
            map.serialize_entry(category, value)?;
        }
        map.end()
    }
}

struct CategoryMapVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for CategoryMapVisitor<T> {
    type Value = CategoryMap<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map keyed by category name")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut map = CategoryMap::new();
        while let Some((category, value)) = access.next_entry::<String, T>()? {
            map.insert(category, value);
        }
        Ok(map)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for CategoryMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(CategoryMapVisitor(PhantomData))
    }
}

/// Curated skill reference data, read-only once constructed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillTaxonomy {
    categories: CategoryMap<Vec<String>>,
}

impl Default for SkillTaxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SkillTaxonomy {
    pub fn new(categories: CategoryMap<Vec<String>>) -> Result<Self> {
        if categories.is_empty() {
            return Err(AnalyzerError::Taxonomy("taxonomy has no categories".to_string()));
        }
        if categories.values().all(|skills| skills.is_empty()) {
            return Err(AnalyzerError::Taxonomy("taxonomy has no skills".to_string()));
        }
        Ok(Self { categories })
    }

    /// Embedded fallback taxonomy
    pub fn builtin() -> Self {
        let categories = BUILTIN_TAXONOMY
            .iter()
            .map(|(category, skills)| {
                (
                    category.to_string(),
                    skills.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect();
        Self { categories }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let categories: CategoryMap<Vec<String>> = serde_json::from_str(json)
            .map_err(|e| AnalyzerError::Taxonomy(format!("Malformed taxonomy: {}", e)))?;
        Self::new(categories)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalyzerError::Taxonomy(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }

    /// Load the taxonomy resource, falling back to the embedded default
    pub fn load_or_default(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(taxonomy) => {
                info!(
                    "Loaded skill taxonomy from {} ({} categories, {} skills)",
                    path.display(),
                    taxonomy.category_count(),
                    taxonomy.skill_count()
                );
                taxonomy
            }
            Err(e) => {
                warn!("{}; using built-in skill taxonomy", e);
                Self::builtin()
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories.iter().map(|(name, skills)| (name, skills.as_slice()))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys()
    }

    pub fn skills(&self, category: &str) -> Option<&[String]> {
        self.categories.get(category).map(|skills| skills.as_slice())
    }

    pub fn contains_category(&self, category: &str) -> bool {
        self.categories.contains(category)
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn skill_count(&self) -> usize {
        self.categories.values().map(|skills| skills.len()).sum()
    }

    /// Case-insensitive category lookup
    pub fn find_category(&self, name: &str) -> Option<&str> {
        let wanted = name.trim().to_lowercase();
        self.categories().find(|c| c.to_lowercase() == wanted)
    }

    /// Closest category name for a misspelled query
    pub fn suggest_category(&self, name: &str) -> Option<&str> {
        let wanted = name.trim().to_lowercase();
        self.categories()
            .map(|c| (c, jaro_winkler(&c.to_lowercase(), &wanted)))
            .filter(|(_, similarity)| *similarity >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(c, _)| c)
    }
}

const BUILTIN_TAXONOMY: &[(&str, &[&str])] = &[
    (
        "Programming Languages",
        &[
            "python", "java", "javascript", "c++", "c#", "go", "rust", "swift", "kotlin", "php",
            "ruby", "scala",
        ],
    ),
    (
        "Web & Frontend",
        &[
            "html", "css", "sass", "react", "angular", "vue", "next.js", "jquery", "bootstrap",
            "tailwind",
        ],
    ),
    (
        "Backend & Frameworks",
        &[
            "node.js", "express", "django", "flask", "spring", "ruby on rails", ".net", "fastapi",
        ],
    ),
    (
        "Databases",
        &[
            "sql", "mysql", "postgresql", "mongodb", "redis", "sqlite", "oracle", "cassandra",
            "dynamodb",
        ],
    ),
    (
        "Cloud & DevOps",
        &[
            "aws", "azure", "gcp", "docker", "kubernetes", "terraform", "ansible", "jenkins",
            "ci/cd", "git", "github actions",
        ],
    ),
    (
        "Data Science & ML",
        &[
            "pandas", "numpy", "scikit-learn", "tensorflow", "pytorch", "keras", "matplotlib",
            "seaborn", "jupyter", "apache spark",
        ],
    ),
    (
        "Software & Tools",
        &["jira", "confluence", "figma", "postman", "linux", "bash", "powershell"],
    ),
];
