//! Template bundle embedded into the binary at build time
//!
//! Assets are looked up by logical path (e.g. `templates/gh.txt`).

use thiserror::Error;

/// Logical path of the entry-point source template.
pub const ENTRY_POINT_TEMPLATE: &str = "templates/main.txt";

/// Logical path of the GitHub Actions workflow template.
pub const PIPELINE_TEMPLATE: &str = "templates/gh.txt";

/// Logical path of the ECS task definition template.
pub const DEPLOYMENT_TEMPLATE: &str = "templates/ecs.txt";

const MAIN_TXT: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/main.txt"));
const GH_TXT: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/gh.txt"));
const ECS_TXT: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/ecs.txt"));

const EMBEDDED: &[(&str, &str)] = &[
    (ENTRY_POINT_TEMPLATE, MAIN_TXT),
    (PIPELINE_TEMPLATE, GH_TXT),
    (DEPLOYMENT_TEMPLATE, ECS_TXT),
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template not found in bundle: {0}")]
    NotFound(String),
}

/// Read-only view over a set of static templates.
///
/// Pure data: cheap to copy and safe to share between threads.
#[derive(Debug, Clone, Copy)]
pub struct TemplateStore {
    entries: &'static [(&'static str, &'static str)],
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::embedded()
    }
}

impl TemplateStore {
    /// The templates bundled with this binary.
    pub fn embedded() -> Self {
        Self { entries: EMBEDDED }
    }

    /// A store over an arbitrary static bundle.
    pub fn from_entries(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Exact content of the asset at `name`.
    pub fn get(&self, name: &str) -> Result<&'static str, TemplateError> {
        self.entries
            .iter()
            .find(|(path, _)| *path == name)
            .map(|(_, content)| *content)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))
    }

    /// Logical paths of all bundled assets.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(path, _)| *path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_store_has_all_templates() {
        let store = TemplateStore::embedded();
        let names: Vec<_> = store.names().collect();
        assert_eq!(
            names,
            vec![ENTRY_POINT_TEMPLATE, PIPELINE_TEMPLATE, DEPLOYMENT_TEMPLATE]
        );
        for name in names {
            assert!(!store.get(name).unwrap().is_empty(), "{name} is empty");
        }
    }

    #[test]
    fn test_unknown_template_is_not_found() {
        let store = TemplateStore::embedded();
        assert_eq!(
            store.get("templates/missing.txt"),
            Err(TemplateError::NotFound("templates/missing.txt".into()))
        );
    }
}
