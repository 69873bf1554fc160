//! Project-level values shared by every template

use scaffold_spec::ProjectSpec;

/// Project name and Java package for one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationContext {
    /// Project name, used as the home page title
    pub project_name: String,
    /// Dotted Java base package
    pub base_package: String,
}

impl GenerationContext {
    /// Create context
    #[inline]
    #[must_use]
    pub fn new(project_name: impl Into<String>, base_package: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            base_package: base_package.into(),
        }
    }

    /// Context for a project spec
    #[must_use]
    pub fn from_spec(spec: &ProjectSpec) -> Self {
        Self::new(spec.project_name.clone(), spec.base_package.clone())
    }

    /// Base package as a `/`-separated path
    #[must_use]
    pub fn package_path(&self) -> String {
        self.base_package.replace('.', "/")
    }

    /// `src/main/java/<pkg>/<sub>/<file>`, or directly under the package when `sub` is empty
    #[must_use]
    pub fn java_path(&self, sub: &str, file: &str) -> String {
        if sub.is_empty() {
            format!("src/main/java/{}/{file}", self.package_path())
        } else {
            format!("src/main/java/{}/{sub}/{file}", self.package_path())
        }
    }

    /// `src/main/resources/<rest>`
    #[must_use]
    pub fn resource_path(&self, rest: &str) -> String {
        format!("src/main/resources/{rest}")
    }
}

impl From<&ProjectSpec> for GenerationContext {
    fn from(spec: &ProjectSpec) -> Self {
        Self::from_spec(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths() {
        let ctx = GenerationContext::new("demo", "com.example.demo");
        assert_eq!(ctx.package_path(), "com/example/demo");
        assert_eq!(
            ctx.java_path("domain", "Todo.java"),
            "src/main/java/com/example/demo/domain/Todo.java"
        );
        assert_eq!(
            ctx.java_path("", "HomeController.java"),
            "src/main/java/com/example/demo/HomeController.java"
        );
        assert_eq!(
            ctx.resource_path("templates/home.html"),
            "src/main/resources/templates/home.html"
        );
    }
}
