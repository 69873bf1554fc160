//! Spec -> artifact set
//!
//! Generation is a pure function of the spec: the same input always yields
//! a byte-identical [`ArtifactSet`].

use crate::artifact::{ArtifactKey, ArtifactSet, GeneratedArtifact, GlobalArtifact, Layer};
use crate::context::GenerationContext;
use crate::templates::{controller, entity, home, repository, service, stylesheet, view};
use scaffold_spec::{ModuleSpec, ProjectSpec};

/// Renders Spring Boot sources for modules of one project
#[derive(Debug, Clone)]
pub struct Generator {
    ctx: GenerationContext,
}

impl Generator {
    /// Create generator for a context
    #[inline]
    #[must_use]
    pub fn new(ctx: GenerationContext) -> Self {
        Self { ctx }
    }

    /// Get context
    #[inline]
    #[must_use]
    pub fn context(&self) -> &GenerationContext {
        &self.ctx
    }

    /// Output path of one module layer
    #[must_use]
    pub fn module_path(&self, module: &ModuleSpec, layer: Layer) -> String {
        let entity = &module.entity_name;
        match layer {
            Layer::Entity => self.ctx.java_path("domain", &format!("{entity}.java")),
            Layer::Repository => self
                .ctx
                .java_path("repository", &format!("{entity}Repository.java")),
            Layer::Service => self
                .ctx
                .java_path("service", &format!("{entity}Service.java")),
            Layer::Controller => self
                .ctx
                .java_path("web", &format!("{entity}Controller.java")),
            Layer::ListView => self
                .ctx
                .resource_path(&format!("templates/{}/list.html", module.module_name)),
            Layer::EditView => self
                .ctx
                .resource_path(&format!("templates/{}/edit.html", module.module_name)),
        }
    }

    /// Output path of a project-wide artifact
    #[must_use]
    pub fn global_path(&self, kind: GlobalArtifact) -> String {
        match kind {
            GlobalArtifact::HomeController => self.ctx.java_path("", "HomeController.java"),
            GlobalArtifact::HomeView => self.ctx.resource_path("templates/home.html"),
            GlobalArtifact::Stylesheet => self.ctx.resource_path("static/css/app.css"),
        }
    }

    /// All six layers of one module
    #[must_use]
    pub fn generate(&self, module: &ModuleSpec) -> ArtifactSet {
        let mut set = ArtifactSet::new();
        for layer in Layer::ALL {
            let content = match layer {
                Layer::Entity => entity::render(&self.ctx, module),
                Layer::Repository => repository::render(&self.ctx, module),
                Layer::Service => service::render(&self.ctx, module),
                Layer::Controller => controller::render(&self.ctx, module),
                Layer::ListView => view::render_list(module),
                Layer::EditView => view::render_edit(module),
            };
            set.insert(
                ArtifactKey::module(module.module_name.clone(), layer),
                GeneratedArtifact::new(self.module_path(module, layer), content),
            );
        }
        set
    }

    /// Home controller and the home page linking every module
    #[must_use]
    pub fn generate_home(&self, modules: &[ModuleSpec]) -> ArtifactSet {
        let mut set = ArtifactSet::new();
        set.insert(
            ArtifactKey::Global(GlobalArtifact::HomeController),
            GeneratedArtifact::new(
                self.global_path(GlobalArtifact::HomeController),
                home::render_controller(&self.ctx),
            ),
        );
        set.insert(
            ArtifactKey::Global(GlobalArtifact::HomeView),
            GeneratedArtifact::new(
                self.global_path(GlobalArtifact::HomeView),
                home::render_view(modules),
            ),
        );
        set
    }

    /// Shared stylesheet content
    #[inline]
    #[must_use]
    pub fn generate_stylesheet() -> &'static str {
        stylesheet::APP_CSS
    }

    /// Every module plus the project-wide artifacts
    #[must_use]
    pub fn generate_project(spec: &ProjectSpec) -> ArtifactSet {
        let generator = Self::new(GenerationContext::from_spec(spec));
        let mut set = ArtifactSet::new();
        for module in spec.modules() {
            set.extend(generator.generate(module));
        }
        set.extend(generator.generate_home(spec.modules()));
        set.insert(
            ArtifactKey::Global(GlobalArtifact::Stylesheet),
            GeneratedArtifact::new(
                generator.global_path(GlobalArtifact::Stylesheet),
                Self::generate_stylesheet(),
            ),
        );
        tracing::debug!(
            project = %spec.project_name,
            artifacts = set.len(),
            "project generated"
        );
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaffold_spec::{Field, FieldType};

    fn generator() -> Generator {
        Generator::new(GenerationContext::new("demo", "com.example.demo"))
    }

    #[test]
    fn module_paths_follow_layout() {
        let module = ModuleSpec::new("todo", vec![Field::new("title", FieldType::String)]);
        let set = generator().generate(&module);

        let paths: Vec<&str> = set.iter().map(|(_, a)| a.path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "src/main/java/com/example/demo/domain/Todo.java",
                "src/main/java/com/example/demo/repository/TodoRepository.java",
                "src/main/java/com/example/demo/service/TodoService.java",
                "src/main/java/com/example/demo/web/TodoController.java",
                "src/main/resources/templates/todo/list.html",
                "src/main/resources/templates/todo/edit.html",
            ]
        );
    }

    #[test]
    fn global_paths() {
        let g = generator();
        assert_eq!(
            g.global_path(GlobalArtifact::HomeController),
            "src/main/java/com/example/demo/HomeController.java"
        );
        assert_eq!(
            g.global_path(GlobalArtifact::HomeView),
            "src/main/resources/templates/home.html"
        );
        assert_eq!(
            g.global_path(GlobalArtifact::Stylesheet),
            "src/main/resources/static/css/app.css"
        );
    }

    #[test]
    fn project_has_six_per_module_plus_three() {
        let spec = ProjectSpec::new(
            "demo",
            "com.example.demo",
            ModuleSpec::new("reservation", vec![Field::new("name", FieldType::String)]),
        );
        let set = Generator::generate_project(&spec);
        assert_eq!(set.len(), 9);
        assert_eq!(
            set.get(&ArtifactKey::Global(GlobalArtifact::Stylesheet))
                .map(|a| a.content.as_str()),
            Some(Generator::generate_stylesheet())
        );
    }
}
