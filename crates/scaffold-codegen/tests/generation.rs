use pretty_assertions::assert_eq;
use proptest::prelude::*;
use scaffold_codegen::{ArtifactKey, ArtifactWriter, Generator, GlobalArtifact, Layer};
use scaffold_spec::{apply, naming, Field, FieldType, Instruction, ModuleSpec, ProjectSpec};
use scaffold_test_utils::{reservation_spec, todo_spec};

fn content(spec: &ProjectSpec, module: &str, layer: Layer) -> String {
    Generator::generate_project(spec)
        .get(&ArtifactKey::module(module, layer))
        .map(|a| a.content.clone())
        .unwrap()
}

#[test]
fn boolean_field_binds_with_default_and_renders_checkbox() {
    let spec = todo_spec();
    assert_eq!(spec.modules()[0].route_segment(), "todos");

    let controller = content(&spec, "todo", Layer::Controller);
    assert!(controller.contains("@RequestMapping(\"/todos\")"));
    assert!(controller.contains("@RequestParam(defaultValue = \"false\") Boolean done"));
    assert!(controller.contains("@RequestParam String title"));

    let list = content(&spec, "todo", Layer::ListView);
    assert!(list.contains("<input type=\"checkbox\" name=\"done\" value=\"true\" />"));
    assert!(!list.contains("<input type=\"text\" name=\"done\""));
}

#[test]
fn home_links_all_modules_after_module_added() {
    let spec = apply(
        reservation_spec(),
        &Instruction::add_module(
            "todo",
            vec![
                Field::new("title", FieldType::String),
                Field::new("done", FieldType::Boolean),
            ],
        ),
    );
    let set = Generator::generate_project(&spec);

    assert_eq!(set.len(), 2 * 6 + 3);
    let home = &set
        .get(&ArtifactKey::Global(GlobalArtifact::HomeView))
        .unwrap()
        .content;
    assert!(home.contains("@{/reservations}\">Reservations</a>"));
    assert!(home.contains("@{/todos}\">Todos</a>"));

    let home_controller = &set
        .get(&ArtifactKey::Global(GlobalArtifact::HomeController))
        .unwrap()
        .content;
    assert!(home_controller.contains("\"demo-service\""));
}

#[test]
fn reserved_field_names_leave_generated_code_intact() {
    let mut spec = todo_spec();
    for name in ["id", "service", "repository", "model", "item", "existing", "class"] {
        spec = apply(spec, &Instruction::add_field("todo", name, None));
    }
    assert_eq!(spec, todo_spec());

    let entity = content(&spec, "todo", Layer::Entity);
    assert_eq!(entity.matches("private Long id;").count(), 1);
    assert_eq!(entity.matches("getId()").count(), 1);

    let controller = content(&spec, "todo", Layer::Controller);
    assert!(!controller.contains("@RequestParam String service"));
    assert!(controller.contains("service.update(id, title, done);"));

    let service = content(&spec, "todo", Layer::Service);
    assert!(service.contains("existing.setTitle(title);"));
    assert!(!service.contains("setExisting"));
}

#[tokio::test]
async fn written_tree_matches_artifact_paths() {
    let dir = tempfile::tempdir().unwrap();
    let set = Generator::generate_project(&todo_spec());
    ArtifactWriter::new().write(dir.path(), &set).await.unwrap();

    for relative in [
        "src/main/java/com/example/demoservice/domain/Todo.java",
        "src/main/java/com/example/demoservice/repository/TodoRepository.java",
        "src/main/java/com/example/demoservice/service/TodoService.java",
        "src/main/java/com/example/demoservice/web/TodoController.java",
        "src/main/java/com/example/demoservice/HomeController.java",
        "src/main/resources/templates/todo/list.html",
        "src/main/resources/templates/todo/edit.html",
        "src/main/resources/templates/home.html",
        "src/main/resources/static/css/app.css",
    ] {
        assert!(dir.path().join(relative).is_file(), "{relative}");
    }

    let entity = std::fs::read_to_string(
        dir.path()
            .join("src/main/java/com/example/demoservice/domain/Todo.java"),
    )
    .unwrap();
    assert_eq!(
        entity,
        set.get(&ArtifactKey::module("todo", Layer::Entity))
            .unwrap()
            .content
    );
}

#[tokio::test]
async fn removed_field_disappears_on_regeneration() {
    let dir = tempfile::tempdir().unwrap();
    let writer = ArtifactWriter::new();
    let spec = todo_spec();
    writer
        .write(dir.path(), &Generator::generate_project(&spec))
        .await
        .unwrap();

    let trimmed = apply(spec, &Instruction::remove_field("todo", "done"));
    writer
        .write(dir.path(), &Generator::generate_project(&trimmed))
        .await
        .unwrap();

    let controller = std::fs::read_to_string(
        dir.path()
            .join("src/main/java/com/example/demoservice/web/TodoController.java"),
    )
    .unwrap();
    assert!(!controller.contains("done"));
}

fn field_type() -> impl Strategy<Value = FieldType> {
    prop_oneof![
        Just(FieldType::String),
        Just(FieldType::Boolean),
        Just(FieldType::Integer),
        Just(FieldType::Long),
    ]
}

fn module() -> impl Strategy<Value = ModuleSpec> {
    (
        "[a-z][a-z0-9]{0,8}",
        proptest::collection::btree_map(
            "[a-z][a-zA-Z0-9]{0,8}".prop_filter("reserved name", |n| !naming::is_reserved(n)),
            field_type(),
            1..6,
        ),
    )
        .prop_map(|(name, fields)| {
            ModuleSpec::new(name, fields.into_iter().map(|(n, t)| Field::new(n, t)).collect())
        })
}

proptest! {
    #[test]
    fn prop_generation_is_deterministic(module in module()) {
        let spec = ProjectSpec::new("demo", "com.example.demo", module);
        let first = Generator::generate_project(&spec);
        let second = Generator::generate_project(&spec.clone());
        prop_assert_eq!(first.digest(), second.digest());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_every_field_has_getter_and_setter(module in module()) {
        let spec = ProjectSpec::new("demo", "com.example.demo", module.clone());
        let entity = content(&spec, &module.module_name, Layer::Entity);
        for field in &module.fields {
            let cap = naming::capitalize(&field.name);
            let getter = format!("public {} get{}()", field.field_type, cap);
            let setter = format!("public void set{}({} {})", cap, field.field_type, field.name);
            prop_assert!(entity.contains(&getter));
            prop_assert!(entity.contains(&setter));
        }
    }
}
