//! Integration tests for view generation against the bundled template set

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use viewsmith_generation::{
    CollectingRegistrar, DirectoryTemplateStore, Field, FileSystem, GenerationError,
    GeneratorConfig, GeneratorSettings, HtmlType, OutputWriter, Prefixes, TemplateStore,
    ViewAssembler, ViewFile, DEFAULT_TEMPLATE_SET,
};

fn templates_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates")
}

fn post_config() -> GeneratorConfig {
    GeneratorConfig::new("Post").with_fields(vec![
        Field::new("title", HtmlType::Text).with_validations("required|min:3|max:120"),
        Field::new("body", HtmlType::Textarea).visible(false, true, true),
        Field::new("status", HtmlType::Select).with_values(["Draft:draft", "Published:published"]),
        Field::new("views", HtmlType::Number).with_validations("min:0"),
        Field::new("featured", HtmlType::Checkbox),
        Field::new("created_at", HtmlType::Date).visible(true, false, true),
    ])
}

/// Test a full blade run writes the seven views
#[test]
fn test_generate_all_views_with_bundled_templates() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("resources/views/posts");
    let store = DirectoryTemplateStore::new(templates_root());
    let writer = OutputWriter::new();
    let registrar = CollectingRegistrar::new();
    let assembler = ViewAssembler::new(&store, &writer, &registrar, DEFAULT_TEMPLATE_SET);

    let report = assembler.generate(&post_config(), &output_dir).unwrap();

    assert_eq!(report.files.len(), 7);
    for file in ViewFile::DEFAULT_SET {
        assert!(output_dir.join(file.file_name()).exists(), "{} missing", file);
    }
    assert_eq!(report.warnings().count(), 0);

    let table = fs::read_to_string(output_dir.join("table.blade.php")).unwrap();
    assert!(table.contains("<th>Title</th>"));
    assert!(table.contains("{{ $post->created_at }}"));
    assert!(!table.contains("$post->body"));
    assert!(table.contains("'records' => $posts"));

    let fields = fs::read_to_string(output_dir.join("fields.blade.php")).unwrap();
    assert!(fields.contains("Form::text('title', null, ['class' => 'form-control','minlength' => 3,'maxlength' => 120])"));
    assert!(fields.contains("Form::number('views', null, ['class' => 'form-control','min' => 0])"));
    assert!(fields.contains("['Draft' => 'draft', 'Published' => 'published']"));
    assert!(fields.contains("Form::checkbox('featured', '1', null"));
    assert!(!fields.contains("created_at"));

    let index = fs::read_to_string(output_dir.join("index.blade.php")).unwrap();
    assert!(index.contains("@include('posts.table')"));

    let create = fs::read_to_string(output_dir.join("create.blade.php")).unwrap();
    assert!(create.contains("Form::open(['route' => 'posts.store'])"));
}

/// Test prefixes, file inputs and select-from-table fields together
#[test]
fn test_generate_with_prefixes_and_files() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("views");
    let store = DirectoryTemplateStore::new(templates_root());
    let writer = OutputWriter::new();
    let registrar = CollectingRegistrar::new();
    let assembler = ViewAssembler::new(&store, &writer, &registrar, DEFAULT_TEMPLATE_SET);
    let config = GeneratorConfig::new("Document")
        .with_fields(vec![
            Field::new("attachment", HtmlType::File),
            Field::new("owner_id", HtmlType::SelectTable).with_values(["users,User", "name,id"]),
        ])
        .with_prefixes(Prefixes {
            view: "admin".to_string(),
            route: "admin".to_string(),
        })
        .with_views(["create", "index"]);

    let report = assembler.generate(&config, &output_dir).unwrap();

    let written: Vec<ViewFile> = report.files.iter().map(|view| view.file).collect();
    assert_eq!(
        written,
        vec![ViewFile::Table, ViewFile::Index, ViewFile::Fields, ViewFile::Create]
    );

    let create = fs::read_to_string(output_dir.join("create.blade.php")).unwrap();
    assert!(create.contains("'admin.documents.store', 'files' => true"));
    assert!(create.contains("@include('admin.documents.fields')"));

    let fields = fs::read_to_string(output_dir.join("fields.blade.php")).unwrap();
    assert!(fields.contains("Form::select('owner_id', $userItems"));

    let registered = registrar.registrations();
    assert_eq!(registered.len(), 1);
    assert_eq!(registered[0].scope, "admin.documents.fields");
    assert_eq!(registered[0].model.as_deref(), Some("User"));
}

/// Test localized runs use translation lookups
#[test]
fn test_generate_localized_views() {
    let temp_dir = TempDir::new().unwrap();
    let store = DirectoryTemplateStore::new(templates_root());
    let writer = OutputWriter::new();
    let registrar = CollectingRegistrar::new();
    let assembler = ViewAssembler::new(&store, &writer, &registrar, DEFAULT_TEMPLATE_SET);
    let config = post_config().localized(true).with_views(["index", "show"]);

    assembler.generate(&config, temp_dir.path()).unwrap();

    let table = fs::read_to_string(temp_dir.path().join("table.blade.php")).unwrap();
    assert!(table.contains("<th>@lang('models/posts.fields.title')</th>"));
    assert!(table.contains("{{ $post->title }}"));

    let show_fields = fs::read_to_string(temp_dir.path().join("show_fields.blade.php")).unwrap();
    assert!(show_fields.contains("__('models/posts.fields.status')"));
    assert!(show_fields.contains("<!-- Created At Field -->"));
}

/// Test published stubs take precedence over the template set
#[test]
fn test_published_stub_overrides_template_set() {
    let temp_dir = TempDir::new().unwrap();
    let published = temp_dir.path().join("published");
    fs::create_dir_all(published.join("scaffold/views")).unwrap();
    fs::write(published.join("scaffold/views/show.stub"), "custom $MODEL_NAME$").unwrap();

    let settings = GeneratorSettings {
        templates_path: templates_root(),
        published_path: Some(published),
        ..Default::default()
    };
    let store = DirectoryTemplateStore::from_settings(&settings);

    assert_eq!(
        store.resolve(&settings.templates, "scaffold.views.show").unwrap(),
        "custom $MODEL_NAME$"
    );
    assert!(store
        .resolve(&settings.templates, "scaffold.views.edit")
        .unwrap()
        .contains("Form::model"));
}

/// Test a published pagination stub is used by the blade table
#[test]
fn test_published_paginate_stub_in_table() {
    let temp_dir = TempDir::new().unwrap();
    let published = temp_dir.path().join("published");
    fs::create_dir_all(published.join("scaffold/views")).unwrap();
    fs::write(
        published.join("scaffold/views/paginate.stub"),
        "{{ $$MODEL_NAME_PLURAL_CAMEL$->links() }}",
    )
    .unwrap();

    let store = DirectoryTemplateStore::new(templates_root()).with_published(published);
    let writer = OutputWriter::new();
    let registrar = CollectingRegistrar::new();
    let assembler = ViewAssembler::new(&store, &writer, &registrar, DEFAULT_TEMPLATE_SET);
    let output_dir = temp_dir.path().join("views");

    assembler
        .generate(&post_config().with_views(["index"]), &output_dir)
        .unwrap();

    let table = fs::read_to_string(output_dir.join("table.blade.php")).unwrap();
    assert!(table.contains("{{ $posts->links() }}"));
    assert!(!table.contains("'records' => $posts"));
}

/// Test an unknown template set fails on the first stub
#[test]
fn test_unknown_template_set_fails() {
    let temp_dir = TempDir::new().unwrap();
    let store = DirectoryTemplateStore::new(templates_root());
    let writer = OutputWriter::new();
    let registrar = CollectingRegistrar::new();
    let assembler = ViewAssembler::new(&store, &writer, &registrar, "missing-templates");

    let err = assembler.generate(&post_config(), temp_dir.path()).unwrap_err();

    match err {
        GenerationError::TemplateNotFound { template_set, name } => {
            assert_eq!(template_set, "missing-templates");
            assert_eq!(name, "scaffold.views.table.blade.header");
        }
        other => panic!("unexpected error: {}", other),
    }
}

/// Test invalid table types fail before any view is written
#[test]
fn test_invalid_table_type_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("posts");
    let store = DirectoryTemplateStore::new(templates_root());
    let writer = OutputWriter::new();
    let registrar = CollectingRegistrar::new();
    let assembler = ViewAssembler::new(&store, &writer, &registrar, DEFAULT_TEMPLATE_SET);

    let err = assembler
        .generate(&post_config().with_table_type("unknown"), &output_dir)
        .unwrap_err();

    assert!(matches!(err, GenerationError::InvalidTableType(_)));
    assert_eq!(fs::read_dir(&output_dir).unwrap().count(), 0);
}

/// Test dry-run mode leaves the disk untouched
#[test]
fn test_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("posts");
    let store = DirectoryTemplateStore::new(templates_root());
    let writer = OutputWriter::dry_run();
    let registrar = CollectingRegistrar::new();
    let assembler = ViewAssembler::new(&store, &writer, &registrar, DEFAULT_TEMPLATE_SET);

    let report = assembler.generate(&post_config(), &output_dir).unwrap();

    assert_eq!(report.files.len(), 7);
    assert!(!writer.exists(&output_dir));
    assert_eq!(writer.results().len(), 7);
    assert!(writer.results().iter().all(|result| !result.written));
}
