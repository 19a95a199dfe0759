//! View assembly
//!
//! [`ViewAssembler`] runs the per-view steps for a model (table, index, fields,
//! create, edit, show-fields, show), writes each finished view through the
//! [`FileSystem`] port and can roll the written files back.
//!
//! A run starts from [`GeneratorConfig::base_variables`] and threads the
//! resulting [`VariableMap`] through the steps by value: variables a step adds
//! (such as `$SIZE$` in the fields step) are seen by the steps after it and by
//! nothing outside the run.

use std::path::Path;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::{
    error::GenerationResult,
    field_markup::{size_attributes, FieldMarkupGenerator, LOCALE_SUFFIX},
    inflector,
    models::{
        GeneratedView, GenerationReport, GeneratorConfig, RollbackReport, TableType, ViewFile,
        ViewKind,
    },
    output_writer::FileSystem,
    templates::{
        fill_with_field, fill_with_field_locale, tokens, unresolved_tokens, FieldBinding,
        TemplateStore, VariableMap,
    },
    view_data::ViewDataRegistrar,
};

/// One indentation level in generated markup
pub const TAB: &str = "    ";

/// `$FILES$` value when any field uploads files
pub const FILES_OPTION: &str = ", 'files' => true";

/// `lines` newlines followed by `tabs` indentation levels
pub fn nl_tab(lines: usize, tabs: usize) -> String {
    format!("{}{}", "\n".repeat(lines), TAB.repeat(tabs))
}

/// Views produced for a requested subset, in generation order
///
/// An empty subset means every view. `create` and `update` write the fields
/// partial, `edit` writes only the edit page. Unknown names are skipped.
pub fn plan_views(requested: &[String]) -> Vec<ViewFile> {
    if requested.is_empty() {
        return vec![
            ViewFile::Table,
            ViewFile::Index,
            ViewFile::Fields,
            ViewFile::Create,
            ViewFile::Edit,
            ViewFile::ShowFields,
            ViewFile::Show,
        ];
    }

    let mut kinds = Vec::new();
    for name in requested {
        match ViewKind::parse(name) {
            Some(kind) => kinds.push(kind),
            None => warn!("Ignoring unknown view '{}'", name),
        }
    }

    let mut plan = Vec::new();
    if kinds.contains(&ViewKind::Index) {
        plan.extend([ViewFile::Table, ViewFile::Index]);
    }
    if kinds.contains(&ViewKind::Create) || kinds.contains(&ViewKind::Update) {
        plan.push(ViewFile::Fields);
    }
    if kinds.contains(&ViewKind::Create) {
        plan.push(ViewFile::Create);
    }
    if kinds.contains(&ViewKind::Edit) {
        plan.push(ViewFile::Edit);
    }
    if kinds.contains(&ViewKind::Show) {
        plan.extend([ViewFile::ShowFields, ViewFile::Show]);
    }
    plan
}

fn views_stub(name: &str, localized: bool) -> String {
    format!(
        "scaffold.views.{}{}",
        name,
        if localized { LOCALE_SUFFIX } else { "" }
    )
}

/// Generates and rolls back the view files of a model
pub struct ViewAssembler<'a> {
    store: &'a dyn TemplateStore,
    files: &'a dyn FileSystem,
    registrar: &'a dyn ViewDataRegistrar,
    template_set: &'a str,
}

/// Writes produced by one run
struct RunOutput<'r> {
    files: &'r dyn FileSystem,
    output_dir: &'r Path,
    written: Vec<GeneratedView>,
}

impl RunOutput<'_> {
    fn write(&mut self, file: ViewFile, content: &str) -> GenerationResult<()> {
        let path = self.output_dir.join(file.file_name());
        self.files.write(&path, content)?;
        info!("{} created", file);

        let unresolved = unresolved_tokens(content);
        for token in &unresolved {
            warn!("{} still contains {}", file, token);
        }

        self.written.push(GeneratedView {
            file,
            path,
            unresolved_tokens: unresolved,
        });
        Ok(())
    }
}

impl<'a> ViewAssembler<'a> {
    /// Create an assembler reading stubs from `template_set`
    pub fn new(
        store: &'a dyn TemplateStore,
        files: &'a dyn FileSystem,
        registrar: &'a dyn ViewDataRegistrar,
        template_set: &'a str,
    ) -> Self {
        Self {
            store,
            files,
            registrar,
            template_set,
        }
    }

    fn stub(&self, name: &str, localized: bool) -> GenerationResult<String> {
        let logical = views_stub(name, localized);
        debug!("Resolving {} from {}", logical, self.template_set);
        self.store.resolve(self.template_set, &logical)
    }

    /// Generate the views of `config` into `output_dir`
    ///
    /// Stops at the first failing step; files written before it are kept.
    pub fn generate(
        &self,
        config: &GeneratorConfig,
        output_dir: &Path,
    ) -> GenerationResult<GenerationReport> {
        let plan = plan_views(&config.options.views);
        debug!("Generating {:?} for {}", plan, config.model_name);

        let files_option = if config.has_file_input() { FILES_OPTION } else { "" };
        let mut vars = config.base_variables().with(tokens::FILES, files_option);

        if !self.files.exists(output_dir) {
            self.files.create_dir_all(output_dir)?;
        }

        let mut output = RunOutput {
            files: self.files,
            output_dir,
            written: Vec::new(),
        };

        for view in plan {
            vars = match view {
                ViewFile::Table => self.generate_table(config, vars, &mut output)?,
                ViewFile::Index => self.generate_index(config, vars, &mut output)?,
                ViewFile::Fields => self.generate_fields(config, vars, &mut output)?,
                ViewFile::Create | ViewFile::Edit | ViewFile::Show => {
                    self.generate_page(config, view, vars, &mut output)?
                }
                ViewFile::ShowFields => self.generate_show_fields(config, vars, &mut output)?,
                ViewFile::DatatablesActions => vars,
            };
        }

        Ok(GenerationReport {
            files: output.written,
            generated_at: Utc::now(),
        })
    }

    fn generate_table(
        &self,
        config: &GeneratorConfig,
        vars: VariableMap,
        output: &mut RunOutput<'_>,
    ) -> GenerationResult<VariableMap> {
        let localized = config.options.localized;

        match config.table_mode()? {
            TableType::Livewire => {
                debug!("Livewire tables have no table view");
            }
            TableType::Blade => {
                let content = self.blade_table(config, &vars, localized)?;
                output.write(ViewFile::Table, &content)?;
            }
            TableType::Datatables => {
                let body = vars.fill(&self.stub("table.datatable.body", false)?);
                let actions = vars.fill(&self.stub("table.datatable.actions", localized)?);
                output.write(ViewFile::DatatablesActions, &actions)?;
                output.write(ViewFile::Table, &body)?;
            }
        }

        Ok(vars)
    }

    fn blade_table(
        &self,
        config: &GeneratorConfig,
        vars: &VariableMap,
        localized: bool,
    ) -> GenerationResult<String> {
        let binding = FieldBinding::standard();
        let header = self.stub("table.blade.header", localized)?;
        let cell = self.stub("table.blade.cell", false)?;
        let index_fields = || config.fields.iter().filter(|field| field.in_index);

        let headers = index_fields()
            .map(|field| {
                if localized {
                    fill_with_field_locale(vars, &binding, &header, field)
                } else {
                    fill_with_field(vars, &binding, &header, field)
                }
            })
            .collect::<Vec<_>>()
            .join(nl_tab(1, 2).as_str());

        let cells = index_fields()
            .map(|field| fill_with_field(vars, &binding, &cell, field))
            .collect::<Vec<_>>()
            .join(nl_tab(1, 3).as_str());

        let paginate = vars.fill(&self.stub("paginate", false)?);
        let body = vars.fill(&self.stub("table.blade.body", localized)?);

        Ok(VariableMap::new()
            .with(tokens::FIELD_HEADERS, headers)
            .with(tokens::FIELD_BODY, cells)
            .with(tokens::PAGINATE, paginate)
            .fill(&body))
    }

    fn generate_index(
        &self,
        config: &GeneratorConfig,
        vars: VariableMap,
        output: &mut RunOutput<'_>,
    ) -> GenerationResult<VariableMap> {
        let table = match config.table_mode()? {
            TableType::Blade | TableType::Datatables => vars.fill(&format!(
                "@include('{}{}.table')",
                tokens::VIEW_PREFIX,
                tokens::MODEL_NAME_PLURAL_SNAKE
            )),
            TableType::Livewire => vars.fill(&self.stub("table.livewire.body", false)?),
        };

        let index = vars.fill(&self.stub("index", config.options.localized)?);
        let content = VariableMap::new().with(tokens::TABLE, table).fill(&index);
        output.write(ViewFile::Index, &content)?;

        Ok(vars)
    }

    fn generate_fields(
        &self,
        config: &GeneratorConfig,
        mut vars: VariableMap,
        output: &mut RunOutput<'_>,
    ) -> GenerationResult<VariableMap> {
        let localized = config.options.localized;
        let scope = config.fields_view_scope();
        let binding = FieldBinding::standard();
        let markup = FieldMarkupGenerator::new(self.store, self.registrar, self.template_set);

        let mut fragments = Vec::new();
        for field in config.fields.iter().filter(|field| field.in_form) {
            vars = vars.with(tokens::SIZE, size_attributes(field));

            let html = markup.generate(field, localized, &scope)?;
            if html.is_empty() {
                debug!("No markup for field {} ({})", field.name, field.html_type);
                continue;
            }
            fragments.push(fill_with_field(&vars, &binding, &html, field));
        }

        let template = vars.fill(&self.stub("fields", localized)?);
        let content = VariableMap::new()
            .with(tokens::FIELDS, fragments.join("\n\n"))
            .fill(&template);
        output.write(ViewFile::Fields, &content)?;

        Ok(vars)
    }

    fn generate_page(
        &self,
        config: &GeneratorConfig,
        view: ViewFile,
        vars: VariableMap,
        output: &mut RunOutput<'_>,
    ) -> GenerationResult<VariableMap> {
        let content = vars.fill(&self.stub(view.stem(), config.options.localized)?);
        output.write(view, &content)?;
        Ok(vars)
    }

    fn generate_show_fields(
        &self,
        config: &GeneratorConfig,
        vars: VariableMap,
        output: &mut RunOutput<'_>,
    ) -> GenerationResult<VariableMap> {
        let template = self.stub("show_field", config.options.localized)?;

        let mut content = String::new();
        for field in config.fields.iter().filter(|field| field.in_view) {
            let named = VariableMap::new()
                .with(tokens::FIELD_NAME_TITLE, inflector::title(&field.name))
                .with(tokens::FIELD_NAME, field.name.as_str())
                .fill(&template);
            content.push_str(&vars.fill(&named));
            content.push_str("\n\n");
        }

        output.write(ViewFile::ShowFields, &content)?;
        Ok(vars)
    }

    /// Delete generated views from `output_dir`
    ///
    /// An empty `views` means the default seven files. The datatables actions
    /// partial is added when the table mode is datatables. Missing files are
    /// skipped.
    pub fn rollback(
        &self,
        config: &GeneratorConfig,
        output_dir: &Path,
        views: &[ViewFile],
    ) -> GenerationResult<RollbackReport> {
        let mut targets: Vec<ViewFile> = if views.is_empty() {
            ViewFile::DEFAULT_SET.to_vec()
        } else {
            views.to_vec()
        };
        if config.table_type == TableType::Datatables.as_str() {
            targets.push(ViewFile::DatatablesActions);
        }

        let mut report = RollbackReport::default();
        for (i, file) in targets.iter().enumerate() {
            if targets[..i].contains(file) {
                continue;
            }
            let path = output_dir.join(file.file_name());
            if self.files.delete(&path)? {
                info!("{} file deleted", file);
                report.deleted.push(path);
            }
        }

        Ok(report)
    }
}
