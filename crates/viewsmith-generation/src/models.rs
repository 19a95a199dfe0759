//! Core data models for view generation

use std::{borrow::Cow, fmt, path::PathBuf, str::FromStr};

use chrono::{DateTime, Utc};
use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToSnakeCase, ToTitleCase};
use serde::{Deserialize, Serialize};

use crate::{
    error::{GenerationError, GenerationResult},
    inflector,
    templates::{tokens, VariableMap},
};

/// HTML input kind of a field; selects the field stub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HtmlType {
    /// Single-line text input
    #[serde(rename = "text")]
    Text,
    /// Multi-line text area
    #[serde(rename = "textarea")]
    Textarea,
    /// Email input
    #[serde(rename = "email")]
    Email,
    /// Password input
    #[serde(rename = "password")]
    Password,
    /// Numeric input; size rules become `min`/`max`
    #[serde(rename = "number")]
    Number,
    /// Date picker
    #[serde(rename = "date")]
    Date,
    /// File upload
    #[serde(rename = "file")]
    File,
    /// Single checkbox
    #[serde(rename = "checkbox")]
    Checkbox,
    /// Checkbox bound to a boolean column
    #[serde(rename = "boolean")]
    Boolean,
    /// Select with static options
    #[serde(rename = "select")]
    Select,
    /// Select with static options from an enum column
    #[serde(rename = "enum")]
    Enum,
    /// Radio group
    #[serde(rename = "radio")]
    Radio,
    /// Toggle switch
    #[serde(rename = "toggle-switch")]
    ToggleSwitch,
    /// Select whose options come from another table
    #[serde(rename = "selectTable")]
    SelectTable,
    /// Anything without a stub; renders nothing
    #[serde(other)]
    Unsupported,
}

impl HtmlType {
    /// Name as used in model definitions
    pub fn as_str(&self) -> &'static str {
        match self {
            HtmlType::Text => "text",
            HtmlType::Textarea => "textarea",
            HtmlType::Email => "email",
            HtmlType::Password => "password",
            HtmlType::Number => "number",
            HtmlType::Date => "date",
            HtmlType::File => "file",
            HtmlType::Checkbox => "checkbox",
            HtmlType::Boolean => "boolean",
            HtmlType::Select => "select",
            HtmlType::Enum => "enum",
            HtmlType::Radio => "radio",
            HtmlType::ToggleSwitch => "toggle-switch",
            HtmlType::SelectTable => "selectTable",
            HtmlType::Unsupported => "",
        }
    }
}

impl FromStr for HtmlType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "text" => HtmlType::Text,
            "textarea" => HtmlType::Textarea,
            "email" => HtmlType::Email,
            "password" => HtmlType::Password,
            "number" => HtmlType::Number,
            "date" => HtmlType::Date,
            "file" => HtmlType::File,
            "checkbox" => HtmlType::Checkbox,
            "boolean" => HtmlType::Boolean,
            "select" => HtmlType::Select,
            "enum" => HtmlType::Enum,
            "radio" => HtmlType::Radio,
            "toggle-switch" => HtmlType::ToggleSwitch,
            "selectTable" => HtmlType::SelectTable,
            _ => HtmlType::Unsupported,
        })
    }
}

impl fmt::Display for HtmlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_true() -> bool {
    true
}

/// One model attribute as described in the model definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Column / attribute name
    pub name: String,
    /// Display label; derived from the name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_title: Option<String>,
    /// Input kind
    #[serde(alias = "htmlInput")]
    pub html_type: HtmlType,
    /// Raw option strings; meaning depends on `html_type`
    #[serde(default)]
    pub html_values: Vec<String>,
    /// Pipe-delimited validation rules, e.g. `required|max:255`
    #[serde(default)]
    pub validations: String,
    /// Shown in the index table
    #[serde(default = "default_true")]
    pub in_index: bool,
    /// Shown in create/edit forms
    #[serde(default = "default_true")]
    pub in_form: bool,
    /// Shown on the show page
    #[serde(default = "default_true")]
    pub in_view: bool,
}

impl Field {
    /// Create a field visible everywhere
    pub fn new(name: impl Into<String>, html_type: HtmlType) -> Self {
        Self {
            name: name.into(),
            field_title: None,
            html_type,
            html_values: Vec::new(),
            validations: String::new(),
            in_index: true,
            in_form: true,
            in_view: true,
        }
    }

    /// Set the display label
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.field_title = Some(title.into());
        self
    }

    /// Set the raw html values
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.html_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Set the validation rules
    pub fn with_validations(mut self, rules: impl Into<String>) -> Self {
        self.validations = rules.into();
        self
    }

    /// Set index/form/view visibility in one go
    pub fn visible(mut self, in_index: bool, in_form: bool, in_view: bool) -> Self {
        self.in_index = in_index;
        self.in_form = in_form;
        self.in_view = in_view;
        self
    }

    /// Display label: the explicit title or `Title Case` of the name
    pub fn title(&self) -> Cow<'_, str> {
        match &self.field_title {
            Some(title) => Cow::Borrowed(title.as_str()),
            None => Cow::Owned(inflector::title(&self.name)),
        }
    }
}

/// How the index page renders its table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableType {
    /// Static server-rendered table with pagination
    Blade,
    /// AJAX datatable with a row-actions partial
    Datatables,
    /// Live component; no table file
    Livewire,
}

impl TableType {
    /// Name as used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            TableType::Blade => "blade",
            TableType::Datatables => "datatables",
            TableType::Livewire => "livewire",
        }
    }
}

impl FromStr for TableType {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blade" => Ok(TableType::Blade),
            "datatables" => Ok(TableType::Datatables),
            "livewire" => Ok(TableType::Livewire),
            other => Err(GenerationError::InvalidTableType(other.to_string())),
        }
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Namespace prefixes, written with `/` or `.` separators (`admin/blog`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefixes {
    /// View directory prefix
    #[serde(default)]
    pub view: String,
    /// Route name prefix
    #[serde(default)]
    pub route: String,
}

impl Prefixes {
    /// `admin/blog` → `admin.blog`
    pub fn dotted(prefix: &str) -> String {
        prefix
            .split(['/', '.', '\\'])
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// View prefix with trailing dot, or empty
    pub fn view_include_prefix(&self) -> String {
        with_trailing_dot(Self::dotted(&self.view))
    }

    /// Route prefix with trailing dot, or empty
    pub fn route_name_prefix(&self) -> String {
        with_trailing_dot(Self::dotted(&self.route))
    }
}

fn with_trailing_dot(dotted: String) -> String {
    if dotted.is_empty() {
        dotted
    } else {
        format!("{}.", dotted)
    }
}

/// A page a caller may ask to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    /// Listing page (and its table)
    Index,
    /// Create form
    Create,
    /// Form fields only, without a page around them
    Update,
    /// Edit page
    Edit,
    /// Detail page (and its field list)
    Show,
}

impl ViewKind {
    /// Parse a requested view name
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "index" => Some(ViewKind::Index),
            "create" => Some(ViewKind::Create),
            "update" => Some(ViewKind::Update),
            "edit" => Some(ViewKind::Edit),
            "show" => Some(ViewKind::Show),
            _ => None,
        }
    }
}

/// One of the files written for a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewFile {
    /// `table.blade.php`
    Table,
    /// `index.blade.php`
    Index,
    /// `fields.blade.php`
    Fields,
    /// `create.blade.php`
    Create,
    /// `edit.blade.php`
    Edit,
    /// `show.blade.php`
    Show,
    /// `show_fields.blade.php`
    ShowFields,
    /// `datatables_actions.blade.php`
    DatatablesActions,
}

impl ViewFile {
    /// The seven files of a full run, in rollback order
    pub const DEFAULT_SET: [ViewFile; 7] = [
        ViewFile::Table,
        ViewFile::Index,
        ViewFile::Fields,
        ViewFile::Create,
        ViewFile::Edit,
        ViewFile::Show,
        ViewFile::ShowFields,
    ];

    /// Stem of the output file
    pub fn stem(&self) -> &'static str {
        match self {
            ViewFile::Table => "table",
            ViewFile::Index => "index",
            ViewFile::Fields => "fields",
            ViewFile::Create => "create",
            ViewFile::Edit => "edit",
            ViewFile::Show => "show",
            ViewFile::ShowFields => "show_fields",
            ViewFile::DatatablesActions => "datatables_actions",
        }
    }

    /// Output file name
    pub fn file_name(&self) -> String {
        format!("{}.blade.php", self.stem())
    }
}

impl fmt::Display for ViewFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.blade.php", self.stem())
    }
}

/// Per-run options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    /// Requested views; empty means all of them
    #[serde(default)]
    pub views: Vec<String>,
    /// Use the `_locale` stub variants
    #[serde(default)]
    pub localized: bool,
}

/// Everything known about the model being scaffolded
///
/// Read-only during generation; each run copies [`base_variables`](Self::base_variables)
/// into its own accumulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Model class name, e.g. `BlogPost`
    pub model_name: String,
    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Backing table name
    pub table_name: String,
    /// Table rendering mode as configured (`blade`, `datatables`, `livewire`)
    pub table_type: String,
    /// Primary key column
    #[serde(default = "default_primary_key")]
    pub primary_key: String,
    /// View and route prefixes
    #[serde(default)]
    pub prefixes: Prefixes,
    /// Extra variables; these override the derived model variables
    #[serde(default)]
    pub dynamic_vars: VariableMap,
    /// Run options
    #[serde(default)]
    pub options: GeneratorOptions,
}

fn default_primary_key() -> String {
    "id".to_string()
}

impl GeneratorConfig {
    /// Create a config with derived table name and blade tables
    pub fn new(model_name: impl Into<String>) -> Self {
        let model_name = model_name.into();
        let table_name = inflector::plural(&model_name.to_snake_case());
        Self {
            model_name,
            fields: Vec::new(),
            table_name,
            table_type: TableType::Blade.as_str().to_string(),
            primary_key: default_primary_key(),
            prefixes: Prefixes::default(),
            dynamic_vars: VariableMap::new(),
            options: GeneratorOptions::default(),
        }
    }

    /// Set the fields
    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    /// Set the table rendering mode
    pub fn with_table_type(mut self, table_type: impl Into<String>) -> Self {
        self.table_type = table_type.into();
        self
    }

    /// Set the backing table
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    /// Set view and route prefixes
    pub fn with_prefixes(mut self, prefixes: Prefixes) -> Self {
        self.prefixes = prefixes;
        self
    }

    /// Add an explicit variable
    pub fn with_var(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.dynamic_vars.insert(token, value);
        self
    }

    /// Restrict the run to some views
    pub fn with_views<I, S>(mut self, views: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.views = views.into_iter().map(Into::into).collect();
        self
    }

    /// Toggle localized stubs
    pub fn localized(mut self, localized: bool) -> Self {
        self.options.localized = localized;
        self
    }

    /// Parsed table mode
    pub fn table_mode(&self) -> GenerationResult<TableType> {
        self.table_type.parse()
    }

    /// Whether any field uploads files
    pub fn has_file_input(&self) -> bool {
        self.fields.iter().any(|f| f.html_type == HtmlType::File)
    }

    /// Key the view-data registrar scopes select variables under
    pub fn fields_view_scope(&self) -> String {
        let view = Prefixes::dotted(&self.prefixes.view);
        if view.is_empty() {
            format!("{}.fields", self.table_name)
        } else {
            format!("{}.{}.fields", view, self.table_name)
        }
    }

    /// Model-derived variables with explicit `dynamic_vars` applied on top
    pub fn base_variables(&self) -> VariableMap {
        let name = self.model_name.to_pascal_case();
        let plural = inflector::plural(&name);

        let mut vars = VariableMap::new()
            .with(tokens::MODEL_NAME, name.as_str())
            .with(tokens::MODEL_NAME_CAMEL, name.to_lower_camel_case())
            .with(tokens::MODEL_NAME_PLURAL, plural.as_str())
            .with(tokens::MODEL_NAME_PLURAL_CAMEL, plural.to_lower_camel_case())
            .with(tokens::MODEL_NAME_SNAKE, name.to_snake_case())
            .with(tokens::MODEL_NAME_PLURAL_SNAKE, plural.to_snake_case())
            .with(tokens::MODEL_NAME_DASHED, name.to_kebab_case())
            .with(tokens::MODEL_NAME_PLURAL_DASHED, plural.to_kebab_case())
            .with(tokens::MODEL_NAME_HUMAN, name.to_title_case())
            .with(tokens::MODEL_NAME_PLURAL_HUMAN, plural.to_title_case())
            .with(tokens::TABLE_NAME, self.table_name.as_str())
            .with(tokens::PRIMARY_KEY_NAME, self.primary_key.as_str())
            .with(tokens::VIEW_PREFIX, self.prefixes.view_include_prefix())
            .with(tokens::ROUTE_PREFIX, self.prefixes.route_name_prefix());

        vars.extend(&self.dynamic_vars);
        vars
    }
}

/// A file written by a generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedView {
    /// Which view
    pub file: ViewFile,
    /// Where it was written
    pub path: PathBuf,
    /// Tokens left unfilled in the output
    pub unresolved_tokens: Vec<String>,
}

/// Outcome of a generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Files in the order they were written
    pub files: Vec<GeneratedView>,
    /// When the run finished
    pub generated_at: DateTime<Utc>,
}

impl GenerationReport {
    /// Whether a given view was written
    pub fn contains(&self, file: ViewFile) -> bool {
        self.files.iter().any(|view| view.file == file)
    }

    /// All unfilled tokens, per file
    pub fn warnings(&self) -> impl Iterator<Item = (ViewFile, &str)> {
        self.files.iter().flat_map(|view| {
            view.unresolved_tokens
                .iter()
                .map(move |token| (view.file, token.as_str()))
        })
    }
}

/// Outcome of a rollback
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollbackReport {
    /// Files that existed and were deleted
    pub deleted: Vec<PathBuf>,
}
