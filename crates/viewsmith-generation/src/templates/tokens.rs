//! Placeholder vocabulary understood by the scaffold stubs
//!
//! Every token is a `$UPPER_SNAKE$` sentinel. Stubs may contain any of these;
//! anything else that looks like a token is left untouched and reported.

/// Field name as written in the model
pub const FIELD_NAME: &str = "$FIELD_NAME$";
/// Display label of a field
pub const FIELD_NAME_TITLE: &str = "$FIELD_NAME_TITLE$";

/// Composite table header fragment
pub const FIELD_HEADERS: &str = "$FIELD_HEADERS$";
/// Composite table body fragment
pub const FIELD_BODY: &str = "$FIELD_BODY$";
/// Pagination fragment of the blade table
pub const PAGINATE: &str = "$PAGINATE$";
/// Table include or live component inside the index page
pub const TABLE: &str = "$TABLE$";
/// Joined per-field form markup
pub const FIELDS: &str = "$FIELDS$";

/// Size attributes derived from `min:`/`max:` validation rules
pub const SIZE: &str = "$SIZE$";
/// Extra form option set when any field uploads files
pub const FILES: &str = "$FILES$";
/// Options array or view variable of a select
pub const INPUT_ARR: &str = "$INPUT_ARR$";
/// Checked value of checkbox-like inputs
pub const CHECKBOX_VALUE: &str = "$CHECKBOX_VALUE$";
/// Joined radio buttons inside a radio group
pub const RADIO_BUTTONS: &str = "$RADIO_BUTTONS$";
/// Label of a single radio button
pub const LABEL: &str = "$LABEL$";
/// Value of a single radio button
pub const VALUE: &str = "$VALUE$";

/// Model class name, e.g. `BlogPost`
pub const MODEL_NAME: &str = "$MODEL_NAME$";
/// `blogPost`
pub const MODEL_NAME_CAMEL: &str = "$MODEL_NAME_CAMEL$";
/// `BlogPosts`
pub const MODEL_NAME_PLURAL: &str = "$MODEL_NAME_PLURAL$";
/// `blogPosts`
pub const MODEL_NAME_PLURAL_CAMEL: &str = "$MODEL_NAME_PLURAL_CAMEL$";
/// `blog_post`
pub const MODEL_NAME_SNAKE: &str = "$MODEL_NAME_SNAKE$";
/// `blog_posts`
pub const MODEL_NAME_PLURAL_SNAKE: &str = "$MODEL_NAME_PLURAL_SNAKE$";
/// `blog-post`
pub const MODEL_NAME_DASHED: &str = "$MODEL_NAME_DASHED$";
/// `blog-posts`
pub const MODEL_NAME_PLURAL_DASHED: &str = "$MODEL_NAME_PLURAL_DASHED$";
/// `Blog Post`
pub const MODEL_NAME_HUMAN: &str = "$MODEL_NAME_HUMAN$";
/// `Blog Posts`
pub const MODEL_NAME_PLURAL_HUMAN: &str = "$MODEL_NAME_PLURAL_HUMAN$";
/// Database table backing the model
pub const TABLE_NAME: &str = "$TABLE_NAME$";
/// Primary key column
pub const PRIMARY_KEY_NAME: &str = "$PRIMARY_KEY_NAME$";
/// Dotted view prefix including the trailing dot, or empty
pub const VIEW_PREFIX: &str = "$VIEW_PREFIX$";
/// Dotted route prefix including the trailing dot, or empty
pub const ROUTE_PREFIX: &str = "$ROUTE_PREFIX$";
