//! View-data registration port
//!
//! Select-from-table fields need their option list shared with the form view.
//! The generator does not build that wiring itself; it hands a
//! [`ViewVariable`] to a [`ViewDataRegistrar`] once per such field.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use crate::error::GenerationResult;

/// A view variable to be provided to a scoped view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewVariable {
    /// View the variable is bound to, e.g. `admin.posts.fields`
    pub scope: String,
    /// Variable name without sigil, e.g. `userItems`
    pub variable: String,
    /// Quoted column list, e.g. `'name','id'`
    pub columns: String,
    /// Table the options are read from
    pub source_table: String,
    /// Model used to query the table, when given
    pub model: Option<String>,
}

/// Receives view variables for select-from-table fields
pub trait ViewDataRegistrar {
    /// Register one variable
    fn register_view_variable(&self, variable: ViewVariable) -> GenerationResult<()>;
}

/// Registrar that keeps every registration in memory
#[derive(Debug, Default)]
pub struct CollectingRegistrar {
    registered: RefCell<Vec<ViewVariable>>,
}

impl CollectingRegistrar {
    /// Create an empty registrar
    pub fn new() -> Self {
        Self::default()
    }

    /// Registrations so far, in call order
    pub fn registrations(&self) -> Vec<ViewVariable> {
        self.registered.borrow().clone()
    }
}

impl ViewDataRegistrar for CollectingRegistrar {
    fn register_view_variable(&self, variable: ViewVariable) -> GenerationResult<()> {
        self.registered.borrow_mut().push(variable);
        Ok(())
    }
}
