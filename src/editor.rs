//! The controller behind the add/delete/restore buttons.
//!
//! Every failure here is a user-input failure. It is reported as a single
//! line on the sink and the action is abandoned; nothing is returned to the
//! caller.

use chrono::NaiveDate;
use thiserror::Error;

use crate::collections::{ObservableList, SelectionMode, SelectionModel};
use crate::models::Person;
use crate::seed;
use crate::sink::LineSink;

pub const SELECT_ROW_TO_DELETE: &str = "Please select a row to delete.";
pub const SELECTED_ROWS_GONE: &str = "Selected rows no longer exist.";

pub fn no_row_at(index: usize) -> String {
    format!("No row at index {index}.")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("First name must not be empty.")]
    MissingFirstName,
    #[error("Last name must not be empty.")]
    MissingLastName,
    #[error("Birth date must not be empty.")]
    MissingBirthDate,
}

/// Current contents of the entry form. `None` means the field is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl PersonForm {
    pub fn clear(&mut self) {
        self.first_name = None;
        self.last_name = None;
        self.birth_date = None;
    }

    /// Checks presence only, stopping at the first missing field.
    pub fn to_person(&self) -> Result<Person, FormError> {
        let first_name = filled(self.first_name.as_deref()).ok_or(FormError::MissingFirstName)?;
        let last_name = filled(self.last_name.as_deref()).ok_or(FormError::MissingLastName)?;
        let birth_date = self.birth_date.ok_or(FormError::MissingBirthDate)?;

        Ok(Person::new(first_name, last_name, Some(birth_date)))
    }
}

fn filled(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

pub struct RowEditor<S: LineSink> {
    form: PersonForm,
    rows: ObservableList<Person>,
    selection: SelectionModel,
    sink: S,
}

impl<S: LineSink> RowEditor<S> {
    /// Starts with the seed rows and a multi-row selection.
    pub fn new(sink: S) -> Self {
        Self::with_rows(seed::person_list(), sink)
    }

    pub fn with_rows(rows: ObservableList<Person>, sink: S) -> Self {
        Self {
            form: PersonForm::default(),
            rows,
            selection: SelectionModel::new(SelectionMode::Multiple),
            sink,
        }
    }

    pub fn form(&self) -> &PersonForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PersonForm {
        &mut self.form
    }

    pub fn rows(&self) -> &ObservableList<Person> {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut ObservableList<Person> {
        &mut self.rows
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionModel {
        &mut self.selection
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Adds `index` to the selection. An index past the last row is reported
    /// and left unselected.
    pub fn select_row(&mut self, index: usize) -> bool {
        if index >= self.rows.len() {
            tracing::warn!(index, rows = self.rows.len(), "Rejected selection");
            self.sink.emit_line(&no_row_at(index));
            return false;
        }
        self.selection.select(index);
        true
    }

    /// Copy of the row at `index`, or a diagnostic when there is none.
    pub fn row_or_report(&mut self, index: usize) -> Option<Person> {
        let person = self.rows.get(index).cloned();
        if person.is_none() {
            self.sink.emit_line(&no_row_at(index));
        }
        person
    }

    /// Appends the person described by the form, then clears it. The new row
    /// keeps the unassigned id.
    pub fn add_person(&mut self) {
        match self.form.to_person() {
            Ok(person) => {
                tracing::debug!(%person, "Adding person from form");
                self.rows.push(person);
                self.clear_fields();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Rejected form input");
                self.sink.emit_line(&e.to_string());
            }
        }
    }

    /// Removes every selected row. Indices are removed highest first so the
    /// ones still pending keep pointing at the same rows.
    pub fn delete_selected_rows(&mut self) {
        if self.selection.is_empty() {
            self.sink.emit_line(SELECT_ROW_TO_DELETE);
            return;
        }

        let mut indices = self.selection.selected_indices();
        indices.sort_unstable();

        let mut removed = 0_usize;
        for &index in indices.iter().rev() {
            self.selection.clear_selection(index);
            if self.rows.remove(index).is_some() {
                removed += 1;
            } else {
                tracing::warn!(index, rows = self.rows.len(), "Selected row no longer exists");
            }
        }

        if removed == 0 {
            self.sink.emit_line(SELECTED_ROWS_GONE);
        }
        tracing::debug!(removed, remaining = self.rows.len(), "Deleted selected rows");
    }

    /// Replaces all rows with a fresh seed list. Ids keep growing across
    /// restores.
    pub fn restore_rows(&mut self) {
        self.selection.clear();
        self.rows.clear();
        self.rows.extend(seed::seed_people());
        tracing::info!(rows = self.rows.len(), "Rows restored from seed");
    }

    pub fn clear_fields(&mut self) {
        self.form.clear();
    }
}
