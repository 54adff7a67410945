// Add/edit form session: Idle -> Editing -> Validating -> Idle | Editing

use crate::error::{Error, Result};
use crate::input::FacturaInput;
use crate::record::Factura;
use crate::store::Store;
use tracing::{debug, warn};

/// Where a form session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Editing,
    Validating,
}

/// What a successful submit does to the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Append a new record
    Add,
    /// Replace the record at this position
    Edit(usize),
}

/// Result of a submit that passed validation and mutated the store
#[derive(Debug)]
pub struct Submitted {
    /// Position of the added or replaced record
    pub index: usize,
    /// Set when the mutation happened in memory but the save failed
    pub save_error: Option<Error>,
}

impl Submitted {
    pub fn is_persisted(&self) -> bool {
        self.save_error.is_none()
    }
}

/// One add or edit interaction against a store
#[derive(Debug)]
pub struct FormSession {
    mode: FormMode,
    state: FormState,
    input: FacturaInput,
}

impl FormSession {
    /// Open an empty add form
    pub fn add() -> Self {
        debug!("form: opening add form");
        Self {
            mode: FormMode::Add,
            state: FormState::Editing,
            input: FacturaInput::default(),
        }
    }

    /// Open an edit form pre-filled from the record at `index`
    pub fn edit(store: &Store, index: usize) -> Result<Self> {
        let factura = store
            .get(index)
            .ok_or_else(|| Error::index_out_of_range(index, store.len()))?;

        debug!(index, "form: opening edit form");
        Ok(Self {
            mode: FormMode::Edit(index),
            state: FormState::Editing,
            input: FacturaInput::from_factura(factura),
        })
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn input(&self) -> &FacturaInput {
        &self.input
    }

    /// Raw fields, writable only while the form is open
    pub fn input_mut(&mut self) -> Option<&mut FacturaInput> {
        match self.state {
            FormState::Editing => Some(&mut self.input),
            _ => None,
        }
    }

    /// Close the form without touching the store
    ///
    /// Returns false if the form was not open.
    pub fn cancel(&mut self) -> bool {
        if self.state != FormState::Editing {
            return false;
        }
        debug!(mode = ?self.mode, "form: cancelled");
        self.state = FormState::Idle;
        true
    }

    /// Validate the input, apply it to the store and save
    ///
    /// Returns `Ok(None)` if the form was not open. On a validation or index
    /// error the form stays open and the store is unchanged. A save failure
    /// does not undo the in-memory mutation; it is reported in
    /// [`Submitted::save_error`] and the form still closes.
    pub fn submit(&mut self, store: &mut Store) -> Result<Option<Submitted>> {
        if self.state != FormState::Editing {
            return Ok(None);
        }
        self.state = FormState::Validating;

        let index = match self.apply(store) {
            Ok(index) => index,
            Err(e) => {
                debug!(mode = ?self.mode, error = %e, "form: rejected, back to editing");
                self.state = FormState::Editing;
                return Err(e);
            }
        };

        self.state = FormState::Idle;

        let save_error = store.save().err();
        if let Some(e) = &save_error {
            warn!(index, error = %e, "form: saved in memory only");
        }

        Ok(Some(Submitted { index, save_error }))
    }

    fn apply(&self, store: &mut Store) -> Result<usize> {
        let factura: Factura = self.input.parse()?;

        match self.mode {
            FormMode::Add => {
                store.add(factura);
                Ok(store.len() - 1)
            }
            FormMode::Edit(index) => {
                store.replace_at(index, factura)?;
                Ok(index)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Field;
    use crate::store::DEFAULT_FILE_NAME;
    use std::fs;
    use tempfile::TempDir;

    fn two_record_store(temp: &TempDir) -> Store {
        let mut store = Store::new(temp.path().join(DEFAULT_FILE_NAME));
        store.add(Factura::new("A1", "Widget", 3, 10.0, 1.5));
        store.add(Factura::new("B2", "Gadget", 2, 5.0, 0.5));
        store
    }

    #[test]
    fn test_add_submit_appends_and_saves() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::new(temp.path().join(DEFAULT_FILE_NAME));
        store.add(Factura::new("A1", "Widget", 3, 10.0, 1.5));

        let mut form = FormSession::add();
        assert_eq!(form.state(), FormState::Editing);
        *form.input_mut().unwrap() = FacturaInput::new("B2", "Gadget", "2", "5.0", "0.5");

        let submitted = form.submit(&mut store).unwrap().unwrap();
        assert_eq!(submitted.index, 1);
        assert!(submitted.is_persisted());
        assert_eq!(form.state(), FormState::Idle);
        assert_eq!(store.get(1).unwrap().total(), 10.5);

        let on_disk = store.load_all().unwrap();
        assert_eq!(on_disk, store.list());
    }

    #[test]
    fn test_invalid_quantity_leaves_store_untouched() {
        let temp = TempDir::new().unwrap();
        let mut store = two_record_store(&temp);

        let mut form = FormSession::add();
        *form.input_mut().unwrap() = FacturaInput::new("C3", "Gizmo", "abc", "1.0", "0.0");

        let err = form.submit(&mut store).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { field: Field::Quantity, .. }));
        assert_eq!(form.state(), FormState::Editing);
        assert_eq!(store.len(), 2);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_retry_after_validation_failure() {
        let temp = TempDir::new().unwrap();
        let mut store = two_record_store(&temp);

        let mut form = FormSession::add();
        *form.input_mut().unwrap() = FacturaInput::new("C3", "Gizmo", "1", "x", "0");
        assert!(form.submit(&mut store).is_err());

        form.input_mut().unwrap().unit_price = "4.25".to_string();
        let submitted = form.submit(&mut store).unwrap().unwrap();
        assert_eq!(submitted.index, 2);
        assert_eq!(store.get(2).unwrap().total(), 4.25);
    }

    #[test]
    fn test_edit_prefills_and_replaces() {
        let temp = TempDir::new().unwrap();
        let mut store = two_record_store(&temp);

        let mut form = FormSession::edit(&store, 0).unwrap();
        assert_eq!(form.mode(), FormMode::Edit(0));
        assert_eq!(form.input().code, "A1");
        assert_eq!(form.input().quantity, "3");

        form.input_mut().unwrap().quantity = "4".to_string();
        let submitted = form.submit(&mut store).unwrap().unwrap();

        assert_eq!(submitted.index, 0);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().quantity(), 4);
        assert_eq!(store.get(0).unwrap().total(), 41.5);
        assert_eq!(store.get(1).unwrap().product_code(), "B2");
    }

    #[test]
    fn test_edit_out_of_range() {
        let temp = TempDir::new().unwrap();
        let store = two_record_store(&temp);

        let err = FormSession::edit(&store, 2).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 2, len: 2 }));
    }

    #[test]
    fn test_edit_target_removed_while_open() {
        let temp = TempDir::new().unwrap();
        let mut store = two_record_store(&temp);

        let mut form = FormSession::edit(&store, 1).unwrap();
        store.remove_at(1).unwrap();

        let err = form.submit(&mut store).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { .. }));
        assert_eq!(form.state(), FormState::Editing);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_cancel_does_not_mutate() {
        let temp = TempDir::new().unwrap();
        let mut store = two_record_store(&temp);

        let mut form = FormSession::edit(&store, 0).unwrap();
        form.input_mut().unwrap().name = "Renamed".to_string();
        assert!(form.cancel());
        assert_eq!(form.state(), FormState::Idle);

        assert!(form.input_mut().is_none());
        assert!(!form.cancel());
        assert!(form.submit(&mut store).unwrap().is_none());
        assert_eq!(store.get(0).unwrap().product_name(), "Widget");
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_failure_keeps_mutation() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::new(temp.path().join("missing").join(DEFAULT_FILE_NAME));

        let mut form = FormSession::add();
        *form.input_mut().unwrap() = FacturaInput::new("A1", "Widget", "3", "10", "1.5");

        let submitted = form.submit(&mut store).unwrap().unwrap();
        assert!(matches!(submitted.save_error, Some(Error::PersistenceWrite { .. })));
        assert!(!submitted.is_persisted());
        assert_eq!(form.state(), FormState::Idle);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_saved_file_overwrites_previous_content() {
        let temp = TempDir::new().unwrap();
        let mut store = two_record_store(&temp);
        fs::write(store.path(), "stale").unwrap();

        let mut form = FormSession::add();
        *form.input_mut().unwrap() = FacturaInput::new("C3", "Gizmo", "1", "1", "0");
        form.submit(&mut store).unwrap();

        assert_eq!(store.load_all().unwrap().len(), 3);
    }
}
