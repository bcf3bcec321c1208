//! People table: the `Person` entity, its seed rows and the controller that
//! adds, deletes and restores rows in an observable list.

pub mod collections;
pub mod editor;
pub mod models;
pub mod seed;
pub mod sink;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use collections::{ListChange, ObservableList, SelectionMode, SelectionModel};
pub use editor::{FormError, PersonForm, RowEditor};
pub use models::{AgeCategory, Person, PersonId};
pub use sink::{LineSink, StdoutSink};
