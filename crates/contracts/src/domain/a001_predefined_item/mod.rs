pub mod aggregate;
pub mod csv;

pub use aggregate::{ItemPage, PredefinedItem, PredefinedItemDraft, PredefinedItemId};
pub use csv::{parse_csv, validate_csv, CsvDocument, ImportSummary};
