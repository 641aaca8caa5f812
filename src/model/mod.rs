//! Model layer - table data and state
//!
//! - `CellValue`, `Column`, `Record`/`Row` - the data being displayed
//! - `TableState` - interaction state (search, sort, page size, page)
//! - `pipeline` - filter → sort → paginate derivation
//! - `DataTable` - one table instance tying the above together
//! - `TableView` - renderer-independent output
//! - `ModalStack` - modal overlay management

pub mod column;
pub mod dataset;
pub mod modal;
pub mod pipeline;
pub mod record;
pub mod state;
pub mod table;
pub mod value;
pub mod view;

// Re-export commonly used types
pub use column::Column;
pub use dataset::Dataset;
pub use record::{Record, Row};
pub use state::RowsPerPage;
pub use table::DataTable;
pub use value::CellValue;
pub use view::{HeaderCell, PageSummary, TableView};
