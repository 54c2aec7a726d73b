pub mod col;
pub mod descriptor;
pub mod error;
pub mod memory;
mod opts;
pub mod result_set;
pub mod row;
pub mod source;
pub mod value;

pub use descriptor::ResultDescriptor;
pub use opts::Opts;
pub use result_set::ResultSet;
pub use row::Row;
pub use source::RowSource;
pub use value::{Value, ValueType};
