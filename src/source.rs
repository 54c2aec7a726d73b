use std::fmt;

use auto_impl::auto_impl;

use crate::error::{DriverError, DriverResult};
use crate::value::{Decimal, NaiveDate, NaiveDateTime, NaiveTime};

/// Operations a [`RowSource`] may decline to support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Advance,
    SetRowLimit,
    GetInteger,
    GetDouble,
    GetString,
    GetDecimal,
    GetDate,
    GetTime,
    GetTimestamp,
    WasNull,
    CurrentRowPosition,
    Close,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Advance => "advance",
            Operation::SetRowLimit => "set_row_limit",
            Operation::GetInteger => "get_integer",
            Operation::GetDouble => "get_double",
            Operation::GetString => "get_string",
            Operation::GetDecimal => "get_decimal",
            Operation::GetDate => "get_date",
            Operation::GetTime => "get_time",
            Operation::GetTimestamp => "get_timestamp",
            Operation::WasNull => "was_null",
            Operation::CurrentRowPosition => "current_row_position",
            Operation::Close => "close",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A driver's live, forward-only query cursor
///
/// Column getters are addressed by the driver's 1-based native column position and
/// read from the current row. Integer and double getters return a primitive even for
/// NULL; callers must consult [`was_null`](RowSource::was_null) afterwards.
///
/// Any operation may fail with [`DriverError::Failed`] or
/// [`DriverError::Unsupported`]. Optional operations default to the latter.
#[auto_impl(&mut, Box)]
pub trait RowSource {
    /// Move to the next row. Returns `false` once no further rows exist.
    fn advance(&mut self) -> DriverResult<bool>;

    /// Bound the total number of rows the cursor yields; `0` means unlimited
    fn set_row_limit(&mut self, _max: u32) -> DriverResult<()> {
        Err(DriverError::Unsupported(Operation::SetRowLimit))
    }

    fn get_integer(&mut self, position: usize) -> DriverResult<i32>;

    fn get_double(&mut self, position: usize) -> DriverResult<f64>;

    fn get_string(&mut self, position: usize) -> DriverResult<Option<String>>;

    fn get_decimal(&mut self, position: usize) -> DriverResult<Option<Decimal>>;

    fn get_date(&mut self, position: usize) -> DriverResult<Option<NaiveDate>>;

    fn get_time(&mut self, position: usize) -> DriverResult<Option<NaiveTime>>;

    fn get_timestamp(&mut self, position: usize) -> DriverResult<Option<NaiveDateTime>>;

    /// Whether the value returned by the most recent getter call was NULL
    fn was_null(&mut self) -> DriverResult<bool>;

    /// 1-based index of the current row
    fn current_row_position(&mut self) -> DriverResult<u32> {
        Err(DriverError::Unsupported(Operation::CurrentRowPosition))
    }

    /// Release driver-side resources. No other call is valid afterwards.
    fn close(&mut self) -> DriverResult<()>;
}
