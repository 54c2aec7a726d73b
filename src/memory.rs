//! In-process [`RowSource`] over rows held in memory.
//!
//! Behaves like a minimal driver: it honors row limits, tracks NULL for `was_null`,
//! reports 1-based row positions, and fails on type mismatches instead of coercing.
//! Individual operations can be switched off to mimic drivers with partial support.

use std::collections::HashSet;

use crate::error::{DriverError, DriverResult, eyre};
use crate::source::{Operation, RowSource};
use crate::value::{Decimal, NaiveDate, NaiveDateTime, NaiveTime, Value, ValueType};

#[derive(Debug, Default)]
pub struct MemorySource {
    rows: Vec<Vec<Option<Value>>>,
    /// Index of the last row yielded, `None` before the first `advance`
    current: Option<usize>,
    /// Whether `current` is readable; false before the first row and at the end
    on_row: bool,
    /// Rows yielded so far
    yielded: u32,
    max_rows: u32,
    last_was_null: Option<bool>,
    unsupported: HashSet<Operation>,
    closed: bool,
}

impl MemorySource {
    pub fn new(rows: Vec<Vec<Option<Value>>>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    /// Make `op` fail with [`DriverError::Unsupported`]
    pub fn without(mut self, op: Operation) -> Self {
        self.unsupported.insert(op);
        self
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn check(&self, op: Operation) -> DriverResult<()> {
        if self.unsupported.contains(&op) {
            return Err(DriverError::Unsupported(op));
        }
        if self.closed {
            return Err(eyre!("{} called on a closed cursor", op).into());
        }
        Ok(())
    }

    /// Look up the cell at 1-based `position` of the current row
    fn cell(&mut self, op: Operation, position: usize) -> DriverResult<Option<&Value>> {
        self.check(op)?;
        self.last_was_null = None;
        let row = self
            .current
            .filter(|_| self.on_row)
            .and_then(|i| self.rows.get(i))
            .ok_or_else(|| eyre!("{} called without a current row", op))?;
        let cell = position
            .checked_sub(1)
            .and_then(|i| row.get(i))
            .ok_or_else(|| eyre!("column {} is out of range", position))?;
        self.last_was_null = Some(cell.is_none());
        Ok(cell.as_ref())
    }

    fn typed<T>(
        &mut self,
        op: Operation,
        expected: ValueType,
        position: usize,
        extract: impl FnOnce(&Value) -> Option<T>,
    ) -> DriverResult<Option<T>> {
        match self.cell(op, position)? {
            None => Ok(None),
            Some(value) => extract(value).map(Some).ok_or_else(|| {
                eyre!(
                    "column {} holds a {} value, not {}",
                    position,
                    value.value_type(),
                    expected
                )
                .into()
            }),
        }
    }
}

impl RowSource for MemorySource {
    fn advance(&mut self) -> DriverResult<bool> {
        self.check(Operation::Advance)?;
        self.on_row = false;
        let next = self.current.map_or(0, |i| i + 1);
        let limited = self.max_rows != 0 && self.yielded >= self.max_rows;
        if limited || next >= self.rows.len() {
            return Ok(false);
        }
        self.current = Some(next);
        self.on_row = true;
        self.yielded += 1;
        Ok(true)
    }

    fn set_row_limit(&mut self, max: u32) -> DriverResult<()> {
        self.check(Operation::SetRowLimit)?;
        self.max_rows = max;
        Ok(())
    }

    fn get_integer(&mut self, position: usize) -> DriverResult<i32> {
        // NULL reads as 0, like any driver returning a primitive
        let value =
            self.typed(Operation::GetInteger, ValueType::Integer, position, Value::as_integer)?;
        Ok(value.unwrap_or_default())
    }

    fn get_double(&mut self, position: usize) -> DriverResult<f64> {
        let value =
            self.typed(Operation::GetDouble, ValueType::Double, position, Value::as_double)?;
        Ok(value.unwrap_or_default())
    }

    fn get_string(&mut self, position: usize) -> DriverResult<Option<String>> {
        self.typed(Operation::GetString, ValueType::String, position, |v| {
            v.as_str().map(ToString::to_string)
        })
    }

    fn get_decimal(&mut self, position: usize) -> DriverResult<Option<Decimal>> {
        self.typed(Operation::GetDecimal, ValueType::Decimal, position, Value::as_decimal)
    }

    fn get_date(&mut self, position: usize) -> DriverResult<Option<NaiveDate>> {
        self.typed(Operation::GetDate, ValueType::Date, position, Value::as_date)
    }

    fn get_time(&mut self, position: usize) -> DriverResult<Option<NaiveTime>> {
        self.typed(Operation::GetTime, ValueType::Time, position, Value::as_time)
    }

    fn get_timestamp(&mut self, position: usize) -> DriverResult<Option<NaiveDateTime>> {
        self.typed(
            Operation::GetTimestamp,
            ValueType::Timestamp,
            position,
            Value::as_timestamp,
        )
    }

    fn was_null(&mut self) -> DriverResult<bool> {
        self.check(Operation::WasNull)?;
        self.last_was_null
            .ok_or_else(|| eyre!("was_null called before any column was read").into())
    }

    fn current_row_position(&mut self) -> DriverResult<u32> {
        self.check(Operation::CurrentRowPosition)?;
        match self.current {
            Some(i) if self.on_row => u32::try_from(i + 1)
                .map_err(|_e| eyre!("row position {} overflows", i + 1).into()),
            _ => Ok(0),
        }
    }

    fn close(&mut self) -> DriverResult<()> {
        self.check(Operation::Close)?;
        self.closed = true;
        self.rows.clear();
        Ok(())
    }
}
