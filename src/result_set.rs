use std::sync::Arc;

use crate::descriptor::ResultDescriptor;
use crate::error::{Error, Result};
use crate::opts::Opts;
use crate::row::Row;
use crate::source::RowSource;
use crate::value::{Value, ValueType};

/// Cursor state of a [`ResultSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// No row fetched yet
    Created,
    /// At least one row fetched and the driver has not reported the end
    Fetching,
    /// The driver reported no further rows
    Exhausted,
}

/// Forward-only, typed view over a driver's [`RowSource`]
///
/// Every driver failure, whether the driver errored or does not implement the
/// operation, is reported through one [`Error`] variant per operation. Rows are never
/// buffered; each [`fetch`](ResultSet::fetch) advances the driver cursor once.
///
/// Dropping a `ResultSet` without calling [`close`](ResultSet::close) still closes the
/// driver cursor unless disabled by [`Opts::close_on_drop`].
pub struct ResultSet<S: RowSource> {
    source: S,
    descriptor: Arc<ResultDescriptor>,
    state: State,
    fetched_rows: u64,
    close_on_drop: bool,
    closed: bool,
}

impl<S: RowSource> ResultSet<S> {
    pub fn new(source: S, descriptor: Arc<ResultDescriptor>) -> Self {
        Self {
            source,
            descriptor,
            state: State::Created,
            fetched_rows: 0,
            close_on_drop: true,
            closed: false,
        }
    }

    /// Create a result set and apply `opts`
    ///
    /// A non-zero `opts.max_rows` is forwarded to the driver immediately.
    pub fn with_opts(source: S, descriptor: Arc<ResultDescriptor>, opts: &Opts) -> Result<Self> {
        let mut rs = Self::new(source, descriptor);
        rs.close_on_drop = opts.close_on_drop;
        if opts.max_rows != 0 {
            rs.set_max_rows(opts.max_rows)?;
        }
        Ok(rs)
    }

    pub fn metadata(&self) -> &Arc<ResultDescriptor> {
        &self.descriptor
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Number of rows returned by [`fetch`](ResultSet::fetch) so far
    pub fn fetched_rows(&self) -> u64 {
        self.fetched_rows
    }

    /// Limit the number of rows the driver yields; `0` means no limit
    #[tracing::instrument(skip(self))]
    pub fn set_max_rows(&mut self, max: u32) -> Result<()> {
        tracing::debug!(max, "setting row limit");
        self.source
            .set_row_limit(max)
            .map_err(Error::CannotSetMaxRows)
    }

    /// Fetch the next row
    ///
    /// Returns `Ok(None)` once the driver has no more rows or the row limit is reached.
    /// A failure while reading any column aborts the whole row.
    #[tracing::instrument(skip_all)]
    pub fn fetch(&mut self) -> Result<Option<Row>> {
        if !self.source.advance().map_err(Error::CannotFetchNextRow)? {
            tracing::debug!(fetched_rows = self.fetched_rows, "end of data");
            self.state = State::Exhausted;
            return Ok(None);
        }
        self.state = State::Fetching;

        let descriptor = Arc::clone(&self.descriptor);
        let mut values = Vec::with_capacity(descriptor.column_count());
        for col in descriptor.columns() {
            if col.is_virtual {
                values.push(None);
                continue;
            }
            values.push(self.read_column(col.value_type, col.native_position)?);
        }

        self.fetched_rows += 1;
        tracing::trace!(row = self.fetched_rows, "fetched row");
        Ok(Some(Row::new(descriptor, values)))
    }

    /// Read one column of the current row with the getter matching `value_type`
    ///
    /// The driver's `was_null` answer is authoritative and overrides whatever the
    /// getter returned, including the placeholder primitive of a NULL number.
    fn read_column(&mut self, value_type: ValueType, position: usize) -> Result<Option<Value>> {
        let driver = &mut self.source;
        let value = match value_type {
            ValueType::Integer => driver
                .get_integer(position)
                .map(|v| Some(Value::Integer(v))),
            ValueType::Double => driver
                .get_double(position)
                .map(|v| Some(Value::Double(v))),
            ValueType::String => driver
                .get_string(position)
                .map(|v| v.map(Value::String)),
            ValueType::Decimal => driver
                .get_decimal(position)
                .map(|v| v.map(Value::Decimal)),
            ValueType::Date => driver.get_date(position).map(|v| v.map(Value::Date)),
            ValueType::Time => driver.get_time(position).map(|v| v.map(Value::Time)),
            ValueType::Timestamp => driver
                .get_timestamp(position)
                .map(|v| v.map(Value::Timestamp)),
        }
        .map_err(|source| Error::CannotGetColumnValue {
            value_type,
            position,
            source,
        })?;

        let was_null = driver
            .was_null()
            .map_err(|source| Error::CannotDetermineWasNull { position, source })?;
        Ok(if was_null { None } else { value })
    }

    /// 1-based index of the current row
    pub fn row_position(&mut self) -> Result<u32> {
        self.source
            .current_row_position()
            .map_err(Error::CannotGetRowPosition)
    }

    /// Close the driver cursor
    #[tracing::instrument(skip_all)]
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.source.close().map_err(Error::CannotCloseResultSet)
    }

    /// Iterate over the remaining rows
    ///
    /// The iterator ends after end of data or after yielding the first error.
    pub fn rows(&mut self) -> Rows<'_, S> {
        Rows {
            rs: self,
            done: false,
        }
    }
}

impl<S: RowSource> Drop for ResultSet<S> {
    fn drop(&mut self) {
        if self.closed || !self.close_on_drop {
            return;
        }
        if let Err(err) = self.source.close() {
            tracing::warn!(error = %err, "failed to close result set on drop");
        }
    }
}

/// Single-pass iterator returned by [`ResultSet::rows`]
pub struct Rows<'a, S: RowSource> {
    rs: &'a mut ResultSet<S>,
    done: bool,
}

impl<S: RowSource> Iterator for Rows<'_, S> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.rs.fetch() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<S: RowSource> std::iter::FusedIterator for Rows<'_, S> {}
