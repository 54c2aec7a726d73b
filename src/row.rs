use std::sync::Arc;

use crate::descriptor::ResultDescriptor;
use crate::error::{Error, Result};
use crate::value::Value;

/// Immutable snapshot of one fetched row
///
/// Values are index-aligned with the [`ResultDescriptor`]. `None` marks a NULL value or
/// a computed column that has not been filled yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    descriptor: Arc<ResultDescriptor>,
    values: Vec<Option<Value>>,
}

impl Row {
    pub(crate) fn new(descriptor: Arc<ResultDescriptor>, values: Vec<Option<Value>>) -> Self {
        debug_assert_eq!(descriptor.column_count(), values.len());
        Self { descriptor, values }
    }

    pub fn descriptor(&self) -> &Arc<ResultDescriptor> {
        &self.descriptor
    }

    /// Number of columns in this row
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at 1-based canonical `index`. `None` for NULL, unset, or out of range.
    pub fn get(&self, index: usize) -> Option<&Value> {
        index
            .checked_sub(1)
            .and_then(|i| self.values.get(i))
            .and_then(Option::as_ref)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        self.descriptor.index_of(name).and_then(|i| self.get(i))
    }

    pub fn values(&self) -> &[Option<Value>] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Option<Value>> {
        self.values
    }

    /// Returns a copy of this row with the computed column at `index` set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::ColumnOutOfRange` for an index outside the row and
    /// `Error::NotComputedColumn` for a column read from the driver.
    pub fn with_computed(mut self, index: usize, value: Option<Value>) -> Result<Self> {
        let col = self
            .descriptor
            .column(index)
            .ok_or(Error::ColumnOutOfRange { index })?;
        if !col.is_virtual {
            return Err(Error::NotComputedColumn { index });
        }
        if let Some(slot) = self.values.get_mut(index - 1) {
            *slot = value;
        }
        Ok(self)
    }
}
