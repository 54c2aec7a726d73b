use crate::col::ColumnDefinition;
use crate::value::ValueType;

/// Canonical shape of a result: ordered columns with their types and driver positions
///
/// Immutable once built and shared between a [`ResultSet`](crate::result_set::ResultSet)
/// and every [`Row`](crate::row::Row) it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultDescriptor {
    columns: Vec<ColumnDefinition>,
}

impl ResultDescriptor {
    pub fn new(columns: Vec<ColumnDefinition>) -> Self {
        Self { columns }
    }

    pub fn builder() -> ResultDescriptorBuilder {
        ResultDescriptorBuilder::default()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    /// Column at 1-based canonical `index`
    pub fn column(&self, index: usize) -> Option<&ColumnDefinition> {
        index.checked_sub(1).and_then(|i| self.columns.get(i))
    }

    /// Driver position of every column in canonical order; `0` for computed columns
    pub fn native_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns.iter().map(|col| col.native_position)
    }

    /// 1-based canonical index of the column named (or aliased) `name`
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|col| col.matches(name))
            .map(|i| i + 1)
    }

    pub fn is_virtual(&self, index: usize) -> bool {
        self.column(index).is_some_and(|col| col.is_virtual)
    }

    pub fn value_type(&self, index: usize) -> Option<ValueType> {
        self.column(index).map(|col| col.value_type)
    }
}

#[derive(Debug, Default)]
pub struct ResultDescriptorBuilder {
    columns: Vec<ColumnDefinition>,
}

impl ResultDescriptorBuilder {
    /// Add a column read from the driver at `native_position`
    pub fn column(
        mut self,
        name: impl Into<String>,
        value_type: ValueType,
        native_position: usize,
    ) -> Self {
        self.columns
            .push(ColumnDefinition::new(name, value_type, native_position));
        self
    }

    /// Add a computed column
    pub fn computed(mut self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.columns.push(ColumnDefinition::computed(name, value_type));
        self
    }

    pub fn push(mut self, col: ColumnDefinition) -> Self {
        self.columns.push(col);
        self
    }

    pub fn build(self) -> ResultDescriptor {
        ResultDescriptor::new(self.columns)
    }
}
