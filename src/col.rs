use crate::value::ValueType;

/// Column of a [`ResultDescriptor`](crate::descriptor::ResultDescriptor)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: String,
    pub alias: Option<String>,
    pub value_type: ValueType,
    /// Computed columns are not read from the driver
    pub is_virtual: bool,
    /// 1-based column position in the driver's result. Unused for computed columns.
    pub native_position: usize,
}

impl ColumnDefinition {
    /// A column read from the driver at `native_position`
    pub fn new(name: impl Into<String>, value_type: ValueType, native_position: usize) -> Self {
        Self {
            name: name.into(),
            alias: None,
            value_type,
            is_virtual: false,
            native_position,
        }
    }

    /// A column the adapter leaves unset, to be filled by a later stage
    pub fn computed(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            alias: None,
            value_type,
            is_virtual: true,
            native_position: 0,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Whether `name` refers to this column, by name or alias, ignoring ASCII case
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self
                .alias
                .as_deref()
                .is_some_and(|alias| alias.eq_ignore_ascii_case(name))
    }
}
