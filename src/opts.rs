use std::borrow::Cow;

use smart_default::SmartDefault;

use crate::error::Error;

/// A configuration for [`ResultSet`](crate::result_set::ResultSet)
///
/// ```rs
/// let mut opts1 = Opts::default();
/// opts1.max_rows = 500;
///
/// let opts2 = Opts::try_from("csv://localhost/data/orders.csv?max_rows=500")?;
/// let opts3 = Opts::try_from("max_rows=500&close_on_drop=false")?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, SmartDefault)]
pub struct Opts {
    /// Upper bound on rows fetched from the driver; 0 means unlimited
    pub max_rows: u32,

    /// Close the driver cursor when the result set is dropped without `close()`
    #[default = true]
    pub close_on_drop: bool,
}

impl Opts {
    fn apply<'a>(
        mut self,
        pairs: impl Iterator<Item = (Cow<'a, str>, Cow<'a, str>)>,
    ) -> Result<Self, Error> {
        for (key, value) in pairs {
            match key.as_ref() {
                "max_rows" => {
                    self.max_rows = value.parse().map_err(|e| {
                        Error::BadConfigError(format!("Invalid max_rows '{}': {}", value, e))
                    })?;
                }
                "close_on_drop" => {
                    self.close_on_drop = parse_bool(&value).ok_or_else(|| {
                        Error::BadConfigError(format!("Invalid close_on_drop '{}'", value))
                    })?;
                }
                _ => {}
            }
        }
        Ok(self)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "true" | "True" | "TRUE" => Some(true),
        "0" | "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

impl TryFrom<&str> for Opts {
    type Error = Error;

    /// Accepts a data source URL carrying options in its query, or a bare query string
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if s.contains("://") {
            let parsed = url::Url::parse(s)
                .map_err(|e| Error::BadConfigError(format!("Failed to parse URL: {}", e)))?;
            Self::default().apply(parsed.query_pairs())
        } else {
            let query = s.strip_prefix('?').unwrap_or(s);
            Self::default().apply(url::form_urlencoded::parse(query.as_bytes()))
        }
    }
}
