use sqlx::sqlite::SqliteRow;
use sqlx::FromRow;

/// A row type persisted in its own table with an integer `id` primary key.
pub trait Entity: for<'r> FromRow<'r, SqliteRow> + Send + Sync + Unpin + 'static {
    /// Table name
    const TABLE: &'static str;

    /// Writable columns, excluding `id`
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> i64;

    fn has_column(column: &str) -> bool {
        column == "id" || Self::COLUMNS.contains(&column)
    }
}

/// A bindable column value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

/// Column/value pairs used as an insert payload or an update patch.
///
/// Setting the same column twice keeps the last value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<(&'static str, Value)>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        let value = value.into();
        match self.0.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = value,
            None => self.0.push((column, value)),
        }
        self
    }

    /// Set only when a value is present
    pub fn set_opt<V: Into<Value>>(self, column: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.iter().find(|(c, _)| *c == column).map(|(_, v)| v)
    }

    /// Pairs whose column belongs to `E`'s writable schema; everything else is dropped
    pub fn writable<E: Entity>(&self) -> Vec<(&'static str, &Value)> {
        self.0
            .iter()
            .filter(|(c, _)| E::COLUMNS.contains(c))
            .map(|(c, v)| (*c, v))
            .collect()
    }
}

/// Conjunction of column equality conditions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(Vec<(&'static str, Value)>);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: i64) -> Self {
        Self::new().eq("id", id)
    }

    pub fn eq(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.0.push((column, value.into()));
        self
    }

    pub fn conditions(&self) -> &[(&'static str, Value)] {
        &self.0
    }
}
