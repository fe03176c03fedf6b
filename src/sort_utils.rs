/// Sort direction for list results.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Desc,
    Asc,
}

impl SortDirection {
    pub fn sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Trait for column enums. Each sortable listing defines its own column enum
/// implementing this trait.
pub trait SortableColumn: Sized + Default + Clone + PartialEq {
    /// Parse column name from query string parameter.
    fn from_str(s: &str) -> Option<Self>;

    /// SQL expression for ORDER BY clause (e.g., "t.date", "t.amount_cents").
    fn sql_expression(&self) -> &'static str;
}

/// A parsed sort specification in the `field` / `-field` form, where a
/// leading `-` means descending.
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec<C: SortableColumn> {
    pub column: C,
    pub direction: SortDirection,
}

impl<C: SortableColumn> SortSpec<C> {
    /// Parse `date`, `-date`, `+amount` and so on. An unknown column falls
    /// back to the default sort.
    pub fn parse(spec: &str) -> Self {
        let spec = spec.trim();
        let (direction, name) = match spec.strip_prefix('-') {
            Some(rest) => (SortDirection::Desc, rest),
            None => (SortDirection::Asc, spec.strip_prefix('+').unwrap_or(spec)),
        };

        match C::from_str(name) {
            Some(column) => Self { column, direction },
            None => Self::default(),
        }
    }

    /// Generate SQL ORDER BY expression (e.g., "t.date DESC").
    pub fn sql_order_by(&self) -> String {
        format!("{} {}", self.column.sql_expression(), self.direction.sql())
    }
}

impl<C: SortableColumn> Default for SortSpec<C> {
    fn default() -> Self {
        Self {
            column: C::default(),
            direction: SortDirection::default(),
        }
    }
}
