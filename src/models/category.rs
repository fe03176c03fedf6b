use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a transaction brings money in or takes it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Categories a transaction of this type may be filed under.
    pub fn categories(&self) -> &'static [Category] {
        match self {
            Self::Income => INCOME_CATEGORIES,
            Self::Expense => EXPENSE_CATEGORIES,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(()),
        }
    }
}

/// The closed set of transaction categories shared by validation, storage and
/// aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Salary,
    Freelance,
    Investment,
    Business,
    Food,
    Transportation,
    Entertainment,
    Bills,
    Shopping,
    Healthcare,
    Education,
    Other,
}

const INCOME_CATEGORIES: &[Category] = &[
    Category::Salary,
    Category::Freelance,
    Category::Investment,
    Category::Business,
    Category::Other,
];

const EXPENSE_CATEGORIES: &[Category] = &[
    Category::Food,
    Category::Transportation,
    Category::Entertainment,
    Category::Shopping,
    Category::Bills,
    Category::Healthcare,
    Category::Education,
    Category::Other,
];

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Self::Salary,
            Self::Freelance,
            Self::Investment,
            Self::Business,
            Self::Food,
            Self::Transportation,
            Self::Entertainment,
            Self::Bills,
            Self::Shopping,
            Self::Healthcare,
            Self::Education,
            Self::Other,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Freelance => "Freelance",
            Self::Investment => "Investment",
            Self::Business => "Business",
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Bills => "Bills",
            Self::Shopping => "Shopping",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Other => "Other",
        }
    }

    pub fn is_valid_for(&self, transaction_type: TransactionType) -> bool {
        transaction_type.categories().contains(self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or(())
    }
}
