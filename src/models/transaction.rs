use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::date_utils::parse_date_input;
use crate::models::amount::{self, AmountInput};
use crate::models::category::{Category, TransactionType};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Amount must be a number")]
    InvalidAmount,

    #[error("Amount must be greater than 0")]
    NonPositiveAmount,

    #[error("Amount must not exceed {}", amount::to_decimal(amount::MAX_AMOUNT_CENTS))]
    AmountTooLarge,

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown transaction type: {0}")]
    UnknownType(String),

    #[error("Category {category} is not valid for {transaction_type} transactions")]
    CategoryNotAllowed {
        category: Category,
        transaction_type: TransactionType,
    },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("{0}")]
    InvalidQuery(String),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

/// A stored transaction. The amount is always positive; the direction of the
/// money flow comes from `transaction_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub title: String,
    #[serde(rename = "amount", with = "amount::decimal")]
    pub amount_cents: i64,
    pub category: Category,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }
}

/// Validated fields for a transaction that has not been stored yet. A missing
/// `date` is filled in with the creation time by storage.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub title: String,
    pub amount_cents: i64,
    pub category: Category,
    pub transaction_type: TransactionType,
    pub date: Option<DateTime<Utc>>,
}

/// Raw body of a create request. Every field is optional here so that a
/// missing one is reported as a validation error rather than a decode error.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTransactionRequest {
    pub title: Option<String>,
    pub amount: Option<AmountInput>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub date: Option<String>,
}

impl CreateTransactionRequest {
    pub fn validate(self) -> Result<NewTransaction, ValidationError> {
        let title = parse_title(self.title.as_deref().ok_or(ValidationError::MissingField("title"))?)?;
        let amount_cents = parse_amount(
            self.amount
                .as_ref()
                .ok_or(ValidationError::MissingField("amount"))?,
        )?;
        let category = parse_category(
            self.category
                .as_deref()
                .ok_or(ValidationError::MissingField("category"))?,
        )?;
        let transaction_type = parse_type(
            self.transaction_type
                .as_deref()
                .ok_or(ValidationError::MissingField("type"))?,
        )?;
        let date = self.date.as_deref().map(parse_date).transpose()?;

        check_category(category, transaction_type)?;

        Ok(NewTransaction {
            title,
            amount_cents,
            category,
            transaction_type,
            date,
        })
    }
}

/// Raw body of an update request. Omitted and `null` fields keep their
/// stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTransactionRequest {
    pub title: Option<String>,
    pub amount: Option<AmountInput>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub date: Option<String>,
}

impl UpdateTransactionRequest {
    /// Validate each present field. A present but invalid value (an empty
    /// title, a zero amount) is an error, never a no-op.
    pub fn validate(self) -> Result<TransactionPatch, ValidationError> {
        Ok(TransactionPatch {
            title: self.title.as_deref().map(parse_title).transpose()?,
            amount_cents: self.amount.as_ref().map(parse_amount).transpose()?,
            category: self.category.as_deref().map(parse_category).transpose()?,
            transaction_type: self
                .transaction_type
                .as_deref()
                .map(parse_type)
                .transpose()?,
            date: self.date.as_deref().map(parse_date).transpose()?,
        })
    }
}

/// A partial update. `None` means "keep the existing value".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub title: Option<String>,
    pub amount_cents: Option<i64>,
    pub category: Option<Category>,
    pub transaction_type: Option<TransactionType>,
    pub date: Option<DateTime<Utc>>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the patch on top of `existing`, checking that the resulting
    /// category is still allowed for the resulting type.
    pub fn merge(&self, existing: &Transaction) -> Result<Transaction, ValidationError> {
        let merged = Transaction {
            id: existing.id.clone(),
            title: self.title.clone().unwrap_or_else(|| existing.title.clone()),
            amount_cents: self.amount_cents.unwrap_or(existing.amount_cents),
            category: self.category.unwrap_or(existing.category),
            transaction_type: self.transaction_type.unwrap_or(existing.transaction_type),
            date: self.date.unwrap_or(existing.date),
            created_at: existing.created_at,
            updated_at: existing.updated_at,
        };
        check_category(merged.category, merged.transaction_type)?;
        Ok(merged)
    }
}

fn parse_title(raw: &str) -> Result<String, ValidationError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(title.to_string())
}

fn parse_amount(raw: &AmountInput) -> Result<i64, ValidationError> {
    let value = raw.value().ok_or(ValidationError::InvalidAmount)?;
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveAmount);
    }
    let cents = amount::from_decimal(value)
        .filter(|cents| *cents <= amount::MAX_AMOUNT_CENTS)
        .ok_or(ValidationError::AmountTooLarge)?;
    if cents == 0 {
        return Err(ValidationError::NonPositiveAmount);
    }
    Ok(cents)
}

fn parse_category(raw: &str) -> Result<Category, ValidationError> {
    raw.parse()
        .map_err(|_| ValidationError::UnknownCategory(raw.to_string()))
}

fn parse_type(raw: &str) -> Result<TransactionType, ValidationError> {
    raw.parse()
        .map_err(|_| ValidationError::UnknownType(raw.to_string()))
}

fn parse_date(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    parse_date_input(raw).ok_or_else(|| ValidationError::InvalidDate(raw.to_string()))
}

fn check_category(
    category: Category,
    transaction_type: TransactionType,
) -> Result<(), ValidationError> {
    if category.is_valid_for(transaction_type) {
        Ok(())
    } else {
        Err(ValidationError::CategoryNotAllowed {
            category,
            transaction_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_request() -> CreateTransactionRequest {
        CreateTransactionRequest {
            title: Some("  Groceries ".into()),
            amount: Some(AmountInput::Number(42.5)),
            category: Some("Food".into()),
            transaction_type: Some("expense".into()),
            date: None,
        }
    }

    fn stored() -> Transaction {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        Transaction {
            id: "abc".into(),
            title: "Salary".into(),
            amount_cents: 500_000,
            category: Category::Salary,
            transaction_type: TransactionType::Income,
            date: ts,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_valid_create_request() {
        let new = create_request().validate().unwrap();
        assert_eq!(new.title, "Groceries");
        assert_eq!(new.amount_cents, 4250);
        assert_eq!(new.category, Category::Food);
        assert_eq!(new.transaction_type, TransactionType::Expense);
        assert_eq!(new.date, None);
    }

    #[test]
    fn test_create_requires_every_field() {
        let mut req = create_request();
        req.title = None;
        assert_eq!(req.validate(), Err(ValidationError::MissingField("title")));

        let mut req = create_request();
        req.amount = None;
        assert_eq!(req.validate(), Err(ValidationError::MissingField("amount")));

        let mut req = create_request();
        req.category = None;
        assert_eq!(req.validate(), Err(ValidationError::MissingField("category")));

        let mut req = create_request();
        req.transaction_type = None;
        assert_eq!(req.validate(), Err(ValidationError::MissingField("type")));
    }

    #[test]
    fn test_create_rejects_blank_title() {
        let mut req = create_request();
        req.title = Some("   ".into());
        assert_eq!(req.validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_create_rejects_non_positive_amounts() {
        for amount in [0.0, -5.0, 0.001] {
            let mut req = create_request();
            req.amount = Some(AmountInput::Number(amount));
            assert_eq!(
                req.validate(),
                Err(ValidationError::NonPositiveAmount),
                "amount {amount} should be rejected"
            );
        }
    }

    #[test]
    fn test_create_amount_upper_bound() {
        let mut req = create_request();
        req.amount = Some(AmountInput::Number(1_000_000_000.0));
        assert_eq!(req.validate().unwrap().amount_cents, amount::MAX_AMOUNT_CENTS);

        for raw in [
            AmountInput::Number(1_000_000_000.01),
            AmountInput::Number(1e17),
            AmountInput::Text("1e300".into()),
        ] {
            let mut req = create_request();
            req.amount = Some(raw.clone());
            assert_eq!(
                req.validate(),
                Err(ValidationError::AmountTooLarge),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_patch_rejects_amount_above_maximum() {
        let req = UpdateTransactionRequest {
            amount: Some(AmountInput::Number(1e17)),
            ..Default::default()
        };
        assert_eq!(req.validate(), Err(ValidationError::AmountTooLarge));
    }

    #[test]
    fn test_create_rejects_category_of_other_type() {
        let mut req = create_request();
        req.category = Some("Salary".into());
        assert_eq!(
            req.validate(),
            Err(ValidationError::CategoryNotAllowed {
                category: Category::Salary,
                transaction_type: TransactionType::Expense,
            })
        );
    }

    #[test]
    fn test_create_rejects_unknown_enums() {
        let mut req = create_request();
        req.category = Some("Groceries".into());
        assert_eq!(
            req.validate(),
            Err(ValidationError::UnknownCategory("Groceries".into()))
        );

        let mut req = create_request();
        req.transaction_type = Some("transfer".into());
        assert_eq!(
            req.validate(),
            Err(ValidationError::UnknownType("transfer".into()))
        );
    }

    #[test]
    fn test_create_parses_optional_date() {
        let mut req = create_request();
        req.date = Some("2024-02-01".into());
        let new = req.validate().unwrap();
        assert_eq!(new.date, Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()));

        let mut req = create_request();
        req.date = Some("soon".into());
        assert_eq!(req.validate(), Err(ValidationError::InvalidDate("soon".into())));
    }

    #[test]
    fn test_patch_keeps_omitted_fields() {
        let patch = UpdateTransactionRequest {
            title: Some("Bonus".into()),
            ..Default::default()
        }
        .validate()
        .unwrap();

        let merged = patch.merge(&stored()).unwrap();
        assert_eq!(merged.title, "Bonus");
        assert_eq!(merged.amount_cents, 500_000);
        assert_eq!(merged.category, Category::Salary);
        assert_eq!(merged.id, "abc");
    }

    #[test]
    fn test_patch_present_zero_amount_is_rejected_not_ignored() {
        let req = UpdateTransactionRequest {
            amount: Some(AmountInput::Number(0.0)),
            ..Default::default()
        };
        assert_eq!(req.validate(), Err(ValidationError::NonPositiveAmount));
    }

    #[test]
    fn test_patch_present_empty_title_is_rejected_not_ignored() {
        let req = UpdateTransactionRequest {
            title: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(req.validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_patch_type_change_must_fit_category() {
        let patch = TransactionPatch {
            transaction_type: Some(TransactionType::Expense),
            ..Default::default()
        };
        assert!(matches!(
            patch.merge(&stored()),
            Err(ValidationError::CategoryNotAllowed { .. })
        ));

        let patch = TransactionPatch {
            transaction_type: Some(TransactionType::Expense),
            category: Some(Category::Bills),
            ..Default::default()
        };
        let merged = patch.merge(&stored()).unwrap();
        assert!(merged.is_expense());
        assert_eq!(merged.category, Category::Bills);
    }

    #[test]
    fn test_empty_patch() {
        assert!(UpdateTransactionRequest::default().validate().unwrap().is_empty());
    }

    #[test]
    fn test_transaction_serializes_with_decimal_amount() {
        let json = serde_json::to_value(stored()).unwrap();
        assert_eq!(json["amount"], serde_json::json!(5000.0));
        assert_eq!(json["type"], "income");
        assert_eq!(json["category"], "Salary");
        assert!(json.get("createdAt").is_some());
    }
}
