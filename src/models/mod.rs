pub mod amount;
pub mod category;
pub mod transaction;

pub use amount::AmountInput;
pub use category::{Category, TransactionType};
pub use transaction::{
    CreateTransactionRequest, NewTransaction, Transaction, TransactionPatch,
    UpdateTransactionRequest, ValidationError,
};
