pub mod summary;
pub mod transaction;

pub use summary::Summary;
pub use transaction::{
    DeletedTransaction, NewTransaction, Transaction, TransactionListing, TransactionPage,
    TransactionPayload, TransactionType,
};
