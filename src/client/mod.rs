//! Client-side data layer: a typed HTTP client for the transactions API, the
//! application state it feeds, and a [`Store`] tying the two together.

pub mod api;
pub mod state;
pub mod store;

pub use api::{ApiClient, ClientError};
pub use state::{Operation, RequestStatus, TransactionsState};
pub use store::Store;
