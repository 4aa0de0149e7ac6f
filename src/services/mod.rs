pub mod summary;
pub mod trends;
