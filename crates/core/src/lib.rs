pub mod books;
pub mod credentials;
pub mod error;
pub mod pagination;
pub mod types;
