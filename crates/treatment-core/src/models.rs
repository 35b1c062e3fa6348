pub mod account;
pub mod condition;
pub mod document;
pub mod linked_account;
pub mod medication;
pub mod session;
pub mod share;
pub mod timeline;
pub mod wearable;
