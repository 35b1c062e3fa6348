pub mod accounts;
pub mod chat;
pub mod conditions;
pub mod documents;
pub mod health;
pub mod linked_accounts;
pub mod medications;
pub mod search;
pub mod sessions;
pub mod shares;
pub mod terra;
pub mod timeline;
pub mod wearables;
