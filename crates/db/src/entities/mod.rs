//! `SeaORM` entity definitions.

pub mod admin_jobs;
pub mod credit_accounts;
pub mod credit_transactions;
pub mod document_sequences;
pub mod jobs;
pub mod offline_jobs;
pub mod product_prices;
pub mod products;
pub mod published_jobs;
pub mod sea_orm_active_enums;
