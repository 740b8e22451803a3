pub mod drafts;
pub mod handlers;
pub mod models;
