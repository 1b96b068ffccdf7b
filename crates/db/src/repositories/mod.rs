//! Repository layer: one struct per table, static async methods over `&PgPool`.

pub mod layout_repo;

pub use layout_repo::DashboardLayoutRepo;
