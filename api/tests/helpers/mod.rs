pub mod app;
pub mod seed;

pub use app::{make_test_app, test_cipher};
pub use seed::{seed_bare_ticket, seed_ticket, seed_ticket_created_by};
