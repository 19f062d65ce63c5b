#![doc(test(attr(deny(warnings))))]

//! Rembees tracks personal income and expenses: a finance store persisted to
//! local key-value records, the reports derived from it, and a command line
//! front-end.

pub mod app;
pub mod cli;
pub mod errors;
pub mod utils;

pub use app::AppContext;
pub use errors::AppError;
pub use rembees_config as config;
pub use rembees_core as core;
pub use rembees_domain as domain;
pub use rembees_storage_json as storage;

/// Initializes global tracing with the default filter.
pub fn init() {
    utils::init_tracing(&rembees_config::Config::default_log_filter());
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
