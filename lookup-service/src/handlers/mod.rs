pub mod health;
pub mod metrics;
pub mod records;

pub use health::health_check;
pub use records::get_record;
pub use self::metrics::metrics;
