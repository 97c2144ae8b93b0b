pub mod lookup;
pub mod metrics;

pub use lookup::{LookupOutcome, LookupService};
pub use self::metrics::{get_metrics, init_metrics};
