pub mod driver;
pub mod record;
pub mod registry;
pub mod stats;

pub use driver::{Sim, SimReport};
pub use record::ProcessRecord;
pub use registry::Registry;
pub use stats::{Summary, average_waiting_time};
