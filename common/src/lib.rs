// Shared library for the periodic task service: period parsing, invocation
// point calculation, timestamp list generation and the ambient stack
// (configuration, errors, telemetry) used by the api binary.

pub mod config;
pub mod errors;
pub mod models;
pub mod period;
pub mod query;
pub mod schedule;
pub mod service;
pub mod telemetry;
pub mod timestamp;

pub use errors::PeriodicTaskError;
pub use models::{Period, PeriodUnit, PtList};
pub use query::ListQueryParams;
pub use schedule::{generate_list, invocation_point, PeriodicTask};
pub use service::{PeriodicTaskService, PeriodicTaskUseCase};
