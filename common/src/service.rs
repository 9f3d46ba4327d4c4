// Periodic task use-case: turns validated parameters into a timestamp list

use crate::errors::PeriodicTaskError;
use crate::models::PtList;
use crate::query::ListQueryParams;
use crate::schedule::PeriodicTask;

/// Service computing the invocation timestamps of a periodic task
pub trait PeriodicTaskService: Send + Sync {
    fn get_list(&self, params: &ListQueryParams) -> Result<PtList, PeriodicTaskError>;
}

/// Default [`PeriodicTaskService`] backed by the schedule module
#[derive(Debug, Clone, Default)]
pub struct PeriodicTaskUseCase {
    max_points: Option<usize>,
}

impl PeriodicTaskUseCase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse requests that would produce more than `max_points` timestamps
    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = Some(max_points);
        self
    }
}

impl PeriodicTaskService for PeriodicTaskUseCase {
    #[tracing::instrument(level = "trace", skip(self))]
    fn get_list(&self, params: &ListQueryParams) -> Result<PtList, PeriodicTaskError> {
        let task = PeriodicTask::new(params.period, params.timezone, params.t1)?;

        let list = match self.max_points {
            Some(max_points) => task.list_until_bounded(params.t2, max_points)?,
            None => task.list_until(params.t2),
        };

        tracing::debug!(
            period = %params.period,
            timezone = %params.timezone,
            points = list.len(),
            "Computed invocation points"
        );

        Ok(list)
    }
}
