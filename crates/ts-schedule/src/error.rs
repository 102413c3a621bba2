use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("scheduler configuration error: {0}")]
    Config(String),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
