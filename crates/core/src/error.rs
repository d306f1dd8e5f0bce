use thiserror::Error;

use crate::types::TaskId;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("no compatible machine for task {task}")]
    NoCompatibleMachine { task: TaskId },
}
