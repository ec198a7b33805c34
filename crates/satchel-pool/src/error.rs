#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("all workers have stopped")]
    WorkersStopped,
}

pub type Result<T> = std::result::Result<T, Error>;
