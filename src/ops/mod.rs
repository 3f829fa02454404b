pub mod board;
pub mod task_ops;

pub use board::Board;
pub use task_ops::TaskError;
