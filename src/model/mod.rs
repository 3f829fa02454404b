pub mod config;
pub mod ids;
pub mod session;
pub mod task;
pub mod task_list;

pub use config::*;
pub use ids::*;
pub use session::*;
pub use task::*;
pub use task_list::*;
