pub mod board;
pub mod task;

pub use board::{Board, BoardUser, PriorityLevel};
pub use task::{Category, Comment, ParseEnumError, Priority, Status, Task};
