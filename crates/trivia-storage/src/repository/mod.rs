//! Database repositories for each table.

pub mod categories;
pub mod questions;

pub use categories::CategoriesRepo;
pub use questions::QuestionsRepo;
