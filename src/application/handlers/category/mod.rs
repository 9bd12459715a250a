//! Category command and query handlers.

mod create_category;
mod delete_category;
mod list_categories;
mod update_category;

pub use create_category::{CreateCategoryCommand, CreateCategoryHandler};
pub use delete_category::{DeleteCategoryCommand, DeleteCategoryHandler};
pub use list_categories::ListCategoriesHandler;
pub use update_category::{UpdateCategoryCommand, UpdateCategoryHandler};
