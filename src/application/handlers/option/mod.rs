//! Option and pro/con command handlers.
//!
//! Every handler loads the owning decision, mutates it and writes the whole
//! aggregate back with one compare-and-swap update.

mod add_option;
mod add_pro_con;
mod remove_option;
mod remove_pro_con;
mod reorder_options;
mod update_option;
mod update_pro_con;

pub use add_option::{AddOptionCommand, AddOptionHandler, AddOptionResult};
pub use add_pro_con::{AddProConCommand, AddProConHandler, AddProConResult};
pub use remove_option::{RemoveOptionCommand, RemoveOptionHandler};
pub use remove_pro_con::{RemoveProConCommand, RemoveProConHandler};
pub use reorder_options::{ReorderOptionsCommand, ReorderOptionsHandler};
pub use update_option::{UpdateOptionCommand, UpdateOptionHandler};
pub use update_pro_con::{UpdateProConCommand, UpdateProConHandler};
