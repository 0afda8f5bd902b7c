pub mod process_check;
pub mod process_claim;
pub mod process_create_merkle_tree;
pub mod process_status;
pub mod process_validate;

pub use process_check::*;
pub use process_claim::*;
pub use process_create_merkle_tree::*;
pub use process_status::*;
pub use process_validate::*;
