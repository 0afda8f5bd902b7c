pub mod csv_entry;
pub mod error;
pub mod genesis_merkle_tree;
pub mod merkle_tree;
pub mod utils;
