use std::{fs::File, path::PathBuf, result, str::FromStr};

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::error::MerkleTreeError;

pub type Result<T> = result::Result<T, MerkleTreeError>;

/// Represents a single entry in a CSV of genesis recipients
#[derive(Debug, Clone, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct CsvEntry {
    /// Address of the recipient, hex encoded with or without checksum
    pub address: String,
}

impl CsvEntry {
    pub fn new_from_file(path: &PathBuf) -> Result<Vec<Self>> {
        let file = File::open(path)?;
        let mut rdr = csv::Reader::from_reader(file);

        let mut entries = Vec::new();
        for result in rdr.deserialize() {
            let record: CsvEntry = result?;
            entries.push(record);
        }

        Ok(entries)
    }

    pub fn to_address(&self) -> Result<Address> {
        Address::from_str(self.address.trim())
            .map_err(|_| MerkleTreeError::AddressParseError(self.address.clone()))
    }
}

/// Read a CSV of recipients straight into addresses
pub fn read_addresses(path: &PathBuf) -> Result<Vec<Address>> {
    CsvEntry::new_from_file(path)?
        .iter()
        .map(CsvEntry::to_address)
        .collect()
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    #[test]
    fn test_csv_parsing() {
        let path = PathBuf::from("./test_fixtures/test_csv.csv");
        let entries = CsvEntry::new_from_file(&path).expect("Failed to parse CSV");

        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries[0].address,
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
        assert_eq!(
            entries[0].to_address().unwrap(),
            address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );
    }

    #[test]
    fn test_invalid_address() {
        let entry = CsvEntry {
            address: "0x1234".to_string(),
        };
        assert!(matches!(
            entry.to_address(),
            Err(MerkleTreeError::AddressParseError(_))
        ));
    }
}
