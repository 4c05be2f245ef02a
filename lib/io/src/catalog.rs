use crate::{Error, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use supplier_match_core::{Catalog, SupplierRecord};

pub const ID_COLUMN: &str = "Id";
pub const NAME_COLUMN: &str = "SupplierName";

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "SupplierName")]
    name: String,
}

/// Loads the supplier catalog from a CSV file with a header row.
pub fn read_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let catalog = parse_catalog(file)?;
    tracing::debug!(path = %path.display(), suppliers = catalog.len(), "read supplier catalog");
    Ok(catalog)
}

/// Parses a supplier catalog from CSV. `Id` and `SupplierName` are
/// required, any other column is ignored and rows keep their file order.
pub fn parse_catalog<R: Read>(reader: R) -> Result<Catalog> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in [ID_COLUMN, NAME_COLUMN] {
        if !headers.iter().any(|h| h == column) {
            return Err(Error::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    for row in reader.deserialize::<CatalogRow>() {
        let row = row?;
        records.push(SupplierRecord::new(row.id, row.name));
    }
    Ok(Catalog::new(records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_catalog_ignores_extra_columns() {
        let data = "Id,SupplierName,Country\n7,Acme Corp,US\n9,\"Globex, Inc.\",DE\n";
        let catalog = parse_catalog(data.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap(), &SupplierRecord::new("7", "Acme Corp"));
        assert_eq!(catalog.get(1).unwrap().name, "Globex, Inc.");
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let data = "SupplierName,Id\nAcme Corp,7\n";
        let catalog = parse_catalog(data.as_bytes()).unwrap();
        assert_eq!(catalog.get(0).unwrap().id, "7");
    }

    #[test]
    fn test_missing_column() {
        let data = "Id,Name\n7,Acme Corp\n";
        assert!(matches!(
            parse_catalog(data.as_bytes()),
            Err(Error::MissingColumn("SupplierName"))
        ));
    }

    #[test]
    fn test_duplicate_id() {
        let data = "Id,SupplierName\n7,Acme Corp\n7,Acme Corporation\n";
        assert!(matches!(
            parse_catalog(data.as_bytes()),
            Err(Error::Core(supplier_match_core::Error::DuplicateSupplierId(_)))
        ));
    }

    #[test]
    fn test_header_only_is_empty() {
        let catalog = parse_catalog("Id,SupplierName\n".as_bytes()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_read_catalog_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Id,SupplierName").unwrap();
        writeln!(file, "1,Initech").unwrap();
        let catalog = read_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);

        assert!(matches!(
            read_catalog(file.path().with_extension("missing")),
            Err(Error::Io(_))
        ));
    }
}
