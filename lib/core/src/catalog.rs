use crate::normalizer::TextNormalizer;
use crate::{Error, Result};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the supplier catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SupplierRecord {
    pub id: String,
    pub name: String,
}

impl SupplierRecord {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Supplier catalog in load order. Row positions are the neighbor-index rows.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<SupplierRecord>,
}

impl Catalog {
    /// # Errors
    ///
    /// `DuplicateSupplierId` if two records share an id.
    pub fn new(records: Vec<SupplierRecord>) -> Result<Self> {
        let mut seen: AHashSet<&str> = AHashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(Error::DuplicateSupplierId(record.id.clone()));
            }
        }
        Ok(Self { records })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn get(&self, row: usize) -> Option<&SupplierRecord> {
        self.records.get(row)
    }

    #[inline]
    pub fn records(&self) -> &[SupplierRecord] {
        &self.records
    }

    /// Normalized names in row order
    pub fn normalized_names(&self, normalizer: &TextNormalizer) -> Vec<String> {
        self.records
            .iter()
            .map(|r| normalizer.normalize(&r.name))
            .collect()
    }
}

/// The resolved supplier for one invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub supplier_id: String,
    pub supplier_name: String,
}

impl From<&SupplierRecord> for MatchResult {
    fn from(record: &SupplierRecord) -> Self {
        Self {
            supplier_id: record.id.clone(),
            supplier_name: record.name.clone(),
        }
    }
}

/// Renders as a tuple: `(42, 'Acme Corp')`. Integer ids print bare, any
/// other id is quoted like the name: `('S-001', 'Acme Corp')`.
impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = quote(&self.supplier_name);
        if self.supplier_id.parse::<i64>().is_ok() {
            write!(f, "({}, {})", self.supplier_id, name)
        } else {
            write!(f, "({}, {})", quote(&self.supplier_id), name)
        }
    }
}

fn quote(s: &str) -> String {
    let delim = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(delim);
    for c in s.chars() {
        if c == '\\' || c == delim {
            out.push('\\');
        }
        out.push(c);
    }
    out.push(delim);
    out
}
