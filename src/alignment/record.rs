//! Alignment records and their ordered collection.

/// A named sequence of an alignment.
///
/// The sequence is kept as an opaque string; no alphabet or length checks
/// are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    name: String,
    description: Option<String>,
    sequence: String,
}

impl AlignmentRecord {
    /// Creates a new record without description.
    pub fn new(name: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sequence: sequence.into(),
        }
    }

    /// Attaches a description (FASTA header text after the name).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }
}

/// An ordered sequence of [AlignmentRecord]s.
///
/// Record order is significant and preserved by every operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alignment {
    records: Vec<AlignmentRecord>,
}

impl Alignment {
    /// Creates an empty alignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an alignment from records, keeping their order.
    pub fn from_records(records: Vec<AlignmentRecord>) -> Self {
        Self { records }
    }

    /// Appends a record.
    pub fn push(&mut self, record: AlignmentRecord) {
        self.records.push(record);
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the alignment has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the records in order.
    pub fn records(&self) -> &[AlignmentRecord] {
        &self.records
    }

    /// Returns an iterator over the records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, AlignmentRecord> {
        self.records.iter()
    }

    /// Returns the first record with the given name.
    pub fn get(&self, name: &str) -> Option<&AlignmentRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Returns the record names in order.
    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name()).collect()
    }

    /// Consumes the alignment and returns its records.
    pub fn into_records(self) -> Vec<AlignmentRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a Alignment {
    type Item = &'a AlignmentRecord;
    type IntoIter = std::slice::Iter<'a, AlignmentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Concatenates two alignments: all records of `first`, then all records of
/// `second`, each in their own order.
///
/// No deduplication and no check that sequence lengths agree.
///
/// # Example
/// ```
/// use ancestree::alignment::{merge, Alignment, AlignmentRecord};
///
/// let leaves = Alignment::from_records(vec![AlignmentRecord::new("A", "ACGT")]);
/// let ancestors = Alignment::from_records(vec![AlignmentRecord::new("Node1", "ACNT")]);
/// let combined = merge(leaves, ancestors);
/// assert_eq!(combined.names(), vec!["A", "Node1"]);
/// ```
pub fn merge(first: Alignment, second: Alignment) -> Alignment {
    let mut records = first.records;
    records.extend(second.records);
    Alignment { records }
}
