//! Replace-on-refresh entity sequences
//!
//! Every sequence the dashboard shows, whether it comes from the built-in
//! reference data or from the stats endpoint, lives in a [`Dataset`]. The only
//! way to change one is [`Dataset::replace`], which swaps the whole sequence
//! in one pointer exchange. Readers take an `Arc` snapshot and never see a
//! partially written sequence.

use std::sync::Arc;

/// Where a dataset's current contents came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Built-in defaults loaded at startup
    Static,
    /// Normalized from a fetched payload
    Network,
}

/// An immutable entity sequence with a replace-only contract
///
/// # Examples
///
/// ```
/// use fleet_pilot_core::dataset::{DataSource, Dataset};
///
/// let mut ds = Dataset::from_static(vec![1, 2, 3]);
/// let before = ds.snapshot();
///
/// ds.replace(vec![4, 5, 6], DataSource::Network);
///
/// assert_eq!(&*before, &[1, 2, 3]);
/// assert_eq!(ds.items(), &[4, 5, 6]);
/// assert_eq!(ds.revision(), 1);
/// ```
#[derive(Debug)]
pub struct Dataset<T> {
    items: Arc<[T]>,
    source: DataSource,
    revision: u64,
}

impl<T> Clone for Dataset<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            source: self.source,
            revision: self.revision,
        }
    }
}

impl<T> Dataset<T> {
    /// Create a dataset holding built-in defaults
    pub fn from_static(items: Vec<T>) -> Self {
        Self {
            items: items.into(),
            source: DataSource::Static,
            revision: 0,
        }
    }

    /// Replace the whole sequence
    pub fn replace(&mut self, items: Vec<T>, source: DataSource) {
        self.items = items.into();
        self.source = source;
        self.revision += 1;
    }

    /// Borrow the current items
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Take a shared snapshot of the current items
    pub fn snapshot(&self) -> Arc<[T]> {
        Arc::clone(&self.items)
    }

    pub fn source(&self) -> DataSource {
        self.source
    }

    /// Number of replacements since load
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
