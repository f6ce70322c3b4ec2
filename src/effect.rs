//! Effects - side effects declared by the reducer

use crate::loader::DataSource;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Retrieve the dataset from the given source
    LoadDataset { source: DataSource },
}
