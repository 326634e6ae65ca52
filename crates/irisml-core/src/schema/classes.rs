//! Class label vocabulary.
//!
//! The index ordering matches the iris dataset's target encoding and is part
//! of the wire contract: probability vectors are aligned to `IrisClass::ALL`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Iris species labels (closed set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IrisClass {
    Setosa,
    Versicolor,
    Virginica,
}

impl IrisClass {
    /// All classes in dataset target order.
    pub const ALL: [IrisClass; 3] = [IrisClass::Setosa, IrisClass::Versicolor, IrisClass::Virginica];

    /// Label string as it appears in responses and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            IrisClass::Setosa => "setosa",
            IrisClass::Versicolor => "versicolor",
            IrisClass::Virginica => "virginica",
        }
    }

    /// Map a dataset target index back to its label.
    pub fn from_index(idx: usize) -> Option<IrisClass> {
        IrisClass::ALL.get(idx).copied()
    }
}

impl fmt::Display for IrisClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
