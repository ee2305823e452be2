//! Categorical encoding
//!
//! Maps category strings to integer codes the way a label encoder does:
//! the sorted distinct classes are numbered from zero. Two ways of getting
//! the class list exist:
//!
//! - **Trained**: the classes seen at training time, shipped with the model.
//!   Codes are stable across requests and values outside the list fall into
//!   an explicit unknown bucket.
//! - **Per row**: an encoder fit on the single value being encoded. This
//!   always produces code 0 and carries no information; it is kept only to
//!   reproduce the legacy behaviour.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Category substituted for absent values before encoding
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// The categorical feature columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalColumn {
    Gender,
    Language,
    LocationType,
    VendorTag,
}

impl CategoricalColumn {
    pub const ALL: [CategoricalColumn; 4] = [
        CategoricalColumn::Gender,
        CategoricalColumn::Language,
        CategoricalColumn::LocationType,
        CategoricalColumn::VendorTag,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CategoricalColumn::Gender => "gender",
            CategoricalColumn::Language => "language",
            CategoricalColumn::LocationType => "location_type",
            CategoricalColumn::VendorTag => "vendor_tag",
        }
    }
}

impl fmt::Display for CategoricalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Label encoder over a fixed, sorted class list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEncoder {
    /// Distinct classes in ascending order; a class's code is its index
    classes: Vec<String>,
    /// Code for values outside `classes`. Defaults to the index of
    /// [`UNKNOWN_CATEGORY`] when trained with it, else one past the last class.
    #[serde(default)]
    unknown_code: Option<u32>,
}

impl CategoryEncoder {
    /// Fit on a set of observed values
    pub fn fit<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let classes: BTreeSet<&str> = values.into_iter().collect();
        Self {
            classes: classes.into_iter().map(str::to_string).collect(),
            unknown_code: None,
        }
    }

    /// Build from a stored class list, validating its order
    pub fn from_classes(classes: Vec<String>) -> Result<Self, EncoderError> {
        let encoder = Self {
            classes,
            unknown_code: None,
        };
        encoder.validate()?;
        Ok(encoder)
    }

    #[must_use]
    pub fn with_unknown_code(mut self, code: u32) -> Self {
        self.unknown_code = Some(code);
        self
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Classes must be strictly ascending so binary search and codes agree
    pub fn validate(&self) -> Result<(), EncoderError> {
        if self.classes.is_empty() {
            return Err(EncoderError::NoClasses);
        }
        if let Some(pair) = self.classes.windows(2).find(|w| w[0] >= w[1]) {
            return Err(EncoderError::Unsorted(pair[1].clone()));
        }
        if self.classes.len() > u32::MAX as usize {
            return Err(EncoderError::TooManyClasses(self.classes.len()));
        }
        Ok(())
    }

    pub fn unknown_code(&self) -> u32 {
        if let Some(code) = self.unknown_code {
            return code;
        }
        match self.lookup(UNKNOWN_CATEGORY) {
            Some(code) => code,
            None => self.classes.len() as u32,
        }
    }

    /// Encode a possibly absent value. Never fails.
    pub fn encode(&self, value: Option<&str>) -> u32 {
        let value = value.unwrap_or(UNKNOWN_CATEGORY);
        self.lookup(value).unwrap_or_else(|| self.unknown_code())
    }

    fn lookup(&self, value: &str) -> Option<u32> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(value))
            .ok()
            .map(|i| i as u32)
    }
}

/// Training-time encoders for every categorical column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEncoders {
    pub gender: CategoryEncoder,
    pub language: CategoryEncoder,
    pub location_type: CategoryEncoder,
    pub vendor_tag: CategoryEncoder,
}

impl CategoryEncoders {
    pub fn get(&self, column: CategoricalColumn) -> &CategoryEncoder {
        match column {
            CategoricalColumn::Gender => &self.gender,
            CategoricalColumn::Language => &self.language,
            CategoricalColumn::LocationType => &self.location_type,
            CategoricalColumn::VendorTag => &self.vendor_tag,
        }
    }

    pub fn validate(&self) -> Result<(), EncoderError> {
        for column in CategoricalColumn::ALL {
            self.get(column)
                .validate()
                .map_err(|e| EncoderError::Column(column, Box::new(e)))?;
        }
        Ok(())
    }
}

/// How categorical values become codes
#[derive(Debug, Clone, PartialEq)]
pub enum EncodingPolicy {
    /// Stable codes from the training-time class lists
    Trained(CategoryEncoders),
    /// Legacy: an encoder fit on the request's own value
    PerRow,
}

impl EncodingPolicy {
    pub fn encode(&self, column: CategoricalColumn, value: Option<&str>) -> u32 {
        match self {
            EncodingPolicy::Trained(encoders) => encoders.get(column).encode(value),
            EncodingPolicy::PerRow => {
                let value = value.unwrap_or(UNKNOWN_CATEGORY);
                CategoryEncoder::fit([value]).encode(Some(value))
            }
        }
    }

    pub fn is_trained(&self) -> bool {
        matches!(self, EncodingPolicy::Trained(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncoderError {
    #[error("Encoder has no classes")]
    NoClasses,

    #[error("Encoder classes are not strictly ascending at '{0}'")]
    Unsorted(String),

    #[error("Encoder has too many classes: {0}")]
    TooManyClasses(usize),

    #[error("Encoder for '{0}': {1}")]
    Column(CategoricalColumn, Box<EncoderError>),
}
