//! Row types for the two recognised CSV layouts and the coercions applied while validating them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{de, Deserialize, Deserializer};

pub const ITEM_CODE: &str = "Item Code";
pub const MATERIAL: &str = "Material";
pub const QUANTITY: &str = "Quantity";
pub const ESTIMATED_RATE: &str = "Estimated Rate";

/// Header order of the supplier comparison layout. Tree uploads publish the same list.
pub const COMPARISON_HEADERS: [&str; 9] = [
    ITEM_CODE,
    MATERIAL,
    QUANTITY,
    ESTIMATED_RATE,
    "Supplier 1 (Rate)",
    "Supplier 2 (Rate)",
    "Supplier 3 (Rate)",
    "Supplier 4 (Rate)",
    "Supplier 5 (Rate)",
];

/// The fixed, non-supplier columns of the comparison layout.
pub const CORE_COLUMNS: [&str; 4] = [ITEM_CODE, MATERIAL, QUANTITY, ESTIMATED_RATE];

/// Which layout the user declared before uploading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatasetKind {
    #[default]
    Flat,
    Tree,
}

impl DatasetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Tree => "tree",
        }
    }

    /// Unknown values fall back to the comparison layout.
    pub fn from_value(value: &str) -> Self {
        match value {
            "tree" => Self::Tree,
            _ => Self::Flat,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Flat => "Supplier Comparison",
            Self::Tree => "Category Tree",
        }
    }
}

/// A single validated cell of a flat row.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) if !value.is_nan() => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(value) => write!(f, "{value}"),
        }
    }
}

/// Column name to value. Columns missing from the upload are simply absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatRow {
    cells: BTreeMap<String, CellValue>,
}

impl FlatRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: CellValue) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: CellValue) {
        self.cells.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(CellValue::as_number)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// One validated line of a supplier comparison upload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComparisonRow {
    #[serde(rename = "Item Code")]
    pub item_code: String,
    #[serde(rename = "Material")]
    pub material: String,
    #[serde(rename = "Quantity", deserialize_with = "number_cell")]
    pub quantity: f64,
    #[serde(rename = "Estimated Rate", deserialize_with = "number_cell")]
    pub estimated_rate: f64,
    #[serde(rename = "Supplier 1 (Rate)", default, deserialize_with = "optional_number_cell")]
    pub supplier_1: Option<f64>,
    #[serde(rename = "Supplier 2 (Rate)", default, deserialize_with = "optional_number_cell")]
    pub supplier_2: Option<f64>,
    #[serde(rename = "Supplier 3 (Rate)", default, deserialize_with = "optional_number_cell")]
    pub supplier_3: Option<f64>,
    #[serde(rename = "Supplier 4 (Rate)", default, deserialize_with = "optional_number_cell")]
    pub supplier_4: Option<f64>,
    #[serde(rename = "Supplier 5 (Rate)", default, deserialize_with = "optional_number_cell")]
    pub supplier_5: Option<f64>,
}

impl From<ComparisonRow> for FlatRow {
    fn from(row: ComparisonRow) -> Self {
        let mut flat = FlatRow::new()
            .with(ITEM_CODE, CellValue::Text(row.item_code))
            .with(MATERIAL, CellValue::Text(row.material))
            .with(QUANTITY, CellValue::Number(row.quantity))
            .with(ESTIMATED_RATE, CellValue::Number(row.estimated_rate));

        let suppliers = [
            row.supplier_1,
            row.supplier_2,
            row.supplier_3,
            row.supplier_4,
            row.supplier_5,
        ];
        for (header, rate) in COMPARISON_HEADERS[CORE_COLUMNS.len()..].iter().zip(suppliers) {
            if let Some(rate) = rate {
                flat.insert(*header, CellValue::Number(rate));
            }
        }
        flat
    }
}

/// One validated line of a bill-of-materials upload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HierarchyRow {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Sub Category 1")]
    pub sub_category_1: String,
    #[serde(rename = "Sub Category 2")]
    pub sub_category_2: String,
    #[serde(rename = "Item Code")]
    pub item_code: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Quantity", deserialize_with = "number_cell")]
    pub quantity: f64,
    #[serde(rename = "Rate", deserialize_with = "number_cell")]
    pub rate: f64,
}

/// Validated rows of either layout.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetRows {
    Flat(Vec<FlatRow>),
    Tree(Vec<HierarchyRow>),
}

impl DatasetRows {
    pub fn empty(kind: DatasetKind) -> Self {
        match kind {
            DatasetKind::Flat => Self::Flat(Vec::new()),
            DatasetKind::Tree => Self::Tree(Vec::new()),
        }
    }

    pub fn kind(&self) -> DatasetKind {
        match self {
            Self::Flat(_) => DatasetKind::Flat,
            Self::Tree(_) => DatasetKind::Tree,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Flat(rows) => rows.len(),
            Self::Tree(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DatasetRows {
    fn default() -> Self {
        Self::empty(DatasetKind::default())
    }
}

/// Every header containing "Rate" except the estimate itself, in header order.
pub fn supplier_headers(headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .filter(|header| header.contains("Rate") && header.as_str() != ESTIMATED_RATE)
        .cloned()
        .collect()
}

/// Permissive numeric cast: blank cells read as zero, anything unparsable or
/// non-finite (`NaN`, `inf`) is rejected.
pub fn coerce_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => None,
    }
}

fn number_cell<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    coerce_number(&raw).ok_or_else(|| de::Error::custom(format!("`{raw}` is not a number")))
}

fn optional_number_cell<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    number_cell(deserializer).map(Some)
}
