use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::Category;
use super::model::ModelError;

/// Static weights: answer choice -> category -> contribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreTable {
    entries: BTreeMap<String, BTreeMap<Category, f64>>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a choice that contributes nothing.
    pub fn declare(&mut self, choice: impl Into<String>) {
        self.entries.entry(choice.into()).or_default();
    }

    pub fn set(&mut self, choice: impl Into<String>, category: impl Into<Category>, weight: f64) {
        self.entries
            .entry(choice.into())
            .or_default()
            .insert(category.into(), weight);
    }

    pub fn with(
        mut self,
        choice: impl Into<String>,
        category: impl Into<Category>,
        weight: f64,
    ) -> Self {
        self.set(choice, category, weight);
        self
    }

    pub fn contributions(&self, choice: &str) -> Option<&BTreeMap<Category, f64>> {
        self.entries.get(choice)
    }

    pub fn contains(&self, choice: &str) -> bool {
        self.entries.contains_key(choice)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &BTreeMap<Category, f64>)> {
        self.entries.iter()
    }

    /// Every category that receives at least one contribution.
    pub fn categories(&self) -> BTreeSet<&Category> {
        self.entries
            .values()
            .flat_map(|weights| weights.keys())
            .collect()
    }

    /// Reads `choice,category,weight` rows. A row with an empty category declares the choice.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, ModelError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut table = ScoreTable::new();
        for row in csv_reader.deserialize::<TableRow>() {
            let row = row?;
            match row.category {
                Some(category) => {
                    let weight = row.weight.ok_or_else(|| ModelError::MissingWeight {
                        choice: row.choice.clone(),
                        category: Category::new(category.clone()),
                    })?;
                    table.set(row.choice, category, weight);
                }
                None => table.declare(row.choice),
            }
        }

        Ok(table)
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_csv_reader(file)
    }
}

#[derive(Debug, Deserialize)]
struct TableRow {
    choice: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    category: Option<String>,
    #[serde(default)]
    weight: Option<f64>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
