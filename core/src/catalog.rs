use crate::error::CatalogLoadError;
use crate::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const TITLE_COLUMN: &str = "title";
pub const INDEX_COLUMN: &str = "index";

/// Rows of named text cells as handed over by a data source. `None` is a null cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self { Self { columns, rows: Vec::new() } }

    pub fn column(&self, name: &str) -> Option<usize> { self.columns.iter().position(|c| c == name) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    /// Non-empty cells of every column other than title and index.
    pub fields: HashMap<String, String>,
}

impl Item {
    /// Value of a feature column, empty when the cell was null or the column does not exist.
    pub fn feature(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }
}

/// The loaded item table. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    columns: Vec<String>,
    // id -> position of the first item carrying it
    positions: HashMap<ItemId, usize>,
}

impl Catalog {
    /// Build a catalog from a table. Identifiers come from the `index` column when the
    /// table has one (trusted as-is), otherwise they are assigned 0..N-1 in row order.
    pub fn load(table: Table) -> Result<Self, CatalogLoadError> {
        let title_col = table.column(TITLE_COLUMN).ok_or(CatalogLoadError::MissingTitleColumn)?;
        let index_col = table.column(INDEX_COLUMN);

        let mut items = Vec::with_capacity(table.rows.len());
        let mut positions = HashMap::with_capacity(table.rows.len());
        for (row_no, row) in table.rows.into_iter().enumerate() {
            let cell = |i: usize| row.get(i).cloned().flatten();
            let id = match index_col {
                Some(i) => parse_id(row_no, cell(i))?,
                None => row_no as ItemId,
            };
            let title = cell(title_col).unwrap_or_default();
            let mut fields = HashMap::new();
            for (i, name) in table.columns.iter().enumerate() {
                if i == title_col || Some(i) == index_col { continue; }
                if let Some(value) = cell(i).filter(|v| !v.is_empty()) {
                    fields.insert(name.clone(), value);
                }
            }
            positions.entry(id).or_insert(items.len());
            items.push(Item { id, title, fields });
        }

        tracing::info!(items = items.len(), backfilled_ids = index_col.is_none(), "catalog loaded");
        Ok(Self { items, columns: table.columns, positions })
    }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn items(&self) -> &[Item] { &self.items }

    /// Item at a row position (catalog order).
    pub fn get(&self, position: usize) -> Option<&Item> { self.items.get(position) }

    /// Row position of the first item carrying `id`.
    pub fn position_of_id(&self, id: ItemId) -> Option<usize> { self.positions.get(&id).copied() }

    pub fn by_id(&self, id: ItemId) -> Option<&Item> {
        self.position_of_id(id).map(|pos| &self.items[pos])
    }

    /// First item in catalog order with exactly this title.
    pub fn first_with_title(&self, title: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.title == title)
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().map(|item| item.title.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool { self.columns.iter().any(|c| c == name) }
}

fn parse_id(row: usize, value: Option<String>) -> Result<ItemId, CatalogLoadError> {
    let raw = value.unwrap_or_default();
    raw.trim()
        .parse::<ItemId>()
        .map_err(|_| CatalogLoadError::InvalidIdentifier { row, value: raw })
}
