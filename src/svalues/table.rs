use std::collections::HashSet;
use std::io::Read;
use std::sync::Arc;

use ndarray::{Array2, ArrayView1};

use crate::data::parser::ParseError;
use crate::data::OrganTaxonomy;
use crate::error::{DosimetryError, SchemaIssue};

/// An S-value table as read from storage, before validation
///
/// Rows are labelled by target organ, columns by source organ. Empty cells are
/// kept as `None` so validation can tell a missing value from a zero.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    rows: Vec<String>,
    columns: Vec<String>,
    cells: Vec<Vec<Option<f64>>>,
}

impl RawTable {
    /// Build from labels and cells; every row of `cells` must have `columns.len()` entries
    pub fn new(rows: Vec<String>, columns: Vec<String>, cells: Vec<Vec<Option<f64>>>) -> Self {
        debug_assert_eq!(rows.len(), cells.len());
        debug_assert!(cells.iter().all(|r| r.len() == columns.len()));
        RawTable {
            rows,
            columns,
            cells,
        }
    }

    /// Parse CSV text whose first column holds the row labels
    ///
    /// The header's first cell (the index name) is ignored. Empty cells become
    /// `None`; any other text must parse as a number.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ParseError> {
        let mut reader = csv::ReaderBuilder::new()
            .comment(Some(b'#'))
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns: Vec<String> = reader.headers()?.iter().skip(1).map(String::from).collect();
        let mut rows = Vec::new();
        let mut cells = Vec::new();
        for (r, record) in reader.records().enumerate() {
            let record = record?;
            let label = record.get(0).unwrap_or("").to_string();
            let mut row = Vec::with_capacity(columns.len());
            for (c, column) in columns.iter().enumerate() {
                let raw = record.get(c + 1).unwrap_or("");
                if raw.is_empty() {
                    row.push(None);
                    continue;
                }
                let value = raw.parse::<f64>().map_err(|_| ParseError::NonNumeric {
                    column: column.clone(),
                    row: r + 1,
                    value: raw.to_string(),
                })?;
                row.push(Some(value));
            }
            rows.push(label);
            cells.push(row);
        }
        Ok(RawTable::new(rows, columns, cells))
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    fn row_position(&self, label: &str) -> Option<usize> {
        self.rows.iter().position(|r| r == label)
    }

    fn column_position(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == label)
    }

    /// Value at (`row`, `column`), `None` when either label or the cell is missing
    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let r = self.row_position(row)?;
        let c = self.column_position(column)?;
        self.cells[r][c]
    }

    /// Every present value
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().flatten().filter_map(|v| *v)
    }

    /// Row, column and value of the first present cell that is negative or not finite
    fn first_invalid(&self) -> Option<(usize, usize, f64)> {
        self.cells.iter().enumerate().find_map(|(r, row)| {
            row.iter()
                .enumerate()
                .find_map(|(c, v)| (*v).filter(|v| invalid(*v)).map(|v| (r, c, v)))
        })
    }
}

/// Validated dose-conversion coefficients for one radionuclide
///
/// Rows follow the taxonomy's target order and columns its source order, so
/// `value(t, s)` is the coefficient for `taxonomy.targets()[t]` irradiated by
/// `taxonomy.sources()[s]`, in mGy/(MBq·s). Every value is finite and
/// non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientTable {
    radionuclide: String,
    taxonomy: Arc<OrganTaxonomy>,
    values: Array2<f64>,
}

impl CoefficientTable {
    /// Validate a raw table against `taxonomy`
    ///
    /// Checks, in order: duplicate labels, the wall/contents cells, presence of
    /// every source column and target row, every remaining required cell, and
    /// finally that every present value, extra rows and columns included, is
    /// finite and non-negative. Extra rows and columns are then dropped.
    pub fn from_raw(
        radionuclide: &str,
        raw: &RawTable,
        taxonomy: Arc<OrganTaxonomy>,
    ) -> Result<Self, DosimetryError> {
        check_unique(radionuclide, &raw.rows, SchemaIssue::DuplicateRow)?;
        check_unique(radionuclide, &raw.columns, SchemaIssue::DuplicateColumn)?;

        for (wall, contents) in taxonomy.wall_contents_pairs() {
            if raw.get(wall, contents).is_none() {
                return Err(DosimetryError::schema(
                    radionuclide,
                    SchemaIssue::MissingWallContentsPair {
                        wall: wall.to_string(),
                        contents: contents.to_string(),
                    },
                ));
            }
        }

        let column_positions: Vec<Option<usize>> = taxonomy
            .sources()
            .iter()
            .map(|s| raw.column_position(s))
            .collect();
        let row_positions: Vec<Option<usize>> = taxonomy
            .targets()
            .iter()
            .map(|t| raw.row_position(t))
            .collect();
        let missing_sources = missing(taxonomy.sources(), &column_positions);
        let missing_targets = missing(taxonomy.targets(), &row_positions);
        if !missing_sources.is_empty() || !missing_targets.is_empty() {
            return Err(DosimetryError::schema(
                radionuclide,
                SchemaIssue::MissingOrgans {
                    sources: missing_sources,
                    targets: missing_targets,
                },
            ));
        }

        let shape = (taxonomy.targets().len(), taxonomy.sources().len());
        let mut values = Array2::zeros(shape);
        for (t, r) in row_positions.iter().flatten().enumerate() {
            for (s, c) in column_positions.iter().flatten().enumerate() {
                values[[t, s]] = raw.cells[*r][*c].ok_or_else(|| {
                    DosimetryError::schema(
                        radionuclide,
                        SchemaIssue::MissingCell {
                            target: taxonomy.targets()[t].clone(),
                            source: taxonomy.sources()[s].clone(),
                        },
                    )
                })?;
            }
        }

        if let Some((r, c, value)) = raw.first_invalid() {
            return Err(DosimetryError::DataIntegrity {
                radionuclide: radionuclide.to_string(),
                target: raw.rows[r].clone(),
                source_organ: raw.columns[c].clone(),
                value,
            });
        }

        Self::from_matrix(radionuclide, values, taxonomy)
    }

    /// Wrap a matrix already laid out in taxonomy order
    ///
    /// Fails with [`SchemaIssue::MissingOrgans`] when the shape does not match
    /// and with [`DosimetryError::DataIntegrity`] on the first negative or
    /// non-finite value anywhere in the matrix. Rows and columns past the
    /// taxonomy are then dropped; in errors they are named by index (`#25`).
    pub fn from_matrix(
        radionuclide: &str,
        values: Array2<f64>,
        taxonomy: Arc<OrganTaxonomy>,
    ) -> Result<Self, DosimetryError> {
        let (n_targets, n_sources) = values.dim();
        if n_targets < taxonomy.targets().len() || n_sources < taxonomy.sources().len() {
            return Err(DosimetryError::schema(
                radionuclide,
                SchemaIssue::MissingOrgans {
                    sources: taxonomy.sources()[n_sources.min(taxonomy.sources().len())..].to_vec(),
                    targets: taxonomy.targets()[n_targets.min(taxonomy.targets().len())..].to_vec(),
                },
            ));
        }
        if let Some(((t, s), &value)) = values.indexed_iter().find(|(_, v)| invalid(**v)) {
            return Err(DosimetryError::DataIntegrity {
                radionuclide: radionuclide.to_string(),
                target: organ_label(taxonomy.targets(), t),
                source_organ: organ_label(taxonomy.sources(), s),
                value,
            });
        }

        let values = values
            .slice(ndarray::s![..taxonomy.targets().len(), ..taxonomy.sources().len()])
            .to_owned();

        Ok(CoefficientTable {
            radionuclide: radionuclide.to_string(),
            taxonomy,
            values,
        })
    }

    pub fn radionuclide(&self) -> &str {
        &self.radionuclide
    }

    pub fn taxonomy(&self) -> &OrganTaxonomy {
        &self.taxonomy
    }

    /// Coefficient by target and source index
    #[inline]
    pub fn value(&self, target: usize, source: usize) -> f64 {
        self.values[[target, source]]
    }

    /// Coefficient by organ name
    pub fn get(&self, target: &str, source: &str) -> Option<f64> {
        let t = self.taxonomy.target_index(target)?;
        let s = self.taxonomy.source_index(source)?;
        Some(self.value(t, s))
    }

    /// All coefficients for one target, in source order
    pub fn row(&self, target: usize) -> ArrayView1<'_, f64> {
        self.values.row(target)
    }

    pub fn matrix(&self) -> &Array2<f64> {
        &self.values
    }
}

fn check_unique(
    radionuclide: &str,
    labels: &[String],
    issue: fn(String) -> SchemaIssue,
) -> Result<(), DosimetryError> {
    let mut seen = HashSet::with_capacity(labels.len());
    for label in labels {
        if !seen.insert(label.as_str()) {
            return Err(DosimetryError::schema(radionuclide, issue(label.clone())));
        }
    }
    Ok(())
}

fn invalid(value: f64) -> bool {
    !value.is_finite() || value < 0.0
}

fn organ_label(organs: &[String], index: usize) -> String {
    organs
        .get(index)
        .cloned()
        .unwrap_or_else(|| format!("#{index}"))
}

fn missing(organs: &[String], positions: &[Option<usize>]) -> Vec<String> {
    organs
        .iter()
        .zip(positions)
        .filter(|(_, p)| p.is_none())
        .map(|(o, _)| o.clone())
        .collect()
}
