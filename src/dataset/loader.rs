use super::listing::{Listing, ListingTable, Price};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const REQUIRED_COLUMNS: [&str; 3] = ["location", "price", "description"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Dataset not found at {}. Please ensure the file exists.", .path.display())]
    NotFound { path: PathBuf },

    #[error("Dataset at {} is empty. Please provide a valid dataset.", .path.display())]
    Empty { path: PathBuf },

    #[error(
        "Dataset is missing the following required columns: {missing:?}\nColumns found in dataset: {found:?}"
    )]
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },

    #[error(
        "Dataset has required columns more than once after normalization: {duplicated:?}\nColumns found in dataset: {found:?}"
    )]
    DuplicateColumns {
        duplicated: Vec<String>,
        found: Vec<String>,
    },

    #[error(
        "Some entries in the 'price' column are not numeric ({count} in total, first on line {first_line}: {first_value:?})."
    )]
    NonNumericPrice {
        count: usize,
        first_line: u64,
        first_value: String,
    },

    #[error("An unexpected error occurred while loading the dataset {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub fn load_listings(path: &Path) -> Result<ListingTable, LoadError> {
    let file = File::open(path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Read {
                path: path.to_path_buf(),
                source: err.into(),
            }
        }
    })?;

    read_listings(file, path)
}

pub fn read_listings<R: Read>(input: R, path: &Path) -> Result<ListingTable, LoadError> {
    let read_error = |source: csv::Error| LoadError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(input);
    let headers = reader.headers().map_err(read_error)?.clone();
    if headers.iter().all(|name| normalize_column(name).is_empty()) {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let layout = ColumnLayout::resolve(&headers)?;

    let mut listings = Vec::new();
    let mut rejected: Option<(usize, u64, String)> = None;
    let mut record = StringRecord::new();
    while reader.read_record(&mut record).map_err(read_error)? {
        let line = record
            .position()
            .map_or(listings.len() as u64 + 2, |position| position.line());
        let raw_price = record.get(layout.price).unwrap_or_default();

        match Price::parse(raw_price) {
            Some(price) => listings.push(Listing::new(
                record.get(layout.location).unwrap_or_default(),
                price,
                record.get(layout.description).unwrap_or_default(),
            )),
            None => {
                let entry = rejected.get_or_insert_with(|| (0, line, raw_price.to_string()));
                entry.0 += 1;
            }
        }
    }

    if let Some((count, first_line, first_value)) = rejected {
        return Err(LoadError::NonNumericPrice {
            count,
            first_line,
            first_value,
        });
    }

    Ok(ListingTable::new(listings))
}

fn normalize_column(name: &str) -> String {
    name.trim_start_matches('\u{feff}').trim().to_lowercase()
}

struct ColumnLayout {
    location: usize,
    price: usize,
    description: usize,
}

impl ColumnLayout {
    fn resolve(headers: &StringRecord) -> Result<Self, LoadError> {
        let found: Vec<String> = headers.iter().map(normalize_column).collect();
        let position = |name: &str| found.iter().position(|column| column == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .into_iter()
            .filter(|&name| position(name).is_none())
            .map(str::to_string)
            .collect();

        let (Some(location), Some(price), Some(description)) = (
            position("location"),
            position("price"),
            position("description"),
        ) else {
            return Err(LoadError::MissingColumns { missing, found });
        };

        // A required name seen twice would leave the second column unchecked.
        let duplicated: Vec<String> = REQUIRED_COLUMNS
            .into_iter()
            .filter(|&name| found.iter().filter(|column| *column == name).count() > 1)
            .map(str::to_string)
            .collect();
        if !duplicated.is_empty() {
            return Err(LoadError::DuplicateColumns { duplicated, found });
        }

        Ok(Self {
            location,
            price,
            description,
        })
    }
}
