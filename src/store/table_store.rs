use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{info, warn};

use super::codec::{parse_tables, write_tables};
use crate::config::GeneratorConfig;
use crate::distribution::{build_tables, DistributionTable, SampleSizePair};
use crate::error::{MannWhitneyError, Result};

/// Distribution tables keyed by sample-size pair.
///
/// Loaded once and then read-only; callers that evaluate many tests should
/// keep one store around rather than reloading the file per test.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableStore {
    tables: BTreeMap<SampleSizePair, DistributionTable>,
}

impl TableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let store = Self::parse(BufReader::new(file))?;
        info!(path = %path.display(), tables = store.len(), "loaded distribution tables");
        Ok(store)
    }

    /// Later records replace earlier ones with the same size pair.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut store = TableStore::new();
        for (pair, table) in parse_tables(reader)? {
            if store.insert(pair, table).is_some() {
                warn!(key = %pair, "duplicate table record, keeping the later one");
            }
        }
        Ok(store)
    }

    /// Writes every table in ascending size-pair order.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        info!(path = %path.display(), tables = self.len(), "saved distribution tables");
        Ok(())
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_tables(writer, self.tables.iter())
    }

    pub fn insert(
        &mut self,
        pair: SampleSizePair,
        table: DistributionTable,
    ) -> Option<DistributionTable> {
        self.tables.insert(pair, table)
    }

    pub fn get(&self, pair: &SampleSizePair) -> Option<&DistributionTable> {
        self.tables.get(pair)
    }

    /// Exact-match lookup; there is no fallback to neighbouring sizes.
    pub fn lookup(&self, pair: &SampleSizePair) -> Result<&DistributionTable> {
        self.get(pair)
            .ok_or_else(|| MannWhitneyError::MissingTableEntry { key: pair.key() })
    }

    /// Lookup by the textual key `"n_a,n_b"`.
    pub fn lookup_key(&self, key: &str) -> Result<&DistributionTable> {
        SampleSizePair::from_key(key)
            .and_then(|pair| self.get(&pair))
            .ok_or_else(|| MannWhitneyError::MissingTableEntry {
                key: key.to_string(),
            })
    }

    pub fn pairs(&self) -> impl Iterator<Item = &SampleSizePair> {
        self.tables.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SampleSizePair, &DistributionTable)> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl FromIterator<(SampleSizePair, DistributionTable)> for TableStore {
    fn from_iter<I: IntoIterator<Item = (SampleSizePair, DistributionTable)>>(iter: I) -> Self {
        TableStore {
            tables: iter.into_iter().collect(),
        }
    }
}

/// Builds the table of every size pair the config covers.
pub fn generate_tables(config: &GeneratorConfig) -> Result<TableStore> {
    config.validate()?;
    let pairs = config.pairs();
    Ok(build_tables(&pairs, config.parallel).into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::build_table;
    use std::io::Cursor;

    #[test]
    fn test_lookup_is_order_sensitive() {
        let mut store = TableStore::new();
        store.insert(SampleSizePair::new(2, 3), build_table(SampleSizePair::new(2, 3)));

        assert!(store.lookup(&SampleSizePair::new(2, 3)).is_ok());
        assert!(store.lookup_key("2,3").is_ok());
        match store.lookup(&SampleSizePair::new(3, 2)) {
            Err(MannWhitneyError::MissingTableEntry { key }) => assert_eq!(key, "3,2"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            store.lookup_key("2, 3"),
            Err(MannWhitneyError::MissingTableEntry { .. })
        ));
    }

    #[test]
    fn test_duplicate_records_keep_last() {
        let text = "[*1,1*]\n0.0,1.0,\n0.25,1.0,\n#####\n[*1,1*]\n0.0,1.0,\n0.5,1.0,\n#####\n";
        let store = TableStore::parse(Cursor::new(text)).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.lookup_key("1,1").unwrap().w_cum(), &[0.5, 1.0]);
    }

    #[test]
    fn test_save_and_load_file() {
        let config = GeneratorConfig {
            min_size: 1,
            max_size: 4,
            parallel: true,
            ..GeneratorConfig::default()
        };
        let store = generate_tables(&config).unwrap();
        assert_eq!(store.len(), 16);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table_mw.txt");
        store.save(&path).unwrap();
        let loaded = TableStore::load(&path).unwrap();

        assert_eq!(loaded, store);
        let pairs: Vec<String> = loaded.pairs().map(|p| p.key()).collect();
        assert_eq!(pairs.first().map(String::as_str), Some("1,1"));
        assert_eq!(pairs.last().map(String::as_str), Some("4,4"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TableStore::load(dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, MannWhitneyError::Io(_)));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.txt");
        std::fs::write(&path, "[*3,3*]\n0.0,1.0,\n0.5,\n#####\n").unwrap();
        assert!(matches!(
            TableStore::load(&path),
            Err(MannWhitneyError::Format { .. })
        ));
    }
}
