use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::distribution::SampleSizePair;
use crate::error::{MannWhitneyError, Result};

/// Settings for the offline table generator.
///
/// Tables are built for every `(n_a, n_b)` with both sizes in
/// `min_size..=max_size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub min_size: usize,
    pub max_size: usize,
    pub output: PathBuf,
    pub parallel: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            min_size: 1,
            max_size: 10,
            output: PathBuf::from("table_mw.txt"),
            parallel: true,
        }
    }
}

impl GeneratorConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: GeneratorConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_size > self.max_size {
            return Err(MannWhitneyError::InvalidConfig(format!(
                "min_size {} is larger than max_size {}",
                self.min_size, self.max_size
            )));
        }
        if self.output.as_os_str().is_empty() {
            return Err(MannWhitneyError::InvalidConfig(
                "output path is empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn pairs(&self) -> Vec<SampleSizePair> {
        (self.min_size..=self.max_size)
            .flat_map(|n_a| {
                (self.min_size..=self.max_size).map(move |n_b| SampleSizePair::new(n_a, n_b))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pairs().len(), 100);
    }

    #[test]
    fn test_pairs_are_ordered_product() {
        let config = GeneratorConfig {
            min_size: 2,
            max_size: 3,
            ..GeneratorConfig::default()
        };
        assert_eq!(
            config.pairs(),
            vec![
                SampleSizePair::new(2, 2),
                SampleSizePair::new(2, 3),
                SampleSizePair::new(3, 2),
                SampleSizePair::new(3, 3),
            ]
        );
    }

    #[test]
    fn test_invalid_range() {
        let config = GeneratorConfig {
            min_size: 5,
            max_size: 4,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MannWhitneyError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_json_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generator.json");
        std::fs::write(&path, r#"{ "max_size": 6, "parallel": false }"#).unwrap();

        let config = GeneratorConfig::from_json_file(&path).unwrap();
        assert_eq!(config.min_size, 1);
        assert_eq!(config.max_size, 6);
        assert!(!config.parallel);
        assert_eq!(config.output, PathBuf::from("table_mw.txt"));
    }

    #[test]
    fn test_from_json_file_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generator.json");
        std::fs::write(&path, "max_size = 6").unwrap();
        assert!(matches!(
            GeneratorConfig::from_json_file(&path),
            Err(MannWhitneyError::Json(_))
        ));
    }
}
