use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of a client record inside its directory
pub const CLIENT_FILE: &str = "client.yaml";
/// File name of an agreement record inside its directory
pub const AGREEMENT_FILE: &str = "agreement.yaml";
/// File name of the payment ledger inside an agreement directory
pub const PAYMENTS_FILE: &str = "payments.csv";
/// Header row of the payment ledger
pub const PAYMENTS_HEADER: [&str; 5] = ["id", "date", "amount", "method", "note"];

/// CsvConnection owns the data directory and knows where every record lives
#[derive(Clone, Debug)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Record IDs become directory names, so only plain identifiers are allowed
    pub fn is_safe_id(id: &str) -> bool {
        !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    pub fn clients_directory(&self) -> PathBuf {
        self.base_directory.join("clients")
    }

    pub fn client_directory(&self, client_id: &str) -> PathBuf {
        self.clients_directory().join(client_id)
    }

    pub fn client_file_path(&self, client_id: &str) -> PathBuf {
        self.client_directory(client_id).join(CLIENT_FILE)
    }

    pub fn agreements_directory(&self, client_id: &str) -> PathBuf {
        self.client_directory(client_id).join("agreements")
    }

    pub fn agreement_directory(&self, client_id: &str, agreement_id: &str) -> PathBuf {
        self.agreements_directory(client_id).join(agreement_id)
    }

    pub fn agreement_file_path(&self, client_id: &str, agreement_id: &str) -> PathBuf {
        self.agreement_directory(client_id, agreement_id).join(AGREEMENT_FILE)
    }

    pub fn payments_file_path(&self, client_id: &str, agreement_id: &str) -> PathBuf {
        self.agreement_directory(client_id, agreement_id).join(PAYMENTS_FILE)
    }

    /// Ensure the payment ledger exists with its header row
    pub fn ensure_payments_file_exists(&self, client_id: &str, agreement_id: &str) -> Result<()> {
        let agreement_dir = self.agreement_directory(client_id, agreement_id);
        if !agreement_dir.exists() {
            fs::create_dir_all(&agreement_dir)?;
        }

        let file_path = self.payments_file_path(client_id, agreement_id);
        if !file_path.exists() {
            fs::write(&file_path, format!("{}\n", PAYMENTS_HEADER.join(",")))?;
            debug!("Created payment ledger: {}", file_path.display());
        }

        Ok(())
    }

    /// Write a file by writing a sibling temp file and renaming it into place
    pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }

    /// Names of the subdirectories of `dir`, skipping anything that is not a
    /// safe record ID. A missing directory yields an empty list.
    pub fn list_record_directories(dir: &Path) -> Result<Vec<String>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            match path.file_name().and_then(|n| n.to_str()) {
                Some(name) if Self::is_safe_id(name) => names.push(name.to_string()),
                _ => debug!("Skipping unexpected directory: {:?}", path),
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_record_paths_nest_under_clients() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();

        let path = connection.payments_file_path("client-1", "agreement-9");
        let expected = temp_dir
            .path()
            .join("clients")
            .join("client-1")
            .join("agreements")
            .join("agreement-9")
            .join("payments.csv");
        assert_eq!(path, expected);
    }

    #[test]
    fn test_is_safe_id() {
        assert!(CsvConnection::is_safe_id("client-1f2e_3"));
        assert!(!CsvConnection::is_safe_id(""));
        assert!(!CsvConnection::is_safe_id("../etc"));
        assert!(!CsvConnection::is_safe_id("a/b"));
        assert!(!CsvConnection::is_safe_id("client 1"));
    }

    #[test]
    fn test_ensure_payments_file_writes_header_once() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();

        connection.ensure_payments_file_exists("c1", "a1").unwrap();
        let path = connection.payments_file_path("c1", "a1");
        fs::write(&path, "id,date,amount,method,note\np1,01/01/2024,5,ACH,\n").unwrap();
        connection.ensure_payments_file_exists("c1", "a1").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("p1"));
    }

    #[test]
    fn test_list_record_directories_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let names = CsvConnection::list_record_directories(&temp_dir.path().join("nope")).unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn test_new_creates_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        CsvConnection::new(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
