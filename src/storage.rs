//! Emmagatzematge local clau-valor.
//!
//! La cistella es persisteix com un únic blob serialitzat sota una clau
//! coneguda. El backend d'emmagatzematge és injectable: fitxers al
//! directori de dades en producció, un mapa en memòria als tests.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::errors::AppError;

/// Backend d'emmagatzematge clau-valor, síncron.
pub trait KeyValueStorage: Send + Sync {
    /// Retorna el valor desat o `None` si la clau no existeix o no es pot llegir.
    fn get(&self, key: &str) -> Option<String>;

    /// Desa el valor sota la clau, sobreescrivint l'anterior.
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;

    /// Esborra la clau; si no existeix, no fa res.
    fn remove(&self, key: &str);
}

/// Backend durable: un fitxer per clau dins del directori de dades.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(data_dir: &Path) -> Result<Self, AppError> {
        let dir = data_dir.join("storage");
        fs::create_dir_all(&dir)
            .map_err(|e| AppError::Storage(format!("No s'ha pogut crear {}: {}", dir.display(), e)))?;

        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        fs::write(self.path_for(key), value)
            .map_err(|e| AppError::Storage(format!("No s'ha pogut escriure {}: {}", key, e)))
    }

    fn remove(&self, key: &str) {
        let _ = fs::remove_file(self.path_for(key));
    }
}

/// Backend en memòria per als tests i per a shells sense disc.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries
            .lock()
            .map_err(|_| AppError::Storage("No s'ha pogut agafar el lock d'emmagatzematge".into()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}
