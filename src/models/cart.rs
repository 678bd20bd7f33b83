use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Línia de la cistella persistida a l'emmagatzematge local.
/// El format JSON conserva els noms que el client ha escrit sempre
/// (`id`, `name`, `price`, `quantity`, `imagePath`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiniaCistella {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    #[serde(default)]
    pub image_path: Option<String>,
}

/// Dades que viatgen als atributs `data-product-*` del botó d'afegir a la
/// cistella, i que es recuperen al moment del clic.
#[derive(Debug, Clone, PartialEq)]
pub struct DadesBoto {
    pub id: i64,
    pub nom: String,
    pub preu: f64,
    pub imatge: String,
}

impl DadesBoto {
    /// Reconstrueix les dades des dels valors d'atribut (sempre strings).
    pub fn from_attrs(id: &str, nom: &str, preu: &str, imatge: &str) -> Result<Self, AppError> {
        let id = id
            .parse::<i64>()
            .map_err(|_| AppError::Validation(format!("Identificador de producte invàlid: {}", id)))?;
        let preu = preu
            .parse::<f64>()
            .map_err(|_| AppError::Validation(format!("Preu invàlid: {}", preu)))?;

        Ok(Self {
            id,
            nom: nom.to_string(),
            preu,
            imatge: imatge.to_string(),
        })
    }
}
