//! Gestió de la cistella de compra.
//!
//! La cistella viu com un únic blob JSON sota la clau `bicifood_cart` de
//! l'emmagatzematge local. Totes les operacions són síncrones i de
//! millor esforç: una cistella corrupta es tracta com a buida i els
//! errors d'escriptura es registren però no es propaguen. L'últim que
//! escriu guanya; no hi ha coordinació entre processos.

use std::sync::Arc;

use serde_json::json;

use crate::errors::AppError;
use crate::models::cart::{DadesBoto, LiniaCistella};
use crate::notifications::{NotificationCenter, NotificationKind};
use crate::storage::KeyValueStorage;
use crate::validation;
use crate::{log_error, log_warn};

/// Clau del blob de la cistella a l'emmagatzematge local.
pub const CART_STORAGE_KEY: &str = "bicifood_cart";

/// Cistella persistida, amb emmagatzematge i avisos injectats.
#[derive(Clone)]
pub struct CartStore {
    storage: Arc<dyn KeyValueStorage>,
    notifications: NotificationCenter,
}

impl CartStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>, notifications: NotificationCenter) -> Self {
        Self {
            storage,
            notifications,
        }
    }

    /// Obté les línies de la cistella. Si el blob no existeix o no es pot
    /// interpretar, la cistella és buida.
    pub fn items(&self) -> Vec<LiniaCistella> {
        let Some(raw) = self.storage.get(CART_STORAGE_KEY) else {
            return Vec::new();
        };

        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                log_warn!(
                    "CART",
                    "Cistella corrupta, es descarta",
                    json!({"error": e.to_string()})
                );
                Vec::new()
            }
        }
    }

    fn save(&self, items: &[LiniaCistella]) {
        let raw = match serde_json::to_string(items) {
            Ok(raw) => raw,
            Err(e) => {
                log_error!("CART", "No s'ha pogut serialitzar la cistella", e.to_string());
                return;
            }
        };

        if let Err(e) = self.storage.set(CART_STORAGE_KEY, &raw) {
            log_error!("CART", "No s'ha pogut desar la cistella", e.to_string());
        }
    }

    /// Afegeix un producte a la cistella. Si ja hi és, incrementa la
    /// quantitat de la línia existent; el nom i el preu queden tal com es
    /// van capturar el primer cop.
    pub fn add(
        &self,
        id: i64,
        name: &str,
        price: f64,
        quantity: i64,
        image_path: Option<String>,
    ) -> Result<(), AppError> {
        validation::validate_quantity(quantity, Some(1), None).map_err(AppError::Validation)?;

        let mut items = self.items();
        if let Some(existing) = items.iter_mut().find(|item| item.id == id) {
            existing.quantity += quantity;
        } else {
            items.push(LiniaCistella {
                id,
                name: name.to_string(),
                price,
                quantity,
                image_path,
            });
        }

        self.save(&items);
        self.notifications.push(
            format!("{} afegit a la cistella!", name),
            NotificationKind::Success,
        );

        Ok(())
    }

    /// Afegeix una unitat a partir de les dades d'un botó d'afegir.
    pub fn add_from_button(&self, dades: &DadesBoto) -> Result<(), AppError> {
        self.add(
            dades.id,
            &dades.nom,
            dades.preu,
            1,
            Some(dades.imatge.clone()),
        )
    }

    /// Elimina la línia amb l'id indicat; si no hi és, no fa res.
    pub fn remove(&self, id: i64) {
        let items: Vec<LiniaCistella> = self
            .items()
            .into_iter()
            .filter(|item| item.id != id)
            .collect();
        self.save(&items);
    }

    /// Buida la cistella esborrant el blob sencer.
    pub fn clear(&self) {
        self.storage.remove(CART_STORAGE_KEY);
    }

    /// Nombre total d'unitats (suma de quantitats de totes les línies).
    pub fn total_count(&self) -> i64 {
        self.items().iter().map(|item| item.quantity).sum()
    }
}
