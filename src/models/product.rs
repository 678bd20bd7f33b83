use serde::{Deserialize, Serialize};

/// Producte del catàleg, tal com el serveix l'API (noms de camp en camelCase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Producte {
    pub id: i64,
    pub nom: String,
    #[serde(default)]
    pub descripcio: Option<String>,
    pub preu: f64,
    #[serde(default)]
    pub stock: i64,
    pub categoria_id: i64,
    #[serde(default)]
    pub imatge_path: Option<String>,
    #[serde(default)]
    pub categoria_nom: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Categoria {
    pub id: i64,
    pub nom: String,
}

/// Metadades de paginació a l'estil del backend (camps extres s'ignoren).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginacio<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: i64,
    #[serde(default)]
    pub total_pages: i64,
    #[serde(default)]
    pub number: i64,
    #[serde(default)]
    pub size: i64,
}

/// El backend pot respondre amb l'embolcall paginat o amb la llista plana;
/// els dos formats es deserialitzen al mateix tipus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Pagina<T> {
    Paginada(Paginacio<T>),
    Llista(Vec<T>),
}

impl<T> Pagina<T> {
    /// Contingut de la pàgina, sigui quin sigui el format d'origen.
    pub fn contingut(self) -> Vec<T> {
        match self {
            Pagina::Paginada(p) => p.content,
            Pagina::Llista(items) => items,
        }
    }

    pub fn es_buida(&self) -> bool {
        match self {
            Pagina::Paginada(p) => p.content.is_empty(),
            Pagina::Llista(items) => items.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn producte_json() -> serde_json::Value {
        json!({
            "id": 3,
            "nom": "Pa de pagès",
            "descripcio": "Pa artesà de llenya",
            "preu": 2.5,
            "stock": 12,
            "categoriaId": 1,
            "imatgePath": "images/pa.jpg",
            "categoriaNom": "Forn"
        })
    }

    #[test]
    fn deserialitza_producte_amb_noms_de_camp_del_backend() {
        let p: Producte = serde_json::from_value(producte_json()).unwrap();
        assert_eq!(p.id, 3);
        assert_eq!(p.categoria_id, 1);
        assert_eq!(p.imatge_path.as_deref(), Some("images/pa.jpg"));
    }

    #[test]
    fn camps_opcionals_poden_faltar() {
        let p: Producte = serde_json::from_value(json!({
            "id": 9,
            "nom": "Coca",
            "preu": 4.0,
            "categoriaId": 2
        }))
        .unwrap();
        assert_eq!(p.descripcio, None);
        assert_eq!(p.stock, 0);
        assert_eq!(p.imatge_path, None);
    }

    #[test]
    fn pagina_accepta_embolcall_paginat() {
        let pagina: Pagina<Producte> = serde_json::from_value(json!({
            "content": [producte_json()],
            "totalElements": 1,
            "totalPages": 1,
            "number": 0,
            "size": 20,
            "first": true,
            "last": true
        }))
        .unwrap();
        assert!(!pagina.es_buida());
        assert_eq!(pagina.contingut().len(), 1);
    }

    #[test]
    fn pagina_accepta_llista_plana() {
        let pagina: Pagina<Producte> =
            serde_json::from_value(json!([producte_json(), producte_json()])).unwrap();
        assert_eq!(pagina.contingut().len(), 2);
    }
}
