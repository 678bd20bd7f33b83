//! Selecció de productes relacionats per a la pàgina de detall.

use rand::seq::SliceRandom;
use serde_json::json;

use crate::api::ApiClient;
use crate::models::product::Producte;
use crate::{log_debug, log_warn};

/// Nombre màxim de productes a la tira de relacionats.
pub const MAX_RELACIONATS: usize = 6;

/// Mida de la pàgina que es demana al backend per triar-ne el subconjunt.
const MIDA_CANDIDATS: i64 = 20;

/// Tria fins a [`MAX_RELACIONATS`] productes de la mateixa categoria, en
/// ordre aleatori a cada crida. Qualsevol error de l'API degrada a una
/// tira buida; el detall del producte no ha de caure mai per culpa dels
/// relacionats.
pub async fn productes_relacionats(
    api: &ApiClient,
    categoria_id: i64,
    producte: &Producte,
) -> Vec<Producte> {
    log_debug!(
        "RELACIONATS",
        "Cercant productes relacionats",
        json!({"producte": producte.id, "categoria": categoria_id})
    );

    let pagina = match api
        .get_products_by_category(categoria_id, 0, MIDA_CANDIDATS)
        .await
    {
        Ok(pagina) => pagina,
        Err(e) => {
            log_warn!(
                "RELACIONATS",
                "Error obtenint productes relacionats",
                json!({"categoria": categoria_id, "error": e.to_string()})
            );
            return Vec::new();
        }
    };

    // Refiltre defensiu: la petició ja és per categoria, però no ens
    // creiem el backend. Parem d'escanejar al sisè coincident.
    let mut coincidents = Vec::new();
    for candidat in pagina.contingut() {
        if candidat.categoria_id == categoria_id {
            coincidents.push(candidat);
            if coincidents.len() == MAX_RELACIONATS {
                break;
            }
        }
    }

    coincidents.shuffle(&mut rand::thread_rng());
    coincidents.truncate(MAX_RELACIONATS);
    coincidents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{HttpTransport, TransportResponse};
    use crate::errors::AppError;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Arc;

    struct FixedTransport {
        response: Result<(u16, String), ()>,
    }

    #[async_trait]
    impl HttpTransport for FixedTransport {
        async fn send(
            &self,
            _method: &str,
            _url: &str,
            _body: Option<Value>,
        ) -> Result<TransportResponse, AppError> {
            match &self.response {
                Ok((status, body)) => Ok(TransportResponse {
                    status: *status,
                    body: body.clone(),
                }),
                Err(()) => Err(AppError::Network("sense connexió".into())),
            }
        }
    }

    fn api_amb_cos(body: &str) -> ApiClient {
        ApiClient::new(
            "http://localhost:8080/api/v1",
            Arc::new(FixedTransport {
                response: Ok((200, body.to_string())),
            }),
        )
    }

    fn producte(id: i64, categoria_id: i64) -> Producte {
        Producte {
            id,
            nom: format!("Producte {}", id),
            descripcio: None,
            preu: 1.0,
            stock: 5,
            categoria_id,
            imatge_path: None,
            categoria_nom: None,
        }
    }

    fn cos_categoria(productes: &[Producte]) -> String {
        serde_json::to_string(&serde_json::json!({ "content": productes })).unwrap()
    }

    #[tokio::test]
    async fn mai_mes_de_sis_relacionats() {
        let candidats: Vec<Producte> = (1..=15).map(|id| producte(id, 3)).collect();
        let api = api_amb_cos(&cos_categoria(&candidats));

        let relacionats = productes_relacionats(&api, 3, &producte(1, 3)).await;
        assert_eq!(relacionats.len(), MAX_RELACIONATS);
    }

    #[tokio::test]
    async fn les_altres_categories_es_descarten() {
        let mut candidats: Vec<Producte> = (1..=4).map(|id| producte(id, 3)).collect();
        candidats.push(producte(90, 7));
        candidats.push(producte(91, 8));
        let api = api_amb_cos(&cos_categoria(&candidats));

        let relacionats = productes_relacionats(&api, 3, &producte(1, 3)).await;
        assert_eq!(relacionats.len(), 4);
        assert!(relacionats.iter().all(|p| p.categoria_id == 3));
    }

    #[tokio::test]
    async fn un_error_de_l_api_degrada_a_tira_buida() {
        let api = ApiClient::new(
            "http://localhost:8080/api/v1",
            Arc::new(FixedTransport { response: Err(()) }),
        );

        let relacionats = productes_relacionats(&api, 3, &producte(1, 3)).await;
        assert!(relacionats.is_empty());
    }

    #[tokio::test]
    async fn una_resposta_d_error_tambe_degrada_a_buit() {
        let api = ApiClient::new(
            "http://localhost:8080/api/v1",
            Arc::new(FixedTransport {
                response: Ok((500, String::new())),
            }),
        );

        let relacionats = productes_relacionats(&api, 3, &producte(1, 3)).await;
        assert!(relacionats.is_empty());
    }
}
