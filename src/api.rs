//! Client de l'API del catàleg BiciFood.
//!
//! Totes les peticions viatgen en JSON contra el backend REST. El
//! transport és un tret injectable: `ReqwestTransport` en producció,
//! dobles programats als tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::config::ApiConfig;
use crate::errors::AppError;
use crate::models::product::{Categoria, Pagina, Producte};
use crate::validation;
use crate::{log_debug, log_warn};

/// Resposta crua d'un transport HTTP.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport HTTP injectable.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Envia la petició i retorna l'estat i el cos, sense interpretar-los.
    /// Falla amb [`AppError::Network`] si el transport no arriba al servidor.
    async fn send(
        &self,
        method: &str,
        url: &str,
        body: Option<Value>,
    ) -> Result<TransportResponse, AppError>;
}

/// Transport de producció sobre `reqwest`, amb capçaleres JSON i un
/// temps màxim de petició explícit.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("No s'ha pogut crear el client HTTP: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(
        &self,
        method: &str,
        url: &str,
        body: Option<Value>,
    ) -> Result<TransportResponse, AppError> {
        let method = reqwest::Method::from_bytes(method.as_bytes())
            .map_err(|_| AppError::Internal(format!("Mètode HTTP invàlid: {}", method)))?;

        let mut request = self
            .client
            .request(method, url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");

        if let Some(data) = body {
            request = request.json(&data);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(TransportResponse { status, body })
    }
}

/// Client de l'API: una base URL fixa i mètodes fins per endpoint.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    /// Construeix el client de producció a partir de la configuració.
    pub fn from_config(config: &ApiConfig) -> Result<Self, AppError> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::new(config.base_url.clone(), Arc::new(transport)))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fa una petició genèrica contra l'API.
    ///
    /// Propaga [`AppError::Network`] si el transport falla i
    /// [`AppError::HttpStatus`] si l'estat no és d'èxit.
    pub async fn request(
        &self,
        endpoint: &str,
        method: &str,
        body: Option<Value>,
    ) -> Result<Value, AppError> {
        let url = format!("{}{}", self.base_url, endpoint);
        log_debug!("API", "Petició", json!({"method": method, "url": url}));

        let response = self.transport.send(method, &url, body).await?;

        if !response.is_success() {
            log_warn!(
                "API",
                "Resposta amb estat d'error",
                json!({"url": url, "status": response.status})
            );
            return Err(AppError::HttpStatus {
                status: response.status,
            });
        }

        serde_json::from_str(&response.body)
            .map_err(|e| AppError::Internal(format!("Resposta JSON invàlida: {}", e)))
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, AppError> {
        let value = self.request(endpoint, "GET", None).await?;
        serde_json::from_value(value)
            .map_err(|e| AppError::Internal(format!("Resposta JSON inesperada: {}", e)))
    }

    /// Obté totes les categories.
    pub async fn get_categories(&self) -> Result<Vec<Categoria>, AppError> {
        self.get("/categories").await
    }

    /// Obté tots els productes, paginats.
    pub async fn get_products(&self, page: i64, size: i64) -> Result<Pagina<Producte>, AppError> {
        validation::validate_page_params(page, size).map_err(AppError::Validation)?;
        self.get(&format!("/products?page={}&size={}", page, size))
            .await
    }

    /// Obté els productes d'una categoria, paginats.
    pub async fn get_products_by_category(
        &self,
        categoria_id: i64,
        page: i64,
        size: i64,
    ) -> Result<Pagina<Producte>, AppError> {
        validation::validate_product_id(categoria_id).map_err(AppError::Validation)?;
        validation::validate_page_params(page, size).map_err(AppError::Validation)?;
        self.get(&format!(
            "/products/category/{}?page={}&size={}",
            categoria_id, page, size
        ))
        .await
    }

    /// Obté un producte per ID.
    pub async fn get_product_by_id(&self, id: i64) -> Result<Producte, AppError> {
        validation::validate_product_id(id).map_err(AppError::Validation)?;
        self.get(&format!("/products/{}", id)).await
    }

    /// Cerca productes per nom.
    pub async fn search_products(
        &self,
        query: &str,
        page: i64,
        size: i64,
    ) -> Result<Pagina<Producte>, AppError> {
        validation::validate_search_query(query).map_err(AppError::Validation)?;
        validation::validate_page_params(page, size).map_err(AppError::Validation)?;

        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        self.get(&format!(
            "/products/search?name={}&page={}&size={}",
            encoded, page, size
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Transport programat: respon en ordre amb la cua donada i recorda
    /// les URL demanades.
    pub struct ScriptedTransport {
        responses: Mutex<VecDeque<Result<TransportResponse, AppError>>>,
        pub urls: Mutex<Vec<String>>,
    }

    impl ScriptedTransport {
        pub fn new(responses: Vec<Result<TransportResponse, AppError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                urls: Mutex::new(Vec::new()),
            }
        }

        pub fn ok(body: &str) -> Result<TransportResponse, AppError> {
            Ok(TransportResponse {
                status: 200,
                body: body.to_string(),
            })
        }
    }

    #[async_trait]
    impl HttpTransport for ScriptedTransport {
        async fn send(
            &self,
            _method: &str,
            url: &str,
            _body: Option<Value>,
        ) -> Result<TransportResponse, AppError> {
            self.urls.lock().unwrap().push(url.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(AppError::Network("cua de respostes buida".into())))
        }
    }

    fn client(responses: Vec<Result<TransportResponse, AppError>>) -> (ApiClient, Arc<ScriptedTransport>) {
        let transport = Arc::new(ScriptedTransport::new(responses));
        (
            ApiClient::new("http://localhost:8080/api/v1", transport.clone()),
            transport,
        )
    }

    #[tokio::test]
    async fn estat_no_exitos_es_converteix_en_http_status() {
        let (api, _) = client(vec![Ok(TransportResponse {
            status: 404,
            body: String::new(),
        })]);

        let err = api.get_product_by_id(42).await.unwrap_err();
        assert!(matches!(err, AppError::HttpStatus { status: 404 }));
    }

    #[tokio::test]
    async fn error_de_transport_es_propaga_com_a_network() {
        let (api, _) = client(vec![Err(AppError::Network("connexió rebutjada".into()))]);

        let err = api.get_categories().await.unwrap_err();
        assert!(matches!(err, AppError::Network(_)));
    }

    #[tokio::test]
    async fn productes_paginats_es_deserialitzen() {
        let (api, transport) = client(vec![ScriptedTransport::ok(
            r#"{"content":[{"id":1,"nom":"Pa","preu":2.5,"stock":3,"categoriaId":1}],"totalElements":1}"#,
        )]);

        let pagina = api.get_products(0, 20).await.unwrap();
        assert_eq!(pagina.contingut().len(), 1);
        assert_eq!(
            transport.urls.lock().unwrap()[0],
            "http://localhost:8080/api/v1/products?page=0&size=20"
        );
    }

    #[tokio::test]
    async fn llista_plana_tambe_es_deserialitza() {
        let (api, _) = client(vec![ScriptedTransport::ok(
            r#"[{"id":1,"nom":"Pa","preu":2.5,"stock":3,"categoriaId":1}]"#,
        )]);

        let pagina = api.get_products_by_category(1, 0, 20).await.unwrap();
        assert_eq!(pagina.contingut().len(), 1);
    }

    #[tokio::test]
    async fn la_cerca_codifica_el_terme() {
        let (api, transport) = client(vec![ScriptedTransport::ok(r#"[]"#)]);

        api.search_products("pa de pagès", 0, 20).await.unwrap();
        let url = transport.urls.lock().unwrap()[0].clone();
        assert_eq!(
            url,
            "http://localhost:8080/api/v1/products/search?name=pa+de+pag%C3%A8s&page=0&size=20"
        );
    }

    #[tokio::test]
    async fn paging_invalid_no_arriba_al_transport() {
        let (api, transport) = client(vec![]);

        let err = api.get_products(-1, 20).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(transport.urls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn json_corrupte_es_internal() {
        let (api, _) = client(vec![ScriptedTransport::ok("{no és json")]);

        let err = api.get_categories().await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
