//! Operacions de la pàgina de catàleg.
//!
//! Aquesta capa és la frontera d'errors: les fallades de l'API es
//! degraden aquí a fragments d'error o a llistes buides, i mai no
//! arriben com a `Err` al shell.

use serde_json::json;

use crate::log_error;
use crate::models::cart::DadesBoto;
use crate::models::product::Categoria;
use crate::render::{self, ComptadorCistella, Fragment};
use crate::errors::AppError;
use crate::AppState;

pub const CONTENIDOR_PRODUCTES: &str = "products-container";
pub const CONTENIDOR_DESTACATS: &str = "featured-products";
pub const CONTENIDOR_FILTRES: &str = "category-filters";
pub const CONTENIDOR_DESPLEGABLE: &str = "categoriesDropdown";
pub const CONTENIDOR_COMPTADOR: &str = "cart-counter";

/// Nombre de productes destacats de la pàgina principal.
const MIDA_DESTACATS: i64 = 4;

/// Carrega productes en un contenidor, filtrats per categoria si escau.
pub async fn carrega_productes(
    state: &AppState,
    container_id: &str,
    categoria_id: Option<i64>,
    page: i64,
    size: i64,
) -> Fragment {
    let resultat = match categoria_id {
        Some(id) => state.api.get_products_by_category(id, page, size).await,
        None => state.api.get_products(page, size).await,
    };

    let html = match resultat {
        Ok(pagina) => render::graella_productes(&pagina.contingut(), &state.config.imatges),
        Err(e) => {
            log_error!("CATALEG", "Error carregant productes", e.to_string());
            render::fragment_error_productes()
        }
    };

    Fragment::new(container_id, html)
}

/// Productes destacats de la pàgina principal.
pub async fn carrega_destacats(state: &AppState) -> Fragment {
    carrega_productes(state, CONTENIDOR_DESTACATS, None, 0, MIDA_DESTACATS).await
}

/// Desplegable de categories del navbar. Si l'API falla, el desplegable
/// es queda com està.
pub async fn desplegable_categories(state: &AppState) -> Fragment {
    let html = match state.api.get_categories().await {
        Ok(categories) => render::elements_desplegable(&categories),
        Err(e) => {
            log_error!("CATALEG", "Error carregant categories", e.to_string());
            String::new()
        }
    };

    Fragment::new(CONTENIDOR_DESPLEGABLE, html)
}

/// Botons de filtre per categoria.
pub async fn filtres_categories(state: &AppState) -> Fragment {
    let html = match state.api.get_categories().await {
        Ok(categories) => render::botons_filtres(&categories),
        Err(e) => {
            log_error!("CATALEG", "Error carregant filtres de categoria", e.to_string());
            String::new()
        }
    };

    Fragment::new(CONTENIDOR_FILTRES, html)
}

/// Llista de categories per a shells que construeixen els filtres ells
/// mateixos. Una fallada degrada a llista buida.
pub async fn categories(state: &AppState) -> Vec<Categoria> {
    match state.api.get_categories().await {
        Ok(categories) => categories,
        Err(e) => {
            log_error!("CATALEG", "Error carregant categories", e.to_string());
            Vec::new()
        }
    }
}

/// Cerca de productes per nom. Un terme invàlid o una fallada de l'API
/// es degraden al mateix fragment que una cerca sense resultats o amb
/// error, respectivament.
pub async fn cerca_productes(state: &AppState, query: &str, page: i64, size: i64) -> Fragment {
    let html = match state.api.search_products(query, page, size).await {
        Ok(pagina) => render::graella_productes(&pagina.contingut(), &state.config.imatges),
        Err(AppError::Validation(motiu)) => {
            log_error!("CERCA", "Terme de cerca rebutjat", motiu);
            render::graella_productes(&[], &state.config.imatges)
        }
        Err(e) => {
            log_error!("CERCA", "Error cercant productes", e.to_string());
            render::fragment_error_productes()
        }
    };

    Fragment::new(CONTENIDOR_PRODUCTES, html)
}

/// Punt únic de despatx dels clics d'afegir a la cistella. El shell
/// delega tots els clics aquí, de manera que tornar a renderitzar la
/// graella no acumula mai gestors duplicats.
pub fn afegir_des_de_boto(state: &AppState, dades: &DadesBoto) -> Result<(), AppError> {
    state.cart.add_from_button(dades)
}

/// Variant que reconstrueix les dades des dels atributs crus del botó.
pub fn afegir_des_d_atributs(
    state: &AppState,
    id: &str,
    nom: &str,
    preu: &str,
    imatge: &str,
) -> Result<(), AppError> {
    let dades = DadesBoto::from_attrs(id, nom, preu, imatge)?;
    afegir_des_de_boto(state, &dades)
}

/// Estat actual del badge del comptador de la cistella.
pub fn comptador_cistella(state: &AppState) -> ComptadorCistella {
    let comptador = ComptadorCistella::new(state.cart.total_count());
    crate::log_debug!(
        "CATALEG",
        "Comptador actualitzat",
        json!({"total": comptador.total, "visible": comptador.visible()})
    );
    comptador
}
