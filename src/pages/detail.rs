//! Pàgina de detall d'un producte: la fitxa i la tira de relacionats.

use crate::config::ImatgesConfig;
use crate::log_error;
use crate::models::product::Producte;
use crate::related;
use crate::render::{self, escapa_atribut, ruta_imatge, EstatBoto, Fragment};
use crate::AppState;

pub const CONTENIDOR_DETALL: &str = "detall-producte";
pub const CONTENIDOR_RELACIONATS: &str = "relacionats__quadricula";

/// Opcions màximes del selector de quantitat.
pub const MAX_OPCIONS_QUANTITAT: i64 = 10;

/// Opcions del selector de quantitat: d'1 fins a l'estoc, amb un sostre
/// de deu. Sense estoc, cap opció.
pub fn opcions_quantitat(stock: i64) -> Vec<i64> {
    (1..=stock.min(MAX_OPCIONS_QUANTITAT)).collect()
}

/// Fitxa HTML del detall d'un producte.
pub fn targeta_detall(producte: &Producte, config: &ImatgesConfig) -> String {
    let imatge = ruta_imatge(producte.imatge_path.as_deref(), config);
    let boto = EstatBoto::per_stock(producte.stock);
    let deshabilitat = if boto.habilitat() { "" } else { " disabled" };

    let opcions = opcions_quantitat(producte.stock)
        .into_iter()
        .map(|n| format!(r#"<option value="{n}">{n}</option>"#))
        .collect::<Vec<_>>()
        .join("");

    let descripcio = producte
        .descripcio
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or("Sense descripció disponible");

    format!(
        r#"<div class="row g-4 align-items-start">
    <div class="col-md-6 text-center">
        <img id="product-image" src="{imatge}" class="img-fluid imatge" alt="{nom}">
    </div>
    <div class="col-md-6 d-flex flex-column gap-3">
        <div class="d-flex justify-content-between align-items-center">
            <h2 id="product-name" class="mb-0">{nom}</h2>
            <p id="product-price" class="fw-bold fs-4 mb-0">{preu:.2}€</p>
        </div>
        <hr>
        <div class="d-flex align-items-center gap-2">
            <label for="quantity" class="mb-0">Quantitat</label>
            <select id="quantity" class="form-select">{opcions}</select>
        </div>
        <p id="product-description">{descripcio}</p>
        <button
            class="btn btn-primary w-50 add-to-cart-btn"
            data-product-id="{id}"
            data-product-name="{nom_attr}"
            data-product-price="{preu_valor}"
            data-product-image="{imatge_attr}"{deshabilitat}>
            {etiqueta}
        </button>
    </div>
    <h4>Productes relacionats</h4>
</div>"#,
        imatge = imatge,
        nom = producte.nom,
        preu = producte.preu,
        opcions = opcions,
        descripcio = descripcio,
        id = producte.id,
        nom_attr = escapa_atribut(&producte.nom),
        preu_valor = producte.preu,
        imatge_attr = escapa_atribut(&imatge),
        deshabilitat = deshabilitat,
        etiqueta = boto.etiqueta(),
    )
}

/// Carrega la pàgina de detall: la fitxa del producte i, si la fitxa ha
/// anat bé, la tira de relacionats de la seva categoria.
pub async fn carrega_detall(state: &AppState, producte_id: i64) -> Vec<Fragment> {
    let producte = match state.api.get_product_by_id(producte_id).await {
        Ok(producte) => producte,
        Err(e) => {
            log_error!("DETALL", "Error carregant producte", e.to_string());
            return vec![Fragment::new(
                CONTENIDOR_DETALL,
                render::fragment_error_productes(),
            )];
        }
    };

    let fitxa = Fragment::new(
        CONTENIDOR_DETALL,
        targeta_detall(&producte, &state.config.imatges),
    );

    let relacionats =
        related::productes_relacionats(&state.api, producte.categoria_id, &producte).await;
    let tira = Fragment::new(
        CONTENIDOR_RELACIONATS,
        render::tira_relacionats(&relacionats, &state.config.imatges),
    );

    vec![fitxa, tira]
}
