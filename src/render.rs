//! Transformació de productes a models de vista i fragments HTML.
//!
//! La lògica de presentació és pura: cap funció d'aquest mòdul toca la
//! xarxa ni l'emmagatzematge. Les pàgines componen aquests fragments i
//! el shell amfitrió els injecta al contenidor que indica cada
//! [`Fragment`].

use crate::config::ImatgesConfig;
use crate::models::product::{Categoria, Producte};

/// Longitud màxima de la descripció a les targetes.
pub const DESCRIPCIO_MAX: usize = 100;

/// Etiqueta del botó quan el producte té estoc.
pub const ETIQUETA_AFEGIR: &str = "Afegir a la cistella";

/// Etiqueta del botó quan el producte està esgotat.
pub const ETIQUETA_ESGOTAT: &str = "Esgotat";

/// Fragment HTML adreçat a un contenidor concret de la pàgina.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub container_id: String,
    pub html: String,
}

impl Fragment {
    pub fn new(container_id: &str, html: String) -> Self {
        Self {
            container_id: container_id.to_string(),
            html,
        }
    }
}

/// Resol la ruta d'imatge d'un producte.
///
/// - sense ruta: el placeholder;
/// - ja sota l'arrel d'imatges: es deixa tal qual;
/// - qualsevol altra cosa: es treu el prefix `images/` inicial, si hi és,
///   i es penja de l'arrel.
pub fn ruta_imatge(imatge_path: Option<&str>, config: &ImatgesConfig) -> String {
    let path = match imatge_path {
        Some(p) if !p.is_empty() => p,
        _ => return config.placeholder_path(),
    };

    let prefix_arrel = format!("{}/", config.root);
    if path.starts_with(&prefix_arrel) {
        return path.to_string();
    }

    let net = path.strip_prefix("images/").unwrap_or(path);
    format!("{}/{}", config.root, net)
}

/// Estat del botó d'afegir a la cistella segons l'estoc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstatBoto {
    Disponible,
    Esgotat,
}

impl EstatBoto {
    pub fn per_stock(stock: i64) -> Self {
        if stock <= 0 {
            EstatBoto::Esgotat
        } else {
            EstatBoto::Disponible
        }
    }

    pub fn habilitat(&self) -> bool {
        *self == EstatBoto::Disponible
    }

    pub fn etiqueta(&self) -> &'static str {
        match self {
            EstatBoto::Disponible => ETIQUETA_AFEGIR,
            EstatBoto::Esgotat => ETIQUETA_ESGOTAT,
        }
    }
}

/// Model de vista d'una targeta de producte.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetaProducte {
    pub id: i64,
    pub nom: String,
    pub descripcio: String,
    pub preu: f64,
    pub preu_text: String,
    pub stock: i64,
    pub imatge: String,
    pub boto: EstatBoto,
}

impl TargetaProducte {
    pub fn from_producte(producte: &Producte, config: &ImatgesConfig) -> Self {
        Self {
            id: producte.id,
            nom: producte.nom.clone(),
            descripcio: retalla_descripcio(
                producte.descripcio.as_deref().unwrap_or_default(),
                DESCRIPCIO_MAX,
            ),
            preu: producte.preu,
            preu_text: format!("{}€", producte.preu),
            stock: producte.stock,
            imatge: ruta_imatge(producte.imatge_path.as_deref(), config),
            boto: EstatBoto::per_stock(producte.stock),
        }
    }
}

/// Retalla el text a `max` caràcters i hi afegeix puntets si cal.
pub fn retalla_descripcio(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    let mut retallat: String = text.chars().take(max).collect();
    retallat.push('…');
    retallat
}

/// Escapa les cometes dobles per encabir el valor en un atribut HTML.
pub(crate) fn escapa_atribut(text: &str) -> String {
    text.replace('"', "&quot;")
}

/// Targeta HTML d'un producte per a la graella del catàleg.
pub fn targeta_producte(producte: &Producte, config: &ImatgesConfig) -> String {
    let vista = TargetaProducte::from_producte(producte, config);
    let deshabilitat = if vista.boto.habilitat() {
        ""
    } else {
        " disabled"
    };

    format!(
        r#"<div class="col-md-4 col-lg-3 mb-4">
    <div class="card h-100 product-card">
        <a href="detall_product.html?id={id}">
        <img src="{imatge}"
             class="card-img-top product-image"
             alt="{nom}"
             onerror="this.src='{placeholder}'; this.alt='Imatge no disponible'"></a>
        <div class="card-body d-flex flex-column">
            <h6 class="card-title">{nom}</h6>
            <p class="card-text text-muted small">{descripcio}</p>
            <div class="mt-auto">
                <div class="d-flex justify-content-between align-items-center mb-2">
                    <span class="fw-bold text-success">{preu}</span>
                    <span class="small text-muted">Stock: {stock}</span>
                </div>
                <button
                    class="btn btn-primary w-100 add-to-cart-btn"
                    data-product-id="{id}"
                    data-product-name="{nom_attr}"
                    data-product-price="{preu_valor}"
                    data-product-image="{imatge_attr}"{deshabilitat}>
                    {etiqueta}
                </button>
            </div>
        </div>
    </div>
</div>"#,
        id = vista.id,
        imatge = vista.imatge,
        placeholder = config.placeholder_path(),
        nom = vista.nom,
        descripcio = vista.descripcio,
        preu = vista.preu_text,
        stock = vista.stock,
        nom_attr = escapa_atribut(&vista.nom),
        preu_valor = vista.preu,
        imatge_attr = escapa_atribut(&vista.imatge),
        deshabilitat = deshabilitat,
        etiqueta = vista.boto.etiqueta(),
    )
}

/// Graella de productes, o el missatge de catàleg buit.
pub fn graella_productes(productes: &[Producte], config: &ImatgesConfig) -> String {
    if productes.is_empty() {
        return r#"<p class="text-center">No hi ha productes disponibles.</p>"#.to_string();
    }

    productes
        .iter()
        .map(|p| targeta_producte(p, config))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fragment d'error que substitueix la graella quan l'API falla.
pub fn fragment_error_productes() -> String {
    r#"<p class="text-center text-danger">Error carregant els productes.</p>"#.to_string()
}

/// Elements del desplegable de categories del navbar.
pub fn elements_desplegable(categories: &[Categoria]) -> String {
    categories
        .iter()
        .map(|c| {
            format!(
                r#"<li><a class="dropdown-item" href="categories.html?id={}">{}</a></li>"#,
                c.id, c.nom
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Botons de filtre per categoria. El shell despatxa els clics amb l'id
/// que porta cada botó.
pub fn botons_filtres(categories: &[Categoria]) -> String {
    categories
        .iter()
        .map(|c| {
            format!(
                r#"<button type="button" class="btn btn-brown" data-categoria-id="{}">{}</button>"#,
                c.id, c.nom
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Targeta petita d'un producte relacionat.
pub fn targeta_relacionat(producte: &Producte, config: &ImatgesConfig) -> String {
    format!(
        r#"<div class="relacionats__card">
    <div class="bg-light border border-light-subtle rounded relacionats__box">
        <a href="detall_product.html?id={id}">
        <img class="img-thumbnail relacionats__imatge" src="{imatge}" alt=""></a>
    </div>
</div>"#,
        id = producte.id,
        imatge = ruta_imatge(producte.imatge_path.as_deref(), config),
    )
}

/// Tira de productes relacionats.
pub fn tira_relacionats(productes: &[Producte], config: &ImatgesConfig) -> String {
    productes
        .iter()
        .map(|p| targeta_relacionat(p, config))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Comptador de la cistella; el badge s'amaga quan no hi ha unitats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComptadorCistella {
    pub total: i64,
}

impl ComptadorCistella {
    pub fn new(total: i64) -> Self {
        Self { total }
    }

    pub fn visible(&self) -> bool {
        self.total > 0
    }

    pub fn text(&self) -> String {
        self.total.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ImatgesConfig {
        ImatgesConfig {
            root: "../../images".to_string(),
            placeholder: "placeholder-product.jpg".to_string(),
        }
    }

    fn producte(stock: i64) -> Producte {
        Producte {
            id: 5,
            nom: "Pa de pagès".to_string(),
            descripcio: Some("Pa artesà".to_string()),
            preu: 2.5,
            stock,
            categoria_id: 1,
            imatge_path: Some("images/pa.jpg".to_string()),
            categoria_nom: None,
        }
    }

    #[test]
    fn ruta_sense_imatge_es_el_placeholder() {
        let cfg = config();
        assert_eq!(
            ruta_imatge(None, &cfg),
            "../../images/placeholder-product.jpg"
        );
        assert_eq!(
            ruta_imatge(Some(""), &cfg),
            "../../images/placeholder-product.jpg"
        );
    }

    #[test]
    fn ruta_amb_prefix_images_es_penja_de_l_arrel() {
        assert_eq!(
            ruta_imatge(Some("images/pa.jpg"), &config()),
            "../../images/pa.jpg"
        );
    }

    #[test]
    fn ruta_ja_resolta_es_deixa_tal_qual() {
        assert_eq!(
            ruta_imatge(Some("../../images/pa.jpg"), &config()),
            "../../images/pa.jpg"
        );
    }

    #[test]
    fn ruta_sense_cap_prefix_tambe_es_penja_de_l_arrel() {
        assert_eq!(ruta_imatge(Some("pa.jpg"), &config()), "../../images/pa.jpg");
    }

    #[test]
    fn el_prefix_images_nomes_es_treu_al_principi() {
        assert_eq!(
            ruta_imatge(Some("fons/images/pa.jpg"), &config()),
            "../../images/fons/images/pa.jpg"
        );
    }

    #[test]
    fn graella_buida_mostra_el_missatge_sense_botons() {
        let html = graella_productes(&[], &config());
        assert_eq!(html, r#"<p class="text-center">No hi ha productes disponibles.</p>"#);
        assert!(!html.contains("add-to-cart-btn"));
    }

    #[test]
    fn producte_esgotat_te_el_boto_deshabilitat() {
        let html = targeta_producte(&producte(0), &config());
        assert!(html.contains(" disabled>"));
        assert!(html.contains(ETIQUETA_ESGOTAT));
        assert!(!html.contains(ETIQUETA_AFEGIR));
    }

    #[test]
    fn producte_amb_stock_te_el_boto_actiu() {
        let html = targeta_producte(&producte(3), &config());
        assert!(!html.contains(" disabled>"));
        assert!(html.contains(ETIQUETA_AFEGIR));
        assert!(html.contains(r#"data-product-id="5""#));
        assert!(html.contains(r#"data-product-price="2.5""#));
        assert!(html.contains(r#"data-product-image="../../images/pa.jpg""#));
    }

    #[test]
    fn les_cometes_del_nom_s_escapen_a_l_atribut() {
        let mut p = producte(3);
        p.nom = r#"Oli "verge extra""#.to_string();
        let html = targeta_producte(&p, &config());
        assert!(html.contains(r#"data-product-name="Oli &quot;verge extra&quot;""#));
    }

    #[test]
    fn la_descripcio_llarga_es_retalla() {
        let llarga = "x".repeat(150);
        let retallada = retalla_descripcio(&llarga, DESCRIPCIO_MAX);
        assert_eq!(retallada.chars().count(), DESCRIPCIO_MAX + 1);
        assert!(retallada.ends_with('…'));

        assert_eq!(retalla_descripcio("curta", DESCRIPCIO_MAX), "curta");
    }

    #[test]
    fn el_preu_es_formata_com_al_client_original() {
        let vista = TargetaProducte::from_producte(&producte(3), &config());
        assert_eq!(vista.preu_text, "2.5€");

        let mut enter = producte(3);
        enter.preu = 4.0;
        let vista = TargetaProducte::from_producte(&enter, &config());
        assert_eq!(vista.preu_text, "4€");
    }

    #[test]
    fn comptador_amagat_quan_es_zero() {
        assert!(!ComptadorCistella::new(0).visible());
        assert!(ComptadorCistella::new(3).visible());
        assert_eq!(ComptadorCistella::new(3).text(), "3");
    }

    #[test]
    fn desplegable_i_filtres_porten_l_id_de_categoria() {
        let categories = vec![
            Categoria { id: 1, nom: "Forn".into() },
            Categoria { id: 2, nom: "Làctics".into() },
        ];

        let desplegable = elements_desplegable(&categories);
        assert!(desplegable.contains(r#"href="categories.html?id=1""#));
        assert!(desplegable.contains("Làctics"));

        let filtres = botons_filtres(&categories);
        assert!(filtres.contains(r#"data-categoria-id="2""#));
    }
}
