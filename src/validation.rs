//! Input validation and sanitization module
//!
//! Centralized validation for:
//! - Paging parameters sent to the catalog API
//! - Cart quantities
//! - Search queries
//! - Product identifiers

/// Validation result type
pub type ValidationResult = Result<(), String>;

/// Validate paging parameters for product listings
/// - `page` must be >= 0
/// - `size` must be > 0 and at most 100
pub fn validate_page_params(page: i64, size: i64) -> ValidationResult {
    if page < 0 {
        return Err("La pàgina no pot ser negativa".into());
    }

    if size <= 0 {
        return Err("La mida de pàgina ha de ser més gran que 0".into());
    }

    if size > 100 {
        return Err("La mida de pàgina màxima és 100".into());
    }

    Ok(())
}

/// Validate a cart quantity
pub fn validate_quantity(qty: i64, min: Option<i64>, max: Option<i64>) -> ValidationResult {
    if qty < 0 {
        return Err("La quantitat no pot ser negativa".into());
    }

    let min_val = min.unwrap_or(0);
    let max_val = max.unwrap_or(1_000_000);

    if qty < min_val {
        return Err(format!("La quantitat mínima és {}", min_val));
    }

    if qty > max_val {
        return Err(format!("La quantitat màxima és {}", max_val));
    }

    Ok(())
}

/// Validate a product identifier
pub fn validate_product_id(id: i64) -> ValidationResult {
    if id <= 0 {
        return Err("L'identificador de producte no és vàlid".into());
    }

    Ok(())
}

/// Validate a product search query
/// - Must be non-empty after trimming
/// - At most 100 characters
pub fn validate_search_query(query: &str) -> ValidationResult {
    let trimmed = query.trim();

    if trimmed.is_empty() {
        return Err("El terme de cerca no pot estar buit".into());
    }

    if trimmed.chars().count() > 100 {
        return Err("El terme de cerca és massa llarg (màx 100 caràcters)".into());
    }

    Ok(())
}

/// Sanitize string input (remove control characters)
pub fn sanitize_string(input: &str) -> String {
    input.chars().filter(|c| !c.is_control()).collect()
}
