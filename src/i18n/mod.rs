//! i18n - Internationalization Module
//!
//! Provides simple translation functions using HashMap-based lookups.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Supported locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// Spanish
    #[default]
    Es,
    /// English
    En,
}

impl Locale {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::Es => "Español",
            Locale::En => "English",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
        }
    }

    /// Parse "es", "en", "es-CO", "en_US", ...
    pub fn from_code(code: &str) -> Option<Self> {
        let lang = code
            .trim()
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match lang.as_str() {
            "es" => Some(Locale::Es),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    /// Locale from the OS settings, Spanish when unsupported
    pub fn detect() -> Self {
        let current = locale_config::Locale::current().to_string();
        Self::from_code(&current).unwrap_or_default()
    }

    /// Configured code wins over the system locale
    pub fn resolve(configured: &str) -> Self {
        Self::from_code(configured).unwrap_or_else(Self::detect)
    }
}

/// Translation resources
static TRANSLATIONS: OnceLock<HashMap<&'static str, (&'static str, &'static str)>> =
    OnceLock::new();

/// Initialize translations (key -> (es, en))
fn init_translations() -> HashMap<&'static str, (&'static str, &'static str)> {
    let mut map = HashMap::new();

    // App
    map.insert("app-title", ("FerreMarket Administración", "FerreMarket Admin"));

    // Routes
    map.insert("route-landing", ("Inicio", "Home"));
    map.insert("route-login", ("Iniciar sesión", "Sign in"));
    map.insert("route-dashboard", ("Panel", "Dashboard"));
    map.insert("route-products", ("Productos", "Products"));
    map.insert("route-clients", ("Clientes", "Clients"));
    map.insert("route-sales", ("Ventas", "Sales"));
    map.insert("route-promotions", ("Promociones", "Promotions"));
    map.insert("route-users", ("Usuarios", "Users"));

    // Entities
    map.insert("entity-product", ("Producto", "Product"));
    map.insert("entity-client", ("Cliente", "Client"));
    map.insert("entity-sale", ("Venta", "Sale"));
    map.insert("entity-promotion", ("Promoción", "Promotion"));
    map.insert("entity-user", ("Usuario", "User"));

    // Table columns
    map.insert("col-id", ("ID", "ID"));
    map.insert("col-code", ("Código", "Code"));
    map.insert("col-name", ("Nombre", "Name"));
    map.insert("col-category", ("Categoría", "Category"));
    map.insert("col-price", ("Precio", "Price"));
    map.insert("col-stock", ("Stock", "Stock"));
    map.insert("col-stock-level", ("Nivel", "Level"));
    map.insert("col-status", ("Estado", "Status"));
    map.insert("col-document", ("Documento", "Document"));
    map.insert("col-email", ("Correo", "Email"));
    map.insert("col-phone", ("Teléfono", "Phone"));
    map.insert("col-purchases", ("Compras", "Purchases"));
    map.insert("col-segment", ("Segmento", "Segment"));
    map.insert("col-total-spent", ("Total gastado", "Total spent"));
    map.insert("col-client", ("Cliente", "Client"));
    map.insert("col-units", ("Unidades", "Units"));
    map.insert("col-total", ("Total", "Total"));
    map.insert("col-payment", ("Pago", "Payment"));
    map.insert("col-date", ("Fecha", "Date"));
    map.insert("col-type", ("Tipo", "Type"));
    map.insert("col-value", ("Valor", "Value"));
    map.insert("col-valid-from", ("Desde", "From"));
    map.insert("col-valid-to", ("Hasta", "To"));
    map.insert("col-uses", ("Usos", "Uses"));
    map.insert("col-role", ("Rol", "Role"));
    map.insert("col-last-access", ("Último acceso", "Last access"));

    // Stats
    map.insert("stat-total", ("Total", "Total"));
    map.insert("stat-active", ("Activos", "Active"));
    map.insert("stat-inactive", ("Inactivos", "Inactive"));
    map.insert("stat-low-stock", ("Stock bajo", "Low stock"));
    map.insert("stat-out-of-stock", ("Agotados", "Out of stock"));
    map.insert("stat-inventory-value", ("Valor inventario", "Inventory value"));
    map.insert("stat-segment-frecuente", ("Frecuentes", "Frequent"));
    map.insert("stat-segment-regular", ("Regulares", "Regular"));
    map.insert("stat-segment-nuevo", ("Nuevos", "New"));
    map.insert("stat-total-spent", ("Total comprado", "Total spent"));
    map.insert("stat-revenue", ("Ingresos", "Revenue"));
    map.insert("stat-units", ("Unidades vendidas", "Units sold"));
    map.insert("stat-average-ticket", ("Ticket promedio", "Average ticket"));
    map.insert("stat-pending", ("Pendientes", "Pending"));
    map.insert("stat-current", ("Vigentes", "Current"));
    map.insert("stat-scheduled", ("Programadas", "Scheduled"));
    map.insert("stat-expired", ("Expiradas", "Expired"));
    map.insert("stat-redemptions", ("Usos totales", "Redemptions"));
    map.insert("stat-admins", ("Administradores", "Administrators"));

    // Segments and stock levels
    map.insert("segment-frequent", ("Frecuente", "Frequent"));
    map.insert("segment-regular", ("Regular", "Regular"));
    map.insert("segment-new", ("Nuevo", "New"));
    map.insert("stock-agotado", ("Agotado", "Out of stock"));
    map.insert("stock-bajo", ("Bajo", "Low"));
    map.insert("stock-disponible", ("Disponible", "Available"));

    // Status values
    map.insert("status-activo", ("Activo", "Active"));
    map.insert("status-inactivo", ("Inactivo", "Inactive"));
    map.insert("status-completada", ("Completada", "Completed"));
    map.insert("status-pendiente", ("Pendiente", "Pending"));
    map.insert("status-anulada", ("Anulada", "Voided"));
    map.insert("status-programada", ("Programada", "Scheduled"));
    map.insert("status-vigente", ("Vigente", "Current"));
    map.insert("status-expirada", ("Expirada", "Expired"));
    map.insert("status-inactiva", ("Inactiva", "Inactive"));
    map.insert("status-agotada", ("Agotada", "Used up"));

    // Table
    map.insert("table-no-data", ("Sin datos", "No data"));
    map.insert("table-loading", ("Cargando...", "Loading..."));
    map.insert("table-page", ("Página {page} de {pages}", "Page {page} of {pages}"));
    map.insert("table-results", ("{count} resultados", "{count} results"));
    map.insert("table-selected", ("{count} seleccionados", "{count} selected"));
    map.insert("table-yes", ("Sí", "Yes"));
    map.insert("table-no", ("No", "No"));

    // Notices
    map.insert("notice-loaded", ("{entity}: {count} registros", "{entity}: {count} records"));
    map.insert("notice-created", ("{entity} creado: {id}", "{entity} created: {id}"));
    map.insert("notice-updated", ("{entity} actualizado: {id}", "{entity} updated: {id}"));
    map.insert("notice-deleted", ("{entity}: {count} eliminados", "{entity}: {count} deleted"));
    map.insert("notice-image-uploaded", ("Imagen guardada: {url}", "Image stored: {url}"));
    map.insert("notice-signed-in", ("Sesión iniciada: {email}", "Signed in: {email}"));
    map.insert("notice-signed-out", ("Sesión cerrada", "Signed out"));
    map.insert("notice-failed", ("{entity} ({action}) falló: {message}", "{entity} ({action}) failed: {message}"));

    // Access
    // Validation
    map.insert("validation-required", ("Campo obligatorio", "Required field"));
    map.insert("validation-product-code-taken", ("Ya existe un producto con este código", "A product with this code already exists"));
    map.insert("validation-price-positive", ("El precio debe ser mayor que cero", "Price must be greater than zero"));
    map.insert("validation-stock-negative", ("El stock no puede ser negativo", "Stock cannot be negative"));
    map.insert("validation-min-stock-negative", ("El stock mínimo no puede ser negativo", "Minimum stock cannot be negative"));
    map.insert("validation-image-url", ("La URL de imagen no es válida", "Image URL is not valid"));
    map.insert("validation-document-taken", ("Ya existe un cliente con este documento", "A client with this document already exists"));
    map.insert("validation-email", ("Correo electrónico no válido", "Invalid email address"));
    map.insert("validation-phone", ("Teléfono no válido", "Invalid phone number"));
    map.insert("validation-purchases-negative", ("El número de compras no puede ser negativo", "Purchase count cannot be negative"));
    map.insert("validation-sale-empty", ("La venta debe tener al menos un producto", "A sale needs at least one product"));
    map.insert("validation-item-quantity", ("Cantidad inválida para {name}", "Invalid quantity for {name}"));
    map.insert("validation-item-price", ("Precio inválido para {name}", "Invalid price for {name}"));
    map.insert("validation-total-mismatch", ("El total no coincide con los productos", "Total does not match the products"));
    map.insert("validation-user-email-taken", ("Ya existe un usuario con este correo", "A user with this email already exists"));
    map.insert("validation-password-length", ("La contraseña debe tener al menos {min} caracteres", "Password must be at least {min} characters"));
    map.insert("validation-code-length", ("El código debe tener entre {min} y {max} caracteres", "Code must be between {min} and {max} characters"));
    map.insert("validation-code-chars", ("Solo letras, números, guiones y guiones bajos", "Only letters, digits, hyphens and underscores"));
    map.insert("validation-promo-code-taken", ("Ya existe una promoción con este código", "A promotion with this code already exists"));
    map.insert("validation-discount-positive", ("El descuento debe ser mayor que cero", "Discount must be greater than zero"));
    map.insert("validation-percent-max", ("El porcentaje no puede superar 100", "Percentage cannot exceed 100"));
    map.insert("validation-end-after-start", ("La fecha de fin debe ser posterior a la de inicio", "End date must be after the start date"));
    map.insert("validation-max-uses", ("El límite de usos debe ser al menos 1", "Usage limit must be at least 1"));
    map.insert("validation-number", ("Ingrese un número válido", "Enter a valid number"));
    map.insert("validation-date", ("Fecha no válida (AAAA-MM-DD)", "Invalid date (YYYY-MM-DD)"));
    map.insert("validation-integer", ("Ingrese un número entero", "Enter a whole number"));

    map.insert("access-sign-in-required", ("Debe iniciar sesión", "Sign in required"));
    map.insert("access-admin-only", ("Solo administradores", "Administrators only"));

    map
}

/// Get translations
fn translations() -> &'static HashMap<&'static str, (&'static str, &'static str)> {
    TRANSLATIONS.get_or_init(init_translations)
}

/// Translate a key; unknown keys come back unchanged
pub fn t<'a>(locale: Locale, key: &'a str) -> &'a str {
    match translations().get(key) {
        Some(&(es, en)) => match locale {
            Locale::Es => es,
            Locale::En => en,
        },
        None => key,
    }
}

/// Translate and substitute `{name}` placeholders
pub fn t_format(locale: Locale, key: &str, args: &[(&str, &str)]) -> String {
    let mut result = t(locale, key).to_string();
    for (name, value) in args {
        result = result.replace(&format!("{{{name}}}"), value);
    }
    result
}

/// Whether a key has a translation
pub fn has_key(key: &str) -> bool {
    translations().contains_key(key)
}
