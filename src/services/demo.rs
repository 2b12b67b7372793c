//! Demo Data
//!
//! Deterministic sample rows for `--demo` runs, so every page has something
//! to filter, sort and page through without a backend.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::domain::{
    Client, DiscountKind, EntityId, EntityStatus, PaymentMethod, Product, Promotion, Role, Sale,
    SaleItem, SaleStatus, User,
};

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

fn date(days_from_today: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(days_from_today)
}

const CATALOG: &[(&str, &str, &str, f64, i64, i64)] = &[
    ("HM-001", "Martillo de uña 16oz", "herramientas", 32_000.0, 25, 5),
    ("HM-002", "Destornillador estrella", "herramientas", 9_500.0, 3, 5),
    ("HM-003", "Llave inglesa 10\"", "herramientas", 41_000.0, 0, 3),
    ("EL-001", "Taladro percutor 650W", "electricas", 289_000.0, 7, 2),
    ("EL-002", "Pulidora 4 1/2\"", "electricas", 215_000.0, 1, 2),
    ("PL-001", "Tubo PVC 1/2\" x 6m", "plomeria", 12_400.0, 140, 30),
    ("PL-002", "Llave de paso 1/2\"", "plomeria", 18_900.0, 22, 10),
    ("PI-001", "Pintura vinilo blanco galón", "pinturas", 68_000.0, 18, 6),
    ("PI-002", "Rodillo felpa 9\"", "pinturas", 15_000.0, 0, 4),
    ("CO-001", "Cemento gris 50kg", "construccion", 31_500.0, 60, 20),
    ("CO-002", "Varilla corrugada 3/8\"", "construccion", 19_800.0, 85, 40),
    ("TO-001", "Tornillo drywall x100", "tornilleria", 8_900.0, 12, 15),
];

pub fn products() -> Vec<Product> {
    CATALOG
        .iter()
        .enumerate()
        .map(|(i, &(codigo, nombre, categoria, precio, stock, stock_minimo))| Product {
            id: EntityId::new(format!("prod-{:02}", i + 1)),
            codigo: codigo.to_string(),
            nombre: nombre.to_string(),
            descripcion: String::new(),
            categoria: categoria.to_string(),
            precio,
            stock,
            stock_minimo,
            imagen_url: None,
            estado: if i == 10 {
                EntityStatus::Inactivo
            } else {
                EntityStatus::Activo
            },
            created_at: epoch() + Duration::days(i as i64),
        })
        .collect()
}

const FIRST_NAMES: &[&str] = &["Ana", "Luis", "María", "Carlos", "Sofía"];
const LAST_NAMES: &[&str] = &["Gómez", "Rodríguez", "Martínez", "López", "Pérez"];

/// 25 clients with purchase counts spread across every segment
pub fn clients() -> Vec<Client> {
    (0..25)
        .map(|i: i64| {
            let nombre = format!(
                "{} {}",
                FIRST_NAMES[(i % 5) as usize],
                LAST_NAMES[(i / 5) as usize]
            );
            let compras = (i * 7) % 16;
            Client {
                id: EntityId::new(format!("cli-{:02}", i + 1)),
                email: format!("cliente{}@correo.co", i + 1),
                telefono: format!("+57 300 555 {:04}", 1000 + i),
                documento: format!("{}", 1_020_300 + i * 17),
                direccion: format!("Calle {} # {}-{}", 10 + i, i + 1, 20 + i),
                estado: if i % 9 == 8 {
                    EntityStatus::Inactivo
                } else {
                    EntityStatus::Activo
                },
                compras,
                total_gastado: compras as f64 * 87_500.0,
                created_at: epoch() + Duration::days(i * 3),
                nombre,
            }
        })
        .collect()
}

pub fn sales(products: &[Product], clients: &[Client]) -> Vec<Sale> {
    let methods = PaymentMethod::ALL;
    (0..18usize)
        .filter_map(|i| {
            let product = products.get(i % products.len().max(1))?;
            let client = clients.get((i * 3) % clients.len().max(1))?;
            let items = vec![SaleItem {
                producto_id: product.id.clone(),
                nombre: product.nombre.clone(),
                cantidad: (i % 4 + 1) as i64,
                precio_unitario: product.precio,
            }];
            let total = items.iter().map(SaleItem::subtotal).sum();
            Some(Sale {
                id: EntityId::new(format!("venta-{:03}", i + 1)),
                cliente_id: Some(client.id.clone()),
                cliente_nombre: client.nombre.clone(),
                items,
                total,
                metodo_pago: methods[i % methods.len()],
                estado: match i % 7 {
                    5 => SaleStatus::Pendiente,
                    6 => SaleStatus::Anulada,
                    _ => SaleStatus::Completada,
                },
                fecha: epoch() + Duration::days(i as i64 * 2) + Duration::hours(i as i64),
            })
        })
        .collect()
}

pub fn promotions() -> Vec<Promotion> {
    let promo = |id: &str,
                 codigo: &str,
                 tipo: DiscountKind,
                 valor: f64,
                 start: i64,
                 end: i64,
                 usos: i64,
                 max: Option<i64>,
                 activa: bool| Promotion {
        id: EntityId::from(id),
        codigo: codigo.to_string(),
        descripcion: String::new(),
        tipo,
        valor,
        fecha_inicio: date(start),
        fecha_fin: date(end),
        usos,
        usos_maximos: max,
        activa,
    };
    vec![
        promo("promo-1", "FERRE10", DiscountKind::Porcentaje, 10.0, -10, 20, 42, None, true),
        promo("promo-2", "VERANO25", DiscountKind::Porcentaje, 25.0, 15, 45, 0, Some(100), true),
        promo("promo-3", "BIENVENIDA", DiscountKind::MontoFijo, 15_000.0, -60, -5, 12, None, true),
        promo("promo-4", "PINTA20", DiscountKind::Porcentaje, 20.0, -3, 30, 50, Some(50), true),
        promo("promo-5", "OBRA5000", DiscountKind::MontoFijo, 5_000.0, -20, 40, 3, None, false),
    ]
}

pub fn users() -> Vec<User> {
    let user = |id: &str, nombre: &str, email: &str, rol: Role, activo: bool, dias: Option<i64>| User {
        id: EntityId::from(id),
        nombre: nombre.to_string(),
        email: email.to_string(),
        rol,
        activo,
        ultimo_acceso: dias.map(|d| epoch() + Duration::days(d)),
    };
    vec![
        user("usr-1", "Administrador", "admin@ferremarket.co", Role::Admin, true, Some(40)),
        user("usr-2", "Laura Vendedora", "laura@ferremarket.co", Role::Vendedor, true, Some(38)),
        user("usr-3", "Pedro Bodega", "pedro@ferremarket.co", Role::Bodeguero, true, None),
        user("usr-4", "Julián Antiguo", "julian@ferremarket.co", Role::Vendedor, false, Some(2)),
    ]
}
