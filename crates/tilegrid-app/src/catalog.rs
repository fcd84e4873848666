// Role catalogs: which launcher tiles each role sees, and where they navigate.

/// One launcher tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub target: &'static str,
}

const fn tile(id: &'static str, label: &'static str, target: &'static str) -> TileSpec {
    TileSpec { id, label, target }
}

const DASHBOARD: TileSpec = tile("dashboard", "Dashboard", "/dashboard");
const PRODUCTS: TileSpec = tile("products", "Products", "/products");
const INVENTORY: TileSpec = tile("inventory", "Inventory", "/inventory");
const ORDERS: TileSpec = tile("orders", "Orders", "/orders");
const CATEGORIES: TileSpec = tile("categories", "Categories", "/categories");
const STAFF: TileSpec = tile("staff", "Staff", "/staff");
const ORGANIZATIONS: TileSpec = tile("organizations", "Organizations", "/organizations");
const ANALYTICS: TileSpec = tile("analytics", "Analytics", "/analytics");
const MESSAGES: TileSpec = tile("messages", "Messages", "/messages");
const SETTINGS: TileSpec = tile("settings", "Settings", "/settings");

const ADMIN: &[TileSpec] = &[
    DASHBOARD,
    PRODUCTS,
    INVENTORY,
    ORDERS,
    CATEGORIES,
    STAFF,
    ORGANIZATIONS,
    ANALYTICS,
    MESSAGES,
    SETTINGS,
];

const SELLER: &[TileSpec] = &[DASHBOARD, PRODUCTS, INVENTORY, ORDERS, ANALYTICS, MESSAGES];

const STAFF_ROLE: &[TileSpec] = &[DASHBOARD, ORDERS, INVENTORY, MESSAGES];

/// Tiles shown for `role`. Unknown roles get an empty launcher.
pub fn tiles_for_role(role: &str) -> &'static [TileSpec] {
    match role.trim().to_ascii_lowercase().as_str() {
        "admin" => ADMIN,
        "seller" => SELLER,
        "staff" => STAFF_ROLE,
        other => {
            log::warn!("Unknown role {:?}; no launcher tiles", other);
            &[]
        }
    }
}
