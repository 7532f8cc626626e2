//! Seeded sample data for the dashboard's product and user tables.

use chrono::DateTime;
use chrono::TimeDelta;
use chrono::Utc;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::model::Column;
use crate::model::Columns;
use crate::model::Row;
use crate::model::Value;

// =============================================================================
// Products
// =============================================================================

const PRODUCT_NAMES: &[&str] = &[
    "Laptop", "Mouse", "Keyboard", "Monitor", "Headphones", "Webcam", "Desk Lamp", "Microphone",
    "Speaker", "Tablet", "Router", "Charger",
];
const PRODUCT_ADJECTIVES: &[&str] = &["Pro", "Mini", "Ultra", "Lite", "Max", "Air"];
const CATEGORIES: &[&str] = &["computers", "accessories", "audio", "video", "networking"];
const TAGS: &[&str] = &["new", "sale", "bestseller", "refurbished", "limited"];

/// A product in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub stock: i64,
    pub active: bool,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Row for Product {
    fn row_id(&self) -> String {
        self.id.clone()
    }
}

/// Generates `count` products. The same seed always yields the same products.
pub fn products(count: usize, seed: u64) -> Vec<Product> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| Product {
            id: format!("prod-{:04}", i + 1),
            name: format!("{} {}", pick(&mut rng, PRODUCT_NAMES), pick(&mut rng, PRODUCT_ADJECTIVES)),
            category: pick(&mut rng, CATEGORIES).to_string(),
            price: Decimal::new(rng.random_range(499..=249_999), 2),
            stock: rng.random_range(0..=500),
            active: rng.random_bool(0.8),
            tags: (0..rng.random_range(0..=2))
                .map(|_| pick(&mut rng, TAGS).to_string())
                .collect(),
            created_at: timestamp(&mut rng),
        })
        .collect()
}

/// Columns of the product table.
pub fn product_columns() -> Columns<Product> {
    vec![
        Column::new("name", "Name", |p: &Product| p.name.clone().into()),
        Column::new("category", "Category", |p: &Product| p.category.clone().into()),
        Column::new("price", "Price", |p: &Product| p.price.into()).searchable(false),
        Column::new("stock", "Stock", |p: &Product| p.stock.into()).searchable(false),
        Column::new("active", "Active", |p: &Product| p.active.into()).searchable(false),
        Column::new("tags", "Tags", |p: &Product| p.tags.clone().into()).sortable(false),
        Column::new("createdAt", "Created", |p: &Product| p.created_at.into()).searchable(false),
    ]
    .into()
}

// =============================================================================
// Users
// =============================================================================

const FIRST_NAMES: &[&str] = &[
    "Ada", "Grace", "Alan", "Linus", "Margaret", "Dennis", "Barbara", "Ken", "Radia", "Edsger",
];
const LAST_NAMES: &[&str] = &[
    "Lovelace", "Hopper", "Turing", "Torvalds", "Hamilton", "Ritchie", "Liskov", "Thompson",
    "Perlman", "Dijkstra",
];
const ROLES: &[&str] = &["admin", "editor", "viewer"];
const STATUSES: &[&str] = &["active", "invited", "suspended"];
const TEAMS: &[&str] = &["Platform", "Growth", "Design", "Support"];

/// A dashboard user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    /// `None` for users not assigned to a team yet.
    pub team: Option<String>,
    pub joined_at: DateTime<Utc>,
}

impl Row for User {
    fn row_id(&self) -> String {
        self.id.to_string()
    }
}

/// Generates `count` users. The same seed always yields the same users.
pub fn users(count: usize, seed: u64) -> Vec<User> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let first = pick(&mut rng, FIRST_NAMES);
            let last = pick(&mut rng, LAST_NAMES);
            User {
                id: Uuid::from_u128(rng.random()),
                name: format!("{} {}", first, last),
                email: format!("{}.{}{}@example.com", first, last, i).to_lowercase(),
                role: pick(&mut rng, ROLES).to_string(),
                status: pick(&mut rng, STATUSES).to_string(),
                team: if rng.random_bool(0.75) {
                    Some(pick(&mut rng, TEAMS).to_string())
                } else {
                    None
                },
                joined_at: timestamp(&mut rng),
            }
        })
        .collect()
}

/// Columns of the user table.
pub fn user_columns() -> Columns<User> {
    vec![
        Column::new("name", "Name", |u: &User| u.name.clone().into()),
        Column::new("email", "Email", |u: &User| u.email.clone().into()),
        Column::new("role", "Role", |u: &User| u.role.clone().into()),
        Column::new("status", "Status", |u: &User| u.status.clone().into()),
        Column::new("team", "Team", |u: &User| u.team.clone().into()),
        Column::new("joinedAt", "Joined", |u: &User| Value::DateTime(u.joined_at)).searchable(false),
    ]
    .into()
}

// =============================================================================
// Helpers
// =============================================================================

fn pick<'a>(rng: &mut StdRng, items: &[&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

/// A time within roughly two years after 2023-01-01.
fn timestamp(rng: &mut StdRng) -> DateTime<Utc> {
    const BASE: i64 = 1_672_531_200;
    let offset = rng.random_range(0..(2 * 365 * 24 * 3600));
    DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(BASE + offset)
}
