use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::Category;
use crate::common::{ListingId, StoreError};

/// Listing - an item a seller has posted for sale. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub seller_email: String,
    pub category: Category,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated listing fields, ready to insert. Only produced by
/// `ListingFields::validate`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub seller_email: String,
    pub category: Category,
    pub image_url: Option<String>,
}

/// Catalog filter. Both constraints are optional and combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    /// Case-insensitive substring of the title.
    pub title_contains: Option<String>,
    pub category: Option<Category>,
}

impl ListingFilter {
    pub fn is_unconstrained(&self) -> bool {
        self.title_contains.is_none() && self.category.is_none()
    }

    /// In-process equivalent of the SQL predicate in `Listing::search`.
    pub fn matches(&self, listing: &Listing) -> bool {
        let title_ok = self.title_contains.as_deref().map_or(true, |needle| {
            listing
                .title
                .to_lowercase()
                .contains(&needle.to_lowercase())
        });
        let category_ok = self.category.map_or(true, |c| listing.category == c);
        title_ok && category_ok
    }
}

/// Raw row; `category` is validated on the way out.
#[derive(Debug, sqlx::FromRow)]
struct ListingRow {
    id: ListingId,
    title: String,
    description: String,
    price: Decimal,
    seller_email: String,
    category: String,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ListingRow> for Listing {
    type Error = StoreError;

    fn try_from(row: ListingRow) -> Result<Self, Self::Error> {
        let category = row.category.parse::<Category>().map_err(|_| {
            StoreError::Corrupt(format!(
                "listing {} has unknown category {:?}",
                row.id, row.category
            ))
        })?;
        Ok(Listing {
            id: row.id,
            title: row.title,
            description: row.description,
            price: row.price,
            seller_email: row.seller_email,
            category,
            image_url: row.image_url,
            created_at: row.created_at,
        })
    }
}

/// Escapes LIKE metacharacters so user text matches literally.
fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Listing {
    /// Insert a listing (returns the record with store-assigned id and timestamp)
    pub async fn create(listing: &NewListing, pool: &PgPool) -> Result<Self, StoreError> {
        let row = sqlx::query_as::<_, ListingRow>(
            r#"
            INSERT INTO listings (
                title,
                description,
                price,
                seller_email,
                category,
                image_url
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, price, seller_email, category, image_url, created_at
            "#,
        )
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(listing.price)
        .bind(&listing.seller_email)
        .bind(listing.category.label())
        .bind(&listing.image_url)
        .fetch_one(pool)
        .await?;

        row.try_into()
    }

    /// Find listing by ID
    pub async fn find_by_id(id: ListingId, pool: &PgPool) -> Result<Option<Self>, StoreError> {
        let row = sqlx::query_as::<_, ListingRow>(
            "SELECT id, title, description, price, seller_email, category, image_url, created_at
             FROM listings
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        row.map(Listing::try_from).transpose()
    }

    /// Filtered catalog query, newest first
    pub async fn search(filter: &ListingFilter, pool: &PgPool) -> Result<Vec<Self>, StoreError> {
        let rows = sqlx::query_as::<_, ListingRow>(
            r#"
            SELECT id, title, description, price, seller_email, category, image_url, created_at
            FROM listings
            WHERE ($1::text IS NULL OR title ILIKE $1 ESCAPE '\')
              AND ($2::text IS NULL OR category = $2)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(filter.title_contains.as_deref().map(like_pattern))
        .bind(filter.category.map(Category::label))
        .fetch_all(pool)
        .await?;

        rows.into_iter().map(Listing::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(title: &str, category: Category) -> Listing {
        Listing {
            id: ListingId::new(),
            title: title.to_string(),
            description: String::new(),
            price: Decimal::from(10),
            seller_email: "seller@example.com".to_string(),
            category,
            image_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("shirt"), "%shirt%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = ListingFilter::default();
        assert!(filter.is_unconstrained());
        assert!(filter.matches(&listing("Anything", Category::Family)));
    }

    #[test]
    fn title_match_is_case_insensitive_substring() {
        let filter = ListingFilter {
            title_contains: Some("shirt".to_string()),
            category: None,
        };
        assert!(filter.matches(&listing("Red T-SHIRT", Category::Apparel)));
        assert!(!filter.matches(&listing("Red jacket", Category::Apparel)));
    }

    #[test]
    fn both_constraints_combine_with_and() {
        let filter = ListingFilter {
            title_contains: Some("shirt".to_string()),
            category: Some(Category::Apparel),
        };
        assert!(filter.matches(&listing("Shirt", Category::Apparel)));
        assert!(!filter.matches(&listing("Shirt", Category::Classifieds)));
        assert!(!filter.matches(&listing("Hat", Category::Apparel)));
    }

    #[test]
    fn unknown_stored_category_is_corrupt() {
        let row = ListingRow {
            id: ListingId::new(),
            title: "Bike".to_string(),
            description: String::new(),
            price: Decimal::from(1),
            seller_email: "a@b.com".to_string(),
            category: "Boats".to_string(),
            image_url: None,
            created_at: Utc::now(),
        };
        assert!(matches!(Listing::try_from(row), Err(StoreError::Corrupt(_))));
    }
}
