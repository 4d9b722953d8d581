//! Review commands.

use dovini_core::{ProductId, Rating};
use dovini_storefront::AppState;
use dovini_storefront::stores::NewReview;
use tracing::info;

use super::CliError;
use super::catalog::Catalog;

/// Review submission arguments.
#[derive(Debug, Clone)]
pub struct ReviewArgs {
    pub stars: u8,
    pub author: String,
    pub title: String,
    pub body: String,
}

/// Submit a review for a catalog product.
///
/// # Errors
///
/// Returns an error if the product is unknown, the rating is out of range,
/// or the review text is rejected.
pub fn add(
    state: &AppState,
    catalog: &Catalog,
    id: ProductId,
    args: ReviewArgs,
) -> Result<(), CliError> {
    let product = catalog.get(id)?;
    let review = state.reviews().add_review(NewReview {
        product_id: product.id,
        author: args.author,
        rating: Rating::new(args.stars)?,
        title: args.title,
        body: args.body,
    })?;
    state
        .toasts()
        .success(format!("Thanks {}, your review was posted", review.author));
    Ok(())
}

/// Show reviews for a product, newest first.
///
/// # Errors
///
/// Returns an error if the product is not in the catalog.
pub fn show(state: &AppState, catalog: &Catalog, id: ProductId) -> Result<(), CliError> {
    let product = catalog.get(id)?;
    let reviews = state.reviews().reviews_for(id);
    let Some(average) = state.reviews().average_rating(id) else {
        info!("No reviews yet for {}", product.name);
        return Ok(());
    };

    info!("Reviews for {} (average {average} from {})", product.name, reviews.len());
    for review in &reviews {
        info!(
            "  [{}] {} - {} ({})",
            review.rating,
            review.title,
            review.author,
            review.created_at.format("%Y-%m-%d")
        );
        info!("    {}", review.body);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use dovini_storefront::StorefrontConfig;
    use dovini_storefront::storage::MemoryStorage;

    use super::*;

    fn args(stars: u8) -> ReviewArgs {
        ReviewArgs {
            stars,
            author: "Luz".to_string(),
            title: "Lovely".to_string(),
            body: "Soft and well made.".to_string(),
        }
    }

    #[test]
    fn test_add_validates_rating() {
        let state = AppState::with_storage(
            StorefrontConfig::default(),
            Arc::new(MemoryStorage::new()),
        );
        let catalog =
            Catalog::from_yaml("- { id: 1, name: A, image: a.jpg, price: 1, categoryId: 1 }")
                .unwrap();

        add(&state, &catalog, ProductId::new(1), args(5)).unwrap();
        assert!(matches!(
            add(&state, &catalog, ProductId::new(1), args(0)),
            Err(CliError::Rating(_))
        ));
        assert_eq!(state.reviews().review_count(ProductId::new(1)), 1);
        show(&state, &catalog, ProductId::new(1)).unwrap();
    }
}
