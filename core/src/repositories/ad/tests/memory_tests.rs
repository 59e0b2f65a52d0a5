//! Unit tests for the in-memory ad repository

use crate::domain::entities::ad::{Ad, Category};
use crate::errors::DomainError;
use crate::repositories::ad::{AdRepository, InMemoryAdRepository};

async fn seeded() -> InMemoryAdRepository {
    let repo = InMemoryAdRepository::new();
    repo.create_category(Category::new("Bread", None)).await.unwrap();
    repo.create_category(Category::new("Vegetables", None)).await.unwrap();
    for (heading, category) in [
        ("Sourdough loaves", 1),
        ("Carrots", 2),
        ("Rye bread", 1),
        ("Potatoes", 2),
        ("Baguettes", 1),
        ("Leeks and onions", 2),
    ] {
        repo.create(Ad::new(heading, "Surplus from today", None, category, 1, 1))
            .await
            .unwrap();
    }
    repo
}

#[tokio::test]
async fn test_find_newest_limits_and_orders() {
    let repo = seeded().await;
    let ads = repo.find_newest(5).await.unwrap();

    assert_eq!(ads.len(), 5);
    assert_eq!(ads[0].heading, "Leeks and onions");
    assert_eq!(ads[4].heading, "Carrots");
}

#[tokio::test]
async fn test_search_by_phrase_and_category() {
    let repo = seeded().await;

    let bread = repo.search("BREAD", None).await.unwrap();
    assert_eq!(bread.len(), 1);
    assert_eq!(bread[0].heading, "Rye bread");

    let surplus_veg = repo.search("surplus", Some(2)).await.unwrap();
    assert_eq!(surplus_veg.len(), 3);
    assert!(surplus_veg.iter().all(|ad| ad.category_id == 2));
}

#[tokio::test]
async fn test_update_missing_ad() {
    let repo = InMemoryAdRepository::new();
    let mut ad = Ad::new("x", "y", None, 1, 1, 1);
    ad.id = 9;
    assert!(matches!(repo.update(ad).await, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_categories_sorted() {
    let repo = seeded().await;
    let categories = repo.categories().await.unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, "Bread");
    assert!(repo.find_category(2).await.unwrap().is_some());
    assert!(repo.find_category(3).await.unwrap().is_none());
}
