//! Listing creation workflow against in-memory doubles.

mod common;

use common::*;
use marketplace_core::common::{StoreError, UploadError, ValidationError};
use marketplace_core::domains::listings::{
    create_listing, get_listing, query_listings, Category, CreateListingError, CreationPhase,
    CreationState, ListingCreation,
};
use marketplace_core::kernel::{MockAssetStore, TestDependencies};
use rust_decimal::Decimal;

#[tokio::test]
async fn listing_without_image_has_no_image_url() {
    let test = TestDependencies::new();
    let deps = test.deps();

    let listing = create_listing(&listing_fields("Desk lamp", "12.50", "Home Goods"), None, &deps)
        .await
        .unwrap();

    assert_eq!(listing.image_url, None);
    assert_eq!(listing.price, Decimal::new(1250, 2));
    assert_eq!(listing.category, Category::HomeGoods);
    assert!(test.assets.calls().is_empty());
    assert_eq!(test.store.listings().len(), 1);
}

#[tokio::test]
async fn listing_with_image_points_at_uploaded_asset() {
    let test = TestDependencies::new();
    let deps = test.deps();

    let listing = create_listing(
        &listing_fields("Guitar", "300", "Musical Instruments"),
        Some(png_image("guitar.PNG")),
        &deps,
    )
    .await
    .unwrap();

    let calls = test.assets.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].name.ends_with(".png"));
    assert_eq!(calls[0].content_type.as_deref(), Some("image/png"));
    assert_eq!(
        listing.image_url,
        Some(format!("https://assets.test/listing-images/{}", calls[0].name))
    );
}

#[tokio::test]
async fn upload_failure_creates_no_listing() {
    let test = TestDependencies::new()
        .with_assets(MockAssetStore::new().with_failure(UploadError::QuotaExceeded));
    let deps = test.deps();

    let err = create_listing(
        &listing_fields("Sofa", "80", "Home Goods"),
        Some(png_image("sofa.jpg")),
        &deps,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, CreateListingError::Upload(UploadError::QuotaExceeded)));
    assert_eq!(err.phase(), CreationPhase::Uploading);
    assert_eq!(test.store.insert_calls(), 0);
    assert!(test.store.listings().is_empty());
}

#[tokio::test]
async fn asset_name_collision_is_surfaced_not_retried() {
    let test = TestDependencies::new();
    let deps = test.deps();
    test.assets
        .fail_next_upload(UploadError::Conflict("1718000000000.jpg".to_string()));

    let err = create_listing(
        &listing_fields("Chair", "15", "Home Goods"),
        Some(png_image("chair.jpg")),
        &deps,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, CreateListingError::Upload(UploadError::Conflict(_))));
    assert_eq!(test.assets.calls().len(), 1);
    assert!(test.store.listings().is_empty());
}

#[tokio::test]
async fn invalid_price_performs_no_upload_and_no_insert() {
    let test = TestDependencies::new();
    let deps = test.deps();

    for price in ["abc", "-5", "", "19.999", "10000000000"] {
        let err = create_listing(
            &listing_fields("Tent", price, "Sporting Goods"),
            Some(png_image("tent.png")),
            &deps,
        )
        .await
        .unwrap_err();

        assert!(
            matches!(err, CreateListingError::Validation(_)),
            "price {price:?} gave {err:?}"
        );
        assert_eq!(err.phase(), CreationPhase::Validating);
    }

    assert!(test.assets.calls().is_empty());
    assert_eq!(test.store.insert_calls(), 0);
}

#[tokio::test]
async fn largest_storable_price_is_accepted() {
    let test = TestDependencies::new();
    let deps = test.deps();

    let listing = create_listing(
        &listing_fields("Yacht", "9999999999.99", "Vehicles"),
        None,
        &deps,
    )
    .await
    .unwrap();

    assert_eq!(listing.price, Decimal::new(999_999_999_999, 2));
}

#[tokio::test]
async fn unknown_category_is_a_validation_error() {
    let test = TestDependencies::new();
    let deps = test.deps();

    let err = create_listing(&listing_fields("Canoe", "200", "Boats"), None, &deps)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CreateListingError::Validation(ValidationError::UnknownCategory(_))
    ));
    assert_eq!(test.store.insert_calls(), 0);
}

#[tokio::test]
async fn insert_failure_after_upload_reports_orphaned_asset() {
    let test = TestDependencies::new();
    let deps = test.deps();
    test.store.fail_writes("connection reset");

    let err = create_listing(
        &listing_fields("Drill", "45", "Home Improvement"),
        Some(png_image("drill.png")),
        &deps,
    )
    .await
    .unwrap_err();

    assert_eq!(err.phase(), CreationPhase::Inserting);
    match err {
        CreateListingError::Insert {
            error: StoreError::Unavailable(_),
            orphaned_asset: Some(name),
        } => assert_eq!(test.assets.stored_names(), vec![name]),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn insert_failure_without_image_has_no_orphan() {
    let test = TestDependencies::new();
    let deps = test.deps();
    test.store.fail_writes("disk full");

    let err = create_listing(&listing_fields("Rake", "5", "Garden & Outdoor"), None, &deps)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CreateListingError::Insert {
            orphaned_asset: None,
            ..
        }
    ));
}

#[tokio::test]
async fn state_machine_visits_upload_only_with_image() {
    let test = TestDependencies::new();
    let deps = test.deps();

    let mut creation = ListingCreation::new(&deps);
    let listing = creation.run(&bike_fields(), None).await.unwrap();
    assert_eq!(
        creation.history(),
        &[
            CreationState::Idle,
            CreationState::Inserting,
            CreationState::Done(listing.id)
        ]
    );

    let mut creation = ListingCreation::new(&deps);
    let listing = creation
        .run(&bike_fields(), Some(png_image("bike.png")))
        .await
        .unwrap();
    assert_eq!(
        creation.history(),
        &[
            CreationState::Idle,
            CreationState::Uploading,
            CreationState::Inserting,
            CreationState::Done(listing.id)
        ]
    );
    assert_eq!(creation.state(), &CreationState::Done(listing.id));
}

#[tokio::test]
async fn failed_state_records_the_phase() {
    let test = TestDependencies::new()
        .with_assets(MockAssetStore::new().with_failure(UploadError::Network("timeout".into())));
    let deps = test.deps();

    let mut creation = ListingCreation::new(&deps);
    creation
        .run(&bike_fields(), Some(png_image("bike.png")))
        .await
        .unwrap_err();

    assert_eq!(
        creation.state(),
        &CreationState::Failed(CreationPhase::Uploading)
    );

    // A fresh run starts over from Idle
    let listing = creation
        .run(&bike_fields(), Some(png_image("bike.png")))
        .await
        .unwrap();
    assert_eq!(creation.history()[0], CreationState::Idle);
    assert_eq!(creation.state(), &CreationState::Done(listing.id));
}

#[tokio::test]
async fn identical_listings_are_both_accepted() {
    let test = TestDependencies::new();
    let deps = test.deps();

    let first = create_listing(&bike_fields(), None, &deps).await.unwrap();
    let second = create_listing(&bike_fields(), None, &deps).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(test.store.listings().len(), 2);
}

#[tokio::test]
async fn bike_is_created_then_found_by_title() {
    let test = TestDependencies::new();
    let deps = test.deps();
    seed_listings(&deps, &[("Kayak", "Sporting Goods"), ("Lamp", "Home Goods")]).await;

    let bike = create_listing(&bike_fields(), None, &deps).await.unwrap();
    assert_eq!(bike.price, Decimal::from(150));
    assert_eq!(bike.image_url, None);

    let found = query_listings(Some("Bike"), Some(""), &deps).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, bike.id);
}

#[tokio::test]
async fn get_listing_is_stable_across_calls() {
    let test = TestDependencies::new();
    let deps = test.deps();
    let created = create_listing(&bike_fields(), None, &deps).await.unwrap();

    let first = get_listing(&created.id.to_string(), &deps).await.unwrap();
    let second = get_listing(&created.id.to_string(), &deps).await.unwrap();

    assert_eq!(first, Some(created));
    assert_eq!(first, second);
}

#[tokio::test]
async fn get_listing_absent_for_missing_or_malformed_id() {
    let test = TestDependencies::new();
    let deps = test.deps();

    let missing = marketplace_core::common::ListingId::new().to_string();
    assert_eq!(get_listing(&missing, &deps).await.unwrap(), None);
    assert_eq!(get_listing("not-an-id", &deps).await.unwrap(), None);
}
