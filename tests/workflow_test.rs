//! Workflow tests against a mocked relay.
//!
//! The relay is simulated with wiremock so the real [`RelayClient`] parses
//! the same JSON shapes the relay produces.

use canvas_relay::config::Settings;
use canvas_relay::domain::{ShippingMethod, CANVAS_BLUEPRINT_TITLE};
use canvas_relay::workflow::{
    CatalogResolver, ProductListing, RelayClient, ResolverState, UploadSession, WorkflowError,
};
use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use serde_json::json;
use std::io::Cursor;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([240, 200, 60])));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageOutputFormat::Png).unwrap();
    out.into_inner()
}

fn client(relay: &MockServer) -> RelayClient {
    RelayClient::new(&format!("{}/api", relay.uri())).unwrap()
}

/// Blueprint 42 from Jondo (7) with a 6" and an 8" canvas
async fn mount_canvas_catalog(relay: &MockServer) {
    mount_blueprint_and_provider(relay).await;

    Mock::given(method("GET"))
        .and(path("/api/catalog/42/print_providers/7/variants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {
            "0": { "id": 1, "title": "6\" x 6\" / 1.25\"", "options": { "size": "6\u{201D} x 6\u{201D}" } },
            "1": { "id": 2, "title": "8\" x 8\" / 1.25\"", "options": { "size": "8\" x 8\"" } }
        }})))
        .mount(relay)
        .await;
}

/// Catalog, provider and shipping routes; variants are left to each test
async fn mount_blueprint_and_provider(relay: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/catalog"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [
            { "id": 6, "title": "Unisex Heavy Cotton Tee" },
            { "id": 42, "title": CANVAS_BLUEPRINT_TITLE }
        ]})))
        .mount(relay)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/catalog/42/print_providers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [{ "id": 7, "title": "Jondo" }] })))
        .mount(relay)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/catalog/42/print_providers/7/shipping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "standard": { "first_item": 999, "additional_items": 499 }
        })))
        .mount(relay)
        .await;
}

#[tokio::test]
async fn resolver_keeps_only_allow_listed_sizes() {
    let relay = MockServer::start().await;
    mount_canvas_catalog(&relay).await;
    let api = client(&relay);

    let mut resolver = CatalogResolver::from_settings(&Settings::default().catalog);
    let catalog = resolver.resolve(&api).await.unwrap();

    assert_eq!(catalog.blueprint.id, 42);
    assert_eq!(catalog.provider.id, 7);
    assert_eq!(catalog.variants.len(), 1);
    assert_eq!(catalog.variants[0].id, 1);
    assert_eq!(catalog.variants[0].price, Some(2000));
    assert_eq!(catalog.shipping.standard.first_item, 999);
    assert_eq!(catalog.shipping.express.first_item, 0);
    assert_eq!(resolver.state(), ResolverState::Ready);
}

#[tokio::test]
async fn resolver_reports_available_providers() {
    let relay = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/catalog"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [{ "id": 42, "title": CANVAS_BLUEPRINT_TITLE }] })))
        .mount(&relay)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/catalog/42/print_providers"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Jondo provider not found",
            "available_providers": ["Sensaria", "Monster Digital"]
        })))
        .mount(&relay)
        .await;

    let mut resolver = CatalogResolver::from_settings(&Settings::default().catalog);
    match resolver.resolve(&client(&relay)).await {
        Err(WorkflowError::ProviderNotFound { available }) => {
            assert_eq!(available, vec!["Sensaria", "Monster Digital"]);
        }
        other => panic!("unexpected: {:?}", other),
    }
    assert_eq!(resolver.state(), ResolverState::Error);
}

#[tokio::test]
async fn resolver_surfaces_upstream_404_on_variants() {
    let relay = MockServer::start().await;
    mount_blueprint_and_provider(&relay).await;
    let upstream_body = json!({ "status": "error", "code": 8100, "message": "Provider not found for blueprint" });
    Mock::given(method("GET"))
        .and(path("/api/catalog/42/print_providers/7/variants"))
        .respond_with(ResponseTemplate::new(404).set_body_json(&upstream_body))
        .mount(&relay)
        .await;

    let mut resolver = CatalogResolver::from_settings(&Settings::default().catalog);
    match resolver.resolve(&client(&relay)).await {
        Err(WorkflowError::Upstream { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, upstream_body);
        }
        other => panic!("unexpected: {:?}", other),
    }
    assert_eq!(resolver.state(), ResolverState::Error);
}

#[tokio::test]
async fn resolver_treats_relay_no_variants_as_no_match() {
    let relay = MockServer::start().await;
    mount_blueprint_and_provider(&relay).await;
    Mock::given(method("GET"))
        .and(path("/api/catalog/42/print_providers/7/variants"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "No valid variants found",
            "error": "The API response did not contain any valid variants"
        })))
        .mount(&relay)
        .await;

    let mut resolver = CatalogResolver::from_settings(&Settings::default().catalog);
    let err = resolver.resolve(&client(&relay)).await.unwrap_err();
    assert!(matches!(err, WorkflowError::NoMatchingVariants));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn resolver_stops_when_shipping_fails() {
    let relay = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/catalog/42/print_providers/7/shipping"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "Server error" })))
        .with_priority(1)
        .mount(&relay)
        .await;
    mount_canvas_catalog(&relay).await;

    let mut resolver = CatalogResolver::from_settings(&Settings::default().catalog);
    let err = resolver.resolve(&client(&relay)).await.unwrap_err();
    assert!(matches!(err, WorkflowError::Upstream { status: 500, .. }));
    assert_eq!(resolver.state(), ResolverState::Error);
    assert!(resolver.resolved().is_none());
}

#[tokio::test]
async fn session_submit_creates_product_with_uploaded_image() {
    let relay = MockServer::start().await;
    mount_canvas_catalog(&relay).await;

    Mock::given(method("POST"))
        .and(path("/api/uploads/images"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "img-77", "file_name": "dunes.png" })))
        .expect(1)
        .mount(&relay)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/shops/9001/products"))
        .respond_with(|req: &Request| {
            let draft: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
            let image_id = draft["print_areas"][0]["placeholders"][0]["images"][0]["id"].clone();
            let ok = image_id == "img-77"
                && draft["variants"] == json!([{ "id": 1, "price": 2000, "is_enabled": true }])
                && draft["print_details"]["format"] == "jpg"
                && draft["shipping_method"] == "express";
            if ok {
                ResponseTemplate::new(200).set_body_json(json!({ "id": "prod-5", "title": draft["title"] }))
            } else {
                ResponseTemplate::new(400).set_body_json(json!({ "message": "unexpected payload" }))
            }
        })
        .expect(1)
        .mount(&relay)
        .await;

    let api = client(&relay);
    let mut session = UploadSession::new(&api, "9001", &Settings::default());
    session.initialize().await.unwrap();
    session.select_image(&png(1000, 1400), "dunes.png").unwrap();
    session.form.title = "Dunes".to_string();
    session.form.description = "Stretched canvas".to_string();
    session.form.shipping_method = ShippingMethod::Express;

    let created = session.submit().await.unwrap();
    assert_eq!(created.id, "prod-5");
    assert!(session.form.image.is_none());
}

#[tokio::test]
async fn session_upstream_error_is_surfaced_as_is() {
    let relay = MockServer::start().await;
    mount_canvas_catalog(&relay).await;

    Mock::given(method("POST"))
        .and(path("/api/uploads/images"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "img-77" })))
        .mount(&relay)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/shops/9001/products"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Shop not found" })))
        .mount(&relay)
        .await;

    let api = client(&relay);
    let mut session = UploadSession::new(&api, "9001", &Settings::default());
    session.initialize().await.unwrap();
    session.select_image(&png(1000, 1000), "a.png").unwrap();
    session.form.title = "A".to_string();
    session.form.description = "B".to_string();

    let err = session.submit().await.unwrap_err();
    assert!(matches!(err, WorkflowError::Upstream { status: 404, .. }));
    assert_eq!(err.user_message(), "Shop not found");
}

#[tokio::test]
async fn listing_walks_every_page() {
    let relay = MockServer::start().await;
    for page in 1..=2 {
        let data: Vec<_> = (0..if page == 1 { 50 } else { 10 })
            .map(|i| json!({
                "id": format!("p{}-{}", page, i),
                "title": "Canvas",
                "print_provider_id": if i == 0 { 99 } else { 105 },
                "visible": true
            }))
            .collect();
        Mock::given(method("GET"))
            .and(path("/api/shops/9001/products"))
            .and(query_param("page", page.to_string()))
            .and(query_param("limit", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "current_page": page, "data": data, "total": 60, "last_page": 2
            })))
            .expect(1)
            .mount(&relay)
            .await;
    }

    let listing = ProductListing::new(vec![105, 2], 50);
    let products = listing.fetch_all(&client(&relay), "9001").await.unwrap();

    assert_eq!(products.len(), 58);
}

#[tokio::test]
async fn transport_failure_is_server_error() {
    let api = RelayClient::new("http://127.0.0.1:1/api").unwrap();
    let mut resolver = CatalogResolver::from_settings(&Settings::default().catalog);

    let err = resolver.resolve(&api).await.unwrap_err();
    assert!(matches!(err, WorkflowError::Transport(_)));
    assert_eq!(err.user_message(), "Server error");
}
