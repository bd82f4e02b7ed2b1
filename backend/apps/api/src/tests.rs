//! Tests for the assembled application
//! Everything runs through the same router the binary serves, backed by the
//! in-memory stores of the feature crates.

#[cfg(test)]
mod app_tests {
    use std::sync::Arc;

    use auth::AuthConfig;
    use auth::testing::InMemoryAuthRepository;
    use axum::body::Body;
    use axum::http::{Request, Response, StatusCode, header};
    use listing::ListingConfig;
    use listing::domain::entity::listing::Listing;
    use listing::domain::value_object::{
        geometry::Geometry,
        listing_fields::{ListingDraft, ListingFields},
        listing_image::ListingImage,
    };
    use listing::testing::{FakeGeocoder, FakeImageUploader, InMemoryListingRepository};
    use tower::ServiceExt;

    use crate::{AppParts, build_router, with_method_override};

    struct TestApp {
        auth_repo: Arc<InMemoryAuthRepository>,
        auth_config: Arc<AuthConfig>,
        listings: Arc<InMemoryListingRepository>,
    }

    impl TestApp {
        fn new() -> Self {
            Self {
                auth_repo: Arc::new(InMemoryAuthRepository::new()),
                auth_config: Arc::new(AuthConfig::development()),
                listings: Arc::new(InMemoryListingRepository::new()),
            }
        }

        async fn send(&self, request: Request<Body>) -> Response<Body> {
            let router = build_router(AppParts {
                auth_repo: self.auth_repo.clone(),
                auth_config: self.auth_config.clone(),
                listing_repo: self.listings.clone(),
                geocoder: Arc::new(FakeGeocoder::new()),
                uploader: Arc::new(FakeImageUploader::new()),
                listing_config: Arc::new(ListingConfig::development()),
            });
            with_method_override(router).oneshot(request).await.unwrap()
        }

        /// Signs up through the form and returns the session `Cookie` value
        async fn sign_up(&self, user_name: &str) -> String {
            let response = self
                .send(
                    Request::builder()
                        .method("POST")
                        .uri("/signup")
                        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                        .body(Body::from(format!(
                            "username={user_name}&password=tide-pool-42"
                        )))
                        .unwrap(),
                )
                .await;
            assert_eq!(location(&response), "/listings");

            let name = &self.auth_config.session_cookie_name;
            response
                .headers()
                .get_all(header::SET_COOKIE)
                .iter()
                .filter_map(|v| v.to_str().ok())
                .map(|v| v.split(';').next().unwrap_or_default().to_string())
                .find(|pair| pair.starts_with(&format!("{name}=")))
                .unwrap()
        }
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn location<B>(response: &Response<B>) -> &str {
        response.headers()[header::LOCATION].to_str().unwrap()
    }

    fn listing_owned_by(owner: kernel::id::UserId) -> Listing {
        let draft = ListingDraft::new(ListingFields {
            title: Some("Historic Canal House".to_string()),
            description: Some("Stay in a piece of history".to_string()),
            price: Some("1800".to_string()),
            location: Some("Amsterdam".to_string()),
            country: Some("Netherlands".to_string()),
        })
        .unwrap();
        Listing::new(
            draft,
            owner,
            ListingImage::new("https://images.unsplash.com/photo-1", "listingimage"),
            Geometry::point(4.90, 52.37).unwrap(),
        )
    }

    async fn body_json(response: Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root_redirects_to_index() {
        let app = TestApp::new();
        let response = app.send(get("/", None)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/listings");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = TestApp::new();
        let response = app.send(get("/nowhere", None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_session_reaches_listing_views() {
        let app = TestApp::new();
        let cookie = app.sign_up("alice").await;

        let response = app.send(get("/listings/new", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["currentUser"]["userName"], "alice");
    }

    #[tokio::test]
    async fn test_form_delete_through_method_override() {
        let app = TestApp::new();
        let cookie = app.sign_up("alice").await;

        // find the user id the session belongs to via the index view
        let body = body_json(app.send(get("/listings", Some(&cookie))).await).await;
        let owner: kernel::id::UserId = body["currentUser"]["id"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();
        let listing = listing_owned_by(owner);
        app.listings.insert(listing.clone());

        let response = app
            .send(
                Request::builder()
                    .method("POST")
                    .uri(format!("/listings/{}?_method=DELETE", listing.id))
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/listings");
        assert!(app.listings.is_empty());
    }

    #[tokio::test]
    async fn test_anonymous_form_delete_goes_to_login() {
        let app = TestApp::new();
        let listing = listing_owned_by(kernel::id::UserId::new());
        app.listings.insert(listing.clone());

        let response = app
            .send(
                Request::builder()
                    .method("POST")
                    .uri(format!("/listings/{}?_method=DELETE", listing.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
        assert_eq!(app.listings.len(), 1);
    }

    #[tokio::test]
    async fn test_logout_ends_session() {
        let app = TestApp::new();
        let cookie = app.sign_up("alice").await;

        let response = app.send(get("/logout", Some(&cookie))).await;
        assert_eq!(location(&response), "/listings");

        let response = app.send(get("/listings/new", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
    }
}
