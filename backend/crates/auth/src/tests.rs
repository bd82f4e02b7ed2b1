//! Unit tests for the auth crate
//! Use cases run against the in-memory repository; HTTP behavior is
//! exercised through the router with `tower::ServiceExt::oneshot`.

#[cfg(test)]
mod support {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, Response, header};

    use crate::application::config::AuthConfig;
    use crate::presentation::{AuthAppState, auth_router_generic, resolve_session};
    use crate::testing::InMemoryAuthRepository;

    pub fn config() -> Arc<AuthConfig> {
        Arc::new(AuthConfig::development())
    }

    pub fn app(repo: Arc<InMemoryAuthRepository>, config: Arc<AuthConfig>) -> Router {
        let state = AuthAppState {
            repo: repo.clone(),
            config: config.clone(),
        };
        auth_router_generic(repo, config).layer(axum::middleware::from_fn_with_state(
            state,
            resolve_session::<InMemoryAuthRepository>,
        ))
    }

    pub fn form_post(uri: &str, body: &str, cookies: &[String]) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        for cookie in cookies {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    pub fn get(uri: &str, cookies: &[String]) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        for cookie in cookies {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    /// `name=value` pair of the `Set-Cookie` header for `name`
    pub fn set_cookie_pair<B>(response: &Response<B>, name: &str) -> Option<String> {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or_default().to_string())
            .find(|pair| pair.starts_with(&format!("{name}=")))
    }

    pub fn location<B>(response: &Response<B>) -> &str {
        response.headers()[header::LOCATION].to_str().unwrap()
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use chrono::Duration;

    use super::support::config;
    use crate::application::{
        CheckSessionUseCase, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput,
        SignUpUseCase,
    };
    use crate::domain::entity::auth_session::AuthSession;
    use crate::domain::value_object::user_id::UserId;
    use crate::error::AuthError;
    use crate::testing::InMemoryAuthRepository;

    fn sign_up_use_case(
        repo: &Arc<InMemoryAuthRepository>,
    ) -> SignUpUseCase<InMemoryAuthRepository, InMemoryAuthRepository> {
        SignUpUseCase::new(repo.clone(), repo.clone(), config())
    }

    fn sign_up_input(user_name: &str) -> SignUpInput {
        SignUpInput {
            user_name: user_name.to_string(),
            password: "tide-pool-42".to_string(),
            email: Some(String::new()),
        }
    }

    #[tokio::test]
    async fn test_sign_up_logs_the_user_in() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let config = config();
        let output = SignUpUseCase::new(repo.clone(), repo.clone(), config.clone())
            .execute(sign_up_input("Alice"))
            .await
            .unwrap();

        assert_eq!(output.user.user_name, "Alice");
        assert_eq!(repo.user_count(), 1);
        assert_eq!(repo.session_count(), 1);

        let resolved = CheckSessionUseCase::new(repo.clone(), config)
            .execute(Some(&output.session_token))
            .await
            .unwrap();
        assert_eq!(resolved, Some(output.user));
    }

    #[tokio::test]
    async fn test_sign_up_rejects_duplicate_case_insensitively() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        sign_up_use_case(&repo)
            .execute(sign_up_input("alice"))
            .await
            .unwrap();

        let err = sign_up_use_case(&repo)
            .execute(sign_up_input("ALICE"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNameTaken));
        assert_eq!(
            err.to_string(),
            "A user with the given username is already registered"
        );
    }

    #[tokio::test]
    async fn test_failed_sign_up_leaves_no_user_behind() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        repo.fail_credential_inserts();

        let err = sign_up_use_case(&repo)
            .execute(sign_up_input("alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Infrastructure(_)));
        assert_eq!(repo.user_count(), 0);
        assert_eq!(repo.session_count(), 0);
    }

    #[tokio::test]
    async fn test_sign_up_validation_errors() {
        let repo = Arc::new(InMemoryAuthRepository::new());

        let err = sign_up_use_case(&repo)
            .execute(SignUpInput {
                password: "12345678".to_string(),
                ..sign_up_input("alice")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        let err = sign_up_use_case(&repo)
            .execute(SignUpInput {
                email: Some("not-an-email".to_string()),
                ..sign_up_input("alice")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(msg) if msg == "Invalid email format"));

        let err = sign_up_use_case(&repo)
            .execute(sign_up_input("listings"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
        assert_eq!(repo.user_count(), 0);
    }

    #[tokio::test]
    async fn test_sign_in_failures_are_indistinguishable() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        sign_up_use_case(&repo)
            .execute(sign_up_input("alice"))
            .await
            .unwrap();
        let sign_in = SignInUseCase::new(repo.clone(), repo.clone(), repo.clone(), config());

        let wrong_password = sign_in
            .execute(SignInInput {
                user_name: "alice".to_string(),
                password: "tide-pool-43".to_string(),
            })
            .await
            .unwrap_err();
        let unknown_user = sign_in
            .execute(SignInInput {
                user_name: "bob".to_string(),
                password: "tide-pool-42".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(wrong_password.to_string(), "Password or username is incorrect");
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn test_sign_in_is_case_insensitive_on_user_name() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        sign_up_use_case(&repo)
            .execute(sign_up_input("Alice"))
            .await
            .unwrap();

        let output = SignInUseCase::new(repo.clone(), repo.clone(), repo.clone(), config())
            .execute(SignInInput {
                user_name: "alice".to_string(),
                password: "tide-pool-42".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(output.user.user_name, "Alice");
        assert_eq!(repo.session_count(), 2);
    }

    #[tokio::test]
    async fn test_expired_session_is_absent_and_deleted() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let config = config();
        let session = AuthSession::new(UserId::new(), "alice", Duration::seconds(-1));
        let token =
            crate::application::session_token::sign(&config.session_secret, session.session_id)
                .unwrap();
        repo.insert_session(session);

        let resolved = CheckSessionUseCase::new(repo.clone(), config)
            .execute(Some(&token))
            .await
            .unwrap();
        assert_eq!(resolved, None);
        assert_eq!(repo.session_count(), 0);
    }

    #[tokio::test]
    async fn test_token_from_other_secret_is_ignored() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let output = sign_up_use_case(&repo)
            .execute(sign_up_input("alice"))
            .await
            .unwrap();

        // development() draws a fresh random secret
        let resolved = CheckSessionUseCase::new(repo.clone(), config())
            .execute(Some(&output.session_token))
            .await
            .unwrap();
        assert_eq!(resolved, None);
        assert_eq!(repo.session_count(), 1);
    }

    #[tokio::test]
    async fn test_sign_out_propagates_store_failure() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let config = config();
        let output = SignUpUseCase::new(repo.clone(), repo.clone(), config.clone())
            .execute(sign_up_input("alice"))
            .await
            .unwrap();

        repo.fail_session_deletes();
        let err = SignOutUseCase::new(repo.clone(), config)
            .execute(&output.session_token)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Infrastructure(_)));
        assert_eq!(repo.session_count(), 1);
    }

    #[tokio::test]
    async fn test_cleanup_expired_sessions() {
        use crate::domain::repository::AuthSessionRepository;

        let repo = InMemoryAuthRepository::new();
        repo.insert_session(AuthSession::new(UserId::new(), "a", Duration::seconds(-5)));
        repo.insert_session(AuthSession::new(UserId::new(), "b", Duration::hours(1)));

        assert_eq!(AuthSessionRepository::cleanup_expired(&repo).await.unwrap(), 1);
        assert_eq!(repo.session_count(), 1);
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::http::{StatusCode, header};
    use platform::redirect::save_return_to;
    use tower::ServiceExt;

    use super::support::{app, config, form_post, get, location, set_cookie_pair};
    use crate::testing::InMemoryAuthRepository;

    const SIGNUP_BODY: &str = "username=alice&password=tide-pool-42&email=";

    #[tokio::test]
    async fn test_signup_redirects_with_session_and_flash() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let config = config();
        let response = app(repo.clone(), config.clone())
            .oneshot(form_post("/signup", SIGNUP_BODY, &[]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/listings");
        assert!(set_cookie_pair(&response, &config.session_cookie_name).is_some());
        assert!(set_cookie_pair(&response, platform::flash::FLASH_COOKIE_NAME).is_some());
    }

    #[tokio::test]
    async fn test_signup_error_returns_to_form() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let response = app(repo, config())
            .oneshot(form_post("/signup", "username=al&password=tide-pool-42", &[]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/signup");
    }

    #[tokio::test]
    async fn test_login_returns_to_saved_page_and_clears_it() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let config = config();
        app(repo.clone(), config.clone())
            .oneshot(form_post("/signup", SIGNUP_BODY, &[]))
            .await
            .unwrap();

        let saved = save_return_to("/listings/new").unwrap();
        let saved_pair = saved.split(';').next().unwrap().to_string();
        let response = app(repo.clone(), config.clone())
            .oneshot(form_post(
                "/login",
                "username=alice&password=tide-pool-42",
                &[saved_pair],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/listings/new");
        let cleared = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .any(|v| v.starts_with("wanderlust_return_to=;") && v.contains("Max-Age=0"));
        assert!(cleared);
    }

    #[tokio::test]
    async fn test_login_failure_goes_back_to_login() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let response = app(repo, config())
            .oneshot(form_post("/login", "username=nobody&password=whatever1", &[]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
    }

    #[tokio::test]
    async fn test_incomplete_signup_form_returns_to_form() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let response = app(repo.clone(), config())
            .oneshot(form_post("/signup", "username=bob", &[]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/signup");
        assert!(set_cookie_pair(&response, platform::flash::FLASH_COOKIE_NAME).is_some());
        assert_eq!(repo.user_count(), 0);
    }

    #[tokio::test]
    async fn test_incomplete_login_form_goes_back_to_login() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let response = app(repo, config())
            .oneshot(form_post("/login", "username=bob", &[]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
        assert!(set_cookie_pair(&response, platform::flash::FLASH_COOKIE_NAME).is_some());
    }

    #[tokio::test]
    async fn test_logout_requires_session() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let response = app(repo, config()).oneshot(get("/logout", &[])).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
    }

    #[tokio::test]
    async fn test_logout_deletes_session() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let config = config();
        let signup = app(repo.clone(), config.clone())
            .oneshot(form_post("/signup", SIGNUP_BODY, &[]))
            .await
            .unwrap();
        let session = set_cookie_pair(&signup, &config.session_cookie_name).unwrap();

        let response = app(repo.clone(), config)
            .oneshot(get("/logout", &[session]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/listings");
        assert_eq!(repo.session_count(), 0);
    }

    #[tokio::test]
    async fn test_logout_store_failure_is_a_server_error() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let config = config();
        let signup = app(repo.clone(), config.clone())
            .oneshot(form_post("/signup", SIGNUP_BODY, &[]))
            .await
            .unwrap();
        let session = set_cookie_pair(&signup, &config.session_cookie_name).unwrap();

        repo.fail_session_deletes();
        let response = app(repo.clone(), config)
            .oneshot(get("/logout", &[session]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(repo.session_count(), 1);
    }

    #[tokio::test]
    async fn test_login_form_shows_current_user() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let config = config();
        let signup = app(repo.clone(), config.clone())
            .oneshot(form_post("/signup", SIGNUP_BODY, &[]))
            .await
            .unwrap();
        let session = set_cookie_pair(&signup, &config.session_cookie_name).unwrap();

        let response = app(repo, config)
            .oneshot(get("/login", &[session]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["view"], "users/login");
        assert_eq!(body["currentUser"]["userName"], "alice");
    }
}
