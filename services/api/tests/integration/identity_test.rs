use std::time::Duration;

use erp_api::domain::repository::IdentityProvider;
use erp_api::domain::types::SignUpRequest;
use erp_api::error::AuthProviderError;
use erp_api::infra::identity::HttpIdentityProvider;
use erp_domain::user::UserRole;
use erp_testing::identity::MockIdentityProvider;

use crate::helpers::identity_client;

fn request(email: &str, password: &str) -> SignUpRequest {
    SignUpRequest {
        email: email.to_owned(),
        password: password.to_owned(),
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        role: UserRole::Manager,
    }
}

#[tokio::test]
async fn should_sign_up_pending_verification() {
    let provider = MockIdentityProvider::start().await;
    let client = identity_client(&provider);

    let outcome = client.sign_up(&request("a@x.com", "secret1")).await.unwrap();

    assert!(outcome.pending_verification);
    assert_eq!(outcome.email, "a@x.com");
    assert_eq!(Some(outcome.identity_id), provider.user_id("a@x.com"));
}

#[tokio::test]
async fn should_detect_duplicate_hidden_by_anti_enumeration() {
    let provider = MockIdentityProvider::start().await;
    let client = identity_client(&provider);
    client.sign_up(&request("a@x.com", "secret1")).await.unwrap();

    let err = client
        .sign_up(&request("a@x.com", "secret1"))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthProviderError::DuplicateEmail(_)), "{err:?}");
}

#[tokio::test]
async fn should_map_weak_password() {
    let provider = MockIdentityProvider::start().await;
    let client = identity_client(&provider);

    let err = client.sign_up(&request("a@x.com", "abc")).await.unwrap_err();

    assert!(matches!(
        err,
        AuthProviderError::WeakPassword(ref m) if m == "Password should be at least 6 characters."
    ));
}

#[tokio::test]
async fn should_map_5xx_to_unavailable() {
    let provider = MockIdentityProvider::start().await;
    provider.set_unavailable(true);
    let client = identity_client(&provider);

    let err = client
        .sign_up(&request("a@x.com", "secret1"))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthProviderError::Unavailable(_)));
}

#[tokio::test]
async fn should_map_unreachable_provider_to_unavailable() {
    // Nothing listens on the discard port.
    let client =
        HttpIdentityProvider::new("http://127.0.0.1:9", "key".into(), Duration::from_secs(1))
            .unwrap();

    let err = client
        .sign_up(&request("a@x.com", "secret1"))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthProviderError::Unavailable(_)));
}

#[tokio::test]
async fn should_pass_wrong_api_key_through_as_rejection() {
    let provider = MockIdentityProvider::start().await;
    let client =
        HttpIdentityProvider::new(provider.url(), "wrong".into(), Duration::from_secs(5)).unwrap();

    let err = client
        .sign_up(&request("a@x.com", "secret1"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AuthProviderError::Rejected { status: 401, ref message } if message == "Invalid API key"
    ));
}

#[tokio::test]
async fn should_sign_in_and_resolve_session() {
    let provider = MockIdentityProvider::start_auto_confirm().await;
    let client = identity_client(&provider);
    let outcome = client.sign_up(&request("a@x.com", "secret1")).await.unwrap();
    assert!(!outcome.pending_verification);

    let session = client.sign_in("a@x.com", "secret1").await.unwrap();
    assert_eq!(session.identity.id, outcome.identity_id);
    assert!(session.identity.email_confirmed);

    let identity = client
        .current_session(&session.access_token)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(identity.id, outcome.identity_id);
    assert_eq!(identity.metadata["role"], "manager");

    client.sign_out(&session.access_token).await.unwrap();
}

#[tokio::test]
async fn should_return_none_for_unknown_token() {
    let provider = MockIdentityProvider::start().await;
    let client = identity_client(&provider);

    assert!(client.current_session("garbage").await.unwrap().is_none());
    client.sign_out("garbage").await.unwrap();
}

#[tokio::test]
async fn should_map_unconfirmed_sign_in() {
    let provider = MockIdentityProvider::start().await;
    let client = identity_client(&provider);
    client.sign_up(&request("a@x.com", "secret1")).await.unwrap();

    let err = client.sign_in("a@x.com", "secret1").await.unwrap_err();
    assert!(matches!(err, AuthProviderError::EmailNotConfirmed(_)));

    provider.confirm_email("a@x.com");
    client.sign_in("a@x.com", "secret1").await.unwrap();
}
