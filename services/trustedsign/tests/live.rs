use std::env;

use anyhow::Result;
use log::{debug, warn};
use trustedsign::{ApiErrorKind, Client, Config};
use trustedsign_core::{Context, OsEnv};
use trustedsign_file_read_tokio::TokioFileRead;
use trustedsign_http_send_reqwest::ReqwestHttpSend;

/// Build a client against the real service.
///
/// Credentials come from `TRUSTEDSIGN_APP_KEY`, `TRUSTEDSIGN_APP_SECRET` and
/// optionally `TRUSTEDSIGN_HOST`, loaded from `.env` when present.
fn init_live_client() -> Option<Client> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("TRUSTEDSIGN_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let ctx = Context::new()
        .with_env(OsEnv)
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default());
    Some(Client::new(ctx, Config::new()).expect("live client must build"))
}

#[tokio::test]
async fn test_live_list_documents() -> Result<()> {
    let Some(client) = init_live_client() else {
        warn!("TRUSTEDSIGN_TEST is not set, skipped");
        return Ok(());
    };

    let documents = client.get("/documents").await?;
    debug!("documents: {documents}");
    Ok(())
}

#[tokio::test]
async fn test_live_missing_document() -> Result<()> {
    let Some(client) = init_live_client() else {
        warn!("TRUSTEDSIGN_TEST is not set, skipped");
        return Ok(());
    };

    let err = client
        .get("/documents/trustedsign-rs-not-exist")
        .await
        .expect_err("missing document must fail");
    assert_eq!(
        err.as_api().map(|e| e.kind()),
        Some(ApiErrorKind::ResourceNotFound)
    );
    Ok(())
}
