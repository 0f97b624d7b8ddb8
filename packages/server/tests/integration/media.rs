use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;

use crate::common::{PNG_DATA_URI, PUBLIC_URL, TestApp, routes};

#[tokio::test]
async fn identical_uploads_share_one_file() {
    let app = TestApp::spawn().await;
    let alice = app.create_authenticated_user("alice").await;
    let bob = app.create_authenticated_user("bob").await;

    let a = app
        .put_with_token(routes::AVATAR, &json!({"avatar": PNG_DATA_URI}), &alice)
        .await;
    let b = app
        .put_with_token(routes::AVATAR, &json!({"avatar": PNG_DATA_URI}), &bob)
        .await;

    assert_eq!(a.body["avatar"], b.body["avatar"]);
}

#[tokio::test]
async fn media_responses_are_cacheable() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("alice").await;
    let res = app
        .put_with_token(routes::AVATAR, &json!({"avatar": PNG_DATA_URI}), &token)
        .await;
    let path = res.body["avatar"]
        .as_str()
        .unwrap()
        .trim_start_matches(PUBLIC_URL)
        .to_string();

    let media = app.get_without_token(&path).await;

    assert_eq!(media.status, 200);
    assert!(media.header("cache-control").unwrap().contains("immutable"));
}

#[tokio::test]
async fn unknown_or_malformed_names_are_not_found() {
    let app = TestApp::spawn().await;

    let missing = app
        .get_without_token(&format!("/media/{}.png", "a".repeat(64)))
        .await;
    assert_eq!(missing.status, 404);

    let malformed = app.get_without_token("/media/..%2Fetc%2Fpasswd").await;
    assert_eq!(malformed.status, 404);
}

#[tokio::test]
async fn oversized_images_are_rejected() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("alice").await;

    // Larger than the 64 KiB limit the test app is configured with.
    let payload = STANDARD.encode(vec![0u8; 70 * 1024]);
    let res = app
        .put_with_token(
            routes::AVATAR,
            &json!({"avatar": format!("data:image/png;base64,{payload}")}),
            &token,
        )
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

mod large_images {
    use super::*;

    use crate::common::recipe_body;

    const THREE_MIB: u64 = 3 * 1024 * 1024;

    /// PNG data URI with `len` decoded bytes.
    fn png_of_len(len: usize) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(vec![7u8; len]))
    }

    #[tokio::test]
    async fn avatar_above_two_mib_within_media_limit_is_stored() {
        let app = TestApp::spawn_with(|config| config.media.max_size = THREE_MIB).await;
        let token = app.create_authenticated_user("alice").await;

        let res = app
            .put_with_token(
                routes::AVATAR,
                &json!({"avatar": png_of_len(2_621_440)}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let path = res.body["avatar"]
            .as_str()
            .unwrap()
            .trim_start_matches(PUBLIC_URL)
            .to_string();
        let media = app.get_without_token(&path).await;
        assert_eq!(media.text.len(), 2_621_440);
    }

    #[tokio::test]
    async fn recipe_image_above_two_mib_is_accepted_on_create_and_update() {
        let app = TestApp::spawn_with(|config| config.media.max_size = THREE_MIB).await;
        let admin = app.create_admin("admin").await;
        let tag = app.create_tag(&admin, "Dinner", "dinner").await;
        let rice = app.create_ingredient(&admin, "rice", "g").await;
        let token = app.create_authenticated_user("alice").await;

        let mut body = recipe_body("Paella", &[tag], &[(rice, 300)]);
        body["image"] = json!(png_of_len(2_500_000));
        let created = app.post_with_token(routes::RECIPES, &body, &token).await;
        assert_eq!(created.status, 201, "{}", created.text);

        let updated = app
            .patch_with_token(
                &routes::recipe(created.id()),
                &json!({
                    "tags": [tag],
                    "ingredients": [{"id": rice, "amount": 300}],
                    "cooking_time": 30,
                    "image": png_of_len(2_600_000),
                }),
                &token,
            )
            .await;
        assert_eq!(updated.status, 200, "{}", updated.text);
        assert_ne!(updated.body["image"], created.body["image"]);
    }

    #[tokio::test]
    async fn image_above_media_limit_is_a_validation_error() {
        let app = TestApp::spawn_with(|config| config.media.max_size = THREE_MIB).await;
        let token = app.create_authenticated_user("alice").await;

        let res = app
            .put_with_token(
                routes::AVATAR,
                &json!({"avatar": png_of_len(THREE_MIB as usize + 1)}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}
