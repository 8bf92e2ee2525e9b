// src/handlers/api_tests.rs - end-to-end tests over the REST surface

use actix_web::http::{header, StatusCode};
use actix_web::{test, App};
use serde_json::{json, Value};

use super::test_helpers::{self, cookie_header, multipart_body, Part};
use crate::handlers::auth_handlers::{login, logout, signup};
use crate::handlers::post_handlers::{
    create_post, delete_post, get_post, list_posts, my_posts, user_posts,
};
use crate::handlers::profile_handlers::{me, public_user, update_me};
use crate::handlers::social_handlers::{
    add_comment, follow_status, like_status, list_comments, toggle_follow, toggle_like,
};

macro_rules! test_app {
    ($env:expr) => {
        test::init_service(
            App::new()
                .app_data($env.state.clone())
                .app_data($env.auth.clone())
                .app_data($env.generator.clone())
                .service(signup)
                .service(login)
                .service(logout)
                .service(me)
                .service(update_me)
                .service(create_post)
                .service(list_posts)
                .service(my_posts)
                .service(get_post)
                .service(delete_post)
                .service(toggle_like)
                .service(like_status)
                .service(add_comment)
                .service(list_comments)
                .service(user_posts)
                .service(toggle_follow)
                .service(follow_status)
                .service(public_user),
        )
        .await
    };
}

macro_rules! signup_user {
    ($app:expr, $email:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/signup")
            .set_json(json!({ "email": $email, "password": "pw123456" }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        cookie_header(&resp)
    }};
}

macro_rules! create_fallback_post {
    ($app:expr, $cookie:expr, $description:expr) => {{
        let (content_type, body) = multipart_body(vec![
            Part::File("image", "img.jpg", b"fake image bytes".to_vec()),
            Part::Text("description", $description.to_string()),
            Part::Text("storyType", "".to_string()),
        ]);
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header((header::COOKIE, $cookie.clone()))
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        body
    }};
}

#[actix_web::test]
async fn signup_sets_cookie_and_me_round_trips() {
    let env = test_helpers::test_env().await;
    let app = test_app!(env);

    // no cookie: unauthenticated
    let req = test::TestRequest::get().uri("/api/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let cookie = signup_user!(app, "a@x.com");

    let req = test::TestRequest::get()
        .uri("/api/me")
        .insert_header((header::COOKIE, cookie))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["id"], 1);
    assert_eq!(body["user"]["email"], "a@x.com");
}

#[actix_web::test]
async fn signup_validates_input_and_rejects_duplicates() {
    let env = test_helpers::test_env().await;
    let app = test_app!(env);

    let req = test::TestRequest::post()
        .uri("/api/signup")
        .set_json(json!({ "email": "a@x.com", "password": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "email and password are required");

    signup_user!(app, "a@x.com");

    let req = test::TestRequest::post()
        .uri("/api/signup")
        .set_json(json!({ "email": "a@x.com", "password": "other" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "email already registered");
}

#[actix_web::test]
async fn signup_trims_the_display_name() {
    let env = test_helpers::test_env().await;
    let app = test_app!(env);

    let req = test::TestRequest::post()
        .uri("/api/signup")
        .set_json(json!({ "email": "a@x.com", "password": "pw123456", "name": "  Asha  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["name"], "Asha");

    // whitespace-only collapses to no name at all
    let req = test::TestRequest::post()
        .uri("/api/signup")
        .set_json(json!({ "email": "b@x.com", "password": "pw123456", "name": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["user"]["name"].is_null());
}

#[actix_web::test]
async fn login_failure_is_generic_for_unknown_email_and_wrong_password() {
    let env = test_helpers::test_env().await;
    let app = test_app!(env);
    signup_user!(app, "a@x.com");

    for payload in [
        json!({ "email": "a@x.com", "password": "wrong" }),
        json!({ "email": "nobody@x.com", "password": "pw123456" }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "invalid credentials");
    }

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "email": "a@x.com", "password": "pw123456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["email"], "a@x.com");
}

#[actix_web::test]
async fn logout_clears_the_session_cookie() {
    let env = test_helpers::test_env().await;
    let app = test_app!(env);

    let req = test::TestRequest::post().uri("/api/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("token=;"));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], true);
}

#[actix_web::test]
async fn create_post_requires_auth_and_an_image() {
    let env = test_helpers::test_env().await;
    let app = test_app!(env);

    let (content_type, body) = multipart_body(vec![Part::File(
        "image",
        "img.jpg",
        b"fake image bytes".to_vec(),
    )]);
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let cookie = signup_user!(app, "a@x.com");
    let (content_type, body) =
        multipart_body(vec![Part::Text("description", "no image here".into())]);
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header((header::COOKIE, cookie))
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "image is required");
}

#[actix_web::test]
async fn failed_generation_falls_back_and_feeds_are_viewer_aware() {
    let env = test_helpers::test_env().await;
    let app = test_app!(env);
    let cookie = signup_user!(app, "a@x.com");

    let created = create_fallback_post!(app, cookie, "A handwoven basket");
    let post_id = created["id"].as_i64().unwrap();
    assert!(created["image_path"].as_str().unwrap().starts_with("/uploads/"));
    assert!(created.get("audio_path").is_none());

    // detail carries the fallback story embedding the description
    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}", post_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let detail: Value = test::read_body_json(resp).await;
    assert!(detail["story"].as_str().unwrap().contains("A handwoven basket"));
    assert_eq!(detail["user_name"], "a@x.com");

    // anonymous list: no liked key at all
    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let resp = test::call_service(&app, req).await;
    let feed: Value = test::read_body_json(resp).await;
    assert_eq!(feed.as_array().unwrap().len(), 1);
    assert!(feed[0].get("liked").is_none());

    // authenticated list: liked present and false
    let req = test::TestRequest::get()
        .uri("/api/posts")
        .insert_header((header::COOKIE, cookie))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let feed: Value = test::read_body_json(resp).await;
    assert_eq!(feed[0]["liked"], false);

    let req = test::TestRequest::get().uri("/api/posts/999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn like_toggle_alternates_with_fresh_counts() {
    let env = test_helpers::test_env().await;
    let app = test_app!(env);
    let cookie = signup_user!(app, "a@x.com");
    let created = create_fallback_post!(app, cookie, "a clay pot");
    let post_id = created["id"].as_i64().unwrap();

    let like = |cookie: String| {
        test::TestRequest::post()
            .uri(&format!("/api/posts/{}/like", post_id))
            .insert_header((header::COOKIE, cookie))
            .to_request()
    };

    let resp = test::call_service(&app, like(cookie.clone())).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "liked": true, "count": 1 }));

    let resp = test::call_service(&app, like(cookie.clone())).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "liked": false, "count": 0 }));

    // anonymous status read
    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}/likes", post_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "count": 0, "liked": false }));
}

#[actix_web::test]
async fn comments_reject_whitespace_and_list_oldest_first() {
    let env = test_helpers::test_env().await;
    let app = test_app!(env);
    let cookie = signup_user!(app, "a@x.com");
    let created = create_fallback_post!(app, cookie, "a clay pot");
    let post_id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/comments", post_id))
        .insert_header((header::COOKIE, cookie.clone()))
        .set_json(json!({ "content": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "comment content is required");

    for content in ["nice!", "lovely glaze"] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/posts/{}/comments", post_id))
            .insert_header((header::COOKIE, cookie.clone()))
            .set_json(json!({ "content": content }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}/comments", post_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let comments: Value = test::read_body_json(resp).await;
    let comments = comments.as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["content"], "nice!");
    assert_eq!(comments[1]["content"], "lovely glaze");
    assert_eq!(comments[0]["user_name"], "a@x.com");
}

#[actix_web::test]
async fn follow_toggle_rejects_self_and_reports_counts() {
    let env = test_helpers::test_env().await;
    let app = test_app!(env);
    let cookie_a = signup_user!(app, "a@x.com");
    let _cookie_b = signup_user!(app, "b@x.com");

    // user 1 following themselves
    let req = test::TestRequest::post()
        .uri("/api/users/1/follow")
        .insert_header((header::COOKIE, cookie_a.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "You cannot follow yourself");

    let req = test::TestRequest::post()
        .uri("/api/users/2/follow")
        .insert_header((header::COOKIE, cookie_a.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "following": true, "followerCount": 1 }));

    let req = test::TestRequest::get()
        .uri("/api/users/2/follow-status")
        .insert_header((header::COOKIE, cookie_a))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "followerCount": 1, "followingCount": 0, "isFollowing": true })
    );

    // anonymous status
    let req = test::TestRequest::get()
        .uri("/api/users/2/follow-status")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["isFollowing"], false);
}

#[actix_web::test]
async fn only_the_owner_can_delete_and_deletion_cascades() {
    let env = test_helpers::test_env().await;
    let app = test_app!(env);
    let owner = signup_user!(app, "a@x.com");
    let other = signup_user!(app, "b@x.com");

    let created = create_fallback_post!(app, owner, "a brass lamp");
    let post_id = created["id"].as_i64().unwrap();
    let image_name = created["image_path"]
        .as_str()
        .unwrap()
        .rsplit('/')
        .next()
        .unwrap()
        .to_string();
    assert!(env.uploads.path().join(&image_name).exists());

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/comments", post_id))
        .insert_header((header::COOKIE, other.clone()))
        .set_json(json!({ "content": "nice!" }))
        .to_request();
    test::call_service(&app, req).await;

    // non-owner: forbidden, post intact
    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{}", post_id))
        .insert_header((header::COOKIE, other))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "You can only delete your own posts");

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}", post_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // owner: deleted, cascaded, media gone
    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{}", post_id))
        .insert_header((header::COOKIE, owner.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}", post_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}/comments", post_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let comments: Value = test::read_body_json(resp).await;
    assert!(comments.as_array().unwrap().is_empty());

    assert!(!env.uploads.path().join(&image_name).exists());

    // deleting again: not found
    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{}", post_id))
        .insert_header((header::COOKIE, owner))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn own_and_public_post_listings() {
    let env = test_helpers::test_env().await;
    let app = test_app!(env);
    let cookie = signup_user!(app, "a@x.com");
    create_fallback_post!(app, cookie, "first");
    create_fallback_post!(app, cookie, "second");

    let req = test::TestRequest::get()
        .uri("/api/my-posts")
        .insert_header((header::COOKIE, cookie))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let mine: Value = test::read_body_json(resp).await;
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 2);
    // newest first
    assert!(mine[0]["id"].as_i64().unwrap() > mine[1]["id"].as_i64().unwrap());

    let req = test::TestRequest::get().uri("/api/users/1/posts").to_request();
    let resp = test::call_service(&app, req).await;
    let theirs: Value = test::read_body_json(resp).await;
    assert_eq!(theirs.as_array().unwrap().len(), 2);

    let req = test::TestRequest::get().uri("/api/my-posts").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn profile_update_and_public_profile() {
    let env = test_helpers::test_env().await;
    let app = test_app!(env);
    let cookie = signup_user!(app, "a@x.com");

    let (content_type, body) = multipart_body(vec![
        Part::Text("name", "Asha".into()),
        Part::Text("bio", "potter from Jaipur".into()),
        Part::File("profileImage", "avatar.png", b"png bytes".to_vec()),
    ]);
    let req = test::TestRequest::post()
        .uri("/api/me")
        .insert_header((header::COOKIE, cookie))
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["name"], "Asha");
    assert_eq!(body["user"]["bio"], "potter from Jaipur");
    assert!(body["user"]["profile_image"]
        .as_str()
        .unwrap()
        .starts_with("/uploads/"));
    assert!(body["user"]["banner_image"].is_null());

    let req = test::TestRequest::get().uri("/api/users/1").to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Asha");

    let req = test::TestRequest::get().uri("/api/users/99").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
