use axum::{middleware, routing::get, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::auth;
use super::health;
use super::middleware::logging_middleware;
use super::resources;
use super::state::AppState;
use super::subjects;
use crate::config::MediaConfig;

/// Create a minimal router without state (health checks only)
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .layer(TraceLayer::new_for_http())
}

/// Create the full router with application state, serving generated
/// papers and uploaded resources from the media root under its URL prefix
pub fn create_router_with_state(state: AppState, media: &MediaConfig) -> Router {
    let router = Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .nest("/auth", auth::create_auth_router())
        .nest("/subjects", subjects::create_subjects_router())
        .nest("/resources", resources::create_resources_router())
        .with_state(state);

    let prefix = media.url_prefix.trim_end_matches('/');
    let router = if prefix.starts_with('/') && prefix.len() > 1 {
        router.nest_service(prefix, ServeDir::new(&media.root))
    } else {
        router
    };

    router
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::question::{Mark, Question};
    use crate::domain::subject::Subject;
    use crate::domain::user::{User, UserRole};
    use crate::infrastructure::storage::StorageFactory;
    use crate::infrastructure::user::CreateUserRequest;
    use crate::Repositories;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
        repositories: Repositories,
        state: AppState,
        _media: tempfile::TempDir,
    }

    async fn test_app() -> TestApp {
        let media = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.media.root = media.path().join("media").display().to_string();
        config.media.scratch_dir = media.path().join("scratch").display().to_string();
        config.paper.format = "tex".to_string();
        config.paper.seed = Some(11);

        let repositories = Repositories::create(&StorageFactory::in_memory()).await.unwrap();
        let state = crate::create_app_state_with_repositories(&config, &repositories)
            .await
            .unwrap();

        TestApp {
            router: create_router_with_state(state.clone(), &config.media),
            repositories,
            state,
            _media: media,
        }
    }

    impl TestApp {
        async fn user(&self, username: &str, role: UserRole, department: &str) -> (User, String) {
            let service = crate::create_user_service(&self.repositories);
            let user = service
                .create(CreateUserRequest {
                    username: username.to_string(),
                    password: "password123".to_string(),
                    name: format!("{} name", username),
                    department: department.to_string(),
                    role,
                })
                .await
                .unwrap();
            let token = self.state.jwt_service.generate(&user).unwrap();
            (user, token)
        }

        async fn subject(&self) -> Subject {
            self.repositories
                .subjects
                .create(Subject::new("CS201", "Data Structures", "CSE"))
                .await
                .unwrap()
        }

        async fn send(&self, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let headers = response.headers().clone();
            let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            (status, headers, body.to_vec())
        }
    }

    fn json_body(body: &[u8]) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    fn form_request(uri: &str, token: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Fields are (name, file name, value)
    fn multipart_request(uri: &str, token: &str, fields: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let boundary = "vijnana-test-boundary";
        let mut body = String::new();

        for (name, file_name, value) in fields {
            body.push_str(&format!("--{}\r\n", boundary));
            match file_name {
                Some(file_name) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n",
                    name, file_name
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    name
                )),
            }
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{}--\r\n", boundary));

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = create_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_sign_up_then_me() {
        let app = test_app().await;
        let request = Request::builder()
            .method("POST")
            .uri("/auth/sign-up")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "username": "sara",
                    "password": "password123",
                    "name": "Sara T",
                    "department": "CSE"
                })
                .to_string(),
            ))
            .unwrap();

        let (status, _, body) = app.send(request).await;
        assert_eq!(status, StatusCode::CREATED);
        let body = json_body(&body);
        assert_eq!(body["user"]["role"], "student");
        assert!(body["user"].get("password_hash").is_none());

        let token = body["token"].as_str().unwrap();
        let (status, _, body) = app
            .send(
                Request::builder()
                    .uri("/auth/me")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body)["username"], "sara");
    }

    #[tokio::test]
    async fn test_sign_in_with_wrong_password() {
        let app = test_app().await;
        app.user("anil", UserRole::Faculty, "CSE").await;

        let request = Request::builder()
            .method("POST")
            .uri("/auth/sign-in")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"username": "anil", "password": "nope-nope"}).to_string()))
            .unwrap();

        let (status, _, body) = app.send(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(&body)["error"]["message"], "Incorrect username or password");
    }

    #[tokio::test]
    async fn test_view_subject_anonymous_and_post() {
        let app = test_app().await;
        let subject = app.subject().await;
        let uri = format!("/subjects/{}", subject.id());

        let (status, _, body) = app
            .send(Request::builder().uri(&uri).body(Body::empty()).unwrap())
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body)["subscribed"], false);

        let (status, _, body) = app
            .send(Request::builder().method("POST").uri(&uri).body(Body::empty()).unwrap())
            .await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(json_body(&body)["error"]["message"], "POST Method not supported.");

        let (status, _, body) = app
            .send(Request::builder().uri("/subjects/42").body(Body::empty()).unwrap())
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(&body)["error"]["message"],
            "The subject you requested does not exist."
        );
    }

    #[tokio::test]
    async fn test_staff_assignment_requires_hod() {
        let app = test_app().await;
        let subject = app.subject().await;
        let (faculty, faculty_token) = app.user("anil", UserRole::Faculty, "CSE").await;
        let (_, hod_token) = app.user("hod_cse", UserRole::Hod, "CSE").await;
        let uri = format!("/subjects/{}/staff/assign", subject.id());
        let body = format!("staff={}", faculty.id());

        let (status, _, response) = app.send(form_request(&uri, &faculty_token, &body)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json_body(&response)["error"]["message"], "You are not an HOD");
        let stored = app.repositories.subjects.get(subject.id()).await.unwrap().unwrap();
        assert!(!stored.has_staff());

        let (status, _, response) = app.send(form_request(&uri, &hod_token, "")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(&response)["error"]["message"], "Something went wrong.");

        let (status, _, _) = app.send(form_request(&uri, &hod_token, &body)).await;
        assert_eq!(status, StatusCode::OK);
        let stored = app.repositories.subjects.get(subject.id()).await.unwrap().unwrap();
        assert!(stored.is_staff(faculty.id()));
    }

    #[tokio::test]
    async fn test_unsubscribe_without_subscription() {
        let app = test_app().await;
        let subject = app.subject().await;
        let (_, token) = app.user("sara", UserRole::Student, "CSE").await;

        let (status, _, body) = app
            .send(form_request(&format!("/subjects/{}/unsubscribe", subject.id()), &token, ""))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            json_body(&body)["error"]["message"],
            "You are not subscribed to this subject."
        );
    }

    #[tokio::test]
    async fn test_generate_paper_redirects_to_artifact() {
        let app = test_app().await;
        let subject = app.subject().await;
        let (_, token) = app.user("anil", UserRole::Faculty, "CSE").await;

        for i in 0..10 {
            app.repositories
                .questions
                .create(Question::marked(
                    subject.id().clone(),
                    format!("Trees question {}", i),
                    "Trees",
                    Mark::new(5.0),
                ))
                .await
                .unwrap();
        }

        let form = "examname=Series+Test+1&totalmarks=50&time=2+hours\
                    &form-0-module=Trees&form-0-mark=5&form-0-count=3\
                    &form-1-module=&form-1-mark=&form-1-count=";
        let (status, headers, _) = app
            .send(form_request(&format!("/subjects/{}/papers", subject.id()), &token, form))
            .await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        let location = headers[header::LOCATION].to_str().unwrap().to_string();
        assert!(location.starts_with("/uploads/question_papers/Data_Structures_"));

        let (status, _, body) = app
            .send(Request::builder().uri(&location).body(Body::empty()).unwrap())
            .await;
        assert_eq!(status, StatusCode::OK);
        let source = String::from_utf8(body).unwrap();
        assert!(source.contains("Part B"));
        assert_eq!(source.matches("\\item{").count(), 3);
    }

    #[tokio::test]
    async fn test_generate_paper_with_blank_rows() {
        let app = test_app().await;
        let subject = app.subject().await;
        let (_, token) = app.user("anil", UserRole::Faculty, "CSE").await;

        let form = "examname=Series+Test+1&totalmarks=50&time=2+hours\
                    &form-0-module=&form-0-mark=&form-0-count=";
        let (status, _, body) = app
            .send(form_request(&format!("/subjects/{}/papers", subject.id()), &token, form))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json_body(&body)["error"]["message"], "Choose some questions.");
    }

    #[tokio::test]
    async fn test_upload_requires_authentication() {
        let app = test_app().await;
        let subject = app.subject().await;

        let (status, _, _) = app
            .send(
                Request::builder()
                    .method("POST")
                    .uri(format!("/subjects/{}/question-bank", subject.id()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_resource_upload_lookup_and_search() {
        let app = test_app().await;
        let subject = app.subject().await;
        let (_, token) = app.user("anil", UserRole::Faculty, "CSE").await;
        let subject_id = subject.id().to_string();

        let (status, _, body) = app
            .send(multipart_request(
                "/resources",
                &token,
                &[
                    ("title", None, "Binary Trees"),
                    ("category", None, "Subject Note"),
                    ("subject", None, &subject_id),
                    ("resourcefile", Some("../trees notes.pdf"), "tree notes"),
                ],
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let resource = json_body(&body);
        assert_eq!(resource["url"], "/uploads/resources/trees_notes.pdf");
        assert_eq!(resource["category"], "subject_note");
        let resource_id = resource["id"].as_str().unwrap().to_string();

        let (status, _, body) = app.send(get_request("/uploads/resources/trees_notes.pdf")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"tree notes");

        let (status, _, body) = app.send(get_request(&format!("/resources/{}", resource_id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body)["title"], "Binary Trees");

        for uri in ["/resources/42".to_string(), format!("/resources/{}", subject_id)] {
            let (status, _, body) = app.send(get_request(&uri)).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(json_body(&body)["error"]["message"], "The requested resource not found.");
        }

        let (status, _, body) = app.send(get_request("/resources/types/Subject_Note")).await;
        assert_eq!(status, StatusCode::OK);
        let listing = json_body(&body);
        assert_eq!(listing["type"], "Subject Note");
        assert_eq!(listing["resource_list"].as_array().unwrap().len(), 1);

        let (status, _, body) = app.send(get_request("/resources/types/Presentation")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(&body)["error"]["message"],
            "No resources under the requested category"
        );

        let (status, _, body) = app.send(get_request("/resources/search?query=trees")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body)["resource_list"][0]["id"], resource_id.as_str());

        let (status, _, body) = app.send(get_request("/resources/search?query=graphs")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json_body(&body)["error"]["message"], "Searched returned no resources.");

        let (status, _, body) = app.send(get_request(&format!("/subjects/{}", subject_id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body)["resource_list"][0]["title"], "Binary Trees");

        let (status, _, body) = app.send(get_request("/resources/types")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body).as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_resource_upload_rejects_unknown_category() {
        let app = test_app().await;
        let subject = app.subject().await;
        let (_, token) = app.user("anil", UserRole::Faculty, "CSE").await;

        let (status, _, body) = app
            .send(multipart_request(
                "/resources",
                &token,
                &[
                    ("title", None, "Lecture video"),
                    ("category", None, "Video"),
                    ("subject", None, &subject.id().to_string()),
                    ("resourcefile", Some("lecture.mp4"), "frames"),
                ],
            ))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json_body(&body)["error"]["param"], "category");
    }

    #[tokio::test]
    async fn test_my_subjects() {
        let app = test_app().await;
        let subject = app.subject().await;
        let (_, token) = app.user("sara", UserRole::Student, "CSE").await;
        let mine = || {
            Request::builder()
                .uri("/subjects/mine")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap()
        };

        let (status, _, body) = app.send(mine()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(&body)["error"]["message"],
            "You are not subscribed to any subjects"
        );

        let (status, _, _) = app
            .send(form_request(&format!("/subjects/{}/subscribe", subject.id()), &token, ""))
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _, body) = app.send(mine()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body)[0]["code"], "CS201");

        let (status, _, _) = app.send(get_request("/subjects/mine")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
