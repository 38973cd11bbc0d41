//! Route tests against stand-in editor, player and downloader

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use h5p_kit::{
    ContentId, ContentMetadata, ContentParams, Editor, EditorConfig, FileContentStorage,
    H5pError, LibraryRef, PackageManifest, PlayableContent, Player, StoredContent, UploadedFile,
};
use h5p_server::{
    AppState,
    config::ServerConfig,
    create_router,
    error::{ApiError, Result as ApiResult},
    examples::{ExampleDownloader, ExampleEntry, ExampleFetcher, ExampleRegistry},
};
use serde_json::{Value, json};
use std::path::Path;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;
use tempfile::{TempDir, tempdir};
use tower::ServiceExt;

/// Editor that records calls and keeps saved content in memory
#[derive(Default)]
struct StubEditor {
    calls: Mutex<Vec<String>>,
    saved: Mutex<Vec<(String, Value, ContentMetadata, String)>>,
    files: Mutex<Vec<(String, Value, UploadedFile)>>,
}

impl StubEditor {
    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Editor for StubEditor {
    async fn render(&self, id: &ContentId) -> h5p_kit::Result<String> {
        self.record(format!("render {id}"));
        Ok(format!("<editor {id}>"))
    }

    async fn load_content(&self, id: &ContentId) -> h5p_kit::Result<StoredContent> {
        self.record(format!("load {id}"));
        if id.as_str() != "known" {
            return Err(H5pError::ContentNotFound(id.to_string()));
        }
        Ok(StoredContent {
            h5p: PackageManifest::new("Known", &LibraryRef::new("H5P.Text", 1, 1)),
            library: "H5P.Text 1.1".to_string(),
            params: ContentParams {
                params: json!({ "text": "hello" }),
                metadata: ContentMetadata::default(),
            },
        })
    }

    async fn content_type_cache(&self) -> h5p_kit::Result<Value> {
        self.record("content-type-cache");
        Ok(json!({ "libraries": [] }))
    }

    async fn library_data(&self, library: &LibraryRef) -> h5p_kit::Result<Value> {
        self.record(format!(
            "library-data {} {}",
            library,
            library.language.as_deref().unwrap_or("-")
        ));
        Ok(json!({ "name": library.machine_name }))
    }

    async fn library_overview(&self, libraries: &[String]) -> h5p_kit::Result<Value> {
        self.record(format!("overview {}", libraries.join(",")));
        Ok(json!(libraries))
    }

    async fn save_content(
        &self,
        id: &ContentId,
        params: Value,
        metadata: ContentMetadata,
        library: &str,
    ) -> h5p_kit::Result<()> {
        if library == "broken" {
            return Err(H5pError::InvalidLibraryRef(library.to_string()));
        }
        self.saved
            .lock()
            .unwrap()
            .push((id.to_string(), params, metadata, library.to_string()));
        Ok(())
    }

    async fn save_content_file(
        &self,
        id: &ContentId,
        field: Value,
        file: UploadedFile,
    ) -> h5p_kit::Result<Value> {
        let path = format!("images/{}", file.name);
        self.files.lock().unwrap().push((id.to_string(), field, file));
        Ok(json!({ "mime": "image/png", "path": path }))
    }

    async fn install_library(&self, id: &str) -> h5p_kit::Result<()> {
        self.record(format!("install {id}"));
        if id == "H5P.Unknown" {
            return Err(H5pError::Unsupported("hub".to_string()));
        }
        Ok(())
    }

    async fn upload_package(&self, id: &ContentId, package: Vec<u8>) -> h5p_kit::Result<()> {
        self.record(format!("upload {} {}", id, package.len()));
        Ok(())
    }
}

/// Player that echoes what it was asked to render
struct StubPlayer;

#[async_trait]
impl Player for StubPlayer {
    async fn render(&self, content: &PlayableContent) -> h5p_kit::Result<String> {
        if content.manifest.title == "explode" {
            return Err(H5pError::Render("player exploded".to_string()));
        }
        Ok(format!(
            "played {} from {} ({})",
            content.id, content.files_url, content.manifest.title
        ))
    }
}

/// Downloader that writes a minimal package and counts invocations
#[derive(Default)]
struct CountingDownloader {
    downloads: AtomicUsize,
}

#[async_trait]
impl ExampleDownloader for CountingDownloader {
    async fn download(&self, example: &ExampleEntry, target: &Path) -> ApiResult<()> {
        self.downloads.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;

        if example.h5p == "broken.h5p" {
            return Err(ApiError::Download("server said no".to_string()));
        }

        let manifest = PackageManifest::new(&example.h5p, &LibraryRef::new("H5P.Text", 1, 1));
        tokio::fs::create_dir_all(target.join("content")).await?;
        tokio::fs::write(
            target.join("h5p.json"),
            serde_json::to_vec(&manifest).unwrap(),
        )
        .await?;
        tokio::fs::write(target.join("content/content.json"), b"{}").await?;
        Ok(())
    }
}

struct TestApp {
    _dir: TempDir,
    root: std::path::PathBuf,
    editor: Arc<StubEditor>,
    downloader: Arc<CountingDownloader>,
    router: Router,
}

impl TestApp {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        let root = dir.path().to_path_buf();
        let h5p_root = root.join("h5p");
        std::fs::create_dir_all(h5p_root.join("content")).unwrap();

        let config = ServerConfig {
            h5p_root: h5p_root.clone(),
            examples_root: root.join("examples"),
            max_upload_bytes: 1024 * 1024,
            ..Default::default()
        };

        let registry = ExampleRegistry::from_entries([
            (
                "course".to_string(),
                ExampleEntry {
                    h5p: "course.h5p".to_string(),
                    title: Some("Course Presentation".to_string()),
                },
            ),
            (
                "broken".to_string(),
                ExampleEntry {
                    h5p: "broken.h5p".to_string(),
                    title: None,
                },
            ),
        ])
        .unwrap();

        let editor = Arc::new(StubEditor::default());
        let downloader = Arc::new(CountingDownloader::default());
        let examples = ExampleFetcher::new(registry, &config.examples_root, downloader.clone());

        let state = AppState {
            editor: editor.clone(),
            player: Arc::new(StubPlayer),
            content: FileContentStorage::new(config.content_root()),
            examples: Arc::new(examples),
            editor_config: Arc::new(EditorConfig::default()),
            config,
        };

        Self {
            _dir: dir,
            root,
            editor,
            downloader,
            router: create_router(state),
        }
    }

    fn content_root(&self) -> std::path::PathBuf {
        self.root.join("h5p/content")
    }

    fn store_content(&self, id: &str, title: &str) {
        let dir = self.content_root().join(id);
        std::fs::create_dir_all(&dir).unwrap();
        let manifest = PackageManifest::new(title, &LibraryRef::new("H5P.Text", 1, 1));
        std::fs::write(dir.join("h5p.json"), serde_json::to_vec(&manifest).unwrap()).unwrap();
        std::fs::write(dir.join("content.json"), b"{\"text\":\"hi\"}").unwrap();
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn get(&self, uri: &str) -> Response {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }
}

async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

fn multipart_body(boundary: &str, parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file_name, data) in parts {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

fn multipart_request(uri: &str, parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
    let boundary = "X-H5P-BOUNDARY";
    Request::post(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(multipart_body(boundary, parts)))
        .unwrap()
}

// === Content listing ===

#[tokio::test]
async fn index_lists_stored_content() {
    let app = TestApp::new();
    app.store_content("first", "First");

    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_string(response).await;
    assert!(page.contains("<a href=\"/play?contentId=first\">[play]</a>"));
    assert!(page.contains("<a href=\"/edit?contentId=first\">[edit]</a>"));
}

#[tokio::test]
async fn index_links_registered_examples_by_title() {
    let app = TestApp::new();

    let page = body_string(app.get("/").await).await;
    assert!(page.contains("<a href=\"/examples/course\">Course Presentation</a>"));
    assert!(page.contains("<a href=\"/examples/broken\">broken</a>"));
}

#[tokio::test]
async fn index_with_empty_content_root_lists_nothing() {
    let app = TestApp::new();

    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!body_string(response).await.contains("<li>"));
}

#[tokio::test]
async fn index_with_unreadable_content_root_lists_nothing() {
    let app = TestApp::new();
    std::fs::remove_dir_all(app.content_root()).unwrap();

    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_string(response).await;
    assert!(page.contains("Existing Content"));
    assert!(!page.contains("<li>"));
}

// === Editing ===

#[tokio::test]
async fn edit_without_id_redirects_to_a_generated_one() {
    let app = TestApp::new();

    let response = app.get("/edit").await;
    assert!(response.status().is_redirection());
    let target = location(&response);
    let id = target.strip_prefix("/edit?contentId=").unwrap();
    assert!(!id.is_empty());
    assert!(app.editor.calls().is_empty());
}

#[tokio::test]
async fn edit_with_id_renders_the_editor() {
    let app = TestApp::new();

    let response = app.get("/edit?contentId=abc").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "<editor abc>");
    assert_eq!(app.editor.calls(), vec!["render abc"]);
}

#[tokio::test]
async fn params_for_known_content() {
    let app = TestApp::new();

    let response = app.get("/params?contentId=known").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["library"], "H5P.Text 1.1");
    assert_eq!(json["params"]["params"]["text"], "hello");
    assert_eq!(json["h5p"]["mainLibrary"], "H5P.Text");
}

#[tokio::test]
async fn params_for_unknown_content_is_404() {
    let app = TestApp::new();

    let response = app.get("/params?contentId=nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn save_forwards_params_metadata_and_library() {
    let app = TestApp::new();

    let request = Request::post("/edit?contentId=abc")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "params": { "params": { "text": "hi" }, "metadata": { "title": "Greeting" } },
                "library": "H5P.Text 1.1"
            })
            .to_string(),
        ))
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let saved = app.editor.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    let (id, params, metadata, library) = &saved[0];
    assert_eq!(id, "abc");
    assert_eq!(params, &json!({ "text": "hi" }));
    assert_eq!(metadata.title, "Greeting");
    assert_eq!(library, "H5P.Text 1.1");
}

#[tokio::test]
async fn save_failure_becomes_an_error_response() {
    let app = TestApp::new();

    let request = Request::post("/edit?contentId=abc")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "params": { "params": {} }, "library": "broken" }).to_string(),
        ))
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["status"], 400);
}

// === Ajax GET ===

#[tokio::test]
async fn ajax_get_content_type_cache() {
    let app = TestApp::new();

    let response = app.get("/ajax?action=content-type-cache").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "libraries": [] }));
}

#[tokio::test]
async fn ajax_get_library_data_passes_the_library_reference() {
    let app = TestApp::new();

    let response = app
        .get("/ajax?action=libraries&machineName=H5P.Text&majorVersion=1&minorVersion=1&language=de")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "name": "H5P.Text" }));
    assert_eq!(app.editor.calls(), vec!["library-data H5P.Text 1.1 de"]);
}

#[tokio::test]
async fn ajax_get_library_data_without_versions_is_400() {
    let app = TestApp::new();

    let response = app.get("/ajax?action=libraries&machineName=H5P.Text").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn ajax_get_library_data_rejects_escaping_machine_names() {
    let app = TestApp::new();

    let response = app
        .get("/ajax?action=libraries&machineName=../../x&majorVersion=1&minorVersion=0")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.editor.calls().is_empty());
}

#[tokio::test]
async fn ajax_get_unknown_action_is_400() {
    let app = TestApp::new();

    let response = app.get("/ajax?action=unknown").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let response = app.get("/ajax").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// === Ajax POST ===

#[tokio::test]
async fn ajax_post_unknown_action_is_not_implemented() {
    let app = TestApp::new();

    let response = app
        .send(Request::post("/ajax?action=unknown").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_string(response).await, "NOT IMPLEMENTED");
}

#[tokio::test]
async fn ajax_post_libraries_accepts_form_bodies() {
    let app = TestApp::new();

    let request = Request::post("/ajax?action=libraries")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("libraries%5B%5D=H5P.Text+1.1&libraries%5B%5D=H5P.Image+1.0"))
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!(["H5P.Text 1.1", "H5P.Image 1.0"])
    );
}

#[tokio::test]
async fn ajax_post_libraries_accepts_json_bodies() {
    let app = TestApp::new();

    let request = Request::post("/ajax?action=libraries")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "libraries": ["H5P.Text 1.1"] }).to_string()))
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.editor.calls(), vec!["overview H5P.Text 1.1"]);
}

#[tokio::test]
async fn ajax_post_files_uses_query_id_for_unsaved_content() {
    let app = TestApp::new();

    let request = multipart_request(
        "/ajax?action=files&contentId=fresh",
        &[
            ("contentId", None, b"0"),
            ("field", None, br#"{"type":"image","name":"picture"}"#),
            ("file", Some("cat.png"), b"\x89PNG"),
        ],
    );
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "mime": "image/png", "path": "images/cat.png" })
    );

    let files = app.editor.files.lock().unwrap();
    let (id, field, file) = &files[0];
    assert_eq!(id, "fresh");
    assert_eq!(field["type"], "image");
    assert_eq!(file.content_type.as_deref(), Some("image/png"));
    assert_eq!(file.bytes, b"\x89PNG");
}

#[tokio::test]
async fn ajax_post_files_prefers_the_body_id() {
    let app = TestApp::new();

    let request = multipart_request(
        "/ajax?action=files&contentId=query-id",
        &[
            ("contentId", None, b"body-id"),
            ("field", None, br#"{"type":"file"}"#),
            ("file", Some("notes.txt"), b"notes"),
        ],
    );
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.editor.files.lock().unwrap()[0].0, "body-id");
}

#[tokio::test]
async fn ajax_post_files_over_the_body_limit_is_413() {
    let app = TestApp::new();
    let oversized = vec![b'x'; 2 * 1024 * 1024];

    let request = multipart_request(
        "/ajax?action=files&contentId=abc",
        &[
            ("field", None, br#"{"type":"image"}"#),
            ("file", Some("huge.png"), oversized.as_slice()),
        ],
    );
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(app.editor.files.lock().unwrap().is_empty());
}

#[tokio::test]
async fn ajax_post_files_without_file_is_400() {
    let app = TestApp::new();

    let request = multipart_request(
        "/ajax?action=files&contentId=a",
        &[("field", None, br#"{"type":"image"}"#)],
    );
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn ajax_post_library_install_returns_the_refreshed_cache() {
    let app = TestApp::new();

    let response = app
        .send(
            Request::post("/ajax?action=library-install&id=H5P.Text")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "success": true, "data": { "libraries": [] } })
    );
    assert_eq!(
        app.editor.calls(),
        vec!["install H5P.Text", "content-type-cache"]
    );
}

#[tokio::test]
async fn ajax_post_library_install_failure_is_reported() {
    let app = TestApp::new();

    let response = app
        .send(
            Request::post("/ajax?action=library-install&id=H5P.Unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn ajax_post_library_upload_returns_content_and_types() {
    let app = TestApp::new();

    let request = multipart_request(
        "/ajax?action=library-upload&contentId=known",
        &[("h5p", Some("package.h5p"), b"PK\x03\x04")],
    );
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["h5p"]["title"], "Known");
    assert_eq!(json["data"]["content"], json!({ "text": "hello" }));
    assert_eq!(json["data"]["contentTypes"], json!({ "libraries": [] }));
    assert_eq!(app.editor.calls()[0], "upload known 4");
}

// === Playing ===

#[tokio::test]
async fn play_without_id_redirects_home() {
    let app = TestApp::new();

    let response = app.get("/play").await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn play_renders_stored_content() {
    let app = TestApp::new();
    app.store_content("abc", "Greeting");

    let response = app.get("/play?contentId=abc").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_string(response).await,
        "played abc from /h5p/content/abc (Greeting)"
    );
}

#[tokio::test]
async fn play_missing_content_is_500_with_message() {
    let app = TestApp::new();

    let response = app.get("/play?contentId=ghost").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_string(response).await, "Content not found: ghost");
}

#[tokio::test]
async fn play_player_failure_is_500_with_message() {
    let app = TestApp::new();
    app.store_content("abc", "explode");

    let response = app.get("/play?contentId=abc").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_string(response).await,
        "Rendering failed: player exploded"
    );
}

// === Examples ===

#[tokio::test]
async fn example_is_downloaded_once() {
    let app = TestApp::new();

    let response = app.get("/examples/course").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_string(response).await,
        "played course from /examples/course/files/content (course.h5p)"
    );
    assert_eq!(app.downloader.downloads.load(Ordering::SeqCst), 1);

    let response = app.get("/examples/course").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.downloader.downloads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn concurrent_first_requests_share_one_download() {
    let app = TestApp::new();

    let (a, b, c) = tokio::join!(
        app.get("/examples/course"),
        app.get("/examples/course"),
        app.get("/examples/course")
    );
    assert_eq!(a.status(), StatusCode::OK);
    assert_eq!(b.status(), StatusCode::OK);
    assert_eq!(c.status(), StatusCode::OK);
    assert_eq!(app.downloader.downloads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unknown_example_is_404() {
    let app = TestApp::new();

    let response = app.get("/examples/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.downloader.downloads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failed_download_is_500_with_message() {
    let app = TestApp::new();

    let response = app.get("/examples/broken").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_string(response).await,
        "Download failed: server said no"
    );
}

#[tokio::test]
async fn example_files_are_served_from_the_startup_mount() {
    let app = TestApp::new();
    let dir = app.root.join("examples/course/content/images");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("a.txt"), "static").unwrap();

    let response = app.get("/examples/course/files/content/images/a.txt").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "static");
}

#[tokio::test]
async fn h5p_root_is_served_statically() {
    let app = TestApp::new();
    std::fs::write(app.root.join("h5p/readme.txt"), "h5p files").unwrap();

    let response = app.get("/h5p/readme.txt").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "h5p files");
}

#[tokio::test]
async fn health_reports_service_name() {
    let app = TestApp::new();

    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "h5p-server");
}
