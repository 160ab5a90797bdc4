//! Product submission route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
};
use listing_core::{Category, ImageFile};

use crate::error::{Result, add_breadcrumb};
use crate::middleware::RequireSession;
use crate::models::ProductForm;
use crate::services::{SubmissionError, SubmissionResult};
use crate::state::AppState;

/// Multipart field carrying the image file.
const IMAGE_FIELD: &str = "image";

/// Category radio option for templates.
#[derive(Clone)]
pub struct CategoryOption {
    pub value: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

/// Add-product page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/new.html")]
pub struct NewProductTemplate {
    pub seller: String,
    pub title: String,
    pub price: String,
    pub status: String,
    pub categories: Vec<CategoryOption>,
    pub message: Option<String>,
    pub success: bool,
}

impl NewProductTemplate {
    fn render_form(form: &ProductForm, seller: &listing_core::User) -> Self {
        let draft = form.draft();
        let categories = Category::ALL
            .iter()
            .map(|category| CategoryOption {
                value: category.as_str(),
                label: category.label(),
                checked: draft.category == Some(*category),
            })
            .collect();

        Self {
            seller: seller
                .display_name
                .clone()
                .or_else(|| seller.email.clone())
                .unwrap_or_else(|| seller.uid.to_string()),
            title: draft.title.clone(),
            price: draft.price.clone(),
            status: draft.status.clone(),
            categories,
            message: form.message(),
            success: form.result().is_some_and(SubmissionResult::is_success),
        }
    }
}

/// Display the add-product form.
pub async fn new_product(RequireSession(session): RequireSession) -> impl IntoResponse {
    NewProductTemplate::render_form(&ProductForm::new(), session.user())
}

/// Handle a form submission.
///
/// The workflow outcome is rendered in place, with the submitted values
/// kept in the form. Only malformed requests produce an error status.
pub async fn create(
    State(state): State<AppState>,
    RequireSession(session): RequireSession,
    multipart: Multipart,
) -> Result<NewProductTemplate> {
    let mut form = read_form(multipart).await?;
    let draft = form.snapshot();

    tracing::info!(
        uid = %session.uid(),
        has_image = draft.has_image(),
        "product submitted"
    );
    add_breadcrumb("listing", "Product submitted", Some(&[("title", draft.title.as_str())]));

    // Runs detached so a dropped connection doesn't abandon a half-done upload.
    let workflow = state.workflow(session.clone());
    let outcome = tokio::spawn(async move { workflow.submit(&draft).await })
        .await
        .unwrap_or_else(|e| Err(SubmissionError::Unknown(format!("submission task failed: {e}"))));

    form.record_result(SubmissionResult::from(&outcome));
    Ok(NewProductTemplate::render_form(&form, session.user()))
}

/// Read the multipart body into a form.
///
/// A file part with no filename means no file was chosen.
async fn read_form(mut multipart: Multipart) -> Result<ProductForm> {
    let mut form = ProductForm::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if name == IMAGE_FIELD {
            let file_name = field.file_name().unwrap_or_default().to_owned();
            let content_type = field.content_type().map(str::to_owned);
            let bytes = field.bytes().await?;
            let image = (!file_name.is_empty())
                .then(|| ImageFile::new(file_name, content_type, bytes));
            form.set_image(image);
        } else {
            let value = field.text().await?;
            form.set_text_field(&name, value)?;
        }
    }

    Ok(form)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        response::Response,
        routing::get,
    };
    use listing_core::{FieldValue, User};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;
    use tower_sessions::{MemoryStore, Session};

    use crate::config::SellerConfig;
    use crate::db::MemoryDocumentStore;
    use crate::middleware::{session_layer, set_current_user};
    use crate::routes::routes;
    use crate::services::submission::PRODUCTS_COLLECTION;
    use crate::storage::MemoryObjectStore;

    use super::*;

    const BOUNDARY: &str = "listing-test-boundary";

    struct Harness {
        app: Router,
        objects: Arc<MemoryObjectStore>,
        documents: Arc<MemoryDocumentStore>,
    }

    fn harness() -> Harness {
        let config = SellerConfig::from_vars(|key| match key {
            "SELLER_DATABASE_URL" => Some("postgres://localhost/listing_test".to_string()),
            "SELLER_BASE_URL" => Some("http://localhost:3000".to_string()),
            _ => None,
        })
        .unwrap();
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/listing_test")
            .unwrap();
        let objects = Arc::new(MemoryObjectStore::new());
        let documents = Arc::new(MemoryDocumentStore::new());
        let state = AppState::new(config, pool, objects.clone(), documents.clone());

        let app = routes()
            .route(
                "/test/login",
                get(|session: Session| async move {
                    set_current_user(&session, &User::new("seller-1")).await.unwrap();
                }),
            )
            .layer(session_layer(MemoryStore::default(), false))
            .with_state(state);

        Harness {
            app,
            objects,
            documents,
        }
    }

    async fn login(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(Request::get("/test/login").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        cookie.split(';').next().unwrap().to_string()
    }

    fn multipart_body(fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Body {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((filename, bytes)) = image {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\nContent-Type: image/png\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Body::from(body)
    }

    async fn submit(app: &Router, cookie: &str, body: Body) -> Response {
        app.clone()
            .oneshot(
                Request::post("/products")
                    .header(header::COOKIE, cookie)
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={BOUNDARY}"),
                    )
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_form_requires_login() {
        let Harness { app, .. } = harness();
        let response = app
            .oneshot(Request::get("/products/new").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
    }

    #[tokio::test]
    async fn test_form_renders_for_signed_in_seller() {
        let Harness { app, .. } = harness();
        let cookie = login(&app).await;
        let response = app
            .oneshot(
                Request::get("/products/new")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("women-bags"));
        assert!(html.contains("seller-1"));
    }

    #[tokio::test]
    async fn test_form_declares_native_constraints() {
        let Harness { app, .. } = harness();
        let cookie = login(&app).await;
        let response = app
            .oneshot(
                Request::get("/products/new")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let html = body_text(response).await;

        assert!(html.contains(r#"<input type="number" name="price""#));
        // title, price, status, image and one per category radio
        let required = html.matches(" required>").count();
        assert_eq!(required, 4 + Category::ALL.len());
        assert_eq!(html.matches(r#"type="radio""#).count(), Category::ALL.len());
    }

    #[tokio::test]
    async fn test_submission_creates_product() {
        let Harness {
            app,
            objects,
            documents,
        } = harness();
        let cookie = login(&app).await;

        let body = multipart_body(
            &[
                ("title", "Ankle boots"),
                ("price", "89.90"),
                ("category", "shoes"),
                ("status", "new"),
            ],
            Some(("boots.png", &b"png-bytes"[..])),
        );
        let response = submit(&app, &cookie, body).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Product added successfully!"));
        assert!(html.contains("Ankle boots"));

        assert!(objects.get("images/boots.png").is_some());
        let stored = documents.documents(PRODUCTS_COLLECTION);
        let (_, doc) = stored.first().unwrap();
        assert_eq!(doc.get("price").and_then(FieldValue::as_f64), Some(89.9));
        assert_eq!(doc.get("userId").and_then(FieldValue::as_str), Some("seller-1"));
        assert_eq!(
            doc.get("image").and_then(FieldValue::as_str),
            Some("memory://images/boots.png")
        );
    }

    #[tokio::test]
    async fn test_submission_without_image_shows_error() {
        let Harness {
            app,
            objects,
            documents,
        } = harness();
        let cookie = login(&app).await;

        let body = multipart_body(&[("title", "Coat"), ("price", "10")], Some(("", &b""[..])));
        let response = submit(&app, &cookie, body).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Error adding product: Please upload an image."));
        assert!(objects.is_empty());
        assert!(documents.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_category_is_bad_request() {
        let Harness { app, .. } = harness();
        let cookie = login(&app).await;

        let body = multipart_body(&[("category", "hats")], None);
        let response = submit(&app, &cookie, body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_logout_ends_session() {
        let Harness { app, .. } = harness();
        let cookie = login(&app).await;

        let response = app
            .clone()
            .oneshot(
                Request::post("/auth/logout")
                    .header(header::COOKIE, cookie.as_str())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");

        let response = app
            .oneshot(
                Request::get("/products/new")
                    .header(header::COOKIE, cookie.as_str())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }
}
