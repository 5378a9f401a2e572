//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::{OriginalUri, Query, State},
    http::{Method, StatusCode, header},
    middleware,
    response::IntoResponse,
    routing::{delete, get},
};
use axum_extra::extract::{Query as MultiQuery, WithRejection};
use axum_helpers::{
    AppError, IdPath, ValidatedJson,
    errors::handlers::method_not_allowed,
    errors::responses::{
        BadRequestIdResponse, BadRequestResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, MethodNotAllowedResponse, NotFoundResponse,
    },
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductInput};
use crate::query::ProductQuery;
use crate::repository::ProductRepository;
use crate::service::ProductService;
use crate::versioning::{ApiVersion, report_api_versions};

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        replace_product,
        delete_product,
        delete_products,
    ),
    components(
        schemas(Product, ProductInput),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            MethodNotAllowedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints (API versions 1.0 and 2.0)")
    )
)]
pub struct ApiDoc;

/// Selects the API version; `X-API-Version` is read when this is absent
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VersionParams {
    /// `1.0` (default) or `2.0`
    #[serde(rename = "api-version")]
    pub api_version: Option<String>,
}

/// Ids for batch delete, repeated as `?ids=1&ids=2`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BatchDeleteQuery {
    #[serde(default)]
    pub ids: Vec<i32>,
}

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/Delete", delete(delete_products).post(delete_products))
        .route(
            "/{id}",
            get(get_product).put(replace_product).delete(delete_product),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .layer(middleware::map_response(report_api_versions))
        .with_state(shared_service)
}

/// List products, filtered, sorted and paged.
///
/// Version 2.0 only lists available products.
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ProductQuery, VersionParams),
    responses(
        (status = 200, description = "Page of products", body = Vec<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    version: ApiVersion,
    WithRejection(Query(query), _): WithRejection<Query<ProductQuery>, AppError>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products(version.scope(), &query).await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    params(VersionParams),
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = Product,
            headers(("location" = String, description = "URL of the new product"))),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    _version: ApiVersion,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), product.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(product),
    ))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID"),
        VersionParams
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    _version: ApiVersion,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Replace a product; the body id must equal the path id
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID"),
        VersionParams
    ),
    request_body = ProductInput,
    responses(
        (status = 204, description = "Product replaced"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn replace_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    _version: ApiVersion,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> ProductResult<StatusCode> {
    service.replace_product(id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID"),
        VersionParams
    ),
    responses(
        (status = 200, description = "Removed product", body = Product),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    _version: ApiVersion,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    let product = service.delete_product(id).await?;
    Ok(Json(product))
}

/// Delete several products at once.
///
/// `DELETE` in version 1.0, `POST` in version 2.0. Nothing is removed when
/// any id is unknown.
#[utoipa::path(
    method(delete, post),
    path = "/Delete",
    tag = "Products",
    params(BatchDeleteQuery, VersionParams),
    responses(
        (status = 200, description = "Removed products", body = Vec<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 405, response = MethodNotAllowedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    method: Method,
    version: ApiVersion,
    WithRejection(MultiQuery(query), _): WithRejection<MultiQuery<BatchDeleteQuery>, AppError>,
) -> ProductResult<Json<Vec<Product>>> {
    if method != version.batch_delete_method() {
        return Err(ProductError::MethodNotAllowed {
            method: method.to_string(),
            version: version.to_string(),
        });
    }

    let removed = service.delete_products(query.ids).await?;
    Ok(Json(removed))
}
