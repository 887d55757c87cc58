//! Blog handlers: CRUD plus the read-only date filters.
//!
//! Reads are open to anyone. Writes require a bearer token, and update and
//! delete additionally require the caller to be the blog's author.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use blog_core::DomainError;
use blog_core::domain::{Access, Blog, BlogFilter, DateFilter, NewBlog, Principal, parse_date};
use blog_shared::ApiResponse;
use blog_shared::dto::{BlogListQuery, BlogRequest, BlogResponse, DateQuery, DateRangeQuery};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::representation::{content_from, patch_from, to_response, to_responses};
use crate::state::AppState;

/// GET /api/blogs - optionally narrowed by `author`, `title` and `created_at`
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<BlogListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let mut filter = BlogFilter::all();

    if let Some(author) = non_empty(query.author) {
        let author_id = author.parse::<i64>().map_err(|_| {
            AppError::BadRequest(format!("Invalid 'author' value '{author}': expected a user id"))
        })?;
        filter = filter.with_author(author_id);
    }
    if let Some(title) = non_empty(query.title) {
        filter = filter.with_title(title);
    }
    if let Some(created_at) = non_empty(query.created_at) {
        let day = parse_date("created_at", Some(&created_at))?;
        return find_created(&state, filter, DateFilter::On(day)).await;
    }

    let blogs = state.blogs.find(&filter).await?;
    Ok(HttpResponse::Ok().json(to_responses(blogs)))
}

/// GET /api/blogs/{id}
pub async fn retrieve(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let blog = fetch(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(to_response(blog)))
}

/// POST /api/blogs
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<BlogRequest>,
) -> AppResult<HttpResponse> {
    let content = content_from(body.into_inner())?;
    let new_blog = NewBlog::new(&identity.principal, content);

    let blog = state.blogs.insert(new_blog).await?;
    tracing::info!(blog_id = blog.id, user_id = identity.principal.user_id, "Blog created");

    Ok(HttpResponse::Created().json(to_response(blog)))
}

/// PUT /api/blogs/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    body: web::Json<BlogRequest>,
) -> AppResult<HttpResponse> {
    let mut blog = fetch_owned(&state, &identity.principal, path.into_inner(), "update").await?;
    let content = content_from(body.into_inner())?;

    blog.apply(content, Utc::now());
    save(&state, &identity.principal, blog).await
}

/// PATCH /api/blogs/{id}
pub async fn partial_update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    body: web::Json<BlogRequest>,
) -> AppResult<HttpResponse> {
    let mut blog = fetch_owned(&state, &identity.principal, path.into_inner(), "update").await?;
    let patch = patch_from(body.into_inner())?;

    blog.patch(patch, Utc::now());
    save(&state, &identity.principal, blog).await
}

/// DELETE /api/blogs/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let blog = fetch_owned(&state, &identity.principal, path.into_inner(), "delete").await?;

    state.blogs.delete(blog.id).await?;
    tracing::info!(
        blog_id = blog.id,
        user_id = identity.principal.user_id,
        "Blog \"{}\" deleted successfully!",
        blog.title
    );

    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/blogs/by_date?date=YYYY-MM-DD
pub async fn by_date(
    state: web::Data<AppState>,
    query: web::Query<DateQuery>,
) -> AppResult<HttpResponse> {
    let day = parse_date("date", query.date.as_deref())?;
    find_created(&state, BlogFilter::all(), DateFilter::On(day)).await
}

/// GET /api/blogs/by_date_range?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD
pub async fn by_date_range(
    state: web::Data<AppState>,
    query: web::Query<DateRangeQuery>,
) -> AppResult<HttpResponse> {
    let start = parse_date("start_date", query.start_date.as_deref())?;
    let end = parse_date("end_date", query.end_date.as_deref())?;
    find_created(&state, BlogFilter::all(), DateFilter::Between { start, end }).await
}

/// GET /api/blogs/created_after_date?date=YYYY-MM-DD
pub async fn created_after_date(
    state: web::Data<AppState>,
    query: web::Query<DateQuery>,
) -> AppResult<HttpResponse> {
    let day = parse_date("date", query.date.as_deref())?;
    find_created(&state, BlogFilter::all(), DateFilter::After(day)).await
}

/// GET /api/blogs/created_before_date?date=YYYY-MM-DD
pub async fn created_before_date(
    state: web::Data<AppState>,
    query: web::Query<DateQuery>,
) -> AppResult<HttpResponse> {
    let day = parse_date("date", query.date.as_deref())?;
    find_created(&state, BlogFilter::all(), DateFilter::Before(day)).await
}

async fn find_created(
    state: &AppState,
    filter: BlogFilter,
    dates: DateFilter,
) -> AppResult<HttpResponse> {
    tracing::debug!(?dates, "Filtering blogs by creation date");

    let blogs = match dates.window() {
        Some(window) => state.blogs.find(&filter.created_within(window)).await?,
        // An inverted range cannot match anything
        None => Vec::new(),
    };
    Ok(HttpResponse::Ok().json(to_responses(blogs)))
}

async fn fetch(state: &AppState, id: i64) -> AppResult<Blog> {
    state
        .blogs
        .find_by_id(id)
        .await?
        .ok_or_else(|| {
            AppError::from(DomainError::NotFound {
                entity_type: "Blog",
                id,
            })
        })
}

/// Load a blog for mutation, enforcing that `principal` authored it.
async fn fetch_owned(
    state: &AppState,
    principal: &Principal,
    id: i64,
    action: &str,
) -> AppResult<Blog> {
    let blog = fetch(state, id).await?;

    let access = Access::evaluate(Some(principal), &blog);
    if access != Access::Proceed {
        tracing::warn!(
            blog_id = id,
            user_id = principal.user_id,
            author_id = blog.author_id,
            "Denied {} of blog owned by another user",
            action
        );
    }
    access.into_result(action)?;

    Ok(blog)
}

async fn save(state: &AppState, principal: &Principal, blog: Blog) -> AppResult<HttpResponse> {
    let blog = state.blogs.update(blog).await?;
    tracing::info!(blog_id = blog.id, user_id = principal.user_id, "Blog updated");

    let message = format!("Blog \"{}\" updated successfully!", blog.title);
    let body: ApiResponse<BlogResponse> = ApiResponse::ok_with_message(to_response(blog), message);
    Ok(HttpResponse::Ok().json(body))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
