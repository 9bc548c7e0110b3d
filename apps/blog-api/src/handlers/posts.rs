//! Post handlers.

use actix_web::{HttpResponse, web};

use blog_core::domain::{ListOptions, NewPost, Post, PostPatch};
use blog_shared::{ListPostsQuery, PostResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title,
        author: post.author,
        contents: post.contents,
        tags: post.tags,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

/// GET /api/v1/posts?author=&tag=&sortBy=&sortOrder=
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let options = ListOptions::parse(query.sort_by.as_deref(), query.sort_order.as_deref())?;

    let posts = match (query.author, query.tag) {
        (Some(_), Some(_)) => {
            return Err(AppError::BadRequest(
                "Filter by either author or tag, not both".to_string(),
            ));
        }
        (Some(author), None) => {
            state
                .deadline(state.posts.list_posts_by_author(&author, options))
                .await?
        }
        (None, Some(tag)) => {
            state
                .deadline(state.posts.list_posts_by_tag(&tag, options))
                .await?
        }
        (None, None) => state.deadline(state.posts.list_all_posts(options)).await?,
    };

    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/v1/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .deadline(state.posts.get_post_by_id(&id))
        .await?
        .ok_or_else(|| AppError::post_not_found(&id))?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// POST /api/v1/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<NewPost>,
) -> AppResult<HttpResponse> {
    let post = state
        .deadline(state.posts.create_post(body.into_inner()))
        .await?;

    Ok(HttpResponse::Created().json(to_response(post)))
}

/// PATCH /api/v1/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PostPatch>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .deadline(state.posts.update_post(&id, body.into_inner()))
        .await?
        .ok_or_else(|| AppError::post_not_found(&id))?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /api/v1/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let result = state.deadline(state.posts.delete_post(&id)).await?;
    if !result.is_deleted() {
        return Err(AppError::post_not_found(&id));
    }

    Ok(HttpResponse::NoContent().finish())
}
