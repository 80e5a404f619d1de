//! Route handlers organized by resource

pub mod export;
pub mod health;
pub mod submit;

use super::error::ApiError;

/// Method fallback answering 405 with `Allow: <allow>`.
pub(crate) fn method_not_allowed(
    allow: &'static str,
) -> impl Fn() -> std::future::Ready<ApiError> + Clone + Send + Sync + 'static {
    move || std::future::ready(ApiError::MethodNotAllowed { allow })
}
