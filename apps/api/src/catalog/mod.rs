// Career path catalog: static reference roles per industry, read from Postgres
// and cached in Redis. The cache is best-effort; Redis trouble never fails a request.

pub mod cache;
pub mod handlers;

use redis::Client as RedisClient;
use sqlx::PgPool;
use tracing::debug;

use crate::errors::AppError;
use crate::models::career::CareerPathRow;

pub fn cache_key(industry: &str) -> String {
    format!("catalog:career_paths:{}", industry.trim().to_lowercase())
}

/// Catalog roles for one industry, in catalog order.
pub async fn fetch_career_paths(pool: &PgPool, industry: &str) -> Result<Vec<CareerPathRow>, AppError> {
    Ok(sqlx::query_as::<_, CareerPathRow>(
        r#"
        SELECT *
        FROM career_paths
        WHERE lower(industry) = lower($1)
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(industry.trim())
    .fetch_all(pool)
    .await?)
}

/// Cache-first read of one industry's catalog.
pub async fn load_career_paths(
    pool: &PgPool,
    redis: &RedisClient,
    ttl_secs: u64,
    industry: &str,
) -> Result<Vec<CareerPathRow>, AppError> {
    let key = cache_key(industry);
    if let Some(paths) = cache::get_json::<Vec<CareerPathRow>>(redis, &key).await {
        debug!("Catalog cache hit for '{industry}' ({} paths)", paths.len());
        return Ok(paths);
    }

    let paths = fetch_career_paths(pool, industry).await?;
    cache::put_json(redis, &key, &paths, ttl_secs).await;
    Ok(paths)
}

/// Catalog roles for several industries, concatenated in the order given.
pub async fn load_catalog_for_industries(
    pool: &PgPool,
    redis: &RedisClient,
    ttl_secs: u64,
    industries: &[String],
) -> Result<Vec<CareerPathRow>, AppError> {
    let mut all = Vec::new();
    for industry in industries {
        all.extend(load_career_paths(pool, redis, ttl_secs, industry).await?);
    }
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_normalized() {
        assert_eq!(cache_key("  Technology "), "catalog:career_paths:technology");
        assert_eq!(cache_key("technology"), cache_key("TECHNOLOGY"));
    }
}
