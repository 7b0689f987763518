use super::*;
use std::cell::Cell;

#[test]
fn test_new_cache_is_empty() {
    let cache = UniformLocationCache::new();
    assert!(cache.is_empty());
    assert_eq!(cache.generation(), 0);
    assert_eq!(cache.get("u_Color"), None);
}

#[test]
fn test_get_or_query_memoizes() {
    let cache = UniformLocationCache::new();
    let queries = Cell::new(0);
    let query = |_: &str| {
        queries.set(queries.get() + 1);
        UniformLocation(4)
    };

    assert_eq!(cache.get_or_query("u_Color", query), UniformLocation(4));
    assert_eq!(cache.get_or_query("u_Color", |_| UniformLocation(9)), UniformLocation(4));
    assert_eq!(queries.get(), 1);
    assert_eq!(cache.get("u_Color"), Some(UniformLocation(4)));
}

#[test]
fn test_absent_uniform_is_memoized_as_invalid() {
    let cache = UniformLocationCache::new();
    cache.get_or_query("u_Missing", |_| UniformLocation::INVALID);
    assert_eq!(cache.get("u_Missing"), Some(UniformLocation::INVALID));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_invalidate_clears_and_bumps_generation() {
    let cache = UniformLocationCache::default();
    cache.get_or_query("a", |_| UniformLocation(0));
    cache.get_or_query("b", |_| UniformLocation(1));
    assert_eq!(cache.len(), 2);

    cache.invalidate();

    assert!(cache.is_empty());
    assert_eq!(cache.generation(), 1);
    assert_eq!(cache.get_or_query("a", |_| UniformLocation(7)), UniformLocation(7));
}

#[test]
fn test_uniform_location_validity() {
    assert!(UniformLocation(0).is_valid());
    assert!(!UniformLocation::INVALID.is_valid());
    assert_eq!(UniformLocation::default(), UniformLocation::INVALID);
}
