use mimir::cache::DetailCache;
use mimir::{DetailCacheConfig, DetailRecord, Difficulty, problem_url};

fn record(id: &str, slug: &str, likes: u64) -> DetailRecord {
    DetailRecord {
        id: id.into(),
        frontend_id: id.into(),
        title: slug.replace('-', " "),
        slug: slug.into(),
        difficulty: Difficulty::Easy,
        paid_only: false,
        has_solution: true,
        has_video_solution: false,
        content: Some("<p>statement</p>".into()),
        likes,
        dislikes: 0,
        stats: None,
        similar_questions: None,
        category_title: Some("Algorithms".into()),
        hints: vec![],
        topic_tags: vec![],
        company_tags: vec![],
        solution: None,
        url: problem_url(slug),
    }
}

#[tokio::test]
async fn miss_then_hit() {
    let cache = DetailCache::default();
    assert!(cache.get("1").await.is_none());

    cache.put("1", record("1", "two-sum", 10)).await;

    let hit = cache.get("1").await.unwrap();
    assert_eq!(hit.slug, "two-sum");
    assert!(cache.contains("1"));
    assert!(!cache.contains("2"));
}

#[tokio::test]
async fn put_overwrites_existing_entry() {
    let cache = DetailCache::new(&DetailCacheConfig::new());

    cache.put("1", record("1", "two-sum", 10)).await;
    cache.put("1", record("1", "two-sum", 11)).await;

    assert_eq!(cache.get("1").await.unwrap().likes, 11);
}

#[tokio::test]
async fn invalidate_all_drops_entries() {
    let cache = DetailCache::default();
    cache.put("1", record("1", "two-sum", 10)).await;
    cache.put("2", record("2", "add-two-numbers", 5)).await;

    cache.invalidate_all();

    assert!(cache.get("1").await.is_none());
    assert!(cache.get("2").await.is_none());
}

#[tokio::test]
async fn bounded_cache_still_serves_recent_entries() {
    let cache = DetailCache::new(&DetailCacheConfig::new().max_entries(100));

    for i in 0..10 {
        let id = i.to_string();
        cache.put(id.clone(), record(&id, &format!("problem-{i}"), i)).await;
    }

    assert_eq!(cache.get("9").await.unwrap().slug, "problem-9");
}
