#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use tempo_core::{ContextRecord, Message};
    use tempo_memory::{
        L3Status, LoadOutcome, Memory, MemoryState, MockLongTermStore, Tier, DEFAULT_L2_CAPACITY,
    };

    fn record(label: &str) -> ContextRecord {
        ContextRecord::from_messages(vec![Message::user(label)])
    }

    fn memory() -> Memory {
        Memory::new(Arc::new(MockLongTermStore::new()))
    }

    // ── L1 ─────────────────────────────────────────────────────

    mod l1 {
        use super::*;

        #[test]
        fn test_full_replace_not_merge() {
            let mem = memory();
            mem.update_l1(vec![Message::user("a"), Message::user("b"), Message::user("c")]);
            mem.update_l1(vec![Message::user("d"), Message::user("e")]);
            let l1 = mem.l1();
            assert_eq!(l1.len(), 2);
            assert_eq!(l1[0].content, "d");
            assert_eq!(l1[1].content, "e");
        }

        #[test]
        fn test_window_keeps_most_recent() {
            let mut state = MemoryState::with_limits(5, 50);
            state.update_l1((0..8).map(|i| Message::user(format!("turn {i}"))).collect());
            assert_eq!(state.l1().len(), 5);
            assert_eq!(state.l1()[0].content, "turn 3");
            assert_eq!(state.l1()[4].content, "turn 7");
        }
    }

    // ── L2 ─────────────────────────────────────────────────────

    mod l2 {
        use super::*;

        #[test]
        fn test_bounded_fifo() {
            let mem = memory();
            for i in 0..60 {
                mem.absorb_to_l2(record(&format!("record {i}")));
                assert!(mem.l2().len() <= DEFAULT_L2_CAPACITY);
            }
            let l2 = mem.l2();
            assert_eq!(l2.len(), 50);
            // Oldest ten were dropped; insertion order preserved.
            assert_eq!(l2[0].messages[0].content, "record 10");
            assert_eq!(l2[49].messages[0].content, "record 59");
        }

        #[test]
        fn test_custom_capacity() {
            let mut state = MemoryState::with_limits(5, 3);
            for i in 0..5 {
                state.absorb_to_l2(record(&format!("r{i}")));
            }
            assert_eq!(state.l2().len(), 3);
            assert_eq!(state.l2()[0].messages[0].content, "r2");
        }
    }

    // ── Clearing ───────────────────────────────────────────────

    mod clearing {
        use super::*;

        #[test]
        fn test_clear_single_tier_leaves_others() {
            let mem = memory();
            mem.update_l1(vec![Message::user("x")]);
            mem.absorb_to_l2(record("y"));
            mem.absorb_to_l2(record("z"));
            mem.clear(Some(Tier::L2));
            assert_eq!(mem.l1().len(), 1);
            assert_eq!(mem.l2().len(), 0);
        }

        #[test]
        fn test_clear_all_and_idempotent() {
            let mem = memory();
            mem.update_l1(vec![Message::user("x")]);
            mem.absorb_to_l2(record("y"));
            mem.clear(None);
            mem.clear(None);
            let stats = mem.stats();
            assert_eq!(stats.l1_count, 0);
            assert_eq!(stats.l2_count, 0);
            assert_eq!(stats.l3_count, 0);
        }
    }

    // ── Stats ──────────────────────────────────────────────────

    mod stats {
        use super::*;

        #[test]
        fn test_counts_and_total_size() {
            let mem = memory();
            mem.update_l1(vec![Message::user("x")]);
            mem.absorb_to_l2(record("y"));
            mem.absorb_to_l2(record("z"));

            let stats = mem.stats();
            assert_eq!(stats.l1_count, 1);
            assert_eq!(stats.l2_count, 2);
            assert_eq!(stats.l3_count, 0);

            let expected = serde_json::to_vec(&mem.l1()).unwrap().len()
                + serde_json::to_vec(&mem.l2()).unwrap().len()
                + serde_json::to_vec(&mem.l3()).unwrap().len();
            assert_eq!(stats.total_size, expected);
        }
    }

    // ── L3 against a mock store ────────────────────────────────

    mod l3 {
        use super::*;

        #[tokio::test]
        async fn test_load_replaces_wholesale() {
            let store = Arc::new(
                MockLongTermStore::new()
                    .with_snapshot(vec![json!({"a": 1}), json!({"b": 2})])
                    .with_snapshot(vec![json!({"c": 3})]),
            );
            let mem = Memory::new(store);

            let outcome = mem.load_long_term("user-1").await;
            assert_eq!(outcome, LoadOutcome::Loaded(2));
            assert_eq!(mem.l3(), vec![json!({"a": 1}), json!({"b": 2})]);
            assert_eq!(mem.l3_status(), L3Status::Loaded);

            // A reload replaces, never appends.
            mem.load_long_term("user-1").await;
            assert_eq!(mem.l3(), vec![json!({"c": 3})]);
        }

        #[tokio::test]
        async fn test_failure_degrades_to_empty() {
            let store = Arc::new(
                MockLongTermStore::new()
                    .with_snapshot(vec![json!({"a": 1})])
                    .with_failure("backend down"),
            );
            let mem = Memory::new(store);

            mem.load_long_term("user-1").await;
            assert_eq!(mem.l3().len(), 1);

            // Failure wipes the previously loaded snapshot, not just skips it.
            let outcome = mem.load_long_term("user-1").await;
            assert!(matches!(outcome, LoadOutcome::Unavailable(_)));
            assert!(mem.l3().is_empty());
            assert_eq!(mem.l3_status(), L3Status::Empty);
        }

        #[tokio::test]
        async fn test_mutations_during_inflight_load() {
            // Absorbing and updating while a load is in flight commits
            // against disjoint tiers.
            let store = Arc::new(SlowStore::new(vec![(50, Ok(vec![json!({"k": "v"})]))]));
            let mem = Memory::new(store);

            let loader = {
                let mem = mem.clone();
                tokio::spawn(async move { mem.load_long_term("u").await })
            };
            mem.update_l1(vec![Message::user("mid-flight")]);
            mem.absorb_to_l2(record("mid-flight"));
            loader.await.unwrap();

            assert_eq!(mem.l1().len(), 1);
            assert_eq!(mem.l2().len(), 1);
            assert_eq!(mem.l3(), vec![json!({"k": "v"})]);
        }

        #[tokio::test]
        async fn test_overlapping_loads_last_completion_wins() {
            let store = Arc::new(SlowStore::new(vec![
                (80, Ok(vec![json!("slow")])),
                (10, Ok(vec![json!("fast")])),
            ]));
            let mem = Memory::new(store);

            let first = {
                let mem = mem.clone();
                tokio::spawn(async move { mem.load_long_term("u").await })
            };
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            let second = {
                let mem = mem.clone();
                tokio::spawn(async move { mem.load_long_term("u").await })
            };

            first.await.unwrap();
            second.await.unwrap();
            // The slow (first-issued) load resolved last and overwrote.
            assert_eq!(mem.l3(), vec![json!("slow")]);
        }

        #[tokio::test]
        async fn test_overlapping_loads_discard_stale() {
            let store = Arc::new(SlowStore::new(vec![
                (80, Ok(vec![json!("slow")])),
                (10, Ok(vec![json!("fast")])),
            ]));
            let mem = Memory::discard_stale_loads(store, MemoryState::new());

            let first = {
                let mem = mem.clone();
                tokio::spawn(async move { mem.load_long_term("u").await })
            };
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            let second = {
                let mem = mem.clone();
                tokio::spawn(async move { mem.load_long_term("u").await })
            };

            let first = first.await.unwrap();
            second.await.unwrap();
            assert_eq!(first, LoadOutcome::Discarded);
            assert_eq!(mem.l3(), vec![json!("fast")]);
        }

        /// Store with per-call artificial latency, for interleaving tests.
        struct SlowStore {
            calls: std::sync::Mutex<
                Vec<(u64, tempo_core::Result<Vec<serde_json::Value>>)>,
            >,
        }

        impl SlowStore {
            fn new(calls: Vec<(u64, tempo_core::Result<Vec<serde_json::Value>>)>) -> Self {
                Self {
                    calls: std::sync::Mutex::new(calls),
                }
            }
        }

        #[async_trait::async_trait]
        impl tempo_memory::LongTermStore for SlowStore {
            async fn fetch(&self, _user_id: &str) -> tempo_core::Result<Vec<serde_json::Value>> {
                let (delay, result) = {
                    let mut calls = self.calls.lock().unwrap();
                    if calls.is_empty() {
                        (0, Ok(vec![]))
                    } else {
                        calls.remove(0)
                    }
                };
                tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
                result
            }
        }
    }

    // ── L3 against a real loopback endpoint ────────────────────

    mod l3_http {
        use super::*;
        use axum::http::StatusCode;
        use axum::routing::get;
        use axum::{Json, Router};
        use tempo_memory::HttpLongTermStore;

        async fn serve(app: Router) -> String {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });
            format!("http://{addr}")
        }

        #[tokio::test]
        async fn test_http_500_results_in_empty_l3() {
            let app = Router::new().route(
                "/api/memory/L3/{user}",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            );
            let base = serve(app).await;

            let mem = Memory::new(Arc::new(HttpLongTermStore::new(base)));
            let outcome = mem.load_long_term("user-1").await;
            assert!(matches!(outcome, LoadOutcome::Unavailable(_)));
            assert!(mem.l3().is_empty());
        }

        #[tokio::test]
        async fn test_http_json_array_loaded() {
            let app = Router::new().route(
                "/api/memory/L3/{user}",
                get(|| async { Json(json!([{"a": 1}, {"b": 2}])) }),
            );
            let base = serve(app).await;

            let mem = Memory::new(Arc::new(HttpLongTermStore::new(base)));
            let outcome = mem.load_long_term("user-1").await;
            assert_eq!(outcome, LoadOutcome::Loaded(2));
            assert_eq!(mem.l3(), vec![json!({"a": 1}), json!({"b": 2})]);
        }

        #[tokio::test]
        async fn test_non_json_content_type_is_unavailable() {
            let app = Router::new().route(
                "/api/memory/L3/{user}",
                get(|| async { "<html>maintenance page</html>" }),
            );
            let base = serve(app).await;

            let mem = Memory::new(Arc::new(HttpLongTermStore::new(base)));
            let outcome = mem.load_long_term("user-1").await;
            assert!(matches!(outcome, LoadOutcome::Unavailable(_)));
            assert!(mem.l3().is_empty());
        }

        #[tokio::test]
        async fn test_unreachable_backend_is_unavailable() {
            // Port 9 (discard) is about as unreachable as it gets.
            let mem = Memory::new(Arc::new(HttpLongTermStore::new("http://127.0.0.1:9")));
            let outcome = mem.load_long_term("user-1").await;
            assert!(matches!(outcome, LoadOutcome::Unavailable(_)));
            assert!(mem.l3().is_empty());
        }
    }
}
