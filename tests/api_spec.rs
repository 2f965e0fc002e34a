use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use oz_engine::api::{
    create_router, create_router_with_config, LoadResponse, SecurityConfig, SessionDriftResponse,
};
use oz_engine::config::EngineConfig;
use oz_engine::engine::dialogue;
use oz_engine::models::*;
use serde_json::json;
use uuid::Uuid;

fn setup() -> TestServer {
    let app = create_router(EngineConfig::default());
    TestServer::new(app).expect("Failed to create test server")
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let server = setup();

        let response = server.get("/api/v1/health").await;

        response.assert_status_ok();
        response.assert_json(&json!({ "status": "ok" }));
    }
}

mod load {
    use super::*;

    #[tokio::test]
    async fn computes_scores_and_status() {
        let server = setup();

        let response = server
            .post("/api/v1/load")
            .json(&WorkItemCounts {
                open_projects: 4,
                open_tasks: 5,
                overdue_tasks: 1,
                ..Default::default()
            })
            .await;

        response.assert_status_ok();
        let body: LoadResponse = response.json();
        // 4*15 + 5*3 + 1*10
        assert_eq!(body.scores.ram_usage, 85.0);
        assert_eq!(body.status, Status::Overload);
        assert_eq!(body.scores.anxiety_level, 45.0);
    }

    #[tokio::test]
    async fn missing_counts_default_to_zero() {
        let server = setup();

        let response = server.post("/api/v1/load").json(&json!({})).await;

        response.assert_status_ok();
        let body: LoadResponse = response.json();
        assert_eq!(body.status, Status::Stable);
        assert_eq!(body.scores, LoadScores::default());
    }

    #[tokio::test]
    async fn uses_configured_weights() {
        let mut config = EngineConfig::default();
        config.ram_weights.project = 50.0;
        let server = TestServer::new(create_router(config)).expect("Failed to create test server");

        let response = server
            .post("/api/v1/load")
            .json(&WorkItemCounts {
                open_projects: 1,
                ..Default::default()
            })
            .await;

        let body: LoadResponse = response.json();
        assert_eq!(body.scores.ram_usage, 50.0);
        assert_eq!(body.status, Status::Elevated);
    }
}

mod drift {
    use super::*;

    #[tokio::test]
    async fn computes_capped_drift() {
        let server = setup();

        let response = server
            .post("/api/v1/drift")
            .json(&json!({ "idle_minutes": 100.0, "open_tasks": 100, "unprocessed_dumps": 100 }))
            .await;

        response.assert_status_ok();
        let reading: DriftReading = response.json();
        assert_eq!(reading.drift_level, 100.0);
        assert!(reading.is_in_void);
    }
}

mod orbits {
    use super::*;

    #[tokio::test]
    async fn partitions_projects_by_age() {
        let server = setup();
        let now = Utc::now();
        let projects: Vec<OrbitProject> = (0..8)
            .map(|i| OrbitProject {
                id: Uuid::new_v4(),
                created_at: now - Duration::days(i),
            })
            .collect();

        let response = server.post("/api/v1/orbits").json(&projects).await;

        response.assert_status_ok();
        let orbits: ProjectOrbitAssignment = response.json();
        assert_eq!(orbits.planet, Some(projects[7].id));
        assert_eq!(orbits.moons, vec![projects[6].id, projects[5].id]);
        assert_eq!(orbits.probes.len(), 3);
        assert_eq!(orbits.archived_count, 2);
        assert!(!orbits.can_add_probe);
    }
}

mod messages {
    use super::*;

    #[tokio::test]
    async fn greeting_comes_from_status_pool() {
        let server = setup();
        let request = MessageRequest::new(MessageCategory::Greeting).with_status(Status::Critical);

        let response = server
            .post("/api/v1/messages")
            .json(&json!({ "category": "greeting", "status": "critical" }))
            .await;

        response.assert_status_ok();
        let message: WizardMessage = response.json();
        assert!(dialogue::candidates(&request).contains(&message.text.as_str()));
        assert_eq!(message.category, MessageCategory::Greeting);
    }

    #[tokio::test]
    async fn seeded_requests_repeat() {
        let server = setup();
        let body = json!({ "category": "completion", "seed": 11 });

        let first: WizardMessage = server.post("/api/v1/messages").json(&body).await.json();
        let second: WizardMessage = server.post("/api/v1/messages").json(&body).await.json();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn unknown_intervention_key_falls_back() {
        let server = setup();
        let fallback = dialogue::candidates(&MessageRequest::new(MessageCategory::Intervention));

        let response = server
            .post("/api/v1/messages")
            .json(&json!({ "category": "intervention", "intervention": "time_travel" }))
            .await;

        response.assert_status_ok();
        let message: WizardMessage = response.json();
        assert_eq!(message.text, fallback[0]);
        assert_eq!(message.tone, Tone::Neutral);
    }

    #[tokio::test]
    async fn legacy_stage_alias_matches_day() {
        let server = setup();

        let legacy: WizardMessage = server
            .post("/api/v1/messages")
            .json(&json!({ "category": "onboarding", "stage": "first_project" }))
            .await
            .json();
        let day: WizardMessage = server
            .post("/api/v1/messages")
            .json(&json!({ "category": "onboarding", "stage": "day3" }))
            .await
            .json();

        assert_eq!(legacy, day);
    }
}

mod impulses {
    use super::*;

    #[tokio::test]
    async fn assessment_hides_proceed_in_overload() {
        let server = setup();

        let response = server
            .post("/api/v1/impulses/assess")
            .json(&json!({
                "impulse": { "type": "new_project", "name": "Candle business" },
                "status": "overload"
            }))
            .await;

        response.assert_status_ok();
        let assessment: GateAssessment = response.json();
        assert_eq!(assessment.classification, ImpulseClassification::Novelty);
        assert!(!assessment.can_proceed);
        assert_eq!(assessment.delay_minutes, vec![5, 10, 30, 60]);
    }

    #[tokio::test]
    async fn destructive_impulse_resolves_to_block() {
        let server = setup();

        let response = server
            .post("/api/v1/impulses/resolve")
            .json(&json!({
                "impulse": { "type": "abandon" },
                "status": "stable",
                "choice": { "action": "proceed" }
            }))
            .await;

        response.assert_status_ok();
        let outcome: GateOutcome = response.json();
        assert_eq!(outcome, GateOutcome::Block);
    }

    #[tokio::test]
    async fn proceed_during_overload_is_rejected() {
        let server = setup();

        let response = server
            .post("/api/v1/impulses/resolve")
            .json(&json!({
                "impulse": { "type": "planned_work" },
                "status": "overload",
                "choice": { "action": "proceed" }
            }))
            .await;

        response.assert_status_bad_request();
        assert!(response.text().contains("overload"));
    }

    #[tokio::test]
    async fn route_accepts_any_destination() {
        let server = setup();

        let response = server
            .post("/api/v1/impulses/resolve")
            .json(&json!({
                "impulse": { "type": "research" },
                "status": "overload",
                "choice": { "action": "route", "destination": "tin_man" }
            }))
            .await;

        response.assert_status_ok();
        let outcome: GateOutcome = response.json();
        assert_eq!(outcome, GateOutcome::Route { destination: Character::TinMan });
    }

    #[tokio::test]
    async fn destinations_use_the_menu_names() {
        let server = setup();

        let assessment = server
            .post("/api/v1/impulses/assess")
            .json(&json!({ "impulse": { "type": "avoidance" }, "status": "stable" }))
            .await;
        assessment.assert_status_ok();
        let body: serde_json::Value = assessment.json();
        assert_eq!(body["destinations"], json!(["tinman", "scarecrow", "lion", "dorothy"]));

        let response = server
            .post("/api/v1/impulses/resolve")
            .json(&json!({
                "impulse": { "type": "avoidance" },
                "status": "stable",
                "choice": { "action": "route", "destination": "tinman" }
            }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "outcome": "route", "destination": "tinman" }));
    }
}

mod sessions {
    use super::*;

    #[tokio::test]
    async fn drift_for_unknown_session_is_not_found() {
        let server = setup();

        let response = server.get("/api/v1/sessions/nobody/drift").await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn activity_starts_a_session_and_sets_quest() {
        let server = setup();
        let quest = Uuid::new_v4();

        let response = server
            .post("/api/v1/sessions/s1/activity")
            .json(&json!({ "quest_id": quest }))
            .await;

        response.assert_status_ok();
        let state: DriftState = response.json();
        assert_eq!(state.last_quest_id, Some(quest));
        assert!(state.drift_triggered_at.is_none());

        let drift: SessionDriftResponse = server.get("/api/v1/sessions/s1/drift").await.json();
        assert_eq!(drift.state.last_quest_id, Some(quest));
        assert!(drift.drift.drift_level < 1.0);
    }

    #[tokio::test]
    async fn snapshot_evaluates_records() {
        let server = setup();
        let now = Utc::now();

        let response = server
            .post("/api/v1/sessions/s2/snapshot")
            .json(&json!({
                "projects": [
                    { "id": Uuid::new_v4(), "created_at": now },
                    { "id": Uuid::new_v4(), "created_at": now, "is_completed": true }
                ],
                "tasks": [
                    { "due_date": now - Duration::days(1), "blocked_by": ["landlord"] },
                    { "is_completed": true }
                ],
                "dumps": [ { "ai_summary": null } ]
            }))
            .await;

        response.assert_status_ok();
        let snapshot: CognitiveSnapshot = response.json();
        assert_eq!(snapshot.counts.open_projects, 1);
        assert_eq!(snapshot.counts.open_tasks, 1);
        assert_eq!(snapshot.counts.overdue_tasks, 1);
        assert_eq!(snapshot.counts.blocked_tasks, 1);
        assert_eq!(snapshot.counts.unprocessed_dumps, 1);
        assert!(snapshot.orbits.planet.is_some());
    }

    #[tokio::test]
    async fn snapshot_without_collections_is_stable() {
        let server = setup();

        let response = server.post("/api/v1/sessions/s3/snapshot").json(&json!({})).await;

        response.assert_status_ok();
        let snapshot: CognitiveSnapshot = response.json();
        assert_eq!(snapshot.status, Status::Stable);
        assert!(!snapshot.toto_alert);
    }

    #[tokio::test]
    async fn ending_a_session_removes_it() {
        let server = setup();
        server
            .post("/api/v1/sessions/s4/activity")
            .json(&json!({}))
            .await
            .assert_status_ok();

        server.delete("/api/v1/sessions/s4").await.assert_status(StatusCode::NO_CONTENT);
        server.delete("/api/v1/sessions/s4").await.assert_status_not_found();
        server.get("/api/v1/sessions/s4/drift").await.assert_status_not_found();
    }
}

// ============================================================
// Security - API Key Authentication
// ============================================================

mod security_auth {
    use super::*;

    fn setup_with_auth(api_key: &str) -> TestServer {
        let config = SecurityConfig::with_api_key(api_key);
        let app = create_router_with_config(EngineConfig::default(), config);
        TestServer::new(app).expect("Failed to create test server")
    }

    #[tokio::test]
    async fn health_endpoint_is_accessible_without_auth() {
        let server = setup_with_auth("test-secret-key");

        let response = server.get("/api/v1/health").await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn protected_endpoint_requires_auth() {
        let server = setup_with_auth("test-secret-key");

        let response = server.post("/api/v1/load").json(&json!({})).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn protected_endpoint_accepts_valid_bearer_token() {
        let server = setup_with_auth("test-secret-key");

        let response = server
            .post("/api/v1/load")
            .add_header("Authorization", "Bearer test-secret-key")
            .json(&json!({}))
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn protected_endpoint_rejects_malformed_auth_header() {
        let server = setup_with_auth("test-secret-key");

        let response = server
            .get("/api/v1/sessions/s/drift")
            .add_header("Authorization", "Basic dXNlcjpwYXNz")
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}

mod security_rate_limit {
    use super::*;

    #[tokio::test]
    async fn requests_over_the_limit_are_rejected() {
        let app = create_router_with_config(EngineConfig::default(), SecurityConfig::with_rate_limit(2));
        let server = TestServer::new(app).expect("Failed to create test server");

        server.get("/api/v1/health").await.assert_status_ok();
        server.get("/api/v1/health").await.assert_status_ok();
        server
            .get("/api/v1/health")
            .await
            .assert_status(StatusCode::TOO_MANY_REQUESTS);
    }
}
