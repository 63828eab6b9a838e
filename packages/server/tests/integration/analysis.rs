use crate::common::{TestApp, fast_analysis, routes};
use serde_json::json;

const MINIMAL: &str = "function foo() { if (x) {} }";

/// SHA-256 of `abc`.
const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

mod analyze_code {
    use super::*;

    #[tokio::test]
    async fn scores_minimal_function() {
        let app = TestApp::spawn().await;

        let res = app.analyze("cand-1", MINIMAL).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["submissionId"], "cand-1");
        assert_eq!(res.body["status"], "completed");
        assert_eq!(res.body["results"]["complexity"], 8);
        assert_eq!(res.body["results"]["security"], 100);
        assert_eq!(res.body["results"]["quality"], 65);
        assert_eq!(res.body["results"]["finalScore"], 62);
        assert_eq!(res.body["results"]["analysis"]["linesOfCode"], 1);
        assert_eq!(res.body["results"]["analysis"]["functions"], 1);
        assert_eq!(res.body["results"]["analysis"]["events"], 0);
        assert_eq!(res.body["results"]["analysis"]["modifiers"], 0);
    }

    #[tokio::test]
    async fn penalties_are_reported_as_findings() {
        let app = TestApp::spawn().await;

        let res = app
            .analyze("cand-2", &"selfdestruct(owner);\n".repeat(5))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["results"]["security"], 10);
        let findings = res.body["results"]["findings"].as_array().unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0]["pattern"], "selfdestruct");
        assert_eq!(findings[0]["kind"], "penalty");
        assert_eq!(findings[0]["occurrences"], 5);
        assert_eq!(findings[0]["points"], 90);
    }

    #[tokio::test]
    async fn code_hash_is_sha256_hex() {
        let app = TestApp::spawn().await;

        let res = app.analyze("hash-1", "abc").await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["codeHash"], ABC_SHA256);
    }

    #[tokio::test]
    async fn same_code_under_different_ids_scores_identically() {
        let app = TestApp::spawn().await;

        let a = app.analyze("twin-a", MINIMAL).await;
        let b = app.analyze("twin-b", MINIMAL).await;
        let c = app.analyze("twin-c", "function foo() { if (y) {} }").await;

        assert_eq!(a.status, 200);
        assert_eq!(b.status, 200);
        assert_eq!(a.body["codeHash"], b.body["codeHash"]);
        assert_eq!(a.body["results"], b.body["results"]);
        assert_ne!(a.body["codeHash"], c.body["codeHash"]);
    }

    #[tokio::test]
    async fn whitespace_only_code_is_accepted() {
        let app = TestApp::spawn().await;

        let res = app.analyze("blank-code", "   \n  ").await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["results"]["security"], 100);
    }
}

mod analyze_validation {
    use super::*;

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let app = TestApp::spawn().await;

        for body in [
            json!({}),
            json!({"code": MINIMAL}),
            json!({"submissionId": "x"}),
            json!({"code": "", "submissionId": "x"}),
            json!({"code": MINIMAL, "submissionId": ""}),
        ] {
            let res = app.post(routes::ANALYZE, &body).await;
            assert_eq!(res.status, 400, "body {body}: {}", res.text);
            assert_eq!(res.error_code(), "VALIDATION_ERROR");
            assert_eq!(res.body["message"], "Code and submissionId are required");
        }
    }

    #[tokio::test]
    async fn rejected_requests_leave_no_state() {
        let app = TestApp::spawn().await;

        let res = app.analyze("ghost", "").await;
        assert_eq!(res.status, 400);

        let sub = app.get(&routes::submission("ghost")).await;
        assert_eq!(sub.status, 404);
        let stats = app.get(routes::STATS).await;
        assert_eq!(stats.body["totalSubmissions"], 0);
    }

    #[tokio::test]
    async fn blank_submission_id_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.analyze("   ", MINIMAL).await;

        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn overlong_submission_id_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.analyze(&"x".repeat(257), MINIMAL).await;

        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn malformed_json_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_raw(routes::ANALYZE, "{not json", "application/json")
            .await;

        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn wrong_content_type_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_raw(routes::ANALYZE, "code=abc", "text/plain")
            .await;

        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn oversized_code_is_rejected() {
        let mut analysis = fast_analysis();
        analysis.max_code_size = 64;
        let app = TestApp::spawn_with_analysis(analysis).await;

        let just_over = app.analyze("big-1", &"a".repeat(65)).await;
        assert_eq!(just_over.status, 400, "{}", just_over.text);
        assert_eq!(just_over.error_code(), "VALIDATION_ERROR");

        let far_over = app.analyze("big-2", &"a".repeat(8 * 1024)).await;
        assert_eq!(far_over.status, 400, "{}", far_over.text);
        assert_eq!(far_over.error_code(), "VALIDATION_ERROR");

        let at_limit = app.analyze("big-3", &"a".repeat(64)).await;
        assert_eq!(at_limit.status, 200, "{}", at_limit.text);
    }

    #[tokio::test]
    async fn escaped_body_over_limit_names_the_request_body() {
        let mut analysis = fast_analysis();
        analysis.max_code_size = 1000;
        let app = TestApp::spawn_with_analysis(analysis).await;

        // 1000 bytes of code, but each control char is sent as a 6-byte `\u0001` escape.
        let res = app.analyze("escaped", &"\u{1}".repeat(1000)).await;

        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.error_code(), "VALIDATION_ERROR");
        assert_eq!(res.body["message"], "Request body exceeds the size limit");
    }
}

mod get_analysis {
    use super::*;

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::analysis("nobody")).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.error_code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn returns_stored_evaluation() {
        let app = TestApp::spawn().await;
        let posted = app.analyze("eval-1", MINIMAL).await;
        assert_eq!(posted.status, 200);

        let res = app.get(&routes::analysis("eval-1")).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["submissionId"], "eval-1");
        assert_eq!(res.body["codeHash"], posted.body["codeHash"]);
        assert_eq!(res.body["complexity"], 8);
        assert_eq!(res.body["security"], 100);
        assert_eq!(res.body["quality"], 65);
        assert_eq!(res.body["finalScore"], 62);
        assert_eq!(res.body["detail"]["linesOfCode"], 1);
        assert!(res.body["completedAt"].is_string());
    }

    #[tokio::test]
    async fn ids_are_case_sensitive() {
        let app = TestApp::spawn().await;
        assert_eq!(app.analyze("Case", MINIMAL).await.status, 200);

        assert_eq!(app.get(&routes::analysis("Case")).await.status, 200);
        assert_eq!(app.get(&routes::analysis("case")).await.status, 404);
    }
}
