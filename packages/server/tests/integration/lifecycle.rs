use std::sync::Arc;

use analyzer::AnalysisResults;
use server::pipeline::CodeScorer;

use crate::common::{TestApp, fast_analysis, routes};

const MINIMAL: &str = "function foo() { if (x) {} }";

struct PanickingScorer;

impl CodeScorer for PanickingScorer {
    fn score(&self, _code: &str) -> AnalysisResults {
        panic!("scorer exploded");
    }
}

mod submission_status {
    use super::*;

    #[tokio::test]
    async fn unknown_submission_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::submission("missing")).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.error_code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn completed_submission_shares_hash_with_evaluation() {
        let app = TestApp::spawn().await;
        assert_eq!(app.analyze("done-1", MINIMAL).await.status, 200);

        let sub = app.get(&routes::submission("done-1")).await;
        let eval = app.get(&routes::analysis("done-1")).await;

        assert_eq!(sub.status, 200, "{}", sub.text);
        assert_eq!(sub.body["id"], "done-1");
        assert_eq!(sub.body["status"], "completed");
        assert!(sub.body["receivedAt"].is_string());
        assert!(sub.body.get("failure").is_none());
        assert_eq!(sub.body["codeHash"], eval.body["codeHash"]);
    }

    #[tokio::test]
    async fn status_moves_through_analyzing_to_completed() {
        let mut analysis = fast_analysis();
        analysis.delay_ms = 300;
        let app = Arc::new(TestApp::spawn_with_analysis(analysis).await);

        let poster = app.clone();
        let request = tokio::spawn(async move { poster.analyze("slow-1", MINIMAL).await });

        let seen = app.wait_for_status("slow-1", "completed").await;
        let res = request.await.unwrap();

        assert_eq!(res.status, 200, "{}", res.text);
        assert!(seen.contains(&"analyzing".to_string()), "saw {seen:?}");
        assert_eq!(seen.last().map(String::as_str), Some("completed"));
        let analyzing = seen.iter().position(|s| s == "analyzing").unwrap();
        assert!(!seen[analyzing..].contains(&"pending".to_string()));
    }

    #[tokio::test]
    async fn evaluation_is_absent_while_analyzing() {
        let mut analysis = fast_analysis();
        analysis.delay_ms = 300;
        let app = Arc::new(TestApp::spawn_with_analysis(analysis).await);

        let poster = app.clone();
        let request = tokio::spawn(async move { poster.analyze("slow-2", MINIMAL).await });
        app.wait_for_status("slow-2", "analyzing").await;

        let res = app.get(&routes::analysis("slow-2")).await;
        assert_eq!(res.status, 404);

        assert_eq!(request.await.unwrap().status, 200);
    }
}

mod resubmission {
    use super::*;

    #[tokio::test]
    async fn resubmitting_finished_id_replaces_result() {
        let app = TestApp::spawn().await;
        let first = app.analyze("again", MINIMAL).await;
        assert_eq!(first.status, 200);

        let second = app
            .analyze("again", &"selfdestruct(owner);\n".repeat(5))
            .await;
        assert_eq!(second.status, 200, "{}", second.text);
        assert_ne!(first.body["codeHash"], second.body["codeHash"]);

        let sub = app.get(&routes::submission("again")).await;
        let eval = app.get(&routes::analysis("again")).await;
        assert_eq!(sub.body["codeHash"], second.body["codeHash"]);
        assert_eq!(eval.body["codeHash"], second.body["codeHash"]);
        assert_eq!(eval.body["security"], 10);

        let stats = app.get(routes::STATS).await;
        assert_eq!(stats.body["totalSubmissions"], 1);
        assert_eq!(stats.body["completedAnalyses"], 1);
    }

    #[tokio::test]
    async fn concurrent_submit_of_same_id_conflicts() {
        let mut analysis = fast_analysis();
        analysis.delay_ms = 300;
        let app = TestApp::spawn_with_analysis(analysis).await;

        let (a, b) = futures::join!(
            app.analyze("race", MINIMAL),
            app.analyze("race", "function bar() {}"),
        );

        let mut statuses = [a.status, b.status];
        statuses.sort_unstable();
        assert_eq!(statuses, [200, 409], "a: {} b: {}", a.text, b.text);

        let (winner, loser) = if a.status == 200 { (a, b) } else { (b, a) };
        assert_eq!(loser.error_code(), "CONFLICT");

        let eval = app.get(&routes::analysis("race")).await;
        assert_eq!(eval.body["codeHash"], winner.body["codeHash"]);
    }
}

mod failures {
    use super::*;

    #[tokio::test]
    async fn timeout_marks_submission_failed() {
        let mut analysis = fast_analysis();
        analysis.delay_ms = 500;
        analysis.timeout_ms = 50;
        let app = TestApp::spawn_with_analysis(analysis).await;

        let res = app.analyze("too-slow", MINIMAL).await;

        assert_eq!(res.status, 500, "{}", res.text);
        assert_eq!(res.error_code(), "ANALYSIS_FAILED");
        assert!(res.body["message"].as_str().unwrap().contains("timed out"));

        let sub = app.get(&routes::submission("too-slow")).await;
        assert_eq!(sub.body["status"], "failed");
        assert!(sub.body["failure"].as_str().unwrap().contains("timed out"));

        let eval = app.get(&routes::analysis("too-slow")).await;
        assert_eq!(eval.status, 404);

        let stats = app.get(routes::STATS).await;
        assert_eq!(stats.body["totalSubmissions"], 1);
        assert_eq!(stats.body["completedAnalyses"], 0);
        assert_eq!(stats.body["pendingAnalyses"], 1);
        assert_eq!(stats.body["failedAnalyses"], 1);
    }

    #[tokio::test]
    async fn scorer_panic_marks_submission_failed() {
        let app = TestApp::spawn_with(fast_analysis(), Arc::new(PanickingScorer)).await;

        let res = app.analyze("boom", MINIMAL).await;

        assert_eq!(res.status, 500, "{}", res.text);
        assert_eq!(res.error_code(), "ANALYSIS_FAILED");

        let sub = app.get(&routes::submission("boom")).await;
        assert_eq!(sub.body["status"], "failed");
    }

    #[tokio::test]
    async fn failed_id_can_be_resubmitted() {
        let mut analysis = fast_analysis();
        analysis.delay_ms = 500;
        analysis.timeout_ms = 50;
        let app = TestApp::spawn_with_analysis(analysis).await;
        assert_eq!(app.analyze("retry", MINIMAL).await.status, 500);

        // Fails again on the same slow pipeline, but is accepted rather than conflicting.
        let res = app.analyze("retry", MINIMAL).await;
        assert_eq!(res.status, 500);
        assert_eq!(res.error_code(), "ANALYSIS_FAILED");
    }
}
