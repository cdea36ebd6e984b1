//! End-to-end crawl tests against a mock HTTP server

use checklink::classify::AiClassifier;
use checklink::config::ClassifierConfig;
use checklink::crawler::SiteGoal;
use checklink::report::IssueKind;
use checklink::{ChecklinkError, ContentClassifier, Coordinator, CrawlOptions, Verdict};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GOAL_META: &str =
    r#"<meta name="description" content="Community gardening projects and workshops">"#;

/// Page text the keyword classifier scores as relevant to the goal above
const RELEVANT: &str = "Join our community gardening projects and weekend workshops.";

/// Page text with no overlap with the goal and no scam phrases
const OFF_TOPIC: &str = "Cheap watches, discount prices, buy today.";

fn options(base_url: &str, max_depth: u32) -> CrawlOptions {
    let mut options = CrawlOptions::new(base_url);
    options.max_depth = max_depth;
    options.delay_ms = 0;
    options.timeout_secs = 5;
    options
}

fn keyword_coordinator(base_url: &str, max_depth: u32) -> Coordinator {
    let classifier = ContentClassifier::from_credentials(None, ClassifierConfig::default());
    Coordinator::new(options(base_url, max_depth), classifier).unwrap()
}

fn page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(format!(
        "<html><head>{}</head><body>{}</body></html>",
        GOAL_META, body
    ))
}

#[tokio::test]
async fn test_broken_link_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/good"))
        .respond_with(page(RELEVANT))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(page(&format!(
            r#"{} <a href="/good">Good</a> <a href="/missing">Missing</a>"#,
            RELEVANT
        )))
        .mount(&server)
        .await;

    let outcome = keyword_coordinator(&server.uri(), 1).run().await.unwrap();

    assert_eq!(outcome.languages.len(), 1);
    let report = &outcome.languages[0];
    assert_eq!(report.code, "default");
    assert_eq!(report.links_checked, 3);
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].kind, IssueKind::Broken);
    assert_eq!(report.issues[0].detail, "HTTP 404");
    assert!(report.issues[0].url.ends_with("/missing"));
}

#[tokio::test]
async fn test_two_language_crawl() {
    let server = MockServer::start().await;

    // Language pages carry the lang parameter; mount them before the bare
    // homepage mock so the query matchers get first pick.
    for lang in ["pt", "fr"] {
        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("lang", lang))
            .respond_with(page(&format!(
                r#"{text} <a href="/{lang}/missing">Missing</a> <a href="/{lang}/offtopic">News</a>"#,
                text = RELEVANT,
                lang = lang
            )))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/{}/missing", lang)))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/{}/offtopic", lang)))
            .respond_with(page(OFF_TOPIC))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(page(
            r#"<a href="?lang=pt">Português</a> <a href="?lang=fr">Français</a>"#,
        ))
        .mount(&server)
        .await;

    let outcome = keyword_coordinator(&server.uri(), 1).run().await.unwrap();

    assert_eq!(outcome.languages.len(), 2);
    assert_eq!(outcome.languages[0].code, "pt");
    assert_eq!(outcome.languages[1].code, "fr");

    for report in &outcome.languages {
        // Entry page, broken link, off-topic page
        assert_eq!(report.links_checked, 3);
        assert_eq!(report.issues.len(), 2, "report for {}", report.code);
        assert_eq!(report.issues[0].kind, IssueKind::Broken);
        assert_eq!(report.issues[1].kind, IssueKind::LowRelevance);
        for issue in &report.issues {
            assert_eq!(issue.language, report.code);
        }
    }

    let total: usize = outcome.languages.iter().map(|l| l.issues.len()).sum();
    assert_eq!(total, 4);
}

#[tokio::test]
async fn test_depth_zero_checks_entry_page_only() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/child"))
        .respond_with(page(RELEVANT))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(page(&format!(
            r#"{} <a href="/child">Child</a>"#,
            RELEVANT
        )))
        .mount(&server)
        .await;

    let outcome = keyword_coordinator(&server.uri(), 0).run().await.unwrap();

    assert_eq!(outcome.languages[0].links_checked, 1);
    assert!(outcome.languages[0].issues.is_empty());
}

#[tokio::test]
async fn test_timed_out_page_is_not_expanded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow-child"))
        .respond_with(page(RELEVANT))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            page(r#"<a href="/slow-child">Never seen</a>"#)
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(page(&format!(
            r#"{} <a href="/slow">Slow</a>"#,
            RELEVANT
        )))
        .mount(&server)
        .await;

    let classifier = ContentClassifier::from_credentials(None, ClassifierConfig::default());
    let mut opts = options(&server.uri(), 2);
    opts.timeout_secs = 1;
    let outcome = Coordinator::new(opts, classifier)
        .unwrap()
        .run()
        .await
        .unwrap();

    let report = &outcome.languages[0];
    assert_eq!(report.links_checked, 2);
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].kind, IssueKind::Timeout);
}

#[tokio::test]
async fn test_shared_link_is_checked_once_per_language() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shared"))
        .respond_with(page(RELEVANT))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(page(&format!(
            r#"{} <a href="/shared">Shared</a>"#,
            RELEVANT
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(page(&format!(
            r#"{} <a href="/a">A</a> <a href="/shared">Shared</a>"#,
            RELEVANT
        )))
        .mount(&server)
        .await;

    let outcome = keyword_coordinator(&server.uri(), 2).run().await.unwrap();

    // Entry, /a, /shared: the second reference to /shared is deduplicated
    assert_eq!(outcome.languages[0].links_checked, 3);
    assert!(outcome.languages[0].issues.is_empty());
}

#[tokio::test]
async fn test_unreachable_homepage_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = keyword_coordinator(&server.uri(), 1).run().await;

    match result {
        Err(ChecklinkError::Discovery { reason, .. }) => {
            assert_eq!(reason, "HTTP 500");
        }
        other => panic!("expected discovery error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_suspicious_content_is_flagged() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/prize"))
        .respond_with(page("Congratulations you won! Claim your free money."))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(page(&format!(
            r#"{} <a href="/prize">Winners</a>"#,
            RELEVANT
        )))
        .mount(&server)
        .await;

    let outcome = keyword_coordinator(&server.uri(), 1).run().await.unwrap();

    let report = &outcome.languages[0];
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].kind, IssueKind::Suspicious);
    assert_eq!(report.issues[0].title, "Winners");
}

#[tokio::test]
async fn test_ai_failure_falls_back_to_keywords() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let classifier = AiClassifier::new("sk-test".to_string(), ClassifierConfig::default())
        .with_endpoint(format!("{}/v1/chat/completions", server.uri()));
    let goal = SiteGoal {
        summary: "community gardening projects and workshops".to_string(),
    };

    // The AI call fails, so the keyword path decides
    let verdict = classifier.classify(OFF_TOPIC, &goal).await;
    assert!(matches!(verdict, Verdict::LowRelevance(_)));

    let verdict = classifier.classify(RELEVANT, &goal).await;
    assert_eq!(verdict, Verdict::Ok);
}

#[tokio::test]
async fn test_ai_verdict_is_used_when_available() {
    let server = MockServer::start().await;

    let analysis =
        r#"{"relevance_score": 9, "is_suspicious": true, "reasons": ["fake prize"], "summary": ""}"#;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": analysis}}]
        })))
        .mount(&server)
        .await;

    let classifier = AiClassifier::new("sk-test".to_string(), ClassifierConfig::default())
        .with_endpoint(format!("{}/v1/chat/completions", server.uri()));
    let goal = SiteGoal {
        summary: "community gardening".to_string(),
    };

    // Keyword scoring would call this relevant; the AI verdict wins
    let verdict = classifier.classify(RELEVANT, &goal).await;
    assert_eq!(verdict, Verdict::Suspicious("fake prize".to_string()));
}
