//! Integration tests for site auditing and run coordination
//!
//! These tests use wiremock to stand in for audited websites and the search
//! endpoint, and drive the auditor and coordinator end-to-end.

use async_trait::async_trait;
use lead_audit::audit::{IssueType, SiteAuditor};
use lead_audit::config::Config;
use lead_audit::crawler::{run_audit, Coordinator, Fetcher, RunRequest};
use lead_audit::discovery::{
    discover, placeholder_candidates, DiscoveryError, DuckDuckGoHtml, SearchHit, SearchProvider,
};
use lead_audit::output::{OutputHandler, OutputResult, ResultRow, RunSummary};
use lead_audit::{AuditError, SiteCandidate};
use std::time::Duration;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Address nothing listens on
const REFUSED_URL: &str = "http://127.0.0.1:1/";

/// Creates a configuration suited to local mock servers
fn create_test_config() -> Config {
    let mut config = Config::default();
    config.http.page_timeout_secs = 5;
    config.http.link_timeout_secs = 1;
    config.run.politeness_delay_ms = 0;
    config
}

fn create_auditor(config: &Config) -> SiteAuditor {
    let fetcher = Fetcher::new(&config.http).expect("Failed to build fetcher");
    SiteAuditor::new(fetcher, config.audit.clone())
}

async fn mount_page(server: &MockServer, page_path: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Search provider returning a fixed list of hits
struct StaticProvider(Vec<SearchHit>);

#[async_trait]
impl SearchProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn search(&self, _query: &str, _max: usize) -> Result<Vec<SearchHit>, DiscoveryError> {
        Ok(self.0.clone())
    }
}

fn hit(title: &str, href: &str) -> SearchHit {
    SearchHit {
        title: title.to_string(),
        href: href.to_string(),
        body: String::new(),
    }
}

/// Output handler that records every callback
#[derive(Default)]
struct RecordingOutput {
    discovered: Vec<SiteCandidate>,
    used_fallback: bool,
    progress: Vec<(usize, usize, String)>,
    row_counts: Vec<usize>,
    last_rows: Vec<ResultRow>,
    finalized: Option<RunSummary>,
}

impl OutputHandler for RecordingOutput {
    fn on_discovery(
        &mut self,
        _query: &str,
        candidates: &[SiteCandidate],
        used_fallback: bool,
    ) -> OutputResult<()> {
        self.discovered = candidates.to_vec();
        self.used_fallback = used_fallback;
        Ok(())
    }

    fn on_progress(&mut self, index: usize, total: usize, url: &str) -> OutputResult<()> {
        self.progress.push((index, total, url.to_string()));
        Ok(())
    }

    fn record_rows(&mut self, rows: &[ResultRow]) -> OutputResult<()> {
        self.row_counts.push(rows.len());
        self.last_rows = rows.to_vec();
        Ok(())
    }

    fn finalize(&mut self, summary: &RunSummary) -> OutputResult<()> {
        self.finalized = Some(summary.clone());
        Ok(())
    }
}

#[tokio::test]
async fn test_slow_page_is_flagged() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>Slow</body></html>")
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&mock_server)
        .await;

    let mut config = create_test_config();
    config.audit.slow_threshold_secs = 0.2;
    let auditor = create_auditor(&config);

    let verdict = auditor
        .audit(&format!("{}/", mock_server.uri()), IssueType::SlowPageLoad)
        .await;

    assert!(verdict.issue_detected, "details: {}", verdict.details);
    assert!(verdict.details.starts_with("Load time: "));
    assert!(!verdict.details.ends_with("(OK)"));
}

#[tokio::test]
async fn test_fast_page_is_ok() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", "<html><body>Fast</body></html>".to_string()).await;

    let auditor = create_auditor(&create_test_config());
    let verdict = auditor
        .audit(&format!("{}/", mock_server.uri()), IssueType::SlowPageLoad)
        .await;

    assert!(!verdict.issue_detected);
    assert!(verdict.details.ends_with("s (OK)"), "details: {}", verdict.details);
}

#[tokio::test]
async fn test_missing_description_and_emails_are_harvested() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<html><head><title>Hi</title></head>
        <body><p>Email reception@smiles.example or reception@smiles.example</p>
        <footer>Billing: Billing@Smiles.example</footer></body></html>"#
            .to_string(),
    )
    .await;

    let auditor = create_auditor(&create_test_config());
    let verdict = auditor
        .audit(&format!("{}/", mock_server.uri()), IssueType::MissingSeoMetaTags)
        .await;

    assert!(verdict.issue_detected);
    assert_eq!(verdict.details, "Missing Meta Description");
    assert_eq!(
        verdict.emails.iter().cloned().collect::<Vec<_>>(),
        vec![
            "Billing@Smiles.example".to_string(),
            "reception@smiles.example".to_string()
        ]
    );
}

#[tokio::test]
async fn test_seo_tags_present() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<html><head><title>Smiles Dental</title>
        <meta name="description" content="Family dentist"></head><body></body></html>"#
            .to_string(),
    )
    .await;

    let auditor = create_auditor(&create_test_config());
    let verdict = auditor
        .audit(&format!("{}/", mock_server.uri()), IssueType::MissingSeoMetaTags)
        .await;

    assert!(!verdict.issue_detected);
    assert_eq!(verdict.details, "SEO Tags Present");
    assert!(verdict.emails.is_empty());
}

#[tokio::test]
async fn test_error_status_page_is_still_audited() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html><body>Oops</body></html>"))
        .mount(&mock_server)
        .await;

    let auditor = create_auditor(&create_test_config());
    let verdict = auditor
        .audit(&format!("{}/", mock_server.uri()), IssueType::MissingSeoMetaTags)
        .await;

    assert!(verdict.issue_detected);
    assert_eq!(verdict.details, "Missing Title, Missing Meta Description");
}

#[tokio::test]
async fn test_broken_links_only_first_ten_checked() {
    let mock_server = MockServer::start().await;

    let anchors: String = (1..=15)
        .map(|i| format!(r#"<a href="/page{}">Page {}</a>"#, i, i))
        .collect();
    mount_page(
        &mock_server,
        "/",
        format!(
            r#"<html><body>
            <a href="https://external.example.com/">Partner</a>
            {}
            <p>info@smiles.example</p></body></html>"#,
            anchors
        ),
    )
    .await;

    for i in 1..=15 {
        let status = if i == 3 { 404 } else { 200 };
        let expected_calls = if i <= 10 { 1 } else { 0 };
        Mock::given(method("HEAD"))
            .and(path(format!("/page{}", i)))
            .respond_with(ResponseTemplate::new(status))
            .expect(expected_calls)
            .mount(&mock_server)
            .await;
    }

    let auditor = create_auditor(&create_test_config());
    let verdict = auditor
        .audit(&format!("{}/", mock_server.uri()), IssueType::BrokenLinks)
        .await;

    assert!(verdict.issue_detected);
    assert_eq!(verdict.details, "Found 1 broken links");
    assert!(verdict.emails.contains("info@smiles.example"));
    // call counts are verified when mock_server is dropped
}

#[tokio::test]
async fn test_no_broken_links() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<html><body><a href="/about">About</a><a href="/contact?x=1">Contact</a></body></html>"#
            .to_string(),
    )
    .await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&mock_server)
        .await;

    let auditor = create_auditor(&create_test_config());
    let verdict = auditor
        .audit(&format!("{}/", mock_server.uri()), IssueType::BrokenLinks)
        .await;

    assert!(!verdict.issue_detected);
    assert_eq!(verdict.details, "No broken links found in sample");
}

#[tokio::test]
async fn test_link_timeout_counts_as_broken() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<html><body><a href="/slow">Slow</a><a href="/fine">Fine</a></body></html>"#
            .to_string(),
    )
    .await;
    Mock::given(method("HEAD"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(1500)))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/fine"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let auditor = create_auditor(&create_test_config());
    let verdict = auditor
        .audit(&format!("{}/", mock_server.uri()), IssueType::BrokenLinks)
        .await;

    assert!(verdict.issue_detected);
    assert_eq!(verdict.details, "Found 1 broken links");
}

#[tokio::test]
async fn test_fetch_failure_yields_error_verdict() {
    let auditor = create_auditor(&create_test_config());

    for issue in IssueType::ALL {
        let verdict = auditor.audit(REFUSED_URL, issue).await;
        assert!(!verdict.issue_detected);
        assert!(verdict.details.starts_with("Error:"), "details: {}", verdict.details);
        assert!(verdict.emails.is_empty());
    }
}

#[tokio::test]
async fn test_run_produces_one_row_per_candidate() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<html><head><title>Good</title><meta name="description" content="Nice"></head>
        <body>hello@good.example</body></html>"#
            .to_string(),
    )
    .await;
    mount_page(
        &mock_server,
        "/bare",
        "<html><body>No metadata</body></html>".to_string(),
    )
    .await;

    let provider = StaticProvider(vec![
        hit("Good Dental", &format!("{}/", mock_server.uri())),
        hit("Down Dental", REFUSED_URL),
        hit("Bare Dental", &format!("{}/bare", mock_server.uri())),
    ]);
    let coordinator = Coordinator::with_provider(&create_test_config(), Box::new(provider))
        .expect("Failed to create coordinator");
    let request = RunRequest::new("Dentists", "London", IssueType::MissingSeoMetaTags).unwrap();

    let mut output = RecordingOutput::default();
    let report = coordinator.run(&request, &mut output).await;

    assert_eq!(report.rows.len(), 3);
    assert_eq!(output.row_counts, vec![1, 2, 3]);
    assert_eq!(output.last_rows, report.rows);
    assert!(!output.used_fallback);
    assert_eq!(
        output.progress.iter().map(|p| (p.0, p.1)).collect::<Vec<_>>(),
        vec![(1, 3), (2, 3), (3, 3)]
    );

    let good = &report.rows[0];
    assert_eq!(good.business_name, "Good Dental");
    assert!(!good.issue_detected);
    assert_eq!(good.details, "SEO Tags Present");
    assert_eq!(good.email_found, "hello@good.example");
    assert_eq!(good.niche, "Dentists");
    assert_eq!(good.region, "London");

    let down = &report.rows[1];
    assert_eq!(down.business_name, "Down Dental");
    assert!(!down.issue_detected);
    assert!(down.details.starts_with("Error:"));
    assert_eq!(down.email_found, "");

    let bare = &report.rows[2];
    assert!(bare.issue_detected);
    assert_eq!(bare.details, "Missing Title, Missing Meta Description");

    let summary = output.finalized.expect("finalize was not called");
    assert_eq!(summary.sites_audited, 3);
    assert_eq!(summary.issues_detected, 1);
    assert_eq!(summary.audit_errors, 1);
    assert_eq!(summary.query, "Dentists in London");
}

#[tokio::test]
async fn test_run_with_empty_search_audits_fallback_sites() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/a", "<html><body>a@one.example</body></html>".to_string()).await;
    mount_page(&mock_server, "/b", "<html><body>B</body></html>".to_string()).await;

    let fallback = vec![
        SiteCandidate::new("Fallback A", format!("{}/a", mock_server.uri())),
        SiteCandidate::new("Fallback B", format!("{}/b", mock_server.uri())),
    ];
    let provider = Box::new(StaticProvider(vec![]));
    let coordinator = Coordinator::with_provider(&create_test_config(), provider)
        .expect("Failed to create coordinator")
        .with_fallback_candidates(fallback.clone());
    let request = RunRequest::new("Dentists", "Atlantis", IssueType::SlowPageLoad).unwrap();

    let mut output = RecordingOutput::default();
    let report = coordinator.run(&request, &mut output).await;

    assert!(output.used_fallback);
    assert_eq!(output.discovered, fallback);
    let urls: Vec<_> = report.rows.iter().map(|r| r.website_url.clone()).collect();
    let expected: Vec<_> = fallback.into_iter().map(|c| c.url).collect();
    assert_eq!(urls, expected);
    assert_eq!(report.rows[0].email_found, "a@one.example");
    assert!(report.summary.used_fallback);
}

#[tokio::test]
async fn test_run_audit_rejects_invalid_config() {
    let mut config = create_test_config();
    config.discovery.max_results = 0;
    let request = RunRequest::new("Dentists", "London", IssueType::SlowPageLoad).unwrap();

    let result = run_audit(&config, &request, &mut RecordingOutput::default()).await;
    assert!(matches!(result, Err(AuditError::Config(_))));
}

#[tokio::test]
async fn test_broken_link_behind_redirect() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<html><body><a href="/old">Old</a></body></html>"#.to_string(),
    )
    .await;
    Mock::given(method("HEAD"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/gone"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auditor = create_auditor(&create_test_config());
    let verdict = auditor
        .audit(&format!("{}/", mock_server.uri()), IssueType::BrokenLinks)
        .await;

    assert!(verdict.issue_detected);
    assert_eq!(verdict.details, "Found 1 broken links");
}

#[tokio::test]
async fn test_redirect_to_live_page_is_not_broken() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<html><body><a href="/moved">Moved</a></body></html>"#.to_string(),
    )
    .await;
    Mock::given(method("HEAD"))
        .and(path("/moved"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/interim"))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/interim"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/landing"))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/landing"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auditor = create_auditor(&create_test_config());
    let verdict = auditor
        .audit(&format!("{}/", mock_server.uri()), IssueType::BrokenLinks)
        .await;

    assert!(!verdict.issue_detected);
    assert_eq!(verdict.details, "No broken links found in sample");
}

#[tokio::test]
async fn test_inline_markup_email_is_harvested() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<html><body><p>Contact: info<span>@</span>smiles.example</p></body></html>"#
            .to_string(),
    )
    .await;

    let auditor = create_auditor(&create_test_config());
    let verdict = auditor
        .audit(&format!("{}/", mock_server.uri()), IssueType::SlowPageLoad)
        .await;

    assert!(verdict.emails.contains("info@smiles.example"));
}

#[tokio::test]
async fn test_politeness_delay_between_audits() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", "<html></html>".to_string()).await;

    let mut config = create_test_config();
    config.run.politeness_delay_ms = 200;

    let site = format!("{}/", mock_server.uri());
    let provider = StaticProvider(vec![hit("A", &site), hit("B", &site), hit("C", &site)]);
    let coordinator = Coordinator::with_provider(&config, Box::new(provider)).unwrap();
    let request = RunRequest::new("Dentists", "London", IssueType::SlowPageLoad).unwrap();

    let start = std::time::Instant::now();
    let report = coordinator
        .run(&request, &mut RecordingOutput::default())
        .await;

    assert_eq!(report.rows.len(), 3);
    // two pauses: between the first/second and second/third audits
    assert!(start.elapsed() >= Duration::from_millis(400));
}

#[tokio::test]
async fn test_duckduckgo_provider_parses_results() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/html/"))
        .and(body_string_contains("q=Dentists"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body>
            <div class="result"><a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fsmiles.example.com%2F&amp;rut=x">Smiles Dental</a>
            <a class="result__snippet">Family dentist</a></div>
            <div class="result"><a class="result__a" href="https://bright.example.org/">Bright Teeth</a></div>
            </body></html>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config();
    config.discovery.endpoint = format!("{}/html/", mock_server.uri());
    let provider = DuckDuckGoHtml::new(&config.http, &config.discovery).unwrap();

    let discovery = discover(&provider, "Dentists in London", 20).await;

    assert!(!discovery.used_fallback);
    assert_eq!(
        discovery.candidates,
        vec![
            SiteCandidate::new("Smiles Dental", "https://smiles.example.com/"),
            SiteCandidate::new("Bright Teeth", "https://bright.example.org/"),
        ]
    );
}

#[tokio::test]
async fn test_duckduckgo_error_falls_back_to_placeholders() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(202).set_body_string(""))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config();
    config.discovery.endpoint = format!("{}/html/", mock_server.uri());
    let provider = DuckDuckGoHtml::new(&config.http, &config.discovery).unwrap();

    let discovery = discover(&provider, "Dentists in London", 20).await;
    assert!(discovery.used_fallback);
    assert_eq!(discovery.candidates.len(), 4);

    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;
    config.discovery.endpoint = format!("{}/html/", mock_server.uri());
    let provider = DuckDuckGoHtml::new(&config.http, &config.discovery).unwrap();

    let discovery = discover(&provider, "Dentists in London", 20).await;
    assert!(discovery.used_fallback);
    assert_eq!(discovery.candidates, placeholder_candidates());
}

#[tokio::test]
async fn test_stalled_search_endpoint_falls_back() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config();
    config.http.page_timeout_secs = 1;
    config.discovery.endpoint = format!("{}/html/", mock_server.uri());
    let provider = DuckDuckGoHtml::new(&config.http, &config.discovery).unwrap();

    let discovery = tokio::time::timeout(
        Duration::from_secs(10),
        discover(&provider, "Dentists in London", 20),
    )
    .await
    .expect("search did not give up after the page timeout");

    assert!(discovery.used_fallback);
    assert_eq!(discovery.candidates, placeholder_candidates());
}
