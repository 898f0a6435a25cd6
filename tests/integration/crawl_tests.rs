//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use contact_harvest::config::{CrawlerConfig, OutputConfig, UserAgentConfig};
use contact_harvest::crawler::{build_http_client, run_batch, run_job, CrawlJob};
use contact_harvest::output::{write_outputs, BatchReport};
use contact_harvest::{PageOutcome, Tier};
use reqwest::Client;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Crawler settings with no courtesy delay and a short timeout
fn test_config() -> CrawlerConfig {
    CrawlerConfig {
        request_timeout: 5,
        courtesy_delay: 0,
        ..CrawlerConfig::default()
    }
}

fn test_client() -> Client {
    build_http_client(&UserAgentConfig::default(), Duration::from_secs(5))
        .expect("Failed to build client")
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, page: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(html(body))
        .mount(server)
        .await;
}

async fn mount_unvisited(server: &MockServer, page: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(html("should not be fetched"))
        .expect(0)
        .mount(server)
        .await;
}

/// Paths requested from the server, in arrival order
async fn requested_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .expect("Request recording is enabled")
        .iter()
        .map(|request| request.url.path().to_string())
        .collect()
}

#[tokio::test]
async fn test_full_crawl_finds_career_email() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<a href="/about">About</a> <a href="/careers">Careers</a>
           <footer>Questions? <a href="mailto:info@acme.com?subject=Hi">Email us</a></footer>"#,
    )
    .await;
    mount_page(&server, "/about", "We build anvils.").await;
    mount_page(
        &server,
        "/careers",
        "Send your CV to jobs [at] acme [dot] com or hr@acme.com",
    )
    .await;

    let job = CrawlJob::new(format!("{}/", server.uri())).with_company("Acme");
    let result = run_job(&test_client(), &job, &test_config()).await;

    assert_eq!(result.company_name, "Acme");
    assert_eq!(result.tier, Tier::Career);
    assert_eq!(result.final_emails, vec!["hr@acme.com", "jobs@acme.com"]);
    assert_eq!(result.pages_scraped, 3);
    assert_eq!(result.pages_attempted, 3);
    assert!(result.pages.iter().all(|p| p.outcome == PageOutcome::Processed));
}

#[tokio::test]
async fn test_contact_tier_when_no_career_address() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<p>Reach us at hello@acme.com</p>
           <span data-email="jane.doe@acme.com">Jane</span>"#,
    )
    .await;

    let job = CrawlJob::new(format!("{}/", server.uri()));
    let result = run_job(&test_client(), &job, &test_config()).await;

    assert_eq!(result.tier, Tier::Contact);
    assert_eq!(result.final_emails, vec!["hello@acme.com"]);
}

#[tokio::test]
async fn test_priority_pages_fetched_first() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<a href="/blog">Blog</a> <a href="/news">News</a>
           <a href="/contact-us">Contact</a> <a href="/about">About</a>"#,
    )
    .await;
    mount_page(&server, "/contact-us", "Call us.").await;
    mount_page(&server, "/about", "Our story.").await;
    mount_unvisited(&server, "/blog").await;
    mount_unvisited(&server, "/news").await;

    let job = CrawlJob::new(format!("{}/", server.uri())).with_page_budget(3);
    let result = run_job(&test_client(), &job, &test_config()).await;

    assert_eq!(result.pages_attempted, 3);
    assert_eq!(requested_paths(&server).await, vec!["/", "/contact-us", "/about"]);
}

#[tokio::test]
async fn test_page_budget_limits_fetches() {
    let server = MockServer::start().await;

    let links: String = (1..=8)
        .map(|i| format!(r#"<a href="/page{}">Page {}</a>"#, i, i))
        .collect();
    mount_page(&server, "/", &links).await;
    for i in 1..=8 {
        mount_page(&server, &format!("/page{}", i), "Nothing here.").await;
    }

    let job = CrawlJob::new(format!("{}/", server.uri())).with_page_budget(4);
    let result = run_job(&test_client(), &job, &test_config()).await;

    assert_eq!(result.pages_attempted, 4);
    assert_eq!(result.pages_scraped, 4);
    assert_eq!(result.tier, Tier::None);
    assert_eq!(
        requested_paths(&server).await,
        vec!["/", "/page1", "/page2", "/page3"]
    );
}

#[tokio::test]
async fn test_early_stop_at_fifth_page() {
    let server = MockServer::start().await;

    let links: String = (1..=8)
        .map(|i| format!(r#"<a href="/p{}">{}</a>"#, i, i))
        .collect();
    mount_page(&server, "/", &links).await;
    mount_page(&server, "/p1", "Nothing.").await;
    mount_page(&server, "/p2", "Nothing.").await;
    mount_page(&server, "/p3", "Nothing.").await;
    mount_page(&server, "/p4", "Write to sales@acme.com").await;
    for i in 5..=8 {
        mount_unvisited(&server, &format!("/p{}", i)).await;
    }

    let job = CrawlJob::new(format!("{}/", server.uri()));
    let result = run_job(&test_client(), &job, &test_config()).await;

    assert_eq!(result.pages_attempted, 5);
    assert_eq!(result.tier, Tier::All);
    assert_eq!(result.final_emails, vec!["sales@acme.com"]);
}

#[tokio::test]
async fn test_early_stop_waits_for_threshold() {
    let server = MockServer::start().await;

    let links: String = (1..=8)
        .map(|i| format!(r#"<a href="/p{}">{}</a>"#, i, i))
        .collect();
    mount_page(&server, "/", &links).await;
    mount_page(&server, "/p1", "Write to sales@acme.com").await;
    for i in 2..=4 {
        mount_page(&server, &format!("/p{}", i), "Nothing.").await;
    }
    for i in 5..=8 {
        mount_unvisited(&server, &format!("/p{}", i)).await;
    }

    let job = CrawlJob::new(format!("{}/", server.uri()));
    let result = run_job(&test_client(), &job, &test_config()).await;

    assert_eq!(result.pages_attempted, 5);
    assert_eq!(result.final_emails, vec!["sales@acme.com"]);
}

#[tokio::test]
async fn test_configurable_early_stop_threshold() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"sales@acme.com <a href="/p1">1</a> <a href="/p2">2</a>"#,
    )
    .await;
    mount_page(&server, "/p1", "Nothing.").await;
    mount_unvisited(&server, "/p2").await;

    let config = CrawlerConfig {
        early_stop_pages: 2,
        ..test_config()
    };
    let job = CrawlJob::new(format!("{}/", server.uri()));
    let result = run_job(&test_client(), &job, &config).await;

    assert_eq!(result.pages_attempted, 2);
}

#[tokio::test]
async fn test_error_pages_do_not_abort_crawl() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<a href="/missing">Old</a> <a href="/broken">Broken</a>
           <a href="/brochure.pdf">PDF</a> <a href="/careers">Careers</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/brochure.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"%PDF-1.4 talent@acme.com".to_vec())
                .insert_header("content-type", "application/pdf"),
        )
        .mount(&server)
        .await;
    mount_page(&server, "/careers", "recruiting@acme.com").await;

    let job = CrawlJob::new(format!("{}/", server.uri()));
    let result = run_job(&test_client(), &job, &test_config()).await;

    assert_eq!(result.pages_attempted, 5);
    assert_eq!(result.pages_scraped, 2);
    assert_eq!(result.tier, Tier::Career);
    assert_eq!(result.final_emails, vec!["recruiting@acme.com"]);

    let outcomes: Vec<PageOutcome> = result.pages.iter().map(|p| p.outcome).collect();
    assert_eq!(
        outcomes,
        vec![
            PageOutcome::Processed,
            PageOutcome::Processed,
            PageOutcome::DeadLink,
            PageOutcome::HttpError(500),
            PageOutcome::ContentMismatch,
        ]
    );
}

#[tokio::test]
async fn test_seed_failure_returns_empty_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let job = CrawlJob::new(format!("{}/", server.uri())).with_company("Down Inc");
    let result = run_job(&test_client(), &job, &test_config()).await;

    assert_eq!(result.company_name, "Down Inc");
    assert_eq!(result.pages_scraped, 0);
    assert_eq!(result.pages_attempted, 1);
    assert_eq!(result.tier, Tier::None);
    assert!(result.final_emails.is_empty());
}

#[tokio::test]
async fn test_cross_site_links_not_followed() {
    let server = MockServer::start().await;
    let other = MockServer::start().await;

    mount_page(
        &server,
        "/",
        &format!(
            r#"<a href="{}/careers">Partner careers</a> <a href="/team">Team</a>"#,
            other.uri()
        ),
    )
    .await;
    mount_page(&server, "/team", "Our people.").await;
    mount_unvisited(&other, "/careers").await;

    let job = CrawlJob::new(format!("{}/", server.uri()));
    let result = run_job(&test_client(), &job, &test_config()).await;

    assert_eq!(result.pages_attempted, 2);
    assert!(requested_paths(&other).await.is_empty());
}

#[tokio::test]
async fn test_same_site_link_on_other_scheme_followed() {
    let server = MockServer::start().await;
    let secure_careers = format!("{}/careers", server.uri().replacen("http://", "https://", 1));

    mount_page(
        &server,
        "/",
        &format!(
            r#"<a href="{}">Careers</a> <a href="/team">Team</a>"#,
            secure_careers
        ),
    )
    .await;
    mount_page(&server, "/team", "Our people.").await;

    let job = CrawlJob::new(format!("{}/", server.uri()));
    let result = run_job(&test_client(), &job, &test_config()).await;

    // The mock only speaks plain HTTP, so the https visit is attempted but fails
    let careers = result
        .pages
        .iter()
        .find(|p| p.url == secure_careers)
        .expect("https link on the seed host should be visited");
    assert!(careers.outcome.is_error());
    assert_eq!(result.pages_attempted, 3);
    assert_eq!(result.pages_scraped, 2);
}

#[tokio::test]
async fn test_each_url_fetched_once() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r##"<a href="/about">About</a> <a href="/about#team">Team</a>
            <a href="/about?ref=nav">Nav</a> <a href="/">Home</a>"##,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html(r#"<a href="/">Home</a>"#))
        .expect(1)
        .mount(&server)
        .await;

    let job = CrawlJob::new(format!("{}/", server.uri()));
    let result = run_job(&test_client(), &job, &test_config()).await;

    assert_eq!(result.pages_attempted, 2);
    assert_eq!(requested_paths(&server).await, vec!["/", "/about"]);
}

#[tokio::test]
async fn test_redirected_seed_is_crawled() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/home"))
        .mount(&server)
        .await;
    mount_page(&server, "/home", "Say hello@acme.com").await;

    let job = CrawlJob::new(format!("{}/", server.uri()));
    let result = run_job(&test_client(), &job, &test_config()).await;

    assert_eq!(result.pages_scraped, 1);
    assert_eq!(result.final_emails, vec!["hello@acme.com"]);
}

#[tokio::test]
async fn test_script_and_meta_sources() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(
                    r#"<html><head><meta name="reply-to" content="talent@acme.com"></head>
                    <body><script>var e = "careers@acme.com";</script></body></html>"#,
                )
                .insert_header("content-type", "text/html"),
        )
        .mount(&server)
        .await;

    let job = CrawlJob::new(format!("{}/", server.uri()));
    let result = run_job(&test_client(), &job, &test_config()).await;

    assert_eq!(result.tier, Tier::Career);
    assert_eq!(
        result.final_emails,
        vec!["careers@acme.com", "talent@acme.com"]
    );
}

#[tokio::test]
async fn test_batch_results_in_input_order() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;

    mount_page(&first, "/", "jobs@first.io").await;
    mount_page(&second, "/", "info@second.io").await;

    let jobs = vec![
        CrawlJob::new(format!("{}/", first.uri())).with_company("First"),
        CrawlJob::new("not a url").with_company("Broken"),
        CrawlJob::new(format!("{}/", second.uri())).with_company("Second"),
    ];
    let config = CrawlerConfig {
        max_concurrent_sites: 3,
        ..test_config()
    };

    let results = run_batch(&test_client(), jobs, &config).await;

    let summary: Vec<(&str, Tier)> = results
        .iter()
        .map(|r| (r.company_name.as_str(), r.tier))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("First", Tier::Career),
            ("Broken", Tier::None),
            ("Second", Tier::Contact),
        ]
    );
}

#[tokio::test]
async fn test_sequential_batch_writes_report() {
    let server = MockServer::start().await;

    mount_page(&server, "/", r#"<a href="/jobs">Jobs</a>"#).await;
    mount_page(&server, "/jobs", "careers@acme.com").await;

    let jobs = vec![
        CrawlJob::new(format!("{}/", server.uri())).with_company("Acme"),
        CrawlJob::new(format!("{}/jobs", server.uri())).with_company("Acme Jobs"),
    ];
    let results = run_batch(&test_client(), jobs, &test_config()).await;
    assert_eq!(results.len(), 2);

    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let output = OutputConfig {
        results_path: dir.path().join("emails.json").to_string_lossy().into_owned(),
        summary_path: Some(dir.path().join("emails.md").to_string_lossy().into_owned()),
    };

    let report = BatchReport::new(&results, Some("hash".to_string()));
    write_outputs(&report, &output).expect("Failed to write outputs");

    let written: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("emails.json")).expect("Missing results file"),
    )
    .expect("Invalid JSON");

    assert_eq!(written["total_companies_scraped"], 2);
    assert_eq!(written["companies_with_emails"], 2);
    assert_eq!(written["total_emails_found"], 1);
    assert_eq!(written["all_emails"][0], "careers@acme.com");

    let summary =
        std::fs::read_to_string(dir.path().join("emails.md")).expect("Missing summary file");
    assert!(summary.contains("| Acme Jobs |"));
}
