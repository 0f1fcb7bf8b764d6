//! Integration tests for the directory-listing scraper, backed by a
//! local mock of the file server.

use std::sync::Arc;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use streamscout_core::{
    ClientConfig, EpisodeSelector, Error, HttpClient, Media, MediaType, Metadata, Scraper,
    VadapavScraper,
};

fn test_client() -> Arc<HttpClient> {
    let config = ClientConfig {
        requests_per_second: 200.0,
        timeout_secs: 5,
    };
    Arc::new(HttpClient::with_config(config).unwrap())
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn movie_metadata(id: &str) -> Metadata {
    Metadata {
        id: id.to_string(),
        title: "Heat".to_string(),
        media_type: MediaType::Movie,
        year: Some("1995".to_string()),
    }
}

fn series_metadata(id: &str) -> Metadata {
    Metadata {
        id: id.to_string(),
        title: "The Wire".to_string(),
        media_type: MediaType::Series,
        year: None,
    }
}

#[tokio::test]
async fn search_classifies_movies_and_series() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/s/heat",
        r#"
        <html><body>
            <a class="directory-entry" href="/d1/">Heat (1995)</a>
            <a class="directory-entry" href="/d2/">Heat of the Night</a>
        </body></html>
        "#,
    )
    .await;

    let scraper = VadapavScraper::with_base_url(test_client(), server.uri());
    let results = scraper.search("heat", 10).await.unwrap();

    assert_eq!(results.len(), 2);

    assert_eq!(results[0].id, "d1");
    assert_eq!(results[0].title, "Heat");
    assert_eq!(results[0].media_type, MediaType::Movie);
    assert_eq!(results[0].year.as_deref(), Some("1995"));

    assert_eq!(results[1].id, "d2");
    assert_eq!(results[1].title, "Heat of the Night");
    assert_eq!(results[1].media_type, MediaType::Series);
    assert_eq!(results[1].year, None);
}

#[tokio::test]
async fn search_applies_limit() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/s/heat",
        r#"
        <a class="directory-entry" href="/d1/">Heat (1995)</a>
        <a class="directory-entry" href="/d2/">Heat 2 (2023)</a>
        <a class="directory-entry" href="/d3/">Heat 3 (2024)</a>
        "#,
    )
    .await;

    let scraper = VadapavScraper::with_base_url(test_client(), server.uri());
    let results = scraper.search("heat", 2).await.unwrap();
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn scrape_movie_picks_highest_resolution_and_subtitles() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/d1",
        r#"
        <html><body>
            <a class="file-entry" href="/f/heat-720.mkv">Heat.1995.720p.mkv</a>
            <a class="file-entry" data-href="/f/heat-1080.mkv" href="/v/heat-1080">Heat.1995.1080p.mkv</a>
            <a class="file-entry" href="/f/heat-en.srt">Heat.1995.en.srt</a>
        </body></html>
        "#,
    )
    .await;

    let scraper = VadapavScraper::with_base_url(test_client(), server.uri());
    let media = scraper.scrape(&movie_metadata("d1"), None).await.unwrap();

    let Media::Movie(movie) = media else {
        panic!("Expected a movie");
    };
    assert_eq!(movie.url, format!("{}/f/heat-1080.mkv", server.uri()));
    assert_eq!(movie.referrer.as_deref(), Some(server.uri().as_str()));
    assert_eq!(movie.year.as_deref(), Some("1995"));

    let subtitles = movie.subtitles.unwrap();
    assert_eq!(
        subtitles.get("en").unwrap(),
        &format!("{}/f/heat-en.srt", server.uri())
    );
}

#[tokio::test]
async fn scrape_movie_without_files_is_not_found() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/d1",
        r#"<a class="file-entry" href="/f/heat.srt">Heat.srt</a>"#,
    )
    .await;

    let scraper = VadapavScraper::with_base_url(test_client(), server.uri());
    let result = scraper.scrape(&movie_metadata("d1"), None).await;
    assert!(matches!(result, Err(Error::MediaNotFound(_))));
}

#[tokio::test]
async fn scrape_series_resolves_episode_file() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/w1",
        r#"
        <a class="directory-entry" href="/parent/">../</a>
        <a class="directory-entry" href="/w1-s1/">Season 01</a>
        <a class="directory-entry" href="/w1-s2/">Season 02</a>
        "#,
    )
    .await;
    mount_page(
        &server,
        "/w1-s1/",
        r#"
        <a class="file-entry" href="/f/wire-s01e01.mkv">The.Wire.S01E01.720p.mkv</a>
        <a class="file-entry" href="/f/wire-s01e02.mkv">The.Wire.S01E02.720p.mkv</a>
        <a class="file-entry" href="/f/wire-s01e02.srt">The.Wire.S01E02.srt</a>
        "#,
    )
    .await;

    let scraper = VadapavScraper::with_base_url(test_client(), server.uri());
    let media = scraper
        .scrape(&series_metadata("w1"), Some(EpisodeSelector::new(1, 2)))
        .await
        .unwrap();

    let Media::Series(series) = media else {
        panic!("Expected a series");
    };
    assert_eq!(series.url, format!("{}/f/wire-s01e02.mkv", server.uri()));
    assert_eq!(series.episode, EpisodeSelector::new(1, 2));
}

#[tokio::test]
async fn scrape_series_missing_season_is_not_found() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/w1",
        r#"
        <a class="directory-entry" href="/parent/">../</a>
        <a class="directory-entry" href="/w1-s1/">Season 01</a>
        "#,
    )
    .await;

    let scraper = VadapavScraper::with_base_url(test_client(), server.uri());
    let result = scraper
        .scrape(&series_metadata("w1"), Some(EpisodeSelector::new(3, 1)))
        .await;
    assert!(matches!(result, Err(Error::MediaNotFound(_))));
}

#[tokio::test]
async fn scrape_series_missing_episode_is_not_found() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/w1",
        r#"
        <a class="directory-entry" href="/parent/">../</a>
        <a class="directory-entry" href="/w1-s1/">Season 01</a>
        "#,
    )
    .await;
    mount_page(
        &server,
        "/w1-s1/",
        r#"<a class="file-entry" href="/f/e1.mkv">The.Wire.S01E01.mkv</a>"#,
    )
    .await;

    let scraper = VadapavScraper::with_base_url(test_client(), server.uri());
    let result = scraper
        .scrape(&series_metadata("w1"), Some(EpisodeSelector::new(1, 9)))
        .await;
    assert!(matches!(result, Err(Error::MediaNotFound(_))));
}

#[tokio::test]
async fn scrape_episodes_counts_files_per_season() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/w1",
        r#"
        <a class="directory-entry" href="/parent/">../</a>
        <a class="directory-entry" href="/w1-s1/">Season 01</a>
        <a class="directory-entry" href="/w1-s2/">Season 02</a>
        "#,
    )
    .await;
    mount_page(
        &server,
        "/w1-s1/",
        r#"
        <a class="file-entry" href="/f/e1.mkv">The.Wire.S01E01.mkv</a>
        <a class="file-entry" href="/f/e2.mkv">The.Wire.S01E02.mkv</a>
        <a class="file-entry" href="/f/e2.srt">The.Wire.S01E02.srt</a>
        "#,
    )
    .await;
    mount_page(
        &server,
        "/w1-s2/",
        r#"<a class="file-entry" href="/f/e1.mkv">The.Wire.S02E01.mkv</a>"#,
    )
    .await;

    let scraper = VadapavScraper::with_base_url(test_client(), server.uri());
    let episodes = scraper.scrape_episodes(&series_metadata("w1")).await.unwrap();

    assert_eq!(episodes.len(), 2);
    assert_eq!(episodes.get(&1), Some(&2));
    assert_eq!(episodes.get(&2), Some(&1));
}

#[tokio::test]
async fn missing_directory_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let scraper = VadapavScraper::with_base_url(test_client(), server.uri());
    let result = scraper.scrape(&movie_metadata("gone"), None).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}
