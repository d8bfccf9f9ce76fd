//! Loader tests against a mock static file server.

use std::io::Write;
use std::sync::Arc;

use flate2::Compression;
use flate2::write::GzEncoder;
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wordspace_dataset::{
    DatasetError, DatasetLoader, DatasetSelection, HttpSource, ReductionMethod,
};

const GLOVE_PATH: &str = "/glove/50d/glove_50d_1000_umap.json.gz";

fn gzip(text: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

fn glove_selection() -> DatasetSelection {
    DatasetSelection::new("glove-50d".parse().unwrap(), 1000).with_reduction(ReductionMethod::Umap)
}

fn sample_points() -> String {
    serde_json::json!([
        {"x": 5.0, "y": 1.0, "z": -2.0, "word": "king", "cluster": 1, "edges": [1, 2]},
        {"x": 6.0, "y": 1.5, "z": -2.5, "word": "queen", "cluster": 1, "edges": [0]},
        {"x": 9.0, "y": 7.0, "z": 3.0, "word": "apple", "cluster": -1},
        {"x": "broken", "y": 0, "z": 0, "word": "skip-me"},
        {"x": 8.0, "y": 6.5, "z": 3.5, "word": "pear"}
    ])
    .to_string()
}

async fn loader_for(server: &MockServer) -> Arc<DatasetLoader> {
    let source = HttpSource::new(&server.uri()).unwrap();
    Arc::new(DatasetLoader::new(Arc::new(source)))
}

#[tokio::test]
async fn test_loads_gzipped_dataset_centered() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GLOVE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(gzip(&sample_points())))
        .mount(&server)
        .await;

    let loader = loader_for(&server).await;
    let dataset = loader.load_dataset(&glove_selection()).await.unwrap();

    assert_eq!(dataset.len(), 4);
    for (i, point) in dataset.points().iter().enumerate() {
        assert_eq!(point.index, i);
    }
    for axis in dataset.centroid() {
        assert!(axis.abs() < 1e-5, "centroid not at origin: {axis}");
    }
    assert_eq!(dataset.lookup("PEAR"), Some(3));
    assert_eq!(dataset.points()[3].cluster_id, 0);
    assert_eq!(dataset.edge_count(), 2);
}

#[tokio::test]
async fn test_plain_json_under_gz_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GLOVE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_points()))
        .mount(&server)
        .await;

    let loader = loader_for(&server).await;
    let dataset = loader.load_dataset(&glove_selection()).await.unwrap();
    assert_eq!(dataset.len(), 4);
}

#[tokio::test]
async fn test_float_encoded_clusters_and_edges() {
    let body = serde_json::json!([
        {"x": 0.0, "y": 0.0, "z": 0.0, "word": "cat", "label": "Cat", "cluster": 2.0,
         "edges": [1.0]},
        {"x": 1.0, "y": 0.0, "z": 0.0, "word": "dog", "cluster": 2.0, "edges": [0.0]}
    ])
    .to_string();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GLOVE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let loader = loader_for(&server).await;
    let dataset = loader.load_dataset(&glove_selection()).await.unwrap();

    assert_eq!(dataset.vocabulary(), vec!["cat", "dog"]);
    assert_eq!(dataset.points()[0].cluster_id, 2);
    assert_eq!(dataset.points()[0].neighbor_indices, vec![1]);
    assert_eq!(dataset.edge_count(), 1);
}

#[tokio::test]
async fn test_second_load_served_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GLOVE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(gzip(&sample_points())))
        .expect(1)
        .mount(&server)
        .await;

    let loader = loader_for(&server).await;
    let first = loader.load_dataset(&glove_selection()).await.unwrap();
    let second = loader.load_dataset(&glove_selection()).await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn test_server_error_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let loader = loader_for(&server).await;
    let err = loader.load_dataset(&glove_selection()).await.unwrap_err();
    assert!(matches!(err, DatasetError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_superseded_request_is_not_current() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(gzip(&sample_points())))
        .mount(&server)
        .await;

    let loader = loader_for(&server).await;
    let first = loader.request_dataset(glove_selection());
    let second = loader.request_dataset(
        DatasetSelection::new("glove-50d".parse().unwrap(), 1000)
            .with_reduction(ReductionMethod::Pca),
    );
    assert_eq!(second.path(), "glove/50d/glove_50d_1000_pca.json.gz");

    // Resolve the newer request first; the older one arrives late.
    let second = second.resolve().await;
    let first = first.resolve().await;

    assert!(first.result.is_ok());
    assert!(!loader.is_current_dataset(first.ticket));
    assert!(loader.is_current_dataset(second.ticket));
}

#[tokio::test]
async fn test_loads_vector_table() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/glove/50d/glove_50d_vectors.json.gz"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(gzip(
            r#"{"king": [0.5, 0.1], "queen": [0.4, 0.3], "odd": "not-a-vector"}"#,
        )))
        .mount(&server)
        .await;

    let loader = loader_for(&server).await;
    let pending = loader.request_vectors("glove-50d".parse().unwrap());
    let completed = pending.resolve().await;

    assert!(loader.is_current_vectors(completed.ticket));
    let table = completed.result.unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(table.get("odd"), Some(&[][..]));
}
