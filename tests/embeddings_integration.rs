//! Integration tests against the real ONNX model
//!
//! Ignored by default. Download the model into the default layout, then run
//! `cargo test -- --ignored`.

use recommender::config::EmbeddingsConfig;
use recommender::embeddings::{cosine_similarity, create_embedder, EmbeddingEngine};
use recommender::index::{FlatIndex, VectorIndex};

/// Get the configured embedder, or None when the model is not downloaded
fn get_test_embedder() -> Option<Box<dyn EmbeddingEngine>> {
    let config = EmbeddingsConfig::default();
    if !config.model_dir.join("tokenizer.json").exists() {
        eprintln!(
            "Model not found in {}; skipping. Download model_quantized.onnx and tokenizer.json first.",
            config.model_dir.display()
        );
        return None;
    }
    Some(create_embedder(&config).expect("Model should load"))
}

#[test]
#[ignore]
fn test_query_embedding_shape() {
    let Some(mut embedder) = get_test_embedder() else {
        return;
    };

    let embedding = embedder
        .embed_query("Java developer who can collaborate with business teams")
        .expect("Failed to generate embedding");

    assert_eq!(embedding.len(), embedder.dimension());
    assert!(embedding.iter().any(|&x| x != 0.0), "Embedding is all zeros");

    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 0.001, "Expected unit norm, got {}", norm);
}

#[test]
#[ignore]
fn test_job_description_similarity() {
    let Some(mut embedder) = get_test_embedder() else {
        return;
    };

    let java = embedder.embed("Hiring a Java backend engineer").unwrap();
    let java_test = embedder
        .embed("Multi-choice test of Java programming knowledge")
        .unwrap();
    let personality = embedder
        .embed("Questionnaire about workplace behaviour and personality")
        .unwrap();

    let sim_java = cosine_similarity(&java, &java_test);
    let sim_personality = cosine_similarity(&java, &personality);
    assert!(
        sim_java > sim_personality,
        "Expected sim(java, java test)={} > sim(java, personality)={}",
        sim_java,
        sim_personality
    );
}

#[test]
#[ignore]
fn test_model_ranks_matching_assessment_first() {
    let Some(mut embedder) = get_test_embedder() else {
        return;
    };

    let catalog = [
        "Verify Numerical Ability: numerical reasoning with charts and tables",
        "Java 8: knowledge of Java class design, generics and collections",
        "OPQ32r: personality and behaviour at work",
    ];

    let mut index = FlatIndex::new(embedder.dimension());
    for text in catalog {
        index.add(embedder.embed(text).unwrap()).unwrap();
    }

    let query = embedder.embed_query("Java programming test").unwrap();
    let hits = index.search(&query, 3).unwrap();
    assert_eq!(hits[0].key, 1);
}
