//! Shared fixtures: a small catalog and a keyword embedder that stands in
//! for the ONNX model so search behaviour is predictable.

#![allow(dead_code)]

use recommender::embeddings::EmbeddingEngine;
use recommender::index::{FlatIndex, Neighbor, VectorIndex};
use recommender::{Catalog, SearchContext, Session};

pub const CATALOG_CSV: &str = "\
,Individual Test Solutions,URL,Remote Testing (y/n),Adaptive/IRT (y/n),Test Type,Description,Assessment Length
0,Java 8 (New),https://www.shl.com/solutions/products/product-catalog/view/java-8-new/,Yes,No,K,\"Multi-choice test that measures the knowledge of Java class design, exceptions, generics and collections.\",Approximate Completion Time in minutes = 18
1,Core Java (Advanced Level) (New),https://www.shl.com/solutions/products/product-catalog/view/core-java-advanced-level-new/,Yes,No,K,Measures knowledge of advanced Java programming concepts.,Approximate Completion Time in minutes = 13
2,Java Frameworks (New),https://www.shl.com/solutions/products/product-catalog/view/java-frameworks-new/,Yes,No,K,Spring and Hibernate for Java developers.,Approximate Completion Time in minutes = 11
3,Automata - Fix (New),https://www.shl.com/solutions/products/product-catalog/view/automata-fix-new/,Yes,Yes,S,Coding simulation where candidates fix Java or Python programs.,Approximate Completion Time in minutes = 20
4,Verify - Numerical Ability,https://www.shl.com/solutions/products/product-catalog/view/verify-numerical-ability/,Yes,Yes,A,Measures numerical reasoning with charts and tables.,Approximate Completion Time in minutes = 20
5,Occupational Personality Questionnaire OPQ32r,https://www.shl.com/solutions/products/product-catalog/view/occupational-personality-questionnaire-opq32r/,Yes,No,P,Personality and behaviour at work.,Approximate Completion Time in minutes = 25
6,Graduate Scenarios,https://www.shl.com/solutions/products/product-catalog/view/graduate-scenarios/,Yes,No,A K P,Situational scenarios covering aptitude knowledge and personality.,Approximate Completion Time in minutes = 30
7,Programming Concepts,https://www.shl.com/solutions/products/product-catalog/view/programming-concepts/,Yes,No,K X,General programming and Java fundamentals.,Approximate Completion Time in minutes = 10
";

const VOCABULARY: [&str; 8] = [
    "java",
    "programming",
    "numerical",
    "personality",
    "simulation",
    "scenarios",
    "spring",
    "coding",
];

/// Bag-of-keywords embedder over a fixed vocabulary
pub struct KeywordEmbedder;

impl EmbeddingEngine for KeywordEmbedder {
    fn embed(&mut self, text: &str) -> anyhow::Result<Vec<f32>> {
        let lower = text.to_lowercase();
        let mut v: Vec<f32> = VOCABULARY
            .iter()
            .map(|word| lower.matches(word).count() as f32)
            .collect();
        // Small constant so no vector is all zeros
        v.push(0.05);
        Ok(v)
    }

    fn dimension(&self) -> usize {
        VOCABULARY.len() + 1
    }

    fn model_name(&self) -> &str {
        "keyword-test"
    }
}

/// Embedder that always returns a vector of the wrong width
pub struct WrongWidthEmbedder;

impl EmbeddingEngine for WrongWidthEmbedder {
    fn embed(&mut self, _text: &str) -> anyhow::Result<Vec<f32>> {
        Ok(vec![1.0; 3])
    }

    fn dimension(&self) -> usize {
        3
    }

    fn model_name(&self) -> &str {
        "wrong-width"
    }
}

/// Index that returns a fixed list of hits regardless of the query
pub struct ScriptedIndex {
    pub dimensions: usize,
    pub hits: Vec<Neighbor>,
}

impl VectorIndex for ScriptedIndex {
    fn search(&self, _query: &[f32], k: usize) -> anyhow::Result<Vec<Neighbor>> {
        Ok(self.hits.iter().take(k).copied().collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn len(&self) -> usize {
        self.hits.len()
    }
}

pub fn catalog() -> Catalog {
    Catalog::from_reader(CATALOG_CSV.as_bytes()).expect("fixture catalog parses")
}

/// Flat index over the fixture catalog, one vector per row
pub fn flat_index(catalog: &Catalog) -> FlatIndex {
    let mut embedder = KeywordEmbedder;
    let mut index = FlatIndex::new(embedder.dimension());
    for record in catalog.iter() {
        let text = format!("{} {}", record.name, record.description);
        index.add(embedder.embed(&text).unwrap()).unwrap();
    }
    index
}

pub fn session() -> Session {
    let catalog = catalog();
    let index = flat_index(&catalog);
    Session::new(
        SearchContext::new(catalog, Box::new(index)),
        Box::new(KeywordEmbedder),
    )
}

pub fn scripted_session(keys: &[u64]) -> Session {
    let hits = keys
        .iter()
        .enumerate()
        .map(|(i, &key)| Neighbor {
            key,
            distance: i as f32 * 0.1,
        })
        .collect();
    Session::new(
        SearchContext::new(
            catalog(),
            Box::new(ScriptedIndex {
                dimensions: KeywordEmbedder.dimension(),
                hits,
            }),
        ),
        Box::new(KeywordEmbedder),
    )
}
