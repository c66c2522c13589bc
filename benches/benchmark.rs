use criterion::{criterion_group, criterion_main, Criterion};
use tf_idf_recommender::{CorpusRecord, MemoryCorpusProvider, Recommender, RecommenderConfig};

const WORDS: &[&str] = &[
    "hp", "murah", "kamera", "jernih", "baterai", "awet", "layar", "lebar", "cepat", "lemot",
    "panas", "sinyal", "bagus", "mahal", "ringan", "tipis", "gaming", "lancar", "memori", "charger",
];

// deterministic pseudo-random corpus so runs are comparable
fn synthetic_corpus(docs: usize, words_per_doc: usize) -> MemoryCorpusProvider {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    let records = (0..docs)
        .map(|_| {
            let text = (0..words_per_doc)
                .map(|_| WORDS[(next() % WORDS.len() as u64) as usize])
                .collect::<Vec<_>>()
                .join(" ");
            CorpusRecord::raw(text)
        })
        .collect();
    MemoryCorpusProvider::new(records)
}

fn build_and_query_benchmark(c: &mut Criterion) {
    let provider = synthetic_corpus(1_000, 12);

    // Benchmark the whole build pipeline
    c.bench_function("build", |b| {
        b.iter(|| Recommender::build(&provider, RecommenderConfig::default()).unwrap());
    });

    let recommender = Recommender::build(&provider, RecommenderConfig::default()).unwrap();

    // Benchmark keyword resolution and ranking
    c.bench_function("recommend", |b| {
        b.iter(|| recommender.recommend("kamera").unwrap());
    });

    c.bench_function("similar_to", |b| {
        b.iter(|| recommender.similar_to(500).unwrap());
    });
}

criterion_group!(benches, build_and_query_benchmark);
criterion_main!(benches);
